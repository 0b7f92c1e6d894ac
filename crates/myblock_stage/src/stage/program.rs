//! Instruction model and the textual program form emitted by the block
//! compiler (or typed directly).
//!
//! Programs are a finite instruction list rather than evaluated text: the
//! block vocabulary only ever produces sequences and repeat blocks, so a
//! tagged sum type covers its full expressive power.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

pub const PROGRAM_VERSION: u32 = 1;

// ============================================================================
// Instructions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Instruction {
    Move { steps: f64 },
    Turn { degrees: f64 },
    Say { message: String },
    Wait { seconds: f64 },
    Repeat { times: u32, body: Vec<Instruction> },
}

// ============================================================================
// Program
// ============================================================================

fn default_program_version() -> u32 {
    PROGRAM_VERSION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default = "default_program_version")]
    pub version: u32,
    pub instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self {
            version: PROGRAM_VERSION,
            instructions,
        }
    }

    pub fn to_json(&self) -> Result<String, ProgramFormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a program the block compiler serialized as JSON.
    pub fn from_json(input: &str) -> Result<Self, ProgramFormatError> {
        let program: Self = serde_json::from_str(input)?;
        program.validate_version()?;
        Ok(program)
    }

    pub(crate) fn validate_version(&self) -> Result<(), ProgramFormatError> {
        if self.version == PROGRAM_VERSION {
            Ok(())
        } else {
            Err(ProgramFormatError::UnsupportedVersion {
                version: self.version,
                expected: PROGRAM_VERSION,
            })
        }
    }

    /// Parse the line-oriented textual program form.
    ///
    /// One instruction per line: `move N`, `turn N`, `wait N`,
    /// `say <rest of line>`, and `repeat N` ... `end` blocks. Blank lines
    /// and lines starting with `#` are ignored.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let mut open_blocks: Vec<(u32, Vec<Instruction>, usize)> = Vec::new();
        let mut current: Vec<Instruction> = Vec::new();

        for (index, raw_line) in source.lines().enumerate() {
            let line = index + 1;
            let text = raw_line.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            let (op, operand) = match text.split_once(char::is_whitespace) {
                Some((op, rest)) => (op, rest.trim()),
                None => (text, ""),
            };
            match op {
                "move" => current.push(Instruction::Move {
                    steps: parse_number(op, operand, line)?,
                }),
                "turn" => current.push(Instruction::Turn {
                    degrees: parse_number(op, operand, line)?,
                }),
                "wait" => current.push(Instruction::Wait {
                    seconds: parse_number(op, operand, line)?,
                }),
                // An empty operand is a valid empty utterance.
                "say" => current.push(Instruction::Say {
                    message: operand.to_string(),
                }),
                "repeat" => {
                    let times = parse_count(operand, line)?;
                    open_blocks.push((times, std::mem::take(&mut current), line));
                }
                "end" => {
                    if !operand.is_empty() {
                        return Err(ParseError {
                            line,
                            message: "end takes no operand".to_string(),
                        });
                    }
                    match open_blocks.pop() {
                        Some((times, outer, _)) => {
                            let body = std::mem::replace(&mut current, outer);
                            current.push(Instruction::Repeat { times, body });
                        }
                        None => {
                            return Err(ParseError {
                                line,
                                message: "end without matching repeat".to_string(),
                            });
                        }
                    }
                }
                other => {
                    return Err(ParseError {
                        line,
                        message: format!("unknown instruction: {other}"),
                    });
                }
            }
        }

        if let Some((_, _, opened_at)) = open_blocks.last() {
            return Err(ParseError {
                line: *opened_at,
                message: "repeat without matching end".to_string(),
            });
        }
        Ok(Self::new(current))
    }
}

fn parse_number(op: &str, operand: &str, line: usize) -> Result<f64, ParseError> {
    if operand.is_empty() {
        return Err(ParseError {
            line,
            message: format!("{op} expects a number"),
        });
    }
    operand.parse::<f64>().map_err(|_| ParseError {
        line,
        message: format!("{op} expects a number, got: {operand}"),
    })
}

fn parse_count(operand: &str, line: usize) -> Result<u32, ParseError> {
    if operand.is_empty() {
        return Err(ParseError {
            line,
            message: "repeat expects a count".to_string(),
        });
    }
    operand.parse::<u32>().map_err(|_| ParseError {
        line,
        message: format!("repeat expects a non-negative count, got: {operand}"),
    })
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl Error for ParseError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramFormatError {
    UnsupportedVersion { version: u32, expected: u32 },
    Serde(String),
}

impl fmt::Display for ProgramFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramFormatError::UnsupportedVersion { version, expected } => {
                write!(f, "unsupported program version {version}, expected {expected}")
            }
            ProgramFormatError::Serde(message) => write!(f, "program decode failed: {message}"),
        }
    }
}

impl Error for ProgramFormatError {}

impl From<serde_json::Error> for ProgramFormatError {
    fn from(error: serde_json::Error) -> Self {
        ProgramFormatError::Serde(error.to_string())
    }
}
