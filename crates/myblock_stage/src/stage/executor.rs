//! ProgramExecutor: drives one program against one fresh StageRuntime.

use std::error::Error;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use super::program::{Instruction, ParseError, Program};
use super::runtime::StageRuntime;
use super::types::{SpriteSnapshot, StageConfig};

// ============================================================================
// Run Outcome Types
// ============================================================================

/// Result of a successful run: the final snapshot plus the combined log
/// (all log lines joined, with the final report line appended last).
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub snapshot: SpriteSnapshot,
    pub log: String,
}

/// Terminal status of one run attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    Parse(ParseError),
    InstructionBudgetExceeded { limit: u64 },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Parse(err) => write!(f, "{err}"),
            RunError::InstructionBudgetExceeded { limit } => {
                write!(f, "instruction budget exceeded ({limit} instructions)")
            }
        }
    }
}

impl Error for RunError {}

impl From<ParseError> for RunError {
    fn from(error: ParseError) -> Self {
        RunError::Parse(error)
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Runs programs to completion or first failure, one fresh runtime per
/// run. Instructions execute strictly sequentially: instruction n+1 never
/// starts until instruction n's suspension (if any) has resolved. A run is
/// a single attempt; the executor never retries.
///
/// On failure the caller receives only the error. State mutated before the
/// failure point is discarded with the runtime, never surfaced.
#[derive(Debug, Clone, Default)]
pub struct ProgramExecutor {
    config: StageConfig,
}

impl ProgramExecutor {
    pub fn new() -> Self {
        Self::with_config(StageConfig::default())
    }

    pub fn with_config(config: StageConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Parse and run the textual program form.
    pub async fn run_source(&self, source: &str) -> Result<RunReport, RunError> {
        let program = Program::parse(source)?;
        self.run(&program).await
    }

    pub async fn run(&self, program: &Program) -> Result<RunReport, RunError> {
        let mut runtime = StageRuntime::with_config(self.config.clone());
        let mut budget = Budget::new(self.config.max_instructions);
        run_block(&mut runtime, &program.instructions, &mut budget).await?;

        let mut lines: Vec<String> = runtime.log().to_vec();
        lines.push(runtime.report());
        Ok(RunReport {
            snapshot: runtime.snapshot(),
            log: lines.join("\n"),
        })
    }
}

// ============================================================================
// Instruction Walk
// ============================================================================

#[derive(Debug)]
struct Budget {
    remaining: u64,
    limit: u64,
}

impl Budget {
    fn new(limit: u64) -> Self {
        Self {
            remaining: limit,
            limit,
        }
    }

    fn charge(&mut self) -> Result<(), RunError> {
        if self.remaining == 0 {
            return Err(RunError::InstructionBudgetExceeded { limit: self.limit });
        }
        self.remaining -= 1;
        Ok(())
    }
}

// Boxed recursion: repeat bodies nest arbitrarily, and async fns cannot
// recurse without an indirection.
fn run_block<'a>(
    runtime: &'a mut StageRuntime,
    block: &'a [Instruction],
    budget: &'a mut Budget,
) -> Pin<Box<dyn Future<Output = Result<(), RunError>> + 'a>> {
    Box::pin(async move {
        for instruction in block {
            match instruction {
                Instruction::Move { steps } => {
                    budget.charge()?;
                    runtime.move_steps(*steps);
                }
                Instruction::Turn { degrees } => {
                    budget.charge()?;
                    runtime.turn(*degrees);
                }
                Instruction::Say { message } => {
                    budget.charge()?;
                    runtime.say(message);
                }
                Instruction::Wait { seconds } => {
                    budget.charge()?;
                    runtime.wait(*seconds).await;
                }
                Instruction::Repeat { times, body } => {
                    for _ in 0..*times {
                        budget.charge()?;
                        run_block(&mut *runtime, body, &mut *budget).await?;
                    }
                }
            }
        }
        Ok(())
    })
}
