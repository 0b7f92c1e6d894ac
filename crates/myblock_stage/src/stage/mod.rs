//! Stage module - the sprite runtime, program model, executor, and session.
//!
//! This module is organized into submodules:
//! - `types`: Core type definitions (constants, config, sprite state)
//! - `program`: Instruction model and the textual program form
//! - `runtime`: StageRuntime (sprite state, log, the four operations)
//! - `executor`: ProgramExecutor (sequencing, budget, error capture)
//! - `session`: StageSession (UI-facing slot, run identity, reset)

mod executor;
mod program;
mod runtime;
mod session;
mod types;


pub use executor::{ProgramExecutor, RunError, RunReport, RunStatus};
pub use program::{Instruction, ParseError, Program, ProgramFormatError, PROGRAM_VERSION};
pub use runtime::StageRuntime;
pub use session::{SessionError, SessionPhase, StageSession};
pub use types::{
    ConfigError, RunId, SpriteSnapshot, SpriteState, StageConfig, DEFAULT_MAX_INSTRUCTIONS,
    INITIAL_DIRECTION_DEG, STEP_SCALE, WAIT_SCALE,
};
