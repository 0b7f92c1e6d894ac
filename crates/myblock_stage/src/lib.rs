pub mod geometry;
pub mod stage;

pub use geometry::{
    clamp_to_stage, heading_radians, normalize_direction, SpritePoint,
    DEFAULT_STAGE_HEIGHT_UNITS, DEFAULT_STAGE_WIDTH_UNITS,
};
pub use stage::{
    ConfigError, Instruction, ParseError, Program, ProgramExecutor, ProgramFormatError, RunError,
    RunId, RunReport, RunStatus, SessionError, SessionPhase, SpriteSnapshot, SpriteState,
    StageConfig, StageRuntime, StageSession, DEFAULT_MAX_INSTRUCTIONS, INITIAL_DIRECTION_DEG,
    PROGRAM_VERSION, STEP_SCALE, WAIT_SCALE,
};
