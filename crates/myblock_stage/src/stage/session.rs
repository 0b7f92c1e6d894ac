//! StageSession: the UI-facing slot for the current sprite state and log.
//!
//! One run at a time. Every run is tagged with an identity; an outcome
//! whose identity no longer matches the active one (because `reset` or a
//! newer run superseded it) is discarded, so a suspended wait from an
//! abandoned run can never mutate the slot a newer run has claimed.

use std::error::Error;
use std::fmt;
use std::sync::Mutex;

use super::executor::{ProgramExecutor, RunError, RunStatus};
use super::types::{RunId, SpriteSnapshot, SpriteState, StageConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A run is already in flight; the trigger is refused, not queued.
    RunInFlight,
    /// The session was reset (or superseded) while this run was suspended;
    /// its outcome was discarded.
    RunAbandoned,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::RunInFlight => write!(f, "a run is already in flight"),
            SessionError::RunAbandoned => write!(f, "run abandoned before completion"),
        }
    }
}

impl Error for SessionError {}

#[derive(Debug)]
struct SessionSlot {
    phase: SessionPhase,
    run_seq: RunId,
    snapshot: SpriteSnapshot,
    log_text: String,
    last_status: Option<RunStatus>,
}

impl SessionSlot {
    fn fresh() -> Self {
        Self {
            phase: SessionPhase::Idle,
            run_seq: 0,
            snapshot: SpriteState::new().snapshot(),
            log_text: String::new(),
            last_status: None,
        }
    }
}

pub struct StageSession {
    executor: ProgramExecutor,
    slot: Mutex<SessionSlot>,
}

impl StageSession {
    pub fn new() -> Self {
        Self::with_config(StageConfig::default())
    }

    pub fn with_config(config: StageConfig) -> Self {
        Self {
            executor: ProgramExecutor::with_config(config),
            slot: Mutex::new(SessionSlot::fresh()),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.slot.lock().expect("lock session slot").phase
    }

    /// Last committed snapshot: the most recently completed run's final
    /// state, or the initial state if no run has completed. A failed run
    /// leaves the previous snapshot in place.
    pub fn snapshot(&self) -> SpriteSnapshot {
        self.slot.lock().expect("lock session slot").snapshot.clone()
    }

    /// Text for the UI log area: the combined log of the last completed
    /// run, or `Error: {message}` if the last run failed.
    pub fn log_text(&self) -> String {
        self.slot.lock().expect("lock session slot").log_text.clone()
    }

    pub fn last_status(&self) -> Option<RunStatus> {
        self.slot.lock().expect("lock session slot").last_status
    }

    /// Run a textual program. Refuses if a run is already in flight. A
    /// failed run is a normal outcome (`Ok(RunStatus::Failed)`): the slot's
    /// log area shows the error and the snapshot keeps its previous value.
    pub async fn run(&self, source: &str) -> Result<RunStatus, SessionError> {
        let run_id = {
            let mut slot = self.slot.lock().expect("lock session slot");
            if slot.phase == SessionPhase::Running {
                return Err(SessionError::RunInFlight);
            }
            slot.run_seq += 1;
            slot.phase = SessionPhase::Running;
            slot.run_seq
        };

        // The lock is not held across the await: the run may suspend for
        // an unbounded time and readers must still see the previous slot.
        let outcome = self.executor.run_source(source).await;

        let mut slot = self.slot.lock().expect("lock session slot");
        if slot.run_seq != run_id {
            // Reset or a newer run claimed the slot while we were
            // suspended. Discard this outcome entirely.
            return Err(SessionError::RunAbandoned);
        }
        slot.phase = SessionPhase::Idle;
        match outcome {
            Ok(report) => {
                slot.snapshot = report.snapshot;
                slot.log_text = report.log;
                slot.last_status = Some(RunStatus::Completed);
                Ok(RunStatus::Completed)
            }
            Err(error) => {
                slot.log_text = format_run_error(&error);
                slot.last_status = Some(RunStatus::Failed);
                Ok(RunStatus::Failed)
            }
        }
    }

    /// Abandon any in-flight run and restore the initial state. The bumped
    /// run identity makes the abandoned run's outcome unmatchable.
    pub fn reset(&self) {
        let mut slot = self.slot.lock().expect("lock session slot");
        let run_seq = slot.run_seq + 1;
        *slot = SessionSlot::fresh();
        slot.run_seq = run_seq;
    }
}

impl Default for StageSession {
    fn default() -> Self {
        Self::new()
    }
}

fn format_run_error(error: &RunError) -> String {
    format!("Error: {error}")
}
