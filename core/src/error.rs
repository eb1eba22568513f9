// conveyor/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum ConveyorError {
    #[error("Spawned step did not run to completion. Source: {source}")]
    Scheduling {
        #[source]
        source: JoinError,
    },

    #[error("Failed to start bridge runtime for a blocking join: {source}")]
    Runtime {
        #[source]
        source: std::io::Error,
    },

    #[error("Error in user-provided transformation. Source: {source}")]
    Step {
        #[source]
        source: AnyhowError,
    },
}

// This is the key conversion conveyor provides for external errors.
impl From<AnyhowError> for ConveyorError {
  fn from(err: AnyhowError) -> Self {
    ConveyorError::Step { source: err }
  }
}

// A spawned transformation that never produced a value (panic, runtime
// shutdown) arrives as a JoinError, not as the step's own error type.
impl From<JoinError> for ConveyorError {
  fn from(err: JoinError) -> Self {
    ConveyorError::Scheduling { source: err }
  }
}

pub type ConveyorResult<T, E = ConveyorError> = std::result::Result<T, E>;
