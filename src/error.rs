//! Process-level error type.
//!
//! Every failure that reaches `main` is an `AppError`: a message for stderr plus
//! the exit code the process terminates with. `PipelineError` stays typed until
//! it crosses into the orchestration layer.

use crate::enrich::PipelineError;

/// Open/create/read/write/flush failure on either file.
pub const EXIT_IO: u8 = 2;
/// Malformed input row under the `abort` policy.
pub const EXIT_DECODE: u8 = 3;
/// Rating code missing from the lookup table under the `abort` policy.
pub const EXIT_UNKNOWN_RATING: u8 = 4;
/// Worker panic, pool construction failure or invalid configuration.
pub const EXIT_INTERNAL: u8 = 5;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(EXIT_IO, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(EXIT_DECODE, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(EXIT_INTERNAL, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        let exit_code = match &err {
            PipelineError::UnknownRating { .. } => EXIT_UNKNOWN_RATING,
            PipelineError::NoWorkers
            | PipelineError::PoolBuild(_)
            | PipelineError::Spawn(_)
            | PipelineError::WorkerPanicked => EXIT_INTERNAL,
        };
        Self::new(exit_code, err.to_string())
    }
}
