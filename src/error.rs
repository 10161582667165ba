use thiserror::Error;

/// The two error kinds the engine can surface.
///
/// Everything else (unrecognized text, unregistered identifiers, policy
/// breaches) is ordinary result data, not an error.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A structural precondition on the input was violated. Surfaced before
    /// any partial processing.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An unexpected fault during processing (e.g. a malformed signature
    /// pattern). Caught and reported rather than propagated as a panic.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
