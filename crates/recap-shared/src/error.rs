use thiserror::Error;

/// Errors surfaced by the caption-bot core.
///
/// None of these are fatal to the process; each maps to a user-visible
/// reply or a logged-and-ignored event.
#[derive(Debug, Error)]
pub enum RecapError {
    /// Malformed command arguments. The message doubles as the usage hint
    /// shown to the user.
    #[error("{0}")]
    InvalidArgument(String),

    /// A 1-based registry index that does not exist right now.
    #[error("No replacement rule at position {index} (there are {len})")]
    OutOfRange { index: usize, len: usize },

    /// Text or a mode pick arrived while the session was not expecting it.
    #[error("Not expecting that in the current state")]
    StateMismatch,
}

/// Convenience alias used throughout the core crates.
pub type Result<T> = std::result::Result<T, RecapError>;
