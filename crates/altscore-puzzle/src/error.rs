//! Error types for the puzzle workflow.

/// Errors raised by puzzle operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    /// The repair bay was visited before any system was reported damaged.
    #[error("No damaged system found. Call /status first.")]
    NoDamagedSystem,
}
