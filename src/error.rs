use thiserror::Error;

/// Errors surfaced by keyed dictionary operations.
///
/// A missing key is not an error: lookups and deletes report absence through `Option` and
/// `bool`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DictError {
    /// The zero-length key cannot be stored, removed or looked up.
    #[error("empty keys are not supported")]
    EmptyKey,
}
