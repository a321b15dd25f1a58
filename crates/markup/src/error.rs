//! Markup parsing error types

use thiserror::Error;

/// Markup parsing result type
pub type MarkupResult<T> = Result<T, MarkupError>;

/// Markup parsing errors
#[derive(Debug, Error)]
pub enum MarkupError {
    /// A feed was started while another one was still scanning
    #[error("Recursive feed")]
    RecursiveFeed,

    /// A scan pass claimed more input than the buffer holds
    #[error("Buffer overrun")]
    BufferOverrun,

    #[error("Malformed tag name: {0:?}")]
    MalformedTagName(String),

    #[error("Unresolvable entity: &{0};")]
    UnresolvableEntity(String),
}
