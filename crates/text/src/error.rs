use thiserror::Error;

pub type TextResult<T> = Result<T, TextError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextError {
    /// The XML declaration cannot be parsed as pseudo-attributes
    #[error("malformed XML declaration: {0}")]
    MalformedDeclaration(&'static str),
}
