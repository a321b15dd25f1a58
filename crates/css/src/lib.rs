//! Lamassu CSS Tokenizer
//!
//! Lexical scanning of CSS source into a token stream, with an optional
//! callback-driven wrapper.

mod error;
mod scanner;
mod token;
mod tokenizer;

pub use error::{CssError, CssResult, Location};
pub use scanner::Scanner;
pub use token::{Token, TokenKind};
pub use tokenizer::{CssHandlers, CssTokenizer};
