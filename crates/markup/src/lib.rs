//! Lamassu Markup Parser
//!
//! Incremental, callback-driven SGML/XML tokenization. Documents are fed in
//! chunks; constructs that are cut off at a chunk boundary are retained and
//! completed by later feeds.

mod buffer;
mod check;
mod entities;
mod error;
mod handler;
mod parser;

pub use buffer::ScanBuffer;
pub use check::{Checker, WellFormedChecker};
pub use error::{MarkupError, MarkupResult};
pub use handler::EventHandlers;
pub use parser::{Mode, Parser};
