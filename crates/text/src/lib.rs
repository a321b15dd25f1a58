//! Text helpers for markup processing: character-reference escaping,
//! XML encoding detection from a byte preamble, URL percent-coding and
//! path normalization.

mod encoding;
mod error;
mod escape;
mod url;

pub use encoding::detect_encoding;
pub use error::{TextError, TextResult};
pub use escape::{escape_attr, escape_text};
pub use url::{normalize_path, percent_escape, percent_unescape};
