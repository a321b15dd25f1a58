//! Pluggable well-formedness checking
//!
//! Checks run at tag and reference boundaries, before the matching
//! callback. Every method accepts by default, so an implementation only
//! overrides what it cares about.

use lamassu_chars as chars;

use crate::error::{MarkupError, MarkupResult};

/// Hooks invoked before the corresponding event callbacks
pub trait Checker {
    fn start_tag(&self, name: &str) -> MarkupResult<()> {
        let _ = name;
        Ok(())
    }

    fn end_tag(&self, name: &str) -> MarkupResult<()> {
        let _ = name;
        Ok(())
    }

    fn entity_ref(&self, name: &str) -> MarkupResult<()> {
        let _ = name;
        Ok(())
    }

    fn char_ref(&self, body: &str) -> MarkupResult<()> {
        let _ = body;
        Ok(())
    }

    fn comment(&self, text: &str) -> MarkupResult<()> {
        let _ = text;
        Ok(())
    }
}

/// Validates tag names; everything else is accepted
pub struct WellFormedChecker;

fn check_name(name: &str) -> MarkupResult<()> {
    let mut cs = name.chars();
    let ok = match cs.next() {
        Some(first) => chars::is_markup_name_start(first) && cs.all(chars::is_markup_name),
        None => false,
    };
    if ok {
        Ok(())
    } else {
        Err(MarkupError::MalformedTagName(name.to_string()))
    }
}

impl Checker for WellFormedChecker {
    fn start_tag(&self, name: &str) -> MarkupResult<()> {
        check_name(name)
    }

    fn end_tag(&self, name: &str) -> MarkupResult<()> {
        check_name(name)
    }
}
