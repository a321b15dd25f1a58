//! Event callback registration
//!
//! Every callback slot is optional. The parser skips the work behind a slot
//! entirely when it is empty; in particular attribute parsing only happens
//! when an enter-start-tag handler is registered.

pub(crate) type Callback<'h> = Box<dyn FnMut(&str) + 'h>;
pub(crate) type ProcCallback<'h> = Box<dyn FnMut(&str, &str) + 'h>;

/// Optional callbacks invoked during a scan pass
#[derive(Default)]
pub struct EventHandlers<'h> {
    pub(crate) enter_start_tag: Option<Callback<'h>>,
    pub(crate) leave_start_tag: Option<Callback<'h>>,
    pub(crate) end_tag: Option<Callback<'h>>,
    pub(crate) enter_attr: Option<Callback<'h>>,
    pub(crate) leave_attr: Option<Callback<'h>>,
    pub(crate) text: Option<Callback<'h>>,
    pub(crate) cdata: Option<Callback<'h>>,
    pub(crate) comment: Option<Callback<'h>>,
    pub(crate) special: Option<Callback<'h>>,
    pub(crate) entity_ref: Option<Callback<'h>>,
    pub(crate) char_ref: Option<Callback<'h>>,
    pub(crate) proc: Option<ProcCallback<'h>>,
}

impl<'h> EventHandlers<'h> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the tag name when a start tag opens
    pub fn on_enter_start_tag(mut self, f: impl FnMut(&str) + 'h) -> Self {
        self.enter_start_tag = Some(Box::new(f));
        self
    }

    /// Called with the tag name after its attributes
    pub fn on_leave_start_tag(mut self, f: impl FnMut(&str) + 'h) -> Self {
        self.leave_start_tag = Some(Box::new(f));
        self
    }

    /// Called with the tag name for explicit and synthesized end tags
    pub fn on_end_tag(mut self, f: impl FnMut(&str) + 'h) -> Self {
        self.end_tag = Some(Box::new(f));
        self
    }

    pub fn on_enter_attr(mut self, f: impl FnMut(&str) + 'h) -> Self {
        self.enter_attr = Some(Box::new(f));
        self
    }

    pub fn on_leave_attr(mut self, f: impl FnMut(&str) + 'h) -> Self {
        self.leave_attr = Some(Box::new(f));
        self
    }

    /// Called with raw text runs, resolved entities and attribute values
    pub fn on_text(mut self, f: impl FnMut(&str) + 'h) -> Self {
        self.text = Some(Box::new(f));
        self
    }

    /// Called with the content of CDATA sections
    pub fn on_cdata(mut self, f: impl FnMut(&str) + 'h) -> Self {
        self.cdata = Some(Box::new(f));
        self
    }

    /// Called with the content between the comment fences
    pub fn on_comment(mut self, f: impl FnMut(&str) + 'h) -> Self {
        self.comment = Some(Box::new(f));
        self
    }

    /// Called for directives, doctypes and DTD internal-subset constructs
    pub fn on_special(mut self, f: impl FnMut(&str) + 'h) -> Self {
        self.special = Some(Box::new(f));
        self
    }

    /// Called with unresolved entity names
    pub fn on_entity_ref(mut self, f: impl FnMut(&str) + 'h) -> Self {
        self.entity_ref = Some(Box::new(f));
        self
    }

    /// Called with the raw body of character references, `x`-prefixed for
    /// hexadecimal
    pub fn on_char_ref(mut self, f: impl FnMut(&str) + 'h) -> Self {
        self.char_ref = Some(Box::new(f));
        self
    }

    /// Called with target and data of processing instructions
    pub fn on_proc(mut self, f: impl FnMut(&str, &str) + 'h) -> Self {
        self.proc = Some(Box::new(f));
        self
    }
}
