//! Incremental SGML/XML parser
//!
//! A single left-to-right scan pass over the retained buffer. Each markup
//! construct is scanned to completion or reported as incomplete; incomplete
//! constructs stay in the buffer and are rescanned when more input arrives,
//! so chunk boundaries never produce errors or change the event stream.

use log::trace;

use crate::buffer::ScanBuffer;
use crate::check::Checker;
use crate::entities;
use crate::error::{MarkupError, MarkupResult};
use crate::handler::EventHandlers;

/// Parsing dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Lowercased tag names, shorttag minimization, boolean attributes
    Sgml,
    /// CDATA sections, doctype internal subsets, case preserved
    Xml,
}

/// Guard against re-entrant feeding from inside a callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedState {
    Idle,
    Scanning,
}

/// Whether a doctype declaration is open. `Maybe` between `<!D` and the
/// end of the declaration, `Sure` once its internal subset `[` is seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DoctypeState {
    None,
    Maybe,
    Sure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    StartTag,
    EndTag,
    EmptyTag,
    Directive,
    Doctype,
    Pi,
    DtdStart,
    DtdEnd,
    DtdEntity,
    Cdata,
    EntityRef,
    CharRef,
    Comment,
}

/// A fully scanned construct. `start..name_end` is the name (or the whole
/// content where no name applies), `start..end` the content, `next` the
/// cursor position after the construct.
struct Construct {
    kind: TokenKind,
    start: usize,
    name_end: usize,
    end: usize,
    next: usize,
}

/// Outcome of scanning one construct
enum Scan {
    /// The construct is complete
    Token(Construct),
    /// The buffer ends inside the construct; retain it for the next feed
    Incomplete,
    /// Not markup after all, treat the lead character as raw text
    Text,
}

/// Incremental markup parser
pub struct Parser<'h> {
    mode: Mode,
    strict: bool,
    feed_state: FeedState,
    shorttag: bool,
    doctype: DoctypeState,
    feeds: u64,
    buffer: ScanBuffer,
    /// False until the first feed after construction or a close
    live: bool,
    checker: Option<Box<dyn Checker>>,
    handlers: EventHandlers<'h>,
}

impl<'h> Parser<'h> {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            strict: false,
            feed_state: FeedState::Idle,
            shorttag: false,
            doctype: DoctypeState::None,
            feeds: 0,
            buffer: ScanBuffer::new(),
            live: false,
            checker: None,
            handlers: EventHandlers::new(),
        }
    }

    pub fn sgml() -> Self {
        Self::new(Mode::Sgml)
    }

    pub fn xml() -> Self {
        Self::new(Mode::Xml)
    }

    /// Replace the registered callbacks
    pub fn register(&mut self, handlers: EventHandlers<'h>) {
        self.handlers = handlers;
    }

    /// In strict mode an entity that resolves nowhere is an error when a
    /// text handler is registered
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Install a well-formedness checker
    pub fn set_checker(&mut self, checker: Box<dyn Checker>) {
        self.checker = Some(checker);
    }

    /// Feed a chunk. Returns the number of code points retained for the
    /// next feed.
    pub fn feed(&mut self, data: &str) -> MarkupResult<usize> {
        self.feed_chunk(data, false)
    }

    /// Final feed. Whatever remains incomplete is dropped and the buffer
    /// is released.
    pub fn close(&mut self) -> MarkupResult<usize> {
        self.feed_chunk("", true)
    }

    /// Feed a complete document in one call
    pub fn parse(&mut self, data: &str) -> MarkupResult<usize> {
        self.feed_chunk(data, true)
    }

    fn feed_chunk(&mut self, data: &str, last: bool) -> MarkupResult<usize> {
        if self.feed_state == FeedState::Scanning {
            return Err(MarkupError::RecursiveFeed);
        }
        if !self.live {
            self.buffer.clear();
            self.shorttag = false;
            self.doctype = DoctypeState::None;
            self.live = true;
        }
        self.buffer.append(data);
        self.feeds += 1;

        self.feed_state = FeedState::Scanning;
        let scanned = self.scan_pass();
        self.feed_state = FeedState::Idle;
        let consumed = scanned?;

        if consumed > self.buffer.len() {
            return Err(MarkupError::BufferOverrun);
        }
        self.buffer.consume(consumed);
        let retained = self.buffer.len();
        trace!(
            "feed {}: consumed {}, retained {}",
            self.feeds,
            consumed,
            retained
        );

        if last {
            self.buffer.clear();
            self.live = false;
        }
        Ok(retained)
    }

    /// One pass over the buffer. Returns the number of code points
    /// consumed; everything after that position belongs to an incomplete
    /// construct.
    fn scan_pass(&mut self) -> MarkupResult<usize> {
        let end = self.buffer.len();
        let mut p = 0;
        let mut s = 0; // start of the pending raw text run
        let mut q = 0; // consumed watermark
        while p < end {
            q = p;
            let c = self.buffer.get(p);
            let scan = if c == '<' {
                self.scan_tag(p)
            } else if c == '&' {
                self.scan_reference(p)
            } else if c == '/' && self.shorttag {
                // end of shorttag data, synthesize an empty-named end tag
                self.shorttag = false;
                Scan::Token(Construct {
                    kind: TokenKind::EndTag,
                    start: p,
                    name_end: p,
                    end: p,
                    next: p + 1,
                })
            } else if c == ']' && self.doctype != DoctypeState::None {
                self.doctype = DoctypeState::None;
                Scan::Token(Construct {
                    kind: TokenKind::DtdEnd,
                    start: p,
                    name_end: p,
                    end: p,
                    next: p + 1,
                })
            } else if c == '%' && self.doctype != DoctypeState::None {
                self.scan_dtd_entity(p)
            } else {
                // raw data
                p += 1;
                q = p;
                continue;
            };

            match scan {
                Scan::Incomplete => break,
                Scan::Text => {
                    p += 1;
                    q = p;
                }
                Scan::Token(tok) => {
                    self.flush_text(s, q);
                    self.dispatch(&tok)?;
                    p = tok.next;
                    q = p;
                    s = p;
                }
            }
        }
        self.flush_text(s, q);
        Ok(q)
    }

    /// Everything starting with `<`: tags, end tags, directives, doctypes,
    /// comments, CDATA sections and processing instructions
    fn scan_tag(&mut self, open: usize) -> Scan {
        let end = self.buffer.len();
        let mut kind = TokenKind::StartTag;
        let mut p = open + 1;
        if p >= end {
            return Scan::Incomplete;
        }

        match self.buffer.get(p) {
            '!' => {
                p += 1;
                if p >= end {
                    return Scan::Incomplete;
                }
                kind = TokenKind::Directive;
                if self.buffer.get(p) == '-' {
                    return self.scan_comment(p);
                }
                if self.mode == Mode::Xml {
                    match self.buffer.get(p) {
                        'D' => {
                            kind = TokenKind::Doctype;
                            self.doctype = DoctypeState::Maybe;
                        }
                        '[' => return self.scan_cdata(p),
                        _ => {}
                    }
                }
            }
            '?' => {
                kind = TokenKind::Pi;
                p += 1;
                if p >= end {
                    return Scan::Incomplete;
                }
            }
            '/' => {
                kind = TokenKind::EndTag;
                p += 1;
                if p >= end {
                    return Scan::Incomplete;
                }
            }
            c if c.is_whitespace() => return Scan::Text,
            _ => {}
        }

        // tag name
        let b = p;
        if self.mode == Mode::Sgml {
            loop {
                let c = self.buffer.get(p);
                if !(c.is_alphanumeric() || matches!(c, '-' | '.' | ':' | '?')) {
                    break;
                }
                let lower = c.to_lowercase().next().unwrap_or(c);
                self.buffer.set(p, lower);
                p += 1;
                if p >= end {
                    return Scan::Incomplete;
                }
            }
        } else {
            loop {
                let c = self.buffer.get(p);
                if c == '>' || c == '/' || c == '?' || c.is_whitespace() {
                    break;
                }
                p += 1;
                if p >= end {
                    return Scan::Incomplete;
                }
            }
        }
        let t = p;

        if self.mode == Mode::Sgml && self.buffer.get(p) == '/' {
            // <tag/> or shorttag <tag/data/
            let e = p;
            p += 1;
            if p >= end {
                return Scan::Incomplete;
            }
            if self.buffer.get(p) == '>' {
                return Scan::Token(Construct {
                    kind: TokenKind::EmptyTag,
                    start: b,
                    name_end: t,
                    end: e,
                    next: p + 1,
                });
            }
            // an end tag is synthesized when the closing slash turns up
            self.shorttag = true;
            return Scan::Token(Construct {
                kind: TokenKind::StartTag,
                start: b,
                name_end: t,
                end: e,
                next: p,
            });
        }

        // skip attributes
        let mut quote: Option<char> = None;
        let mut last = '\0';
        loop {
            let c = self.buffer.get(p);
            if (c == '>' || c == '<') && quote.is_none() {
                break;
            }
            match quote {
                Some(open_quote) => {
                    if c == open_quote {
                        quote = None;
                    }
                }
                None => {
                    if c == '"' || c == '\'' {
                        quote = Some(c);
                    }
                }
            }
            if c == '[' && quote.is_none() && self.doctype != DoctypeState::None {
                self.doctype = DoctypeState::Sure;
                return Scan::Token(Construct {
                    kind: TokenKind::DtdStart,
                    start: b,
                    name_end: t,
                    end: p,
                    next: p + 1,
                });
            }
            last = c;
            p += 1;
            if p >= end {
                return Scan::Incomplete;
            }
        }

        let mut e = p;
        if self.buffer.get(p) == '>' {
            // an abutting '<' is left for the next construct
            p += 1;
        }
        if last == '/' {
            e -= 1;
            kind = TokenKind::EmptyTag;
        } else if kind == TokenKind::Pi && last == '?' {
            e -= 1;
        }
        if self.doctype == DoctypeState::Maybe {
            // the declaration closed without an internal subset
            self.doctype = DoctypeState::None;
        }

        Scan::Token(Construct { kind, start: b, name_end: t, end: e, next: p })
    }

    /// `<!--` comment; `dash` is the first `-`. The content runs from
    /// after the opener to the first `-` of the `-->` terminator.
    fn scan_comment(&self, dash: usize) -> Scan {
        let end = self.buffer.len();
        let b = dash + 2;
        let mut p = dash;
        loop {
            if p + 2 >= end {
                return Scan::Incomplete;
            }
            if self.buffer.get(p + 1) != '-' {
                p += 2;
            } else if self.buffer.get(p) != '-' || self.buffer.get(p + 2) != '>' {
                p += 1;
            } else {
                break;
            }
        }
        Scan::Token(Construct {
            kind: TokenKind::Comment,
            start: b,
            name_end: b,
            end: p,
            next: p + 3,
        })
    }

    /// `<![CDATA[` section; `bracket` is the first `[`
    fn scan_cdata(&self, bracket: usize) -> Scan {
        let end = self.buffer.len();
        let b = bracket + 7;
        let mut p = bracket;
        loop {
            if p + 2 >= end {
                return Scan::Incomplete;
            }
            if self.buffer.get(p + 1) != ']' {
                p += 2;
            } else if self.buffer.get(p) != ']' || self.buffer.get(p + 2) != '>' {
                p += 1;
            } else {
                break;
            }
        }
        Scan::Token(Construct {
            kind: TokenKind::Cdata,
            start: b,
            name_end: b,
            end: p,
            next: p + 3,
        })
    }

    /// `&name;` or `&#number;`. The terminating semicolon is optional;
    /// whitespace, `<` and `>` also end the reference.
    fn scan_reference(&self, amp: usize) -> Scan {
        let end = self.buffer.len();
        let mut kind = TokenKind::EntityRef;
        let mut p = amp + 1;
        if p >= end {
            return Scan::Incomplete;
        }
        if self.buffer.get(p) == '#' {
            kind = TokenKind::CharRef;
            p += 1;
            if p >= end {
                return Scan::Incomplete;
            }
        } else if self.buffer.get(p).is_whitespace() {
            return Scan::Text;
        }
        let b = p;
        loop {
            let c = self.buffer.get(p);
            if c == ';' || c == '<' || c == '>' || c.is_whitespace() {
                break;
            }
            p += 1;
            if p >= end {
                return Scan::Incomplete;
            }
        }
        let e = p;
        if self.buffer.get(p) == ';' {
            p += 1;
        }
        Scan::Token(Construct { kind, start: b, name_end: b, end: e, next: p })
    }

    /// `%name;` parameter entity inside a doctype internal subset
    fn scan_dtd_entity(&self, percent: usize) -> Scan {
        let end = self.buffer.len();
        let mut p = percent + 1;
        if p >= end {
            return Scan::Incomplete;
        }
        let b = p;
        loop {
            let c = self.buffer.get(p);
            if c == ';' || c.is_whitespace() {
                break;
            }
            p += 1;
            if p >= end {
                return Scan::Incomplete;
            }
        }
        let e = p;
        if self.buffer.get(p) == ';' {
            p += 1;
        }
        Scan::Token(Construct {
            kind: TokenKind::DtdEntity,
            start: b,
            name_end: b,
            end: e,
            next: p,
        })
    }

    /// Send the raw text run before a construct, if any
    fn flush_text(&mut self, start: usize, end: usize) {
        if start != end && self.handlers.text.is_some() {
            let text = self.buffer.string(start, end);
            if let Some(f) = self.handlers.text.as_mut() {
                f(&text);
            }
        }
    }

    fn dispatch(&mut self, tok: &Construct) -> MarkupResult<()> {
        match tok.kind {
            TokenKind::EndTag => {
                if self.handlers.end_tag.is_some() {
                    let name = self.buffer.string(tok.start, tok.name_end);
                    if let Some(checker) = &self.checker {
                        checker.end_tag(&name)?;
                    }
                    if let Some(f) = self.handlers.end_tag.as_mut() {
                        f(&name);
                    }
                }
            }
            TokenKind::Directive
            | TokenKind::Doctype
            | TokenKind::DtdStart
            | TokenKind::DtdEnd
            | TokenKind::DtdEntity => {
                if self.handlers.special.is_some() {
                    let text = self.buffer.string(tok.start, tok.end);
                    if let Some(f) = self.handlers.special.as_mut() {
                        f(&text);
                    }
                }
            }
            TokenKind::Pi => {
                if self.handlers.proc.is_some() {
                    let target = self.buffer.string(tok.start, tok.name_end);
                    let mut d = tok.name_end;
                    while d < tok.end && self.buffer.get(d).is_whitespace() {
                        d += 1;
                    }
                    let data = self.buffer.string(d, tok.end);
                    if let Some(f) = self.handlers.proc.as_mut() {
                        f(&target, &data);
                    }
                }
            }
            TokenKind::StartTag | TokenKind::EmptyTag => {
                if self.handlers.enter_start_tag.is_some() {
                    let name = self.buffer.string(tok.start, tok.name_end);
                    if let Some(checker) = &self.checker {
                        checker.start_tag(&name)?;
                    }
                    let mut a = tok.name_end;
                    while a < tok.end && self.buffer.get(a).is_whitespace() {
                        a += 1;
                    }
                    if let Some(f) = self.handlers.enter_start_tag.as_mut() {
                        f(&name);
                    }
                    self.parse_attributes(a, tok.end);
                    if let Some(f) = self.handlers.leave_start_tag.as_mut() {
                        f(&name);
                    }
                    if tok.kind == TokenKind::EmptyTag && self.handlers.end_tag.is_some() {
                        if let Some(checker) = &self.checker {
                            checker.end_tag(&name)?;
                        }
                        if let Some(f) = self.handlers.end_tag.as_mut() {
                            f(&name);
                        }
                    }
                }
            }
            TokenKind::EntityRef => {
                let name = self.buffer.string(tok.start, tok.end);
                if let Some(c) = entities::resolve_builtin(&name) {
                    if self.handlers.text.is_some() {
                        let text = c.to_string();
                        if let Some(f) = self.handlers.text.as_mut() {
                            f(&text);
                        }
                        return Ok(());
                    }
                }
                self.dispatch_entity(&name)?;
            }
            TokenKind::CharRef => {
                if self.handlers.char_ref.is_some() || self.handlers.text.is_some() {
                    let body = self.buffer.string(tok.start, tok.end);
                    if let Some(checker) = &self.checker {
                        checker.char_ref(&body)?;
                    }
                    if self.handlers.char_ref.is_some() {
                        if let Some(f) = self.handlers.char_ref.as_mut() {
                            f(&body);
                        }
                    } else {
                        match entities::resolve_numeric(&body) {
                            Some(c) => {
                                let text = c.to_string();
                                if let Some(f) = self.handlers.text.as_mut() {
                                    f(&text);
                                }
                            }
                            None => {
                                let name = format!("#{}", body);
                                self.dispatch_entity(&name)?;
                            }
                        }
                    }
                }
            }
            TokenKind::Cdata => {
                if self.handlers.cdata.is_some() || self.handlers.text.is_some() {
                    let text = self.buffer.string(tok.start, tok.end);
                    if let Some(f) = self.handlers.cdata.as_mut() {
                        f(&text);
                    } else if let Some(f) = self.handlers.text.as_mut() {
                        f(&text);
                    }
                }
            }
            TokenKind::Comment => {
                if self.handlers.comment.is_some() {
                    let text = self.buffer.string(tok.start, tok.end);
                    if let Some(checker) = &self.checker {
                        checker.comment(&text)?;
                    }
                    if let Some(f) = self.handlers.comment.as_mut() {
                        f(&text);
                    }
                }
            }
        }
        Ok(())
    }

    /// An entity that did not resolve into the text stream
    fn dispatch_entity(&mut self, name: &str) -> MarkupResult<()> {
        if self.handlers.entity_ref.is_some() {
            if let Some(checker) = &self.checker {
                checker.entity_ref(name)?;
            }
            if let Some(f) = self.handlers.entity_ref.as_mut() {
                f(name);
            }
            return Ok(());
        }
        if self.handlers.text.is_some() && self.strict {
            return Err(MarkupError::UnresolvableEntity(name.to_string()));
        }
        Ok(())
    }

    /// Split the attribute region of a start tag into name[=value] runs.
    /// Entities inside values come out as alternating text and entity-ref
    /// events between enter-attr and leave-attr.
    fn parse_attributes(&mut self, mut p: usize, end: usize) {
        while p < end {
            while p < end && self.buffer.get(p).is_whitespace() {
                p += 1;
            }
            if p >= end {
                break;
            }

            let mut q = p;
            while p < end && self.buffer.get(p) != '=' && !self.buffer.get(p).is_whitespace() {
                p += 1;
            }
            let key = self.buffer.string(q, p);

            if let Some(f) = self.handlers.enter_attr.as_mut() {
                f(&key);
            }

            while p < end && self.buffer.get(p).is_whitespace() {
                p += 1;
            }

            if p < end && self.buffer.get(p) == '=' {
                p += 1;
                while p < end && self.buffer.get(p).is_whitespace() {
                    p += 1;
                }
                if p < end {
                    let quote = match self.buffer.get(p) {
                        c @ ('"' | '\'') => {
                            p += 1;
                            Some(c)
                        }
                        _ => None,
                    };
                    q = p;
                    let mut in_entity = false;
                    while p < end {
                        let c = self.buffer.get(p);
                        let closed = match quote {
                            Some(open) => c == open,
                            None => c.is_whitespace(),
                        };
                        if closed || c == '>' {
                            break;
                        }
                        if !in_entity && c == '&' {
                            self.attr_text(q, p);
                            in_entity = true;
                            p += 1;
                            q = p;
                        } else if in_entity && c == ';' {
                            self.attr_entity(q, p);
                            in_entity = false;
                            p += 1;
                            q = p;
                        } else {
                            p += 1;
                        }
                    }
                    if in_entity {
                        self.attr_entity(q, p);
                    } else {
                        self.attr_text(q, p);
                    }
                    if quote.is_some() {
                        p += 1;
                    }
                }
            } else {
                // boolean attribute
                if self.mode == Mode::Sgml {
                    if let Some(f) = self.handlers.text.as_mut() {
                        f(&key);
                    }
                }
            }

            if let Some(f) = self.handlers.leave_attr.as_mut() {
                f(&key);
            }
        }
    }

    fn attr_text(&mut self, start: usize, end: usize) {
        if start != end && self.handlers.text.is_some() {
            let text = self.buffer.string(start, end);
            if let Some(f) = self.handlers.text.as_mut() {
                f(&text);
            }
        }
    }

    fn attr_entity(&mut self, start: usize, end: usize) {
        let name = self.buffer.string(start, end);
        match entities::resolve(&name) {
            Some(c) => {
                if self.handlers.text.is_some() {
                    let text = c.to_string();
                    if let Some(f) = self.handlers.text.as_mut() {
                        f(&text);
                    }
                }
            }
            None => {
                if let Some(f) = self.handlers.entity_ref.as_mut() {
                    f(&name);
                }
            }
        }
    }
}
