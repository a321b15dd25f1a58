//! Callback-driven CSS tokenization
//!
//! Wraps [`Scanner`] for consumers that want a push interface: one
//! `token(kind_name, raw)` call per lexical unit, bracketed by optional
//! document callbacks. End of input is not forwarded as a token.

use log::debug;

use crate::error::CssResult;
use crate::scanner::Scanner;
use crate::token::TokenKind;

type VoidCallback<'h> = Box<dyn FnMut() + 'h>;
type TokenCallback<'h> = Box<dyn FnMut(&str, &str) + 'h>;

/// Optional callbacks for [`CssTokenizer`]
#[derive(Default)]
pub struct CssHandlers<'h> {
    start_document: Option<VoidCallback<'h>>,
    end_document: Option<VoidCallback<'h>>,
    token: Option<TokenCallback<'h>>,
}

impl<'h> CssHandlers<'h> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start_document(mut self, f: impl FnMut() + 'h) -> Self {
        self.start_document = Some(Box::new(f));
        self
    }

    pub fn on_end_document(mut self, f: impl FnMut() + 'h) -> Self {
        self.end_document = Some(Box::new(f));
        self
    }

    /// Called with the token kind's wire name and its raw text
    pub fn on_token(mut self, f: impl FnMut(&str, &str) + 'h) -> Self {
        self.token = Some(Box::new(f));
        self
    }
}

/// One-shot tokenizer over a complete stylesheet
#[derive(Default)]
pub struct CssTokenizer<'h> {
    handlers: CssHandlers<'h>,
}

impl<'h> CssTokenizer<'h> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the registered callbacks
    pub fn register(&mut self, handlers: CssHandlers<'h>) {
        self.handlers = handlers;
    }

    /// Tokenize `input`, invoking the registered callbacks
    pub fn parse(&mut self, input: &str) -> CssResult<()> {
        if let Some(f) = self.handlers.start_document.as_mut() {
            f();
        }

        let mut scanner = Scanner::new(input);
        let mut count = 0usize;
        loop {
            let token = scanner.next_token()?;
            if token.kind == TokenKind::Eof {
                break;
            }
            count += 1;
            if let Some(f) = self.handlers.token.as_mut() {
                let raw = scanner.slice(&token);
                f(token.kind.name(), &raw);
            }
        }
        debug!("tokenized stylesheet: {} tokens", count);

        if let Some(f) = self.handlers.end_document.as_mut() {
            f();
        }
        Ok(())
    }
}
