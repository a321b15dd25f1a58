//! CSS lexical scanner
//!
//! Longest-match, single-pass scanner over a complete stylesheet. Spans are
//! reported in code points with delimiters (quotes, comment fences, the `(`
//! of a function, url closers) trimmed away; numeric tokens keep their unit
//! text.

use lamassu_chars as chars;

use crate::error::{CssError, CssResult, Location};
use crate::token::{Token, TokenKind};

/// CSS scanner over a fixed input
pub struct Scanner {
    input: Vec<char>,
    /// Index one past the character in `current`
    position: usize,
    /// Lookahead character, `None` at end of input
    current: Option<char>,
    /// 0-based line of `current`
    line: usize,
    /// 0-based column of `current`
    column: usize,
    /// Start of the current token text
    start: usize,
    /// Characters inside the consumed text that do not belong to the
    /// token text (url closers, trailing spaces)
    blank_characters: usize,
}

impl Scanner {
    /// Create a scanner positioned at the first character of `input`
    pub fn new(input: &str) -> Self {
        let mut scanner = Self {
            input: input.chars().collect(),
            position: 0,
            current: None,
            line: 0,
            column: 0,
            start: 0,
            blank_characters: 0,
        };
        scanner.advance();
        scanner
    }

    /// Location of the most recently read character
    pub fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    /// Raw text of a token
    pub fn slice(&self, token: &Token) -> String {
        self.input[token.start..token.end].iter().collect()
    }

    /// Scan the next token. At end of input this keeps returning
    /// `TokenKind::Eof`.
    pub fn next_token(&mut self) -> CssResult<Token> {
        self.blank_characters = 0;
        self.start = self.position.saturating_sub(1);
        let kind = self.scan_token()?;
        let end = self.position.saturating_sub(self.end_gap(kind));
        Ok(Token { kind, start: self.start, end })
    }

    /// The only place line and column move. The line check looks at the
    /// previously current character, so the character after a newline gets
    /// column 0.
    fn advance(&mut self) -> Option<char> {
        if self.position >= self.input.len() {
            self.current = None;
            return None;
        }
        match self.current {
            Some('\n') => {
                self.line += 1;
                self.column = 0;
            }
            Some(_) => self.column += 1,
            None => {}
        }
        self.current = Some(self.input[self.position]);
        self.position += 1;
        self.current
    }

    /// Characters consumed past the end of the token text
    fn end_gap(&self, kind: TokenKind) -> usize {
        let mut gap = usize::from(self.current.is_some());
        match kind {
            TokenKind::Function | TokenKind::String => gap += 1,
            TokenKind::Comment => gap += 2,
            _ => {}
        }
        gap + self.blank_characters
    }

    fn scan_token(&mut self) -> CssResult<TokenKind> {
        match self.current {
            None => Ok(TokenKind::Eof),
            Some('{') => self.single(TokenKind::LeftCurlyBrace),
            Some('}') => self.single(TokenKind::RightCurlyBrace),
            Some('=') => self.single(TokenKind::Equal),
            Some('+') => self.single(TokenKind::Plus),
            Some(',') => self.single(TokenKind::Comma),
            Some(';') => self.single(TokenKind::SemiColon),
            Some('>') => self.single(TokenKind::Precede),
            Some('[') => self.single(TokenKind::LeftBracket),
            Some(']') => self.single(TokenKind::RightBracket),
            Some('*') => self.single(TokenKind::Any),
            Some('(') => self.single(TokenKind::LeftBrace),
            Some(')') => self.single(TokenKind::RightBrace),
            Some(':') => self.single(TokenKind::Colon),
            Some(c) if chars::is_css_space(c) => {
                loop {
                    self.advance();
                    if !self.current.map_or(false, chars::is_css_space) {
                        break;
                    }
                }
                Ok(TokenKind::Space)
            }
            Some('/') => {
                self.advance();
                if self.current != Some('*') {
                    return Ok(TokenKind::Divide);
                }
                self.comment()
            }
            Some(q @ ('\'' | '"')) => self.string(q),
            Some('<') => {
                self.advance();
                if self.current == Some('!') {
                    self.advance();
                    if self.current == Some('-') {
                        self.advance();
                        if self.current == Some('-') {
                            self.advance();
                            return Ok(TokenKind::Cdo);
                        }
                    }
                }
                Err(CssError::parse_error("expected '<!--'", self.location()))
            }
            Some('-') => {
                self.advance();
                if self.current != Some('-') {
                    return Ok(TokenKind::Minus);
                }
                self.advance();
                if self.current == Some('>') {
                    self.advance();
                    return Ok(TokenKind::Cdc);
                }
                Err(CssError::parse_error("expected '-->'", self.location()))
            }
            Some('|') => {
                self.advance();
                if self.current == Some('=') {
                    self.advance();
                    return Ok(TokenKind::DashMatch);
                }
                Err(CssError::parse_error("expected '=' after '|'", self.location()))
            }
            Some('~') => {
                self.advance();
                if self.current == Some('=') {
                    self.advance();
                    return Ok(TokenKind::Includes);
                }
                Err(CssError::parse_error("expected '=' after '~'", self.location()))
            }
            Some('#') => {
                self.advance();
                if self.current.map_or(false, chars::is_name_char) {
                    self.start = self.position.saturating_sub(1);
                    self.name_tail()?;
                    return Ok(TokenKind::Hash);
                }
                Err(CssError::parse_error("expected name after '#'", self.location()))
            }
            Some('@') => self.at_keyword(),
            Some('!') => {
                loop {
                    self.advance();
                    if !self.current.map_or(false, chars::is_css_space) {
                        break;
                    }
                }
                if self.current.map_or(false, |c| c.eq_ignore_ascii_case(&'i')) {
                    if let Some(kind) = self.keyword("mportant", TokenKind::ImportantSymbol) {
                        return Ok(kind);
                    }
                }
                Err(CssError::parse_error("expected 'important' after '!'", self.location()))
            }
            Some(c) if c.is_ascii_digit() => self.number(),
            Some('.') => {
                self.advance();
                if self.current.map_or(false, |c| c.is_ascii_digit()) {
                    return Ok(self.dot_number());
                }
                Ok(TokenKind::Dot)
            }
            Some('u' | 'U') => {
                self.advance();
                match self.current {
                    Some('+') => self.unicode_range(),
                    Some('r' | 'R') => {
                        self.advance();
                        match self.current {
                            Some('l' | 'L') => {
                                self.advance();
                                if self.current == Some('(') {
                                    self.url_body()
                                } else {
                                    Ok(self.ident_tail())
                                }
                            }
                            _ => Ok(self.ident_tail()),
                        }
                    }
                    _ => Ok(self.ident_tail()),
                }
            }
            Some(c) if chars::is_identifier_start(c) => {
                self.name_tail()?;
                if self.current == Some('(') {
                    self.advance();
                    return Ok(TokenKind::Function);
                }
                Ok(TokenKind::Identifier)
            }
            Some(c) => {
                self.advance();
                Err(CssError::IllegalCharacter { character: c, location: self.location() })
            }
        }
    }

    fn single(&mut self, kind: TokenKind) -> CssResult<TokenKind> {
        self.advance();
        Ok(kind)
    }

    /// Case-insensitive match of `rest`, one advance per character. On a
    /// mismatch the offending character stays current and the caller falls
    /// back to a name tail.
    fn keyword(&mut self, rest: &str, kind: TokenKind) -> Option<TokenKind> {
        for want in rest.chars() {
            let got = self.advance();
            if !got.map_or(false, |c| c.eq_ignore_ascii_case(&want)) {
                return None;
            }
        }
        self.advance();
        Some(kind)
    }

    /// Name continuation with backslash escapes, consuming one character
    /// past the name.
    fn name_tail(&mut self) -> CssResult<()> {
        loop {
            self.advance();
            if self.current == Some('\\') {
                self.advance();
                self.escape()?;
            }
            if !self.current.map_or(false, chars::is_name_char) {
                return Ok(());
            }
        }
    }

    /// Plain name continuation, then `(` decides function vs identifier
    fn ident_tail(&mut self) -> TokenKind {
        while self.current.map_or(false, chars::is_name_char) {
            self.advance();
        }
        if self.current == Some('(') {
            self.advance();
            return TokenKind::Function;
        }
        TokenKind::Identifier
    }

    /// An escape sequence after a backslash: up to six hex digits with one
    /// optional trailing whitespace, or a single printable character.
    fn escape(&mut self) -> CssResult<()> {
        if self.current.map_or(false, chars::is_hex_digit) {
            for _ in 0..6 {
                self.advance();
                if !self.current.map_or(false, chars::is_hex_digit) {
                    if self.current.map_or(false, chars::is_css_space) {
                        self.advance();
                    }
                    return Ok(());
                }
            }
        }
        match self.current {
            Some(c) if (' '..='~').contains(&c) || c as u32 >= 128 => {
                self.advance();
                Ok(())
            }
            _ => Err(CssError::BadEscape { location: self.location() }),
        }
    }

    /// A quoted string; the opening quote is current on entry. The span
    /// starts after the opening quote, the closing quote is trimmed by the
    /// end gap.
    fn string(&mut self, quote: char) -> CssResult<TokenKind> {
        self.advance();
        self.start = self.position.saturating_sub(1);
        loop {
            self.advance();
            match self.current {
                None => {
                    return Err(CssError::UnterminatedString { location: self.location() });
                }
                Some(c) if c == quote => break,
                Some('"' | '\'') => {}
                Some('\\') => {
                    self.advance();
                    match self.current {
                        // Escaped line break: line continuation
                        Some('\n' | '\x0c') => {}
                        _ => self.escape()?,
                    }
                }
                Some(c) => {
                    if !chars::is_string_char(c) {
                        return Err(CssError::MalformedString {
                            character: c,
                            location: self.location(),
                        });
                    }
                }
            }
        }
        self.advance();
        Ok(TokenKind::String)
    }

    /// A comment; current is the `*` of the opening fence on entry
    fn comment(&mut self) -> CssResult<TokenKind> {
        self.advance();
        self.start = self.position.saturating_sub(1);
        loop {
            while self.current.map_or(false, |c| c != '*') {
                self.advance();
            }
            loop {
                self.advance();
                if self.current != Some('*') {
                    break;
                }
            }
            if self.current.is_none() || self.current == Some('/') {
                break;
            }
        }
        if self.current.is_none() {
            return Err(CssError::UnterminatedComment { location: self.location() });
        }
        self.advance();
        Ok(TokenKind::Comment)
    }

    fn at_keyword(&mut self) -> CssResult<TokenKind> {
        self.advance();
        self.start = self.position.saturating_sub(1);
        let matched = match self.current {
            Some('c' | 'C') => self.keyword("harset", TokenKind::CharsetSymbol),
            Some('f' | 'F') => self.keyword("ont-face", TokenKind::FontFaceSymbol),
            Some('i' | 'I') => self.keyword("mport", TokenKind::ImportSymbol),
            Some('m' | 'M') => self.keyword("edia", TokenKind::MediaSymbol),
            Some('p' | 'P') => self.keyword("age", TokenKind::PageSymbol),
            _ => {
                if !self.current.map_or(false, chars::is_identifier_start) {
                    return Err(CssError::parse_error(
                        "expected identifier after '@'",
                        self.location(),
                    ));
                }
                None
            }
        };
        if let Some(kind) = matched {
            return Ok(kind);
        }
        self.name_tail()?;
        Ok(TokenKind::AtKeyword)
    }

    fn number(&mut self) -> CssResult<TokenKind> {
        loop {
            self.advance();
            match self.current {
                Some('.') => {
                    self.advance();
                    if self.current.map_or(false, |c| c.is_ascii_digit()) {
                        return Ok(self.dot_number());
                    }
                    return Err(CssError::MalformedNumber { location: self.location() });
                }
                Some(c) if c.is_ascii_digit() => {}
                _ => break,
            }
        }
        Ok(self.number_unit(true))
    }

    /// Fraction digits after the decimal point
    fn dot_number(&mut self) -> TokenKind {
        loop {
            self.advance();
            if !self.current.map_or(false, |c| c.is_ascii_digit()) {
                break;
            }
        }
        self.number_unit(false)
    }

    /// Longest-match unit suffix after the digits. A recognized unit
    /// followed by further name characters degrades to `DIMENSION`.
    fn number_unit(&mut self, integer: bool) -> TokenKind {
        match self.current {
            Some('%') => {
                self.advance();
                TokenKind::Percentage
            }
            Some('c' | 'C') => match self.advance() {
                Some('m' | 'M') => self.finish_unit(TokenKind::Cm),
                _ => self.dimension_tail(),
            },
            Some('d' | 'D') => match self.advance() {
                Some('e' | 'E') => match self.advance() {
                    Some('g' | 'G') => self.finish_unit(TokenKind::Deg),
                    _ => self.dimension_tail(),
                },
                _ => self.dimension_tail(),
            },
            Some('e' | 'E') => match self.advance() {
                Some('m' | 'M') => self.finish_unit(TokenKind::Em),
                Some('x' | 'X') => self.finish_unit(TokenKind::Ex),
                _ => self.dimension_tail(),
            },
            Some('g' | 'G') => match self.advance() {
                Some('r' | 'R') => match self.advance() {
                    Some('a' | 'A') => match self.advance() {
                        Some('d' | 'D') => self.finish_unit(TokenKind::Grad),
                        _ => self.dimension_tail(),
                    },
                    _ => self.dimension_tail(),
                },
                _ => self.dimension_tail(),
            },
            Some('h' | 'H') => match self.advance() {
                Some('z' | 'Z') => self.finish_unit(TokenKind::Hz),
                _ => self.dimension_tail(),
            },
            Some('i' | 'I') => match self.advance() {
                Some('n' | 'N') => self.finish_unit(TokenKind::In),
                _ => self.dimension_tail(),
            },
            Some('k' | 'K') => match self.advance() {
                Some('h' | 'H') => match self.advance() {
                    Some('z' | 'Z') => self.finish_unit(TokenKind::Khz),
                    _ => self.dimension_tail(),
                },
                _ => self.dimension_tail(),
            },
            Some('m' | 'M') => match self.advance() {
                Some('m' | 'M') => self.finish_unit(TokenKind::Mm),
                Some('s' | 'S') => self.finish_unit(TokenKind::Ms),
                _ => self.dimension_tail(),
            },
            Some('p' | 'P') => match self.advance() {
                Some('c' | 'C') => self.finish_unit(TokenKind::Pc),
                Some('t' | 'T') => self.finish_unit(TokenKind::Pt),
                Some('x' | 'X') => self.finish_unit(TokenKind::Px),
                _ => self.dimension_tail(),
            },
            Some('r' | 'R') => match self.advance() {
                Some('a' | 'A') => match self.advance() {
                    Some('d' | 'D') => self.finish_unit(TokenKind::Rad),
                    _ => self.dimension_tail(),
                },
                _ => self.dimension_tail(),
            },
            Some('s' | 'S') => {
                self.advance();
                TokenKind::S
            }
            _ => {
                if self.current.map_or(false, chars::is_identifier_start) {
                    self.advance();
                    self.dimension_tail()
                } else if integer {
                    TokenKind::Integer
                } else {
                    TokenKind::Real
                }
            }
        }
    }

    /// The character after a fully matched unit keyword decides between
    /// the unit kind and a generic dimension
    fn finish_unit(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        if self.current.map_or(false, chars::is_name_char) {
            return self.dimension_tail();
        }
        kind
    }

    fn dimension_tail(&mut self) -> TokenKind {
        while self.current.map_or(false, chars::is_name_char) {
            self.advance();
        }
        TokenKind::Dimension
    }

    /// A `u+` unicode range; current is the `+` on entry. One to six hex
    /// digits or `?` wildcards, then an optional `-` and a second hex run
    /// when no wildcard appeared.
    fn unicode_range(&mut self) -> CssResult<TokenKind> {
        let mut wildcard = false;
        let mut count = 0;
        loop {
            self.advance();
            match self.current {
                Some('?') => wildcard = true,
                Some(c) if chars::is_hex_digit(c) => {}
                _ => break,
            }
            count += 1;
            if count == 6 {
                self.advance();
                break;
            }
        }
        if count == 0 {
            return Err(CssError::MalformedUnicodeRange { location: self.location() });
        }
        if wildcard || self.current != Some('-') {
            return Ok(TokenKind::UnicodeRange);
        }
        self.advance();
        if !self.current.map_or(false, chars::is_hex_digit) {
            return Err(CssError::MalformedUnicodeRange { location: self.location() });
        }
        for _ in 0..5 {
            self.advance();
            if !self.current.map_or(false, chars::is_hex_digit) {
                return Ok(TokenKind::UnicodeRange);
            }
        }
        self.advance();
        Ok(TokenKind::UnicodeRange)
    }

    /// Body of `url(...)`; current is the `(` on entry
    fn url_body(&mut self) -> CssResult<TokenKind> {
        loop {
            self.advance();
            if !self.current.map_or(false, chars::is_css_space) {
                break;
            }
        }
        match self.current {
            Some(q @ ('\'' | '"')) => {
                self.string(q)?;
                // Closing quote and closing parenthesis
                self.blank_characters += 2;
                self.url_close()
            }
            Some(')') => Err(CssError::parse_error("empty url", self.location())),
            Some(c) if chars::is_uri_char(c) => {
                self.start = self.position.saturating_sub(1);
                self.advance();
                while self.current.map_or(false, chars::is_uri_char) {
                    self.advance();
                }
                // Closing parenthesis
                self.blank_characters += 1;
                self.url_close()
            }
            Some(_) => Err(CssError::parse_error("invalid character in url", self.location())),
            None => Err(CssError::UnterminatedUrl { location: self.location() }),
        }
    }

    /// Trailing whitespace and the `)` after a url body
    fn url_close(&mut self) -> CssResult<TokenKind> {
        while self.current.map_or(false, chars::is_css_space) {
            self.blank_characters += 1;
            self.advance();
        }
        match self.current {
            Some(')') => {
                self.advance();
                Ok(TokenKind::Uri)
            }
            Some(_) => Err(CssError::parse_error("expected ')' in url", self.location())),
            None => Err(CssError::UnterminatedUrl { location: self.location() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(input: &str) -> Vec<(TokenKind, String)> {
        let mut scanner = Scanner::new(input);
        let mut out = Vec::new();
        loop {
            let token = scanner.next_token().unwrap();
            if token.kind == TokenKind::Eof {
                return out;
            }
            out.push((token.kind, scanner.slice(&token)));
        }
    }

    #[test]
    fn test_integer_with_unit() {
        let tokens = scan_all("10px");
        assert_eq!(tokens, vec![(TokenKind::Px, "10px".to_string())]);
    }

    #[test]
    fn test_real_starting_with_dot() {
        let tokens = scan_all(".5em");
        assert_eq!(tokens, vec![(TokenKind::Em, ".5em".to_string())]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(scan_all("10"), vec![(TokenKind::Integer, "10".into())]);
        assert_eq!(scan_all("1.5"), vec![(TokenKind::Real, "1.5".into())]);
        assert_eq!(scan_all("50%"), vec![(TokenKind::Percentage, "50%".into())]);
        assert_eq!(scan_all("3s"), vec![(TokenKind::S, "3s".into())]);
        assert_eq!(scan_all("90deg"), vec![(TokenKind::Deg, "90deg".into())]);
        assert_eq!(scan_all("100grad"), vec![(TokenKind::Grad, "100grad".into())]);
        assert_eq!(scan_all("44khz"), vec![(TokenKind::Khz, "44khz".into())]);
    }

    #[test]
    fn test_unknown_unit_is_dimension() {
        assert_eq!(scan_all("10foo"), vec![(TokenKind::Dimension, "10foo".into())]);
        // A known unit followed by more name characters degrades too
        assert_eq!(scan_all("10pxx"), vec![(TokenKind::Dimension, "10pxx".into())]);
    }

    #[test]
    fn test_simple_rule_round_trip() {
        let input = "a { color: #fff; }";
        let tokens = scan_all(input);
        let kinds: Vec<TokenKind> = tokens.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Space,
                TokenKind::LeftCurlyBrace,
                TokenKind::Space,
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::Space,
                TokenKind::Hash,
                TokenKind::SemiColon,
                TokenKind::Space,
                TokenKind::RightCurlyBrace,
            ]
        );
        assert_eq!(tokens[4].1, "color");
        // The '#' is not part of the hash span
        assert_eq!(tokens[7].1, "fff");
    }

    #[test]
    fn test_string_span_excludes_quotes() {
        assert_eq!(scan_all("'hello'"), vec![(TokenKind::String, "hello".into())]);
        assert_eq!(scan_all("\"a'b\""), vec![(TokenKind::String, "a'b".into())]);
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(scan_all("'a\\41 b'"), vec![(TokenKind::String, "a\\41 b".into())]);
        assert_eq!(scan_all("'a\\\nb'"), vec![(TokenKind::String, "a\\\nb".into())]);
    }

    #[test]
    fn test_unterminated_string_location() {
        let mut scanner = Scanner::new("'unterminated");
        let err = scanner.next_token().unwrap_err();
        assert!(matches!(err, CssError::UnterminatedString { .. }));
        assert_eq!(err.location(), Location::new(0, 12));
    }

    #[test]
    fn test_newline_in_string_is_error() {
        let mut scanner = Scanner::new("'a\nb'");
        assert!(matches!(
            scanner.next_token(),
            Err(CssError::MalformedString { character: '\n', .. })
        ));
    }

    #[test]
    fn test_line_tracking() {
        let mut scanner = Scanner::new("x\n'y");
        scanner.next_token().unwrap();
        scanner.next_token().unwrap();
        let err = scanner.next_token().unwrap_err();
        assert_eq!(err.location(), Location::new(1, 1));
    }

    #[test]
    fn test_comment_span() {
        assert_eq!(scan_all("/* note */"), vec![(TokenKind::Comment, " note ".into())]);
        assert_eq!(scan_all("/*a**b*/"), vec![(TokenKind::Comment, "a**b".into())]);
    }

    #[test]
    fn test_unterminated_comment() {
        let mut scanner = Scanner::new("/* open");
        assert!(matches!(
            scanner.next_token(),
            Err(CssError::UnterminatedComment { .. })
        ));
    }

    #[test]
    fn test_cdo_cdc() {
        assert_eq!(scan_all("<!--"), vec![(TokenKind::Cdo, "<!--".into())]);
        assert_eq!(scan_all("-->"), vec![(TokenKind::Cdc, "-->".into())]);
        assert!(Scanner::new("<!-x").next_token().is_err());
    }

    #[test]
    fn test_match_operators() {
        assert_eq!(scan_all("|="), vec![(TokenKind::DashMatch, "|=".into())]);
        assert_eq!(scan_all("~="), vec![(TokenKind::Includes, "~=".into())]);
        assert!(Scanner::new("|x").next_token().is_err());
        assert!(Scanner::new("~x").next_token().is_err());
    }

    #[test]
    fn test_at_keywords() {
        assert_eq!(scan_all("@media"), vec![(TokenKind::MediaSymbol, "media".into())]);
        assert_eq!(scan_all("@IMPORT"), vec![(TokenKind::ImportSymbol, "IMPORT".into())]);
        assert_eq!(scan_all("@font-face"), vec![(TokenKind::FontFaceSymbol, "font-face".into())]);
        assert_eq!(scan_all("@charset"), vec![(TokenKind::CharsetSymbol, "charset".into())]);
        assert_eq!(scan_all("@page"), vec![(TokenKind::PageSymbol, "page".into())]);
        assert_eq!(
            scan_all("@keyframes"),
            vec![(TokenKind::AtKeyword, "keyframes".into())]
        );
    }

    #[test]
    fn test_important_with_whitespace() {
        assert_eq!(
            scan_all("!important"),
            vec![(TokenKind::ImportantSymbol, "!important".into())]
        );
        assert_eq!(
            scan_all("! important"),
            vec![(TokenKind::ImportantSymbol, "! important".into())]
        );
        assert!(Scanner::new("!improper").next_token().is_err());
    }

    #[test]
    fn test_identifier_and_function() {
        assert_eq!(scan_all("red"), vec![(TokenKind::Identifier, "red".into())]);
        let tokens = scan_all("rgb(0,0,0)");
        assert_eq!(tokens[0], (TokenKind::Function, "rgb".to_string()));
        // url-like identifiers that are not urls stay identifiers
        assert_eq!(scan_all("urls"), vec![(TokenKind::Identifier, "urls".into())]);
    }

    #[test]
    fn test_url_forms() {
        assert_eq!(scan_all("url(a.png)"), vec![(TokenKind::Uri, "a.png".into())]);
        assert_eq!(scan_all("url('a.png')"), vec![(TokenKind::Uri, "a.png".into())]);
        assert_eq!(scan_all("url(\"a.png\")"), vec![(TokenKind::Uri, "a.png".into())]);
        assert_eq!(scan_all("url( a.png )"), vec![(TokenKind::Uri, "a.png".into())]);
        assert!(Scanner::new("url(a.png").next_token().is_err());
    }

    #[test]
    fn test_unicode_range() {
        assert_eq!(
            scan_all("u+4E00-9FFF"),
            vec![(TokenKind::UnicodeRange, "u+4E00-9FFF".into())]
        );
        assert_eq!(scan_all("u+4?"), vec![(TokenKind::UnicodeRange, "u+4?".into())]);
        assert!(Scanner::new("u+").next_token().is_err());
    }

    #[test]
    fn test_punctuation() {
        let kinds: Vec<TokenKind> = scan_all("{}=+,;>[]*():").into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LeftCurlyBrace,
                TokenKind::RightCurlyBrace,
                TokenKind::Equal,
                TokenKind::Plus,
                TokenKind::Comma,
                TokenKind::SemiColon,
                TokenKind::Precede,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Any,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Colon,
            ]
        );
    }

    #[test]
    fn test_minus_and_divide() {
        assert_eq!(
            scan_all("-5"),
            vec![(TokenKind::Minus, "-".into()), (TokenKind::Integer, "5".into())]
        );
        assert_eq!(scan_all("/"), vec![(TokenKind::Divide, "/".into())]);
        assert_eq!(scan_all("."), vec![(TokenKind::Dot, ".".into())]);
    }

    #[test]
    fn test_spans_and_gaps_reconstruct_input() {
        let input = "a{content:\"x\";background:url(p.png) /*c*/;width:f(7)}#h";
        let chars: Vec<char> = input.chars().collect();
        let mut scanner = Scanner::new(input);
        let mut tokens = Vec::new();
        loop {
            let token = scanner.next_token().unwrap();
            if token.kind == TokenKind::Eof {
                break;
            }
            tokens.push(token);
        }

        // Each token's consumed extent is its span plus the delimiter
        // characters trimmed on either side; stitching the extents back
        // together recovers the stylesheet exactly.
        let mut rebuilt = String::new();
        let mut consumed = 0;
        for token in &tokens {
            assert!(consumed <= token.start, "spans overlap at {}", token.start);
            rebuilt.extend(&chars[consumed..token.start]);
            rebuilt.push_str(&scanner.slice(token));
            consumed = token.end;
        }
        rebuilt.extend(&chars[consumed..]);
        assert_eq!(rebuilt, input);

        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::LeftCurlyBrace,
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::String,
                TokenKind::SemiColon,
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::Uri,
                TokenKind::Space,
                TokenKind::Comment,
                TokenKind::SemiColon,
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::Function,
                TokenKind::Integer,
                TokenKind::RightBrace,
                TokenKind::RightCurlyBrace,
                TokenKind::Hash,
            ]
        );
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut scanner = Scanner::new("");
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Eof);
    }
}
