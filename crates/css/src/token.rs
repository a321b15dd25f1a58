//! CSS token kinds and spans

/// Lexical unit kinds produced by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// End of input
    Eof,
    /// `{`
    LeftCurlyBrace,
    /// `}`
    RightCurlyBrace,
    /// `=`
    Equal,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `;`
    SemiColon,
    /// `>`
    Precede,
    /// `/`
    Divide,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `*`
    Any,
    /// `(`
    LeftBrace,
    /// `)`
    RightBrace,
    /// `:`
    Colon,
    /// Whitespace run
    Space,
    /// `/* ... */`
    Comment,
    /// Quoted string
    String,
    /// Identifier
    Identifier,
    /// `<!--`
    Cdo,
    /// `-->`
    Cdc,
    /// `!important`
    ImportantSymbol,
    /// Integer number
    Integer,
    /// `|=`
    DashMatch,
    /// `~=`
    Includes,
    /// `#name`
    Hash,
    /// `@import`
    ImportSymbol,
    /// `@ident` fallback
    AtKeyword,
    /// `@charset`
    CharsetSymbol,
    /// `@font-face`
    FontFaceSymbol,
    /// `@media`
    MediaSymbol,
    /// `@page`
    PageSymbol,
    /// Number with an unrecognized unit
    Dimension,
    Ex,
    Em,
    Cm,
    Mm,
    In,
    Ms,
    Hz,
    /// Number with `%`
    Percentage,
    /// Number with `s`
    S,
    Pc,
    Pt,
    Px,
    Deg,
    Rad,
    Grad,
    Khz,
    /// `url(...)`
    Uri,
    /// `ident(`
    Function,
    /// `u+` unicode range
    UnicodeRange,
    /// Real number
    Real,
}

impl TokenKind {
    /// Wire name of the kind, as handed to token callbacks.
    pub fn name(self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::LeftCurlyBrace => "LEFT_CURLY_BRACE",
            Self::RightCurlyBrace => "RIGHT_CURLY_BRACE",
            Self::Equal => "EQUAL",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Comma => "COMMA",
            Self::Dot => "DOT",
            Self::SemiColon => "SEMI_COLON",
            Self::Precede => "PRECEDE",
            Self::Divide => "DIVIDE",
            Self::LeftBracket => "LEFT_BRACKET",
            Self::RightBracket => "RIGHT_BRACKET",
            Self::Any => "ANY",
            Self::LeftBrace => "LEFT_BRACE",
            Self::RightBrace => "RIGHT_BRACE",
            Self::Colon => "COLON",
            Self::Space => "SPACE",
            Self::Comment => "COMMENT",
            Self::String => "STRING",
            Self::Identifier => "IDENTIFIER",
            Self::Cdo => "CDO",
            Self::Cdc => "CDC",
            Self::ImportantSymbol => "IMPORTANT_SYMBOL",
            Self::Integer => "INTEGER",
            Self::DashMatch => "DASHMATCH",
            Self::Includes => "INCLUDES",
            Self::Hash => "HASH",
            Self::ImportSymbol => "IMPORT_SYMBOL",
            Self::AtKeyword => "AT_KEYWORD",
            Self::CharsetSymbol => "CHARSET_SYMBOL",
            Self::FontFaceSymbol => "FONT_FACE_SYMBOL",
            Self::MediaSymbol => "MEDIA_SYMBOL",
            Self::PageSymbol => "PAGE_SYMBOL",
            Self::Dimension => "DIMENSION",
            Self::Ex => "EX",
            Self::Em => "EM",
            Self::Cm => "CM",
            Self::Mm => "MM",
            Self::In => "IN",
            Self::Ms => "MS",
            Self::Hz => "HZ",
            Self::Percentage => "PERCENTAGE",
            Self::S => "S",
            Self::Pc => "PC",
            Self::Pt => "PT",
            Self::Px => "PX",
            Self::Deg => "DEG",
            Self::Rad => "RAD",
            Self::Grad => "GRAD",
            Self::Khz => "KHZ",
            Self::Uri => "URI",
            Self::Function => "FUNCTION",
            Self::UnicodeRange => "UNICODE_RANGE",
            Self::Real => "REAL",
        }
    }
}

/// A scanned token. `start`/`end` are code point offsets into the input,
/// already trimmed of delimiters that are not part of the token text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(TokenKind::LeftCurlyBrace.name(), "LEFT_CURLY_BRACE");
        assert_eq!(TokenKind::ImportantSymbol.name(), "IMPORTANT_SYMBOL");
        assert_eq!(TokenKind::Px.name(), "PX");
        assert_eq!(TokenKind::UnicodeRange.name(), "UNICODE_RANGE");
        assert_eq!(TokenKind::Real.name(), "REAL");
    }
}
