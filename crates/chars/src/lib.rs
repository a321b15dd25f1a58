//! Character classification tables
//!
//! Bitmask membership tables for the CSS scanner plus Unicode-aware name
//! predicates for the markup engine.

/// ASCII letters. First character of a CSS identifier.
static IDENTIFIER_START: [u32; 4] = [0x0000_0000, 0x0000_0000, 0x07ff_fffe, 0x07ff_fffe];

/// Letters, digits and `-`. Continuation characters of CSS names.
static NAME: [u32; 4] = [0x0000_0000, 0x03ff_2000, 0x07ff_fffe, 0x07ff_fffe];

/// Characters allowed inside a CSS string literal without escaping:
/// tab and all printable ASCII except the quote characters.
static STRING: [u32; 4] = [0x0000_0200, 0xffff_ff7b, 0xffff_ffff, 0x7fff_ffff];

/// Characters allowed in an unquoted `url(...)` body: printable ASCII
/// except space, quotes, parentheses and curly braces.
static URI: [u32; 4] = [0x0000_0000, 0xffff_fc7a, 0xffff_ffff, 0x47ff_ffff];

/// Every code point outside ASCII is a member of all four classes.
fn in_table(table: &[u32; 4], c: char) -> bool {
    let code = c as u32;
    if code >= 128 {
        return true;
    }
    table[(code / 32) as usize] & (1 << (code % 32)) != 0
}

/// Can `c` start a CSS identifier?
pub fn is_identifier_start(c: char) -> bool {
    in_table(&IDENTIFIER_START, c)
}

/// Can `c` continue a CSS name (identifier, hash, dimension unit)?
pub fn is_name_char(c: char) -> bool {
    in_table(&NAME, c)
}

/// Is `c` allowed unescaped inside a CSS string literal?
pub fn is_string_char(c: char) -> bool {
    in_table(&STRING, c)
}

/// Is `c` allowed inside an unquoted `url(...)` body?
pub fn is_uri_char(c: char) -> bool {
    in_table(&URI, c)
}

/// CSS whitespace: space, tab, CR, LF, FF.
pub fn is_css_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0c')
}

pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// Can `c` start a markup tag or entity name?
pub fn is_markup_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

/// Can `c` continue a markup name?
pub fn is_markup_name(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | ':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_start() {
        assert!(is_identifier_start('a'));
        assert!(is_identifier_start('Z'));
        assert!(!is_identifier_start('1'));
        assert!(!is_identifier_start('-'));
        assert!(!is_identifier_start('_'));
    }

    #[test]
    fn test_name_char() {
        assert!(is_name_char('a'));
        assert!(is_name_char('9'));
        assert!(is_name_char('-'));
        assert!(!is_name_char('.'));
        assert!(!is_name_char(' '));
        assert!(!is_name_char('('));
    }

    #[test]
    fn test_string_char() {
        assert!(is_string_char(' '));
        assert!(is_string_char('\t'));
        assert!(is_string_char('~'));
        assert!(!is_string_char('"'));
        assert!(!is_string_char('\''));
        assert!(!is_string_char('\n'));
        assert!(!is_string_char('\r'));
    }

    #[test]
    fn test_uri_char() {
        assert!(is_uri_char('/'));
        assert!(is_uri_char('.'));
        assert!(!is_uri_char(' '));
        assert!(!is_uri_char('('));
        assert!(!is_uri_char(')'));
        assert!(!is_uri_char('"'));
    }

    #[test]
    fn test_non_ascii_always_member() {
        for c in ['é', '漢', '\u{80}'] {
            assert!(is_identifier_start(c));
            assert!(is_name_char(c));
            assert!(is_string_char(c));
            assert!(is_uri_char(c));
        }
    }

    #[test]
    fn test_markup_names() {
        assert!(is_markup_name_start('a'));
        assert!(is_markup_name_start('_'));
        assert!(is_markup_name_start(':'));
        assert!(!is_markup_name_start('1'));
        assert!(is_markup_name('1'));
        assert!(is_markup_name('.'));
        assert!(is_markup_name('-'));
        assert!(!is_markup_name('/'));
    }
}
