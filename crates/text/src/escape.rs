//! Character-reference escaping for text and attribute content
//!
//! The restricted set covers the C0 and C1 control characters that XML 1.0
//! forbids or discourages: everything at or below `0x08`, `0x0B` to `0x1F`
//! except carriage return, and `0x7F` to `0x9F` except `U+0085`.

use std::borrow::Cow;

fn is_restricted(c: char) -> bool {
    match c {
        '\u{00}'..='\u{08}' => true,
        '\u{0B}'..='\u{1F}' => c != '\r',
        '\u{7F}'..='\u{9F}' => c != '\u{85}',
        _ => false,
    }
}

fn escape(input: &str, quotes: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| {
        matches!(c, '<' | '>' | '&') || (quotes && matches!(c, '"' | '\'')) || is_restricted(c)
    };
    let first = match input.find(needs_escape) {
        Some(index) => index,
        None => return Cow::Borrowed(input),
    };

    let mut out = String::with_capacity(input.len() + 8);
    out.push_str(&input[..first]);
    for c in input[first..].chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' if quotes => out.push_str("&quot;"),
            '\'' if quotes => out.push_str("&#39;"),
            c if is_restricted(c) => out.push_str(&format!("&#{};", c as u32)),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Escape element content. Replaces `<`, `>`, `&` and restricted control
/// characters with character references.
pub fn escape_text(input: &str) -> Cow<'_, str> {
    escape(input, false)
}

/// Escape attribute values. Like [`escape_text`], plus both quote
/// characters.
pub fn escape_attr(input: &str) -> Cow<'_, str> {
    escape(input, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_is_borrowed() {
        assert!(matches!(escape_text("plain text"), Cow::Borrowed(_)));
        assert!(matches!(escape_attr("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_markup_characters() {
        assert_eq!(escape_text("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn test_text_leaves_quotes_alone() {
        assert_eq!(escape_text(r#"say "hi""#), r#"say "hi""#);
    }

    #[test]
    fn test_attr_escapes_quotes() {
        assert_eq!(escape_attr(r#"a "b" 'c'"#), "a &quot;b&quot; &#39;c&#39;");
    }

    #[test]
    fn test_restricted_characters() {
        assert_eq!(escape_text("a\u{01}b"), "a&#1;b");
        assert_eq!(escape_text("\u{0B}\u{7F}\u{9F}"), "&#11;&#127;&#159;");
    }

    #[test]
    fn test_whitespace_and_exceptions_pass_through() {
        assert_eq!(escape_text("a\tb\nc\rd"), "a\tb\nc\rd");
        assert_eq!(escape_text("x\u{85}y"), "x\u{85}y");
    }
}
