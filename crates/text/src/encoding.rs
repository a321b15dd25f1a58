//! XML encoding detection from a byte preamble
//!
//! Works by candidate elimination: every encoding that can be recognized
//! from the first bytes (byte-order marks, encoding-specific patterns of
//! `<?xml`, the EBCDIC form of `<?xm`) starts out as a candidate, and each
//! inspected byte removes the candidates it contradicts. When exactly one
//! candidate survives and enough bytes are present, that is the answer; an
//! ASCII-compatible `<?xml ` preamble is further resolved by reading the
//! `encoding` pseudo-attribute from the declaration.

use std::ops::Range;

use log::trace;

use crate::error::{TextError, TextResult};

const UTF_8_SIG: u16 = 1 << 0;
const UTF_16_AS_LE: u16 = 1 << 1;
const UTF_16_AS_BE: u16 = 1 << 2;
const UTF_16_LE: u16 = 1 << 3;
const UTF_16_BE: u16 = 1 << 4;
const UTF_32_AS_LE: u16 = 1 << 5;
const UTF_32_AS_BE: u16 = 1 << 6;
const UTF_32_LE: u16 = 1 << 7;
const UTF_32_BE: u16 = 1 << 8;
const EBCDIC: u16 = 1 << 9;
const DECL: u16 = 1 << 10;
const ALL: u16 = (DECL << 1) - 1;

/// Outcome of scanning one pseudo-attribute
enum Pseudo {
    /// The attribute may continue past the available bytes
    NeedMore,
    /// `?>` reached without a further attribute
    AtEnd,
    Found { name: Range<usize>, value: Range<usize> },
}

fn is_decl_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// One `name="value"` pair inside the XML declaration, starting at `p`
fn parse_pseudo_attr(s: &[u8], mut p: usize) -> TextResult<Pseudo> {
    let end = s.len();
    while p < end && is_decl_space(s[p]) {
        p += 1;
    }
    if p == end {
        return Ok(Pseudo::NeedMore);
    }
    if p + 1 < end && s[p] == b'?' && s[p + 1] == b'>' {
        return Ok(Pseudo::AtEnd);
    }

    let name_start = p;
    while p < end && s[p].is_ascii_alphabetic() {
        p += 1;
    }
    if p == end {
        return Ok(Pseudo::NeedMore);
    }
    let name_end = p;
    if name_start == name_end {
        return Err(TextError::MalformedDeclaration(
            "empty or malformed pseudo-attribute name",
        ));
    }

    while p < end && is_decl_space(s[p]) {
        p += 1;
    }
    if p == end {
        return Ok(Pseudo::NeedMore);
    }
    if s[p] != b'=' {
        return Err(TextError::MalformedDeclaration("expected '='"));
    }
    p += 1;

    while p < end && is_decl_space(s[p]) {
        p += 1;
    }
    if p == end {
        return Ok(Pseudo::NeedMore);
    }
    let quote = s[p];
    if quote != b'"' && quote != b'\'' {
        return Err(TextError::MalformedDeclaration("expected quote"));
    }
    p += 1;

    let value_start = p;
    while p < end && s[p] != quote {
        p += 1;
    }
    if p == end {
        return Ok(Pseudo::NeedMore);
    }
    let value_end = p;
    if value_start == value_end {
        return Err(TextError::MalformedDeclaration(
            "empty pseudo-attribute value",
        ));
    }

    Ok(Pseudo::Found { name: name_start..name_end, value: value_start..value_end })
}

/// Walk the declaration's pseudo-attributes looking for `encoding`
fn parse_encoding(s: &[u8]) -> TextResult<Pseudo> {
    let mut p = 0;
    loop {
        match parse_pseudo_attr(s, p)? {
            Pseudo::Found { name, value } => {
                if &s[name] == b"encoding" {
                    return Ok(Pseudo::Found { name: 0..0, value });
                }
                // skip past the closing quote
                p = value.end + 1;
            }
            other => return Ok(other),
        }
    }
}

/// Detect the encoding of an XML document from its first bytes.
///
/// `Ok(None)` means the input is still ambiguous and more bytes are
/// needed; with `last` set the fallback is `utf-8`. Inputs whose preamble
/// rules out every recognizable pattern are `utf-8` immediately.
pub fn detect_encoding(input: &[u8], last: bool) -> TextResult<Option<String>> {
    let mut candidates = ALL;
    let len = input.len();

    if len > 0 {
        let b = input[0];
        if b != 0xEF {
            candidates &= !UTF_8_SIG;
        }
        if b != 0xFF {
            candidates &= !(UTF_32_AS_LE | UTF_16_AS_LE);
        }
        if b != 0xFE {
            candidates &= !UTF_16_AS_BE;
        }
        if b != b'<' {
            candidates &= !(UTF_32_LE | UTF_16_LE | DECL);
        }
        if b != 0x00 {
            candidates &= !(UTF_32_AS_BE | UTF_32_BE | UTF_16_BE);
        }
        if b != 0x4C {
            candidates &= !EBCDIC;
        }
    }
    if len > 1 {
        let b = input[1];
        if b != 0xBB {
            candidates &= !UTF_8_SIG;
        }
        if b != 0xFE {
            candidates &= !(UTF_16_AS_LE | UTF_32_AS_LE);
        }
        if b != 0xFF {
            candidates &= !UTF_16_AS_BE;
        }
        if b != 0x00 {
            candidates &= !(UTF_16_LE | UTF_32_AS_BE | UTF_32_LE | UTF_32_BE);
        }
        if b != b'<' {
            candidates &= !UTF_16_BE;
        }
        if b != 0x6F {
            candidates &= !EBCDIC;
        }
        if b != b'?' {
            candidates &= !DECL;
        }
    }
    if len > 2 {
        let b = input[2];
        if b != 0xBF {
            candidates &= !UTF_8_SIG;
        }
        if b != b'?' {
            candidates &= !UTF_16_LE;
        }
        if b != 0x00 {
            candidates &= !(UTF_32_AS_LE | UTF_32_LE | UTF_32_BE);
        }
        if b != 0xFE {
            candidates &= !UTF_32_AS_BE;
        }
        if b != 0xA7 {
            candidates &= !EBCDIC;
        }
        if b != b'x' {
            candidates &= !DECL;
        }
    }
    if len > 3 {
        let b = input[3];
        // FF FE 00 00 is the UTF-32 mark, not UTF-16 plus a NUL
        if b == 0x00 && input[2] == 0x00 {
            candidates &= !UTF_16_AS_LE;
        }
        if b != 0x00 {
            candidates &= !(UTF_16_LE | UTF_32_AS_LE | UTF_32_LE);
        }
        if b != 0xFF {
            candidates &= !UTF_32_AS_BE;
        }
        if b != b'<' {
            candidates &= !UTF_32_BE;
        }
        if b != 0x94 {
            candidates &= !EBCDIC;
        }
        if b != b'm' {
            candidates &= !DECL;
        }
    }
    if len > 4 && input[4] != b'l' {
        candidates &= !DECL;
    }
    if len > 5 && !is_decl_space(input[5]) {
        candidates &= !DECL;
    }

    trace!("encoding candidates after {} bytes: {:#013b}", len.min(6), candidates);

    if candidates == 0 {
        return Ok(Some("utf-8".to_string()));
    }
    if candidates.count_ones() == 1 {
        let name = match candidates {
            UTF_8_SIG if len >= 3 => Some("utf-8-sig"),
            UTF_16_AS_LE | UTF_16_AS_BE if len >= 2 => Some("utf-16"),
            UTF_16_LE if len >= 4 => Some("utf-16-le"),
            UTF_16_BE if len >= 2 => Some("utf-16-be"),
            UTF_32_AS_LE | UTF_32_AS_BE if len >= 4 => Some("utf-32"),
            UTF_32_LE if len >= 4 => Some("utf-32-le"),
            UTF_32_BE if len >= 4 => Some("utf-32-be"),
            EBCDIC if len >= 4 => Some("cp037"),
            _ => None,
        };
        if let Some(name) = name {
            return Ok(Some(name.to_string()));
        }
        if candidates == DECL && len >= 6 {
            let declaration = &input[5..];
            return match parse_encoding(declaration)? {
                Pseudo::NeedMore => Ok(None),
                Pseudo::AtEnd => Ok(Some("utf-8".to_string())),
                Pseudo::Found { value, .. } => {
                    Ok(Some(String::from_utf8_lossy(&declaration[value]).into_owned()))
                }
            };
        }
    }
    if last {
        return Ok(Some("utf-8".to_string()));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(input: &[u8]) -> Option<String> {
        detect_encoding(input, false).unwrap()
    }

    #[test]
    fn test_byte_order_marks() {
        assert_eq!(detect(b"\xEF\xBB\xBF<r/>").as_deref(), Some("utf-8-sig"));
        assert_eq!(detect(b"\xFF\xFE<\x00").as_deref(), Some("utf-16"));
        assert_eq!(detect(b"\xFE\xFF\x00<").as_deref(), Some("utf-16"));
        assert_eq!(detect(b"\x00\x00\xFE\xFF").as_deref(), Some("utf-32"));
        assert_eq!(detect(b"\xFF\xFE\x00\x00").as_deref(), Some("utf-32"));
    }

    #[test]
    fn test_bare_patterns() {
        assert_eq!(detect(b"<\x00?\x00").as_deref(), Some("utf-16-le"));
        assert_eq!(detect(b"\x00<\x00?").as_deref(), Some("utf-16-be"));
        assert_eq!(detect(b"<\x00\x00\x00").as_deref(), Some("utf-32-le"));
        assert_eq!(detect(b"\x00\x00\x00<").as_deref(), Some("utf-32-be"));
        assert_eq!(detect(b"\x4C\x6F\xA7\x94").as_deref(), Some("cp037"));
    }

    #[test]
    fn test_declaration_with_encoding() {
        let input = b"<?xml version='1.0' encoding='iso-8859-1'?><x/>";
        assert_eq!(detect(input).as_deref(), Some("iso-8859-1"));
    }

    #[test]
    fn test_declaration_without_encoding() {
        assert_eq!(detect(b"<?xml version=\"1.0\"?>").as_deref(), Some("utf-8"));
    }

    #[test]
    fn test_no_recognizable_preamble_is_utf8() {
        assert_eq!(detect(b"hello").as_deref(), Some("utf-8"));
        assert_eq!(detect(b"<root/>").as_deref(), Some("utf-8"));
    }

    #[test]
    fn test_ambiguous_prefix_waits() {
        assert_eq!(detect(b""), None);
        assert_eq!(detect(b"<?xml"), None);
        assert_eq!(detect(b"<?xml version='1.0' encoding='utf"), None);
        assert_eq!(detect(b"\xFF\xFE"), None);
    }

    #[test]
    fn test_final_chunk_falls_back_to_utf8() {
        assert_eq!(
            detect_encoding(b"", true).unwrap().as_deref(),
            Some("utf-8")
        );
        assert_eq!(
            detect_encoding(b"<?xml", true).unwrap().as_deref(),
            Some("utf-8")
        );
    }

    #[test]
    fn test_malformed_declaration() {
        assert!(matches!(
            detect_encoding(b"<?xml foo bar?>", false),
            Err(TextError::MalformedDeclaration(_))
        ));
        assert!(matches!(
            detect_encoding(b"<?xml version=1.0?>", false),
            Err(TextError::MalformedDeclaration(_))
        ));
    }
}
