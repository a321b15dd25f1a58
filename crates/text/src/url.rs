//! URL percent-coding and path normalization
//!
//! Percent-coding works on UTF-8 bytes: escaping keeps safe bytes literal
//! and rewrites everything else as `%XX`; unescaping tolerates truncated
//! and malformed escapes by passing them through with a warning, and
//! falls back to Latin-1 when the unescaped bytes are not valid UTF-8.

use log::warn;

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Escape every byte of `input`'s UTF-8 form that is not in `safe` as a
/// `%XX` sequence. Without a safe set, all 7-bit bytes stay literal.
pub fn percent_escape(input: &str, safe: Option<&str>) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        let keep = match safe {
            Some(set) => set.as_bytes().contains(&b),
            None => b < 0x80,
        };
        if keep {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[(b >> 4) as usize] as char);
            out.push(HEX[(b & 0xf) as usize] as char);
        }
    }
    out
}

/// Undo `%XX` escapes, plus the legacy `%uXXXX` form for a single code
/// point. Truncated or malformed escapes are copied through unchanged.
pub fn percent_unescape(input: &str) -> String {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut out: Vec<u8> = Vec::with_capacity(len);
    let mut pos = 0;
    while pos < len {
        if bytes[pos] != b'%' {
            out.push(bytes[pos]);
            pos += 1;
            continue;
        }
        let wide = pos + 1 < len && bytes[pos + 1] == b'u';
        let needed = if wide { 6 } else { 3 };
        if pos + needed > len {
            warn!("truncated escape at position {}", pos);
            out.extend_from_slice(&bytes[pos..]);
            break;
        }
        if wide {
            match hex_value(&bytes[pos + 2..pos + 6]).and_then(char::from_u32) {
                Some(c) => {
                    let mut buf = [0u8; 4];
                    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                }
                None => {
                    warn!("malformed escape at position {}", pos);
                    out.extend_from_slice(&bytes[pos..pos + 6]);
                }
            }
        } else {
            match hex_value(&bytes[pos + 1..pos + 3]) {
                Some(value) => out.push(value as u8),
                None => {
                    warn!("malformed escape at position {}", pos);
                    out.extend_from_slice(&bytes[pos..pos + 3]);
                }
            }
        }
        pos += needed;
    }
    match String::from_utf8(out) {
        Ok(text) => text,
        Err(err) => {
            warn!("unescaped bytes are not valid utf-8, decoding as latin-1");
            err.into_bytes().iter().map(|&b| b as char).collect()
        }
    }
}

fn hex_value(digits: &[u8]) -> Option<u32> {
    let mut value = 0;
    for &d in digits {
        value = value * 16 + (d as char).to_digit(16)?;
    }
    Some(value)
}

/// RFC 2396 section 5.2 dot-segment removal over an already-split path,
/// with empty interior segments dropped. A trailing `.` or `..` leaves an
/// empty segment so the result keeps its directory form.
pub fn normalize_path(segments: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(segments.len());
    let last = segments.len().wrapping_sub(1);
    for (i, &segment) in segments.iter().enumerate() {
        if segment.is_empty() || segment == "." {
            if i == last {
                out.push(String::new());
            }
        } else if segment == ".." && !out.is_empty() && out.last().map(String::as_str) != Some("..")
        {
            out.pop();
            if i == last {
                out.push(String::new());
            }
        } else {
            out.push(segment.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_default_keeps_seven_bit() {
        assert_eq!(percent_escape("a b/c", None), "a b/c");
        assert_eq!(percent_escape("ä", None), "%C3%A4");
    }

    #[test]
    fn test_escape_with_safe_set() {
        assert_eq!(percent_escape("a b/c", Some("abc/")), "a%20b/c");
        assert_eq!(percent_escape("%", Some("")), "%25");
    }

    #[test]
    fn test_unescape() {
        assert_eq!(percent_unescape("a%20b"), "a b");
        assert_eq!(percent_unescape("%C3%A4"), "ä");
        assert_eq!(percent_unescape("%u00E4"), "ä");
    }

    #[test]
    fn test_unescape_reverses_escape() {
        let input = "päth näme?";
        assert_eq!(percent_unescape(&percent_escape(input, None)), input);
    }

    #[test]
    fn test_broken_escapes_pass_through() {
        // truncated at end of input
        assert_eq!(percent_unescape("100%"), "100%");
        assert_eq!(percent_unescape("a%2"), "a%2");
        // non-hex digits
        assert_eq!(percent_unescape("%zz0"), "%zz0");
        assert_eq!(percent_unescape("%uD800x"), "%uD800x");
    }

    #[test]
    fn test_unescape_latin1_fallback() {
        assert_eq!(percent_unescape("%FF"), "ÿ");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(&["a", ".", "b"]), vec!["a", "b"]);
        assert_eq!(normalize_path(&["a", "..", "b"]), vec!["b"]);
        assert_eq!(normalize_path(&["a", "", "b"]), vec!["a", "b"]);
    }

    #[test]
    fn test_normalize_path_keeps_directory_form() {
        assert_eq!(normalize_path(&["a", "b", ".."]), vec!["a", ""]);
        assert_eq!(normalize_path(&["a", "."]), vec!["a", ""]);
    }

    #[test]
    fn test_normalize_path_leading_dotdot_survives() {
        assert_eq!(normalize_path(&["..", "a"]), vec!["..", "a"]);
        assert_eq!(normalize_path(&["..", "..", "a"]), vec!["..", "..", "a"]);
    }

    #[test]
    fn test_normalize_path_empty() {
        assert_eq!(normalize_path(&[]), Vec::<String>::new());
    }
}
