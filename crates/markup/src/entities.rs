//! Built-in entity and character reference resolution

/// Resolve an entity name, with or without a leading `#` for character
/// references.
pub(crate) fn resolve(name: &str) -> Option<char> {
    match name.strip_prefix('#') {
        Some(body) => resolve_numeric(body),
        None => resolve_builtin(name),
    }
}

/// The five predefined XML entities
pub(crate) fn resolve_builtin(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "apos" => Some('\''),
        "gt" => Some('>'),
        "lt" => Some('<'),
        "quot" => Some('"'),
        _ => None,
    }
}

/// Resolve the body of a character reference, `x`-prefixed for
/// hexadecimal. Parsing stops at the first bad digit; zero, overflow and
/// invalid scalar values are unresolvable.
pub(crate) fn resolve_numeric(body: &str) -> Option<char> {
    let (digits, radix) = match body.strip_prefix('x') {
        Some(rest) => (rest, 16),
        None => (body, 10),
    };
    let mut value: u32 = 0;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(digit) => value = value.checked_mul(radix)?.checked_add(digit)?,
            None => break,
        }
    }
    if value == 0 {
        return None;
    }
    char::from_u32(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins() {
        assert_eq!(resolve_builtin("amp"), Some('&'));
        assert_eq!(resolve_builtin("apos"), Some('\''));
        assert_eq!(resolve_builtin("gt"), Some('>'));
        assert_eq!(resolve_builtin("lt"), Some('<'));
        assert_eq!(resolve_builtin("quot"), Some('"'));
        assert_eq!(resolve_builtin("nbsp"), None);
    }

    #[test]
    fn test_numeric() {
        assert_eq!(resolve("#65"), Some('A'));
        assert_eq!(resolve("#x41"), Some('A'));
        assert_eq!(resolve("#x263A"), Some('\u{263A}'));
    }

    #[test]
    fn test_numeric_stops_at_bad_digit() {
        assert_eq!(resolve("#65x"), Some('A'));
    }

    #[test]
    fn test_numeric_unresolvable() {
        assert_eq!(resolve("#"), None);
        assert_eq!(resolve("#x"), None);
        assert_eq!(resolve("#0"), None);
        // Surrogate
        assert_eq!(resolve("#xD800"), None);
    }
}
