//! Escape-sequence decoding shared by string and character literals.

/// Decode the escape following a `\` already consumed from `chars`.
/// Returns the decoded character, or `Err(bad_char)` if the escape isn't
/// recognized.
pub fn cook_escape(chars: &mut std::str::Chars<'_>) -> Result<char, char> {
    match chars.next() {
        Some('n') => Ok('\n'),
        Some('t') => Ok('\t'),
        Some('r') => Ok('\r'),
        Some('b') => Ok('\u{8}'),
        Some('0') => Ok('\0'),
        Some('\\') => Ok('\\'),
        Some('\'') => Ok('\''),
        Some('"') => Ok('"'),
        Some('$') => Ok('$'),
        Some('u') => cook_unicode_escape(chars).ok_or('u'),
        Some(other) => Err(other),
        None => Err('\0'),
    }
}

fn cook_unicode_escape(chars: &mut std::str::Chars<'_>) -> Option<char> {
    // `\u{1F600}` form.
    if chars.as_str().starts_with('{') {
        chars.next();
        let mut hex = String::new();
        for c in chars.by_ref() {
            if c == '}' {
                break;
            }
            hex.push(c);
        }
        u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
    } else {
        let hex: String = chars.by_ref().take(4).collect();
        u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_simple_escapes() {
        let mut chars = "n".chars();
        assert_eq!(cook_escape(&mut chars), Ok('\n'));
    }

    #[test]
    fn decodes_unicode_escape() {
        let mut chars = "u{41}".chars();
        assert_eq!(cook_escape(&mut chars), Ok('A'));
    }

    #[test]
    fn rejects_unknown_escape() {
        let mut chars = "q".chars();
        assert_eq!(cook_escape(&mut chars), Err('q'));
    }
}
