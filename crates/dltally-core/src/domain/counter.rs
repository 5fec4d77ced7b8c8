//! Counter file text encoding.

/// Parse the leading numeric content of a counter file.
///
/// Leading ASCII whitespace and a single `+` are skipped, then the longest
/// run of ASCII digits is read. Anything else (empty input, garbage, a
/// negative sign) yields zero. Values too large for `u64` saturate.
pub fn parse_count(text: &str) -> u64 {
    let rest = text.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let rest = rest.strip_prefix('+').unwrap_or(rest);

    rest.bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(digit - b'0'))
        })
}

/// Render a counter value as it is stored on disk: bare decimal, no newline.
pub fn format_count(value: u64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_number() {
        assert_eq!(parse_count("41"), 41);
    }

    #[test]
    fn empty_and_garbage_are_zero() {
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("-5"), 0);
        assert_eq!(parse_count("\n"), 0);
    }

    #[test]
    fn reads_only_leading_digits() {
        assert_eq!(parse_count("  12abc"), 12);
        assert_eq!(parse_count("7\n"), 7);
        assert_eq!(parse_count("+9"), 9);
        assert_eq!(parse_count("3 4"), 3);
    }

    #[test]
    fn saturates_on_overflow() {
        assert_eq!(parse_count("99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn format_has_no_trailing_whitespace() {
        let text = format_count(42);
        assert_eq!(text, "42");
        assert_eq!(parse_count(&text), 42);
    }
}
