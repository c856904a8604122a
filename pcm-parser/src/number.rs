/// Permissive float conversion for coordinate tokens.
///
/// Returns the parsed value and whether the whole token was a valid number.
/// A token that is not a number in full falls back to its longest numeric
/// prefix (`"12abc"` is 12), and to `0.0` when there is none.
pub fn parse_or_zero(token: &str) -> (f32, bool) {
    if let Ok(value) = token.parse::<f32>() {
        return (value, true);
    }

    let trimmed = token.trim_start();
    let value = trimmed[..numeric_prefix_len(trimmed)]
        .parse::<f32>()
        .unwrap_or(0.0);
    (value, false)
}

// sign, digits, optional fraction, optional exponent
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_numbers_are_exact() {
        assert_eq!(parse_or_zero("1"), (1.0, true));
        assert_eq!(parse_or_zero("-2.5"), (-2.5, true));
        assert_eq!(parse_or_zero("1e3"), (1000.0, true));
        assert_eq!(parse_or_zero(".5"), (0.5, true));
    }

    #[test]
    fn garbage_falls_back_to_zero() {
        assert_eq!(parse_or_zero("oops"), (0.0, false));
        assert_eq!(parse_or_zero(""), (0.0, false));
        assert_eq!(parse_or_zero("-"), (0.0, false));
        assert_eq!(parse_or_zero("."), (0.0, false));
    }

    #[test]
    fn numeric_prefix_is_used() {
        assert_eq!(parse_or_zero("12abc"), (12.0, false));
        assert_eq!(parse_or_zero("3\r"), (3.0, false));
        assert_eq!(parse_or_zero("-1.5e2x"), (-150.0, false));
        assert_eq!(parse_or_zero("4e"), (4.0, false));
        assert_eq!(parse_or_zero("  7"), (7.0, false));
    }
}
