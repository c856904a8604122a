//! Line and token splitting for the PCM text format.

/// Splits `text` at every non-overlapping occurrence of `delimiter`.
///
/// The delimiter is a literal substring and may be longer than one character.
/// A trailing delimiter yields a trailing empty segment. An empty delimiter
/// never splits.
pub fn split_on<'a>(text: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        return vec![text];
    }
    text.split(delimiter).collect()
}

/// Splits `text` into lines, accepting both `\n` and `\r\n` endings.
///
/// Empty lines are kept so that positions in the result match line numbers
/// in the input.
pub fn normalize_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    split_on(&normalized, "\n")
        .into_iter()
        .map(|line| line.replace('\n', ""))
        .collect()
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

fn flips_quote_state(text: &str) -> bool {
    text.chars().filter(|c| is_quote(*c)).count() % 2 == 1
}

/// Replaces every occurrence of `find` in `text`, starting the search at byte
/// `offset`.
///
/// With `respect_quotes`, a running flag is toggled by every `"` or `'` in the
/// source text and matches found while the flag is set are left untouched.
/// Both quote characters toggle the same flag.
pub fn replace_all(
    text: &str,
    find: &str,
    replace: &str,
    offset: usize,
    respect_quotes: bool,
) -> String {
    if find.is_empty() || !text.is_char_boundary(offset) {
        return text.to_string();
    }

    let (head, mut rest) = text.split_at(offset);
    let mut in_quotes = respect_quotes && flips_quote_state(head);
    let mut out = String::with_capacity(text.len());
    out.push_str(head);

    while let Some(pos) = rest.find(find) {
        let (before, after) = rest.split_at(pos);
        if respect_quotes && flips_quote_state(before) {
            in_quotes = !in_quotes;
        }
        out.push_str(before);

        if in_quotes {
            out.push_str(find);
        } else {
            out.push_str(replace);
        }
        if respect_quotes && flips_quote_state(find) {
            in_quotes = !in_quotes;
        }

        rest = &after[find.len()..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_on_single_char() {
        assert_eq!(split_on("ref a b c", " "), vec!["ref", "a", "b", "c"]);
    }

    #[test]
    fn split_on_multi_char_delimiter() {
        assert_eq!(split_on("a::b:c::", "::"), vec!["a", "b:c", ""]);
    }

    #[test]
    fn split_on_missing_delimiter_returns_whole_input() {
        assert_eq!(split_on("point", " "), vec!["point"]);
        assert_eq!(split_on("", " "), vec![""]);
        assert_eq!(split_on("abc", ""), vec!["abc"]);
    }

    #[test]
    fn split_on_keeps_empty_segments() {
        assert_eq!(split_on("a  b ", " "), vec!["a", "", "b", ""]);
    }

    #[test]
    fn normalize_lines_handles_crlf() {
        assert_eq!(
            normalize_lines("one\r\ntwo\nthree"),
            vec!["one", "two", "three"]
        );
    }

    #[test]
    fn normalize_lines_keeps_empty_lines() {
        assert_eq!(normalize_lines("a\n\nb\n"), vec!["a", "", "b", ""]);
    }

    #[test]
    fn replace_all_plain() {
        assert_eq!(replace_all("a-b-c", "-", "+", 0, false), "a+b+c");
        assert_eq!(replace_all("a-b-c", "-", "", 0, true), "abc");
    }

    #[test]
    fn replace_all_respects_quotes() {
        assert_eq!(
            replace_all(r#"a b "c d" e"#, " ", "_", 0, true),
            r#"a_b_"c d"_e"#
        );
        assert_eq!(replace_all("x 'y z' w", " ", "_", 0, true), "x_'y z'_w");
    }

    #[test]
    fn replace_all_ignores_quotes_when_disabled() {
        assert_eq!(
            replace_all(r#"a "b c""#, " ", "_", 0, false),
            r#"a_"b_c""#
        );
    }

    #[test]
    fn replace_all_from_offset() {
        assert_eq!(replace_all("a a a", "a", "b", 1, false), "a b b");
        assert_eq!(replace_all("a a", "a", "b", 10, false), "a a");
    }

    #[test]
    fn replace_all_does_not_rescan_replacement() {
        assert_eq!(replace_all("aa", "a", "aa", 0, false), "aaaa");
    }
}
