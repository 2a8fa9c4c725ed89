use std::collections::HashSet;

/// Splits text into maximal runs of ASCII alphanumerics, case-folded.
/// Order and duplicates are preserved; everything else is a separator.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            current.push(ch.to_ascii_lowercase());
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Deduplicated, unordered view of [`tokenize`].
pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// Lower-cases the input and replaces every run of space, tab, newline, or
/// carriage return with a single space. All other characters pass through.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;

    for ch in text.to_lowercase().chars() {
        if matches!(ch, ' ' | '\t' | '\n' | '\r') {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(ch);
            in_run = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Brook Trout 123!", vec!["brook", "trout", "123"])]
    #[case("", vec![])]
    #[case("---!!---", vec![])]
    #[case("a-b_c", vec!["a", "b", "c"])]
    #[case("pH 7.6", vec!["ph", "7", "6"])]
    fn tokenize_cases(#[case] input: &str, #[case] expected: Vec<&str>) {
        assert_eq!(tokenize(input), expected);
    }

    #[test]
    fn tokenize_keeps_duplicates_and_order() {
        assert_eq!(tokenize("the fox the fox"), vec!["the", "fox", "the", "fox"]);
    }

    #[test]
    fn tokenize_ignores_non_ascii() {
        assert_eq!(tokenize("café brook"), vec!["caf", "brook"]);
    }

    #[test]
    fn token_set_deduplicates() {
        let set = token_set("water water quality");
        assert_eq!(set.len(), 2);
        assert!(set.contains("water"));
        assert!(set.contains("quality"));
    }

    #[rstest]
    #[case("Brook\t\tTrout\n\nstream", "brook trout stream")]
    #[case("  a  b  ", " a b ")]
    #[case("", "")]
    #[case("\r\n", " ")]
    fn collapse_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(collapse_whitespace(input), expected);
    }
}
