// normalize.rs
use regex::Regex;
use std::sync::LazyLock;

static DIGITS_THEN_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*([A-Za-z])").expect("valid regex"));

static CAPITALIZED_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-z]").expect("valid regex"));

/// Formats a raw amenity label for display.
///
/// Applied in order:
/// 1. `"2Bedrooms"` becomes `"2 - Bedrooms"` (digit run, optional spaces, letter).
/// 2. `"FreeParking"` becomes `"Free Parking"` (capitalized word glued to a word character).
///
/// The result is trimmed. Running it twice is not guaranteed to be a no-op.
pub fn normalize(raw: &str) -> String {
    let separated = DIGITS_THEN_LETTER.replace_all(raw, "$1 - $2");
    split_capitalized_words(&separated).trim().to_string()
}

// The boundary test looks at the input of this step, not at the output being
// built, so adjacent words ("AbCdEf") are all split.
fn split_capitalized_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut copied = 0;

    for m in CAPITALIZED_WORD.find_iter(text) {
        let after_word_char = text[..m.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_');

        if after_word_char {
            out.push_str(&text[copied..m.start()]);
            out.push(' ');
            copied = m.start();
        }
    }

    out.push_str(&text[copied..]);
    out
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn separates_count_from_label() {
        assert_eq!(normalize("2Bedrooms"), "2 - Bedrooms");
        assert_eq!(normalize("3 beds"), "3 - beds");
    }

    #[test]
    fn splits_camel_case() {
        assert_eq!(normalize("FreeParking"), "Free Parking");
        assert_eq!(normalize("WifiIncluded"), "Wifi Included");
        assert_eq!(normalize("HotTubPoolSauna"), "Hot Tub Pool Sauna");
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn trims_outer_whitespace() {
        assert_eq!(normalize("  Hair dryer \n"), "Hair dryer");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn leaves_plain_labels_alone() {
        assert_eq!(normalize("Dedicated workspace"), "Dedicated workspace");
        assert_eq!(normalize("TV"), "TV");
    }

    #[test]
    fn both_rewrites_apply_in_order() {
        assert_eq!(normalize("55Inch HDTVWithNetflix"), "55 - Inch HDTV With Netflix");
    }

    #[test]
    fn never_adds_outer_whitespace() {
        for raw in ["Ab", "1a", "a1B", "_Xy", "Kitchen ", " 4Guests"] {
            let out = normalize(raw);
            assert_eq!(out, out.trim(), "input {raw:?}");
        }
    }
}
