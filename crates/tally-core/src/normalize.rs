//! Canonical category labels used as grouping keys.

/// Trims surrounding whitespace and title-cases every whitespace-delimited token.
///
/// Interior whitespace is kept as-is; only letter case changes.
pub fn normalize(label: &str) -> String {
    let trimmed = label.trim();
    let mut out = String::with_capacity(trimmed.len());
    let mut at_token_start = true;
    for ch in trimmed.chars() {
        if ch.is_whitespace() {
            out.push(ch);
            at_token_start = true;
        } else if at_token_start {
            out.extend(ch.to_uppercase());
            at_token_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// [`normalize`] for possibly-missing labels; `None` yields an empty string.
pub fn normalize_opt(label: Option<&str>) -> String {
    label.map(normalize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_and_padding_variants_collapse() {
        assert_eq!(normalize("  food "), "Food");
        assert_eq!(normalize("Food"), "Food");
        assert_eq!(normalize("FOOD"), "Food");
    }

    #[test]
    fn every_token_is_title_cased() {
        assert_eq!(normalize("eating OUT"), "Eating Out");
        assert_eq!(normalize("public  transport"), "Public  Transport");
    }

    #[test]
    fn empty_and_missing_input_yield_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some(" rent")), "Rent");
    }

    #[test]
    fn non_ascii_letters_are_handled() {
        assert_eq!(normalize("épicerie"), "Épicerie");
    }
}
