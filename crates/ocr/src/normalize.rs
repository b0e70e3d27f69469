/// Canonicalize a raw recognized string: trim ordinary and non-breaking
/// whitespace, and rewrite comma decimal separators to dots so the numeric
/// grammars only ever see `"12.50"`. Total over all inputs; an empty result
/// signals "discard".
pub fn normalize_token(raw: &str) -> String {
    raw.replace('\u{a0}', " ").trim().replace(',', ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        assert_eq!(normalize_token("  450.00 \t"), "450.00");
    }

    #[test]
    fn trims_non_breaking_spaces() {
        assert_eq!(normalize_token("\u{a0}12\u{a0}"), "12");
    }

    #[test]
    fn comma_becomes_dot() {
        assert_eq!(normalize_token("12,50"), "12.50");
        assert_eq!(normalize_token("1,2,3"), "1.2.3");
    }

    #[test]
    fn empty_and_blank_normalize_to_empty() {
        assert_eq!(normalize_token(""), "");
        assert_eq!(normalize_token("   "), "");
        assert_eq!(normalize_token("\u{a0}\u{a0}"), "");
    }

    #[test]
    fn idempotent() {
        for raw in ["  12,50 ", "Кол-во", "", "\u{a0}x\u{a0}", "450.00"] {
            let once = normalize_token(raw);
            assert_eq!(normalize_token(&once), once);
        }
    }

    #[test]
    fn leaves_cyrillic_text_intact() {
        assert_eq!(normalize_token(" Код "), "Код");
    }
}
