use regex::Regex;
use std::sync::OnceLock;

/// Exact tokens the recognizer reliably produces for the header and footer
/// words of this receipt layout ("Код", "Кол-во", "Сумма", "Всего:"), mostly
/// Latin misreads of the Cyrillic originals.
const SKIP_EXACT: &[&str] = &[
    "kod", "koa", "kon-bo", "kol-vo", "k0l-vo", "k0n-bo", "cymma", "cyumma", "bcero:", "всего:",
];

/// Prefixes marking cashier, shift and totals boilerplate lines.
const SKIP_PREFIXES: &[&str] = &[
    "kaccob", "kassov", "кассов", "cmeha", "смена", "итого", "bcero",
];

fn re_date() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}").expect("invalid regex"))
}

/// Whether a normalized token is receipt boilerplate to drop before parsing.
/// Deliberately conservative: tuned to this layout's known misreads, not
/// general prose. First match wins; never errors.
pub fn is_noise(token: &str) -> bool {
    let token = token.trim();
    if token.is_empty() {
        return true;
    }
    let lower = token.to_lowercase();
    if SKIP_EXACT.contains(&lower.as_str()) {
        return true;
    }
    if SKIP_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return true;
    }
    re_date().is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_noise() {
        assert!(is_noise(""));
        assert!(is_noise("   "));
    }

    #[test]
    fn known_misreads_are_noise() {
        assert!(is_noise("kod"));
        assert!(is_noise("KOA"));
        assert!(is_noise("Kol-vo"));
        assert!(is_noise("cymma"));
        assert!(is_noise("bcero:"));
        assert!(is_noise("Всего:"));
    }

    #[test]
    fn boilerplate_prefixes_are_noise() {
        assert!(is_noise("кассовый чек"));
        assert!(is_noise("Кассовый"));
        assert!(is_noise("смена 12"));
        assert!(is_noise("ИТОГО 1250.00"));
        assert!(is_noise("bcero 450"));
    }

    #[test]
    fn dates_are_noise() {
        assert!(is_noise("12.04.2026"));
        assert!(is_noise("01.01.2024 13:05"));
    }

    #[test]
    fn line_item_tokens_are_kept() {
        assert!(!is_noise("4607"));
        assert!(!is_noise("2.5"));
        assert!(!is_noise("450.00"));
        assert!(!is_noise("Молоко"));
    }

    #[test]
    fn bare_footer_word_is_kept_for_the_sequencer() {
        // The footer marker without a colon must survive filtering so the
        // spatial cropping step can still locate it.
        assert!(!is_noise("всего"));
        assert!(!is_noise("Код"));
    }

    #[test]
    fn total_over_arbitrary_input() {
        for s in ["!@#$%", "1.2.3.4", "\u{0}", "код全", "12.04", "2026.04.12"] {
            let _ = is_noise(s);
        }
    }

    #[test]
    fn short_or_unanchored_dates_are_kept() {
        assert!(!is_noise("2.04.2026"));
        assert!(!is_noise("x12.04.2026"));
    }
}
