//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;

use regex::Regex;

/// Derive a URL slug from an event title.
///
/// Norwegian letters are transliterated before everything else collapses to
/// lowercase ASCII and hyphens.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_was_hyphen = true;

    for ch in text.to_lowercase().chars() {
        let mapped: &str = match ch {
            'æ' => "ae",
            'ø' => "o",
            'å' => "a",
            'é' | 'è' | 'ê' => "e",
            'ü' => "u",
            c if c.is_ascii_alphanumeric() => {
                slug.push(c);
                last_was_hyphen = false;
                continue;
            }
            _ => {
                if !last_was_hyphen {
                    slug.push('-');
                    last_was_hyphen = true;
                }
                continue;
            }
        };
        slug.push_str(mapped);
        last_was_hyphen = false;
    }

    slug.trim_end_matches('-').to_string()
}

/// Generate a random lowercase alphanumeric string for slug collision retries
pub fn random_slug_suffix(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

fn trailing_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*?)\s*(\d+)\s*$").expect("valid regex"))
}

/// Split a table name into its prefix and a trailing number, if any.
///
/// `"Bord 3"` becomes `("Bord", Some(3))`. A name without trailing digits,
/// or with trailing digits too large for a `u32`, is returned whole with
/// `None` so no part of the name is lost.
pub fn parse_trailing_number(name: &str) -> (String, Option<u32>) {
    if let Some(caps) = trailing_number_re().captures(name.trim()) {
        if let Some(number) = caps.get(2).and_then(|m| m.as_str().parse::<u32>().ok()) {
            let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("").to_string();
            return (prefix, Some(number));
        }
    }
    (name.trim().to_string(), None)
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Validate phone number format (basic validation)
pub fn is_valid_mobile(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    digits >= 8
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Kari og Ola"), "kari-og-ola");
        assert_eq!(slugify("Bryllup på Vestlandet!"), "bryllup-pa-vestlandet");
        assert_eq!(slugify("Sølvbryllup 2026"), "solvbryllup-2026");
        assert_eq!(slugify("  Dåp  "), "dap");
    }

    #[test]
    fn test_parse_trailing_number() {
        assert_eq!(parse_trailing_number("Bord 3"), ("Bord".to_string(), Some(3)));
        assert_eq!(parse_trailing_number("Bord"), ("Bord".to_string(), None));
        assert_eq!(
            parse_trailing_number("Langbord 12 "),
            ("Langbord".to_string(), Some(12))
        );
        assert_eq!(parse_trailing_number("Bord3"), ("Bord".to_string(), Some(3)));
    }

    #[test]
    fn test_parse_trailing_number_overflow_keeps_full_name() {
        assert_eq!(
            parse_trailing_number("Bord 99999999999"),
            ("Bord 99999999999".to_string(), None)
        );
    }

    #[test]
    fn test_random_slug_suffix_charset() {
        let suffix = random_slug_suffix(6);
        assert_eq!(suffix.len(), 6);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Ola   Nordmann "), "Ola Nordmann");
    }

    #[test]
    fn test_is_valid_mobile() {
        assert!(is_valid_mobile("99887766"));
        assert!(is_valid_mobile("+47 998 87 766"));
        assert!(!is_valid_mobile("998877"));
        assert!(!is_valid_mobile("ring meg"));
    }
}
