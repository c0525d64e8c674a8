//! Heuristic red-flag signals
//!
//! Each signal is an independent predicate over the message text. They are
//! not weighted: a single signal firing is enough for a spam verdict.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::EmailText;

static NUMERIC_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));
static EMAIL_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid regex")
});
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("valid regex"));

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£'];
const SPECIAL_PUNCTUATION: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', ',', '.', '?', '"', ':', '{', '}', '|',
    '<', '>',
];

/// A single heuristic check
pub type Signal = fn(&EmailText<'_>) -> bool;

/// Signals in evaluation order
pub const SIGNALS: &[(&str, Signal)] = &[
    ("EXCESSIVE_EXCLAMATION", excessive_exclamation),
    ("UPPERCASE_SUBJECT", uppercase_subject),
    ("EXCESSIVE_NUMBERS", excessive_numbers),
    ("MULTIPLE_EMAIL_ADDRESSES", multiple_email_addresses),
    ("MULTIPLE_CURRENCY_SYMBOLS", multiple_currency_symbols),
    ("MULTIPLE_URLS", multiple_urls),
    ("SPECIAL_CHARACTERS_SUBJECT", special_characters_subject),
];

/// Name of the first signal that fires, if any
pub fn first_firing(text: &EmailText<'_>) -> Option<&'static str> {
    SIGNALS
        .iter()
        .find(|(_, signal)| signal(text))
        .map(|(name, _)| *name)
}

/// More than 2 `!` in the subject or more than 5 in the body
pub fn excessive_exclamation(text: &EmailText<'_>) -> bool {
    text.subject.matches('!').count() > 2 || text.body.matches('!').count() > 5
}

/// Uppercase characters make up more than 70% of the subject
pub fn uppercase_subject(text: &EmailText<'_>) -> bool {
    let length = text.subject.chars().count();
    if length == 0 {
        return false;
    }
    let upper = text.subject.chars().filter(|c| c.is_uppercase()).count();
    upper as f64 > length as f64 * 0.7
}

/// More than 3 numeric runs in the subject or more than 5 in the body
pub fn excessive_numbers(text: &EmailText<'_>) -> bool {
    NUMERIC_RUN.find_iter(text.subject).count() > 3 || NUMERIC_RUN.find_iter(text.body).count() > 5
}

pub fn multiple_email_addresses(text: &EmailText<'_>) -> bool {
    EMAIL_ADDRESS.find_iter(text.body).count() > 3
}

/// More than 2 of `$`, `€`, `£` across subject and body together
pub fn multiple_currency_symbols(text: &EmailText<'_>) -> bool {
    let count = text
        .subject
        .chars()
        .chain(text.body.chars())
        .filter(|c| CURRENCY_SYMBOLS.contains(c))
        .count();
    count > 2
}

pub fn multiple_urls(text: &EmailText<'_>) -> bool {
    URL.find_iter(text.body).count() > 3
}

pub fn special_characters_subject(text: &EmailText<'_>) -> bool {
    text.subject
        .chars()
        .filter(|c| SPECIAL_PUNCTUATION.contains(c))
        .count()
        > 5
}
