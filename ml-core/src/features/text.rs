//! Text normalization and term extraction
//!
//! Bank descriptions are noisy ("WALMART STORE #5234 - PURCHASE 01/15/2024").
//! Cleaning strips identifiers, dates and banking boilerplate so the
//! vocabulary is spent on merchant and purpose words.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::MIN_TOKEN_LEN;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+|www\S+").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+").unwrap());
static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+[/-]\d+[/-]\d+").unwrap());
static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());
static PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[[:punct:]]").unwrap());

/// Words present on nearly every statement line
const NOISE_WORDS: &[&str] = &[
    "purchase",
    "payment",
    "transaction",
    "debit",
    "credit",
    "pos",
    "card",
    "online",
    "mobile",
    "recurring",
    "automatic",
    "withdrawal",
    "deposit",
    "transfer",
    "bill",
    "subscription",
];

/// Lowercase and strip URLs, e-mails, dates, digits, punctuation and noise words
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let text = URL_RE.replace_all(&lowered, "");
    let text = EMAIL_RE.replace_all(&text, "");
    let text = DATE_RE.replace_all(&text, "");
    let text = DIGITS_RE.replace_all(&text, "");
    let text = PUNCT_RE.replace_all(&text, " ");

    text.split_whitespace()
        .filter(|w| !NOISE_WORDS.contains(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Alphabetic tokens of at least [`MIN_TOKEN_LEN`] characters
pub fn tokenize(text: &str) -> Vec<String> {
    clean_text(text)
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_TOKEN_LEN && w.chars().all(char::is_alphabetic))
        .map(str::to_string)
        .collect()
}

/// Contiguous n-grams for n in 1..=ngram_max, n-gram words joined by a space
pub fn extract_terms(text: &str, ngram_max: usize) -> Vec<String> {
    let tokens = tokenize(text);
    let mut terms = Vec::with_capacity(tokens.len() * ngram_max.max(1));

    for n in 1..=ngram_max.max(1) {
        if tokens.len() < n {
            break;
        }
        terms.extend(tokens.windows(n).map(|w| w.join(" ")));
    }

    terms
}
