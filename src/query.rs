//! Builders for the search API's query syntax.
//!
//! These only glue strings together. Whatever the remote side makes of them
//! (stemming, exact forms, prefixes) is its own business.

/// `!word`: match the word form exactly.
pub fn exact(word: &str) -> String {
    format!("!{word}")
}

/// `"some words"`: match the words as a phrase.
pub fn phrase(text: &str) -> String {
    format!("\"{text}\"")
}

/// `!"some words"`: match the phrase with exact word forms.
pub fn exact_phrase(text: &str) -> String {
    exact(&phrase(text))
}

/// `prefix*`: match any word starting with `prefix`.
pub fn wildcard(prefix: &str) -> String {
    format!("{prefix}*")
}

/// `included not !excluded`: drop results mentioning `excluded`.
pub fn excluding(included: &str, excluded: &str) -> String {
    format!("{included} not {}", exact(excluded))
}

#[test]
fn test_query_builders() {
    assert_eq!(exact("Тестировщик"), "!Тестировщик");
    assert_eq!(phrase("тестировщик junior"), "\"тестировщик junior\"");
    assert_eq!(phrase(""), "\"\"");
    assert_eq!(exact_phrase("Тестировщик Junior"), "!\"Тестировщик Junior\"");
    assert_eq!(exact_phrase(""), "!\"\"");
    assert_eq!(exact(""), "!");
    assert_eq!(wildcard("Гео"), "Гео*");
    assert_eq!(excluding("Тестировщик", "Junior"), "Тестировщик not !Junior");
}
