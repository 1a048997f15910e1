//! Street name normalization for sorting and bucketing.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Strips diacritics by NFD-decomposing and dropping combining marks.
pub fn unaccent(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Builds the normalized sort key for a display name: case-folded,
/// diacritics stripped, whitespace collapsed, and an optional leading
/// article removed (matched as a whole first word, after folding).
pub fn sort_key(name: &str, strip_articles: &[String]) -> String {
    let folded: String = unaccent(name).to_lowercase();
    let mut words: Vec<&str> = folded.split_whitespace().collect();
    let leading_article = words.len() > 1
        && words
            .first()
            .is_some_and(|first| strip_articles.iter().any(|a| a == first));
    if leading_article {
        words.remove(0);
    }
    words.join(" ")
}

/// Alphabetical bucket label for the index: the uppercased, unaccented
/// first letter of the name, or the digits bucket when a number comes
/// first.
pub fn category_key(name: &str) -> String {
    for c in name.chars() {
        if c.is_numeric() {
            return "0-9".to_string();
        }
        if c.is_alphabetic() {
            let upper: String = unaccent(&c.to_string()).to_uppercase();
            if let Some(first) = upper.chars().next() {
                return first.to_string();
            }
        }
    }
    "#".to_string()
}
