//! Keyword primitives for ATS matching: text normalization, stopword-filtered
//! extraction, and local CV-vs-vacancy keyword overlap.

use std::collections::HashSet;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Basic Spanish + English stopword list. Tokens of length <= 2 are dropped
/// before this list is consulted, so the short entries are belt-and-braces.
const STOPWORDS: &[&str] = &[
    // ES
    "el", "la", "los", "las", "un", "una", "unos", "unas", "y", "e", "o", "u", "pero", "mas",
    "sino", "de", "a", "en", "con", "por", "para", "si", "no", "mi", "tu", "su", "este", "esta",
    "estos", "estas", "aquel", "aquella", "aquellos", "aquellas", "que", "como", "cuando", "donde",
    "quien", "cual", "cuanto", "ser", "estar", "tener", "hacer", "poder", "decir", "ver", "ir",
    "dar", "saber", "querer", "llegar",
    // EN
    "the", "an", "and", "or", "but", "if", "then", "else", "for", "with", "by", "at", "from",
    "to", "in", "on", "of", "up", "down", "out", "is", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "do", "does", "did", "will", "shall", "should", "would", "can", "could",
    "may", "might", "must", "i", "you", "he", "she", "it", "we", "they", "my", "your", "his",
    "her", "its", "our", "their", "this", "that", "these", "those", "who", "whom", "whose",
    "which", "what", "where", "when", "why", "how",
];

/// Normalizes text for keyword comparison: lowercase, Unicode NFD with
/// combining marks stripped, punctuation replaced by spaces, whitespace
/// collapsed and trimmed. Total over all input; idempotent.
pub fn normalize_text(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    for ch in text.to_lowercase().nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        // Word chars are ASCII alphanumerics and underscore; everything else
        // (punctuation, symbols, non-Latin letters) separates tokens.
        if ch.is_ascii_alphanumeric() || ch == '_' {
            cleaned.push(ch);
        } else {
            cleaned.push(' ');
        }
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the relevant keywords from a text: normalized tokens longer than
/// two characters that are not stopwords, deduplicated in first-seen order.
/// Text made only of stopwords/short tokens yields an empty vec.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let normalized = normalize_text(text);
    let mut seen: HashSet<&str> = HashSet::new();
    let mut keywords = Vec::new();

    for word in normalized.split(' ') {
        if word.len() <= 2 || STOPWORDS.contains(&word) {
            continue;
        }
        if seen.insert(word) {
            keywords.push(word.to_string());
        }
    }

    keywords
}

/// Local, LLM-independent keyword-overlap signal between a CV and a vacancy.
#[derive(Debug, Clone)]
pub struct KeywordOverlap {
    /// Vacancy keywords present in the CV.
    pub matched: Vec<String>,
    /// Vacancy keywords absent from the CV.
    pub missing: Vec<String>,
}

/// Intersects the vacancy's keyword set with the CV's.
pub fn keyword_overlap(cv_text: &str, vacancy_text: &str) -> KeywordOverlap {
    let cv_keywords: HashSet<String> = extract_keywords(cv_text).into_iter().collect();

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for keyword in extract_keywords(vacancy_text) {
        if cv_keywords.contains(&keyword) {
            matched.push(keyword);
        } else {
            missing.push(keyword);
        }
    }

    KeywordOverlap { matched, missing }
}
