//! Text normalization: tokenization, stopword removal, lemmatization

use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// Normalizes raw query text into a canonical token sequence.
pub struct TextNormalizer {
    stop_words: HashSet<&'static str>,
    lemmatizer: Lemmatizer,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            lemmatizer: Lemmatizer::new(),
        }
    }

    /// Lowercase, tokenize, drop stopwords, lemmatize. Empty input yields an
    /// empty token list.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        lowered
            .unicode_words()
            .filter(|word| !self.stop_words.contains(word))
            .map(|word| self.lemmatizer.lemmatize(word))
            .collect()
    }
}

/// Rule-based English lemmatizer: an irregular-form table plus ordered
/// suffix rules. Unknown forms pass through unchanged.
struct Lemmatizer {
    irregulars: HashMap<&'static str, &'static str>,
}

impl Lemmatizer {
    fn new() -> Self {
        let irregulars = IRREGULAR_FORMS.iter().copied().collect();
        Self { irregulars }
    }

    fn lemmatize(&self, word: &str) -> String {
        if let Some(base) = self.irregulars.get(word) {
            return (*base).to_string();
        }

        // Suffix rules are ordered longest-first; each carries a minimum
        // stem length so short words like "his" or "was" survive intact.
        if let Some(stem) = word.strip_suffix("sses") {
            return format!("{}ss", stem);
        }
        if let Some(stem) = word.strip_suffix("ies") {
            if stem.len() >= 2 {
                return format!("{}y", stem);
            }
        }
        if let Some(stem) = word.strip_suffix("ing") {
            if stem.len() >= 3 {
                return undouble(stem);
            }
        }
        if let Some(stem) = word.strip_suffix("ed") {
            if stem.len() >= 3 {
                return undouble(stem);
            }
        }
        if let Some(stem) = word.strip_suffix('s') {
            if stem.len() >= 3 && !stem.ends_with('s') && !stem.ends_with('u') {
                return stem.to_string();
            }
        }

        word.to_string()
    }
}

/// Collapse a doubled final consonant left by -ing/-ed stripping
/// ("planning" -> "plan"), leaving legitimate doubles like "ll" and "ss".
fn undouble(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    if chars.len() >= 2 {
        let last = chars[chars.len() - 1];
        let prev = chars[chars.len() - 2];
        if last == prev && !matches!(last, 'l' | 's' | 'e' | 'o' | 'z') && !is_vowel(last) {
            return chars[..chars.len() - 1].iter().collect();
        }
    }
    stem.to_string()
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Common irregular plurals and verb forms mapped to their base form.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("better", "good"),
    ("built", "build"),
    ("children", "child"),
    ("data", "datum"),
    ("did", "do"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("had", "have"),
    ("made", "make"),
    ("men", "man"),
    ("mice", "mouse"),
    ("people", "person"),
    ("ran", "run"),
    ("taught", "teach"),
    ("teeth", "tooth"),
    ("went", "go"),
    ("women", "woman"),
    ("wrote", "write"),
];

/// Fixed English stopword set.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];
