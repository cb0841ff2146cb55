//! Word tokenization with stop-word removal and base-form reduction.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Turns one narrative into an ordered sequence of normalized tokens.
///
/// Implementations must drop stop-words, punctuation and whitespace-only
/// tokens and reduce each remaining token to a canonical base form.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}]+)*").expect("valid regex"));

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "almost", "also", "although",
        "always", "am", "among", "an", "and", "another", "any", "anyone", "anything", "are",
        "around", "as", "at", "be", "became", "because", "become", "been", "before", "being",
        "below", "between", "both", "but", "by", "can", "cannot", "could", "did", "do", "does",
        "doing", "done", "down", "due", "during", "each", "either", "else", "enough", "even",
        "ever", "every", "few", "for", "from", "further", "had", "has", "have", "having", "he",
        "her", "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if",
        "in", "into", "is", "it", "its", "itself", "just", "last", "least", "less", "made",
        "many", "may", "me", "might", "more", "most", "much", "must", "my", "myself", "neither",
        "never", "no", "nor", "not", "now", "of", "off", "often", "on", "once", "one", "only",
        "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
        "per", "perhaps", "please", "put", "quite", "rather", "re", "really", "same", "see",
        "seem", "seemed", "seems", "several", "she", "should", "show", "since", "so", "some",
        "something", "sometime", "still", "such", "take", "than", "that", "the", "their",
        "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
        "though", "through", "thus", "to", "together", "too", "toward", "under", "until", "up",
        "upon", "us", "used", "using", "various", "very", "via", "was", "we", "well", "were",
        "what", "whatever", "when", "where", "whether", "which", "while", "who", "whole",
        "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you",
        "your", "yours", "yourself",
    ]
    .into_iter()
    .collect()
});

/// Plural-looking words whose singular form is the word itself.
const INVARIANT: &[&str] = &[
    "abscess", "aids", "analysis", "diabetes", "herpes", "lupus", "measles", "mellitus",
    "mumps", "news", "pancreas", "rabies", "sepsis", "series", "species", "status", "stenosis",
    "thrombosis",
];

/// Regex word splitter with a fixed English stop list and rule-based lemmas.
#[derive(Debug, Clone, Copy, Default)]
pub struct LemmaTokenizer;

impl Tokenizer for LemmaTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        WORD.find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .filter(|word| !STOP_WORDS.contains(word.as_str()))
            .map(|word| lemma(&word))
            .filter(|lemma| !lemma.trim().is_empty())
            .collect()
    }
}

/// Reduce inflected noun and verb endings to a base form.
pub fn lemma(word: &str) -> String {
    let word = word
        .strip_suffix("'s")
        .or_else(|| word.strip_suffix("’s"))
        .unwrap_or(word);
    if word.chars().count() <= 3 || INVARIANT.contains(&word) || !word.is_ascii() {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies").or_else(|| word.strip_suffix("ied")) {
        return format!("{stem}y");
    }
    if let Some(stem) = word.strip_suffix("sses") {
        return format!("{stem}ss");
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix('s') {
        return stem.to_string();
    }
    word.to_string()
}
