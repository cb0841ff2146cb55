//! Text normalisation and vectorisation layer.

pub mod tfidf;
pub mod tokenizer;

use tracing::debug;

pub use tfidf::{TfidfConfig, TfidfVectorizer};
pub use tokenizer::{LemmaTokenizer, Tokenizer};

/// Tokenize every document, preserving order.
pub fn tokenize_all(tokenizer: &dyn Tokenizer, texts: &[String]) -> Vec<Vec<String>> {
    let documents: Vec<Vec<String>> = texts.iter().map(|text| tokenizer.tokenize(text)).collect();
    debug!(
        documents = documents.len(),
        tokens = documents.iter().map(Vec::len).sum::<usize>(),
        "tokenized corpus"
    );
    documents
}
