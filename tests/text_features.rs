use n2c2_risk::nlp::{
    tfidf::ngrams, tokenizer::lemma, LemmaTokenizer, TfidfConfig, TfidfVectorizer, Tokenizer,
};

fn doc(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

#[test]
fn tokenizer_drops_stop_words_and_punctuation() {
    let tokens = LemmaTokenizer
        .tokenize("The patients' blood pressures were elevated, and therapies continued.");
    assert_eq!(
        tokens,
        vec!["patient", "blood", "pressure", "elevated", "therapy", "continued"]
    );
}

#[test]
fn lemma_keeps_invariant_plurals() {
    assert_eq!(lemma("diabetes"), "diabetes");
    assert_eq!(lemma("status"), "status");
    assert_eq!(lemma("arteries"), "artery");
    assert_eq!(lemma("glasses"), "glass");
    assert_eq!(lemma("patient's"), "patient");
    assert_eq!(lemma("bid"), "bid");
}

#[test]
fn ngrams_cover_every_length_in_range() {
    let grams = ngrams(&doc(&["x", "y", "z"]), (1, 2));
    assert_eq!(grams, vec!["x", "y", "z", "x y", "y z"]);
    assert!(ngrams(&doc(&["x"]), (2, 4)).is_empty());
}

#[test]
fn vocabulary_keeps_terms_seen_in_two_documents() {
    let documents = vec![doc(&["a", "b", "c"]), doc(&["a", "b", "d"]), doc(&["e"])];
    let (vectorizer, matrix) =
        TfidfVectorizer::fit_transform(TfidfConfig::default(), &documents).unwrap();

    assert_eq!(vectorizer.feature_names(), &["a", "a b", "b"]);
    assert_eq!(matrix.shape(), &[3, 3]);

    let expected_idf = (4.0_f64 / 3.0).ln() + 1.0;
    assert!(vectorizer.idf().iter().all(|v| (v - expected_idf).abs() < 1e-12));

    let weight = 1.0 / 3.0_f64.sqrt();
    for value in matrix.row(0) {
        assert!((value - weight).abs() < 1e-12);
    }
    assert!(matrix.row(2).iter().all(|v| *v == 0.0));
}

#[test]
fn rows_are_unit_length() {
    let documents = vec![
        doc(&["chest", "pain", "chest", "pain", "cad"]),
        doc(&["chest", "pain", "resolved"]),
        doc(&["cad", "stable"]),
    ];
    let (_, matrix) = TfidfVectorizer::fit_transform(TfidfConfig::default(), &documents).unwrap();
    for row in matrix.rows() {
        let norm = row.dot(&row).sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }
}

#[test]
fn transform_reuses_fitted_vocabulary() {
    let documents = vec![doc(&["statin", "started"]), doc(&["statin", "held"])];
    let (vectorizer, _) =
        TfidfVectorizer::fit_transform(TfidfConfig::default(), &documents).unwrap();
    let unseen = vectorizer.transform(&[doc(&["statin", "unknown"])]);
    assert_eq!(unseen.shape(), &[1, 1]);
    assert!((unseen[[0, 0]] - 1.0).abs() < 1e-12);
}

#[test]
fn empty_vocabulary_is_an_error() {
    let documents = vec![doc(&["only"]), doc(&["different"])];
    assert!(TfidfVectorizer::fit_transform(TfidfConfig::default(), &documents).is_err());
}
