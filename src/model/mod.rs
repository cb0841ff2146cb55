//! Risk-factor classifier training over aggregated patient narratives.

pub mod split;

use anyhow::Result;
use linfa::{
    dataset::DatasetBase,
    prelude::{Fit, Predict},
};
use linfa_logistic::{FittedLogisticRegression, LogisticRegression};
use ndarray::{Array1, Axis};
use tracing::{info, instrument};

use crate::{
    data::{Dataset, RiskFactor},
    nlp::{self, TfidfConfig, TfidfVectorizer, Tokenizer},
    viz::{self, Renderer},
};

pub use split::{train_test_split, Split};

/// Pipeline parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub tfidf: TfidfConfig,
    /// Share of patients held out for evaluation.
    pub test_fraction: f64,
    pub seed: u64,
    /// Inverse L2 regularization strength.
    pub inverse_regularization: f64,
    pub max_iterations: u64,
    /// Features shown on each side of the ranking.
    pub top_n: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            tfidf: TfidfConfig::default(),
            test_fraction: 0.2,
            seed: 42,
            inverse_regularization: 5.0,
            max_iterations: 1000,
            top_n: 50,
        }
    }
}

/// A fitted classifier together with the vocabulary it was trained on.
#[derive(Debug)]
pub struct TrainedClassifier {
    pub model: FittedLogisticRegression<f64, usize>,
    pub vectorizer: TfidfVectorizer,
    /// Per-feature weights, positive values favouring label `1`.
    pub coefficients: Array1<f64>,
    /// Accuracy on the held-out rows; `None` when nothing was held out.
    pub held_out_accuracy: Option<f64>,
}

impl TrainedClassifier {
    pub fn feature_names(&self) -> &[String] {
        self.vectorizer.feature_names()
    }

    /// Predict labels for new tokenized narratives.
    pub fn predict(&self, documents: &[Vec<String>]) -> Array1<usize> {
        let x = self.vectorizer.transform(documents);
        self.model.predict(&x)
    }
}

/// Train a classifier for `condition` at `indicator` and render its top features.
///
/// Degenerate corpora (empty, single-class, empty vocabulary) are not checked
/// here; the vectorizer or solver reports them.
#[instrument(skip(dataset, config, tokenizer, renderer))]
pub fn train(
    dataset: &Dataset,
    condition: RiskFactor,
    indicator: &str,
    config: &TrainConfig,
    tokenizer: &dyn Tokenizer,
    renderer: &mut dyn Renderer,
) -> Result<TrainedClassifier> {
    let texts = dataset.texts();
    let labels = dataset.labels(condition, indicator);
    let positives = labels.iter().filter(|&&label| label == 1).count();
    info!(patients = texts.len(), positives, "collected labels");

    let documents = nlp::tokenize_all(tokenizer, &texts);
    let (vectorizer, x) = TfidfVectorizer::fit_transform(config.tfidf, &documents)?;
    let y = Array1::from(labels);
    info!(features = vectorizer.feature_names().len(), "vectorized corpus");

    let Split { train, test } = train_test_split(x.nrows(), config.test_fraction, config.seed);
    let training = DatasetBase::new(x.select(Axis(0), &train), y.select(Axis(0), &train));

    let model = LogisticRegression::default()
        .alpha(1.0 / config.inverse_regularization)
        .max_iterations(config.max_iterations)
        .with_intercept(true)
        .fit(&training)?;

    let held_out_accuracy = if test.is_empty() {
        None
    } else {
        let predicted: Array1<usize> = model.predict(&x.select(Axis(0), &test));
        let expected = y.select(Axis(0), &test);
        let correct = predicted
            .iter()
            .zip(expected.iter())
            .filter(|(p, e)| p == e)
            .count();
        Some(correct as f64 / test.len() as f64)
    };
    info!(accuracy = ?held_out_accuracy, held_out = test.len(), "evaluated classifier");

    let coefficients = if model.labels().pos.class == 1 {
        model.params().clone()
    } else {
        model.params().mapv(|w| -w)
    };

    viz::plot_top_features(
        vectorizer.feature_names(),
        &coefficients.to_vec(),
        config.top_n,
        renderer,
    )?;

    Ok(TrainedClassifier {
        model,
        vectorizer,
        coefficients,
        held_out_accuracy,
    })
}
