use n2c2_risk::{
    data::{Condition, Dataset, Record, RiskFactor},
    model::{self, TrainConfig},
    nlp::{LemmaTokenizer, Tokenizer},
    viz::{RankedFeature, Renderer},
};

const POSITIVE: &str = "Record date: 2070-01-01\nHypertension noted, blood pressure high, lisinopril started.";
const NEGATIVE: &str = "Record date: 2070-01-01\nKnee injury resolved, ibuprofen taken, physical therapy.";

fn record(text: &str, indicator: Option<&str>) -> Record {
    Record {
        date: None,
        text: text.to_string(),
        factors: indicator
            .map(|indicator| Condition {
                name: RiskFactor::Hypertension,
                id: "DOC0".into(),
                time: "before DCT".into(),
                indicator: indicator.into(),
            })
            .into_iter()
            .collect(),
        medicines: Vec::new(),
        fam_hist: false,
        smoker: "unknown".into(),
    }
}

fn corpus() -> Dataset {
    Dataset::from_records((0..10).map(|i| {
        let record = if i % 2 == 0 {
            record(POSITIVE, Some("present"))
        } else {
            record(NEGATIVE, Some("absent"))
        };
        (format!("{i:03}"), record)
    }))
}

#[derive(Default)]
struct Recorder {
    features: Vec<RankedFeature>,
}

impl Renderer for Recorder {
    fn render(&mut self, _title: &str, features: &[RankedFeature]) -> anyhow::Result<()> {
        self.features = features.to_vec();
        Ok(())
    }
}

#[test]
fn training_ranks_condition_terms_by_sign() {
    let dataset = corpus();
    let config = TrainConfig {
        top_n: 3,
        ..TrainConfig::default()
    };
    let mut recorder = Recorder::default();

    let trained = model::train(
        &dataset,
        RiskFactor::Hypertension,
        "present",
        &config,
        &LemmaTokenizer,
        &mut recorder,
    )
    .unwrap();

    let weight = |term: &str| {
        let idx = trained
            .feature_names()
            .iter()
            .position(|name| name == term)
            .unwrap();
        trained.coefficients[idx]
    };
    assert!(weight("hypertension") > 0.0);
    assert!(weight("ibuprofen") < 0.0);

    assert_eq!(recorder.features.len(), 6);
    assert!(recorder.features[..3].iter().all(RankedFeature::is_negative));
    assert!(recorder.features[3..].iter().all(|f| !f.is_negative()));

    let accuracy = trained.held_out_accuracy.unwrap();
    assert!((0.0..=1.0).contains(&accuracy));

    let predicted = trained.predict(&[
        LemmaTokenizer.tokenize(POSITIVE),
        LemmaTokenizer.tokenize(NEGATIVE),
    ]);
    assert_eq!(predicted.to_vec(), vec![1, 0]);
}

#[test]
fn vocabulary_that_prunes_to_nothing_fails() {
    let dataset = Dataset::from_records(vec![
        ("1".to_string(), record("alpha", Some("present"))),
        ("2".to_string(), record("beta", None)),
    ]);
    let mut recorder = Recorder::default();
    let result = model::train(
        &dataset,
        RiskFactor::Hypertension,
        "present",
        &TrainConfig::default(),
        &LemmaTokenizer,
        &mut recorder,
    );
    assert!(result.is_err());
    assert!(recorder.features.is_empty());
}
