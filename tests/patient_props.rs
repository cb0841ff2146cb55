use chrono::NaiveDate;
use n2c2_risk::data::{record::header_date, Condition, Dataset, Patient, Record, RiskFactor};
use proptest::prelude::*;

const INDICATORS: [&str; 3] = ["present", "absent", "mention"];

fn record_with(factors: &[(usize, &str)]) -> Record {
    Record {
        date: None,
        text: String::new(),
        factors: factors
            .iter()
            .enumerate()
            .map(|(i, (kind, indicator))| Condition {
                name: RiskFactor::ALL[*kind],
                id: format!("DOC{i}"),
                time: "during DCT".into(),
                indicator: (*indicator).to_string(),
            })
            .collect(),
        medicines: Vec::new(),
        fam_hist: false,
        smoker: "unknown".into(),
    }
}

fn patient_from(records: &[Record]) -> Patient {
    let mut patient = Patient::new("p");
    for record in records {
        patient.add_record(record.clone());
    }
    patient
}

fn factor_lists() -> impl Strategy<Value = Vec<Vec<(usize, &'static str)>>> {
    prop::collection::vec(
        prop::collection::vec((0usize..5, prop::sample::select(INDICATORS.to_vec())), 0..4),
        0..6,
    )
}

proptest! {
    #[test]
    fn factor_indicator_ignores_record_order(lists in factor_lists(), shift in 0usize..6) {
        let records: Vec<Record> = lists.iter().map(|f| record_with(f)).collect();
        let original = patient_from(&records);

        let mut reversed = records.clone();
        reversed.reverse();
        let mut rotated = records.clone();
        if !rotated.is_empty() {
            let by = shift % rotated.len();
            rotated.rotate_left(by);
        }

        for other in [patient_from(&reversed), patient_from(&rotated)] {
            for factor in RiskFactor::ALL {
                for indicator in INDICATORS {
                    prop_assert_eq!(
                        original.factor_indicator(factor, indicator),
                        other.factor_indicator(factor, indicator)
                    );
                }
            }
        }
    }

    #[test]
    fn labels_align_with_texts(lists in factor_lists()) {
        let dataset = Dataset::from_records(
            lists
                .iter()
                .enumerate()
                .map(|(i, f)| (format!("{}", i % 3), record_with(f))),
        );
        let texts = dataset.texts();
        for factor in RiskFactor::ALL {
            for indicator in INDICATORS {
                let labels = dataset.labels(factor, indicator);
                prop_assert_eq!(labels.len(), texts.len());
                for (patient, label) in dataset.patients().zip(&labels) {
                    prop_assert_eq!(*label == 1, patient.factor_indicator(factor, indicator));
                }
            }
        }
    }

    #[test]
    fn header_window_yields_date(
        prefix in "[A-Za-z:]{13}",
        year in 1000i32..9999,
        month in 1u32..=12,
        day in 1u32..=28,
        tail in "[ a-z\n]{0,20}",
    ) {
        let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let narrative = format!("\n  {prefix}{}{tail}", date.format("%Y-%m-%d"));
        prop_assert_eq!(header_date(&narrative), Some(date));
    }
}

#[test]
fn patient_without_records_matches_nothing() {
    let patient = Patient::new("empty");
    assert!(patient.is_empty());
    assert!(!patient.factor_indicator(RiskFactor::Cad, "present"));
    assert_eq!(patient.text(), "");
}

#[test]
fn risk_factor_tags_parse_case_insensitively() {
    assert_eq!("hypertension".parse::<RiskFactor>().unwrap(), RiskFactor::Hypertension);
    assert_eq!("CAD".parse::<RiskFactor>().unwrap(), RiskFactor::Cad);
    assert!("SMOKER".parse::<RiskFactor>().is_err());
    assert_eq!(RiskFactor::Obese.to_string(), "OBESE");
}
