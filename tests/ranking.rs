use n2c2_risk::viz::{
    plot_top_features, top_features, CsvReport, RankedFeature, Renderer, TerminalChart,
};
use tempfile::tempdir;

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn negatives_precede_positives() {
    let features = names(&["a", "b", "c", "d", "e", "f"]);
    let coefficients = [0.5, -1.0, 2.0, -0.1, 0.0, 1.5];

    let ranked = top_features(&features, &coefficients, 2);
    let order: Vec<&str> = ranked.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(order, vec!["b", "d", "f", "c"]);
    assert_eq!(ranked[0].coefficient, -1.0);
    assert_eq!(ranked[3].coefficient, 2.0);
}

#[test]
fn short_vocabulary_fills_both_halves() {
    let features = names(&["x", "y"]);
    let ranked = top_features(&features, &[1.0, -1.0], 5);
    let order: Vec<&str> = ranked.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(order, vec!["y", "x", "y", "x"]);
}

struct Recorder {
    title: String,
    features: Vec<RankedFeature>,
}

impl Renderer for Recorder {
    fn render(&mut self, title: &str, features: &[RankedFeature]) -> anyhow::Result<()> {
        self.title = title.to_string();
        self.features = features.to_vec();
        Ok(())
    }
}

#[test]
fn plot_hands_ranking_to_renderer() {
    let mut recorder = Recorder {
        title: String::new(),
        features: Vec::new(),
    };
    plot_top_features(&names(&["p", "q"]), &[0.3, -0.2], 1, &mut recorder).unwrap();
    assert_eq!(
        recorder.title,
        "Top 1 Most Important Positive and Negative Features"
    );
    assert_eq!(recorder.features.len(), 2);
    assert!(recorder.features[0].is_negative());
    assert!(!recorder.features[1].is_negative());
}

#[test]
fn terminal_chart_marks_sign_with_glyphs() {
    let mut chart = TerminalChart::new(Vec::new());
    let features = vec![
        RankedFeature {
            name: "x".into(),
            coefficient: -2.0,
        },
        RankedFeature {
            name: "yy".into(),
            coefficient: 1.0,
        },
    ];
    chart.render("Title", &features).unwrap();
    let output = String::from_utf8(chart.into_inner()).unwrap();

    let expected = format!(
        "Title\n x | {} -2.0000\nyy | {}{} +1.0000\n",
        "-".repeat(40),
        "+".repeat(20),
        " ".repeat(20)
    );
    assert_eq!(output, expected);
}

#[test]
fn csv_report_writes_one_row_per_feature() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reports/top.csv");
    let mut report = CsvReport::new(&path);
    let features = vec![
        RankedFeature {
            name: "knee pain".into(),
            coefficient: -0.75,
        },
        RankedFeature {
            name: "hypertension".into(),
            coefficient: 1.25,
        },
    ];
    report.render("ignored", &features).unwrap();

    let mut reader = csv::Reader::from_path(report.path()).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["rank", "feature", "coefficient", "sign"]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][1], "knee pain");
    assert_eq!(rows[0][2].parse::<f64>().unwrap(), -0.75);
    assert_eq!(&rows[0][3], "negative");
    assert_eq!(&rows[1][0], "2");
    assert_eq!(&rows[1][3], "positive");
}
