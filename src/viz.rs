//! Ranking of classifier weights and rendering of the top features.

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

const BAR_WIDTH: usize = 40;

/// A vocabulary term with its fitted weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFeature {
    pub name: String,
    pub coefficient: f64,
}

impl RankedFeature {
    pub fn is_negative(&self) -> bool {
        self.coefficient < 0.0
    }
}

/// Display sink for ranked features. Implementations must distinguish sign.
pub trait Renderer {
    fn render(&mut self, title: &str, features: &[RankedFeature]) -> Result<()>;
}

/// The `top_n` most negative followed by the `top_n` most positive features.
///
/// Both halves are taken from the ascending sort, so the negative half is
/// most-negative first and the positive half ends with the largest weight.
/// With fewer than `top_n` features each half holds all of them.
pub fn top_features(names: &[String], coefficients: &[f64], top_n: usize) -> Vec<RankedFeature> {
    let mut order: Vec<usize> = (0..names.len().min(coefficients.len())).collect();
    order.sort_by(|&a, &b| coefficients[a].total_cmp(&coefficients[b]));

    let n = top_n.min(order.len());
    let negatives = &order[..n];
    let positives = &order[order.len() - n..];
    negatives
        .iter()
        .chain(positives)
        .map(|&idx| RankedFeature {
            name: names[idx].clone(),
            coefficient: coefficients[idx],
        })
        .collect()
}

/// Rank features and hand the selection to `renderer`.
pub fn plot_top_features(
    names: &[String],
    coefficients: &[f64],
    top_n: usize,
    renderer: &mut dyn Renderer,
) -> Result<()> {
    let features = top_features(names, coefficients, top_n);
    let title = format!("Top {top_n} Most Important Positive and Negative Features");
    renderer.render(&title, &features)
}

/// Horizontal text bar chart; negative bars use `-`, positive bars `+`.
pub struct TerminalChart<W: Write> {
    out: W,
}

impl<W: Write> TerminalChart<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalChart<W> {
    fn render(&mut self, title: &str, features: &[RankedFeature]) -> Result<()> {
        writeln!(self.out, "{title}")?;
        let label_width = features.iter().map(|f| f.name.chars().count()).max().unwrap_or(0);
        let scale = features
            .iter()
            .map(|f| f.coefficient.abs())
            .fold(0.0_f64, f64::max);
        for feature in features {
            let len = if scale > 0.0 {
                ((feature.coefficient.abs() / scale) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            let glyph = if feature.is_negative() { "-" } else { "+" };
            let bar_width = BAR_WIDTH;
            writeln!(
                self.out,
                "{:>label_width$} | {:<bar_width$} {:+.4}",
                feature.name,
                glyph.repeat(len),
                feature.coefficient,
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    rank: usize,
    feature: &'a str,
    coefficient: f64,
    sign: &'static str,
}

/// CSV dump of the ranked features.
pub struct CsvReport {
    path: PathBuf,
}

impl CsvReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Renderer for CsvReport {
    fn render(&mut self, _title: &str, features: &[RankedFeature]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file =
            File::create(&self.path).with_context(|| format!("create {:?}", self.path))?;
        let mut writer = csv::Writer::from_writer(file);
        for (rank, feature) in features.iter().enumerate() {
            writer.serialize(ReportRow {
                rank: rank + 1,
                feature: &feature.name,
                coefficient: feature.coefficient,
                sign: if feature.is_negative() { "negative" } else { "positive" },
            })?;
        }
        writer.flush()?;
        info!(path = %self.path.display(), rows = features.len(), "wrote feature ranking");
        Ok(())
    }
}

/// Forwards each rendering to every wrapped renderer in turn.
#[derive(Default)]
pub struct Fanout {
    renderers: Vec<Box<dyn Renderer>>,
}

impl Fanout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderers.push(Box::new(renderer));
        self
    }
}

impl Renderer for Fanout {
    fn render(&mut self, title: &str, features: &[RankedFeature]) -> Result<()> {
        for renderer in &mut self.renderers {
            renderer.render(title, features)?;
        }
        Ok(())
    }
}
