//! Annotation entities decoded from the `TAGS` section of a record.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Risk-factor condition tags recognised by the corpus annotation guidelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiskFactor {
    Hyperlipidemia,
    Obese,
    Hypertension,
    Diabetes,
    Cad,
}

impl RiskFactor {
    /// Every recognised condition, in tag-table order.
    pub const ALL: [RiskFactor; 5] = [
        RiskFactor::Hyperlipidemia,
        RiskFactor::Obese,
        RiskFactor::Hypertension,
        RiskFactor::Diabetes,
        RiskFactor::Cad,
    ];

    /// Markup tag used for this condition.
    pub fn tag(self) -> &'static str {
        match self {
            RiskFactor::Hyperlipidemia => "HYPERLIPIDEMIA",
            RiskFactor::Obese => "OBESE",
            RiskFactor::Hypertension => "HYPERTENSION",
            RiskFactor::Diabetes => "DIABETES",
            RiskFactor::Cad => "CAD",
        }
    }

    /// Look a tag up in the condition table.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|factor| factor.tag() == tag)
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Raised when a string names none of the recognised conditions.
#[derive(Debug, Clone, Error)]
#[error("unknown risk factor `{0}` (expected one of HYPERLIPIDEMIA, OBESE, HYPERTENSION, DIABETES, CAD)")]
pub struct UnknownRiskFactor(pub String);

impl FromStr for RiskFactor {
    type Err = UnknownRiskFactor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(&s.trim().to_ascii_uppercase()).ok_or_else(|| UnknownRiskFactor(s.into()))
    }
}

/// A risk-factor annotation with its clinical status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub name: RiskFactor,
    pub id: String,
    /// Raw time token such as `before DCT`; never parsed.
    pub time: String,
    pub indicator: String,
}

impl Condition {
    pub fn matches(&self, condition: RiskFactor, indicator: &str) -> bool {
        self.name == condition && self.indicator == indicator
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} @ {}", self.name, self.indicator, self.time)
    }
}

/// A medication annotation. `types` keeps only non-empty type codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Medication {
    pub id: String,
    pub time: String,
    pub types: Vec<String>,
}

impl fmt::Display for Medication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.types, self.time)
    }
}

/// Closed set of things a direct child of the annotation container can decode to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    Condition(Condition),
    Medication(Medication),
    Smoker(String),
    FamilyHistory(bool),
    Ignored,
}

/// Tag identity of an annotation element before its attributes are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    Condition(RiskFactor),
    Medication,
    Smoker,
    FamilyHistory,
    Ignored,
}

impl AnnotationKind {
    pub fn from_tag(tag: &str) -> Self {
        if let Some(factor) = RiskFactor::from_tag(tag) {
            return AnnotationKind::Condition(factor);
        }
        match tag {
            "MEDICATION" => AnnotationKind::Medication,
            "SMOKER" => AnnotationKind::Smoker,
            "FAMILY_HIST" => AnnotationKind::FamilyHistory,
            _ => AnnotationKind::Ignored,
        }
    }

    /// Build the annotation from a lookup that yields each attribute value.
    ///
    /// `attr` is called once per required attribute and reports absence itself.
    pub fn decode<E, F>(self, mut attr: F) -> Result<Annotation, E>
    where
        F: FnMut(&'static str) -> Result<String, E>,
    {
        let annotation = match self {
            AnnotationKind::Condition(name) => Annotation::Condition(Condition {
                name,
                id: attr("id")?,
                time: attr("time")?,
                indicator: attr("indicator")?,
            }),
            AnnotationKind::Medication => {
                let id = attr("id")?;
                let time = attr("time")?;
                let types = [attr("type1")?, attr("type2")?]
                    .into_iter()
                    .filter(|t| !t.is_empty())
                    .collect();
                Annotation::Medication(Medication { id, time, types })
            }
            AnnotationKind::Smoker => Annotation::Smoker(attr("status")?),
            AnnotationKind::FamilyHistory => {
                Annotation::FamilyHistory(attr("indicator")? == "present")
            }
            AnnotationKind::Ignored => Annotation::Ignored,
        };
        Ok(annotation)
    }
}
