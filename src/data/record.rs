//! Parsing of a single visit record file.
//!
//! A record holds a narrative section followed by an annotation section:
//!
//! ```xml
//! <root>
//!   <TEXT><![CDATA[
//! Record date: 2068-02-04
//! ...]]></TEXT>
//!   <TAGS>
//!     <HYPERTENSION id="DOC0" time="before DCT" indicator="mention"/>
//!     <SMOKER id="SM0" status="never"/>
//!   </TAGS>
//! </root>
//! ```

use std::{fmt, path::Path};

use chrono::NaiveDate;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use super::annotation::{Annotation, AnnotationKind, Condition, Medication};
use super::error::RecordError;

/// Character window of the trimmed narrative expected to hold `YYYY-MM-DD`.
///
/// Assumes every narrative opens with the 13 character `Record date: ` header.
/// Variant headers silently yield a missing or wrong date.
const DATE_OFFSET: usize = 13;
const DATE_LEN: usize = 10;

const DEFAULT_SMOKER: &str = "unknown";

/// One parsed visit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub date: Option<NaiveDate>,
    /// Narrative text exactly as stored in the file.
    pub text: String,
    pub factors: Vec<Condition>,
    pub medicines: Vec<Medication>,
    pub fam_hist: bool,
    pub smoker: String,
}

impl Record {
    /// Read and parse a record file.
    pub fn from_path(path: &Path) -> Result<Self, RecordError> {
        let xml = std::fs::read_to_string(path).map_err(|source| RecordError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&xml, path)
    }

    /// Parse record markup already held in memory. `origin` labels errors.
    pub fn parse_str(xml: &str, origin: &Path) -> Result<Self, RecordError> {
        let mut parser = RecordParser::new(origin);
        let mut reader = Reader::from_str(xml);
        loop {
            match reader.read_event().map_err(|err| parser.xml_error(err))? {
                Event::Start(element) => {
                    parser.depth += 1;
                    parser.open(&element)?;
                }
                Event::Empty(element) => {
                    parser.depth += 1;
                    parser.open(&element)?;
                    parser.close();
                }
                Event::End(_) => parser.close(),
                Event::Text(text) if parser.collecting_narrative() => {
                    let text = text.unescape().map_err(|err| parser.xml_error(err))?;
                    parser.narrative.push_str(&text);
                }
                Event::CData(data) if parser.collecting_narrative() => {
                    let text = reader
                        .decoder()
                        .decode(&data)
                        .map_err(|err| parser.xml_error(err))?;
                    parser.narrative.push_str(&text);
                }
                Event::Eof => break,
                _ => {}
            }
        }
        parser.finish()
    }

    /// Overwrite or extend fields from one decoded annotation.
    fn apply(&mut self, annotation: Annotation) {
        match annotation {
            Annotation::Condition(condition) => self.factors.push(condition),
            Annotation::Medication(medication) => self.medicines.push(medication),
            Annotation::Smoker(status) => self.smoker = status,
            Annotation::FamilyHistory(present) => self.fam_hist = present,
            Annotation::Ignored => {}
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date {
            Some(date) => writeln!(f, "Record @ {date}")?,
            None => writeln!(f, "Record @ unknown date")?,
        }
        let factors: Vec<&str> = self.factors.iter().map(|c| c.name.tag()).collect();
        writeln!(f, "Risk factors: [{}]", factors.join(", "))?;
        let medicines: Vec<String> = self.medicines.iter().map(ToString::to_string).collect();
        writeln!(f, "Medications: [{}]", medicines.join(", "))?;
        writeln!(f, "Smoker: {}", self.smoker)?;
        write!(f, "Family history: {}", self.fam_hist)
    }
}

/// Extract the header date from the narrative's fixed character window.
pub fn header_date(narrative: &str) -> Option<NaiveDate> {
    let window: String = narrative
        .trim()
        .chars()
        .skip(DATE_OFFSET)
        .take(DATE_LEN)
        .collect();
    if !is_iso_date_shape(&window) {
        return None;
    }
    NaiveDate::parse_from_str(&window, "%Y-%m-%d").ok()
}

/// `YYYY-MM-DD` with ASCII digits only; chrono alone tolerates signs, padding
/// and single-digit fields.
fn is_iso_date_shape(window: &str) -> bool {
    let bytes = window.as_bytes();
    bytes.len() == DATE_LEN
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Outside,
    Narrative,
    Annotations,
    Other,
}

/// Streaming state for one document. Depth 1 is the root element.
struct RecordParser<'p> {
    origin: &'p Path,
    depth: usize,
    saw_root: bool,
    root_children: usize,
    section: Section,
    narrative_done: bool,
    narrative: String,
    record: Record,
}

impl<'p> RecordParser<'p> {
    fn new(origin: &'p Path) -> Self {
        Self {
            origin,
            depth: 0,
            saw_root: false,
            root_children: 0,
            section: Section::Outside,
            narrative_done: false,
            narrative: String::new(),
            record: Record {
                date: None,
                text: String::new(),
                factors: Vec::new(),
                medicines: Vec::new(),
                fam_hist: false,
                smoker: DEFAULT_SMOKER.to_string(),
            },
        }
    }

    fn collecting_narrative(&self) -> bool {
        self.depth == 2 && self.section == Section::Narrative && !self.narrative_done
    }

    fn open(&mut self, element: &BytesStart<'_>) -> Result<(), RecordError> {
        match self.depth {
            1 => self.saw_root = true,
            2 => {
                self.section = match self.root_children {
                    0 => Section::Narrative,
                    1 => Section::Annotations,
                    _ => Section::Other,
                };
                self.root_children += 1;
            }
            3 => match self.section {
                Section::Narrative => self.narrative_done = true,
                Section::Annotations => {
                    let annotation = self.decode(element)?;
                    self.record.apply(annotation);
                }
                Section::Outside | Section::Other => {}
            },
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self) {
        if self.depth == 2 {
            if self.section == Section::Narrative {
                self.narrative_done = true;
            }
            self.section = Section::Outside;
        }
        self.depth = self.depth.saturating_sub(1);
    }

    fn decode(&self, element: &BytesStart<'_>) -> Result<Annotation, RecordError> {
        let tag = String::from_utf8_lossy(element.name().as_ref()).into_owned();
        let kind = AnnotationKind::from_tag(&tag);
        kind.decode(|attribute| {
            let value = element
                .try_get_attribute(attribute)
                .map_err(|err| self.xml_error(err))?
                .ok_or_else(|| RecordError::MissingAttribute {
                    path: self.origin.to_path_buf(),
                    tag: tag.clone(),
                    attribute,
                })?;
            let value = value.unescape_value().map_err(|err| self.xml_error(err))?;
            Ok(value.into_owned())
        })
    }

    fn xml_error<E: Into<quick_xml::Error>>(&self, err: E) -> RecordError {
        RecordError::Xml {
            path: self.origin.to_path_buf(),
            source: err.into(),
        }
    }

    fn structure_error(&self, reason: &'static str) -> RecordError {
        RecordError::Structure {
            path: self.origin.to_path_buf(),
            reason,
        }
    }

    fn finish(mut self) -> Result<Record, RecordError> {
        if self.depth != 0 {
            return Err(self.structure_error("unclosed element at end of input"));
        }
        if !self.saw_root {
            return Err(self.structure_error("no root element"));
        }
        if self.root_children < 2 {
            return Err(self.structure_error("expected narrative and annotation sections"));
        }
        self.record.date = header_date(&self.narrative);
        self.record.text = self.narrative;
        debug!(
            path = %self.origin.display(),
            factors = self.record.factors.len(),
            medicines = self.record.medicines.len(),
            "parsed record"
        );
        Ok(self.record)
    }
}
