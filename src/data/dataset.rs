//! Corpus directory loading and per-patient label extraction.

use std::{
    ffi::OsStr,
    io::{self, Write},
    path::Path,
};

use indexmap::IndexMap;
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use super::{annotation::RiskFactor, error::DatasetError, patient::Patient, record::Record};

/// Every patient found in a corpus directory, keyed by identifier in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    patients: IndexMap<String, Patient>,
}

impl Dataset {
    /// Parse every regular file directly inside `dir`.
    ///
    /// Files are visited in file-name order. Links whose target is missing are
    /// skipped like any other non-file entry. Any unreadable or malformed file
    /// aborts the whole load.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let dir = dir.as_ref();
        let mut parsed = Vec::new();
        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if is_dangling_entry(&err) => {
                    debug!(path = ?err.path(), "skipping dangling link");
                    continue;
                }
                Err(source) => {
                    return Err(DatasetError::Walk {
                        path: dir.to_path_buf(),
                        source,
                    })
                }
            };
            if !entry.file_type().is_file() {
                debug!(path = %entry.path().display(), "skipping non-file entry");
                continue;
            }
            let id = patient_id(entry.file_name());
            let record = Record::from_path(entry.path())?;
            parsed.push((id, record));
        }

        let dataset = Self::from_records(parsed);
        info!(patients = dataset.len(), "read corpus");
        Ok(dataset)
    }

    /// Group `(patient id, record)` pairs, preserving the order ids first appear.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, Record)>,
    {
        let patients = records.into_iter().fold(
            IndexMap::<String, Patient>::new(),
            |mut patients, (id, record)| {
                patients
                    .entry(id.clone())
                    .or_insert_with(|| Patient::new(id))
                    .add_record(record);
                patients
            },
        );
        Self { patients }
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// Positional access in patient order.
    pub fn get(&self, index: usize) -> Option<&Patient> {
        self.patients.get_index(index).map(|(_, patient)| patient)
    }

    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.get(id)
    }

    pub fn patients(&self) -> impl Iterator<Item = &Patient> {
        self.patients.values()
    }

    /// Aggregate narrative per patient, aligned with [`Dataset::labels`].
    pub fn texts(&self) -> Vec<String> {
        self.patients().map(Patient::text).collect()
    }

    /// `1` for each patient annotated with `condition` at `indicator`, else `0`.
    pub fn labels(&self, condition: RiskFactor, indicator: &str) -> Vec<usize> {
        self.patients()
            .map(|patient| usize::from(patient.factor_indicator(condition, indicator)))
            .collect()
    }

    /// Write a readable dump of every patient's records.
    pub fn describe<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for patient in self.patients() {
            writeln!(out, "Records for patient {}", patient.id())?;
            for record in patient.records() {
                writeln!(out, "{record}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

/// A symlink inside the corpus whose target no longer exists.
fn is_dangling_entry(err: &walkdir::Error) -> bool {
    err.depth() > 0
        && err
            .io_error()
            .is_some_and(|io| io.kind() == io::ErrorKind::NotFound)
}

/// Grouping key: the file name up to its first hyphen, or its stem when it has none.
pub fn patient_id(file_name: &OsStr) -> String {
    let name = file_name.to_string_lossy();
    match name.split_once('-') {
        Some((prefix, _)) => prefix.to_string(),
        None => Path::new(file_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string()),
    }
}
