//! Failure types for record parsing and dataset construction.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal problems with a single record file.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("reading {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed markup in {path:?}")]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },
    #[error("<{tag}> in {path:?} is missing required attribute `{attribute}`")]
    MissingAttribute {
        path: PathBuf,
        tag: String,
        attribute: &'static str,
    },
    #[error("unexpected layout in {path:?}: {reason}")]
    Structure { path: PathBuf, reason: &'static str },
}

/// Failures that abort building a [`Dataset`](super::Dataset).
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("listing corpus directory {path:?}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error(transparent)]
    Record(#[from] RecordError),
}
