//! Error kinds raised by the registry, the document codec and the session.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the persistence boundary. None of them are retried.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },
    #[error("{type_name} cannot be stored; only Item, Entity, Perk or Location objects are persistable")]
    UnsupportedObject { type_name: &'static str },
    #[error("'{key}' cannot be used as a file name inside the target directory")]
    InvalidStorageKey { key: String },
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("{} is not an XML document: {reason}", path.display())]
    NotXmlFormat { path: PathBuf, reason: String },
    #[error("{} has no root element", path.display())]
    MissingRootElement { path: PathBuf },
    #[error("unknown type tag: {tag}")]
    UnknownType { tag: String },
    #[error("type '{name}' not found among serializable base types or their subclasses")]
    TypeNotFound { name: String },
    #[error("{} decoded to no object: {reason}", path.display())]
    NullResult { path: PathBuf, reason: String },
    #[error("failed to serialize {tag}: {source}")]
    Serialize {
        tag: &'static str,
        #[source]
        source: quick_xml::SeError,
    },
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PersistError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised when a blueprint is filled with the wrong values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlueprintError {
    #[error("{type_name} expects {expected} values (got {actual})")]
    Arity {
        type_name: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("field '{field}' expects {expected}")]
    Kind {
        field: &'static str,
        expected: &'static str,
    },
    #[error("field '{field}' value {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("field '{field}' has no choice #{index}")]
    Choice { field: &'static str, index: usize },
    #[error("{name} is not a constructible type")]
    NotConstructible { name: &'static str },
}

/// Errors raised while opening or closing a PIP-Boy session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("working directory not found: {}", path.display())]
    WorkingDirectory { path: PathBuf },
    #[error("invalid configuration in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SessionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
