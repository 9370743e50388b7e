// Error types for lexicon loading and word analysis.

use std::io;
use std::path::PathBuf;

use crate::types::Id;

/// Failures of the lexicon provider, at load time or while answering a lookup.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("table {table}: missing column {column}")]
    MissingColumn { table: String, column: String },

    #[error("table {table}: invalid value {value:?} in column {column}")]
    InvalidColumn {
        table: String,
        column: String,
        value: String,
    },

    #[error("{table} {id}: {column} = {target} does not resolve")]
    DanglingReference {
        table: &'static str,
        id: Id,
        column: &'static str,
        target: Id,
    },

    #[error("no lexicon for language {language} in {}", .dir.display())]
    NotFound { language: String, dir: PathBuf },

    #[error("unsupported lexicon format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("lexicon unavailable: {0}")]
    Unavailable(String),
}

/// Failures of a single analysis call.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("cannot analyse an empty word")]
    EmptyWord,

    #[error(transparent)]
    Lexicon(#[from] LexiconError),
}
