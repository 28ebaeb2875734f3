//! Error types for quest loading and saving.
//!
//! Uses thiserror for derive and miette for structured diagnostics.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub type QuestResult<T> = Result<T, QuestError>;

#[derive(Debug, Error, Diagnostic)]
pub enum QuestError {
    /// Reading or writing a quest file failed.
    #[error("io error on {}: {source}", .path.display())]
    #[diagnostic(code(quest::io_error))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line in an ini document could not be understood.
    #[error("parse error in {}:{line}: {message}", .file.display())]
    #[diagnostic(code(quest::parse_error))]
    Parse {
        file: PathBuf,
        line: usize,
        message: String,
    },

    #[error("section [{section}] missing from {}", .file.display())]
    #[diagnostic(
        code(quest::missing_section),
        help("Every quest manifest needs a [Quest] block")
    )]
    MissingSection { file: PathBuf, section: String },

    #[error("section [{section}] declared twice in {}", .file.display())]
    #[diagnostic(code(quest::duplicate_section))]
    DuplicateSection { file: PathBuf, section: String },

    #[error("component '{key}' is defined more than once")]
    #[diagnostic(code(quest::duplicate_component))]
    DuplicateComponent { key: String },

    /// The manifest path has no directory to hold the category files.
    #[error("manifest path {} has no parent directory", .0.display())]
    #[diagnostic(code(quest::invalid_manifest_path))]
    InvalidManifestPath(PathBuf),

    #[error("invalid editor config: {0}")]
    #[diagnostic(code(quest::config))]
    Config(#[from] toml::de::Error),
}

impl QuestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
