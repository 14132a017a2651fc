//! Error types for configuration operations

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
///
/// Parse errors carry the file and 1-based line of the directive that
/// actually failed, even when it sits several includes deep.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not open {}", path.display())]
    FileOpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read {} on line {line}", path.display())]
    ReadFailed {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Empty section name in {} on line {line}", file.display())]
    EmptySectionName { file: PathBuf, line: usize },

    #[error("Directive must belong to a section in {} on line {line}", file.display())]
    DirectiveOutsideSection { file: PathBuf, line: usize },

    #[error("Unrecognised directive {key} in {} on line {line}", file.display())]
    UnrecognisedDirective {
        key: String,
        file: PathBuf,
        line: usize,
    },

    #[error("Include nested deeper than {depth} levels in {} on line {line}", file.display())]
    IncludeDepthExceeded {
        file: PathBuf,
        line: usize,
        depth: usize,
    },

    #[error("Unknown clean method: {0}")]
    UnknownCleanMethod(String),

    #[error("Could not expand $repo macro: {0}")]
    MacroSubstitutionFailed(#[from] regex::Error),

    #[error(transparent)]
    BackendRejected(#[from] BackendError),
}

impl ConfigError {
    /// File and line of the failing directive, for parse errors
    pub fn location(&self) -> Option<(&std::path::Path, usize)> {
        match self {
            ConfigError::ReadFailed { path, line, .. } => Some((path.as_path(), *line)),
            ConfigError::EmptySectionName { file, line }
            | ConfigError::DirectiveOutsideSection { file, line }
            | ConfigError::UnrecognisedDirective { file, line, .. }
            | ConfigError::IncludeDepthExceeded { file, line, .. } => Some((file.as_path(), *line)),
            _ => None,
        }
    }
}

/// Failures reported by a settings backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Could not set root directory: {0}")]
    InvalidRootPath(String),

    #[error("Could not set database directory: {0}")]
    InvalidDatabasePath(String),

    #[error("Could not register database [{name}]: {reason}")]
    RegisterFailed { name: String, reason: String },

    #[error("Could not unregister all databases: {0}")]
    UnregisterFailed(String),
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
