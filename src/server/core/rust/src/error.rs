/* src/server/core/rust/src/error.rs */

use std::path::PathBuf;

use crate::loader::CONFIG_FILES;

/// Fatal configuration loading failures. Dependency scanning never
/// produces one of these: unreadable files are skipped.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// No candidate file exists in the project root.
  #[error(
    "no configuration file found in {}; create one of: {}",
    root.display(),
    CONFIG_FILES.join(", ")
  )]
  NotFound { root: PathBuf },

  /// A data file (JSON/YAML) exists but does not describe a configuration.
  #[error("error parsing {file}: {message}")]
  Parse { file: String, message: String },

  /// A code module failed to evaluate or exported something unusable.
  #[error("error evaluating {file}: {message}")]
  Evaluate { file: String, message: String },

  #[error("failed to read {}: {source}", path.display())]
  Io { path: PathBuf, source: std::io::Error },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
  pub(crate) fn parse(file: impl Into<String>, message: impl ToString) -> Self {
    Self::Parse { file: file.into(), message: message.to_string() }
  }

  pub(crate) fn evaluate(file: impl Into<String>, message: impl ToString) -> Self {
    Self::Evaluate { file: file.into(), message: message.to_string() }
  }

  /// Name of the file the error points at, when there is one.
  pub fn file(&self) -> Option<&str> {
    match self {
      Self::Parse { file, .. } | Self::Evaluate { file, .. } => Some(file),
      Self::NotFound { .. } | Self::Io { .. } => None,
    }
  }
}
