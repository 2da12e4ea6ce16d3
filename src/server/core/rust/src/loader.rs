/* src/server/core/rust/src/loader.rs */

// Configuration discovery and loading. One entry file per project root,
// picked by fixed priority; data files are parsed, code modules evaluated.

mod evaluator;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use serde_json::Value;

pub use evaluator::{EvalError, ModuleEvaluator, ScriptEvaluator};

use crate::deps::collect_dependencies;
use crate::error::{ConfigError, Result};
use crate::model::Configuration;
use crate::resolve::resolve_config;

/// Accepted entry file names, highest priority first.
pub const CONFIG_FILES: &[&str] =
  &["config.ts", "config.js", "config.json", "config.yml", "config.yaml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
  Module,
  Json,
  Yaml,
}

impl ConfigFormat {
  pub fn from_path(path: &Path) -> Option<Self> {
    match path.extension()?.to_str()? {
      "ts" | "js" | "mjs" => Some(Self::Module),
      "json" => Some(Self::Json),
      "yml" | "yaml" => Some(Self::Yaml),
      _ => None,
    }
  }
}

/// First existing candidate in `root`, by `CONFIG_FILES` order.
pub fn find_config_file(root: &Path) -> Option<PathBuf> {
  CONFIG_FILES.iter().map(|name| root.join(name)).find(|p| p.is_file())
}

/// Loads configuration from one project root. Holds the module evaluator
/// so a long-lived caller (dev mode) can reuse it across reloads.
pub struct ConfigLoader<E = ScriptEvaluator> {
  root: PathBuf,
  evaluator: E,
}

impl ConfigLoader<ScriptEvaluator> {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self::with_evaluator(root, ScriptEvaluator::new())
  }
}

impl<E: ModuleEvaluator> ConfigLoader<E> {
  pub fn with_evaluator(root: impl Into<PathBuf>, evaluator: E) -> Self {
    Self { root: root.into(), evaluator }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn evaluator(&self) -> &E {
    &self.evaluator
  }

  /// Render-ready configuration: every rich-text field is HTML.
  pub fn load(&mut self) -> Result<Configuration> {
    let raw = self.load_raw()?;
    Ok(resolve_config(&raw))
  }

  /// Configuration exactly as authored, before Markdown rendering.
  pub fn load_raw(&mut self) -> Result<Configuration> {
    let (file, value) = self.load_value()?;
    into_configuration(&file, value)
  }

  /// The untyped document behind the entry file, and its path.
  pub fn load_value(&mut self) -> Result<(PathBuf, Value)> {
    let file = find_config_file(&self.root)
      .ok_or_else(|| ConfigError::NotFound { root: self.root.clone() })?;
    let name = display_name(&file);
    tracing::debug!(file = %file.display(), "loading configuration");

    let value = match ConfigFormat::from_path(&file) {
      Some(ConfigFormat::Json) => {
        let text = read(&file)?;
        serde_json::from_str::<Value>(&text).map_err(|e| ConfigError::parse(&name, e))?
      }
      Some(ConfigFormat::Yaml) => {
        let text = read(&file)?;
        serde_yaml_ng::from_str::<Value>(&text).map_err(|e| ConfigError::parse(&name, e))?
      }
      Some(ConfigFormat::Module) | None => {
        let deps: Vec<PathBuf> = collect_dependencies(&file).into_iter().collect();
        self.evaluator.invalidate(&deps);
        self.evaluator.evaluate(&file).map_err(|e| ConfigError::evaluate(&name, e))?
      }
    };

    if value.is_null() {
      return Err(ConfigError::parse(name, "document is empty"));
    }
    Ok((file, value))
  }
}

/// Load and resolve the configuration in `root` with the default evaluator.
pub fn load_config(root: &Path) -> Result<Configuration> {
  ConfigLoader::new(root).load()
}

/// Load the configuration in `root` without rendering Markdown.
pub fn load_raw_config(root: &Path) -> Result<Configuration> {
  ConfigLoader::new(root).load_raw()
}

fn into_configuration(file: &Path, value: Value) -> Result<Configuration> {
  let name = display_name(file);
  let config: Configuration =
    serde_json::from_value(value).map_err(|e| ConfigError::parse(&name, e))?;
  if config.locales.is_empty() {
    return Err(ConfigError::parse(name, "`locales` must contain at least one locale"));
  }
  Ok(config)
}

fn read(path: &Path) -> Result<String> {
  std::fs::read_to_string(path)
    .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })
}

fn display_name(path: &Path) -> String {
  path.file_name().map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
