/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::types::FolioConfig;

pub const PROJECT_FILE: &str = "folio.toml";

/// Walk upward from `start` looking for `folio.toml`.
pub fn find_project_file(start: &Path) -> Result<Option<PathBuf>> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join(PROJECT_FILE);
    if candidate.is_file() {
      return Ok(Some(candidate));
    }
    if !dir.pop() {
      return Ok(None);
    }
  }
}

pub fn load_project_config(path: &Path) -> Result<FolioConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let config: FolioConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  config.validate().with_context(|| format!("invalid {}", path.display()))?;
  Ok(config)
}

/// Project root and settings. An explicit path wins; otherwise the nearest
/// `folio.toml` above `cwd`; otherwise `cwd` itself with default settings.
pub fn resolve_project(explicit: Option<&Path>, cwd: &Path) -> Result<(PathBuf, FolioConfig)> {
  let file = match explicit {
    Some(p) => Some(cwd.join(p)),
    None => find_project_file(cwd)?,
  };
  match file {
    Some(path) => {
      let config = load_project_config(&path)?;
      let root = path.parent().map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
      tracing::debug!(file = %path.display(), "using project settings");
      Ok((root, config))
    }
    None => {
      tracing::debug!("no {PROJECT_FILE} found, using defaults");
      Ok((cwd.to_path_buf(), FolioConfig::default()))
    }
  }
}
