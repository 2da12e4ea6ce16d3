/* src/cli/core/src/build/plan.rs */

use std::path::{Path, PathBuf};

use crate::config::{FolioConfig, RendererKind};

/// Directory under `out_dir` holding build-time metadata.
pub(crate) const META_DIR: &str = ".folio";

/// Absolute paths and commands for one build, derived from `folio.toml`.
#[derive(Debug, Clone)]
pub(crate) struct BuildPlan {
  pub root: PathBuf,
  pub out_dir: PathBuf,
  pub server_dir: PathBuf,
  pub server_entry: PathBuf,
  pub template: PathBuf,
  /// The template as it sits in the project, before any client build.
  pub source_template: PathBuf,
  pub placeholder: String,
  pub client_command: Option<String>,
  pub server_command: Option<String>,
  pub renderer: RendererKind,
  pub runtime: Option<String>,
}

impl BuildPlan {
  pub fn new(config: &FolioConfig, root: &Path) -> Self {
    let build = &config.build;
    let out_dir = root.join(&build.out_dir);
    let server_dir = out_dir.join(&build.server_dir);
    // The client build emits the template; without one it is a source file
    let template = if build.client_command.is_some() {
      out_dir.join(&build.template)
    } else {
      root.join(&build.template)
    };
    Self {
      root: root.to_path_buf(),
      server_entry: server_dir.join(&build.server_entry),
      server_dir,
      out_dir,
      template,
      source_template: root.join(&build.template),
      placeholder: build.placeholder.clone(),
      client_command: build.client_command.clone(),
      server_command: build.server_command.clone(),
      renderer: build.renderer,
      runtime: build.runtime.clone(),
    }
  }

  /// Where the render-ready configuration is written for sub-builds.
  pub fn config_constant(&self) -> PathBuf {
    self.out_dir.join(META_DIR).join("config.json")
  }

  /// Server bundling only happens for the script renderer.
  pub fn needs_server_bundle(&self) -> bool {
    self.renderer == RendererKind::Script
  }
}
