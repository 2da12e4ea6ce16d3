/* src/cli/core/src/config/types.rs */

use std::path::{Component, Path};

use anyhow::{Result, bail};
use serde::Deserialize;

/// Build settings from `folio.toml`. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FolioConfig {
  #[serde(default)]
  pub build: BuildSection,
  #[serde(default)]
  pub dev: DevSection,
  #[serde(default)]
  pub clean: CleanSection,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
  /// Native HTML renderer shipped with folio.
  #[default]
  Builtin,
  /// `render(url, config)` exported by a server bundle.
  Script,
}

impl RendererKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Builtin => "builtin",
      Self::Script => "script",
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
  #[serde(default = "default_out_dir")]
  pub out_dir: String,
  pub client_command: Option<String>,
  pub server_command: Option<String>,
  #[serde(default = "default_server_dir")]
  pub server_dir: String,
  #[serde(default = "default_server_entry")]
  pub server_entry: String,
  #[serde(default)]
  pub renderer: RendererKind,
  #[serde(default = "default_template")]
  pub template: String,
  #[serde(default = "default_placeholder")]
  pub placeholder: String,
  pub runtime: Option<String>,
}

impl Default for BuildSection {
  fn default() -> Self {
    Self {
      out_dir: default_out_dir(),
      client_command: None,
      server_command: None,
      server_dir: default_server_dir(),
      server_entry: default_server_entry(),
      renderer: RendererKind::default(),
      template: default_template(),
      placeholder: default_placeholder(),
      runtime: None,
    }
  }
}

fn default_out_dir() -> String {
  "dist".to_string()
}

fn default_server_dir() -> String {
  ".folio-server".to_string()
}

fn default_server_entry() -> String {
  "entry-server.js".to_string()
}

fn default_template() -> String {
  "index.html".to_string()
}

fn default_placeholder() -> String {
  folio_injector::APP_PLACEHOLDER.to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DevSection {
  #[serde(default = "default_dev_port")]
  pub port: u16,
  #[serde(default = "default_dev_host")]
  pub host: String,
  pub command: Option<String>,
  #[serde(default = "default_watch")]
  pub watch: Vec<String>,
}

impl Default for DevSection {
  fn default() -> Self {
    Self {
      port: default_dev_port(),
      host: default_dev_host(),
      command: None,
      watch: default_watch(),
    }
  }
}

fn default_dev_port() -> u16 {
  3000
}

fn default_dev_host() -> String {
  "0.0.0.0".to_string()
}

fn default_watch() -> Vec<String> {
  vec!["config".to_string()]
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CleanSection {
  #[serde(default)]
  pub commands: Vec<String>,
}

impl FolioConfig {
  pub fn validate(&self) -> Result<()> {
    let build = &self.build;
    if build.renderer == RendererKind::Script && build.server_command.is_none() {
      bail!("build.renderer = \"script\" requires build.server_command");
    }
    if build.placeholder.is_empty() {
      bail!("build.placeholder must not be empty");
    }
    if build.out_dir.is_empty() {
      bail!("build.out_dir must not be empty");
    }
    let server_dir = Path::new(&build.server_dir);
    let escapes = server_dir.components().any(|c| !matches!(c, Component::Normal(_)));
    if build.server_dir.is_empty() || escapes {
      bail!(
        "build.server_dir \"{}\" must be a relative path without \"..\" (it is deleted after every build)",
        build.server_dir
      );
    }
    Ok(())
  }
}
