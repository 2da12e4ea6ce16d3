/* src/cli/core/src/build/ssg.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use folio_core::Configuration;
use folio_engine::{PageMeta, Renderer, assemble_page};
use folio_injector::locale_output_path;
use serde_json::Value;

use super::plan::BuildPlan;
use crate::shell::run_command_filtered;
use crate::ui::{self, DIM, RESET};

/// Bundler noise about `"use client"` style directives; harmless for SSG.
const DIRECTIVE_NOISE: &[&str] =
  &["MODULE_LEVEL_DIRECTIVE", "Module level directives cause errors when bundled"];

pub(super) fn is_directive_noise(line: &str) -> bool {
  DIRECTIVE_NOISE.iter().any(|n| line.contains(n))
}

/// Removes the server bundle directory when dropped, success or not.
pub(super) struct ServerDirGuard {
  path: PathBuf,
}

impl ServerDirGuard {
  pub fn new(path: &Path) -> Self {
    Self { path: path.to_path_buf() }
  }
}

impl Drop for ServerDirGuard {
  fn drop(&mut self) {
    match std::fs::remove_dir_all(&self.path) {
      Ok(()) => tracing::debug!(dir = %self.path.display(), "removed server bundle"),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
      Err(e) => tracing::warn!(dir = %self.path.display(), error = %e, "failed to remove server bundle"),
    }
  }
}

#[derive(Debug)]
pub(super) struct WrittenPage {
  pub locale: String,
  pub path: PathBuf,
  pub bytes: u64,
}

/// Steps 3 and 4: bundle the server entry (script renderer only), then
/// prerender every locale. The server directory never outlives this call.
pub(super) fn run_ssg<R: Renderer + ?Sized>(
  plan: &BuildPlan,
  config: &Configuration,
  constant: &Value,
  renderer: &mut R,
  env: &[(&str, &str)],
) -> Result<Vec<WrittenPage>> {
  let _guard = ServerDirGuard::new(&plan.server_dir);

  ui::step(3, super::STEPS, "Bundling server entry");
  match (&plan.server_command, plan.needs_server_bundle()) {
    (Some(command), true) => {
      let server_dir = plan.server_dir.to_string_lossy().into_owned();
      let mut server_env = env.to_vec();
      server_env.push(("FOLIO_BUILD_TARGET", "server"));
      server_env.push(("FOLIO_SSR_OUT_DIR", server_dir.as_str()));
      let warnings = run_command_filtered(&plan.root, command, "server build", &server_env, |l| {
        !is_directive_noise(l)
      })?;
      for w in &warnings {
        ui::warn(w);
      }
      ui::detail_ok(&plan.server_entry.display().to_string());
    }
    _ => ui::skipped("builtin renderer needs no server bundle"),
  }

  ui::step(4, super::STEPS, "Prerendering locales");
  prerender(plan, config, constant, renderer)
}

/// Render locales one at a time in declaration order. Pages written before
/// a failure stay on disk.
pub(super) fn prerender<R: Renderer + ?Sized>(
  plan: &BuildPlan,
  config: &Configuration,
  constant: &Value,
  renderer: &mut R,
) -> Result<Vec<WrittenPage>> {
  let template = std::fs::read_to_string(&plan.template)
    .with_context(|| format!("failed to read template {}", plan.template.display()))?;
  if !template.contains(&plan.placeholder) {
    bail!("template {} has no {} placeholder", plan.template.display(), plan.placeholder);
  }

  let mut pages = Vec::with_capacity(config.locales.len());
  for (key, locale) in &config.locales {
    let mut meta = PageMeta::default();
    let markup = renderer
      .render(key, config, &mut meta)
      .with_context(|| format!("failed to prerender locale {key}"))?;
    let resolved = meta.resolve(locale);
    let html = assemble_page(&template, &plan.placeholder, &markup, &resolved, constant);

    let path = locale_output_path(&plan.out_dir, key);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&path, &html).with_context(|| format!("failed to write {}", path.display()))?;

    let rel = path.strip_prefix(&plan.out_dir).unwrap_or(&path);
    ui::detail_ok(&format!(
      "{key} {DIM}\u{2192}{RESET} {}  {DIM}({}){RESET}",
      rel.display(),
      ui::format_size(html.len() as u64)
    ));
    pages.push(WrittenPage { locale: key.clone(), path, bytes: html.len() as u64 });
  }
  Ok(pages)
}
