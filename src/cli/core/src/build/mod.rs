/* src/cli/core/src/build/mod.rs */

mod plan;
mod script;
mod ssg;


use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use folio_core::{ConfigLoader, Configuration, ScriptEvaluator, find_config_file};
use folio_engine::{DEFAULT_TITLE, Renderer, StaticRenderer};
use folio_injector::inject_title;

pub(crate) use plan::{BuildPlan, META_DIR};
use script::ScriptRenderer;

use crate::config::{FolioConfig, RendererKind};
use crate::shell::{js_runtime, run_command};
use crate::ui::{self, DIM, RESET};

const STEPS: u32 = 4;

/// Load the render-ready site configuration, honouring the runtime override.
pub(crate) fn load_site(root: &Path, runtime: Option<&str>) -> Result<Configuration> {
  let evaluator = match runtime {
    Some(rt) => ScriptEvaluator::with_runtime(rt),
    None => ScriptEvaluator::new(),
  };
  let config = ConfigLoader::with_evaluator(root, evaluator).load()?;
  Ok(config)
}

/// Write the build-time constant consumed by sub-builds and embedded in pages.
pub(crate) fn write_config_constant(
  plan: &BuildPlan,
  site: &Configuration,
) -> Result<serde_json::Value> {
  let constant = serde_json::to_value(site).context("failed to serialize configuration")?;
  let path = plan.config_constant();
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  std::fs::write(&path, serde_json::to_string(&constant)?)
    .with_context(|| format!("failed to write {}", path.display()))?;
  Ok(constant)
}

pub fn run_build(config: &FolioConfig, root: &Path) -> Result<()> {
  let started = Instant::now();
  ui::banner("build", Some(&root.display().to_string()));
  let plan = BuildPlan::new(config, root);

  // [1/4] configuration
  ui::step(1, STEPS, "Loading configuration");
  let site = load_site(root, plan.runtime.as_deref())?;
  let constant = write_config_constant(&plan, &site)?;
  let source = find_config_file(root)
    .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
    .unwrap_or_default();
  ui::detail_ok(&format!("{source} {DIM}({} locales){RESET}", site.locales.len()));
  let constant_path = plan.config_constant().to_string_lossy().into_owned();
  let env = [("FOLIO_CONFIG", constant_path.as_str())];

  // [2/4] client bundle
  ui::step(2, STEPS, "Building client bundle");
  match &plan.client_command {
    Some(command) => {
      let mut client_env = env.to_vec();
      client_env.push(("FOLIO_BUILD_TARGET", "client"));
      run_command(root, command, "client build", &client_env)?;
    }
    None => ui::skipped("no client_command"),
  }
  inject_default_title(&plan, &site)?;

  if std::env::var("FOLIO_BUILD_TARGET").is_ok_and(|t| t == "server") {
    ui::skipped("server-targeted build, no prerender");
    return Ok(());
  }

  let mut renderer: Box<dyn Renderer> = match plan.renderer {
    RendererKind::Builtin => Box::new(StaticRenderer),
    RendererKind::Script => Box::new(ScriptRenderer::new(
      plan.server_entry.clone(),
      js_runtime(plan.runtime.as_deref()),
    )),
  };
  tracing::debug!(renderer = plan.renderer.as_str(), "prerendering");
  let pages = ssg::run_ssg(&plan, &site, &constant, renderer.as_mut(), &env)?;

  let total: u64 = pages.iter().map(|p| p.bytes).sum();
  ui::blank();
  ui::ok(&format!(
    "built {} pages {DIM}({}){RESET} in {:.1}s",
    pages.len(),
    ui::format_size(total),
    started.elapsed().as_secs_f64()
  ));
  for page in &pages {
    tracing::trace!(locale = %page.locale, path = %page.path.display(), "page written");
  }
  Ok(())
}

/// Set the template `<title>` to the default locale's title. A template
/// emitted into `out_dir` is rewritten in place; a source template is left
/// untouched and gets its title per page during prerender.
fn inject_default_title(plan: &BuildPlan, site: &Configuration) -> Result<()> {
  if !plan.template.starts_with(&plan.out_dir) || !plan.template.is_file() {
    return Ok(());
  }
  let title = site
    .default_locale()
    .and_then(|key| site.locales[key].title.as_deref())
    .unwrap_or(DEFAULT_TITLE);
  let html = std::fs::read_to_string(&plan.template)
    .with_context(|| format!("failed to read {}", plan.template.display()))?;
  std::fs::write(&plan.template, inject_title(&html, title))
    .with_context(|| format!("failed to write {}", plan.template.display()))?;
  ui::detail_ok(&format!("title {DIM}\u{2192}{RESET} {title}"));
  Ok(())
}
