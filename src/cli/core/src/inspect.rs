/* src/cli/core/src/inspect.rs */

// `folio resolve` command: print what the build would see.

use std::path::Path;

use anyhow::Result;
use folio_core::{ConfigLoader, ScriptEvaluator, config_dependencies};

#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
  /// Skip the Markdown transform.
  pub raw: bool,
  /// List dependency files instead of the configuration.
  pub deps: bool,
  pub pretty: bool,
}

pub fn run_resolve(root: &Path, runtime: Option<&str>, opts: ResolveOptions) -> Result<()> {
  println!("{}", resolve_output(root, runtime, opts)?);
  Ok(())
}

fn resolve_output(root: &Path, runtime: Option<&str>, opts: ResolveOptions) -> Result<String> {
  if opts.deps {
    let deps = config_dependencies(root);
    return Ok(deps.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join("\n"));
  }
  let evaluator = runtime.map_or_else(ScriptEvaluator::new, ScriptEvaluator::with_runtime);
  let mut loader = ConfigLoader::with_evaluator(root, evaluator);
  let config = if opts.raw { loader.load_raw()? } else { loader.load()? };
  let json =
    if opts.pretty { serde_json::to_string_pretty(&config)? } else { serde_json::to_string(&config)? };
  Ok(json)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn project() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
      tmp.path().join("config.yaml"),
      "locales:\n  /:\n    hero:\n      name: Ada\n    footer:\n      description: \"**bold**\"\n",
    )
    .unwrap();
    tmp
  }

  #[test]
  fn raw_skips_markdown() {
    let tmp = project();
    let raw = resolve_output(tmp.path(), None, ResolveOptions { raw: true, ..Default::default() })
      .unwrap();
    assert!(raw.contains("**bold**"));
    let resolved = resolve_output(tmp.path(), None, ResolveOptions::default()).unwrap();
    assert!(resolved.contains("<strong>bold</strong>"));
    assert!(!resolved.contains('\n'));
  }

  #[test]
  fn pretty_output_is_indented() {
    let tmp = project();
    let out = resolve_output(tmp.path(), None, ResolveOptions { pretty: true, ..Default::default() })
      .unwrap();
    assert!(out.starts_with("{\n  \"locales\""));
  }

  #[test]
  fn deps_lists_entry() {
    let tmp = project();
    let out =
      resolve_output(tmp.path(), None, ResolveOptions { deps: true, ..Default::default() }).unwrap();
    assert!(out.ends_with("config.yaml"));
    assert_eq!(out.lines().count(), 1);
  }
}
