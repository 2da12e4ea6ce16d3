/* src/cli/core/src/clean.rs */

// `folio clean` command: removes build output and runs user-defined
// cleanup commands.

use std::path::Path;

use anyhow::{Context, Result};

use crate::build::{BuildPlan, META_DIR};
use crate::config::FolioConfig;
use crate::shell::run_command;
use crate::ui;

pub fn run_clean(config: &FolioConfig, base_dir: &Path) -> Result<()> {
  ui::arrow("cleaning project");
  let plan = BuildPlan::new(config, base_dir);

  // Leftovers of an interrupted build first, then the output root
  delete_dir_if_exists(&plan.server_dir)?;
  delete_dir_if_exists(&plan.out_dir.join(META_DIR))?;
  delete_dir_if_exists(&plan.out_dir)?;
  run_clean_commands(&config.clean.commands, base_dir)?;

  ui::ok("clean complete");
  Ok(())
}

fn delete_dir_if_exists(path: &Path) -> Result<()> {
  if path.exists() {
    std::fs::remove_dir_all(path)
      .with_context(|| format!("failed to remove {}", path.display()))?;
    ui::detail(&format!("deleted {}", path.display()));
  }
  Ok(())
}

fn run_clean_commands(commands: &[String], cwd: &Path) -> Result<()> {
  for cmd in commands {
    run_command(cwd, cmd, "clean", &[])?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn delete_dir_if_exists_noop_on_missing() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(delete_dir_if_exists(&tmp.path().join("absent")).is_ok());
  }

  #[test]
  fn removes_output_and_runs_commands() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("public");
    std::fs::create_dir_all(out.join(".folio")).unwrap();
    std::fs::create_dir_all(out.join(".folio-server/chunks")).unwrap();
    std::fs::write(out.join("index.html"), "<html></html>").unwrap();
    std::fs::write(tmp.path().join("cache.tmp"), "x").unwrap();

    let config: FolioConfig = toml::from_str(
      r#"
[build]
out_dir = "public"

[clean]
commands = ["rm cache.tmp"]
"#,
    )
    .unwrap();

    run_clean(&config, tmp.path()).unwrap();
    assert!(!out.exists());
    assert!(!tmp.path().join("cache.tmp").exists());
  }

  #[test]
  fn failing_command_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = FolioConfig::default();
    config.clean.commands = vec!["exit 1".into()];
    assert!(run_clean(&config, tmp.path()).is_err());
  }
}
