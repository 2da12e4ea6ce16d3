/* src/cli/core/src/dev/mod.rs */

mod preview;
mod process;
mod watch;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use folio_core::config_dependencies;
use tokio::signal;

use crate::build::{BuildPlan, load_site, write_config_constant};
use crate::config::FolioConfig;
use crate::ui::{self, CYAN, DIM, GREEN, RED, RESET};

use preview::{PageTable, PreviewServer, render_pages};
use process::{ChildProcess, pipe_output, spawn_child, wait_child};
use watch::{WatchSet, setup_watcher};

/// Result of loading one generation off the async runtime.
struct Loaded {
  deps: Vec<PathBuf>,
  locales: usize,
  /// Present in preview mode only.
  pages: Option<PageTable>,
}

enum Next {
  Reload,
  Quit,
}

fn load_generation(plan: &BuildPlan, preview: bool) -> Result<Loaded> {
  let site = load_site(&plan.root, plan.runtime.as_deref())?;
  let deps = config_dependencies(&plan.root).into_iter().collect();
  let locales = site.locales.len();
  let pages = if preview {
    Some(render_pages(plan, site)?)
  } else {
    write_config_constant(plan, &site)?;
    None
  };
  Ok(Loaded { deps, locales, pages })
}

fn spawn_dev_command(command: &str, plan: &BuildPlan) -> Result<ChildProcess> {
  let constant = plan.config_constant().to_string_lossy().into_owned();
  let mut proc = spawn_child("dev", command, &plan.root, &[("FOLIO_CONFIG", &constant)])?;
  pipe_output(&mut proc);
  Ok(proc)
}

/// Watch-and-restart loop. Each generation loads the configuration,
/// serves it, and lasts until a relevant file changes. A failed load
/// keeps the previous generation running.
pub async fn run_dev(config: &FolioConfig, root: &Path) -> Result<()> {
  ui::banner("dev", Some(&root.display().to_string()));
  let plan = BuildPlan::new(config, root);
  let command = config.dev.command.as_deref();

  let preview = match command {
    Some(cmd) => {
      ui::arrow(&format!("dev command {DIM}{cmd}{RESET}"));
      None
    }
    None => {
      let server = PreviewServer::start(&config.dev.host, config.dev.port, &plan.out_dir).await?;
      ui::arrow(&format!("preview {CYAN}http://localhost:{}{RESET}", server.port));
      Some(server)
    }
  };
  ui::blank();

  let mut child: Option<ChildProcess> = None;
  let mut deps: Vec<PathBuf> = Vec::new();
  let mut generation: u32 = 0;

  loop {
    generation += 1;
    let started = Instant::now();
    let task_plan = plan.clone();
    let with_preview = preview.is_some();
    let result =
      tokio::task::spawn_blocking(move || load_generation(&task_plan, with_preview)).await;

    match result {
      Ok(Ok(loaded)) => {
        deps = loaded.deps;
        if let (Some(server), Some(pages)) = (&preview, loaded.pages) {
          server.swap(pages).await;
        }
        if let Some(cmd) = command {
          // Dropping the handle kills the previous generation's server
          drop(child.take());
          child = Some(spawn_dev_command(cmd, &plan)?);
        }
        println!(
          "  {GREEN}[folio]{RESET} generation {generation} ready {DIM}({} locales, {:.1}s){RESET}",
          loaded.locales,
          started.elapsed().as_secs_f64()
        );
      }
      Ok(Err(e)) => println!("  {RED}[folio]{RESET} reload error: {e:#}"),
      Err(e) => println!("  {RED}[folio]{RESET} reload panicked: {e}"),
    }

    let set = WatchSet::new(root, deps.iter().cloned(), &config.dev.watch);
    tracing::debug!(generation, paths = ?set.describe(), "watch set");
    if generation == 1 {
      println!("  {DIM}watching {}{RESET}", set.describe().join(", "));
    }
    let (_watcher, mut watcher_rx) = setup_watcher(&set)?;

    let next = loop {
      tokio::select! {
        _ = signal::ctrl_c() => break Next::Quit,
        (label, status) = wait_child(&mut child) => {
          match status {
            Ok(s) if s.success() => println!("  {CYAN}{label}{RESET} exited"),
            Ok(s) => println!("  {RED}{label} exited with {s}{RESET}"),
            Err(e) => println!("  {RED}{label} error: {e}{RESET}"),
          }
          child = None;
        }
        Some(()) = watcher_rx.recv() => {
          // Debounce: wait 300ms, drain pending events
          tokio::time::sleep(Duration::from_millis(300)).await;
          while watcher_rx.try_recv().is_ok() {}
          break Next::Reload;
        }
      }
    };

    match next {
      Next::Quit => {
        println!();
        println!("  {DIM}shutting down...{RESET}");
        break;
      }
      Next::Reload => println!("  {CYAN}[folio]{RESET} change detected, reloading..."),
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn command_mode_writes_constant_and_deps() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
      tmp.path().join("config.json"),
      r#"{ "locales": { "/": { "hero": { "name": "Ada" } } } }"#,
    )
    .unwrap();
    let plan = BuildPlan::new(&FolioConfig::default(), tmp.path());

    let loaded = load_generation(&plan, false).unwrap();
    assert_eq!(loaded.locales, 1);
    assert!(loaded.pages.is_none());
    assert_eq!(loaded.deps.len(), 1);
    assert!(loaded.deps[0].ends_with("config.json"));
    assert!(plan.config_constant().is_file());
  }

  #[test]
  fn preview_mode_renders_pages() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("config.yml"), "locales:\n  /:\n    hero:\n      name: Ada\n").unwrap();
    let plan = BuildPlan::new(&FolioConfig::default(), tmp.path());

    let loaded = load_generation(&plan, true).unwrap();
    let pages = loaded.pages.unwrap();
    assert_eq!(pages.len(), 1);
    assert!(!plan.config_constant().exists());
  }

  #[test]
  fn broken_config_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("config.json"), "{ nope").unwrap();
    let plan = BuildPlan::new(&FolioConfig::default(), tmp.path());
    let err = load_generation(&plan, true).err().unwrap();
    assert!(err.to_string().contains("config.json"), "{err}");
  }
}
