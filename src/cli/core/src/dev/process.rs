/* src/cli/core/src/dev/process.rs */

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use crate::ui::{DIM, MAGENTA, RESET};

pub(super) struct ChildProcess {
  pub label: &'static str,
  pub child: tokio::process::Child,
}

/// Spawn `command` through `sh -c`. The child dies with its handle, which
/// is how a generation's external dev server is stopped.
pub(super) fn spawn_child(
  label: &'static str,
  command: &str,
  base_dir: &Path,
  env_vars: &[(&str, &str)],
) -> Result<ChildProcess> {
  let mut cmd = Command::new("sh");
  cmd.args(["-c", command]);
  cmd.current_dir(base_dir);
  cmd.stdout(std::process::Stdio::piped());
  cmd.stderr(std::process::Stdio::piped());
  cmd.kill_on_drop(true);
  for (key, val) in env_vars {
    cmd.env(key, val);
  }
  let child = cmd.spawn().with_context(|| format!("failed to start {label}: {command}"))?;
  Ok(ChildProcess { label, child })
}

/// Pipe stdout/stderr, prefixed with a colored label
pub(super) fn pipe_output(proc: &mut ChildProcess) {
  let label = proc.label;
  if let Some(stdout) = proc.child.stdout.take() {
    tokio::spawn(async move {
      let mut lines = BufReader::new(stdout).lines();
      while let Ok(Some(line)) = lines.next_line().await {
        println!("  {MAGENTA}{DIM}{label:>8}{RESET} {line}");
      }
    });
  }
  if let Some(stderr) = proc.child.stderr.take() {
    tokio::spawn(async move {
      let mut lines = BufReader::new(stderr).lines();
      while let Ok(Some(line)) = lines.next_line().await {
        eprintln!("  {MAGENTA}{DIM}{label:>8}{RESET} {line}");
      }
    });
  }
}

/// Resolves when the child exits; pends forever when there is none.
pub(super) async fn wait_child(
  proc: &mut Option<ChildProcess>,
) -> (&'static str, std::io::Result<std::process::ExitStatus>) {
  match proc {
    Some(p) => (p.label, p.child.wait().await),
    None => std::future::pending().await,
  }
}
