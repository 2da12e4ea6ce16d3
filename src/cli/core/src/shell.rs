/* src/cli/core/src/shell.rs */

// Shell command helpers shared across build, dev and clean.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};

use crate::ui::{self, DIM, RESET};

/// Run a shell command, bail on failure (shows both stdout and stderr on error).
pub(crate) fn run_command(
  base_dir: &Path,
  command: &str,
  label: &str,
  env: &[(&str, &str)],
) -> Result<()> {
  run_command_filtered(base_dir, command, label, env, |_| true).map(|_| ())
}

/// Like [`run_command`], but output lines rejected by `keep` are dropped.
/// Returns the kept stderr lines so callers can surface warnings.
pub(crate) fn run_command_filtered(
  base_dir: &Path,
  command: &str,
  label: &str,
  env: &[(&str, &str)],
  keep: impl Fn(&str) -> bool,
) -> Result<Vec<String>> {
  ui::detail(&format!("{DIM}{command}{RESET}"));
  let mut cmd = Command::new("sh");
  cmd.args(["-c", command]);
  cmd.current_dir(base_dir);
  for (k, v) in env {
    cmd.env(k, v);
  }
  let output = cmd.output().with_context(|| format!("failed to run {label}"))?;
  let stdout = filter_lines(&String::from_utf8_lossy(&output.stdout), &keep);
  let stderr = filter_lines(&String::from_utf8_lossy(&output.stderr), &keep);
  if !output.status.success() {
    let mut msg = format!("{label} exited with status {}", output.status);
    if !stderr.is_empty() {
      msg.push('\n');
      msg.push_str(&stderr.join("\n"));
    }
    if !stdout.is_empty() {
      msg.push('\n');
      msg.push_str(&stdout.join("\n"));
    }
    bail!("{msg}");
  }
  tracing::trace!(label, lines = stdout.len(), "command output");
  Ok(stderr)
}

fn filter_lines(text: &str, keep: &impl Fn(&str) -> bool) -> Vec<String> {
  text.lines().filter(|l| !l.trim().is_empty() && keep(l)).map(str::to_string).collect()
}

/// Check if a command exists on PATH.
pub(crate) fn which_exists(cmd: &str) -> bool {
  Command::new("which")
    .arg(cmd)
    .stdout(std::process::Stdio::null())
    .stderr(std::process::Stdio::null())
    .status()
    .map(|s| s.success())
    .unwrap_or(false)
}

/// JS runtime for out-of-process work: the override when set, else bun if
/// installed, else node.
pub(crate) fn js_runtime(preferred: Option<&str>) -> String {
  match preferred {
    Some(rt) => rt.to_string(),
    None if which_exists("bun") => "bun".to_string(),
    None => "node".to_string(),
  }
}
