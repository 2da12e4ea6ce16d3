/* src/server/core/rust/src/loader/evaluator.rs */

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde_json::Value;

/// Evaluates a code-module configuration file and hands back its default
/// export as JSON.
pub trait ModuleEvaluator {
  /// Drop any cached copy of `paths` so the next `evaluate` reads disk.
  fn invalidate(&mut self, _paths: &[PathBuf]) {}

  fn evaluate(&mut self, path: &Path) -> Result<Value, EvalError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EvalError {
  #[error("no JavaScript runtime found on PATH (install bun or node)")]
  NoRuntime,

  #[error("failed to run {runtime}: {source}")]
  Spawn { runtime: String, source: std::io::Error },

  #[error("{runtime} exited with {status}: {stderr}")]
  Failed { runtime: String, status: std::process::ExitStatus, stderr: String },

  #[error("module has no default export")]
  NoDefaultExport,

  #[error("default export is not JSON-serializable: {0}")]
  Output(String),
}

/// Marks where the JSON payload starts, so stray `console.log` output from
/// the module cannot corrupt it.
const PAYLOAD_MARKER: &str = "\u{1e}FOLIO_CONFIG\u{1e}";

/// Exit code the script uses for a missing default export.
const NO_DEFAULT_EXIT: i32 = 3;

const EVAL_SCRIPT: &str = r#"
const { pathToFileURL } = await import("node:url");
const url = pathToFileURL(process.env.FOLIO_MODULE_PATH).href + "?t=" + process.env.FOLIO_MODULE_TOKEN;
const mod = await import(url);
if (mod.default === undefined) process.exit(3);
process.stdout.write(process.env.FOLIO_MODULE_MARKER + JSON.stringify(mod.default));
"#;

/// Evaluates modules in a fresh bun or node process per call, so every
/// evaluation observes the current file contents.
#[derive(Debug, Clone, Default)]
pub struct ScriptEvaluator {
  runtime: Option<String>,
  generation: u64,
}

impl ScriptEvaluator {
  /// Auto-detect the runtime: bun when on PATH, otherwise node.
  pub fn new() -> Self {
    Self::default()
  }

  /// Always use `runtime` (`bun` or `node`, or a path to either).
  pub fn with_runtime(runtime: impl Into<String>) -> Self {
    Self { runtime: Some(runtime.into()), generation: 0 }
  }

  fn pick_runtime(&self) -> Result<String, EvalError> {
    if let Some(rt) = &self.runtime {
      return Ok(rt.clone());
    }
    ["bun", "node"]
      .into_iter()
      .find(|cmd| which_exists(cmd))
      .map(str::to_string)
      .ok_or(EvalError::NoRuntime)
  }
}

impl ModuleEvaluator for ScriptEvaluator {
  fn invalidate(&mut self, paths: &[PathBuf]) {
    self.generation += 1;
    tracing::trace!(count = paths.len(), generation = self.generation, "module cache invalidated");
  }

  fn evaluate(&mut self, path: &Path) -> Result<Value, EvalError> {
    let runtime = self.pick_runtime()?;
    let is_bun = Path::new(&runtime).file_stem().is_some_and(|s| s == "bun");

    let mut cmd = Command::new(&runtime);
    if is_bun {
      cmd.arg("-e");
    } else {
      cmd.arg("--input-type=module");
      if is_typescript(path) {
        cmd.arg("--experimental-strip-types");
      }
      cmd.arg("-e");
    }
    cmd.arg(EVAL_SCRIPT);
    if let Some(dir) = path.parent() {
      cmd.current_dir(dir);
    }
    cmd
      .env("FOLIO_MODULE_PATH", path)
      .env("FOLIO_MODULE_TOKEN", self.generation.to_string())
      .env("FOLIO_MODULE_MARKER", PAYLOAD_MARKER)
      .stdin(Stdio::null());

    tracing::debug!(%runtime, module = %path.display(), "evaluating config module");
    let output =
      cmd.output().map_err(|source| EvalError::Spawn { runtime: runtime.clone(), source })?;

    if output.status.code() == Some(NO_DEFAULT_EXIT) {
      return Err(EvalError::NoDefaultExport);
    }
    if !output.status.success() {
      return Err(EvalError::Failed {
        runtime,
        status: output.status,
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      });
    }
    parse_payload(&String::from_utf8_lossy(&output.stdout))
  }
}

fn parse_payload(stdout: &str) -> Result<Value, EvalError> {
  let Some((_, json)) = stdout.rsplit_once(PAYLOAD_MARKER) else {
    // JSON.stringify of a function or symbol prints nothing
    return Err(EvalError::Output("no value was printed".into()));
  };
  serde_json::from_str(json).map_err(|e| EvalError::Output(e.to_string()))
}

fn is_typescript(path: &Path) -> bool {
  path.extension().is_some_and(|ext| ext == "ts" || ext == "mts" || ext == "tsx")
}

fn which_exists(cmd: &str) -> bool {
  Command::new("which")
    .arg(cmd)
    .stdout(Stdio::null())
    .stderr(Stdio::null())
    .status()
    .map(|s| s.success())
    .unwrap_or(false)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn payload_after_marker_wins_over_logs() {
    let out = format!("debug line\n{PAYLOAD_MARKER}{{\"locales\":{{}}}}");
    assert_eq!(parse_payload(&out).unwrap(), serde_json::json!({ "locales": {} }));
  }

  #[test]
  fn missing_marker_is_an_output_error() {
    assert!(matches!(parse_payload("hello"), Err(EvalError::Output(_))));
  }

  #[test]
  fn typescript_detection() {
    assert!(is_typescript(Path::new("/site/config.ts")));
    assert!(!is_typescript(Path::new("/site/config.js")));
  }

  #[test]
  fn invalidate_bumps_cache_token() {
    let mut eval = ScriptEvaluator::with_runtime("node");
    eval.invalidate(&[PathBuf::from("/site/config.ts")]);
    eval.invalidate(&[]);
    assert_eq!(eval.generation, 2);
  }
}
