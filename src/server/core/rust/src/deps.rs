/* src/server/core/rust/src/deps.rs */

//! Local source files a code-module configuration depends on.
//!
//! Imports are found with a textual pattern rather than a parser: relative
//! `import`/`export ... from` specifiers and side-effect imports are
//! followed, dynamic `import()` calls and bare package specifiers are not.
//! An import clause never spans a `;` or a quote, so one statement cannot
//! swallow the next. Unreadable files are skipped.

use std::collections::{HashSet, VecDeque};
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use indexmap::IndexSet;
use regex::Regex;

use crate::loader::find_config_file;

/// Extensions whose contents are scanned for imports.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx", "mjs", "cjs"];

/// Suffixes tried, in order, when resolving an import specifier.
const RESOLVE_SUFFIXES: &[&str] = &["", ".ts", ".js", ".tsx", ".jsx", ".json"];

/// Package-manager directory; anything under it is not watched.
const EXTERNAL_DIR: &str = "node_modules";

fn import_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| {
    Regex::new(r#"(?:import|export)(?:\s+|[^;'"]*?\bfrom\s+)['"](\.[^'"]+)['"]"#).unwrap()
  })
}

/// Breadth-first closure of local files reachable from the configuration
/// entry file in `root`, entry first. Empty when no entry file exists.
pub fn config_dependencies(root: &Path) -> IndexSet<PathBuf> {
  let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
  match find_config_file(&root) {
    Some(entry) => collect_dependencies(&entry),
    None => IndexSet::new(),
  }
}

/// Breadth-first closure of local files reachable from `entry`.
pub fn collect_dependencies(entry: &Path) -> IndexSet<PathBuf> {
  let mut found = IndexSet::new();
  let mut visited = HashSet::new();
  let mut queue = VecDeque::from([normalize(entry)]);

  while let Some(file) = queue.pop_front() {
    if !visited.insert(file.clone()) {
      continue;
    }
    found.insert(file.clone());

    if !is_source_file(&file) {
      continue;
    }
    let content = match std::fs::read_to_string(&file) {
      Ok(c) => c,
      Err(e) => {
        tracing::debug!(file = %file.display(), error = %e, "skipping unreadable dependency");
        continue;
      }
    };
    let dir = file.parent().unwrap_or(Path::new(""));
    for spec in scan_imports(&content) {
      if let Some(resolved) = resolve_import(dir, spec) {
        if is_external(&resolved) {
          tracing::trace!(file = %resolved.display(), "ignoring package dependency");
          continue;
        }
        queue.push_back(resolved);
      }
    }
  }

  found
}

/// Relative specifiers of every `import`/`export` statement in `source`.
pub fn scan_imports(source: &str) -> Vec<&str> {
  import_re()
    .captures_iter(source)
    .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
    .collect()
}

/// Resolve a relative specifier against `dir`: the literal path, then each
/// suffix in `RESOLVE_SUFFIXES`, then a `.ts` sibling of a `.js` specifier.
pub fn resolve_import(dir: &Path, spec: &str) -> Option<PathBuf> {
  if !spec.starts_with('.') {
    return None;
  }
  let base = normalize(&dir.join(spec));
  let base_str = base.to_string_lossy();

  for suffix in RESOLVE_SUFFIXES {
    let candidate = PathBuf::from(format!("{base_str}{suffix}"));
    if candidate.is_file() {
      return Some(candidate);
    }
  }

  if let Some(stem) = base_str.strip_suffix(".js") {
    let candidate = PathBuf::from(format!("{stem}.ts"));
    if candidate.is_file() {
      return Some(candidate);
    }
  }
  None
}

fn is_source_file(path: &Path) -> bool {
  path.extension().and_then(|e| e.to_str()).is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn is_external(path: &Path) -> bool {
  path.components().any(|c| c.as_os_str() == EXTERNAL_DIR)
}

/// Lexically remove `.` and `..` components so one file has one spelling.
fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        if !out.pop() {
          out.push("..");
        }
      }
      other => out.push(other.as_os_str()),
    }
  }
  out
}
