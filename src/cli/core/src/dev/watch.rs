/* src/cli/core/src/dev/watch.rs */

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio_core::CONFIG_FILES;
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc::Receiver;

/// Paths whose changes end a dev generation.
#[derive(Debug, Clone)]
pub(super) struct WatchSet {
  root: PathBuf,
  files: HashSet<PathBuf>,
  dirs: Vec<PathBuf>,
}

impl WatchSet {
  /// `deps` come from the dependency grapher; `extra` are `dev.watch`
  /// entries relative to `root` (missing ones are ignored).
  pub fn new(root: &Path, deps: impl IntoIterator<Item = PathBuf>, extra: &[String]) -> Self {
    let dirs = extra.iter().map(|d| root.join(d)).filter(|d| d.is_dir()).collect();
    Self { root: root.to_path_buf(), files: deps.into_iter().collect(), dirs }
  }

  pub fn is_relevant(&self, path: &Path) -> bool {
    if self.files.contains(path) || self.dirs.iter().any(|d| path.starts_with(d)) {
      return true;
    }
    // A candidate appearing or disappearing can change which file wins
    path.parent() == Some(self.root.as_path())
      && path.file_name().and_then(|n| n.to_str()).is_some_and(|n| CONFIG_FILES.contains(&n))
  }

  /// Directories to register: the root and each dependency's parent
  /// non-recursively, extra directories recursively. Watching parents
  /// rather than files survives editors that save by rename.
  fn registrations(&self) -> Vec<(PathBuf, RecursiveMode)> {
    let mut flat: BTreeSet<PathBuf> = BTreeSet::new();
    flat.insert(self.root.clone());
    for file in &self.files {
      if let Some(parent) = file.parent().filter(|p| p.is_dir()) {
        flat.insert(parent.to_path_buf());
      }
    }
    let mut out: Vec<_> = flat
      .into_iter()
      .filter(|d| !self.dirs.iter().any(|w| d.starts_with(w)))
      .map(|d| (d, RecursiveMode::NonRecursive))
      .collect();
    out.extend(self.dirs.iter().map(|d| (d.clone(), RecursiveMode::Recursive)));
    out
  }

  /// Display names for the banner.
  pub fn describe(&self) -> Vec<String> {
    let rel = |p: &Path| p.strip_prefix(&self.root).unwrap_or(p).display().to_string();
    let mut names: Vec<String> = self.files.iter().map(|f| rel(f)).collect();
    names.sort();
    names.extend(self.dirs.iter().map(|d| format!("{}/", rel(d))));
    names
  }
}

fn is_content_change(event: &Event) -> bool {
  match event.kind {
    EventKind::Modify(ModifyKind::Metadata(_)) => false,
    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => true,
    _ => false,
  }
}

pub(super) fn setup_watcher(set: &WatchSet) -> Result<(RecommendedWatcher, Receiver<()>)> {
  let (tx, rx) = tokio::sync::mpsc::channel(16);
  let filter = set.clone();
  let mut watcher = RecommendedWatcher::new(
    move |res: std::result::Result<Event, notify::Error>| match res {
      Ok(event) if is_content_change(&event) && event.paths.iter().any(|p| filter.is_relevant(p)) => {
        let _ = tx.blocking_send(());
      }
      Ok(_) => {}
      Err(e) => tracing::warn!(error = %e, "watch error"),
    },
    notify::Config::default(),
  )?;
  for (dir, mode) in set.registrations() {
    watcher.watch(&dir, mode).with_context(|| format!("failed to watch {}", dir.display()))?;
  }
  Ok((watcher, rx))
}
