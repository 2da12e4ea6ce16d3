/* src/server/injector/rust/src/path.rs */

use std::path::{Path, PathBuf};

/// Output file for a locale key: `/` is `<out>/index.html`, any other key
/// is a directory under `out_dir` holding `index.html`.
///
/// Empty, `.` and `..` segments are dropped so a key can never point
/// outside `out_dir`.
pub fn locale_output_path(out_dir: &Path, locale: &str) -> PathBuf {
  let mut path = out_dir.to_path_buf();
  for segment in locale.split('/') {
    if segment.is_empty() || segment == "." || segment == ".." {
      continue;
    }
    path.push(segment);
  }
  path.join("index.html")
}

/// Public URL path for a locale key, always with leading and trailing `/`.
pub fn locale_url(locale: &str) -> String {
  let trimmed = locale.trim_matches('/');
  if trimmed.is_empty() { "/".to_string() } else { format!("/{trimmed}/") }
}
