/* src/cli/core/src/build/script.rs */

// Renderer backed by a server bundle: runs `render(url, config)` from the
// bundle's entry module in a JS runtime, one process per page.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use folio_core::Configuration;
use folio_engine::{PageMeta, RenderError, Renderer};
use serde::Deserialize;

const PAYLOAD_MARKER: &str = "\u{1e}FOLIO_PAGE\u{1e}";

// `render` may return the markup string or `{ html, meta }`
const RENDER_SCRIPT: &str = r#"
const { pathToFileURL } = await import("node:url");
let input = "";
for await (const chunk of process.stdin) input += chunk;
const config = JSON.parse(input);
const mod = await import(pathToFileURL(process.env.FOLIO_SERVER_ENTRY).href);
if (typeof mod.render !== "function") {
  console.error("server entry does not export a render function");
  process.exit(2);
}
const out = await mod.render(process.env.FOLIO_RENDER_URL, config);
const page = typeof out === "string" ? { html: out, meta: {} } : { html: out?.html ?? "", meta: out?.meta ?? {} };
process.stdout.write(process.env.FOLIO_PAGE_MARKER + JSON.stringify(page));
"#;

#[derive(Debug, Deserialize)]
struct RenderedPage {
  html: String,
  #[serde(default)]
  meta: PageMeta,
}

pub(crate) struct ScriptRenderer {
  entry: PathBuf,
  runtime: String,
}

impl ScriptRenderer {
  pub fn new(entry: PathBuf, runtime: String) -> Self {
    Self { entry, runtime }
  }

  fn command(&self) -> Command {
    let mut cmd = Command::new(&self.runtime);
    let is_bun = Path::new(&self.runtime).file_stem().is_some_and(|s| s == "bun");
    if !is_bun {
      cmd.arg("--input-type=module");
    }
    cmd.args(["-e", RENDER_SCRIPT]);
    cmd
  }
}

impl Renderer for ScriptRenderer {
  fn render(
    &mut self,
    url: &str,
    config: &Configuration,
    meta: &mut PageMeta,
  ) -> Result<String, RenderError> {
    let failed = |message: String| RenderError::Failed { url: url.to_string(), message };
    if !self.entry.is_file() {
      return Err(failed(format!("server entry {} does not exist", self.entry.display())));
    }
    let input = serde_json::to_vec(config).map_err(|e| failed(e.to_string()))?;

    let mut child = self
      .command()
      .env("FOLIO_SERVER_ENTRY", &self.entry)
      .env("FOLIO_RENDER_URL", url)
      .env("FOLIO_PAGE_MARKER", PAYLOAD_MARKER)
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()
      .map_err(|e| failed(format!("failed to start {}: {e}", self.runtime)))?;

    if let Some(mut stdin) = child.stdin.take() {
      stdin.write_all(&input).map_err(|e| failed(e.to_string()))?;
    }
    let output = child.wait_with_output().map_err(|e| failed(e.to_string()))?;
    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(failed(format!("{} exited with {}: {}", self.runtime, output.status, stderr.trim())));
    }

    let page = parse_page(&String::from_utf8_lossy(&output.stdout)).map_err(failed)?;
    *meta = page.meta;
    Ok(page.html)
  }
}

fn parse_page(stdout: &str) -> Result<RenderedPage, String> {
  let (_, json) =
    stdout.rsplit_once(PAYLOAD_MARKER).ok_or_else(|| "render produced no output".to_string())?;
  serde_json::from_str(json).map_err(|e| format!("invalid render output: {e}"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_page_after_console_noise() {
    let out = format!(
      "hydration warning\n{PAYLOAD_MARKER}{{\"html\":\"<p>x</p>\",\"meta\":{{\"title\":\"T\"}}}}"
    );
    let page = parse_page(&out).unwrap();
    assert_eq!(page.html, "<p>x</p>");
    assert_eq!(page.meta.title.as_deref(), Some("T"));
    assert_eq!(page.meta.description, None);
  }

  #[test]
  fn meta_is_optional() {
    let page = parse_page(&format!("{PAYLOAD_MARKER}{{\"html\":\"\"}}")).unwrap();
    assert_eq!(page.meta, PageMeta::default());
  }

  #[test]
  fn missing_entry_is_a_render_error() {
    let tmp = tempfile::tempdir().unwrap();
    let mut renderer = ScriptRenderer::new(tmp.path().join("entry-server.js"), "node".into());
    let config: Configuration = serde_json::from_value(serde_json::json!({
      "locales": { "/": { "hero": { "name": "A" } } }
    }))
    .unwrap();
    let err = renderer.render("/", &config, &mut PageMeta::default()).unwrap_err();
    assert!(err.to_string().contains("does not exist"), "{err}");
  }
}
