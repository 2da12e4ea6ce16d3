/* src/cli/core/src/dev/preview.rs */

// In-memory preview server: every locale prerendered with the builtin
// renderer, swapped wholesale on each successful generation.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use folio_core::Configuration;
use folio_engine::{PageMeta, Renderer, StaticRenderer, assemble_page, locale_for_url};
use tokio::sync::RwLock;
use tower_http::services::ServeDir;

use crate::build::BuildPlan;

/// Template used when neither the source nor the built template exists.
fn fallback_shell(placeholder: &str) -> String {
  format!(
    "<!DOCTYPE html>\n<html>\n  <head>\n    <meta charset=\"UTF-8\" />\n    <title>Portfolio</title>\n  </head>\n  <body>\n    <div id=\"root\">{placeholder}</div>\n  </body>\n</html>\n"
  )
}

/// One generation's rendered site.
#[derive(Debug, Default)]
pub(super) struct PageTable {
  config: Option<Configuration>,
  pages: HashMap<String, String>,
}

impl PageTable {
  /// Page for a request path: the longest locale prefix, else `/`.
  pub fn lookup(&self, path: &str) -> Option<&str> {
    let config = self.config.as_ref()?;
    let url = if path.ends_with('/') { path.to_string() } else { format!("{path}/") };
    let key = locale_for_url(config, &url)?;
    self.pages.get(key).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.pages.len()
  }
}

/// Prerender every locale against the first template that exists.
pub(super) fn render_pages(plan: &BuildPlan, site: Configuration) -> Result<PageTable> {
  let template = [&plan.template, &plan.source_template]
    .into_iter()
    .find(|p| p.is_file())
    .map(|p| std::fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display())))
    .transpose()?
    .unwrap_or_else(|| fallback_shell(&plan.placeholder));
  let constant = serde_json::to_value(&site).context("failed to serialize configuration")?;

  let mut pages = HashMap::with_capacity(site.locales.len());
  for (key, locale) in &site.locales {
    let mut meta = PageMeta::default();
    let markup = StaticRenderer
      .render(key, &site, &mut meta)
      .with_context(|| format!("failed to render locale {key}"))?;
    let html = assemble_page(&template, &plan.placeholder, &markup, &meta.resolve(locale), &constant);
    pages.insert(key.clone(), html);
  }
  Ok(PageTable { config: Some(site), pages })
}

#[derive(Clone)]
struct PreviewState {
  table: Arc<RwLock<PageTable>>,
}

async fn page_handler(State(state): State<PreviewState>, uri: Uri) -> Response {
  let table = state.table.read().await;
  match table.lookup(uri.path()) {
    Some(html) => Html(html.to_string()).into_response(),
    None => (StatusCode::NOT_FOUND, "no locale serves this path").into_response(),
  }
}

pub(super) struct PreviewServer {
  table: Arc<RwLock<PageTable>>,
  pub port: u16,
}

impl PreviewServer {
  /// Bind the first free port at or above `port` and serve in the background.
  pub async fn start(host: &str, port: u16, out_dir: &Path) -> Result<Self> {
    let (listener, port) = bind(host, port).await?;
    let table = Arc::new(RwLock::new(PageTable::default()));
    let state = PreviewState { table: Arc::clone(&table) };
    let app = Router::new()
      .nest_service("/assets", ServeDir::new(out_dir.join("assets")))
      .fallback(page_handler)
      .with_state(state);
    tokio::spawn(async move {
      if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "preview server stopped");
      }
    });
    Ok(Self { table, port })
  }

  pub async fn swap(&self, next: PageTable) {
    tracing::debug!(pages = next.len(), "swapping page table");
    *self.table.write().await = next;
  }
}

async fn bind(host: &str, preferred: u16) -> Result<(tokio::net::TcpListener, u16)> {
  for port in preferred..preferred.saturating_add(100) {
    match tokio::net::TcpListener::bind(format!("{host}:{port}")).await {
      Ok(listener) => return Ok((listener, port)),
      Err(e) => tracing::debug!(port, error = %e, "port unavailable"),
    }
  }
  anyhow::bail!("no available port found in range {preferred}-{}", preferred.saturating_add(99))
}
