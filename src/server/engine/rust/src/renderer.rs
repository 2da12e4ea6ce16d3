/* src/server/engine/rust/src/renderer.rs */

use folio_core::Configuration;

use crate::error::RenderError;
use crate::html;
use crate::locale::locale_for_url;
use crate::meta::PageMeta;

/// Turns one locale of a resolved configuration into page markup.
///
/// `meta` is the page's metadata sink: whatever the renderer sets there
/// overrides the locale's own title/description/lang for this page only.
pub trait Renderer {
  fn render(
    &mut self,
    url: &str,
    config: &Configuration,
    meta: &mut PageMeta,
  ) -> Result<String, RenderError>;
}

/// Native renderer: semantic HTML straight from the configuration tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRenderer;

impl Renderer for StaticRenderer {
  fn render(
    &mut self,
    url: &str,
    config: &Configuration,
    meta: &mut PageMeta,
  ) -> Result<String, RenderError> {
    let key = locale_for_url(config, url)
      .ok_or_else(|| RenderError::UnknownLocale { url: url.to_string() })?;
    let locale = &config.locales[key];
    tracing::debug!(url, locale = key, sections = locale.sections.len(), "rendering page");

    meta.title = locale.title.clone();
    meta.description = locale.description.clone();
    meta.lang = locale.lang.clone();

    Ok(html::render_locale(config, key, locale))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn config() -> Configuration {
    serde_json::from_value(json!({
      "locales": {
        "/": { "title": "Home", "lang": "en", "hero": { "name": "Ada" }, "sections": [] },
        "/zh/": { "title": "Zhu", "hero": { "name": "Ada" }, "sections": [] }
      }
    }))
    .unwrap()
  }

  #[test]
  fn fills_meta_from_locale() {
    let mut meta = PageMeta::default();
    StaticRenderer.render("/zh/", &config(), &mut meta).unwrap();
    assert_eq!(meta.title.as_deref(), Some("Zhu"));
    assert_eq!(meta.lang, None);
  }

  #[test]
  fn meta_does_not_leak_between_pages() {
    let config = config();
    let mut first = PageMeta::default();
    StaticRenderer.render("/", &config, &mut first).unwrap();
    let mut second = PageMeta::default();
    StaticRenderer.render("/zh/", &config, &mut second).unwrap();
    assert_eq!(first.lang.as_deref(), Some("en"));
    assert_eq!(second.lang, None);
  }

  #[test]
  fn unknown_locale_errors() {
    let config: Configuration =
      serde_json::from_value(json!({ "locales": { "/en/": { "hero": { "name": "A" } } } })).unwrap();
    let err = StaticRenderer.render("/fr/", &config, &mut PageMeta::default()).unwrap_err();
    assert!(matches!(err, RenderError::UnknownLocale { .. }));
  }
}
