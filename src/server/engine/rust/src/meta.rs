/* src/server/engine/rust/src/meta.rs */

use folio_core::LocaleConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Portfolio";
pub const DEFAULT_DESCRIPTION: &str = "Portfolio Template";

/// Head metadata a renderer reports for the page it just rendered.
/// Passed by `&mut` into every render call so nothing is shared between
/// pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lang: Option<String>,
}

/// Metadata that actually lands in the page head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMeta {
  pub title: String,
  pub description: String,
  pub lang: Option<String>,
}

impl PageMeta {
  /// Fill gaps from the locale, then from the site-wide defaults.
  pub fn resolve(&self, locale: &LocaleConfig) -> ResolvedMeta {
    ResolvedMeta {
      title: self
        .title
        .clone()
        .or_else(|| locale.title.clone())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
      description: self
        .description
        .clone()
        .or_else(|| locale.description.clone())
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
      lang: self.lang.clone().or_else(|| locale.lang.clone()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn locale(v: serde_json::Value) -> LocaleConfig {
    serde_json::from_value(v).unwrap()
  }

  #[test]
  fn defaults_when_nothing_set() {
    let meta = PageMeta::default().resolve(&locale(json!({ "hero": { "name": "A" } })));
    assert_eq!(meta.title, "Portfolio");
    assert_eq!(meta.description, "Portfolio Template");
    assert_eq!(meta.lang, None);
  }

  #[test]
  fn locale_then_sink_precedence() {
    let loc = locale(json!({
      "hero": { "name": "A" }, "title": "Locale", "description": "Desc", "lang": "en"
    }));
    let from_locale = PageMeta::default().resolve(&loc);
    assert_eq!(from_locale.title, "Locale");
    assert_eq!(from_locale.lang.as_deref(), Some("en"));

    let sink = PageMeta { title: Some("Rendered".into()), ..Default::default() };
    let resolved = sink.resolve(&loc);
    assert_eq!(resolved.title, "Rendered");
    assert_eq!(resolved.description, "Desc");
  }
}
