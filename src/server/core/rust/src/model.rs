/* src/server/core/rust/src/model.rs */

// Site configuration tree as authored in config.{ts,js,json,yml,yaml}.
// Field names serialize in camelCase so the embedded constant matches
// what the client bundle reads.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use crate::section::{
  BannerAction, BannerData, CardItem, ExperienceItem, FieldValue, GalleryItem, ListEntry,
  ListItem, MarkdownData, ProfileContact, ProfileData, ProfileField, Scalar, Section, SectionKind,
  Tags, TimelineItem,
};

/// Root configuration: locale path key -> page definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
  pub locales: IndexMap<String, LocaleConfig>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub experience_styles: Option<IndexMap<String, ExperienceStyle>>,
  /// Global settings this crate does not interpret, kept verbatim.
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Configuration {
  /// First declared locale key; the site's default page.
  pub fn default_locale(&self) -> Option<&str> {
    self.locales.keys().next().map(String::as_str)
  }

  pub fn locale_paths(&self) -> impl Iterator<Item = &str> {
    self.locales.keys().map(String::as_str)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleConfig {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lang: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lang_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub hero: HeroConfig,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub navbar: Option<NavbarConfig>,
  /// Rendering order. Older configs call this `contents`.
  #[serde(default, alias = "contents")]
  pub sections: Vec<Section>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub footer: Option<FooterConfig>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ui: Option<UiLabels>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroConfig {
  pub name: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub welcome: String,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub titles: Vec<String>,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub avatar: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub bg_image: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub medias: Option<Vec<HeroMedia>>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroMedia {
  pub icon: String,
  pub name: String,
  pub link: String,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavbarConfig {
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub links: Vec<NavLink>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavLink {
  pub label: String,
  pub anchor: String,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooterConfig {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub copyright: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiLabels {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub theme_toggle: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub contact: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Per experience-type presentation preset (`work`, `study`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceStyle {
  pub background: String,
  pub icon: String,
  pub icon_box: String,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn minimal() -> Value {
    json!({
      "locales": {
        "/": { "hero": { "name": "Ada" }, "sections": [] },
        "/zh/": { "hero": { "name": "Ada" }, "sections": [] }
      }
    })
  }

  #[test]
  fn default_locale_is_first_key() {
    let config: Configuration = serde_json::from_value(minimal()).unwrap();
    assert_eq!(config.default_locale(), Some("/"));
    assert_eq!(config.locale_paths().collect::<Vec<_>>(), vec!["/", "/zh/"]);
  }

  #[test]
  fn locale_order_follows_source() {
    let config: Configuration = serde_json::from_str(
      r#"{"locales":{"/zh/":{"hero":{"name":"a"}},"/":{"hero":{"name":"b"}}}}"#,
    )
    .unwrap();
    assert_eq!(config.default_locale(), Some("/zh/"));
  }

  #[test]
  fn legacy_contents_key_accepted() {
    let locale: LocaleConfig = serde_json::from_value(json!({
      "hero": { "name": "Ada" },
      "contents": [{ "id": "about", "type": "paragraph", "data": "hi" }]
    }))
    .unwrap();
    assert_eq!(locale.sections.len(), 1);
  }

  #[test]
  fn hero_is_required() {
    let err = serde_json::from_value::<LocaleConfig>(json!({ "sections": [] })).unwrap_err();
    assert!(err.to_string().contains("hero"));
  }

  #[test]
  fn unknown_keys_survive_round_trip() {
    let input = json!({
      "theme": { "accent": "indigo" },
      "experienceStyles": {
        "work": { "background": "bg-emerald-600", "icon": "briefcase", "iconBox": "bg-emerald-50" }
      },
      "locales": {
        "/": { "langName": "English", "hero": { "name": "Ada", "bgImage": "/bg.jpg" }, "analytics": "x" }
      }
    });
    let config: Configuration = serde_json::from_value(input).unwrap();
    assert_eq!(config.extra["theme"], json!({ "accent": "indigo" }));
    let out = serde_json::to_value(&config).unwrap();
    assert_eq!(out["theme"]["accent"], "indigo");
    assert_eq!(out["experienceStyles"]["work"]["iconBox"], "bg-emerald-50");
    assert_eq!(out["locales"]["/"]["langName"], "English");
    assert_eq!(out["locales"]["/"]["hero"]["bgImage"], "/bg.jpg");
    assert_eq!(out["locales"]["/"]["analytics"], "x");
  }
}
