/* src/server/engine/rust/src/locale.rs */

use folio_core::Configuration;

/// Root locale key.
pub const ROOT_LOCALE: &str = "/";

/// Locale key serving `url`: the longest non-root key that prefixes it,
/// else the root key. `None` only when the root key is also missing.
pub fn locale_for_url<'a>(config: &'a Configuration, url: &str) -> Option<&'a str> {
  config
    .locale_paths()
    .filter(|path| *path != ROOT_LOCALE && url.starts_with(path))
    .max_by_key(|path| path.len())
    .or_else(|| config.locales.get_key_value(ROOT_LOCALE).map(|(k, _)| k.as_str()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn config() -> Configuration {
    serde_json::from_value(json!({
      "locales": {
        "/": { "hero": { "name": "A" } },
        "/zh/": { "hero": { "name": "A" } },
        "/zh/tw/": { "hero": { "name": "A" } }
      }
    }))
    .unwrap()
  }

  #[test]
  fn exact_and_nested_urls() {
    let c = config();
    assert_eq!(locale_for_url(&c, "/"), Some("/"));
    assert_eq!(locale_for_url(&c, "/zh/"), Some("/zh/"));
    assert_eq!(locale_for_url(&c, "/zh/about"), Some("/zh/"));
  }

  #[test]
  fn longest_prefix_wins() {
    assert_eq!(locale_for_url(&config(), "/zh/tw/"), Some("/zh/tw/"));
  }

  #[test]
  fn unmatched_falls_back_to_root() {
    assert_eq!(locale_for_url(&config(), "/fr/"), Some("/"));
    assert_eq!(locale_for_url(&config(), "/zh"), Some("/"));
  }

  #[test]
  fn no_root_and_no_match() {
    let c: Configuration =
      serde_json::from_value(json!({ "locales": { "/en/": { "hero": { "name": "A" } } } })).unwrap();
    assert_eq!(locale_for_url(&c, "/fr/"), None);
    assert_eq!(locale_for_url(&c, "/en/"), Some("/en/"));
  }
}
