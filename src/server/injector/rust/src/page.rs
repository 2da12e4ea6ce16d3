/* src/server/injector/rust/src/page.rs */

// String-level edits on a built HTML template. Every function returns the
// input unchanged when the marker it looks for is absent.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::helpers::{escape_html, script_safe_json};

/// Placeholder the client build leaves where page markup goes.
pub const APP_PLACEHOLDER: &str = "<!--app-html-->";

/// Global the client bundle reads the site configuration from.
pub const CONFIG_GLOBAL: &str = "window.__CONFIG__";

fn title_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"(?is)<title>.*?</title>").unwrap())
}

fn description_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| {
    Regex::new(r#"(?i)\s*<meta\s+name\s*=\s*["']description["'][^>]*>"#).unwrap()
  })
}

fn html_open_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"(?i)<html\b([^>]*)>").unwrap())
}

fn lang_attr_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r#"(?i)\s+lang\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).unwrap())
}

/// Replace the first occurrence of `placeholder` with `markup`.
pub fn inject_app_html(template: &str, placeholder: &str, markup: &str) -> String {
  if placeholder.is_empty() {
    return template.to_string();
  }
  template.replacen(placeholder, markup, 1)
}

/// Rewrite the first `<title>` element. Templates without one are unchanged.
pub fn inject_title(html: &str, title: &str) -> String {
  let replacement = format!("<title>{}</title>", escape_html(title));
  title_re().replace(html, regex::NoExpand(&replacement)).into_owned()
}

/// Rewrite `<title>` and place a meta description right after it,
/// replacing any description the template already carries.
pub fn inject_title_and_description(html: &str, title: &str, description: &str) -> String {
  if !title_re().is_match(html) {
    return html.to_string();
  }
  let without_meta = description_re().replace_all(html, "");
  let replacement = format!(
    "<title>{}</title>\n    <meta name=\"description\" content=\"{}\" />",
    escape_html(title),
    escape_html(description)
  );
  title_re().replace(&without_meta, regex::NoExpand(&replacement)).into_owned()
}

/// Set `<html lang="...">`, replacing an existing `lang` attribute.
pub fn inject_html_lang(html: &str, lang: &str) -> String {
  html_open_re()
    .replace(html, |caps: &Captures| {
      let attrs = lang_attr_re().replace_all(&caps[1], "");
      format!("<html lang=\"{}\"{attrs}>", escape_html(lang))
    })
    .into_owned()
}

/// Embed the configuration as a script assigning `window.__CONFIG__`,
/// inserted before `</head>`.
pub fn inject_config_script(html: &str, config: &Value) -> String {
  let script = format!("<script>{CONFIG_GLOBAL} = {};</script>", script_safe_json(&config.to_string()));
  match html.rfind("</head>") {
    Some(pos) => {
      let mut result = String::with_capacity(html.len() + script.len());
      result.push_str(&html[..pos]);
      result.push_str(&script);
      result.push_str(&html[pos..]);
      result
    }
    None => html.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  const TEMPLATE: &str = "<!doctype html>\n<html>\n  <head>\n    <title>Vite App</title>\n  </head>\n  <body><div id=\"root\"><!--app-html--></div></body>\n</html>\n";

  #[test]
  fn app_html_replaces_placeholder_once() {
    let html = inject_app_html("<a><!--app-html--></a><!--app-html-->", APP_PLACEHOLDER, "<p>x</p>");
    assert_eq!(html, "<a><p>x</p></a><!--app-html-->");
  }

  #[test]
  fn app_html_without_placeholder_is_unchanged() {
    assert_eq!(inject_app_html("<body></body>", APP_PLACEHOLDER, "<p/>"), "<body></body>");
    assert_eq!(inject_app_html("<body></body>", "", "<p/>"), "<body></body>");
  }

  #[test]
  fn title_is_replaced_and_escaped() {
    let html = inject_title(TEMPLATE, "Ada & <Co>");
    assert!(html.contains("<title>Ada &amp; &lt;Co&gt;</title>"));
    assert!(!html.contains("Vite App"));
  }

  #[test]
  fn title_with_dollar_is_literal() {
    let html = inject_title("<title>x</title>", "$1 costs $0");
    assert_eq!(html, "<title>$1 costs $0</title>");
  }

  #[test]
  fn title_and_description() {
    let html = inject_title_and_description(TEMPLATE, "Ada", "Rust \"person\"");
    assert!(html.contains(
      "<title>Ada</title>\n    <meta name=\"description\" content=\"Rust &quot;person&quot;\" />"
    ));
  }

  #[test]
  fn existing_description_is_replaced() {
    let tpl = "<head><title>t</title>\n<meta name=\"description\" content=\"old\"></head>";
    let html = inject_title_and_description(tpl, "New", "fresh");
    assert_eq!(html.matches("name=\"description\"").count(), 1);
    assert!(html.contains("content=\"fresh\""));
    assert!(!html.contains("old"));
  }

  #[test]
  fn no_title_tag_is_unchanged() {
    let tpl = "<head></head>";
    assert_eq!(inject_title(tpl, "x"), tpl);
    assert_eq!(inject_title_and_description(tpl, "x", "y"), tpl);
  }

  #[test]
  fn html_lang_added() {
    let html = inject_html_lang(TEMPLATE, "zh-CN");
    assert!(html.contains("<html lang=\"zh-CN\">"));
  }

  #[test]
  fn html_lang_replaces_existing() {
    let html = inject_html_lang("<html lang=\"en\" class=\"dark\"><head></head></html>", "zh");
    assert_eq!(html, "<html lang=\"zh\" class=\"dark\"><head></head></html>");
  }

  #[test]
  fn config_script_before_head_close() {
    let html = inject_config_script(TEMPLATE, &json!({ "locales": { "/": { "title": "</script>" } } }));
    let script_at = html.find("<script>window.__CONFIG__ = ").unwrap();
    assert!(script_at < html.find("</head>").unwrap());
    assert!(html.contains(r#"{"locales":{"/":{"title":"\u003c/script\u003e"}}};</script>"#));
    assert_eq!(html.matches("</script>").count(), 1);
  }

  #[test]
  fn config_script_without_head_is_unchanged() {
    assert_eq!(inject_config_script("<body></body>", &json!({})), "<body></body>");
  }
}
