/* src/server/engine/rust/src/page.rs */

use folio_injector::{
  inject_app_html, inject_config_script, inject_html_lang, inject_title_and_description,
};
use serde_json::Value;

use crate::meta::ResolvedMeta;

/// Assemble a prerendered page from the client template.
///
/// Steps, in order: body markup into the placeholder, `<title>` and meta
/// description, `<html lang>` (only when known), then the configuration
/// constant before `</head>`.
pub fn assemble_page(
  template: &str,
  placeholder: &str,
  markup: &str,
  meta: &ResolvedMeta,
  config: &Value,
) -> String {
  let mut html = inject_app_html(template, placeholder, markup);
  html = inject_title_and_description(&html, &meta.title, &meta.description);
  if let Some(lang) = &meta.lang {
    html = inject_html_lang(&html, lang);
  }
  inject_config_script(&html, config)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  const TEMPLATE: &str = r#"<html><head><title>x</title></head><body><div id="root"><!--app-html--></div></body></html>"#;

  #[test]
  fn full_assembly() {
    let meta = ResolvedMeta {
      title: "Ada".into(),
      description: "Home of Ada".into(),
      lang: Some("en".into()),
    };
    let html = assemble_page(TEMPLATE, "<!--app-html-->", "<main>hi</main>", &meta, &json!({ "a": 1 }));
    assert_eq!(
      html,
      "<html lang=\"en\"><head><title>Ada</title>\n    <meta name=\"description\" content=\"Home of Ada\" /><script>window.__CONFIG__ = {\"a\":1};</script></head><body><div id=\"root\"><main>hi</main></div></body></html>"
    );
  }

  #[test]
  fn lang_left_alone_when_unknown() {
    let meta = ResolvedMeta { title: "t".into(), description: "d".into(), lang: None };
    let html = assemble_page(TEMPLATE, "<!--app-html-->", "", &meta, &json!({}));
    assert!(html.starts_with("<html><head>"));
  }
}
