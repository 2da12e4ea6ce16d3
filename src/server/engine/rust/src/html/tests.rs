/* src/server/engine/rust/src/html/tests.rs */

use folio_core::{Configuration, resolve_config};
use serde_json::{Value, json};

use super::render_locale;

fn page(sections: Value) -> String {
  let config: Configuration = serde_json::from_value(json!({
    "locales": {
      "/": {
        "lang": "en",
        "langName": "English",
        "hero": { "name": "Ada <Lovelace>", "titles": ["*Engineer*"] },
        "navbar": { "links": [{ "label": "About", "anchor": "#about" }] },
        "sections": sections
      },
      "/zh/": { "lang": "zh", "langName": "中文", "hero": { "name": "Ada" } }
    }
  }))
  .unwrap();
  let config = resolve_config(&config);
  render_locale(&config, "/", &config.locales["/"])
}

#[test]
fn plain_fields_are_escaped() {
  let html = page(json!([]));
  assert!(html.contains("<h1>Ada &lt;Lovelace&gt;</h1>"));
  // Hero titles are not rich text
  assert!(html.contains("<li>*Engineer*</li>"));
  assert!(html.contains(r#"<div class="copyright">Ada &lt;Lovelace&gt;</div>"#));
}

#[test]
fn rich_fields_are_raw() {
  let html = page(json!([
    { "id": "about", "title": "About <me>", "type": "markdown", "data": { "content": "**hi** <kbd>x</kbd>" } }
  ]));
  assert!(html.contains(r#"<section id="about" class="section section-markdown">"#));
  assert!(html.contains("<h2>About &lt;me&gt;</h2>"));
  assert!(html.contains("<p><strong>hi</strong> <kbd>x</kbd></p>"));
}

#[test]
fn unknown_sections_render_nothing() {
  let html = page(json!([{ "id": "map", "title": "Map", "type": "worldmap", "data": {} }]));
  assert!(!html.contains("id=\"map\""));
  assert!(html.contains("<main></main>"));
}

#[test]
fn sections_keep_order() {
  let html = page(json!([
    { "id": "one", "type": "paragraph", "data": "first" },
    { "id": "two", "type": "list", "dot": "check", "data": ["second", { "text": "*third*", "link": "/t" }] }
  ]));
  let one = html.find("id=\"one\"").unwrap();
  let two = html.find("id=\"two\"").unwrap();
  assert!(one < two);
  assert!(html.contains(r#"<ul class="list" data-dot="check">"#));
  assert!(html.contains(r#"<li><a href="/t"><em>third</em></a></li>"#));
}

#[test]
fn navbar_links_and_locale_switch() {
  let html = page(json!([]));
  assert!(html.contains(r##"<li><a href="#about">About</a></li>"##));
  assert!(html.contains(r#"<a class="locale-switch" href="/zh/" hreflang="zh">中文</a>"#));
}

#[test]
fn profile_tags_and_text() {
  let html = page(json!([{
    "id": "me", "type": "profile",
    "data": {
      "fields": [
        { "title": "Bio", "icon": "user", "value": "Writes *Rust*" },
        { "title": "Skills", "icon": "code", "value": ["<Rust>", "Go"] }
      ],
      "contact": [{ "label": "Mail", "value": "a@b.c", "link": "mailto:a@b.c" }]
    }
  }]));
  assert!(html.contains(r#"<dd class="rich-content"><p>Writes <em>Rust</em></p>"#));
  assert!(html.contains("<li>&lt;Rust&gt;</li><li>Go</li>"));
  assert!(html.contains(r#"<a href="mailto:a@b.c">a@b.c</a>"#));
}

#[test]
fn banner_timeline_cards_gallery() {
  let html = page(json!([
    { "id": "b", "type": "banner", "data": {
      "header": "*Hey*", "content": "Body", "tags": "solo",
      "actions": [{ "label": "Go", "link": "/go", "primary": true }]
    }},
    { "id": "t", "type": "timeline", "data": [{ "year": 2024, "content": "News", "link": "/n" }] },
    { "id": "c", "type": "cards", "data": [{ "title": "*Paper*", "link": "/p.pdf", "category": "<pub>" }] },
    { "id": "g", "type": "gallery", "data": [{ "url": "/a.jpg", "title": "*A*", "date": 2023 }] }
  ]));
  assert!(html.contains(r#"<p class="banner-header"><em>Hey</em></p>"#));
  assert!(html.contains("<ul class=\"tags\"><li>solo</li></ul>"));
  assert!(html.contains(r#"<a class="button primary" href="/go">Go</a>"#));
  assert!(html.contains(r#"<span class="year">2024</span>"#));
  assert!(html.contains(r#"<a href="/n">/n</a>"#));
  assert!(html.contains("<h3><em>Paper</em></h3>"));
  assert!(html.contains(r#"<span class="card-category">&lt;pub&gt;</span>"#));
  // Gallery is never Markdown-rendered
  assert!(html.contains("<strong>*A*</strong><span>2023</span>"));
}
