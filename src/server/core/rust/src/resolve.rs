/* src/server/core/rust/src/resolve.rs */

// Config tree transform: every Markdown-bearing field becomes rendered HTML.
// Takes the raw tree by reference and builds a new one; the input is never
// touched. Rendering failures keep the original string.

use crate::markdown::{CommonMark, MarkdownMode, RichText};
use crate::model::{Configuration, FooterConfig, LocaleConfig};
use crate::section::{FieldValue, ListEntry, Section, SectionKind};


/// Resolve with the default CommonMark renderer.
pub fn resolve_config(config: &Configuration) -> Configuration {
  resolve_config_with(config, &CommonMark::default())
}

pub fn resolve_config_with(config: &Configuration, md: &impl RichText) -> Configuration {
  let locales = config
    .locales
    .iter()
    .map(|(path, locale)| (path.clone(), resolve_locale(locale, md)))
    .collect();
  Configuration {
    locales,
    experience_styles: config.experience_styles.clone(),
    extra: config.extra.clone(),
  }
}

pub fn resolve_locale(locale: &LocaleConfig, md: &impl RichText) -> LocaleConfig {
  LocaleConfig {
    lang: locale.lang.clone(),
    lang_name: locale.lang_name.clone(),
    title: locale.title.clone(),
    description: locale.description.clone(),
    hero: locale.hero.clone(),
    navbar: locale.navbar.clone(),
    sections: locale.sections.iter().map(|s| resolve_section(s, md)).collect(),
    footer: locale.footer.as_ref().map(|f| resolve_footer(f, md)),
    ui: locale.ui.clone(),
    extra: locale.extra.clone(),
  }
}

fn resolve_footer(footer: &FooterConfig, md: &impl RichText) -> FooterConfig {
  let mut footer = footer.clone();
  map_opt(&mut footer.copyright, |s| block(md, s));
  map_opt(&mut footer.description, |s| block(md, s));
  footer
}

pub fn resolve_section(section: &Section, md: &impl RichText) -> Section {
  let kind = match &section.kind {
    SectionKind::Banner(data) => {
      let mut data = data.clone();
      map_opt(&mut data.header, |s| inline(md, s));
      map_opt(&mut data.content, |s| block(md, s));
      map_opt(&mut data.footer, |s| inline(md, s));
      SectionKind::Banner(data)
    }
    SectionKind::Cards(items) => SectionKind::Cards(
      items
        .iter()
        .map(|item| {
          let mut item = item.clone();
          item.title = inline(md, &item.title);
          map_opt(&mut item.description, |s| block(md, s));
          item
        })
        .collect(),
    ),
    SectionKind::Experience(items) => SectionKind::Experience(
      items
        .iter()
        .map(|item| {
          let mut item = item.clone();
          map_opt(&mut item.title, |s| inline(md, s));
          map_opt(&mut item.description, |s| block(md, s));
          map_opt(&mut item.content, |s| block(md, s));
          item
        })
        .collect(),
    ),
    SectionKind::List(entries) => SectionKind::List(
      entries
        .iter()
        .map(|entry| match entry {
          ListEntry::Text(text) => ListEntry::Text(inline(md, text)),
          ListEntry::Item(item) => {
            let mut item = item.clone();
            item.text = inline(md, &item.text);
            ListEntry::Item(item)
          }
        })
        .collect(),
    ),
    SectionKind::Profile(data) => {
      let mut data = data.clone();
      map_opt(&mut data.slogan, |s| block(md, s));
      for field in &mut data.fields {
        // Tag lists are shown literally as chips
        if let FieldValue::Text(text) = &field.value {
          field.value = FieldValue::Text(block(md, text));
        }
      }
      SectionKind::Profile(data)
    }
    SectionKind::Timeline(items) => SectionKind::Timeline(
      items
        .iter()
        .map(|item| {
          let mut item = item.clone();
          item.content = block(md, &item.content);
          item
        })
        .collect(),
    ),
    SectionKind::Markdown(data) => {
      let mut data = data.clone();
      data.content = block(md, &data.content);
      SectionKind::Markdown(data)
    }
    SectionKind::Paragraph(text) => SectionKind::Paragraph(block(md, text)),
    SectionKind::Gallery(_) | SectionKind::Unknown { .. } => section.kind.clone(),
  };
  Section {
    id: section.id.clone(),
    title: section.title.clone(),
    icon: section.icon.clone(),
    subtitle: section.subtitle.clone(),
    kind,
    extra: section.extra.clone(),
  }
}

fn render(md: &impl RichText, source: &str, mode: MarkdownMode) -> String {
  if source.is_empty() {
    return String::new();
  }
  match md.render(source, mode) {
    Some(html) => html,
    None => {
      tracing::warn!(len = source.len(), "markdown render failed, keeping source text");
      source.to_string()
    }
  }
}

fn inline(md: &impl RichText, source: &str) -> String {
  render(md, source, MarkdownMode::Inline)
}

fn block(md: &impl RichText, source: &str) -> String {
  render(md, source, MarkdownMode::Block)
}

fn map_opt(field: &mut Option<String>, f: impl FnOnce(&str) -> String) {
  if let Some(value) = field.as_deref() {
    *field = Some(f(value));
  }
}
