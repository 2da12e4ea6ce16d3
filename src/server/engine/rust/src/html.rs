/* src/server/engine/rust/src/html.rs */

// Markup for the built-in renderer. Fields the resolver turned into HTML
// are written raw; every other string is escaped.

use folio_core::Configuration;
use folio_core::model::{
  BannerData, CardItem, ExperienceItem, FieldValue, GalleryItem, HeroConfig, ListEntry,
  LocaleConfig, MarkdownData, NavbarConfig, ProfileData, Section, SectionKind, TimelineItem,
};
use folio_injector::escape_html as esc;

pub(crate) fn render_locale(config: &Configuration, key: &str, locale: &LocaleConfig) -> String {
  let mut out = String::with_capacity(4096);
  out.push_str(r#"<div class="folio-page">"#);
  if let Some(navbar) = &locale.navbar {
    render_navbar(&mut out, config, key, locale, navbar);
  }
  render_hero(&mut out, &locale.hero);

  out.push_str("<main>");
  for section in &locale.sections {
    render_section(&mut out, config, section);
  }
  out.push_str("</main>");

  render_footer(&mut out, locale);
  out.push_str("</div>");
  out
}

fn render_navbar(
  out: &mut String,
  config: &Configuration,
  key: &str,
  locale: &LocaleConfig,
  navbar: &NavbarConfig,
) {
  out.push_str(&format!(
    r##"<nav class="navbar"><a class="navbar-brand" href="#">{}</a><ul>"##,
    esc(&locale.hero.name)
  ));
  for link in &navbar.links {
    out.push_str(&format!(
      r##"<li><a href="#{}">{}</a></li>"##,
      esc(link.anchor.trim_start_matches('#')),
      esc(&link.label)
    ));
  }
  out.push_str("</ul>");

  // Locale switch cycles through keys in declaration order
  let keys: Vec<&str> = config.locale_paths().collect();
  if keys.len() > 1 {
    let next = keys.iter().position(|k| *k == key).map_or(0, |i| (i + 1) % keys.len());
    let target = &config.locales[keys[next]];
    let name = target.lang_name.as_deref().or(target.lang.as_deref()).unwrap_or(keys[next]);
    out.push_str(&format!(
      r#"<a class="locale-switch" href="{}" hreflang="{}">{}</a>"#,
      esc(keys[next]),
      esc(target.lang.as_deref().unwrap_or_default()),
      esc(name)
    ));
  }
  out.push_str("</nav>");
}

fn render_hero(out: &mut String, hero: &HeroConfig) {
  out.push_str(r#"<header class="hero">"#);
  if !hero.avatar.is_empty() {
    out.push_str(&format!(
      r#"<img class="hero-avatar" src="{}" alt="{}">"#,
      esc(&hero.avatar),
      esc(&hero.name)
    ));
  }
  if !hero.welcome.is_empty() {
    out.push_str(&format!(r#"<p class="hero-welcome">{}</p>"#, esc(&hero.welcome)));
  }
  out.push_str(&format!("<h1>{}</h1>", esc(&hero.name)));
  if !hero.titles.is_empty() {
    out.push_str(r#"<ul class="hero-titles">"#);
    for title in &hero.titles {
      out.push_str(&format!("<li>{}</li>", esc(title)));
    }
    out.push_str("</ul>");
  }
  if let Some(medias) = hero.medias.as_deref().filter(|m| !m.is_empty()) {
    out.push_str(r#"<ul class="hero-medias">"#);
    for media in medias {
      out.push_str(&format!(
        r#"<li><a href="{}" data-icon="{}" rel="noopener">{}</a></li>"#,
        esc(&media.link),
        esc(&media.icon),
        esc(&media.name)
      ));
    }
    out.push_str("</ul>");
  }
  out.push_str("</header>");
}

fn render_section(out: &mut String, config: &Configuration, section: &Section) {
  if matches!(section.kind, SectionKind::Unknown { .. }) {
    tracing::debug!(id = %section.id, kind = section.kind.type_name(), "skipping unknown section");
    return;
  }
  out.push_str(&format!(
    r#"<section id="{}" class="section section-{}">"#,
    esc(&section.id),
    section.kind.type_name()
  ));
  if section.title.is_some() || section.subtitle.is_some() {
    out.push_str(r#"<div class="section-header">"#);
    if let Some(title) = &section.title {
      match &section.icon {
        Some(icon) => {
          out.push_str(&format!(r#"<h2 data-icon="{}">{}</h2>"#, esc(icon), esc(title)))
        }
        None => out.push_str(&format!("<h2>{}</h2>", esc(title))),
      }
    }
    if let Some(subtitle) = &section.subtitle {
      out.push_str(&format!(r#"<p class="section-subtitle">{}</p>"#, esc(subtitle)));
    }
    out.push_str("</div>");
  }

  match &section.kind {
    SectionKind::Profile(data) => render_profile(out, data),
    SectionKind::Experience(items) => render_experience(out, config, items),
    SectionKind::Banner(data) => render_banner(out, data),
    SectionKind::Timeline(items) => render_timeline(out, items),
    SectionKind::Cards(items) => render_cards(out, items),
    SectionKind::List(entries) => {
      let dot = section.extra.get("dot").and_then(|v| v.as_str());
      render_list(out, entries, dot);
    }
    SectionKind::Gallery(items) => render_gallery(out, items),
    SectionKind::Markdown(data) => render_markdown(out, data),
    SectionKind::Paragraph(html) => {
      out.push_str(&format!(r#"<div class="rich-content">{html}</div>"#));
    }
    SectionKind::Unknown { .. } => {}
  }
  out.push_str("</section>");
}

fn render_profile(out: &mut String, data: &ProfileData) {
  if let Some(slogan) = &data.slogan {
    out.push_str(&format!(r#"<div class="profile-slogan rich-content">{slogan}</div>"#));
  }
  if !data.fields.is_empty() {
    out.push_str(r#"<dl class="profile-fields">"#);
    for field in &data.fields {
      out.push_str(&format!(r#"<dt data-icon="{}">{}</dt>"#, esc(&field.icon), esc(&field.title)));
      match &field.value {
        FieldValue::Text(html) => {
          out.push_str(&format!(r#"<dd class="rich-content">{html}</dd>"#));
        }
        FieldValue::Tags(tags) => {
          out.push_str(r#"<dd><ul class="tags">"#);
          for tag in tags {
            out.push_str(&format!("<li>{}</li>", esc(tag)));
          }
          out.push_str("</ul></dd>");
        }
      }
    }
    out.push_str("</dl>");
  }
  if !data.contact.is_empty() {
    out.push_str(r#"<ul class="profile-contact">"#);
    for contact in &data.contact {
      let value = match &contact.link {
        Some(link) => format!(r#"<a href="{}">{}</a>"#, esc(link), esc(&contact.value)),
        None => esc(&contact.value),
      };
      out.push_str(&format!(
        r#"<li data-icon="{}"><span class="label">{}</span> {value}</li>"#,
        esc(contact.icon.as_deref().unwrap_or_default()),
        esc(&contact.label)
      ));
    }
    out.push_str("</ul>");
  }
}

fn render_experience(out: &mut String, config: &Configuration, items: &[ExperienceItem]) {
  out.push_str(r#"<ol class="experience">"#);
  for item in items {
    let style = config.experience_styles.as_ref().and_then(|styles| styles.get(&item.kind));
    let icon = item.icon.as_deref().or(style.map(|s| s.icon.as_str())).unwrap_or_default();
    let class = style.map(|s| format!(" {}", s.background)).unwrap_or_default();
    out.push_str(&format!(
      r#"<li class="experience-item experience-{}{}" data-icon="{}">"#,
      esc(&item.kind),
      esc(&class),
      esc(icon)
    ));
    out.push_str(&format!(
      r#"<div class="experience-head"><span class="place">{}</span><time>{}</time></div>"#,
      esc(&item.place),
      esc(&item.time)
    ));
    if let Some(title) = &item.title {
      out.push_str(&format!("<h3>{title}</h3>"));
    }
    if let Some(description) = &item.description {
      out.push_str(&format!(r#"<div class="rich-content">{description}</div>"#));
    }
    if let Some(content) = &item.content {
      out.push_str(&format!(r#"<div class="rich-content">{content}</div>"#));
    }
    out.push_str("</li>");
  }
  out.push_str("</ol>");
}

fn render_banner(out: &mut String, data: &BannerData) {
  out.push_str(r#"<div class="banner">"#);
  if let Some(header) = &data.header {
    out.push_str(&format!(r#"<p class="banner-header">{header}</p>"#));
  }
  if let Some(content) = &data.content {
    out.push_str(&format!(r#"<div class="banner-content rich-content">{content}</div>"#));
  }
  if let Some(tags) = &data.tags {
    out.push_str(r#"<ul class="tags">"#);
    for tag in tags.as_slice() {
      out.push_str(&format!("<li>{}</li>", esc(tag)));
    }
    out.push_str("</ul>");
  }
  if !data.actions.is_empty() {
    out.push_str(r#"<div class="banner-actions">"#);
    for action in &data.actions {
      let class = if action.primary.unwrap_or(false) { "button primary" } else { "button" };
      out.push_str(&format!(
        r#"<a class="{class}" href="{}">{}</a>"#,
        esc(&action.link),
        esc(&action.label)
      ));
    }
    out.push_str("</div>");
  }
  if let Some(footer) = &data.footer {
    out.push_str(&format!(r#"<p class="banner-footer">{footer}</p>"#));
  }
  out.push_str("</div>");
}

fn render_timeline(out: &mut String, items: &[TimelineItem]) {
  out.push_str(r#"<ol class="timeline">"#);
  for item in items {
    out.push_str(&format!(
      r#"<li><span class="year">{}</span><div class="rich-content">{}</div>"#,
      esc(&item.year.to_string()),
      item.content
    ));
    if let Some(link) = &item.link {
      let text = item.link_text.as_deref().unwrap_or(link);
      out.push_str(&format!(r#"<a href="{}">{}</a>"#, esc(link), esc(text)));
    }
    out.push_str("</li>");
  }
  out.push_str("</ol>");
}

fn render_cards(out: &mut String, items: &[CardItem]) {
  out.push_str(r#"<div class="cards">"#);
  for card in items {
    out.push_str(&format!(r#"<a class="card" href="{}">"#, esc(&card.link)));
    if let Some(category) = &card.category {
      out.push_str(&format!(r#"<span class="card-category">{}</span>"#, esc(category)));
    }
    match &card.icon {
      Some(icon) => out.push_str(&format!(r#"<h3 data-icon="{}">{}</h3>"#, esc(icon), card.title)),
      None => out.push_str(&format!("<h3>{}</h3>", card.title)),
    }
    if let Some(description) = &card.description {
      out.push_str(&format!(r#"<div class="rich-content">{description}</div>"#));
    }
    if let Some(action) = &card.action {
      out.push_str(&format!(r#"<span class="card-action">{}</span>"#, esc(action)));
    }
    out.push_str("</a>");
  }
  out.push_str("</div>");
}

fn render_list(out: &mut String, entries: &[ListEntry], dot: Option<&str>) {
  match dot {
    Some(dot) => out.push_str(&format!(r#"<ul class="list" data-dot="{}">"#, esc(dot))),
    None => out.push_str(r#"<ul class="list">"#),
  }
  for entry in entries {
    match entry {
      ListEntry::Text(html) => out.push_str(&format!("<li>{html}</li>")),
      ListEntry::Item(item) => match &item.link {
        Some(link) => {
          out.push_str(&format!(r#"<li><a href="{}">{}</a></li>"#, esc(link), item.text))
        }
        None => out.push_str(&format!("<li>{}</li>", item.text)),
      },
    }
  }
  out.push_str("</ul>");
}

fn render_gallery(out: &mut String, items: &[GalleryItem]) {
  out.push_str(r#"<div class="gallery">"#);
  for item in items {
    out.push_str(&format!(
      r#"<figure><img src="{}" alt="{}" loading="lazy"><figcaption><strong>{}</strong>"#,
      esc(&item.url),
      esc(&item.title),
      esc(&item.title)
    ));
    let details: Vec<String> = [item.location.clone(), item.date.as_ref().map(ToString::to_string)]
      .into_iter()
      .flatten()
      .map(|s| esc(&s))
      .collect();
    if !details.is_empty() {
      out.push_str(&format!("<span>{}</span>", details.join(" · ")));
    }
    if let Some(description) = &item.description {
      out.push_str(&format!("<p>{}</p>", esc(description)));
    }
    out.push_str("</figcaption></figure>");
  }
  out.push_str("</div>");
}

fn render_markdown(out: &mut String, data: &MarkdownData) {
  let class =
    if data.card.unwrap_or(false) { "markdown card rich-content" } else { "markdown rich-content" };
  out.push_str(&format!(r#"<article class="{class}">{}</article>"#, data.content));
}

fn render_footer(out: &mut String, locale: &LocaleConfig) {
  out.push_str(r#"<footer class="footer">"#);
  let footer = locale.footer.as_ref();
  match footer.and_then(|f| f.copyright.as_deref()) {
    Some(html) => out.push_str(&format!(r#"<div class="copyright">{html}</div>"#)),
    None => out.push_str(&format!(r#"<div class="copyright">{}</div>"#, esc(&locale.hero.name))),
  }
  if let Some(description) = footer.and_then(|f| f.description.as_deref()) {
    out.push_str(&format!(r#"<div class="footer-description">{description}</div>"#));
  }
  out.push_str("</footer>");
}

#[cfg(test)]
mod tests;
