/* src/server/core/rust/src/markdown.rs */

//! Markdown -> HTML for rich-text configuration fields.
//!
//! Raw HTML in the source is passed through untouched: configuration is
//! authored by the site owner and rendered as-is. Bare URLs and email
//! addresses are linked.

use std::borrow::Cow;

use linkify::{LinkFinder, LinkKind};
use pulldown_cmark::{CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream, html};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownMode {
  /// No wrapping block element, for titles and one-line labels.
  Inline,
  /// Paragraph-level markup.
  Block,
}

/// A rich-text renderer. `None` means the source could not be rendered and
/// the caller should keep the original text.
pub trait RichText {
  fn render(&self, source: &str, mode: MarkdownMode) -> Option<String>;
}

/// CommonMark with tables, strikethrough and smart punctuation.
#[derive(Debug, Clone, Copy)]
pub struct CommonMark {
  options: Options,
}

impl CommonMark {
  pub fn new(options: Options) -> Self {
    Self { options }
  }
}

impl Default for CommonMark {
  fn default() -> Self {
    Self::new(
      Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_SMART_PUNCTUATION,
    )
  }
}

impl RichText for CommonMark {
  fn render(&self, source: &str, mode: MarkdownMode) -> Option<String> {
    Some(render_with(source, mode, self.options))
  }
}

/// Render with the default [`CommonMark`] options. Empty input yields an
/// empty string.
pub fn render_markdown(text: &str, mode: MarkdownMode) -> String {
  render_with(text, mode, CommonMark::default().options)
}

fn render_with(text: &str, mode: MarkdownMode, options: Options) -> String {
  if text.is_empty() {
    return String::new();
  }
  let mut out = String::with_capacity(text.len() + text.len() / 2);
  match mode {
    MarkdownMode::Block => {
      let events = TextMergeStream::new(Parser::new_ext(text, options));
      html::push_html(&mut out, linkify(events).into_iter());
    }
    MarkdownMode::Inline => {
      let source = escape_block_markers(text);
      let mut options = options;
      options.remove(Options::ENABLE_TABLES);
      // Paragraph boundaries collapse to line breaks, other blocks vanish
      let events = TextMergeStream::new(Parser::new_ext(&source, options)).filter_map(|event| {
        match event {
          Event::Start(Tag::Paragraph) => None,
          Event::End(TagEnd::Paragraph) => Some(Event::SoftBreak),
          Event::Start(ref tag) if is_block(tag) => None,
          Event::End(ref end) if is_block_end(end) => None,
          Event::Rule => None,
          other => Some(other),
        }
      });
      html::push_html(&mut out, linkify(events).into_iter());
      out.truncate(out.trim_end_matches('\n').len());
    }
  }
  out
}

/// Backslash-escape line-leading block syntax so the parser only sees
/// paragraph text. Leading indentation is dropped for the same reason.
fn escape_block_markers(text: &str) -> Cow<'_, str> {
  let plain = |line: &str| !line.starts_with([' ', '\t']) && block_marker_at(line).is_none();
  if text.lines().all(plain) {
    return Cow::Borrowed(text);
  }
  let mut out = String::with_capacity(text.len() + 8);
  for line in text.split_inclusive('\n') {
    let line = line.trim_start_matches([' ', '\t']);
    match block_marker_at(line) {
      Some(at) => {
        out.push_str(&line[..at]);
        out.push('\\');
        out.push_str(&line[at..]);
      }
      None => out.push_str(line),
    }
  }
  Cow::Owned(out)
}

/// Byte offset of the character that would open a block on this line.
fn block_marker_at(line: &str) -> Option<usize> {
  let bytes = line.as_bytes();
  let first = *bytes.first()?;
  let rest = line.get(1..).unwrap_or_default().trim_end();
  let spaced = rest.is_empty() || bytes[1] == b' ' || bytes[1] == b'\t';
  match first {
    b'#' | b'>' => Some(0),
    b'-' | b'+' | b'*' | b'_' | b'=' if spaced || rest.bytes().all(|b| b == first || b == b' ') => {
      Some(0)
    }
    b'`' | b'~' if line.starts_with("```") || line.starts_with("~~~") => Some(0),
    b'0'..=b'9' => {
      let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
      let delim = *bytes.get(digits)?;
      let after = bytes.get(digits + 1);
      let ordered = digits <= 9
        && matches!(delim, b'.' | b')')
        && after.is_none_or(|b| b.is_ascii_whitespace());
      ordered.then_some(digits)
    }
    _ => None,
  }
}

fn is_block(tag: &Tag<'_>) -> bool {
  matches!(
    tag,
    Tag::Heading { .. }
      | Tag::BlockQuote(..)
      | Tag::CodeBlock(..)
      | Tag::HtmlBlock
      | Tag::List(..)
      | Tag::Item
      | Tag::Table(..)
      | Tag::TableHead
      | Tag::TableRow
      | Tag::TableCell
  )
}

fn is_block_end(end: &TagEnd) -> bool {
  matches!(
    end,
    TagEnd::Heading(..)
      | TagEnd::BlockQuote(..)
      | TagEnd::CodeBlock
      | TagEnd::HtmlBlock
      | TagEnd::List(..)
      | TagEnd::Item
      | TagEnd::Table
      | TagEnd::TableHead
      | TagEnd::TableRow
      | TagEnd::TableCell
  )
}

/// Turn bare URLs (`https://...`, `www....`) and email addresses in text
/// outside links, images and code blocks into links.
fn linkify<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
  let mut finder = LinkFinder::new();
  finder.url_must_have_scheme(false);

  let mut out = Vec::new();
  let mut opaque = 0usize;
  for event in events {
    match &event {
      Event::Start(Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(..)) => opaque += 1,
      Event::End(TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock) => {
        opaque = opaque.saturating_sub(1);
      }
      Event::Text(text) if opaque == 0 => {
        push_linked(&finder, text, &mut out);
        continue;
      }
      _ => {}
    }
    out.push(event);
  }
  out
}

fn push_linked<'a>(finder: &LinkFinder, text: &str, out: &mut Vec<Event<'a>>) {
  let mut plain = String::new();
  for span in finder.spans(text) {
    let s = span.as_str();
    let link = match span.kind() {
      Some(LinkKind::Url) if s.contains("://") => Some((LinkType::Autolink, s.to_string())),
      Some(LinkKind::Url) if s.starts_with("www.") => {
        Some((LinkType::Autolink, format!("http://{s}")))
      }
      Some(LinkKind::Email) => Some((LinkType::Email, s.to_string())),
      _ => None,
    };
    let Some((link_type, dest)) = link else {
      plain.push_str(s);
      continue;
    };
    if !plain.is_empty() {
      out.push(Event::Text(CowStr::from(std::mem::take(&mut plain))));
    }
    out.push(Event::Start(Tag::Link {
      link_type,
      dest_url: CowStr::from(dest),
      title: CowStr::Borrowed(""),
      id: CowStr::Borrowed(""),
    }));
    out.push(Event::Text(CowStr::from(s.to_string())));
    out.push(Event::End(TagEnd::Link));
  }
  if !plain.is_empty() {
    out.push(Event::Text(CowStr::from(plain)));
  }
}
