/* src/server/core/rust/src/section.rs */

// Section blocks: `{ id, title?, icon?, subtitle?, type, data, ...props }`.
// `type` selects the payload shape of `data`; conversion goes through
// `RawSection` so an unknown `type` survives as `SectionKind::Unknown`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSection", into = "RawSection")]
pub struct Section {
  /// HTML anchor and navigation target.
  pub id: String,
  pub title: Option<String>,
  pub icon: Option<String>,
  pub subtitle: Option<String>,
  pub kind: SectionKind,
  /// Presentation props that sit beside `data` (`style`, `dot`, `card`, ...).
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionKind {
  Profile(ProfileData),
  Experience(Vec<ExperienceItem>),
  Banner(BannerData),
  Timeline(Vec<TimelineItem>),
  Cards(Vec<CardItem>),
  List(Vec<ListEntry>),
  Gallery(Vec<GalleryItem>),
  Markdown(MarkdownData),
  /// Older single-string paragraph block.
  Paragraph(String),
  Unknown { kind: String, data: Value },
}

impl SectionKind {
  pub fn type_name(&self) -> &str {
    match self {
      Self::Profile(_) => "profile",
      Self::Experience(_) => "experience",
      Self::Banner(_) => "banner",
      Self::Timeline(_) => "timeline",
      Self::Cards(_) => "cards",
      Self::List(_) => "list",
      Self::Gallery(_) => "gallery",
      Self::Markdown(_) => "markdown",
      Self::Paragraph(_) => "paragraph",
      Self::Unknown { kind, .. } => kind,
    }
  }

  fn from_raw(kind: String, data: Value) -> Result<Self, serde_json::Error> {
    let parsed = match kind.as_str() {
      "profile" => Self::Profile(serde_json::from_value(data)?),
      "experience" => Self::Experience(serde_json::from_value(data)?),
      "banner" => Self::Banner(serde_json::from_value(data)?),
      "timeline" => Self::Timeline(serde_json::from_value(data)?),
      "cards" => Self::Cards(serde_json::from_value(data)?),
      "list" => Self::List(serde_json::from_value(data)?),
      "gallery" => Self::Gallery(serde_json::from_value(data)?),
      "markdown" => Self::Markdown(serde_json::from_value(data)?),
      "paragraph" => Self::Paragraph(serde_json::from_value(data)?),
      _ => Self::Unknown { kind, data },
    };
    Ok(parsed)
  }

  fn into_data(self) -> Value {
    let data = match self {
      Self::Profile(d) => serde_json::to_value(d),
      Self::Experience(d) => serde_json::to_value(d),
      Self::Banner(d) => serde_json::to_value(d),
      Self::Timeline(d) => serde_json::to_value(d),
      Self::Cards(d) => serde_json::to_value(d),
      Self::List(d) => serde_json::to_value(d),
      Self::Gallery(d) => serde_json::to_value(d),
      Self::Markdown(d) => serde_json::to_value(d),
      Self::Paragraph(d) => Ok(Value::String(d)),
      Self::Unknown { data, .. } => Ok(data),
    };
    // Plain data structs with string keys always serialize
    data.unwrap_or_default()
  }
}

#[derive(Serialize, Deserialize)]
struct RawSection {
  id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  icon: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  subtitle: Option<String>,
  #[serde(rename = "type")]
  kind: String,
  #[serde(default)]
  data: Value,
  #[serde(flatten)]
  extra: Map<String, Value>,
}

impl TryFrom<RawSection> for Section {
  type Error = String;

  fn try_from(raw: RawSection) -> Result<Self, Self::Error> {
    let RawSection { id, title, icon, subtitle, kind, data, extra } = raw;
    let kind = SectionKind::from_raw(kind.clone(), data)
      .map_err(|e| format!("section \"{id}\" of type \"{kind}\": invalid data: {e}"))?;
    Ok(Self { id, title, icon, subtitle, kind, extra })
  }
}

impl From<Section> for RawSection {
  fn from(section: Section) -> Self {
    let kind = section.kind.type_name().to_string();
    Self {
      id: section.id,
      title: section.title,
      icon: section.icon,
      subtitle: section.subtitle,
      kind,
      data: section.kind.into_data(),
      extra: section.extra,
    }
  }
}

// -- Payloads --

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileData {
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub fields: Vec<ProfileField>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub contact: Vec<ProfileContact>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub slogan: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileField {
  pub title: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub icon: String,
  pub value: FieldValue,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// A profile value is either one Markdown string or a list of tag chips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
  Text(String),
  Tags(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileContact {
  pub label: String,
  pub value: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub link: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub icon: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceItem {
  /// Key into the experience style presets (`work`, `study`, ...).
  #[serde(rename = "type")]
  pub kind: String,
  pub place: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  pub time: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub content: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub icon: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BannerData {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub header: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub content: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub footer: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tags: Option<Tags>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub actions: Vec<BannerAction>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tags {
  One(String),
  Many(Vec<String>),
}

impl Tags {
  pub fn as_slice(&self) -> &[String] {
    match self {
      Self::One(tag) => std::slice::from_ref(tag),
      Self::Many(tags) => tags,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerAction {
  pub label: String,
  pub link: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub primary: Option<bool>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
  pub year: Scalar,
  pub content: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub link: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub link_text: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Years and dates may be written as either strings or numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
  Text(String),
  Number(serde_json::Number),
}

impl std::fmt::Display for Scalar {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Text(s) => f.write_str(s),
      Self::Number(n) => write!(f, "{n}"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardItem {
  pub title: String,
  pub link: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub action: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub icon: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// List entries keep the shape they were written in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListEntry {
  Text(String),
  Item(ListItem),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
  pub text: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub link: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
  pub url: String,
  pub title: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date: Option<Scalar>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkdownData {
  pub content: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub card: Option<bool>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}
