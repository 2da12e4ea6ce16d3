/* src/server/core/rust/src/loader/tests.rs */

use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use super::*;
use crate::section::SectionKind;

/// Returns a fixed value and records what it was asked to invalidate.
#[derive(Default)]
struct FakeEvaluator {
  value: Value,
  invalidated: Vec<Vec<PathBuf>>,
  evaluated: Vec<PathBuf>,
}

impl ModuleEvaluator for FakeEvaluator {
  fn invalidate(&mut self, paths: &[PathBuf]) {
    self.invalidated.push(paths.to_vec());
  }

  fn evaluate(&mut self, path: &Path) -> std::result::Result<Value, EvalError> {
    self.evaluated.push(path.to_path_buf());
    if self.value.is_null() {
      return Err(EvalError::NoDefaultExport);
    }
    Ok(self.value.clone())
  }
}

fn minimal() -> Value {
  json!({ "locales": { "/": { "hero": { "name": "Ada" }, "sections": [] } } })
}

fn write(root: &Path, name: &str, content: &str) {
  std::fs::write(root.join(name), content).unwrap();
}

fn loader(root: &Path, value: Value) -> ConfigLoader<FakeEvaluator> {
  ConfigLoader::with_evaluator(root, FakeEvaluator { value, ..Default::default() })
}

#[test]
fn no_candidate_is_not_found() {
  let tmp = tempfile::tempdir().unwrap();
  write(tmp.path(), "settings.json", "{}");
  let err = loader(tmp.path(), Value::Null).load().unwrap_err();
  assert!(matches!(err, ConfigError::NotFound { .. }), "{err}");
  assert!(err.to_string().contains("config.yaml"));
}

#[test]
fn minimal_json_has_empty_sections() {
  let tmp = tempfile::tempdir().unwrap();
  write(tmp.path(), "config.json", &minimal().to_string());
  let config = loader(tmp.path(), Value::Null).load().unwrap();
  assert!(config.locales["/"].sections.is_empty());
  assert_eq!(config.locales["/"].hero.name, "Ada");
}

#[test]
fn yaml_is_parsed_and_resolved() {
  let tmp = tempfile::tempdir().unwrap();
  write(
    tmp.path(),
    "config.yml",
    "locales:\n  /:\n    hero:\n      name: Ada\n    sections:\n      - id: about\n        type: markdown\n        data:\n          content: \"**hi**\"\n",
  );
  let mut l = loader(tmp.path(), Value::Null);
  let raw = l.load_raw().unwrap();
  let resolved = l.load().unwrap();
  let SectionKind::Markdown(raw_md) = &raw.locales["/"].sections[0].kind else { panic!() };
  let SectionKind::Markdown(md) = &resolved.locales["/"].sections[0].kind else { panic!() };
  assert_eq!(raw_md.content, "**hi**");
  assert_eq!(md.content, "<p><strong>hi</strong></p>\n");
}

#[test]
fn priority_prefers_code_then_json_then_yaml() {
  let tmp = tempfile::tempdir().unwrap();
  write(tmp.path(), "config.yaml", "locales: {}");
  write(tmp.path(), "config.json", "{}");
  assert_eq!(find_config_file(tmp.path()), Some(tmp.path().join("config.json")));
  write(tmp.path(), "config.js", "export default {}");
  assert_eq!(find_config_file(tmp.path()), Some(tmp.path().join("config.js")));
  write(tmp.path(), "config.ts", "export default {}");
  assert_eq!(find_config_file(tmp.path()), Some(tmp.path().join("config.ts")));
}

#[test]
fn yml_beats_yaml() {
  let tmp = tempfile::tempdir().unwrap();
  write(tmp.path(), "config.yaml", "");
  write(tmp.path(), "config.yml", "");
  assert_eq!(find_config_file(tmp.path()), Some(tmp.path().join("config.yml")));
}

#[test]
fn json_syntax_error_names_file() {
  let tmp = tempfile::tempdir().unwrap();
  write(tmp.path(), "config.json", "{ \"locales\": ");
  let err = loader(tmp.path(), Value::Null).load().unwrap_err();
  assert!(matches!(err, ConfigError::Parse { .. }));
  assert_eq!(err.file(), Some("config.json"));
}

#[test]
fn yaml_syntax_error_names_file() {
  let tmp = tempfile::tempdir().unwrap();
  write(tmp.path(), "config.yaml", "locales:\n  - a\n b: [");
  let err = loader(tmp.path(), Value::Null).load().unwrap_err();
  assert_eq!(err.file(), Some("config.yaml"));
  assert!(err.to_string().starts_with("error parsing config.yaml"));
}

#[test]
fn empty_yaml_is_a_parse_error() {
  let tmp = tempfile::tempdir().unwrap();
  write(tmp.path(), "config.yml", "");
  let err = loader(tmp.path(), Value::Null).load().unwrap_err();
  assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
}

#[test]
fn wrong_shape_is_a_parse_error() {
  let tmp = tempfile::tempdir().unwrap();
  write(tmp.path(), "config.json", r#"{ "locales": { "/": { "sections": [] } } }"#);
  let err = loader(tmp.path(), Value::Null).load().unwrap_err();
  assert!(err.to_string().contains("hero"), "{err}");
}

#[test]
fn no_locales_is_a_parse_error() {
  let tmp = tempfile::tempdir().unwrap();
  write(tmp.path(), "config.json", r#"{ "locales": {} }"#);
  assert!(matches!(
    loader(tmp.path(), Value::Null).load(),
    Err(ConfigError::Parse { .. })
  ));
}

#[test]
fn module_invalidates_entry_and_dependencies_before_evaluating() {
  let tmp = tempfile::tempdir().unwrap();
  write(tmp.path(), "config.ts", "import hero from './hero';\nexport default { hero };");
  write(tmp.path(), "hero.ts", "export default { name: 'Ada' };");

  let mut l = loader(tmp.path(), minimal());
  let config = l.load().unwrap();
  assert_eq!(config.default_locale(), Some("/"));

  let fake = l.evaluator();
  assert_eq!(fake.invalidated.len(), 1);
  let names: Vec<_> = fake.invalidated[0]
    .iter()
    .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
    .collect();
  assert_eq!(names, vec!["config.ts", "hero.ts"]);
  assert_eq!(fake.evaluated.len(), 1);
  assert!(fake.evaluated[0].ends_with("config.ts"));
}

#[test]
fn every_load_evaluates_again() {
  let tmp = tempfile::tempdir().unwrap();
  write(tmp.path(), "config.js", "export default {};");
  let mut l = loader(tmp.path(), minimal());
  l.load().unwrap();
  l.load().unwrap();
  assert_eq!(l.evaluator().evaluated.len(), 2);
  assert_eq!(l.evaluator().invalidated.len(), 2);
}

#[test]
fn evaluation_failure_names_file() {
  let tmp = tempfile::tempdir().unwrap();
  write(tmp.path(), "config.ts", "export const x = 1;");
  let err = loader(tmp.path(), Value::Null).load().unwrap_err();
  assert!(matches!(err, ConfigError::Evaluate { .. }));
  assert_eq!(err.to_string(), "error evaluating config.ts: module has no default export");
}

#[test]
fn format_from_extension() {
  assert_eq!(ConfigFormat::from_path(Path::new("config.ts")), Some(ConfigFormat::Module));
  assert_eq!(ConfigFormat::from_path(Path::new("config.yaml")), Some(ConfigFormat::Yaml));
  assert_eq!(ConfigFormat::from_path(Path::new("config")), None);
}
