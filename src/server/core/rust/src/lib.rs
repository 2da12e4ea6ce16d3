/* src/server/core/rust/src/lib.rs */

pub mod deps;
pub mod error;
pub mod loader;
pub mod markdown;
pub mod model;
pub mod resolve;
pub mod section;

// Re-exports for ergonomic use
pub use deps::{collect_dependencies, config_dependencies};
pub use error::ConfigError;
pub use loader::{
  CONFIG_FILES, ConfigLoader, EvalError, ModuleEvaluator, ScriptEvaluator, find_config_file,
  load_config, load_raw_config,
};
pub use markdown::{CommonMark, MarkdownMode, RichText, render_markdown};
pub use model::{Configuration, FooterConfig, HeroConfig, LocaleConfig, NavbarConfig};
pub use resolve::{resolve_config, resolve_config_with};
pub use section::{Section, SectionKind};
