/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;


pub use loader::resolve_project;
pub use types::{FolioConfig, RendererKind};
