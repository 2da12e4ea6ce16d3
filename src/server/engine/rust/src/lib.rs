/* src/server/engine/rust/src/lib.rs */

mod error;
mod html;
mod locale;
mod meta;
mod page;
mod renderer;

pub use error::RenderError;
pub use locale::{ROOT_LOCALE, locale_for_url};
pub use meta::{DEFAULT_DESCRIPTION, DEFAULT_TITLE, PageMeta, ResolvedMeta};
pub use page::assemble_page;
pub use renderer::{Renderer, StaticRenderer};
