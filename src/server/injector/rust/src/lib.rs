/* src/server/injector/rust/src/lib.rs */

mod helpers;
mod page;
mod path;

pub use helpers::{escape_html, script_safe_json};
pub use page::{
  APP_PLACEHOLDER, CONFIG_GLOBAL, inject_app_html, inject_config_script, inject_html_lang,
  inject_title, inject_title_and_description,
};
pub use path::{locale_output_path, locale_url};
