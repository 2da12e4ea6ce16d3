/* src/server/engine/rust/src/error.rs */

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
  /// No locale key (not even `/`) serves the requested URL.
  #[error("no locale serves {url}")]
  UnknownLocale { url: String },

  /// An out-of-process renderer failed or returned unusable output.
  #[error("renderer failed for {url}: {message}")]
  Failed { url: String, message: String },
}
