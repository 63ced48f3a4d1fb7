//! Crate error type.
//!
//! Layout itself never fails once its inputs are valid: every error here is either a
//! rejected input, a rejected configuration, or collaborator data that could not be read.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Item count above capacity, no levels to place into, non-finite geometry.
  #[error("invalid layout input: {0}")]
  InvalidLayoutInput(String),

  #[error("invalid configuration: {0}")]
  InvalidConfig(String),

  /// Photo data could not be fetched or decoded. The layout engine is never
  /// involved; callers decide whether to skip the render or draw an empty tree.
  #[error("photo data unavailable: {0}")]
  DataUnavailable(String),

  /// An upload that the tree will not take: wrong format, too large, tree full.
  #[error("photo rejected: {0}")]
  RejectedPhoto(String),
}

impl Error {
  pub fn invalid_input(msg: impl Into<String>) -> Self {
    Error::InvalidLayoutInput(msg.into())
  }

  pub fn invalid_config(msg: impl Into<String>) -> Self {
    Error::InvalidConfig(msg.into())
  }

  pub fn unavailable(msg: impl Into<String>) -> Self {
    Error::DataUnavailable(msg.into())
  }

  pub fn rejected(msg: impl Into<String>) -> Self {
    Error::RejectedPhoto(msg.into())
  }

  pub fn is_data_unavailable(&self) -> bool {
    matches!(self, Error::DataUnavailable(_))
  }
}

impl From<std::io::Error> for Error {
  fn from(e: std::io::Error) -> Self {
    Error::DataUnavailable(e.to_string())
  }
}

impl From<serde_json::Error> for Error {
  fn from(e: serde_json::Error) -> Self {
    Error::DataUnavailable(format!("malformed photo data: {e}"))
  }
}

impl From<toml::de::Error> for Error {
  fn from(e: toml::de::Error) -> Self {
    Error::InvalidConfig(e.to_string())
  }
}

#[cfg(feature = "drawing")]
impl From<image::ImageError> for Error {
  fn from(e: image::ImageError) -> Self {
    Error::DataUnavailable(format!("image: {e}"))
  }
}

/// Convenient wrapper around `std::Result`.
pub type Result<T> = ::std::result::Result<T, Error>;
