use crate::foundation::core::GRID_SLOTS;

/// Convenience result type used across WrapStar.
pub type WrapResult<T> = Result<T, WrapError>;

/// Top-level error taxonomy.
///
/// Some variants are *alerts*: conditions the end user caused and must be told about in
/// plain words (empty search box, full gallery, empty folder, failed search). Their display
/// text is the message shown to the user; see [`WrapError::alert`].
#[derive(thiserror::Error, Debug)]
pub enum WrapError {
    /// Invalid caller-provided data (bad slot index, malformed op, zero-sized layout).
    #[error("validation error: {0}")]
    Validation(String),

    /// The search box was empty.
    #[error("Please enter a celebrity's name!")]
    EmptyQuery,

    /// The gallery already holds the maximum number of images.
    #[error("Gallery is full! You can only add up to {max} images.")]
    GalleryFull {
        /// Slot capacity of the gallery.
        max: usize,
    },

    /// A folder selection produced no usable image files.
    #[error(
        "No valid image files selected! Please choose PNG, GIF, TIFF, JPEG, JPG, BMP, or RAW files."
    )]
    NoValidImages,

    /// A network call to the backend or an upstream service failed.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Image decoding, cropping or encoding failed.
    #[error("image error: {0}")]
    Image(String),

    /// Invalid server or client configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WrapError {
    /// Build a [`WrapError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WrapError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`WrapError::Image`] value.
    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    /// Build a [`WrapError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The gallery-full alert for the standard grid capacity.
    pub fn gallery_full() -> Self {
        Self::GalleryFull { max: GRID_SLOTS }
    }

    pub fn is_alert(&self) -> bool {
        self.alert().is_some()
    }

    /// User-facing alert text, or `None` for errors that are only logged.
    pub fn alert(&self) -> Option<String> {
        match self {
            Self::EmptyQuery | Self::GalleryFull { .. } | Self::NoValidImages => {
                Some(self.to_string())
            }
            Self::Fetch(_) => Some("Failed to fetch images. Please try again.".to_string()),
            _ => None,
        }
    }

    /// Message without the category prefix, used for JSON error bodies.
    pub fn detail(&self) -> String {
        match self {
            Self::Validation(m) | Self::Fetch(m) | Self::Image(m) | Self::Config(m) => m.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
