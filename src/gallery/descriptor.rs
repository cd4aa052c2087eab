use std::{fmt, path::PathBuf, sync::Arc};

/// A directly usable local image resource.
#[derive(Clone, PartialEq, Eq)]
pub enum LocalHandle {
    /// A file on disk, typically picked from a folder selection.
    File(PathBuf),
    /// Encoded image bytes held in memory, typically a thumbnail fetched through the proxy.
    Blob(Arc<[u8]>),
}

impl fmt::Debug for LocalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Blob(bytes) => write!(f, "Blob({} bytes)", bytes.len()),
        }
    }
}

/// Reference to one image placed in the gallery.
///
/// `Custom` images render as-is; `Remote` images are source URLs that must go through the
/// normalization proxy (`/image?url=...`) before they can be drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageDescriptor {
    /// Source URL to be proxied.
    Remote {
        /// Original image URL as returned by the search API.
        url: String,
    },
    /// Locally addressable image.
    Custom {
        /// Handle to the image data.
        src: LocalHandle,
    },
}

impl ImageDescriptor {
    /// Describe a remote source URL.
    pub fn remote(url: impl Into<String>) -> Self {
        Self::Remote { url: url.into() }
    }

    /// Describe a local image file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::Custom {
            src: LocalHandle::File(path.into()),
        }
    }

    /// Describe in-memory encoded image bytes.
    pub fn blob(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Custom {
            src: LocalHandle::Blob(bytes.into()),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom { .. })
    }

    pub fn local(&self) -> Option<&LocalHandle> {
        match self {
            Self::Custom { src } => Some(src),
            Self::Remote { .. } => None,
        }
    }
}
