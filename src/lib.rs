//! WrapStar turns celebrity headshots into wrapping paper.
//!
//! The crate has two halves:
//!
//! - A client [`WrapSession`]: search for a name through a [`SearchClient`], arrange up to 25
//!   images on a 5x5 [`Gallery`] (drag reorder, local files from a [`FilePicker`]), then
//!   capture the [`GalleryView`] and tile it 4x4 with [`export_wrapping_paper`].
//! - A proxy server ([`serve`]) that forwards image searches upstream and normalizes any
//!   source image into a 150x150 entropy-cropped PNG.
#![forbid(unsafe_code)]

mod assets;
mod client;
mod foundation;
mod gallery;
mod render;
mod server;
mod session;

pub use crate::foundation::core::{GRID_COLUMNS, GRID_ROWS, GRID_SLOTS, THUMBNAIL_SIZE, TILE_REPEAT};
pub use crate::foundation::error::{WrapError, WrapResult};

pub use crate::assets::decode::{decode_image, encode_png, read_image, sniff_mime};
pub use crate::assets::normalize::{entropy_crop, normalize_thumbnail};
pub use crate::assets::picker::{
    ALLOWED_EXTENSIONS, ALLOWED_MIME_TYPES, FilePicker, LocalImageCandidate, extension_allowed,
    scan_folder,
};
pub use crate::client::search::{DEFAULT_BACKEND_URL, SearchClient};
pub use crate::gallery::descriptor::{ImageDescriptor, LocalHandle};
pub use crate::gallery::drag::DragReorder;
pub use crate::gallery::grid::Gallery;
pub use crate::render::compose::{
    DEFAULT_EXPORT_NAME, ensure_parent_dir, export_file_name, export_wrapping_paper, save_png,
    tile,
};
pub use crate::render::prepare::PreparedGallery;
pub use crate::render::view::{Chrome, ChromeSuppression, GalleryLayout, GalleryView};
pub use crate::server::config::{DEFAULT_PORT, DEFAULT_SEARCH_API_URL, ServerConfig};
pub use crate::server::routes::{ServerState, routes};
pub use crate::server::{install_fail_fast_hook, serve};
pub use crate::session::ops::GridOp;
pub use crate::session::state::WrapSession;
