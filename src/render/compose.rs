use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::core::TILE_REPEAT;
use crate::foundation::error::{WrapError, WrapResult};
use crate::render::view::GalleryView;

/// File name used when the gallery has no search query to name it after.
pub const DEFAULT_EXPORT_NAME: &str = "WrapStar_Gallery.png";

/// Repeat `src` in a `columns`x`rows` grid. Copies are placed edge to edge with no blending.
pub fn tile(src: &RgbaImage, columns: u32, rows: u32) -> WrapResult<RgbaImage> {
    if columns == 0 || rows == 0 {
        return Err(WrapError::validation("tile grid must be at least 1x1"));
    }
    let (w, h) = src.dimensions();
    let (Some(out_w), Some(out_h)) = (w.checked_mul(columns), h.checked_mul(rows)) else {
        return Err(WrapError::validation(format!(
            "tiled size overflows: {w}x{h} repeated {columns}x{rows}"
        )));
    };

    let mut out = RgbaImage::new(out_w, out_h);
    for row in 0..rows {
        for col in 0..columns {
            image::imageops::replace(
                &mut out,
                src,
                i64::from(col * w),
                i64::from(row * h),
            );
        }
    }
    Ok(out)
}

/// Capture `view` with its chrome hidden and tile the capture 4x4.
///
/// Chrome is restored before this returns, whether or not the capture succeeded.
#[tracing::instrument(skip(view))]
pub fn export_wrapping_paper(view: &mut GalleryView) -> WrapResult<RgbaImage> {
    let captured = {
        let hidden = view.suppress_chrome();
        hidden.capture()?
    };
    tracing::debug!(
        width = captured.width(),
        height = captured.height(),
        "captured gallery"
    );
    tile(&captured, TILE_REPEAT, TILE_REPEAT)
}

/// Download name derived from the gallery's search query, e.g. `WrapStar_Tom_Hanks.png`.
pub fn export_file_name(query: Option<&str>) -> String {
    let words: Vec<String> = query
        .unwrap_or_default()
        .split_whitespace()
        .map(|w| w.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return DEFAULT_EXPORT_NAME.to_string();
    }
    format!("WrapStar_{}.png", words.join("_"))
}

pub fn ensure_parent_dir(path: &Path) -> WrapResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
    }
    Ok(())
}

pub fn save_png(img: &RgbaImage, path: &Path) -> WrapResult<()> {
    ensure_parent_dir(path)?;
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
