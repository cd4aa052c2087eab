use std::{io::Cursor, path::Path};

use anyhow::Context;
use image::{DynamicImage, ImageFormat};

use crate::foundation::error::WrapResult;
use crate::gallery::descriptor::LocalHandle;

pub fn decode_image(bytes: &[u8]) -> WrapResult<DynamicImage> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(img)
}

pub fn read_image(path: &Path) -> WrapResult<DynamicImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let img = image::load_from_memory(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(img)
}

/// Decode whatever a [`LocalHandle`] points at.
pub fn load_local(handle: &LocalHandle) -> WrapResult<DynamicImage> {
    match handle {
        LocalHandle::File(path) => read_image(path),
        LocalHandle::Blob(bytes) => decode_image(bytes),
    }
}

pub fn encode_png(img: &DynamicImage) -> WrapResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// MIME type guessed from the leading magic bytes, if they look like a known image format.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes)
        .ok()
        .map(|format| format.to_mime_type())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
