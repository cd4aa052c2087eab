//! Square thumbnail normalization.
//!
//! The crop window is picked on a grayscale copy scaled to *cover* the target square
//! (shorter edge equals the target edge) with an entropy strategy: slices are trimmed one at
//! a time from whichever end carries less grayscale information, so the busiest region
//! (usually the face in a headshot) survives. Only that window of the source is then
//! resampled to the target size.

use image::{DynamicImage, GrayImage, RgbaImage, imageops::FilterType};

use crate::assets::decode::{decode_image, encode_png};
use crate::foundation::core::THUMBNAIL_SIZE;
use crate::foundation::error::{WrapError, WrapResult};

/// Width of each trimmed strip, in pixels.
const ENTROPY_SLICE: u32 = 8;

/// Longest edge of the grayscale copy the crop window is chosen on.
const ANALYSIS_MAX_EDGE: u32 = 2048;

/// Decode `bytes`, crop to a [`THUMBNAIL_SIZE`] square and re-encode as PNG.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn normalize_thumbnail(bytes: &[u8]) -> WrapResult<Vec<u8>> {
    let img = decode_image(bytes)?;
    let square = entropy_crop(&img, THUMBNAIL_SIZE, THUMBNAIL_SIZE)?;
    encode_png(&DynamicImage::ImageRgba8(square))
}

/// Crop `img` to the `width`:`height` aspect by entropy, then scale the window to size.
///
/// The window is chosen on a grayscale analysis copy at cover scale, capped at
/// [`ANALYSIS_MAX_EDGE`] on its long side, so only the selected window is ever resampled at
/// full size.
pub fn entropy_crop(img: &DynamicImage, width: u32, height: u32) -> WrapResult<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(WrapError::validation("crop target must be non-empty"));
    }
    let (src_w, src_h) = (img.width(), img.height());
    if src_w == 0 || src_h == 0 {
        return Err(WrapError::image("source image has no pixels"));
    }

    let (an_w, an_h) = analysis_size(src_w, src_h, width, height);
    let analysis = if (an_w, an_h) == (src_w, src_h) {
        img.to_luma8()
    } else {
        img.resize_exact(an_w, an_h, FilterType::Triangle).to_luma8()
    };
    let (win_w, win_h) = aspect_window(an_w, an_h, width, height);
    let (an_left, an_top) = entropy_window(&analysis, win_w, win_h);

    let (crop_w, crop_h) = aspect_window(src_w, src_h, width, height);
    let left = rescale_offset(an_left, an_w, src_w, crop_w);
    let top = rescale_offset(an_top, an_h, src_h, crop_h);

    let window = img.crop_imm(left, top, crop_w, crop_h);
    if (crop_w, crop_h) == (width, height) {
        return Ok(window.to_rgba8());
    }
    Ok(window
        .resize_exact(width, height, FilterType::Lanczos3)
        .to_rgba8())
}

/// Size of the analysis copy: cover scale for the target, long edge capped.
fn analysis_size(src_w: u32, src_h: u32, width: u32, height: u32) -> (u32, u32) {
    let cover = f64::max(
        f64::from(width) / f64::from(src_w),
        f64::from(height) / f64::from(src_h),
    );
    let cap = f64::from(ANALYSIS_MAX_EDGE) / f64::from(src_w.max(src_h));
    let scale = cover.min(cap);
    let along = |n: u32| ((f64::from(n) * scale).round() as u32).clamp(1, ANALYSIS_MAX_EDGE);
    (along(src_w), along(src_h))
}

/// Largest `width`:`height` window that fits inside `extent_w`x`extent_h`.
fn aspect_window(extent_w: u32, extent_h: u32, width: u32, height: u32) -> (u32, u32) {
    let (ew, eh) = (u64::from(extent_w), u64::from(extent_h));
    let (tw, th) = (u64::from(width), u64::from(height));
    if ew * th > eh * tw {
        let w = ((eh * tw + th / 2) / th).clamp(1, ew);
        (w as u32, extent_h)
    } else {
        let h = ((ew * th + tw / 2) / tw).clamp(1, eh);
        (extent_w, h as u32)
    }
}

/// Map an offset along an axis of length `from` onto one of length `to`, keeping a window
/// of `window` pixels in bounds.
fn rescale_offset(offset: u32, from: u32, to: u32, window: u32) -> u32 {
    let scaled = (u64::from(offset) * u64::from(to) + u64::from(from) / 2) / u64::from(from);
    (scaled as u32).min(to.saturating_sub(window))
}

/// Top-left corner of the `width`x`height` window picked by entropy trimming.
fn entropy_window(gray: &GrayImage, width: u32, height: u32) -> (u32, u32) {
    let (left, _) = trim_axis(gray.width(), width, |start, len| {
        region_entropy(gray, start, 0, len, gray.height())
    });
    let (top, _) = trim_axis(gray.height(), height, |start, len| {
        region_entropy(gray, left, start, width, len)
    });
    (left, top)
}

/// Shrink `[0, extent)` down to `target` by repeatedly dropping the less interesting end.
///
/// Ties go to the end trimmed less so far, which keeps featureless images centered.
fn trim_axis(extent: u32, target: u32, score: impl Fn(u32, u32) -> f64) -> (u32, u32) {
    let (mut lo, mut hi) = (0u32, extent);
    while hi - lo > target {
        let slice = (hi - lo - target).min(ENTROPY_SLICE);
        let lo_score = score(lo, slice);
        let hi_score = score(hi - slice, slice);
        let trim_lo = if lo_score == hi_score {
            lo <= extent - hi
        } else {
            lo_score < hi_score
        };
        if trim_lo {
            lo += slice;
        } else {
            hi -= slice;
        }
    }
    (lo, hi)
}

/// Shannon entropy (bits) of the luma histogram inside a rectangle.
fn region_entropy(gray: &GrayImage, x: u32, y: u32, w: u32, h: u32) -> f64 {
    let mut histogram = [0u64; 256];
    for py in y..y + h {
        for px in x..x + w {
            histogram[usize::from(gray.get_pixel(px, py).0[0])] += 1;
        }
    }
    let total = u64::from(w) * u64::from(h);
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    histogram
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/normalize.rs"]
mod tests;
