use image::{Luma, Rgba, RgbaImage};

use super::*;

fn png_of(img: RgbaImage) -> Vec<u8> {
    encode_png(&DynamicImage::ImageRgba8(img)).unwrap()
}

fn noisy(x: u32, y: u32) -> u8 {
    ((x.wrapping_mul(73) ^ y.wrapping_mul(151)).wrapping_mul(2_654_435_761) >> 24) as u8
}

#[test]
fn normalize_always_yields_square_png() {
    for (w, h) in [(400, 200), (90, 300), (150, 150), (1, 1), (151, 1000)] {
        let src = RgbaImage::from_fn(w, h, |x, y| Rgba([noisy(x, y), 40, 90, 255]));
        let out = normalize_thumbnail(&png_of(src)).unwrap();
        assert_eq!(image::guess_format(&out).unwrap(), image::ImageFormat::Png);
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(
            (decoded.width(), decoded.height()),
            (THUMBNAIL_SIZE, THUMBNAIL_SIZE),
            "source {w}x{h}"
        );
    }
}

#[test]
fn normalize_rejects_non_images() {
    assert!(normalize_thumbnail(b"<html>404</html>").is_err());
}

#[test]
fn entropy_window_keeps_busy_left_half() {
    let gray = GrayImage::from_fn(300, 150, |x, y| {
        if x < 150 { Luma([noisy(x, y)]) } else { Luma([200]) }
    });
    assert_eq!(entropy_window(&gray, 150, 150), (0, 0));
}

#[test]
fn entropy_window_keeps_busy_bottom() {
    let gray = GrayImage::from_fn(150, 400, |x, y| {
        if y >= 250 { Luma([noisy(x, y)]) } else { Luma([10]) }
    });
    assert_eq!(entropy_window(&gray, 150, 150), (0, 250));
}

#[test]
fn flat_image_crops_to_center() {
    let gray = GrayImage::from_pixel(310, 150, Luma([128]));
    let (left, top) = entropy_window(&gray, 150, 150);
    assert_eq!(top, 0);
    assert_eq!(left, 80);
}

#[test]
fn region_entropy_of_flat_region_is_zero() {
    let gray = GrayImage::from_pixel(8, 8, Luma([7]));
    assert_eq!(region_entropy(&gray, 0, 0, 8, 8), 0.0);
}

#[test]
fn region_entropy_of_two_even_levels_is_one_bit() {
    let gray = GrayImage::from_fn(8, 8, |x, _| Luma([if x < 4 { 0 } else { 255 }]));
    assert!((region_entropy(&gray, 0, 0, 8, 8) - 1.0).abs() < 1e-12);
}

#[test]
fn entropy_crop_rejects_empty_target() {
    let img = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));
    assert!(entropy_crop(&img, 0, 10).is_err());
}

#[test]
fn extreme_aspect_ratios_yield_square_png() {
    for (w, h) in [(1, 20_000), (20_000, 1)] {
        let src = RgbaImage::from_fn(w, h, |x, y| Rgba([noisy(x, y), 0, 0, 255]));
        let out = normalize_thumbnail(&png_of(src)).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(
            (decoded.width(), decoded.height()),
            (THUMBNAIL_SIZE, THUMBNAIL_SIZE),
            "source {w}x{h}"
        );
    }
}

#[test]
fn analysis_copy_is_bounded() {
    assert_eq!(analysis_size(1, 20_000, 150, 150), (1, ANALYSIS_MAX_EDGE));
    assert_eq!(analysis_size(20_000, 1, 150, 150), (ANALYSIS_MAX_EDGE, 1));
    assert_eq!(analysis_size(400, 200, 150, 150), (300, 150));
    assert_eq!(analysis_size(1, 1, 150, 150), (150, 150));
}

#[test]
fn aspect_window_fits_inside_source() {
    assert_eq!(aspect_window(400, 200, 150, 150), (200, 200));
    assert_eq!(aspect_window(90, 300, 150, 150), (90, 90));
    assert_eq!(aspect_window(1, 20_000, 150, 150), (1, 1));
    assert_eq!(aspect_window(300, 100, 2, 1), (200, 100));
}

#[test]
fn crop_keeps_busy_region_at_source_resolution() {
    // Flat left two thirds, noisy right third.
    let src = RgbaImage::from_fn(900, 300, |x, y| {
        if x >= 600 {
            let v = noisy(x, y);
            Rgba([v, v, v, 255])
        } else {
            Rgba([20, 20, 20, 255])
        }
    });
    let out = entropy_crop(&DynamicImage::ImageRgba8(src), 150, 150).unwrap();
    assert_eq!(out.dimensions(), (150, 150));
    let flat = out.pixels().filter(|p| p.0 == [20, 20, 20, 255]).count();
    assert!(flat < 150 * 150 / 10, "{flat} flat pixels");
}

#[test]
fn rescaled_offset_stays_in_bounds() {
    assert_eq!(rescale_offset(150, 300, 600, 300), 300);
    assert_eq!(rescale_offset(2047, 2048, 20_000, 1), 19_990);
    assert_eq!(rescale_offset(5, 10, 10, 10), 0);
}
