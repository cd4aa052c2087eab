use image::DynamicImage;

use super::*;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn assert_close(actual: &Rgba<u8>, expected: [u8; 4]) {
    for (a, e) in actual.0.iter().zip(expected) {
        assert!(a.abs_diff(e) <= 1, "{actual:?} vs {expected:?}");
    }
}

fn solid(px: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(30, 60, Rgba(px)))
}

#[test]
fn default_layout_fits_five_thumbnails_per_row() {
    let layout = GalleryLayout::default();
    assert_eq!(layout.size(), (830, 830));
    assert_eq!(layout.slot_origin(0), (10, 10));
    assert_eq!(layout.slot_origin(6), (174, 174));
    assert_eq!(layout.slot_origin(24), (666, 666));
}

#[test]
fn occupied_slot_shows_image_and_remove_control() {
    let layout = GalleryLayout::default();
    let view = GalleryView::new(PreparedGallery::from_images([Some(solid([0, 200, 0, 255]))]));
    let shot = view.capture().unwrap();

    let (x, y) = layout.slot_origin(0);
    let (cx, cy) = (x + layout.border, y + layout.border);
    // Lower-left of the cell is image, top-right corner is the remove control.
    assert_close(shot.get_pixel(cx + 5, cy + layout.cell - 5), [0, 200, 0, 255]);
    assert_eq!(*shot.get_pixel(cx + layout.cell - 1, cy), REMOVE_RED);

    // Empty slot 1 gets a border but no control.
    let (x1, y1) = layout.slot_origin(1);
    assert_eq!(*shot.get_pixel(x1, y1), PLACEHOLDER_GRAY);
    let (c1x, c1y) = (x1 + layout.border, y1 + layout.border);
    assert_eq!(*shot.get_pixel(c1x + layout.cell - 1, c1y), WHITE);
}

#[test]
fn hidden_chrome_draws_only_images() {
    let layout = GalleryLayout::default();
    let mut view =
        GalleryView::new(PreparedGallery::from_images([Some(solid([9, 9, 9, 255]))]));
    view.set_chrome(Chrome::HIDDEN);
    let shot = view.capture().unwrap();

    let (x, y) = layout.slot_origin(0);
    assert_eq!(*shot.get_pixel(x, y), WHITE);
    assert_close(
        shot.get_pixel(x + layout.border + layout.cell - 1, y + layout.border),
        [9, 9, 9, 255],
    );
}

#[test]
fn capture_size_matches_layout() {
    let view = GalleryView::new(PreparedGallery::default());
    let shot = view.capture().unwrap();
    assert_eq!(shot.dimensions(), view.layout().size());
}
