use std::ops::Deref;

use image::{Rgba, RgbaImage, imageops::FilterType};

use crate::foundation::core::{GRID_COLUMNS, GRID_ROWS, GRID_SLOTS, THUMBNAIL_SIZE};
use crate::foundation::error::{WrapError, WrapResult};
use crate::render::prepare::PreparedGallery;

const PLACEHOLDER_GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);
const REMOVE_RED: Rgba<u8> = Rgba([220, 38, 38, 255]);
const REMOVE_MARK: Rgba<u8> = Rgba([255, 255, 255, 255]);
const DASH_ON: u32 = 6;
const DASH_OFF: u32 = 4;
const REMOVE_CONTROL_SIZE: u32 = 20;

/// Pixel geometry of the 5x5 gallery grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalleryLayout {
    /// Inner edge of one slot.
    pub cell: u32,
    /// Placeholder border thickness, drawn outside the cell.
    pub border: u32,
    /// Space between neighbouring slots.
    pub gap: u32,
    /// Space between the grid and the container edge.
    pub padding: u32,
    pub background: Rgba<u8>,
}

impl Default for GalleryLayout {
    fn default() -> Self {
        Self {
            cell: THUMBNAIL_SIZE,
            border: 2,
            gap: 10,
            padding: 10,
            background: Rgba([255, 255, 255, 255]),
        }
    }
}

impl GalleryLayout {
    fn slot_span(&self) -> u32 {
        self.cell + 2 * self.border
    }

    /// Rendered container size in pixels.
    pub fn size(&self) -> (u32, u32) {
        let span = self.slot_span();
        let along = |n: u32| 2 * self.padding + n * span + n.saturating_sub(1) * self.gap;
        (along(GRID_COLUMNS), along(GRID_ROWS))
    }

    /// Top-left corner of slot `slot`'s outer (bordered) box.
    pub fn slot_origin(&self, slot: usize) -> (u32, u32) {
        let slot = slot as u32;
        let (col, row) = (slot % GRID_COLUMNS, slot / GRID_COLUMNS);
        let step = self.slot_span() + self.gap;
        (self.padding + col * step, self.padding + row * step)
    }
}

/// Which UI decorations are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chrome {
    pub remove_controls: bool,
    pub placeholder_borders: bool,
}

impl Chrome {
    pub const VISIBLE: Self = Self {
        remove_controls: true,
        placeholder_borders: true,
    };
    pub const HIDDEN: Self = Self {
        remove_controls: false,
        placeholder_borders: false,
    };
}

/// Offscreen rendition of the gallery container.
#[derive(Debug)]
pub struct GalleryView {
    layout: GalleryLayout,
    chrome: Chrome,
    prepared: PreparedGallery,
}

impl GalleryView {
    pub fn new(prepared: PreparedGallery) -> Self {
        Self::with_layout(prepared, GalleryLayout::default())
    }

    pub fn with_layout(prepared: PreparedGallery, layout: GalleryLayout) -> Self {
        Self {
            layout,
            chrome: Chrome::VISIBLE,
            prepared,
        }
    }

    pub fn layout(&self) -> &GalleryLayout {
        &self.layout
    }

    pub fn chrome(&self) -> Chrome {
        self.chrome
    }

    pub fn set_chrome(&mut self, chrome: Chrome) {
        self.chrome = chrome;
    }

    /// Hide remove controls and placeholder borders until the returned guard is dropped.
    ///
    /// The previous chrome state comes back when the guard goes out of scope, including on
    /// early return through `?`.
    pub fn suppress_chrome(&mut self) -> ChromeSuppression<'_> {
        let saved = self.chrome;
        self.chrome = Chrome::HIDDEN;
        ChromeSuppression { view: self, saved }
    }

    /// Rasterize the container as currently decorated.
    pub fn capture(&self) -> WrapResult<RgbaImage> {
        let layout = &self.layout;
        if layout.cell == 0 {
            return Err(WrapError::validation(
                "gallery layout has zero-sized cells",
            ));
        }

        let (width, height) = layout.size();
        let mut canvas = RgbaImage::from_pixel(width, height, layout.background);

        for slot in 0..GRID_SLOTS {
            let (x, y) = layout.slot_origin(slot);
            if self.chrome.placeholder_borders && layout.border > 0 {
                draw_dashed_border(&mut canvas, x, y, layout.slot_span(), layout.border);
            }

            let (cx, cy) = (x + layout.border, y + layout.border);
            if let Some(img) = self.prepared.image(slot) {
                let fitted = img
                    .resize_to_fill(layout.cell, layout.cell, FilterType::Triangle)
                    .to_rgba8();
                image::imageops::overlay(&mut canvas, &fitted, i64::from(cx), i64::from(cy));
            }

            if self.chrome.remove_controls && self.prepared.is_occupied(slot) {
                let size = REMOVE_CONTROL_SIZE.min(layout.cell);
                draw_remove_control(&mut canvas, cx + layout.cell - size, cy, size);
            }
        }

        Ok(canvas)
    }
}

/// Scoped chrome suppression; see [`GalleryView::suppress_chrome`].
pub struct ChromeSuppression<'a> {
    view: &'a mut GalleryView,
    saved: Chrome,
}

impl Deref for ChromeSuppression<'_> {
    type Target = GalleryView;

    fn deref(&self) -> &GalleryView {
        &*self.view
    }
}

impl Drop for ChromeSuppression<'_> {
    fn drop(&mut self) {
        self.view.chrome = self.saved;
    }
}

fn draw_dashed_border(canvas: &mut RgbaImage, x: u32, y: u32, span: u32, thickness: u32) {
    let dashed = |i: u32| i % (DASH_ON + DASH_OFF) < DASH_ON;
    for i in 0..span {
        if !dashed(i) {
            continue;
        }
        for t in 0..thickness {
            put(canvas, x + i, y + t, PLACEHOLDER_GRAY);
            put(canvas, x + i, y + span - 1 - t, PLACEHOLDER_GRAY);
            put(canvas, x + t, y + i, PLACEHOLDER_GRAY);
            put(canvas, x + span - 1 - t, y + i, PLACEHOLDER_GRAY);
        }
    }
}

fn draw_remove_control(canvas: &mut RgbaImage, x: u32, y: u32, size: u32) {
    let inset = size / 4;
    for dy in 0..size {
        for dx in 0..size {
            let on_mark = dx >= inset
                && dx < size - inset
                && (dx.abs_diff(dy) <= 1 || (dx + dy).abs_diff(size - 1) <= 1);
            put(canvas, x + dx, y + dy, if on_mark { REMOVE_MARK } else { REMOVE_RED });
        }
    }
}

fn put(canvas: &mut RgbaImage, x: u32, y: u32, px: Rgba<u8>) {
    if x < canvas.width() && y < canvas.height() {
        canvas.put_pixel(x, y, px);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/view.rs"]
mod tests;
