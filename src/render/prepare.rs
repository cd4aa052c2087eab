use image::DynamicImage;
use rayon::prelude::*;

use crate::assets::decode::load_local;
use crate::foundation::error::{WrapError, WrapResult};
use crate::gallery::{descriptor::ImageDescriptor, grid::Gallery};

/// Decoded gallery contents, one entry per occupied slot.
///
/// All IO happens here so that capturing the view is pure pixel work. An entry that fails to
/// decode is logged and left blank, the way a broken image shows up in a page.
#[derive(Clone, Debug, Default)]
pub struct PreparedGallery {
    slots: Vec<Option<DynamicImage>>,
}

impl PreparedGallery {
    pub fn prepare(gallery: &Gallery) -> WrapResult<Self> {
        if let Some(slot) = gallery.entries().iter().position(|d| !d.is_custom()) {
            return Err(WrapError::validation(format!(
                "slot {slot} still points at a remote URL; localize it before preparing"
            )));
        }

        let slots = gallery
            .entries()
            .par_iter()
            .enumerate()
            .map(|(slot, descriptor)| {
                let ImageDescriptor::Custom { src } = descriptor else {
                    return None;
                };
                match load_local(src) {
                    Ok(img) => Some(img),
                    Err(err) => {
                        tracing::warn!(slot, error = %err, "image failed to decode; slot left blank");
                        None
                    }
                }
            })
            .collect();

        Ok(Self { slots })
    }

    pub fn from_images(images: impl IntoIterator<Item = Option<DynamicImage>>) -> Self {
        Self {
            slots: images.into_iter().collect(),
        }
    }

    /// Number of occupied slots (blank-but-occupied slots included).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn image(&self, slot: usize) -> Option<&DynamicImage> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn is_occupied(&self, slot: usize) -> bool {
        slot < self.slots.len()
    }
}
