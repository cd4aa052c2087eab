use crate::foundation::core::GRID_SLOTS;
use crate::foundation::error::{WrapError, WrapResult};
use crate::gallery::descriptor::ImageDescriptor;

/// Ordered gallery contents, viewed as [`GRID_SLOTS`] fixed slots.
///
/// Entries are packed: slot `i` holds entry `i` when `i < len()` and is empty otherwise.
/// Removing an entry shifts every later entry one slot to the left.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gallery {
    entries: Vec<ImageDescriptor>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= GRID_SLOTS
    }

    pub fn entries(&self) -> &[ImageDescriptor] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ImageDescriptor> {
        self.entries.get(index)
    }

    /// All slots in display order, `None` for empty ones. Always yields [`GRID_SLOTS`] items.
    pub fn slots(&self) -> impl Iterator<Item = Option<&ImageDescriptor>> + '_ {
        (0..GRID_SLOTS).map(|i| self.entries.get(i))
    }

    /// Replace the whole gallery, keeping at most [`GRID_SLOTS`] entries in the given order.
    pub fn replace_all(&mut self, descriptors: impl IntoIterator<Item = ImageDescriptor>) {
        self.entries = descriptors.into_iter().take(GRID_SLOTS).collect();
    }

    /// Append one entry. Fails with [`WrapError::GalleryFull`] and leaves the gallery untouched
    /// when every slot is taken.
    pub fn push(&mut self, descriptor: ImageDescriptor) -> WrapResult<()> {
        if self.is_full() {
            return Err(WrapError::gallery_full());
        }
        self.entries.push(descriptor);
        Ok(())
    }

    /// Splice out entry `index`; later entries move one slot left.
    pub fn remove(&mut self, index: usize) -> WrapResult<ImageDescriptor> {
        self.check_index(index)?;
        Ok(self.entries.remove(index))
    }

    /// Exchange the entries at `a` and `b`.
    pub fn swap(&mut self, a: usize, b: usize) -> WrapResult<()> {
        self.check_index(a)?;
        self.check_index(b)?;
        self.entries.swap(a, b);
        Ok(())
    }

    fn check_index(&self, index: usize) -> WrapResult<()> {
        if index >= self.entries.len() {
            return Err(WrapError::validation(format!(
                "slot {index} is empty (gallery holds {} images)",
                self.entries.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/grid.rs"]
mod tests;
