use crate::foundation::error::{WrapError, WrapResult};
use crate::gallery::grid::Gallery;

/// One in-progress drag over the gallery grid.
///
/// Reordering is live: every [`hover`](DragReorder::hover) over another occupied slot swaps
/// the dragged entry into that slot, and the drag continues from its new position. Dropping
/// only ends the gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragReorder {
    index: usize,
}

impl DragReorder {
    /// Pick up the entry in slot `index`. Empty slots cannot be dragged.
    pub fn begin(gallery: &Gallery, index: usize) -> WrapResult<Self> {
        if gallery.get(index).is_none() {
            return Err(WrapError::validation(format!(
                "cannot drag empty slot {index}"
            )));
        }
        Ok(Self { index })
    }

    /// Current slot of the dragged entry.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Pointer is over slot `target`. Returns whether the gallery changed.
    pub fn hover(&mut self, gallery: &mut Gallery, target: usize) -> bool {
        if target == self.index || target >= gallery.len() || self.index >= gallery.len() {
            return false;
        }
        if gallery.swap(self.index, target).is_err() {
            return false;
        }
        tracing::debug!(from = self.index, to = target, "drag hover swapped slots");
        self.index = target;
        true
    }

    /// Keep tracking the dragged entry after slots `a` and `b` were exchanged elsewhere.
    pub fn follow_swap(&mut self, a: usize, b: usize) {
        if self.index == a {
            self.index = b;
        } else if self.index == b {
            self.index = a;
        }
    }

    /// End the drag, returning the final slot of the dragged entry.
    pub fn release(self) -> usize {
        self.index
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/drag.rs"]
mod tests;
