use std::path::Path;

use crate::assets::picker::FilePicker;
use crate::client::search::SearchClient;
use crate::foundation::error::{WrapError, WrapResult};
use crate::gallery::{descriptor::ImageDescriptor, drag::DragReorder, grid::Gallery};
use crate::render::{
    compose::export_file_name,
    prepare::PreparedGallery,
    view::{GalleryLayout, GalleryView},
};
use crate::session::ops::GridOp;

/// Everything one user works with: the gallery, the latest folder selection, the query the
/// gallery came from, and the drag in progress.
#[derive(Clone, Debug, Default)]
pub struct WrapSession {
    gallery: Gallery,
    picker: FilePicker,
    query: Option<String>,
    drag: Option<DragReorder>,
}

impl WrapSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn picker(&self) -> &FilePicker {
        &self.picker
    }

    /// Query of the search that last filled the gallery.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn drag(&self) -> Option<DragReorder> {
        self.drag
    }

    /// Replace the gallery with search results. A later call always wins.
    pub fn apply_search(&mut self, query: &str, results: Vec<ImageDescriptor>) {
        self.gallery.replace_all(results);
        let query = query.trim();
        self.query = (!query.is_empty()).then(|| query.to_string());
        self.drag = None;
        tracing::info!(query, images = self.gallery.len(), "gallery filled from search");
    }

    /// Search through `client` and fill the gallery. On failure the gallery is unchanged.
    pub async fn search(&mut self, client: &SearchClient, name: &str) -> WrapResult<usize> {
        let results = client.search(name).await?;
        self.apply_search(name, results);
        Ok(self.gallery.len())
    }

    pub fn select_folder(&mut self, dir: &Path) -> WrapResult<usize> {
        let count = self.picker.select_folder(dir)?;
        tracing::info!(dir = %dir.display(), count, "folder selected");
        Ok(count)
    }

    /// Append picker candidate `index` to the gallery.
    pub fn add_local(&mut self, index: usize) -> WrapResult<()> {
        let candidate = self.picker.get(index).ok_or_else(|| {
            WrapError::validation(format!(
                "no local image {index} (folder holds {})",
                self.picker.candidates().len()
            ))
        })?;
        self.gallery.push(candidate.descriptor())
    }

    pub fn add_remote(&mut self, url: &str) -> WrapResult<()> {
        let url = url.trim();
        if url.is_empty() {
            return Err(WrapError::validation("image url is empty"));
        }
        self.gallery.push(ImageDescriptor::remote(url))
    }

    /// Remove slot `index`. Any drag in progress is dropped since slots shift.
    pub fn remove(&mut self, index: usize) -> WrapResult<ImageDescriptor> {
        let removed = self.gallery.remove(index)?;
        self.drag = None;
        Ok(removed)
    }

    /// Exchange slots `a` and `b`. A drag in progress follows its entry.
    pub fn swap(&mut self, a: usize, b: usize) -> WrapResult<()> {
        self.gallery.swap(a, b)?;
        if let Some(drag) = self.drag.as_mut() {
            drag.follow_swap(a, b);
        }
        Ok(())
    }

    pub fn begin_drag(&mut self, index: usize) -> WrapResult<()> {
        self.drag = Some(DragReorder::begin(&self.gallery, index)?);
        Ok(())
    }

    /// Returns whether the gallery changed; `false` when nothing is being dragged.
    pub fn hover(&mut self, target: usize) -> bool {
        match self.drag.as_mut() {
            Some(drag) => drag.hover(&mut self.gallery, target),
            None => false,
        }
    }

    /// Final slot of the dragged entry, if a drag was in progress.
    pub fn end_drag(&mut self) -> Option<usize> {
        self.drag.take().map(DragReorder::release)
    }

    pub fn apply(&mut self, op: GridOp) -> WrapResult<()> {
        match op {
            GridOp::AddLocal(index) => self.add_local(index),
            GridOp::AddUrl(url) => self.add_remote(&url),
            GridOp::Swap(a, b) => self.swap(a, b),
            GridOp::Remove(index) => self.remove(index).map(drop),
        }
    }

    /// Fetch every remote entry through the proxy. Entries that fail are dropped.
    pub async fn localize(&mut self, client: &SearchClient) {
        if self.gallery.entries().iter().all(ImageDescriptor::is_custom) {
            return;
        }
        let entries = self.gallery.entries().to_vec();
        let localized = client.localize(entries).await;
        self.gallery.replace_all(localized);
        self.drag = None;
    }

    /// Decode the gallery and lay it out for capture.
    pub fn view(&self, layout: GalleryLayout) -> WrapResult<GalleryView> {
        let prepared = PreparedGallery::prepare(&self.gallery)?;
        Ok(GalleryView::with_layout(prepared, layout))
    }

    pub fn export_file_name(&self) -> String {
        export_file_name(self.query())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
