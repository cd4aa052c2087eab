use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::assets::decode::sniff_mime;
use crate::foundation::error::{WrapError, WrapResult};
use crate::gallery::descriptor::ImageDescriptor;

/// File extensions accepted by the folder picker (compared lower-cased).
pub const ALLOWED_EXTENSIONS: [&str; 8] =
    ["png", "gif", "tiff", "tif", "jpeg", "jpg", "bmp", "raw"];

/// MIME types accepted as an alternate pass when the extension does not match.
pub const ALLOWED_MIME_TYPES: [&str; 5] = [
    "image/png",
    "image/gif",
    "image/tiff",
    "image/jpeg",
    "image/bmp",
];

const SNIFF_LEN: u64 = 64;

/// One file from a folder selection that qualified as an image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalImageCandidate {
    pub path: PathBuf,
    pub name: String,
    /// Sniffed MIME type; only computed when the extension alone did not qualify.
    pub mime: Option<&'static str>,
}

impl LocalImageCandidate {
    pub fn descriptor(&self) -> ImageDescriptor {
        ImageDescriptor::file(self.path.clone())
    }
}

/// Candidates from the most recent successful folder selection.
#[derive(Clone, Debug, Default)]
pub struct FilePicker {
    candidates: Vec<LocalImageCandidate>,
}

impl FilePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidates(&self) -> &[LocalImageCandidate] {
        &self.candidates
    }

    pub fn get(&self, index: usize) -> Option<&LocalImageCandidate> {
        self.candidates.get(index)
    }

    /// Scan `dir` and replace the current candidates.
    ///
    /// When nothing qualifies the previous candidates are kept and
    /// [`WrapError::NoValidImages`] is returned.
    pub fn select_folder(&mut self, dir: &Path) -> WrapResult<usize> {
        let found = scan_folder(dir)?;
        if found.is_empty() {
            return Err(WrapError::NoValidImages);
        }
        self.candidates = found;
        Ok(self.candidates.len())
    }
}

/// Recursively list the image files under `dir`, sorted by path.
pub fn scan_folder(dir: &Path) -> WrapResult<Vec<LocalImageCandidate>> {
    if !dir.is_dir() {
        return Err(WrapError::validation(format!(
            "'{}' is not a directory",
            dir.display()
        )));
    }

    let files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) if e.file_type().is_file() => Some(e.into_path()),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable folder entry");
                None
            }
        })
        .collect();

    let mut out: Vec<LocalImageCandidate> = files.par_iter().filter_map(|p| classify(p)).collect();
    out.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(out)
}

pub fn extension_allowed(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

fn classify(path: &Path) -> Option<LocalImageCandidate> {
    let name = path.file_name()?.to_string_lossy().into_owned();
    let by_extension = extension_allowed(path);
    let mime = if by_extension { None } else { sniff_file(path) };
    tracing::debug!(file = %name, by_extension, mime = ?mime, "classified folder entry");

    let by_mime = mime.is_some_and(|m| ALLOWED_MIME_TYPES.contains(&m));
    (by_extension || by_mime).then(|| LocalImageCandidate {
        path: path.to_path_buf(),
        name,
        mime,
    })
}

fn sniff_file(path: &Path) -> Option<&'static str> {
    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)
        .ok()?
        .take(SNIFF_LEN)
        .read_to_end(&mut head)
        .ok()?;
    sniff_mime(&head)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/picker.rs"]
mod tests;
