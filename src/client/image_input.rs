//! Single-image form input accepting a file picker, drag and drop, or a
//! clipboard paste.
//!
//! All three capture paths funnel into one transition: a single accepted
//! file becomes the selection and gets a temporary object URL for its
//! preview. The URL is revoked once the preview has loaded, when another
//! file replaces it, or when the input is unmounted.

use std::collections::HashSet;

use thiserror::Error;

use crate::images::{accepted_extension, ImageUpload};

/// Source of temporary preview URLs for selected files
pub trait ObjectUrls {
    fn create(&mut self, file: &ImageUpload) -> String;
    fn revoke(&mut self, url: &str);
}

/// In-process [`ObjectUrls`] that tracks which URLs are still live
#[derive(Debug, Default)]
pub struct InMemoryObjectUrls {
    next_id: u64,
    live: HashSet<String>,
}

impl InMemoryObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.live.contains(url)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl ObjectUrls for InMemoryObjectUrls {
    fn create(&mut self, file: &ImageUpload) -> String {
        self.next_id += 1;
        let url = format!("blob:recipebox/{}/{}", self.next_id, file.filename);
        self.live.insert(url.clone());
        url
    }

    fn revoke(&mut self, url: &str) {
        self.live.remove(url);
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageInputError {
    #[error("'{0}' is not a supported image. Use .jpeg, .jpg, .gif or .png")]
    UnsupportedType(String),

    #[error("Drop a single image ({0} files received)")]
    MultipleFiles(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageInputState {
    Empty,
    /// File chosen, preview still loading from a live object URL
    Selected { file: ImageUpload, preview_url: String },
    /// Preview rendered; its object URL has been revoked
    PreviewReady { file: ImageUpload, preview_url: String },
}

pub struct ImageInput<U: ObjectUrls> {
    state: ImageInputState,
    urls: U,
}

impl<U: ObjectUrls> ImageInput<U> {
    pub fn new(urls: U) -> Self {
        Self {
            state: ImageInputState::Empty,
            urls,
        }
    }

    pub fn state(&self) -> &ImageInputState {
        &self.state
    }

    pub fn object_urls(&self) -> &U {
        &self.urls
    }

    pub fn selected_file(&self) -> Option<&ImageUpload> {
        match &self.state {
            ImageInputState::Empty => None,
            ImageInputState::Selected { file, .. } | ImageInputState::PreviewReady { file, .. } => {
                Some(file)
            }
        }
    }

    /// URL the preview image is rendered from
    pub fn preview_url(&self) -> Option<&str> {
        match &self.state {
            ImageInputState::Empty => None,
            ImageInputState::Selected { preview_url, .. }
            | ImageInputState::PreviewReady { preview_url, .. } => Some(preview_url),
        }
    }

    /// File picker change. The picker is single-file; extra entries are
    /// ignored.
    pub fn pick(&mut self, files: Vec<ImageUpload>) -> Result<(), ImageInputError> {
        match files.into_iter().next() {
            Some(file) => self.select(file),
            None => Ok(()),
        }
    }

    pub fn drop_files(&mut self, files: Vec<ImageUpload>) -> Result<(), ImageInputError> {
        if files.len() > 1 {
            return Err(ImageInputError::MultipleFiles(files.len()));
        }
        self.pick(files)
    }

    /// Clipboard paste takes the first file on the clipboard
    pub fn paste(&mut self, files: Vec<ImageUpload>) -> Result<(), ImageInputError> {
        self.pick(files)
    }

    pub fn preview_loaded(&mut self) {
        let state = std::mem::replace(&mut self.state, ImageInputState::Empty);
        self.state = match state {
            ImageInputState::Selected { file, preview_url } => {
                self.urls.revoke(&preview_url);
                ImageInputState::PreviewReady { file, preview_url }
            }
            other => other,
        };
    }

    /// Release any outstanding object URL and forget the selection
    pub fn unmount(&mut self) {
        self.revoke_outstanding();
        self.state = ImageInputState::Empty;
    }

    fn select(&mut self, file: ImageUpload) -> Result<(), ImageInputError> {
        if accepted_extension(&file.filename).is_none() {
            return Err(ImageInputError::UnsupportedType(file.filename));
        }

        self.revoke_outstanding();
        let preview_url = self.urls.create(&file);
        self.state = ImageInputState::Selected { file, preview_url };
        Ok(())
    }

    fn revoke_outstanding(&mut self) {
        if let ImageInputState::Selected { preview_url, .. } = &self.state {
            self.urls.revoke(preview_url);
        }
    }
}

impl<U: ObjectUrls> Drop for ImageInput<U> {
    fn drop(&mut self) {
        self.revoke_outstanding();
    }
}
