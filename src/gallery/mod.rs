// Gallery module - directory backed galleries bound to pages
mod behavior;
mod core;
mod error;
pub mod image_processing;
mod resolve;
mod tags;
mod types;

// Re-export public items
pub use behavior::GalleryBehavior;
pub use error::GalleryError;
pub use resolve::{IMAGE_EXTENSIONS, lightbox_asset, strip_image_extension};
pub use tags::GalleryTags;
pub use types::*;

use std::path::{Path, PathBuf};

/// A gallery rooted at a directory below the public web root.
#[derive(Debug, Clone)]
pub struct Gallery {
    root: PathBuf,
}

impl Gallery {
    pub fn new(public_root: &Path, gallery_path: &str) -> Self {
        let gallery_path = gallery_path.trim().trim_matches('/');
        Self {
            root: public_root.join(gallery_path),
        }
    }

    pub fn local_path(&self) -> &Path {
        &self.root
    }

    /// Joins a `/` separated path below the gallery root. Parent references are
    /// refused so a request can never leave the gallery directory.
    pub(crate) fn join(&self, relative: &str) -> Result<PathBuf, GalleryError> {
        let mut path = self.root.clone();
        for segment in relative.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return Err(GalleryError::InvalidPath),
                s if s.contains('\\') || Path::new(s).is_absolute() => {
                    return Err(GalleryError::InvalidPath);
                }
                s => path.push(s),
            }
        }
        Ok(path)
    }
}
