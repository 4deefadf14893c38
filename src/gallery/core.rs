use super::image_processing::prepare_image;
use super::{Gallery, GalleryError, ImageEntry, PreparedImage, Variant, strip_image_extension};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

impl Gallery {
    pub fn is_folder(&self, relative_path: &str) -> bool {
        self.join(relative_path)
            .map(|path| path.is_dir())
            .unwrap_or(false)
    }

    /// Names of the immediate subdirectories of a gallery folder.
    pub fn folders(&self, relative_path: &str) -> Result<Vec<String>, GalleryError> {
        let full_path = self.join(relative_path)?;

        debug!("Scanning folders in: {:?}", full_path);

        let mut folders = Vec::new();
        for entry in std::fs::read_dir(&full_path)? {
            let entry = entry?;
            if entry.path().is_dir() {
                folders.push(entry.file_name().to_string_lossy().to_string());
            }
        }

        folders.sort();
        Ok(folders)
    }

    /// Image files of a gallery folder, oldest modification first.
    ///
    /// Files are recognized by probing their content, so extension-less images
    /// are listed and mislabelled files are not.
    pub fn images(&self, relative_path: &str) -> Result<Vec<ImageEntry>, GalleryError> {
        let full_path = self.join(relative_path)?;

        debug!("Scanning images in: {:?}", full_path);

        let mut images = Vec::new();
        for entry in std::fs::read_dir(&full_path)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(dimensions) = probe_dimensions(&path) else {
                debug!("Skipping non-image file: {:?}", path);
                continue;
            };

            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            let file_name = entry.file_name().to_string_lossy().to_string();

            images.push(ImageEntry {
                display_name: strip_image_extension(&file_name).to_string(),
                file_name,
                dimensions,
                modified,
            });
        }

        images.sort_by(|a, b| {
            a.modified
                .cmp(&b.modified)
                .then_with(|| a.file_name.cmp(&b.file_name))
        });

        debug!("Found {} images", images.len());
        Ok(images)
    }

    /// First file in `directory` whose name without image extension is `name`.
    pub fn find_image(
        &self,
        directory: &str,
        name: &str,
    ) -> Result<Option<PathBuf>, GalleryError> {
        let full_path = self.join(directory)?;

        let mut candidates: Vec<PathBuf> = std::fs::read_dir(&full_path)?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        candidates.sort();

        Ok(candidates.into_iter().find(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|file_name| strip_image_extension(file_name) == name)
        }))
    }

    /// Loads the image identified by `name` and prepares it for `variant`.
    ///
    /// `Ok(None)` when no file matches; decoding failures are returned as errors.
    pub fn load_variant(
        &self,
        directory: &str,
        name: &str,
        variant: Variant,
    ) -> Result<Option<PreparedImage>, GalleryError> {
        let Some(path) = self.find_image(directory, name)? else {
            debug!("No image named {:?} in {:?}", name, directory);
            return Ok(None);
        };

        debug!("Loading image {:?} for variant {}", path, variant);

        let source = std::fs::read(&path)?;
        let reader = image::ImageReader::new(Cursor::new(&source)).with_guessed_format()?;
        let format = reader.format().ok_or(GalleryError::NotFound)?;
        let image = reader.decode()?;

        prepare_image(source, format, &image, variant).map(Some)
    }
}

fn probe_dimensions(path: &Path) -> Option<(u32, u32)> {
    let reader = image::ImageReader::open(path)
        .ok()?
        .with_guessed_format()
        .ok()?;
    reader.format()?;
    reader.into_dimensions().ok()
}
