use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Page has no gallery part")]
    MissingGalleryPart,

    #[error("Invalid path")]
    InvalidPath,

    #[error("Not found")]
    NotFound,
}
