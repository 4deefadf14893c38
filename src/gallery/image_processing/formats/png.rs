use image::{DynamicImage, codecs::png::PngEncoder};
use tracing::debug;

use crate::gallery::GalleryError;

pub const MIME_TYPE: &str = "image/png";

/// Encode image as PNG into memory
pub fn encode(image: &DynamicImage) -> Result<Vec<u8>, GalleryError> {
    let mut buffer = Vec::new();
    let encoder = PngEncoder::new(&mut buffer);
    image.write_with_encoder(encoder)?;
    debug!("Encoded PNG: {} bytes", buffer.len());
    Ok(buffer)
}
