use crate::gallery::{GalleryError, PreparedImage, Variant};
use image::{DynamicImage, ImageFormat, imageops::FilterType};
use tracing::debug;

use super::formats;

/// Prepare a decoded image for the requested variant.
///
/// `source` holds the bytes the image was decoded from. They are returned as-is
/// for the original variant and whenever the image already fits the variant's
/// box; images are never upscaled. Downscaled images are encoded as PNG.
pub fn prepare_image(
    source: Vec<u8>,
    format: ImageFormat,
    image: &DynamicImage,
    variant: Variant,
) -> Result<PreparedImage, GalleryError> {
    let Some(bounds) = variant.bounds() else {
        return Ok(unchanged(source, format));
    };

    if !needs_downscale(image, bounds) {
        debug!(
            "Image {}x{} already fits {} ({}x{})",
            image.width(),
            image.height(),
            variant,
            bounds.0,
            bounds.1
        );
        return Ok(unchanged(source, format));
    }

    let resized = resize_image(image, bounds);
    debug!(
        "Resized image from {}x{} to {}x{} for {}",
        image.width(),
        image.height(),
        resized.width(),
        resized.height(),
        variant
    );

    Ok(PreparedImage {
        bytes: formats::png::encode(&resized)?,
        content_type: formats::png::MIME_TYPE.to_string(),
    })
}

/// True when either dimension exceeds the bounding box.
pub fn needs_downscale(image: &DynamicImage, (max_width, max_height): (u32, u32)) -> bool {
    image.width() > max_width || image.height() > max_height
}

/// Resize image preserving aspect ratio so the longest side fits the box
fn resize_image(image: &DynamicImage, (max_width, max_height): (u32, u32)) -> DynamicImage {
    image.resize(max_width, max_height, FilterType::Lanczos3)
}

fn unchanged(source: Vec<u8>, format: ImageFormat) -> PreparedImage {
    PreparedImage {
        bytes: source,
        content_type: format.to_mime_type().to_string(),
    }
}
