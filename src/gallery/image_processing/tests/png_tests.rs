use crate::gallery::image_processing::formats::png;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};

#[test]
fn test_png_encoding_keeps_transparency() {
    // Semi-transparent
    let img = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(50, 40, Rgba([255u8, 128, 64, 128])));

    let bytes = png::encode(&img).unwrap();
    assert_eq!(&bytes[0..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
    assert!(
        decoded.color().has_alpha(),
        "Encoded PNG lost alpha channel"
    );
    assert_eq!((decoded.width(), decoded.height()), (50, 40));
}

#[test]
fn test_png_is_lossless() {
    let img = DynamicImage::ImageRgb8(ImageBuffer::from_fn(16, 16, |x, y| {
        image::Rgb([(x * 16) as u8, (y * 16) as u8, 7u8])
    }));

    let bytes = png::encode(&img).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!(decoded.to_rgb8().as_raw(), img.to_rgb8().as_raw());
}
