use std::io::Cursor;

use anyhow::{Context, Result};
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use tracing::debug;

const STORAGE_JPEG_QUALITY: u8 = 100;

/// Decode a picked or captured image in any supported format and re-encode it
/// as a full-quality JPEG for the blob store.
pub fn encode_for_storage(bytes: &[u8]) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory(bytes).context("decode picked image")?;
    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());

    let mut jpeg_bytes = Vec::new();
    let encoder =
        JpegEncoder::new_with_quality(Cursor::new(&mut jpeg_bytes), STORAGE_JPEG_QUALITY);
    rgb.write_with_encoder(encoder).context("encode image as JPEG")?;

    debug!(
        width = rgb.width(),
        height = rgb.height(),
        size = jpeg_bytes.len(),
        "normalized image"
    );
    Ok(jpeg_bytes)
}
