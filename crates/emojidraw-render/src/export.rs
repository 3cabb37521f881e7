//! Image export and payload helpers.
//!
//! Turns rasterized bitmaps into the inline base64 payloads the emoji
//! service consumes, and decodes the payloads it returns. Submissions are
//! letterboxed onto a white square and JPEG-encoded; history payloads are
//! PNG data URIs.

use crate::rasterizer::RasterError;
use base64::{engine::general_purpose::STANDARD, Engine};
use emojidraw_core::api::strip_data_uri_prefix;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Side length of the square submission image.
pub const SUBMIT_IMAGE_SIDE: u32 = 512;

/// JPEG quality for submission payloads.
pub const SUBMIT_JPEG_QUALITY: u8 = 80;

/// Encode a bitmap as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RasterError> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| RasterError::Encode(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Encode a bitmap as JPEG bytes at the given quality (1–100).
///
/// The alpha channel is dropped; rasterized drawings are opaque anyway.
pub fn encode_jpeg(image: &RgbaImage, quality: u8) -> Result<Vec<u8>, RasterError> {
    let rgb = DynamicImage::ImageRgba8(image.clone()).into_rgb8();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(&rgb)
        .map_err(|e| RasterError::Encode(e.to_string()))?;
    Ok(buf)
}

/// Wrap encoded image bytes in a `data:` URI.
pub fn to_data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Decode an inline image payload: strips an optional data-URI marker,
/// base64-decodes, and decodes the image bytes.
pub fn decode_inline_image(payload: &str) -> Result<DynamicImage, RasterError> {
    let bare = strip_data_uri_prefix(payload).trim();
    let bytes = STANDARD
        .decode(bare)
        .map_err(|e| RasterError::Decode(format!("bad base64: {}", e)))?;
    image::load_from_memory(&bytes).map_err(|e| RasterError::Decode(e.to_string()))
}

/// Fit an image onto an opaque white square of the given side length,
/// preserving aspect ratio and centering.
pub fn fit_to_square(image: &DynamicImage, side: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(side, side, Rgba([255, 255, 255, 255]));
    let (w, h) = (image.width(), image.height());
    if w == 0 || h == 0 || side == 0 {
        return canvas;
    }

    let scale = (side as f64 / w as f64).min(side as f64 / h as f64);
    let sw = ((w as f64 * scale).round() as u32).clamp(1, side);
    let sh = ((h as f64 * scale).round() as u32).clamp(1, side);
    let resized = image.resize_exact(sw, sh, FilterType::Triangle).into_rgba8();

    let x = (side - sw) / 2;
    let y = (side - sh) / 2;
    image::imageops::overlay(&mut canvas, &resized, x as i64, y as i64);
    canvas
}

/// Build the base64 submission payload for a rasterized drawing:
/// square-fit to [`SUBMIT_IMAGE_SIDE`], JPEG-encoded, base64 (no data-URI
/// marker — the service expects the bare string).
pub fn submission_payload(image: &RgbaImage) -> Result<String, RasterError> {
    let square = fit_to_square(&DynamicImage::ImageRgba8(image.clone()), SUBMIT_IMAGE_SIDE);
    let jpeg = encode_jpeg(&square, SUBMIT_JPEG_QUALITY)?;
    Ok(STANDARD.encode(jpeg))
}
