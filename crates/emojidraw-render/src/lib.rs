//! EmojiDraw Render Library
//!
//! CPU rasterization of captured stroke data into RGBA bitmaps, plus the
//! export helpers that turn bitmaps into the inline payloads the emoji
//! service consumes.

mod export;
mod rasterizer;

pub use export::{
    decode_inline_image, encode_jpeg, encode_png, fit_to_square, submission_payload, to_data_uri,
    SUBMIT_IMAGE_SIDE, SUBMIT_JPEG_QUALITY,
};
pub use rasterizer::{RasterError, StrokeRasterizer, MAX_DIMENSION};
