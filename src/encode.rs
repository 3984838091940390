//! JPEG encoder

use image::codecs::jpeg::JpegEncoder;
use image::ColorType;
use log::debug;

use crate::canvas::Canvas;
use crate::constants::JPEG_QUALITY;
use crate::error::EncodeError;

/// Encode the canvas as a baseline JPEG at maximum quality
pub fn encode_jpeg(canvas: &Canvas) -> Result<Vec<u8>, EncodeError> {
    let image = canvas.as_image();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY).encode(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgb8,
    )?;
    debug!(
        "Encoded {}x{} JPEG: {} bytes",
        image.width(),
        image.height(),
        buf.len()
    );
    Ok(buf)
}
