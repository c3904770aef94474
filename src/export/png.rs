use image::ImageEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};

use crate::foundation::error::{PolaroidError, PolaroidResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::backend::Composite;

/// Encode a composite as a lossless RGBA8 PNG.
///
/// The composite is premultiplied; PNG stores straight alpha, so pixels are un-premultiplied on
/// a copy before encoding.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(width = composite.width, height = composite.height)
)]
pub fn encode_png(composite: &Composite) -> PolaroidResult<Vec<u8>> {
    let expected = composite.canvas().byte_len();
    if composite.data.len() != expected {
        return Err(PolaroidError::encode(format!(
            "composite buffer is {} bytes, expected {expected}",
            composite.data.len()
        )));
    }

    let mut straight = composite.data.clone();
    unpremultiply_rgba8_in_place(&mut straight);

    let mut buf = Vec::new();
    PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::Adaptive)
        .write_image(
            &straight,
            composite.width,
            composite.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| PolaroidError::encode(format!("png encode failed: {e}")))?;

    tracing::debug!(bytes = buf.len(), "png encoded");
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
