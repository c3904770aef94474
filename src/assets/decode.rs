use std::sync::Arc;

use crate::foundation::error::{PolaroidError, PolaroidResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decoded source photo in premultiplied RGBA8 form.
///
/// Pixels live behind an [`Arc`]: clones are cheap and the buffer is never mutated. A new
/// upload replaces the whole value.
#[derive(Clone)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl std::fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl SourceImage {
    /// Build an image from straight (non-premultiplied) RGBA8 pixels, row-major and tightly
    /// packed.
    pub fn from_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> PolaroidResult<Self> {
        check_dims(width, height, rgba.len())?;
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }

    /// Width in pixels (always >= 1).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels (always >= 1).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `width / height`.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Premultiplied RGBA8 pixel bytes.
    pub fn premul_bytes(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// True when both values share the same pixel buffer.
    pub(crate) fn same_pixels(&self, other: &Arc<Vec<u8>>) -> bool {
        Arc::ptr_eq(&self.rgba8_premul, other)
    }

    pub(crate) fn pixels_arc(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.rgba8_premul)
    }
}

fn check_dims(width: u32, height: u32, len: usize) -> PolaroidResult<()> {
    if width == 0 || height == 0 {
        return Err(PolaroidError::validation(format!(
            "image dimensions must be >= 1x1, got {width}x{height}"
        )));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| PolaroidError::validation("image dimensions overflow"))?;
    if len != expected {
        return Err(PolaroidError::validation(format!(
            "rgba buffer length {len} does not match {width}x{height} (expected {expected})"
        )));
    }
    Ok(())
}

/// Decode encoded image bytes (any format the `image` crate recognizes) into a [`SourceImage`].
pub fn decode_image(bytes: &[u8]) -> PolaroidResult<SourceImage> {
    if bytes.is_empty() {
        return Err(PolaroidError::decode("image bytes are empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PolaroidError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    SourceImage::from_rgba8(width, height, rgba.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
