use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{LikenessError, LikenessResult};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Decoded photo in premultiplied RGBA8, ready for painting.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Width over height.
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
///
/// Any decoder failure, and images with a zero dimension, map to
/// [`LikenessError::ImageUnavailable`].
pub fn decode_image(bytes: &[u8]) -> LikenessResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| LikenessError::image_unavailable(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(LikenessError::image_unavailable(format!(
            "decoded image is empty ({width}x{height})"
        )));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    tracing::debug!(width, height, "decoded photo");
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * a + 127) / 255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
