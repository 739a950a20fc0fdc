use std::io::Cursor;

use anyhow::Context;

use crate::foundation::error::{LikenessError, LikenessResult};

/// A rendered surface as RGBA8 pixels.
///
/// Frames are **premultiplied alpha** as read back from the surface. The `premultiplied` flag is
/// included to make this explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Convert to straight alpha in place. No-op when already straight.
    pub fn unpremultiply(&mut self) {
        if self.premultiplied {
            unpremultiply_in_place(&mut self.data);
            self.premultiplied = false;
        }
    }

    /// Encode as PNG with straight alpha.
    pub fn encode_png(&self) -> LikenessResult<Vec<u8>> {
        let mut straight = self.clone();
        straight.unpremultiply();
        let img = image::RgbaImage::from_raw(straight.width, straight.height, straight.data)
            .ok_or_else(|| LikenessError::render("frame byte length does not match its size"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }
}

fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
