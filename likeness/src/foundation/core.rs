use crate::foundation::error::{LikenessError, LikenessResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully opaque white.
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Build a color from channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Build an opaque color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Return the same color with alpha taken from a `0.0..=1.0` opacity.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn parse_hex(s: &str) -> LikenessResult<Self> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| LikenessError::validation(format!("color '{s}' must start with '#'")))?;
        let channel = |i: usize| -> LikenessResult<u8> {
            digits
                .get(i..i + 2)
                .and_then(|d| u8::from_str_radix(d, 16).ok())
                .ok_or_else(|| LikenessError::validation(format!("invalid color '{s}'")))
        };
        match digits.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => Err(LikenessError::validation(format!(
                "color '{s}' must be #rrggbb or #rrggbbaa"
            ))),
        }
    }

    /// Convert into premultiplied RGBA8 bytes.
    pub fn premultiplied(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let premul = |c: u8| -> u8 { (((u16::from(c) * a) + 127) / 255) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

/// Logical (CSS-pixel) size of a drawing area.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogicalSize {
    /// Width in logical pixels.
    pub width: f64,
    /// Height in logical pixels.
    pub height: f64,
}

impl LogicalSize {
    /// Pixel dimensions for a device pixel ratio, rounded up and at least 1x1.
    pub fn to_pixels(self, device_pixel_ratio: f64) -> (u32, u32) {
        let dpr = sanitize_pixel_ratio(device_pixel_ratio);
        let px = |v: f64| -> u32 {
            let v = (v.max(0.0) * dpr).ceil();
            if v >= f64::from(u32::MAX) {
                u32::MAX
            } else {
                (v as u32).max(1)
            }
        };
        (px(self.width), px(self.height))
    }
}

/// Clamp a device pixel ratio to a usable value; non-finite or non-positive ratios become `1.0`.
pub fn sanitize_pixel_ratio(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        1.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
