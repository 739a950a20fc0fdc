use std::sync::Arc;

use kurbo::Shape;

use crate::foundation::core::{Affine, BezPath, Rgba8};
use crate::foundation::error::{LikenessError, LikenessResult};

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

pub(crate) fn cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

/// Fill any kurbo shape given in logical pixels.
pub(crate) fn fill_shape(
    ctx: &mut vello_cpu::RenderContext,
    root: Affine,
    shape: &impl Shape,
    color: Rgba8,
) {
    ctx.set_transform(affine_to_cpu(root));
    ctx.set_paint(cpu_color(color));
    ctx.fill_path(&bezpath_to_cpu(&shape.to_path(0.1)));
}

/// Outline of `path` stroked at `width` with round caps and joins, as a fillable path.
pub(crate) fn stroke_outline(path: &BezPath, width: f64) -> BezPath {
    let style = kurbo::Stroke::new(width)
        .with_caps(kurbo::Cap::Round)
        .with_join(kurbo::Join::Round);
    kurbo::stroke(path.iter(), &style, &kurbo::StrokeOpts::default(), 0.05)
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> LikenessResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| LikenessError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| LikenessError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(LikenessError::render("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

pub(crate) fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> LikenessResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

/// Color stop of a vertical gradient; `offset` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    /// Position along the gradient.
    pub offset: f64,
    /// Straight-alpha color at the stop.
    pub color: Rgba8,
}

/// Straight-alpha color at `t`, linearly interpolated between the surrounding stops.
///
/// Stops must be sorted by offset. Values before the first or after the last stop clamp.
pub(crate) fn sample_stops(stops: &[GradientStop], t: f64) -> Rgba8 {
    let Some(first) = stops.first() else {
        return Rgba8::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let u = if span <= 0.0 { 1.0 } else { (t - a.offset) / span };
            let lerp = |x: u8, y: u8| -> u8 {
                let xf = f64::from(x);
                (xf + (f64::from(y) - xf) * u).round().clamp(0.0, 255.0) as u8
            };
            return Rgba8 {
                r: lerp(a.color.r, b.color.r),
                g: lerp(a.color.g, b.color.g),
                b: lerp(a.color.b, b.color.b),
                a: lerp(a.color.a, b.color.a),
            };
        }
    }
    stops[stops.len() - 1].color
}

/// Premultiplied `w x h` image whose rows follow `stops` top to bottom.
pub(crate) fn vertical_gradient_premul(stops: &[GradientStop], w: u32, h: u32) -> Vec<u8> {
    let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
    let h1 = f64::from(h.max(1) - 1);
    let row_len = (w as usize) * 4;
    if row_len == 0 {
        return bytes;
    }
    for (y, row) in bytes.chunks_exact_mut(row_len).enumerate() {
        let t = if h1 <= 0.0 { 0.0 } else { y as f64 / h1 };
        let c = sample_stops(stops, t).premultiplied();
        for px in row.chunks_exact_mut(4) {
            px.copy_from_slice(&c);
        }
    }
    bytes
}

/// Blur radius in taps for a canvas-style shadow blur (sigma is half the blur).
pub(crate) fn shadow_blur_kernel(blur_px: f64) -> LikenessResult<Vec<u32>> {
    if !(blur_px.is_finite() && blur_px > 0.0) {
        return gaussian_kernel_q16(0, 0.0);
    }
    let sigma = blur_px / 2.0;
    gaussian_kernel_q16((sigma * 3.0).ceil() as u32, sigma as f32)
}

pub(crate) fn gaussian_kernel_q16(radius: u32, sigma: f32) -> LikenessResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(LikenessError::validation("blur sigma must be finite and > 0"));
    }

    let r = radius as i32;
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    let weights_f = (-r..=r)
        .map(|i| (-(i as f64).powi(2) / denom).exp())
        .collect::<Vec<_>>();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(LikenessError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = (((wf / sum) * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

/// Separable blur of a premultiplied RGBA8 buffer in place.
pub(crate) fn blur_rgba8_premul_q16(buf: &mut [u8], width: u32, height: u32, kernel_q16: &[u32]) {
    if kernel_q16.len() == 1 {
        return;
    }
    let mut tmp = vec![0u8; buf.len()];
    horizontal_blur_q16(buf, &mut tmp, width, height, kernel_q16);
    vertical_blur_q16(&tmp, buf, width, height, kernel_q16);
}

fn horizontal_blur_q16(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += (kw as u64) * (src[idx + c] as u64);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_blur_q16(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += (kw as u64) * (src[idx + c] as u64);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
