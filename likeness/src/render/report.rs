use std::sync::Arc;

use kurbo::{Circle, Line, Shape};

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Affine, Rgba8};
use crate::foundation::error::LikenessResult;
use crate::layout::card::CardMetrics;
use crate::layout::connector::ConnectorOpts;
use crate::layout::plan::ReportPlan;
use crate::render::card::{CardTheme, draw_card};
use crate::render::connector::{draw_connector, draw_connector_line};
use crate::render::cpu::{
    GradientStop, affine_to_cpu, blur_rgba8_premul_q16, cpu_color, fill_shape,
    pixmap_from_premul_bytes, rgba_premul_to_image, shadow_blur_kernel, stroke_outline,
    vertical_gradient_premul,
};
use crate::render::surface::RenderSurface;
use crate::render::text::GlyphPainter;

const SLATE_900: Rgba8 = Rgba8::hex(0x0f172a);

/// Report colors and overlays.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReportStyle {
    /// Surface background.
    pub background: Rgba8,
    /// Height of the fade over the bottom of the photo.
    pub fade_height: f64,
    /// Fade colors, top to bottom.
    pub fade_stops: Vec<GradientStop>,
    /// Draw a crosshair at the face anchor.
    pub debug_anchor: bool,
    /// Crosshair color.
    pub debug_color: Rgba8,
    /// Card colors.
    pub cards: CardTheme,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            background: SLATE_900,
            fade_height: 150.0,
            fade_stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: SLATE_900.with_opacity(0.0),
                },
                GradientStop {
                    offset: 0.5,
                    color: SLATE_900.with_opacity(0.8),
                },
                GradientStop {
                    offset: 1.0,
                    color: SLATE_900,
                },
            ],
            debug_anchor: false,
            debug_color: Rgba8::hex(0xfbbf24),
            cards: CardTheme::default(),
        }
    }
}

impl ReportStyle {
    /// Return a style with the face-anchor crosshair toggled.
    pub fn with_debug_anchor(mut self, on: bool) -> Self {
        self.debug_anchor = on;
        self
    }
}

/// Photo uploaded once as an image paint.
#[derive(Clone)]
pub struct PhotoPaint {
    paint: vello_cpu::Image,
    width: u32,
    height: u32,
}

impl std::fmt::Debug for PhotoPaint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoPaint")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl PhotoPaint {
    /// Wrap decoded pixels. Fails when a side exceeds `u16::MAX`.
    pub fn from_prepared(image: &PreparedImage) -> LikenessResult<Self> {
        let pixmap = pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height)?;
        Ok(Self {
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            width: image.width,
            height: image.height,
        })
    }

    /// Natural size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn glow_layer(
    surface: &mut RenderSurface,
    plan: &ReportPlan<'_>,
    opts: &ConnectorOpts,
) -> LikenessResult<Option<vello_cpu::Image>> {
    if plan.connectors.is_empty() || opts.glow_radius.is_nan() || opts.glow_radius <= 0.0 {
        return Ok(None);
    }
    let root = surface.root_transform();
    let kernel = shadow_blur_kernel(opts.glow_radius * surface.device_pixel_ratio())?;
    let mut layer = surface.render_offscreen(|ctx| {
        for c in &plan.connectors {
            draw_connector_line(ctx, root, &c.path, opts);
        }
        Ok(())
    })?;
    let (w, h) = (u32::from(layer.width()), u32::from(layer.height()));
    blur_rgba8_premul_q16(layer.data_as_u8_slice_mut(), w, h, &kernel);
    Ok(Some(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(layer)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    }))
}

fn draw_debug_anchor(
    ctx: &mut vello_cpu::RenderContext,
    root: Affine,
    plan: &ReportPlan<'_>,
    color: Rgba8,
) {
    let c = plan.face.center;
    for line in [
        Line::new((c.x - 20.0, c.y), (c.x + 20.0, c.y)),
        Line::new((c.x, c.y - 20.0), (c.x, c.y + 20.0)),
    ] {
        fill_shape(ctx, root, &stroke_outline(&line.to_path(0.1), 2.0), color);
    }
    fill_shape(ctx, root, &Circle::new(c, 4.0), color);
}

/// Paint a full report pass onto `surface`, replacing its pixels.
///
/// Order: background, photo, bottom fade, debug crosshair, connector glow, then per card its
/// connector followed by the card itself (rows top to bottom, left before right, summary last).
/// The surface must already have the plan's logical size.
pub fn draw_report<P: GlyphPainter + ?Sized>(
    surface: &mut RenderSurface,
    painter: &mut P,
    plan: &ReportPlan<'_>,
    photo: &PhotoPaint,
    metrics: &CardMetrics,
    connector_opts: &ConnectorOpts,
    style: &ReportStyle,
) -> LikenessResult<()> {
    let glow = glow_layer(surface, plan, connector_opts)?;

    let dpr = surface.device_pixel_ratio();
    let root = surface.root_transform();
    let (px_w, px_h) = surface.pixel_size();

    let image_rect = plan.image_rect;
    let fade_px_w = (image_rect.width() * dpr).ceil().max(0.0) as u32;
    let fade_px_h = (style.fade_height * dpr).ceil().max(0.0) as u32;
    let fade = if fade_px_w > 0 && fade_px_h > 0 {
        let bytes = vertical_gradient_premul(&style.fade_stops, fade_px_w, fade_px_h);
        Some(rgba_premul_to_image(&bytes, fade_px_w, fade_px_h)?)
    } else {
        None
    };

    surface.render_with(|ctx| {
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(cpu_color(style.background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(px_w),
            f64::from(px_h),
        ));

        let (photo_w, photo_h) = photo.size();
        if image_rect.area() > 0.0 {
            let fit = Affine::scale_non_uniform(
                image_rect.width() / f64::from(photo_w),
                image_rect.height() / f64::from(photo_h),
            );
            ctx.set_transform(affine_to_cpu(
                root * Affine::translate(image_rect.origin().to_vec2()) * fit,
            ));
            ctx.set_paint(photo.paint.clone());
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(photo_w),
                f64::from(photo_h),
            ));
        }

        if let Some(fade) = fade {
            let top = (image_rect.y1 - style.fade_height) * dpr;
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((0.0, top)));
            ctx.set_paint(fade);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(fade_px_w),
                f64::from(fade_px_h),
            ));
        }

        if style.debug_anchor {
            draw_debug_anchor(ctx, root, plan, style.debug_color);
        }

        if let Some(glow) = glow {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(glow);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(px_w),
                f64::from(px_h),
            ));
        }

        for (i, card) in plan.layout.cards.iter().enumerate() {
            if let Some(path) = plan.connector_for(i) {
                draw_connector(ctx, root, path, connector_opts);
            }
            draw_card(ctx, painter, root, card, metrics, &style.cards);
        }
        Ok(())
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/report.rs"]
mod tests;
