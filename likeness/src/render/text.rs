use crate::foundation::core::{Affine, Point, Rect, Rgba8};
use crate::render::cpu::{affine_to_cpu, cpu_color};
use crate::text::metrics::{FixedAdvanceText, TextMeasure, TextStyle};
use crate::text::parley_text::{ParleyText, TextBrushRgba8};

/// Text engine that can also put glyphs on a surface.
///
/// `origin` is the top-left of the line box in logical pixels; `root` maps logical pixels to
/// device pixels. Painting must advance exactly as [`TextMeasure::advance`] reports.
pub trait GlyphPainter: TextMeasure {
    /// Paint one unbroken line of text.
    fn fill_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        root: Affine,
        text: &str,
        style: TextStyle,
        origin: Point,
        color: Rgba8,
    );
}

impl<T: GlyphPainter + ?Sized> GlyphPainter for &mut T {
    fn fill_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        root: Affine,
        text: &str,
        style: TextStyle,
        origin: Point,
        color: Rgba8,
    ) {
        (**self).fill_text(ctx, root, text, style, origin, color);
    }
}

impl GlyphPainter for ParleyText {
    fn fill_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        root: Affine,
        text: &str,
        style: TextStyle,
        origin: Point,
        color: Rgba8,
    ) {
        if text.is_empty() {
            return;
        }
        let layout = self.layout_line(text, style, TextBrushRgba8::from(color));

        ctx.set_transform(affine_to_cpu(root * Affine::translate(origin.to_vec2())));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                // Positions are absolute within the layout, y on the line's baseline.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(run.run().font())
                    .font_size(run.run().font_size())
                    .normalized_coords(run.run().normalized_coords())
                    .fill_glyphs(glyphs);
            }
        }
    }
}

impl GlyphPainter for FixedAdvanceText {
    /// Paints each visible character as a solid box spanning its advance.
    fn fill_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        root: Affine,
        text: &str,
        style: TextStyle,
        origin: Point,
        color: Rgba8,
    ) {
        let size = style.size_px;
        ctx.set_transform(affine_to_cpu(root));
        ctx.set_paint(cpu_color(color));
        let mut x = origin.x;
        for ch in text.chars() {
            let adv = self.char_advance(ch, style);
            if adv > 0.0 && !ch.is_whitespace() {
                let r = Rect::new(
                    x + adv * 0.1,
                    origin.y + size * 0.2,
                    x + adv * 0.9,
                    origin.y + size,
                );
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1));
            }
            x += adv;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
