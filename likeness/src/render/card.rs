use kurbo::RoundedRect;

use crate::foundation::core::{Affine, Point, Rect, Rgba8};
use crate::layout::card::{CardKind, CardMetrics, ScorePlacement, score_label};
use crate::layout::grid::CardGeometry;
use crate::render::cpu::fill_shape;
use crate::render::text::GlyphPainter;
use crate::scene::payload::ParentAttribution;

/// Badge colors and label for one parent.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BadgeStyle {
    /// Badge background.
    pub fill: Rgba8,
    /// Label color.
    pub text: Rgba8,
    /// Label text.
    pub label: String,
}

/// Card colors and decorations.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardTheme {
    /// Card background.
    pub background: Rgba8,
    /// Card corner radius.
    pub corner_radius: f64,
    /// Vertical inset of the accent bar from the card's top and bottom.
    pub accent_inset: f64,
    /// Accent bar width.
    pub accent_width: f64,
    /// Badge corner radius.
    pub badge_radius: f64,
    /// Badge top relative to the header top.
    pub badge_top: f64,
    /// Badge label top relative to the header top.
    pub badge_label_top: f64,
    /// Part-name color.
    pub part_color: Rgba8,
    /// Description color of regular cards.
    pub body_color: Rgba8,
    /// Description color of the summary card.
    pub summary_body_color: Rgba8,
    /// Badge of findings attributed to the father.
    pub father: BadgeStyle,
    /// Badge of findings attributed to the mother.
    pub mother: BadgeStyle,
}

impl Default for CardTheme {
    fn default() -> Self {
        Self {
            background: Rgba8::rgb(30, 41, 59).with_opacity(0.6),
            corner_radius: 12.0,
            accent_inset: 16.0,
            accent_width: 3.0,
            badge_radius: 4.0,
            badge_top: -1.0,
            badge_label_top: 4.0,
            part_color: Rgba8::WHITE,
            body_color: Rgba8::hex(0xcbd5e1),
            summary_body_color: Rgba8::hex(0xe2e8f0),
            father: BadgeStyle {
                fill: Rgba8::rgb(59, 130, 246).with_opacity(0.2),
                text: Rgba8::hex(0x60a5fa),
                label: "像爸爸".to_string(),
            },
            mother: BadgeStyle {
                fill: Rgba8::rgb(236, 72, 153).with_opacity(0.2),
                text: Rgba8::hex(0xf472b6),
                label: "像妈妈".to_string(),
            },
        }
    }
}

impl CardTheme {
    /// Badge for an attribution.
    pub fn badge(&self, parent: ParentAttribution) -> &BadgeStyle {
        match parent {
            ParentAttribution::Father => &self.father,
            ParentAttribution::Mother => &self.mother,
        }
    }
}

/// Paint one card inside `card.rect`.
///
/// Everything comes from the precomputed geometry; text is never re-wrapped. Description lines
/// stop once the cursor passes the bottom padding, so a short rect truncates instead of growing.
pub fn draw_card<P: GlyphPainter + ?Sized>(
    ctx: &mut vello_cpu::RenderContext,
    painter: &mut P,
    root: Affine,
    card: &CardGeometry<'_>,
    metrics: &CardMetrics,
    theme: &CardTheme,
) {
    let r = card.rect;
    let finding = card.slot.finding;
    let header = &card.measured.header;
    let accent = card.color.color();

    fill_shape(
        ctx,
        root,
        &RoundedRect::from_rect(r, theme.corner_radius),
        theme.background,
    );

    if card.kind == CardKind::Regular && r.height() > theme.accent_inset * 2.0 {
        let bar = Rect::new(
            r.x0,
            r.y0 + theme.accent_inset,
            r.x0 + theme.accent_width,
            r.y1 - theme.accent_inset,
        );
        fill_shape(ctx, root, &bar, accent);
    }

    let indent = metrics.indent(card.kind);
    let top = r.y0 + metrics.top_padding;

    let badge = theme.badge(finding.similar_to);
    let badge_x = r.x0 + header.badge_x;
    let badge_rect = Rect::new(
        badge_x,
        top + theme.badge_top,
        badge_x + metrics.badge_width,
        top + theme.badge_top + metrics.badge_height,
    );
    fill_shape(
        ctx,
        root,
        &RoundedRect::from_rect(badge_rect, theme.badge_radius),
        badge.fill,
    );
    let label_style = metrics.badge_style();
    let label_w = painter.advance(&badge.label, label_style);
    painter.fill_text(
        ctx,
        root,
        &badge.label,
        label_style,
        Point::new(
            badge_x + (metrics.badge_width - label_w) / 2.0,
            top + theme.badge_label_top,
        ),
        badge.text,
    );

    painter.fill_text(
        ctx,
        root,
        &finding.part,
        metrics.part_style(),
        Point::new(r.x0 + indent, top),
        theme.part_color,
    );

    let score_style = header.score_style(metrics);
    match header.score {
        ScorePlacement::Wrapped => painter.fill_text(
            ctx,
            root,
            &score_label(finding),
            score_style,
            Point::new(r.x0 + indent, top + metrics.extra_header),
            accent,
        ),
        ScorePlacement::Inline { .. } => painter.fill_text(
            ctx,
            root,
            &format!(" {}", score_label(finding)),
            score_style,
            Point::new(r.x0 + indent + header.part_width, top),
            accent,
        ),
    }

    let body_style = metrics.body_style(card.kind);
    let body_color = match card.kind {
        CardKind::Regular => theme.body_color,
        CardKind::Summary => theme.summary_body_color,
    };
    let limit = r.y1 - metrics.bottom_padding;
    let mut y = top + metrics.header_base(card.kind) + header.extra_height;
    for line in &card.measured.lines {
        if y > limit {
            break;
        }
        painter.fill_text(
            ctx,
            root,
            line,
            body_style,
            Point::new(r.x0 + indent, y),
            body_color,
        );
        y += metrics.line_height(card.kind);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/card.rs"]
mod tests;
