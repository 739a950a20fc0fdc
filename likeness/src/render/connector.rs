use kurbo::{Circle, Shape};

use crate::foundation::core::{Affine, Rgba8};
use crate::layout::connector::{ConnectorOpts, ConnectorPath};
use crate::render::cpu::{fill_shape, stroke_outline};

/// Paint the connector line only, for the glow layer.
pub fn draw_connector_line(
    ctx: &mut vello_cpu::RenderContext,
    root: Affine,
    path: &ConnectorPath,
    opts: &ConnectorOpts,
) {
    let outline = stroke_outline(&path.to_bez_path(), opts.stroke_width);
    fill_shape(ctx, root, &outline, path.color.color());
}

/// Paint a connector with its end markers: a white anchor dot inside a colored ring, and a
/// small colored dot where the line meets the card.
pub fn draw_connector(
    ctx: &mut vello_cpu::RenderContext,
    root: Affine,
    path: &ConnectorPath,
    opts: &ConnectorOpts,
) {
    let color = path.color.color();
    draw_connector_line(ctx, root, path, opts);

    fill_shape(
        ctx,
        root,
        &Circle::new(path.anchor, opts.anchor_dot_radius),
        Rgba8::WHITE,
    );
    let ring = Circle::new(path.anchor, opts.anchor_ring_radius).to_path(0.1);
    fill_shape(
        ctx,
        root,
        &stroke_outline(&ring, opts.anchor_ring_width),
        color,
    );
    fill_shape(
        ctx,
        root,
        &Circle::new(path.entry, opts.entry_dot_radius),
        color,
    );
}

#[cfg(test)]
#[path = "../../tests/unit/render/connector.rs"]
mod tests;
