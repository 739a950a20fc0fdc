use crate::foundation::core::{BezPath, Point, Rect, Rgba8};
use crate::layout::slots::Placement;

/// Accent palette shared by connectors, accent bars and scores.
pub const PALETTE: [Rgba8; 7] = [
    Rgba8::hex(0x38bdf8),
    Rgba8::hex(0xa78bfa),
    Rgba8::hex(0xf472b6),
    Rgba8::hex(0x2dd4bf),
    Rgba8::hex(0xfbbf24),
    Rgba8::hex(0xf87171),
    Rgba8::hex(0xa3e635),
];

/// Index into [`PALETTE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct PaletteIndex(pub u8);

impl PaletteIndex {
    /// Palette color.
    pub fn color(self) -> Rgba8 {
        PALETTE[usize::from(self.0) % PALETTE.len()]
    }
}

/// Stable color for a part name: `(first UTF-16 unit + UTF-16 length) % 7`.
///
/// The empty name maps to the first palette entry.
pub fn color_for(part: &str) -> PaletteIndex {
    let mut units = part.encode_utf16();
    let Some(first) = units.next() else {
        return PaletteIndex(0);
    };
    let len = 1 + units.count();
    PaletteIndex(((usize::from(first) + len) % PALETTE.len()) as u8)
}

/// Connector routing and stroke constants in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ConnectorOpts {
    /// Row multiplier of the anchor jitter.
    pub jitter_step: usize,
    /// Modulus of the anchor jitter.
    pub jitter_modulus: usize,
    /// Subtracted from the jitter so it centers on zero.
    pub jitter_bias: f64,
    /// Rail spacing per row.
    pub channel_step: usize,
    /// Rails wrap after this many pixels.
    pub channel_modulus: usize,
    /// Distance from the surface edge to the outermost rail.
    pub rail_inset: f64,
    /// Elbow depth below the photo as a fraction of the section gap.
    pub elbow_fraction: f64,
    /// Elbow spacing per row.
    pub elbow_step: f64,
    /// Horizontal reach of the first control point.
    pub fly_out: f64,
    /// Vertical reach of the second control point.
    pub drop: f64,
    /// Minimum clearance between the second control point and the elbow.
    pub elbow_lift: f64,
    /// Entry point distance below the card top.
    pub entry_offset: f64,
    /// Length of the rounded turn into the card.
    pub entry_turn: f64,
    /// Line width.
    pub stroke_width: f64,
    /// Glow radius around the line; 0 disables the glow.
    pub glow_radius: f64,
    /// Radius of the white anchor dot.
    pub anchor_dot_radius: f64,
    /// Radius of the colored ring around the anchor dot.
    pub anchor_ring_radius: f64,
    /// Stroke width of the anchor ring.
    pub anchor_ring_width: f64,
    /// Radius of the dot at the card entry point.
    pub entry_dot_radius: f64,
}

impl Default for ConnectorOpts {
    fn default() -> Self {
        Self {
            jitter_step: 17,
            jitter_modulus: 5,
            jitter_bias: 2.0,
            channel_step: 8,
            channel_modulus: 32,
            rail_inset: 30.0,
            elbow_fraction: 0.2,
            elbow_step: 8.0,
            fly_out: 80.0,
            drop: 80.0,
            elbow_lift: 40.0,
            entry_offset: 28.0,
            entry_turn: 15.0,
            stroke_width: 1.5,
            glow_radius: 6.0,
            anchor_dot_radius: 3.0,
            anchor_ring_radius: 5.0,
            anchor_ring_width: 2.0,
            entry_dot_radius: 2.0,
        }
    }
}

impl ConnectorOpts {
    /// Horizontal anchor jitter for a row: `(row * 17) % 5 - 2` at the defaults.
    pub fn jitter(&self, row: usize) -> f64 {
        let raw = row
            .wrapping_mul(self.jitter_step)
            .checked_rem(self.jitter_modulus)
            .unwrap_or(0);
        raw as f64 - self.jitter_bias
    }

    /// Rail offset from the outermost rail for a row.
    pub fn channel_offset(&self, row: usize) -> f64 {
        row.wrapping_mul(self.channel_step)
            .checked_rem(self.channel_modulus)
            .unwrap_or(0) as f64
    }
}

/// Surface facts the router needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteFrame {
    /// Displayed photo height.
    pub image_height: f64,
    /// Logical surface width.
    pub surface_width: f64,
    /// Gap between the photo and the first card row.
    pub section_gap: f64,
}

/// Routed connector from an anatomical anchor to a card edge.
///
/// The path is a cubic from the anchor to the rail elbow, a vertical run down the rail, and a
/// quadratic turn into the card.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ConnectorPath {
    /// Start on the face.
    pub anchor: Point,
    /// First cubic control point.
    pub ctrl_out: Point,
    /// Second cubic control point.
    pub ctrl_in: Point,
    /// X of the vertical rail.
    pub rail_x: f64,
    /// End of the cubic, on the rail.
    pub elbow: Point,
    /// End of the straight rail run.
    pub rail_end: Point,
    /// Control point of the turn into the card.
    pub corner: Point,
    /// Point on the card edge.
    pub entry: Point,
    /// Column of the target card.
    pub side: Placement,
    /// Stroke color.
    pub color: PaletteIndex,
}

impl ConnectorPath {
    /// Path in logical surface coordinates.
    pub fn to_bez_path(&self) -> BezPath {
        let mut p = BezPath::new();
        p.move_to(self.anchor);
        p.curve_to(self.ctrl_out, self.ctrl_in, self.elbow);
        p.line_to(self.rail_end);
        p.quad_to(self.corner, self.entry);
        p
    }
}

/// Route a connector from `anchor` to the outer edge of `card`.
///
/// Left cards are entered on their left edge from the left rail, right cards on their right
/// edge from the right rail. Summary cards are not connected and yield `None`.
pub fn route_connector(
    anchor: Point,
    card: Rect,
    side: Placement,
    row: usize,
    color: PaletteIndex,
    frame: &RouteFrame,
    opts: &ConnectorOpts,
) -> Option<ConnectorPath> {
    let channel = opts.channel_offset(row);
    let (rail_x, entry_x, fly_out) = match side {
        Placement::Left => (opts.rail_inset + channel, card.x0, -opts.fly_out),
        Placement::Right => (
            frame.surface_width - opts.rail_inset - channel,
            card.x1,
            opts.fly_out,
        ),
        Placement::Bottom => return None,
    };

    let elbow_y =
        frame.image_height + frame.section_gap * opts.elbow_fraction + row as f64 * opts.elbow_step;
    let entry_y = card.y0 + opts.entry_offset;

    Some(ConnectorPath {
        anchor,
        ctrl_out: Point::new(anchor.x + fly_out, anchor.y),
        ctrl_in: Point::new(
            rail_x,
            (anchor.y + opts.drop).min(elbow_y - opts.elbow_lift),
        ),
        rail_x,
        elbow: Point::new(rail_x, elbow_y),
        rail_end: Point::new(rail_x, entry_y - opts.entry_turn),
        corner: Point::new(rail_x, entry_y),
        entry: Point::new(entry_x, entry_y),
        side,
        color,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/connector.rs"]
mod tests;
