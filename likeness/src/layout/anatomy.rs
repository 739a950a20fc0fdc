use crate::foundation::core::Point;
use crate::layout::connector::ConnectorOpts;
use crate::layout::slots::SlotCategory;
use crate::scene::payload::ResultPayload;

/// Face anchor and face width resolved to displayed-image pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FaceFrame {
    /// Anchor point (nominally the nose tip).
    pub center: Point,
    /// Face width.
    pub face_width: f64,
}

impl FaceFrame {
    /// Resolve the payload's percentages against an image drawn at `image_w` x `image_h`.
    ///
    /// A missing anchor falls back to (50%, 40%) and a missing face width to 40%.
    pub fn from_payload(payload: &ResultPayload, image_w: f64, image_h: f64) -> Self {
        let anchor = payload.resolved_face_center();
        let width_pct = payload.resolved_face_width();
        Self {
            center: Point::new(image_w * anchor.x / 100.0, image_h * anchor.y / 100.0),
            face_width: image_w * width_pct / 100.0,
        }
    }
}

/// Offset of a region from the face anchor, in face widths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionOffset {
    /// Vertical offset; negative is above the anchor.
    pub dy: f64,
    /// Horizontal offset; negative is toward the image's left edge.
    pub dx: f64,
}

const fn offset(dy: f64, dx: f64) -> Option<RegionOffset> {
    Some(RegionOffset { dy, dx })
}

/// Static region table. The summary has no anatomical anchor.
pub fn region_offset(category: SlotCategory) -> Option<RegionOffset> {
    match category {
        SlotCategory::HeadShape => offset(-0.70, 0.25),
        SlotCategory::Eyebrows => offset(-0.35, -0.20),
        SlotCategory::Eyes => offset(-0.22, 0.25),
        SlotCategory::Nose => offset(0.00, -0.08),
        SlotCategory::Mouth => offset(0.25, 0.18),
        SlotCategory::FaceShape => offset(0.45, -0.25),
        SlotCategory::Summary => None,
    }
}

/// Pixel position a connector starts from.
///
/// `x = cx + face_w * dx + jitter(row)`, `y = cy + face_w * dy`; the jitter separates anchors of
/// cards sharing a row.
pub fn anchor_point(
    frame: &FaceFrame,
    category: SlotCategory,
    row: usize,
    opts: &ConnectorOpts,
) -> Option<Point> {
    let o = region_offset(category)?;
    Some(Point::new(
        frame.center.x + frame.face_width * o.dx + opts.jitter(row),
        frame.center.y + frame.face_width * o.dy,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/anatomy.rs"]
mod tests;
