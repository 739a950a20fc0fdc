use crate::foundation::core::{LogicalSize, Rect};
use crate::foundation::error::{LikenessError, LikenessResult};
use crate::layout::anatomy::{FaceFrame, anchor_point};
use crate::layout::card::CardKind;
use crate::layout::connector::{ConnectorOpts, ConnectorPath, RouteFrame, route_connector};
use crate::layout::grid::{LayoutOpts, ReportLayout, layout_report};
use crate::layout::slots::assign_slots;
use crate::scene::payload::ResultPayload;
use crate::text::metrics::TextMeasure;

/// Connector attached to one card of the layout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CardConnector {
    /// Index into [`ReportLayout::cards`].
    pub card: usize,
    /// Routed path.
    pub path: ConnectorPath,
}

/// Everything one render pass needs, computed up front.
///
/// Plans are plain values: the painter reads them and never re-measures text.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ReportPlan<'a> {
    /// Logical surface size.
    pub surface: LogicalSize,
    /// Where the photo is drawn.
    pub image_rect: Rect,
    /// Face anchor in surface pixels.
    pub face: FaceFrame,
    /// Cards and rows.
    pub layout: ReportLayout<'a>,
    /// Connectors in card order; the summary has none.
    pub connectors: Vec<CardConnector>,
}

impl ReportPlan<'_> {
    /// Connector of the card at `index`, if it has one.
    pub fn connector_for(&self, index: usize) -> Option<&ConnectorPath> {
        self.connectors
            .iter()
            .find(|c| c.card == index)
            .map(|c| &c.path)
    }
}

/// Displayed photo height for a given width: `width / (image_w / image_h)`.
pub fn displayed_image_height(width: f64, image_w: u32, image_h: u32) -> f64 {
    if image_w == 0 {
        return 0.0;
    }
    width * f64::from(image_h) / f64::from(image_w)
}

#[tracing::instrument(skip(measure, payload, layout_opts, connector_opts))]
/// Run slot assignment, card layout, anchor mapping and connector routing for one pass.
///
/// The photo is drawn full width at its natural aspect ratio; the cards follow below it.
pub fn plan_report<'a, M: TextMeasure + ?Sized>(
    measure: &mut M,
    payload: &'a ResultPayload,
    image_w: u32,
    image_h: u32,
    width: f64,
    layout_opts: &LayoutOpts,
    connector_opts: &ConnectorOpts,
) -> LikenessResult<ReportPlan<'a>> {
    if !width.is_finite() || width < 0.0 {
        return Err(LikenessError::validation(format!(
            "available width must be finite and >= 0, got {width}"
        )));
    }
    if image_w == 0 || image_h == 0 {
        return Err(LikenessError::validation("image must have nonzero dimensions"));
    }

    let image_height = displayed_image_height(width, image_w, image_h);
    let slots = assign_slots(&payload.analysis_results);
    let layout = layout_report(measure, &slots, width, image_height, layout_opts);
    let face = FaceFrame::from_payload(payload, width, image_height);

    let route = RouteFrame {
        image_height,
        surface_width: width,
        section_gap: layout_opts.section_gap,
    };
    let connectors = layout
        .cards
        .iter()
        .enumerate()
        .filter(|(_, c)| c.kind == CardKind::Regular)
        .filter_map(|(i, c)| {
            let row = c.row?;
            let anchor = anchor_point(&face, c.slot.category, row, connector_opts)?;
            let path = route_connector(
                anchor,
                c.rect,
                c.slot.placement,
                row,
                c.color,
                &route,
                connector_opts,
            )?;
            Some(CardConnector { card: i, path })
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        cards = layout.cards.len(),
        connectors = connectors.len(),
        total_height = layout.total_height,
        "planned report"
    );

    Ok(ReportPlan {
        surface: LogicalSize {
            width,
            height: layout.total_height,
        },
        image_rect: Rect::new(0.0, 0.0, width, image_height),
        face,
        layout,
        connectors,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/plan.rs"]
mod tests;
