use crate::foundation::core::Rect;
use crate::layout::card::{CardKind, CardMetrics, MeasuredCard, measure_card};
use crate::layout::connector::{PaletteIndex, color_for};
use crate::layout::slots::{LayoutSlot, SlotAssignment};
use crate::text::metrics::TextMeasure;

/// Report layout constants in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutOpts {
    /// Outer horizontal padding and bottom padding of the data section.
    pub padding: f64,
    /// Width reserved on each side for connector rails.
    pub channel_width: f64,
    /// Gap between cards, horizontally and vertically.
    pub card_gap: f64,
    /// Gap between the photo and the first row of cards.
    pub section_gap: f64,
    /// Lower bound for row and summary heights.
    pub min_row_height: f64,
    /// Card measurements.
    pub card: CardMetrics,
}

impl Default for LayoutOpts {
    fn default() -> Self {
        Self {
            padding: 20.0,
            channel_width: 40.0,
            card_gap: 12.0,
            section_gap: 50.0,
            min_row_height: 80.0,
            card: CardMetrics::default(),
        }
    }
}

impl LayoutOpts {
    /// Width shared by the two columns and the summary card.
    pub fn available_width(&self, width: f64) -> f64 {
        (width - self.padding * 2.0 - self.channel_width * 2.0).max(0.0)
    }

    /// Width of a single column card.
    pub fn column_width(&self, width: f64) -> f64 {
        ((self.available_width(width) - self.card_gap) / 2.0).max(0.0)
    }

    /// Left edge of the left column and the summary card.
    pub fn left_x(&self) -> f64 {
        self.padding + self.channel_width
    }

    /// Left edge of the right column.
    pub fn right_x(&self, width: f64) -> f64 {
        self.left_x() + self.column_width(width) + self.card_gap
    }
}

/// One placed card.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CardGeometry<'a> {
    /// Slot the card renders.
    pub slot: LayoutSlot<'a>,
    /// Card bounds in logical surface pixels.
    pub rect: Rect,
    /// Card flavor.
    pub kind: CardKind,
    /// Row index for column cards; `None` for the summary.
    pub row: Option<usize>,
    /// Accent and connector color.
    pub color: PaletteIndex,
    /// Measured content; `rect` may be taller than `measured.height` when the row neighbor is.
    pub measured: MeasuredCard,
}

/// Vertical extent of a card row.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RowLayout {
    /// Top edge.
    pub y: f64,
    /// Row height (max of both cards and the minimum).
    pub height: f64,
}

/// Cards and rows below the photo.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ReportLayout<'a> {
    /// Surface width the layout was computed for.
    pub width: f64,
    /// Displayed photo height.
    pub image_height: f64,
    /// Row extents, top to bottom.
    pub rows: Vec<RowLayout>,
    /// Cards: column cards in row order (left before right), then the summary.
    pub cards: Vec<CardGeometry<'a>>,
    /// Height of everything below the section gap; 0 when there are no cards.
    pub data_section_height: f64,
    /// Full surface height.
    pub total_height: f64,
}

impl<'a> ReportLayout<'a> {
    /// Summary card, if present.
    pub fn summary(&self) -> Option<&CardGeometry<'a>> {
        self.cards.iter().find(|c| c.kind == CardKind::Summary)
    }
}

/// Arrange column cards into rows and stack the summary below them.
///
/// Row `i` pairs `left[i]` with `right[i]`; its height is the larger card height, floored at
/// the minimum row height. Rows start one section gap below the photo.
pub fn layout_report<'a, M: TextMeasure + ?Sized>(
    measure: &mut M,
    slots: &SlotAssignment<'a>,
    width: f64,
    image_height: f64,
    opts: &LayoutOpts,
) -> ReportLayout<'a> {
    let metrics = &opts.card;
    let col_w = opts.column_width(width);
    let mut rows = Vec::with_capacity(slots.row_count());
    let mut cards = Vec::with_capacity(slots.len());

    let top = image_height + opts.section_gap;
    let mut cursor = 0.0;
    for i in 0..slots.row_count() {
        let left = slots.left.get(i).map(|s| {
            let m = measure_card(measure, s.finding, CardKind::Regular, col_w, metrics);
            (*s, opts.left_x(), m)
        });
        let right = slots.right.get(i).map(|s| {
            let m = measure_card(measure, s.finding, CardKind::Regular, col_w, metrics);
            (*s, opts.right_x(width), m)
        });

        let height = [&left, &right]
            .into_iter()
            .flatten()
            .map(|(_, _, m)| m.height)
            .fold(opts.min_row_height, f64::max);

        let y = top + cursor;
        for (slot, x, measured) in [left, right].into_iter().flatten() {
            cards.push(CardGeometry {
                slot,
                rect: Rect::new(x, y, x + col_w, y + height),
                kind: CardKind::Regular,
                row: Some(i),
                color: color_for(&slot.finding.part),
                measured,
            });
        }
        rows.push(RowLayout { y, height });
        cursor += height + opts.card_gap;
    }

    if let Some(slot) = slots.bottom {
        let w = opts.available_width(width);
        let measured = measure_card(measure, slot.finding, CardKind::Summary, w, metrics);
        let height = measured.height.max(opts.min_row_height);
        let x = opts.left_x();
        let y = top + cursor;
        cards.push(CardGeometry {
            slot,
            rect: Rect::new(x, y, x + w, y + height),
            kind: CardKind::Summary,
            row: None,
            color: color_for(&slot.finding.part),
            measured,
        });
        cursor += height + opts.card_gap;
    }

    let data_section_height = if slots.is_empty() {
        0.0
    } else {
        cursor + opts.padding
    };

    ReportLayout {
        width,
        image_height,
        rows,
        cards,
        data_section_height,
        total_height: image_height + opts.section_gap + data_section_height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
