use crate::scene::payload::Finding;
use crate::text::metrics::{TextMeasure, TextStyle, wrap_lines};

/// Card flavor; summary cards are wider, use larger body text and no accent bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// Left/right column card.
    Regular,
    /// Full-width summary card.
    Summary,
}

/// Fixed card measurements in logical pixels.
///
/// Layout and painting both read these, so any change applies to reserved heights and drawn
/// positions at once.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardMetrics {
    /// Space above the header.
    pub top_padding: f64,
    /// Space below the last description line.
    pub bottom_padding: f64,
    /// Header height of regular cards.
    pub regular_header: f64,
    /// Header height of summary cards.
    pub summary_header: f64,
    /// Added header height when the score wraps below the part name.
    pub extra_header: f64,
    /// Horizontal text inset of regular cards.
    pub regular_indent: f64,
    /// Horizontal text inset of summary cards.
    pub summary_indent: f64,
    /// Attribution badge width.
    pub badge_width: f64,
    /// Attribution badge height.
    pub badge_height: f64,
    /// Minimum clearance between the score and the badge.
    pub collision_buffer: f64,
    /// Space between the part name and an inline score.
    pub score_gap: f64,
    /// Inline scores switch to the compact font below this much free space.
    pub compact_threshold: f64,
    /// Part-name font size (bold).
    pub part_font_px: f64,
    /// Inline score font size when space is tight (bold).
    pub compact_score_font_px: f64,
    /// Wrapped score font size (bold).
    pub wrapped_score_font_px: f64,
    /// Badge label font size.
    pub badge_font_px: f64,
    /// Description font size of regular cards.
    pub regular_body_font_px: f64,
    /// Description font size of summary cards.
    pub summary_body_font_px: f64,
    /// Description line height of regular cards.
    pub regular_line_height: f64,
    /// Description line height of summary cards.
    pub summary_line_height: f64,
}

impl Default for CardMetrics {
    fn default() -> Self {
        Self {
            top_padding: 14.0,
            bottom_padding: 15.0,
            regular_header: 26.0,
            summary_header: 32.0,
            extra_header: 16.0,
            regular_indent: 15.0,
            summary_indent: 20.0,
            badge_width: 54.0,
            badge_height: 20.0,
            collision_buffer: 5.0,
            score_gap: 5.0,
            compact_threshold: 40.0,
            part_font_px: 15.0,
            compact_score_font_px: 13.0,
            wrapped_score_font_px: 12.0,
            badge_font_px: 11.0,
            regular_body_font_px: 11.0,
            summary_body_font_px: 13.0,
            regular_line_height: 16.0,
            summary_line_height: 22.0,
        }
    }
}

impl CardMetrics {
    /// Horizontal text inset.
    pub fn indent(&self, kind: CardKind) -> f64 {
        match kind {
            CardKind::Regular => self.regular_indent,
            CardKind::Summary => self.summary_indent,
        }
    }

    /// Header height before any collision adjustment.
    pub fn header_base(&self, kind: CardKind) -> f64 {
        match kind {
            CardKind::Regular => self.regular_header,
            CardKind::Summary => self.summary_header,
        }
    }

    /// Description font.
    pub fn body_style(&self, kind: CardKind) -> TextStyle {
        match kind {
            CardKind::Regular => TextStyle::regular(self.regular_body_font_px),
            CardKind::Summary => TextStyle::regular(self.summary_body_font_px),
        }
    }

    /// Description line height.
    pub fn line_height(&self, kind: CardKind) -> f64 {
        match kind {
            CardKind::Regular => self.regular_line_height,
            CardKind::Summary => self.summary_line_height,
        }
    }

    /// Part-name font.
    pub fn part_style(&self) -> TextStyle {
        TextStyle::bold(self.part_font_px)
    }

    /// Badge label font.
    pub fn badge_style(&self) -> TextStyle {
        TextStyle::regular(self.badge_font_px)
    }
}

/// Where the similarity score goes in the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePlacement {
    /// Same line as the part name; `compact` selects the smaller font.
    Inline {
        /// Free space before the badge is below the compact threshold.
        compact: bool,
    },
    /// Own line under the part name; the header grows by the extra header height.
    Wrapped,
}

/// Header geometry relative to the card's left edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct HeaderLayout {
    /// Measured part-name width.
    pub part_width: f64,
    /// Left edge of an inline score.
    pub score_x: f64,
    /// Left edge of the attribution badge.
    pub badge_x: f64,
    /// Score placement decision.
    pub score: ScorePlacement,
    /// Added header height (0 unless the score wraps).
    pub extra_height: f64,
}

impl HeaderLayout {
    /// Return `true` when the score had to move to its own line.
    pub fn collides(&self) -> bool {
        self.score == ScorePlacement::Wrapped
    }

    /// Font the score is drawn with.
    pub fn score_style(&self, metrics: &CardMetrics) -> TextStyle {
        match self.score {
            ScorePlacement::Inline { compact: false } => metrics.part_style(),
            ScorePlacement::Inline { compact: true } => {
                TextStyle::bold(metrics.compact_score_font_px)
            }
            ScorePlacement::Wrapped => TextStyle::bold(metrics.wrapped_score_font_px),
        }
    }
}

/// Score label as drawn, e.g. `72%`.
pub fn score_label(finding: &Finding) -> String {
    format!("{}%", finding.score_percent())
}

/// Decide whether the score fits between the part name and the badge.
///
/// The score collides when its right edge would come within the collision buffer of the badge's
/// left edge; it then wraps to its own line.
pub fn header_layout<M: TextMeasure + ?Sized>(
    measure: &mut M,
    finding: &Finding,
    kind: CardKind,
    width: f64,
    metrics: &CardMetrics,
) -> HeaderLayout {
    let indent = metrics.indent(kind);
    let part_style = metrics.part_style();
    let part_width = measure.advance(&finding.part, part_style);
    let score_width = measure.advance(&score_label(finding), part_style);

    let badge_x = width - metrics.badge_width - indent;
    let score_x = indent + part_width + metrics.score_gap;

    let (score, extra_height) = if score_x + score_width > badge_x - metrics.collision_buffer {
        (ScorePlacement::Wrapped, metrics.extra_header)
    } else {
        let compact = badge_x - score_x < metrics.compact_threshold;
        (ScorePlacement::Inline { compact }, 0.0)
    };

    HeaderLayout {
        part_width,
        score_x,
        badge_x,
        score,
        extra_height,
    }
}

/// Card content measured for one width.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MeasuredCard {
    /// Natural card height.
    pub height: f64,
    /// Header decision.
    pub header: HeaderLayout,
    /// Description lines, exactly as they will be painted.
    pub lines: Vec<String>,
}

/// Compute a card's exact height and line breaks.
///
/// `height = top padding + header (+ extra) + lines * line height + bottom padding`. Nothing is
/// drawn; the painter reuses the returned lines.
pub fn measure_card<M: TextMeasure + ?Sized>(
    measure: &mut M,
    finding: &Finding,
    kind: CardKind,
    width: f64,
    metrics: &CardMetrics,
) -> MeasuredCard {
    let header = header_layout(measure, finding, kind, width, metrics);
    let max_w = width - metrics.indent(kind) * 2.0;
    let lines = wrap_lines(
        measure,
        &finding.description,
        metrics.body_style(kind),
        max_w,
    );
    let height = metrics.top_padding
        + metrics.header_base(kind)
        + header.extra_height
        + lines.len() as f64 * metrics.line_height(kind)
        + metrics.bottom_padding;
    MeasuredCard {
        height,
        header,
        lines,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/card.rs"]
mod tests;
