use unicode_width::UnicodeWidthChar;

/// Font weight used by report text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// Body text.
    Regular,
    /// Part names and scores.
    Bold,
}

/// Font selection for one run of text: size in logical pixels plus weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in logical pixels.
    pub size_px: f64,
    /// Font weight.
    pub weight: FontWeight,
}

impl TextStyle {
    /// Regular weight at `size_px`.
    pub const fn regular(size_px: f64) -> Self {
        Self {
            size_px,
            weight: FontWeight::Regular,
        }
    }

    /// Bold weight at `size_px`.
    pub const fn bold(size_px: f64) -> Self {
        Self {
            size_px,
            weight: FontWeight::Bold,
        }
    }
}

/// Horizontal text measurement.
///
/// Layout and paint must go through the same implementation, otherwise reserved card heights
/// and painted lines disagree.
pub trait TextMeasure {
    /// Advance width of `text` laid out on a single line, in logical pixels.
    fn advance(&mut self, text: &str, style: TextStyle) -> f64;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &mut T {
    fn advance(&mut self, text: &str, style: TextStyle) -> f64 {
        (**self).advance(text, style)
    }
}

/// Break `text` into lines no wider than `max_width_px`.
///
/// Wrapping is character-granular: characters are appended while the measured line stays
/// strictly below `max_width_px`, otherwise the character starts a new line. Word boundaries
/// are ignored. The empty string yields one empty line. A character that does not fit on an
/// empty line still breaks, so it leaves an empty line before the one it occupies.
pub fn wrap_lines<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    style: TextStyle,
    max_width_px: f64,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut candidate = String::new();
    for ch in text.chars() {
        candidate.clear();
        candidate.push_str(&line);
        candidate.push(ch);
        if measure.advance(&candidate, style) < max_width_px {
            std::mem::swap(&mut line, &mut candidate);
        } else {
            lines.push(std::mem::take(&mut line));
            line.push(ch);
        }
    }
    lines.push(line);
    lines
}

/// Number of lines [`wrap_lines`] produces.
pub fn count_wrapped_lines<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    style: TextStyle,
    max_width_px: f64,
) -> usize {
    wrap_lines(measure, text, style, max_width_px).len()
}

/// Deterministic font-free metrics.
///
/// Each character advances by its terminal column width (`unicode-width`) times `em_per_column`
/// times the font size, so CJK ideographs are one em and ASCII is half an em at the default
/// setting. Bold and regular share metrics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceText {
    /// Em advance per terminal column.
    pub em_per_column: f64,
}

impl Default for FixedAdvanceText {
    fn default() -> Self {
        Self { em_per_column: 0.5 }
    }
}

impl FixedAdvanceText {
    /// Advance of a single character.
    pub fn char_advance(&self, ch: char, style: TextStyle) -> f64 {
        let cols = ch.width().unwrap_or(0) as f64;
        cols * self.em_per_column * style.size_px
    }
}

impl TextMeasure for FixedAdvanceText {
    fn advance(&mut self, text: &str, style: TextStyle) -> f64 {
        text.chars().map(|ch| self.char_advance(ch, style)).sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/metrics.rs"]
mod tests;
