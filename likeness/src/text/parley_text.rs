use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{LikenessError, LikenessResult};
use crate::text::metrics::{FontWeight, TextMeasure, TextStyle};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Raw font files used for report text.
#[derive(Clone, Debug)]
pub struct FontBook {
    regular: Arc<Vec<u8>>,
    bold: Option<Arc<Vec<u8>>>,
}

impl FontBook {
    /// Build from in-memory font files. Without a bold face, bold text uses the regular face.
    pub fn new(regular: Vec<u8>, bold: Option<Vec<u8>>) -> Self {
        Self {
            regular: Arc::new(regular),
            bold: bold.map(Arc::new),
        }
    }

    /// Read font files from disk.
    pub fn from_paths(regular: &Path, bold: Option<&Path>) -> LikenessResult<Self> {
        let read = |p: &Path| -> LikenessResult<Vec<u8>> {
            std::fs::read(p)
                .with_context(|| format!("read font '{}'", p.display()))
                .map_err(LikenessError::from)
        };
        let regular = read(regular)?;
        let bold = bold.map(read).transpose()?;
        Ok(Self::new(regular, bold))
    }
}

/// Text measurement and shaping backed by Parley.
///
/// Fonts are registered once; every measurement and every painted line goes through
/// [`ParleyText::layout_line`], so wrapping decisions match the glyphs that end up on the surface.
/// A bold face must belong to the same family as the regular face.
pub struct ParleyText {
    family_name: String,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl ParleyText {
    /// Register the fonts in `book` with a fresh Parley context.
    pub fn new(book: FontBook) -> LikenessResult<Self> {
        let mut font_ctx = parley::FontContext::default();

        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(book.regular.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            LikenessError::validation("no font families registered from regular font bytes")
        })?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| LikenessError::validation("registered font family has no name"))?
            .to_string();

        if let Some(bold) = &book.bold {
            let bold_families = font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(bold.to_vec()), None);
            let bold_id = bold_families.first().map(|(id, _)| *id).ok_or_else(|| {
                LikenessError::validation("no font families registered from bold font bytes")
            })?;
            if bold_id != family_id {
                let bold_name = font_ctx
                    .collection
                    .family_name(bold_id)
                    .unwrap_or("<unnamed>")
                    .to_string();
                return Err(LikenessError::validation(format!(
                    "bold font family '{bold_name}' differs from regular family '{family_name}'"
                )));
            }
        }

        tracing::debug!(family = %family_name, bold = book.bold.is_some(), "registered report fonts");
        Ok(Self {
            family_name,
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
        })
    }

    /// Family name detected from the regular font.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape `text` on a single unbroken line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        style: TextStyle,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(style.size_px as f32));
        if style.weight == FontWeight::Bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextMeasure for ParleyText {
    fn advance(&mut self, text: &str, style: TextStyle) -> f64 {
        if text.is_empty() || !(style.size_px.is_finite() && style.size_px > 0.0) {
            return 0.0;
        }
        let layout = self.layout_line(text, style, TextBrushRgba8::default());
        let mut w = 0.0f64;
        for line in layout.lines() {
            w = w.max(f64::from(line.metrics().advance));
        }
        w
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/parley_text.rs"]
mod tests;
