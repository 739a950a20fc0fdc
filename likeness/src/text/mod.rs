//! Text measurement and wrapping.

/// Measurement trait, wrapping and a font-free measurer.
pub mod metrics;
/// Parley-backed measurement for real fonts.
pub mod parley_text;
