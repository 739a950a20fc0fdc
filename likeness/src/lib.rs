//! Likeness lays out and renders annotated facial similarity reports.
//!
//! A report is a photo with findings (facial regions, each attributed to a parent with a score
//! and a description) arranged as cards in two columns below it, a full-width summary card, and
//! curved connectors that run from each region on the face to its card.
//!
//! A pass runs in two stages:
//!
//! 1. **Plan**: `ResultPayload + photo size + width -> ReportPlan` (slots, measured cards, rows,
//!    anchors, connector routes). Pure and deterministic for a given text measurer.
//! 2. **Paint**: `ReportPlan -> RenderSurface` at the device pixel ratio, CPU only.
//!
//! [`Compositor`] holds the inputs, skips passes whose inputs did not change and only
//! reallocates its surface when the pixel size changes.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Photo sources and decoding.
pub mod assets;
mod foundation;
/// Report geometry.
pub mod layout;
/// CPU rendering.
pub mod render;
/// Boundary data model.
pub mod scene;
/// Stateful rendering API.
pub mod session;
/// Text measurement.
pub mod text;

pub use crate::foundation::core::{
    Affine, BezPath, LogicalSize, Point, Rect, Rgba8, Vec2, sanitize_pixel_ratio,
};
pub use crate::foundation::error::{LikenessError, LikenessResult};

pub use crate::assets::decode::{PreparedImage, decode_image};
pub use crate::assets::source::ImageSource;
pub use crate::layout::card::{CardKind, CardMetrics, MeasuredCard, measure_card};
pub use crate::layout::connector::{ConnectorOpts, ConnectorPath, PALETTE, PaletteIndex, color_for};
pub use crate::layout::grid::{CardGeometry, LayoutOpts, ReportLayout};
pub use crate::layout::plan::{ReportPlan, plan_report};
pub use crate::layout::slots::{Placement, SlotCategory, assign_slots};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::card::{BadgeStyle, CardTheme};
pub use crate::render::cpu::GradientStop;
pub use crate::render::report::{ReportStyle, draw_report};
pub use crate::render::surface::RenderSurface;
pub use crate::render::text::GlyphPainter;
pub use crate::scene::payload::{FaceAnchor, Finding, ParentAttribution, ResultPayload};
pub use crate::session::compositor::{
    Compositor, CompositorOpts, PassSummary, RenderOutcome, render_report,
};
pub use crate::text::metrics::{FixedAdvanceText, FontWeight, TextMeasure, TextStyle};
pub use crate::text::parley_text::{FontBook, ParleyText};
