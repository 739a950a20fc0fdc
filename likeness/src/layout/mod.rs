//! Pure geometry: slot assignment, card measurement, rows, anatomy anchors and connector routes.
//!
//! Nothing here touches pixels. Everything a pass paints is decided by [`plan::plan_report`].

/// Anatomy anchors on the photo.
pub mod anatomy;
/// Card heights and header collision.
pub mod card;
/// Connector colors and routing.
pub mod connector;
/// Row and column placement.
pub mod grid;
/// Full report plan for one pass.
pub mod plan;
/// Findings to fixed slots.
pub mod slots;
