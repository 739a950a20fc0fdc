//! CPU painting of a planned report onto a device-pixel surface.

/// Frame type handed back to callers.
pub mod backend;
/// Card painter.
pub mod card;
/// Connector painter.
pub mod connector;
pub(crate) mod cpu;
/// Full report pass.
pub mod report;
/// Device-pixel surface.
pub mod surface;
/// Glyph painting on top of text measurement.
pub mod text;
