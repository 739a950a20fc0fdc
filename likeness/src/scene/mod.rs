//! Boundary data model of an analysis result.

/// Result payload as delivered by the analysis backend.
pub mod payload;
