//! Stateful compositor that redraws when its inputs change.

/// Input tracking and render passes.
pub mod compositor;
pub(crate) mod fingerprint;
