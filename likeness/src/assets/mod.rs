//! Photo sources and decoding.

/// Decode encoded photos into premultiplied RGBA8.
pub mod decode;
/// Resolve where a photo's bytes come from.
pub mod source;
