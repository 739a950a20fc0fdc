use std::path::{Path, PathBuf};

use anyhow::Context;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

use crate::assets::decode::{PreparedImage, decode_image};
use crate::foundation::error::{LikenessError, LikenessResult};

/// Where the photo bytes come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// Inline bytes from a base64 `data:` URI.
    Inline {
        /// Declared media type, e.g. `image/jpeg`; empty when omitted.
        media_type: String,
        /// Decoded bytes.
        bytes: Vec<u8>,
    },
    /// File on disk.
    Path(PathBuf),
}

impl ImageSource {
    /// Parse an image reference from a result payload.
    ///
    /// Accepts `data:<type>;base64,<payload>` URIs and file paths (optionally `file://`).
    /// `http(s)` URLs are rejected since nothing is fetched over the network.
    pub fn parse(reference: &str) -> LikenessResult<Self> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(LikenessError::image_unavailable("empty image reference"));
        }
        if let Some(rest) = reference.strip_prefix("data:") {
            return parse_data_uri(rest);
        }
        let lower = reference.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Err(LikenessError::image_unavailable(format!(
                "remote image '{reference}' is not supported; pass a local file or data URI"
            )));
        }
        let path = reference.strip_prefix("file://").unwrap_or(reference);
        Ok(Self::Path(PathBuf::from(path)))
    }

    /// Read the encoded bytes. Relative paths resolve against `base_dir` when given.
    pub fn read_bytes(&self, base_dir: Option<&Path>) -> LikenessResult<Vec<u8>> {
        match self {
            Self::Inline { bytes, .. } => Ok(bytes.clone()),
            Self::Path(p) => {
                let full = match base_dir {
                    Some(dir) if p.is_relative() => dir.join(p),
                    _ => p.clone(),
                };
                std::fs::read(&full)
                    .with_context(|| format!("read image '{}'", full.display()))
                    .map_err(|e| LikenessError::image_unavailable(format!("{e:#}")))
            }
        }
    }

    /// Read and decode.
    pub fn load(&self, base_dir: Option<&Path>) -> LikenessResult<PreparedImage> {
        decode_image(&self.read_bytes(base_dir)?)
    }
}

fn parse_data_uri(rest: &str) -> LikenessResult<ImageSource> {
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| LikenessError::image_unavailable("malformed data URI: missing ','"))?;
    let Some(media_type) = header.strip_suffix(";base64") else {
        return Err(LikenessError::image_unavailable(
            "data URI must be base64-encoded",
        ));
    };
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64_STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| LikenessError::image_unavailable(format!("decode data URI base64: {e}")))?;
    Ok(ImageSource::Inline {
        media_type: media_type.to_string(),
        bytes,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
