use crate::foundation::error::{LikenessError, LikenessResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Default face anchor position (percent of image width/height) when the payload omits it.
pub const DEFAULT_FACE_CENTER: FaceAnchor = FaceAnchor { x: 50.0, y: 40.0 };
/// Default face width (percent of image width) when the payload omits it.
pub const DEFAULT_FACE_WIDTH_PCT: f64 = 40.0;

/// Which parent a finding was attributed to.
///
/// Any value other than `"Father"` renders with the mother style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParentAttribution {
    /// Resembles the father.
    Father,
    /// Resembles the mother.
    Mother,
}

impl From<String> for ParentAttribution {
    fn from(value: String) -> Self {
        if value == "Father" {
            Self::Father
        } else {
            Self::Mother
        }
    }
}

impl From<ParentAttribution> for String {
    fn from(value: ParentAttribution) -> Self {
        match value {
            ParentAttribution::Father => "Father".to_string(),
            ParentAttribution::Mother => "Mother".to_string(),
        }
    }
}

/// One analyzed facial region.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Finding {
    /// Region label, e.g. `"眉毛"` or `"总结 summary"`.
    pub part: String,
    /// Parent attribution.
    #[serde(alias = "similarTo")]
    pub similar_to: ParentAttribution,
    /// Similarity percentage as reported by the analysis backend.
    #[serde(alias = "similarityScore")]
    pub similarity_score: i64,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

impl Finding {
    /// Build a finding.
    pub fn new(
        part: impl Into<String>,
        similar_to: ParentAttribution,
        similarity_score: i64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            part: part.into(),
            similar_to,
            similarity_score,
            description: description.into(),
        }
    }

    /// Score clamped into `0..=100` for display.
    pub fn score_percent(&self) -> u8 {
        self.similarity_score.clamp(0, 100) as u8
    }
}

/// Face anchor (nominally the nose tip) in percent of image width/height.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FaceAnchor {
    /// Horizontal position, 0-100.
    pub x: f64,
    /// Vertical position, 0-100.
    pub y: f64,
}

/// Image references returned with a cached result.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageRefs {
    /// Photo of the child; the image that gets annotated.
    #[serde(default)]
    pub child: Option<String>,
    /// Photo of the father.
    #[serde(default)]
    pub father: Option<String>,
    /// Photo of the mother.
    #[serde(default)]
    pub mother: Option<String>,
}

/// Analysis result payload consumed by the layout engine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResultPayload {
    /// Findings in backend order.
    #[serde(default, alias = "analysisResults")]
    pub analysis_results: Vec<Finding>,
    /// Face anchor; defaults to [`DEFAULT_FACE_CENTER`].
    #[serde(default, alias = "faceCenter")]
    pub face_center: Option<FaceAnchor>,
    /// Face width in percent of image width; defaults to [`DEFAULT_FACE_WIDTH_PCT`].
    #[serde(default, alias = "faceWidth")]
    pub face_width: Option<f64>,
    /// Backend success flag.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Optional image references.
    #[serde(default)]
    pub images: Option<ImageRefs>,
}

fn default_success() -> bool {
    true
}

impl ResultPayload {
    /// Payload holding only findings; anchor and width take their defaults.
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        Self {
            analysis_results: findings,
            face_center: None,
            face_width: None,
            success: true,
            images: None,
        }
    }

    /// Parse a payload from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> LikenessResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| LikenessError::serde(format!("parse result payload JSON: {e}")))
    }

    /// Parse a payload from a JSON string.
    pub fn from_json_str(s: &str) -> LikenessResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| LikenessError::serde(format!("parse result payload JSON: {e}")))
    }

    /// Parse a payload from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> LikenessResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            LikenessError::validation(format!("open payload JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Face anchor with the default substituted for missing or non-finite values.
    pub fn resolved_face_center(&self) -> FaceAnchor {
        match self.face_center {
            Some(c) if c.x.is_finite() && c.y.is_finite() => c,
            _ => DEFAULT_FACE_CENTER,
        }
    }

    /// Face width percentage with the default substituted for missing or unusable values.
    pub fn resolved_face_width(&self) -> f64 {
        match self.face_width {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ => DEFAULT_FACE_WIDTH_PCT,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/payload.rs"]
mod tests;
