use crate::assets::decode::{PreparedImage, decode_image};
use crate::foundation::core::{LogicalSize, Rgba8, sanitize_pixel_ratio};
use crate::foundation::error::{LikenessError, LikenessResult};
use crate::layout::connector::ConnectorOpts;
use crate::layout::grid::LayoutOpts;
use crate::layout::plan::{ReportPlan, plan_report};
use crate::render::backend::FrameRGBA;
use crate::render::report::{PhotoPaint, ReportStyle, draw_report};
use crate::render::surface::RenderSurface;
use crate::render::text::GlyphPainter;
use crate::scene::payload::ResultPayload;
use crate::session::fingerprint::{PassFingerprint, PassInputs, digest_bytes, fingerprint_pass};

/// Options for [`Compositor`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositorOpts {
    /// Device pixels per logical pixel.
    pub device_pixel_ratio: f64,
    /// Card and row layout.
    pub layout: LayoutOpts,
    /// Connector routing and strokes.
    pub connector: ConnectorOpts,
    /// Colors and overlays.
    pub style: ReportStyle,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            device_pixel_ratio: 1.0,
            layout: LayoutOpts::default(),
            connector: ConnectorOpts::default(),
            style: ReportStyle::default(),
        }
    }
}

impl CompositorOpts {
    /// Return options with a device pixel ratio (non-finite or non-positive values become 1).
    pub fn with_device_pixel_ratio(mut self, dpr: f64) -> Self {
        self.device_pixel_ratio = sanitize_pixel_ratio(dpr);
        self
    }

    /// Return options with a surface background color.
    pub fn with_background(mut self, background: Rgba8) -> Self {
        self.style.background = background;
        self
    }

    /// Return options with the face-anchor crosshair toggled.
    pub fn with_debug_anchor(mut self, on: bool) -> Self {
        self.style.debug_anchor = on;
        self
    }

    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> LikenessResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| LikenessError::serde(format!("parse compositor options JSON: {e}")))
    }

    fn digest(&self) -> LikenessResult<u64> {
        let bytes = serde_json::to_vec(self)
            .map_err(|e| LikenessError::serde(format!("serialize compositor options: {e}")))?;
        Ok(digest_bytes(&bytes))
    }
}

/// Summary of a drawn pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassSummary {
    /// The surface pixmap was reallocated for this pass.
    pub resized: bool,
    /// Logical surface size.
    pub logical: LogicalSize,
    /// Surface size in device pixels.
    pub pixel_size: (u32, u32),
    /// Cards drawn, summary included.
    pub cards: usize,
    /// Connectors drawn.
    pub connectors: usize,
}

/// What a pass did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderOutcome {
    /// An input is still missing; nothing was drawn.
    NotReady,
    /// Inputs match the last drawn pass; the surface already shows them.
    Unchanged,
    /// The surface was redrawn.
    Drawn(PassSummary),
}

struct LoadedImage {
    prepared: PreparedImage,
    photo: PhotoPaint,
    digest: u64,
}

/// Owns the report inputs and the render surface, and redraws when inputs change.
///
/// Nothing is drawn until an image, a result and an available width are all present. Every
/// setter runs a pass; a pass whose inputs match the previously drawn one is skipped.
pub struct Compositor<T: GlyphPainter> {
    text: T,
    opts: CompositorOpts,
    opts_digest: u64,
    image: Option<LoadedImage>,
    result: Option<ResultPayload>,
    available_width: Option<f64>,
    surface: Option<RenderSurface>,
    last: Option<PassFingerprint>,
    passes: u64,
}

impl<T: GlyphPainter> Compositor<T> {
    /// Create an empty compositor.
    pub fn new(text: T, opts: CompositorOpts) -> LikenessResult<Self> {
        let opts_digest = opts.digest()?;
        Ok(Self {
            text,
            opts,
            opts_digest,
            image: None,
            result: None,
            available_width: None,
            surface: None,
            last: None,
            passes: 0,
        })
    }

    /// Current options.
    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    /// Surface of the last drawn pass, if any.
    pub fn surface(&self) -> Option<&RenderSurface> {
        self.surface.as_ref()
    }

    /// Pixels of the last drawn pass, if any.
    pub fn frame(&self) -> Option<FrameRGBA> {
        self.surface.as_ref().map(RenderSurface::frame)
    }

    /// Number of passes that actually drew.
    pub fn passes_drawn(&self) -> u64 {
        self.passes
    }

    /// Decode and adopt a photo.
    ///
    /// On decode failure the held image is dropped, the surface keeps its last pixels and
    /// [`LikenessError::ImageUnavailable`] is returned.
    pub fn set_image_bytes(&mut self, bytes: &[u8]) -> LikenessResult<RenderOutcome> {
        match decode_image(bytes) {
            Ok(image) => self.set_image(image),
            Err(e) => {
                tracing::debug!(error = %e, "photo failed to decode; dropping held image");
                self.image = None;
                self.last = None;
                Err(e)
            }
        }
    }

    /// Adopt an already decoded photo.
    pub fn set_image(&mut self, image: PreparedImage) -> LikenessResult<RenderOutcome> {
        let photo = match PhotoPaint::from_prepared(&image) {
            Ok(p) => p,
            Err(e) => {
                self.image = None;
                self.last = None;
                return Err(LikenessError::image_unavailable(e.to_string()));
            }
        };
        let mut digest_input = Vec::with_capacity(image.rgba8_premul.len() + 8);
        digest_input.extend_from_slice(&image.width.to_le_bytes());
        digest_input.extend_from_slice(&image.height.to_le_bytes());
        digest_input.extend_from_slice(&image.rgba8_premul);
        self.image = Some(LoadedImage {
            digest: digest_bytes(&digest_input),
            prepared: image,
            photo,
        });
        self.render()
    }

    /// Adopt an analysis result. Results flagged unsuccessful are rejected and not held.
    pub fn set_result(&mut self, result: ResultPayload) -> LikenessResult<RenderOutcome> {
        if !result.success {
            return Err(LikenessError::validation(
                "analysis result reports failure; nothing to render",
            ));
        }
        self.result = Some(result);
        self.render()
    }

    /// Adopt the container width in logical pixels.
    pub fn set_available_width(&mut self, width: f64) -> LikenessResult<RenderOutcome> {
        if !width.is_finite() || width < 0.0 {
            return Err(LikenessError::validation(format!(
                "available width must be finite and >= 0, got {width}"
            )));
        }
        self.available_width = Some(width);
        self.render()
    }

    /// Adopt a new device pixel ratio.
    pub fn set_device_pixel_ratio(&mut self, dpr: f64) -> LikenessResult<RenderOutcome> {
        let opts = self.opts.clone().with_device_pixel_ratio(dpr);
        self.set_opts(opts)
    }

    /// Replace all options.
    pub fn set_opts(&mut self, opts: CompositorOpts) -> LikenessResult<RenderOutcome> {
        self.opts_digest = opts.digest()?;
        self.opts = opts;
        self.render()
    }

    /// Compute the plan for the current inputs without drawing.
    pub fn plan(&mut self) -> LikenessResult<Option<ReportPlan<'_>>> {
        let (Some(image), Some(result), Some(width)) =
            (&self.image, &self.result, self.available_width)
        else {
            return Ok(None);
        };
        plan_report(
            &mut self.text,
            result,
            image.prepared.width,
            image.prepared.height,
            width,
            &self.opts.layout,
            &self.opts.connector,
        )
        .map(Some)
    }

    #[tracing::instrument(skip(self))]
    /// Run a pass: plan, resize the surface if its pixel size changed, then draw everything.
    pub fn render(&mut self) -> LikenessResult<RenderOutcome> {
        let (Some(image), Some(result), Some(width)) =
            (&self.image, &self.result, self.available_width)
        else {
            return Ok(RenderOutcome::NotReady);
        };

        let dpr = sanitize_pixel_ratio(self.opts.device_pixel_ratio);
        let fingerprint = fingerprint_pass(&PassInputs {
            image_digest: image.digest,
            payload: result,
            width,
            device_pixel_ratio: dpr,
            opts_digest: self.opts_digest,
        });
        if self.surface.is_some() && self.last == Some(fingerprint) {
            return Ok(RenderOutcome::Unchanged);
        }

        let plan = plan_report(
            &mut self.text,
            result,
            image.prepared.width,
            image.prepared.height,
            width,
            &self.opts.layout,
            &self.opts.connector,
        )?;

        let resized = match &mut self.surface {
            Some(surface) => surface.resize(plan.surface, dpr)?,
            None => {
                self.surface = Some(RenderSurface::new(plan.surface, dpr)?);
                true
            }
        };
        let Some(surface) = self.surface.as_mut() else {
            return Err(LikenessError::render("surface missing after allocation"));
        };

        // A failed draw leaves the fingerprint stale so the next pass retries.
        self.last = None;
        draw_report(
            surface,
            &mut self.text,
            &plan,
            &image.photo,
            &self.opts.layout.card,
            &self.opts.connector,
            &self.opts.style,
        )?;
        self.last = Some(fingerprint);
        self.passes += 1;

        let summary = PassSummary {
            resized,
            logical: plan.surface,
            pixel_size: surface.pixel_size(),
            cards: plan.layout.cards.len(),
            connectors: plan.connectors.len(),
        };
        tracing::debug!(?summary, "drew report pass");
        Ok(RenderOutcome::Drawn(summary))
    }
}

/// Render one report in a single call.
pub fn render_report<T: GlyphPainter>(
    text: T,
    payload: ResultPayload,
    image: PreparedImage,
    available_width: f64,
    opts: CompositorOpts,
) -> LikenessResult<RenderSurface> {
    let mut compositor = Compositor::new(text, opts)?;
    compositor.set_image(image)?;
    compositor.set_result(payload)?;
    compositor.set_available_width(available_width)?;
    compositor
        .surface
        .take()
        .ok_or_else(|| LikenessError::render("report pass did not produce a surface"))
}

#[cfg(test)]
#[path = "../../tests/unit/session/compositor.rs"]
mod tests;
