use crate::foundation::core::{Affine, LogicalSize, sanitize_pixel_ratio};
use crate::foundation::error::{LikenessError, LikenessResult};
use crate::render::backend::FrameRGBA;

/// Premultiplied RGBA8 pixmap sized `ceil(logical * device_pixel_ratio)`.
///
/// Drawing happens in logical pixels under [`RenderSurface::root_transform`]. The pixmap is
/// reallocated only when its pixel dimensions change.
pub struct RenderSurface {
    logical: LogicalSize,
    device_pixel_ratio: f64,
    pixmap: vello_cpu::Pixmap,
    ctx: Option<vello_cpu::RenderContext>,
    allocations: u64,
}

impl std::fmt::Debug for RenderSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderSurface")
            .field("logical", &self.logical)
            .field("device_pixel_ratio", &self.device_pixel_ratio)
            .field("pixel_size", &self.pixel_size())
            .field("allocations", &self.allocations)
            .finish()
    }
}

fn checked_pixel_size(logical: LogicalSize, dpr: f64) -> LikenessResult<(u16, u16)> {
    let (w, h) = logical.to_pixels(dpr);
    let w: u16 = w.try_into().map_err(|_| {
        LikenessError::render(format!("surface width {w}px exceeds {}", u16::MAX))
    })?;
    let h: u16 = h.try_into().map_err(|_| {
        LikenessError::render(format!("surface height {h}px exceeds {}", u16::MAX))
    })?;
    Ok((w, h))
}

impl RenderSurface {
    /// Allocate a transparent surface.
    pub fn new(logical: LogicalSize, device_pixel_ratio: f64) -> LikenessResult<Self> {
        let dpr = sanitize_pixel_ratio(device_pixel_ratio);
        let (w, h) = checked_pixel_size(logical, dpr)?;
        Ok(Self {
            logical,
            device_pixel_ratio: dpr,
            pixmap: vello_cpu::Pixmap::new(w, h),
            ctx: None,
            allocations: 1,
        })
    }

    /// Adopt a new logical size and pixel ratio.
    ///
    /// Returns `true` when the pixmap was reallocated, which happens iff the pixel dimensions
    /// differ from the current ones. Contents are unspecified after a reallocation.
    pub fn resize(&mut self, logical: LogicalSize, device_pixel_ratio: f64) -> LikenessResult<bool> {
        let dpr = sanitize_pixel_ratio(device_pixel_ratio);
        let (w, h) = checked_pixel_size(logical, dpr)?;
        self.logical = logical;
        self.device_pixel_ratio = dpr;
        if (w, h) == (self.pixmap.width(), self.pixmap.height()) {
            return Ok(false);
        }
        tracing::debug!(
            from_w = self.pixmap.width(),
            from_h = self.pixmap.height(),
            to_w = w,
            to_h = h,
            "reallocating surface"
        );
        self.pixmap = vello_cpu::Pixmap::new(w, h);
        self.allocations += 1;
        Ok(true)
    }

    /// Logical size.
    pub fn logical_size(&self) -> LogicalSize {
        self.logical
    }

    /// Device pixel ratio.
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Pixel dimensions.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            u32::from(self.pixmap.width()),
            u32::from(self.pixmap.height()),
        )
    }

    /// Number of pixmap allocations so far, including the first.
    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    /// Logical-to-device transform.
    pub fn root_transform(&self) -> Affine {
        Affine::scale(self.device_pixel_ratio)
    }

    /// Copy the pixels out.
    pub fn frame(&self) -> FrameRGBA {
        let (width, height) = self.pixel_size();
        FrameRGBA {
            width,
            height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    /// Encode the current pixels as a straight-alpha PNG.
    pub fn encode_png(&self) -> LikenessResult<Vec<u8>> {
        self.frame().encode_png()
    }

    fn take_ctx(&mut self) -> vello_cpu::RenderContext {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        ctx
    }

    /// Record drawing commands and rasterize them onto the surface, replacing its pixels.
    pub(crate) fn render_with<R>(
        &mut self,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> LikenessResult<R>,
    ) -> LikenessResult<R> {
        let mut ctx = self.take_ctx();
        let out = f(&mut ctx)?;
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        self.ctx = Some(ctx);
        Ok(out)
    }

    /// Rasterize drawing commands into a fresh transparent pixmap of the surface's size.
    pub(crate) fn render_offscreen(
        &mut self,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> LikenessResult<()>,
    ) -> LikenessResult<vello_cpu::Pixmap> {
        let mut ctx = self.take_ctx();
        f(&mut ctx)?;
        let mut layer = vello_cpu::Pixmap::new(self.pixmap.width(), self.pixmap.height());
        ctx.flush();
        ctx.render_to_pixmap(&mut layer);
        self.ctx = Some(ctx);
        Ok(layer)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
