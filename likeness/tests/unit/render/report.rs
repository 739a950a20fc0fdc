use super::*;
use crate::layout::grid::LayoutOpts;
use crate::layout::plan::plan_report;
use crate::scene::payload::{Finding, ParentAttribution, ResultPayload};
use crate::text::metrics::FixedAdvanceText;

fn solid_photo(w: u32, h: u32, rgba: [u8; 4]) -> PreparedImage {
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(rgba.repeat((w * h) as usize)),
    }
}

fn payload() -> ResultPayload {
    ResultPayload::from_findings(vec![
        Finding::new("眉毛", ParentAttribution::Father, 72, "浓密的眉毛"),
        Finding::new("眼睛", ParentAttribution::Mother, 88, "大眼睛"),
        Finding::new("总结", ParentAttribution::Father, 60, "整体像爸爸"),
    ])
}

fn render(style: &ReportStyle) -> crate::render::backend::FrameRGBA {
    let payload = payload();
    let image = solid_photo(40, 30, [200, 0, 0, 255]);
    let layout_opts = LayoutOpts::default();
    let connector_opts = ConnectorOpts::default();
    let mut text = FixedAdvanceText::default();
    let plan = plan_report(
        &mut text,
        &payload,
        image.width,
        image.height,
        360.0,
        &layout_opts,
        &connector_opts,
    )
    .unwrap();
    let mut surface = RenderSurface::new(plan.surface, 1.0).unwrap();
    let photo = PhotoPaint::from_prepared(&image).unwrap();
    draw_report(
        &mut surface,
        &mut text,
        &plan,
        &photo,
        &layout_opts.card,
        &connector_opts,
        style,
    )
    .unwrap();
    surface.frame()
}

#[test]
fn photo_fills_the_top_and_background_the_rest() {
    let f = render(&ReportStyle::default());
    // Displayed photo is 360x270; the fade starts at y = 120.
    assert_eq!(f.pixel(180, 10), Some([200, 0, 0, 255]));
    // Bottom-right corner is background.
    assert_eq!(
        f.pixel(f.width - 1, f.height - 1),
        Some([0x0f, 0x17, 0x2a, 255])
    );
    // Inside the fade the photo is darkened but still opaque.
    let faded = f.pixel(180, 250).unwrap();
    assert_eq!(faded[3], 255);
    assert!(faded[0] < 100);
}

#[test]
fn passes_are_pixel_identical() {
    let style = ReportStyle::default();
    assert_eq!(render(&style).data, render(&style).data);
}

#[test]
fn debug_anchor_only_changes_pixels_when_enabled() {
    let plain = render(&ReportStyle::default());
    let debug = render(&ReportStyle::default().with_debug_anchor(true));
    assert_ne!(plain.data, debug.data);
    // Default anchor is at (50%, 40%) of the displayed photo.
    assert_eq!(debug.pixel(180, 108), Some([0xfb, 0xbf, 0x24, 255]));
}

#[test]
fn oversized_photo_is_rejected() {
    let image = PreparedImage {
        width: 70_000,
        height: 1,
        rgba8_premul: Arc::new(vec![0; 70_000 * 4]),
    };
    assert!(PhotoPaint::from_prepared(&image).is_err());
}
