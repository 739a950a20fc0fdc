use super::*;

fn size(width: f64, height: f64) -> LogicalSize {
    LogicalSize { width, height }
}

#[test]
fn pixel_size_is_logical_times_ratio() {
    let s = RenderSurface::new(size(360.0, 500.5), 2.0).unwrap();
    assert_eq!(s.pixel_size(), (720, 1001));
    assert_eq!(s.root_transform(), Affine::scale(2.0));
    assert_eq!(s.allocations(), 1);
}

#[test]
fn resize_reallocates_only_when_pixels_change() {
    let mut s = RenderSurface::new(size(100.2, 50.0), 1.0).unwrap();
    assert!(!s.resize(size(100.4, 50.0), 1.0).unwrap());
    assert_eq!(s.allocations(), 1);
    assert_eq!(s.logical_size(), size(100.4, 50.0));

    assert!(s.resize(size(100.4, 60.0), 1.0).unwrap());
    assert!(s.resize(size(120.0, 60.0), 1.0).unwrap());
    assert!(s.resize(size(120.0, 60.0), 2.0).unwrap());
    assert_eq!(s.pixel_size(), (240, 120));
    assert_eq!(s.allocations(), 4);

    assert!(!s.resize(size(120.0, 60.0), 2.0).unwrap());
    assert_eq!(s.allocations(), 4);
}

#[test]
fn oversized_surface_is_a_render_error() {
    let err = RenderSurface::new(size(40_000.0, 10.0), 2.0).unwrap_err();
    assert!(matches!(err, LikenessError::Render(_)));

    let mut s = RenderSurface::new(size(10.0, 10.0), 1.0).unwrap();
    assert!(s.resize(size(10.0, 70_000.0), 1.0).is_err());
    assert_eq!(s.pixel_size(), (10, 10));
}

#[test]
fn render_with_rasterizes_fills() {
    let mut s = RenderSurface::new(size(4.0, 4.0), 1.0).unwrap();
    s.render_with(|ctx| {
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 0, 0, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 4.0, 4.0));
        Ok(())
    })
    .unwrap();
    assert_eq!(s.frame().pixel(2, 2), Some([255, 0, 0, 255]));

    let layer = s.render_offscreen(|_| Ok(())).unwrap();
    assert!(layer.data_as_u8_slice().iter().all(|&b| b == 0));
}
