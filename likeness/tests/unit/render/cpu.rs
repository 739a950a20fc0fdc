use super::*;

#[test]
fn bezpath_conversion_keeps_every_element() {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((1.0, 0.0));
    p.quad_to((2.0, 0.0), (2.0, 1.0));
    p.curve_to((2.0, 2.0), (1.0, 3.0), (0.0, 3.0));
    p.close_path();
    let cpu = bezpath_to_cpu(&p);
    assert_eq!(cpu.elements().len(), p.elements().len());
}

#[test]
fn pixmap_rejects_mismatched_bytes_and_oversize() {
    assert!(pixmap_from_premul_bytes(&[0; 8], 1, 1).is_err());
    assert!(matches!(
        pixmap_from_premul_bytes(&[], 70_000, 0),
        Err(LikenessError::Render(_))
    ));
    let pm = pixmap_from_premul_bytes(&[1, 2, 3, 4], 1, 1).unwrap();
    assert_eq!(pm.data_as_u8_slice(), &[1, 2, 3, 4]);
}

#[test]
fn gradient_stops_interpolate_and_clamp() {
    let ink = Rgba8::rgb(15, 23, 42);
    let stops = [
        GradientStop {
            offset: 0.0,
            color: ink.with_opacity(0.0),
        },
        GradientStop {
            offset: 0.5,
            color: ink.with_opacity(0.8),
        },
        GradientStop {
            offset: 1.0,
            color: ink,
        },
    ];
    assert_eq!(sample_stops(&stops, -1.0).a, 0);
    assert_eq!(sample_stops(&stops, 0.5).a, 204);
    assert_eq!(sample_stops(&stops, 0.25).a, 102);
    assert_eq!(sample_stops(&stops, 2.0), ink);
    assert_eq!(sample_stops(&[], 0.5), Rgba8::TRANSPARENT);

    let bytes = vertical_gradient_premul(&stops, 2, 3);
    assert_eq!(bytes.len(), 2 * 3 * 4);
    assert_eq!(&bytes[..4], &[0, 0, 0, 0]);
    assert_eq!(&bytes[20..24], &[15, 23, 42, 255]);
}

#[test]
fn kernel_sums_to_one_in_q16() {
    let k = shadow_blur_kernel(6.0).unwrap();
    assert_eq!(k.len(), 19);
    assert_eq!(k.iter().map(|&w| u64::from(w)).sum::<u64>(), 65536);
    assert_eq!(shadow_blur_kernel(0.0).unwrap(), vec![1 << 16]);
    assert!(gaussian_kernel_q16(2, f32::NAN).is_err());
}

#[test]
fn blur_spreads_a_single_pixel() {
    let (w, h) = (9u32, 9u32);
    let mut buf = vec![0u8; (w * h * 4) as usize];
    let center = ((4 * w + 4) * 4) as usize;
    buf[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);
    let k = gaussian_kernel_q16(2, 1.0).unwrap();
    blur_rgba8_premul_q16(&mut buf, w, h, &k);

    assert!(buf[center + 3] < 255);
    let neighbor = ((4 * w + 5) * 4) as usize;
    assert!(buf[neighbor + 3] > 0);
    assert_eq!(buf[3], 0);
}

#[test]
fn stroke_outline_covers_the_line_width() {
    let mut p = BezPath::new();
    p.move_to((10.0, 10.0));
    p.line_to((50.0, 10.0));
    let outline = stroke_outline(&p, 4.0);
    let bb = outline.bounding_box();
    assert!((bb.y0 - 8.0).abs() < 1e-3);
    assert!((bb.y1 - 12.0).abs() < 1e-3);
    // Round caps extend past the endpoints.
    assert!(bb.x0 < 10.0 && bb.x1 > 50.0);
}
