use super::*;

#[test]
fn hex_literal_splits_channels() {
    assert_eq!(Rgba8::hex(0x38bdf8), Rgba8::rgb(0x38, 0xbd, 0xf8));
}

#[test]
fn parse_hex_accepts_rgb_and_rgba() {
    assert_eq!(Rgba8::parse_hex("#0f172a").unwrap(), Rgba8::hex(0x0f172a));
    let c = Rgba8::parse_hex("#1e293b99").unwrap();
    assert_eq!(c.a, 0x99);
    assert!(Rgba8::parse_hex("0f172a").is_err());
    assert!(Rgba8::parse_hex("#0f17").is_err());
    assert!(Rgba8::parse_hex("#zz172a").is_err());
}

#[test]
fn premultiplied_scales_color_by_alpha() {
    let c = Rgba8::rgb(200, 100, 0).with_opacity(0.5);
    assert_eq!(c.a, 128);
    assert_eq!(c.premultiplied(), [100, 50, 0, 128]);
}

#[test]
fn logical_size_rounds_up_with_pixel_ratio() {
    let size = LogicalSize {
        width: 360.0,
        height: 100.25,
    };
    assert_eq!(size.to_pixels(2.0), (720, 201));
    assert_eq!(size.to_pixels(f64::NAN), (360, 101));
}

#[test]
fn logical_size_never_collapses_to_zero_pixels() {
    let size = LogicalSize {
        width: 0.0,
        height: -5.0,
    };
    assert_eq!(size.to_pixels(1.0), (1, 1));
}
