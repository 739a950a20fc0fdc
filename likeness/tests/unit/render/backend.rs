use super::*;

fn frame(data: Vec<u8>) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data,
        premultiplied: true,
    }
}

#[test]
fn unpremultiply_restores_straight_color() {
    let mut f = frame(vec![64, 32, 0, 128, 9, 9, 9, 0]);
    f.unpremultiply();
    assert!(!f.premultiplied);
    assert_eq!(&f.data[..4], &[128, 64, 0, 128]);
    assert_eq!(&f.data[4..], &[0, 0, 0, 0]);

    let before = f.data.clone();
    f.unpremultiply();
    assert_eq!(f.data, before);
}

#[test]
fn pixel_lookup_is_bounds_checked() {
    let f = frame(vec![1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(f.pixel(1, 0), Some([5, 6, 7, 8]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 1), None);
}

#[test]
fn png_round_trips_opaque_pixels() {
    let f = frame(vec![10, 20, 30, 255, 200, 100, 50, 255]);
    let png = f.encode_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.into_raw(), f.data);
}

#[test]
fn mismatched_length_is_a_render_error() {
    let f = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 4],
        premultiplied: false,
    };
    assert!(matches!(f.encode_png(), Err(LikenessError::Render(_))));
}
