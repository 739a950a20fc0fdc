use super::*;
use crate::scene::payload::{FaceAnchor, ResultPayload};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn missing_anchor_uses_default_frame() {
    let payload = ResultPayload::from_findings(Vec::new());
    let frame = FaceFrame::from_payload(&payload, 400.0, 300.0);
    assert_eq!(frame.center, Point::new(200.0, 120.0));
    assert_eq!(frame.face_width, 160.0);
}

#[test]
fn explicit_anchor_is_scaled_to_displayed_image() {
    let mut payload = ResultPayload::from_findings(Vec::new());
    payload.face_center = Some(FaceAnchor { x: 25.0, y: 60.0 });
    payload.face_width = Some(50.0);
    let frame = FaceFrame::from_payload(&payload, 200.0, 100.0);
    assert_eq!(frame.center, Point::new(50.0, 60.0));
    assert_eq!(frame.face_width, 100.0);
}

#[test]
fn non_finite_anchor_falls_back_to_default() {
    let mut payload = ResultPayload::from_findings(Vec::new());
    payload.face_center = Some(FaceAnchor {
        x: f64::NAN,
        y: 10.0,
    });
    payload.face_width = Some(-3.0);
    let frame = FaceFrame::from_payload(&payload, 100.0, 100.0);
    assert_eq!(frame.center, Point::new(50.0, 40.0));
    assert_eq!(frame.face_width, 40.0);
}

#[test]
fn nose_anchor_sits_near_face_center() {
    let frame = FaceFrame {
        center: Point::new(200.0, 120.0),
        face_width: 160.0,
    };
    let opts = ConnectorOpts::default();
    let p = anchor_point(&frame, SlotCategory::Nose, 0, &opts).expect("nose anchor");
    assert!(approx(p.x, 200.0 - 12.8 - 2.0));
    assert!(approx(p.y, 120.0));
}

#[test]
fn regions_are_ordered_top_to_bottom() {
    let frame = FaceFrame {
        center: Point::new(0.0, 0.0),
        face_width: 100.0,
    };
    let opts = ConnectorOpts::default();
    let y = |c| {
        anchor_point(&frame, c, 0, &opts)
            .map(|p| p.y)
            .expect("anchored region")
    };
    assert!(y(SlotCategory::HeadShape) < y(SlotCategory::Eyebrows));
    assert!(y(SlotCategory::Eyebrows) < y(SlotCategory::Eyes));
    assert!(y(SlotCategory::Eyes) < y(SlotCategory::Nose));
    assert!(y(SlotCategory::Nose) < y(SlotCategory::Mouth));
    assert!(y(SlotCategory::Mouth) < y(SlotCategory::FaceShape));
}

#[test]
fn summary_has_no_anchor() {
    let frame = FaceFrame {
        center: Point::new(10.0, 10.0),
        face_width: 10.0,
    };
    assert!(region_offset(SlotCategory::Summary).is_none());
    assert!(anchor_point(&frame, SlotCategory::Summary, 0, &ConnectorOpts::default()).is_none());
}

#[test]
fn jitter_cycles_through_small_offsets() {
    let opts = ConnectorOpts::default();
    let jitters: Vec<f64> = (0..5).map(|row| opts.jitter(row)).collect();
    assert_eq!(jitters, vec![-2.0, 0.0, 2.0, -1.0, 1.0]);

    let frame = FaceFrame {
        center: Point::new(100.0, 100.0),
        face_width: 100.0,
    };
    let a = anchor_point(&frame, SlotCategory::Mouth, 0, &opts).expect("mouth");
    let b = anchor_point(&frame, SlotCategory::Mouth, 2, &opts).expect("mouth");
    assert!(approx(b.x - a.x, 4.0));
    assert_eq!(a.y, b.y);
}
