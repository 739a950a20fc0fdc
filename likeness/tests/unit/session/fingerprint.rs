use super::*;
use crate::scene::payload::{FaceAnchor, Finding};

fn payload() -> ResultPayload {
    ResultPayload::from_findings(vec![Finding::new(
        "鼻子",
        ParentAttribution::Father,
        70,
        "高挺",
    )])
}

fn inputs(p: &ResultPayload) -> PassInputs<'_> {
    PassInputs {
        image_digest: 7,
        payload: p,
        width: 360.0,
        device_pixel_ratio: 2.0,
        opts_digest: 11,
    }
}

#[test]
fn identical_inputs_share_a_fingerprint() {
    let a = payload();
    let b = payload();
    assert_eq!(fingerprint_pass(&inputs(&a)), fingerprint_pass(&inputs(&b)));
}

#[test]
fn every_input_feeds_the_fingerprint() {
    let p = payload();
    let base = fingerprint_pass(&inputs(&p));

    let mut other = inputs(&p);
    other.width = 361.0;
    assert_ne!(fingerprint_pass(&other), base);

    let mut other = inputs(&p);
    other.device_pixel_ratio = 3.0;
    assert_ne!(fingerprint_pass(&other), base);

    let mut other = inputs(&p);
    other.image_digest = 8;
    assert_ne!(fingerprint_pass(&other), base);

    let mut moved = payload();
    moved.face_center = Some(FaceAnchor { x: 51.0, y: 40.0 });
    assert_ne!(fingerprint_pass(&inputs(&moved)), base);

    let mut edited = payload();
    edited.analysis_results[0].description.push('!');
    assert_ne!(fingerprint_pass(&inputs(&edited)), base);
}

#[test]
fn explicit_default_anchor_matches_missing_anchor() {
    let implicit = payload();
    let mut explicit = payload();
    explicit.face_center = Some(FaceAnchor { x: 50.0, y: 40.0 });
    explicit.face_width = Some(40.0);
    assert_eq!(
        fingerprint_pass(&inputs(&implicit)),
        fingerprint_pass(&inputs(&explicit))
    );
}

#[test]
fn byte_digest_is_stable() {
    assert_eq!(digest_bytes(b"abc"), digest_bytes(b"abc"));
    assert_ne!(digest_bytes(b"abc"), digest_bytes(b"abd"));
}
