use super::*;

fn frame() -> RouteFrame {
    RouteFrame {
        image_height: 300.0,
        surface_width: 360.0,
        section_gap: 50.0,
    }
}

#[test]
fn part_colors_follow_utf16_hash() {
    assert_eq!(color_for("眉毛").color(), Rgba8::hex(0xfbbf24));
    assert_eq!(color_for("眼睛").color(), Rgba8::hex(0xa3e635));
    assert_eq!(color_for("脸型").color(), Rgba8::hex(0x38bdf8));
    assert_eq!(color_for("nose").color(), Rgba8::hex(0xf472b6));
    // Astral characters count as two UTF-16 units and hash the high surrogate.
    assert_eq!(color_for("😀"), PaletteIndex(3));
    assert_eq!(color_for(""), PaletteIndex(0));
}

#[test]
fn color_is_a_pure_function_of_the_name() {
    assert_eq!(color_for("总结"), color_for("总结"));
    assert_eq!(color_for("总结"), PaletteIndex(4));
}

#[test]
fn left_connector_runs_down_the_left_rail() {
    let card = Rect::new(60.0, 350.0, 174.0, 437.0);
    let anchor = Point::new(150.0, 100.0);
    let path = route_connector(
        anchor,
        card,
        Placement::Left,
        0,
        PaletteIndex(4),
        &frame(),
        &ConnectorOpts::default(),
    )
    .expect("left connector");

    assert_eq!(path.rail_x, 30.0);
    assert_eq!(path.ctrl_out, Point::new(70.0, 100.0));
    assert_eq!(path.ctrl_in, Point::new(30.0, 180.0));
    assert_eq!(path.elbow, Point::new(30.0, 310.0));
    assert_eq!(path.rail_end, Point::new(30.0, 363.0));
    assert_eq!(path.corner, Point::new(30.0, 378.0));
    assert_eq!(path.entry, Point::new(60.0, 378.0));
}

#[test]
fn right_connector_enters_the_right_edge_on_a_shifted_rail() {
    let card = Rect::new(186.0, 442.0, 300.0, 529.0);
    let anchor = Point::new(220.0, 250.0);
    let path = route_connector(
        anchor,
        card,
        Placement::Right,
        1,
        PaletteIndex(6),
        &frame(),
        &ConnectorOpts::default(),
    )
    .expect("right connector");

    assert_eq!(path.rail_x, 322.0);
    assert_eq!(path.ctrl_out, Point::new(300.0, 250.0));
    // Drop is capped so the control point stays above the elbow.
    assert_eq!(path.ctrl_in, Point::new(322.0, 278.0));
    assert_eq!(path.elbow, Point::new(322.0, 318.0));
    assert_eq!(path.entry, Point::new(300.0, 470.0));
}

#[test]
fn rails_wrap_every_four_rows() {
    let opts = ConnectorOpts::default();
    let offsets: Vec<f64> = (0..5).map(|r| opts.channel_offset(r)).collect();
    assert_eq!(offsets, vec![0.0, 8.0, 16.0, 24.0, 0.0]);
}

#[test]
fn summary_is_not_routed() {
    let path = route_connector(
        Point::new(0.0, 0.0),
        Rect::new(60.0, 500.0, 300.0, 600.0),
        Placement::Bottom,
        0,
        PaletteIndex(0),
        &frame(),
        &ConnectorOpts::default(),
    );
    assert!(path.is_none());
}

#[test]
fn bez_path_starts_at_anchor_and_ends_at_entry() {
    use kurbo::Shape;

    let path = route_connector(
        Point::new(150.0, 100.0),
        Rect::new(60.0, 350.0, 174.0, 437.0),
        Placement::Left,
        2,
        PaletteIndex(1),
        &frame(),
        &ConnectorOpts::default(),
    )
    .expect("left connector");
    let bez = path.to_bez_path();
    let els = bez.elements();
    assert_eq!(els.len(), 4);
    assert_eq!(els[0], kurbo::PathEl::MoveTo(path.anchor));
    assert_eq!(els[3], kurbo::PathEl::QuadTo(path.corner, path.entry));
    assert!(bez.bounding_box().x0 <= path.rail_x);
}

#[test]
fn degenerate_modulus_does_not_panic() {
    let opts = ConnectorOpts {
        jitter_modulus: 0,
        channel_modulus: 0,
        ..ConnectorOpts::default()
    };
    assert_eq!(opts.jitter(3), -2.0);
    assert_eq!(opts.channel_offset(3), 0.0);
}
