use super::*;
use crate::scene::payload::ParentAttribution;
use crate::text::metrics::FixedAdvanceText;

fn finding(part: &str, description: &str) -> Finding {
    Finding::new(part, ParentAttribution::Father, 72, description)
}

#[test]
fn empty_regular_card_height_is_header_plus_one_line() {
    let mut m = FixedAdvanceText::default();
    let card = measure_card(
        &mut m,
        &finding("鼻子", ""),
        CardKind::Regular,
        300.0,
        &CardMetrics::default(),
    );
    assert_eq!(card.height, 14.0 + 26.0 + 16.0 + 15.0);
    assert_eq!(card.lines, vec![String::new()]);
    assert!(!card.header.collides());
}

#[test]
fn each_wrapped_line_adds_one_line_height() {
    let mut m = FixedAdvanceText::default();
    let metrics = CardMetrics::default();
    // 11px body at half an em per column: 5.5px per ASCII char, 270px of text width.
    let one_line = measure_card(
        &mut m,
        &finding("鼻子", &"x".repeat(49)),
        CardKind::Regular,
        300.0,
        &metrics,
    );
    let two_lines = measure_card(
        &mut m,
        &finding("鼻子", &"x".repeat(50)),
        CardKind::Regular,
        300.0,
        &metrics,
    );
    assert_eq!(one_line.lines.len(), 1);
    assert_eq!(two_lines.lines.len(), 2);
    assert_eq!(two_lines.height - one_line.height, 16.0);
}

#[test]
fn summary_card_uses_summary_header_and_line_height() {
    let mut m = FixedAdvanceText::default();
    let card = measure_card(
        &mut m,
        &finding("总结", ""),
        CardKind::Summary,
        240.0,
        &CardMetrics::default(),
    );
    assert_eq!(card.height, 14.0 + 32.0 + 22.0 + 15.0);
}

#[test]
fn long_part_name_pushes_score_to_its_own_line() {
    let mut m = FixedAdvanceText::default();
    let metrics = CardMetrics::default();
    // badge_x = 300 - 54 - 15 = 231; 13 ideographs at bold 15px = 195px of label.
    let long = finding(&"眉".repeat(13), "");
    let header = header_layout(&mut m, &long, CardKind::Regular, 300.0, &metrics);
    assert_eq!(header.badge_x, 231.0);
    assert_eq!(header.score_x, 15.0 + 195.0 + 5.0);
    assert!(header.score_x + 22.5 > header.badge_x - 5.0);
    assert_eq!(header.score, ScorePlacement::Wrapped);
    assert_eq!(header.extra_height, 16.0);
    assert_eq!(header.score_style(&metrics), TextStyle::bold(12.0));

    let card = measure_card(&mut m, &long, CardKind::Regular, 300.0, &metrics);
    assert_eq!(card.height, 14.0 + 26.0 + 16.0 + 16.0 + 15.0);
}

#[test]
fn tight_but_fitting_score_uses_compact_font() {
    let mut m = FixedAdvanceText::default();
    let metrics = CardMetrics::default();
    let header = header_layout(
        &mut m,
        &finding(&"眉".repeat(12), ""),
        CardKind::Regular,
        300.0,
        &metrics,
    );
    assert_eq!(header.score, ScorePlacement::Inline { compact: true });
    assert_eq!(header.extra_height, 0.0);
    assert_eq!(header.score_style(&metrics), TextStyle::bold(13.0));
}

#[test]
fn roomy_header_keeps_score_inline_at_full_size() {
    let mut m = FixedAdvanceText::default();
    let metrics = CardMetrics::default();
    let header = header_layout(
        &mut m,
        &finding("眉毛", ""),
        CardKind::Regular,
        300.0,
        &metrics,
    );
    assert_eq!(header.score, ScorePlacement::Inline { compact: false });
    assert_eq!(header.score_style(&metrics), TextStyle::bold(15.0));
}

#[test]
fn height_is_monotonic_in_description_length() {
    let mut m = FixedAdvanceText::default();
    let metrics = CardMetrics::default();
    let text = "眼型和妈妈一样是漂亮的杏仁眼, bright and curious eyes that sparkle";
    let mut prefix = String::new();
    let mut last = 0.0;
    for ch in text.chars() {
        prefix.push(ch);
        let h = measure_card(
            &mut m,
            &finding("眼睛", &prefix),
            CardKind::Regular,
            114.0,
            &metrics,
        )
        .height;
        assert!(h >= last);
        last = h;
    }
}

#[test]
fn zero_width_degrades_to_tall_card() {
    let mut m = FixedAdvanceText::default();
    let card = measure_card(
        &mut m,
        &finding("嘴巴", "abc"),
        CardKind::Regular,
        0.0,
        &CardMetrics::default(),
    );
    assert!(card.height.is_finite());
    assert_eq!(card.lines.len(), 4);
    assert!(card.header.collides());
}

#[test]
fn score_label_is_clamped_percent() {
    assert_eq!(score_label(&finding("x", "")), "72%");
    let over = Finding::new("x", ParentAttribution::Mother, 250, "");
    assert_eq!(score_label(&over), "100%");
}
