use super::*;
use crate::animation::timeline::Layer;
use crate::layout::table::{descriptor, layout};
use crate::model::config::AssetKind;

fn slots(config: &AssetConfig) -> Vec<ModelSlot> {
    build_model_rows(config).iter().map(|r| r.slot).collect()
}

#[test]
fn rows_follow_hero_count() {
    use ModelSlot::*;
    let base = AssetConfig::default();
    assert_eq!(slots(&base), vec![Other1, Hero1, Other2]);
    assert_eq!(
        slots(&base.with_hero_count(HeroCount::Two)),
        vec![Other1, Hero1, Hero2, Other2]
    );
    assert_eq!(
        slots(&base.with_hero_count(HeroCount::Three)),
        vec![Other1, Hero1, Hero2, Hero3, Other2]
    );

    for hc in HeroCount::ALL {
        let c = base.with_hero_count(hc);
        let rows = build_model_rows(&c);
        assert_eq!(rows.len(), 2 + hc.get());
        assert_eq!(rows.iter().filter(|r| r.selected).count(), hc.get());
        assert!(rows.iter().enumerate().all(|(i, r)| r.row_index == i));
    }
}

#[test]
fn first_hero_centres_on_mask_for_one_hero() {
    let d = descriptor(AssetKind::Social);
    let v = layout(AssetKind::Social, HeroCount::One);
    let mask = mask_rect(&d.list, v, Point::new(0.0, 0.0));
    let top = row_top(&d.list, v, mask, HeroCount::One, 1);
    let centre = top + d.list.row_height / 2.0;
    assert!((centre - (mask.y0 + mask.height() / 2.0)).abs() < 1e-9);
}

#[test]
fn midpoint_sits_between_first_two_heroes() {
    for kind in [AssetKind::Social, AssetKind::Header] {
        let d = descriptor(kind);
        let v = layout(kind, HeroCount::Two);
        let mask = mask_rect(&d.list, v, Point::new(10.0, 20.0));
        let hero1 = row_top(&d.list, v, mask, HeroCount::Two, 1);
        let hero2 = row_top(&d.list, v, mask, HeroCount::Two, 2);
        assert!((hero1 + d.list.row_height - (mask.y0 + mask.height() / 2.0)).abs() < 1e-9);
        assert_eq!(hero2 - hero1, d.list.row_height);
    }
}

#[test]
fn list_is_clipped_and_dims_other_rows() {
    let d = descriptor(AssetKind::Header);
    let v = layout(AssetKind::Header, HeroCount::One);
    let config = AssetConfig::default();
    let mut images = ImageSet::new();
    for row in build_model_rows(&config) {
        images.insert(
            provider_logo(row.model.provider),
            crate::assets::decode::PreparedImage::from_premul(1, 1, vec![255; 4]).unwrap(),
        );
    }
    let mut ts = Typesetter::new();
    let mut out = LayerOps::new(Layer::Overlay);
    draw_model_list(&mut out, &d.list, v, &config, &images, None, Point::ZERO, &mut ts);

    assert!(out.is_balanced());
    assert!(matches!(out.ops.first(), Some(DrawOp::PushClip(_))));
    let dimmed = out
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::PushOpacity(o) if (*o - 0.4).abs() < 1e-12))
        .count();
    assert_eq!(dimmed, 2);
    let texts: Vec<(&str, Rgba8)> = out
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, color, .. } => Some((text.as_str(), *color)),
            _ => None,
        })
        .collect();
    assert_eq!(
        texts,
        vec![
            ("Gemini 3 Pro (Preview)", OTHER_TEXT_COLOR),
            ("GPT-5.2-Codex", Rgba8::WHITE),
            ("Claude Opus 4.5", OTHER_TEXT_COLOR),
        ]
    );
}

#[test]
fn focus_outline_wraps_measured_row() {
    let d = descriptor(AssetKind::Social);
    let v = layout(AssetKind::Social, HeroCount::One);
    let config = AssetConfig::default();
    let mut ts = Typesetter::new();
    let mut out = LayerOps::new(Layer::Overlay);
    draw_model_list(
        &mut out,
        &d.list,
        v,
        &config,
        &ImageSet::new(),
        Some(FocusedField::HeroModel1),
        Point::ZERO,
        &mut ts,
    );
    let strokes: Vec<&DrawOp> = out
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::Stroke { .. }))
        .collect();
    assert_eq!(strokes.len(), 1);
    let DrawOp::Stroke { geometry, color, .. } = strokes[0] else {
        unreachable!()
    };
    assert_eq!(*color, FOCUS_COLOR);
    let text_w = ts.measure(
        "GPT-5.2-Codex",
        TextStyle::new(d.list.hero_font, d.list.font_size),
    );
    let b = geometry.bounds();
    assert!((b.width() - (109.0 + 44.0 + text_w + 32.0)).abs() < 1e-9);
    assert!((b.height() - (109.0 + 32.0)).abs() < 1e-9);
}

#[test]
fn hidden_hero_focus_draws_nothing() {
    let d = descriptor(AssetKind::Social);
    let v = layout(AssetKind::Social, HeroCount::One);
    let mut out = LayerOps::new(Layer::Overlay);
    draw_model_list(
        &mut out,
        &d.list,
        v,
        &AssetConfig::default(),
        &ImageSet::new(),
        Some(FocusedField::HeroModel3),
        Point::ZERO,
        &mut Typesetter::new(),
    );
    assert!(!out.ops.iter().any(|op| matches!(op, DrawOp::Stroke { .. })));
}
