use super::*;
use crate::animation::timeline::TIMELINE;
use crate::assets::decode::PreparedImage;
use crate::model::config::HeroCount;

fn img(w: u32, h: u32) -> PreparedImage {
    PreparedImage::from_premul(w, h, vec![255; (w * h * 4) as usize]).unwrap()
}

fn texts(ops: &LayerOps) -> Vec<&str> {
    ops.ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

fn full_images(kind: AssetKind, config: &AssetConfig) -> ImageSet {
    let mut images = ImageSet::new();
    for id in crate::assets::resolve::image_sources(kind, config) {
        let (w, h) = if id.starts_with("overlays/") && id != cursor_id() {
            (40, 20)
        } else {
            (4, 4)
        };
        images.insert(id, img(w, h));
    }
    images
}

#[test]
fn social_has_five_layers_header_three() {
    let config = AssetConfig::default();
    let images = ImageSet::new();
    let social = Compositor::new(AssetKind::Social, &config, &images, None);
    assert_eq!(social.layers(), Layer::ORDER.to_vec());
    let header = Compositor::new(AssetKind::Header, &config, &images, None);
    assert_eq!(
        header.layers(),
        vec![Layer::Background, Layer::Overlay, Layer::Cursor]
    );
    let c = header.canvas();
    assert_eq!((c.width, c.height), (2064, 600));
}

#[test]
fn missing_background_falls_back_to_gradient() {
    let config = AssetConfig::default();
    let mut ts = Typesetter::new();
    let scene = Compositor::new(AssetKind::Social, &config, &ImageSet::new(), None)
        .static_scene(&mut ts);
    let bg = scene.layer(Layer::Background).unwrap();
    let [DrawOp::Fill { geometry, paint }] = bg.ops.as_slice() else {
        panic!("unexpected background ops: {:?}", bg.ops);
    };
    assert_eq!(geometry.bounds(), Rect::new(0.0, 0.0, 2400.0, 1260.0));
    let Paint::Linear { end, stops, .. } = paint else {
        panic!("expected gradient");
    };
    assert_eq!(*end, Point::new(2400.0, 1260.0));
    assert_eq!(stops.len(), 3);
    assert_eq!(stops[1].color, Rgba8::opaque(0x0a, 0x1f, 0x1a));
}

#[test]
fn loaded_background_is_stretched() {
    let config = AssetConfig::default();
    let mut images = ImageSet::new();
    images.insert(default_background_id(AssetKind::Header), img(2, 2));
    let scene = Compositor::new(AssetKind::Header, &config, &images, None)
        .static_scene(&mut Typesetter::new());
    let bg = scene.layer(Layer::Background).unwrap();
    assert!(matches!(
        bg.ops.as_slice(),
        [DrawOp::Image { dst, src: None, .. }] if *dst == Rect::new(0.0, 0.0, 2064.0, 600.0)
    ));
}

#[test]
fn corner_patch_only_for_default_background() {
    let config = AssetConfig::default();
    let mut images = ImageSet::new();
    images.insert(default_background_id(AssetKind::Social), img(4, 4));
    let mut ts = Typesetter::new();

    let product = Compositor::new(AssetKind::Social, &config, &images, None)
        .layer(Layer::Product, LayerAnim::REST, &mut ts)
        .unwrap();
    assert!(matches!(
        product.ops.first(),
        Some(DrawOp::Image { src: Some(s), dst, .. }) if *s == PATCH_SRC && *dst == PATCH_DST
    ));

    let custom = config.with_background(Background::Custom {
        url: "bg/custom.png".into(),
    });
    let product = Compositor::new(AssetKind::Social, &custom, &images, None)
        .layer(Layer::Product, LayerAnim::REST, &mut ts)
        .unwrap();
    assert!(
        !product
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Image { src: Some(_), .. }))
    );
    assert_eq!(texts(&product), vec!["GitHub"]);
}

#[test]
fn github_logo_is_tinted_white() {
    let config = AssetConfig::default();
    let images = full_images(AssetKind::Social, &config);
    let mut ts = Typesetter::new();
    let logo_tint = |config: &AssetConfig, ts: &mut Typesetter| {
        Compositor::new(AssetKind::Social, config, &images, None)
            .layer(Layer::Product, LayerAnim::REST, ts)
            .unwrap()
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Image {
                    id, tint_white, ..
                } if id.starts_with("logos/") => Some(*tint_white),
                _ => None,
            })
    };
    assert_eq!(logo_tint(&config, &mut ts), Some(true));
}

#[test]
fn empty_copy_draws_badge_only() {
    let config = AssetConfig::default().with_social_copy("");
    let mut ts = Typesetter::new();
    let headline = Compositor::new(
        AssetKind::Social,
        &config,
        &ImageSet::new(),
        Some(FocusedField::SocialCopy),
    )
    .layer(Layer::Headline, LayerAnim::REST, &mut ts)
    .unwrap();
    assert_eq!(texts(&headline), vec!["NEW RELEASE"]);
    let strokes = headline
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::Stroke { .. }))
        .count();
    assert_eq!(strokes, 1, "badge pill only, no focus outline");
}

#[test]
fn headline_is_capped_at_four_lines_and_bottom_anchored() {
    let config = AssetConfig::default()
        .with_social_copy("one two three four five six seven eight nine ten eleven twelve");
    let mut ts = Typesetter::new();
    let headline = Compositor::new(AssetKind::Social, &config, &ImageSet::new(), None)
        .layer(Layer::Headline, LayerAnim::REST, &mut ts)
        .unwrap();
    let lines = texts(&headline);
    assert_eq!(lines.len(), 1 + 4);

    let baselines: Vec<f64> = headline
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { origin, style, .. } if style.role == FontRole::Display => {
                Some(origin.y)
            }
            _ => None,
        })
        .collect();
    let content_top = 1260.0 - 120.0 - 4.0 * 118.0;
    assert!((baselines[0] - (content_top + 118.0 * 0.85)).abs() < 1e-9);
    assert!((baselines[3] - baselines[0] - 3.0 * 118.0).abs() < 1e-9);

    let DrawOp::Stroke { geometry, .. } = &headline.ops[0] else {
        panic!("badge pill first");
    };
    assert!((geometry.bounds().y1 - (content_top - 40.0)).abs() < 1e-9);
}

#[test]
fn copy_focus_outlines_the_block() {
    let config = AssetConfig::default();
    let mut ts = Typesetter::new();
    let headline = Compositor::new(
        AssetKind::Social,
        &config,
        &ImageSet::new(),
        Some(FocusedField::SocialCopy),
    )
    .layer(Layer::Headline, LayerAnim::REST, &mut ts)
    .unwrap();
    let outline = headline.ops.iter().rev().find_map(|op| match op {
        DrawOp::Stroke {
            geometry, color, ..
        } if *color == FOCUS_COLOR => Some(*geometry),
        _ => None,
    });
    let b = outline.expect("focus outline").bounds();
    assert!((b.y1 - (1260.0 - 120.0 + 20.0)).abs() < 1e-9);
}

#[test]
fn overlay_needs_its_image() {
    let config = AssetConfig::default();
    let mut ts = Typesetter::new();
    let overlay = Compositor::new(AssetKind::Social, &config, &ImageSet::new(), None)
        .layer(Layer::Overlay, LayerAnim::REST, &mut ts)
        .unwrap();
    assert!(overlay.is_empty());
}

#[test]
fn dropdown_width_follows_hero_name() {
    let base = AssetConfig::default();
    let images = full_images(AssetKind::Social, &base);
    let mut ts = Typesetter::new();
    let button_width = |config: &AssetConfig, ts: &mut Typesetter| {
        Compositor::new(AssetKind::Social, config, &images, None)
            .layer(Layer::Overlay, LayerAnim::REST, ts)
            .unwrap()
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Fill { geometry, .. } => Some(geometry.bounds().width()),
                _ => None,
            })
            .unwrap()
    };
    let short = button_width(
        &base.with_model(
            crate::model::config::ModelSlot::Hero1,
            crate::model::config::ModelConfig::new("A", crate::model::catalog::Provider::Meta),
        ),
        &mut ts,
    );
    let long = button_width(&base, &mut ts);
    assert!(long > short);

    let overlay = Compositor::new(AssetKind::Social, &base, &images, None)
        .layer(Layer::Overlay, LayerAnim::REST, &mut ts)
        .unwrap();
    assert!(overlay.is_balanced());
    assert!(matches!(
        overlay.ops.first(),
        Some(DrawOp::Image { dst, .. }) if *dst == Rect::new(2360.0, 620.0, 2400.0, 640.0)
    ));
}

#[test]
fn header_cursor_tracks_overlay_edge() {
    let config = AssetConfig::default();
    let images = full_images(AssetKind::Header, &config);
    let comp = Compositor::new(AssetKind::Header, &config, &images, None);
    let cursor = comp
        .layer(Layer::Cursor, LayerAnim::REST, &mut Typesetter::new())
        .unwrap();
    let v = layout(AssetKind::Header, HeroCount::One);
    let [DrawOp::Image { dst, .. }] = cursor.ops.as_slice() else {
        panic!("cursor image");
    };
    let overlay_x = (2064.0 - 40.0) / 2.0;
    assert!((dst.x0 - (overlay_x + 40.0 + v.cursor_x)).abs() < 1e-9);
    assert!((dst.width() - 4.0 * v.cursor_scale).abs() < 1e-9);

    let no_overlay = Compositor::new(AssetKind::Header, &config, &{
        let mut only_cursor = ImageSet::new();
        only_cursor.insert(cursor_id(), img(4, 4));
        only_cursor
    }, None)
    .layer(Layer::Cursor, LayerAnim::REST, &mut Typesetter::new())
    .unwrap();
    assert!(no_overlay.is_empty());
}

#[test]
fn offsets_shift_anchors_and_opacity_is_scoped() {
    let config = AssetConfig::default();
    let mut ts = Typesetter::new();
    let none = ImageSet::new();
    let comp = Compositor::new(AssetKind::Social, &config, &none, None);
    let anim = LayerAnim {
        opacity: 0.5,
        offset_x: -80.0,
        offset_y: 0.0,
    };
    let product = comp.layer(Layer::Product, anim, &mut ts).unwrap();
    assert_eq!(product.ops.first(), Some(&DrawOp::PushOpacity(0.5)));
    assert_eq!(product.ops.last(), Some(&DrawOp::Pop));
    let origin = product.ops.iter().find_map(|op| match op {
        DrawOp::Text { origin, .. } => Some(*origin),
        _ => None,
    });
    assert_eq!(origin.map(|o| o.x), Some(224.0 - 80.0));
}

#[test]
fn non_finite_params_fail_the_layer_only() {
    let config = AssetConfig::default();
    let none = ImageSet::new();
    let comp = Compositor::new(AssetKind::Social, &config, &none, None);
    let bad = LayerAnim {
        opacity: f64::NAN,
        ..LayerAnim::REST
    };
    assert!(comp.layer(Layer::Product, bad, &mut Typesetter::new()).is_err());
}

#[test]
fn first_frame_is_background_only() {
    let config = AssetConfig::default();
    let images = full_images(AssetKind::Social, &config);
    let mut ts = Typesetter::new();
    let comp = Compositor::new(AssetKind::Social, &config, &images, None);
    let scene = comp.frame_scene(0.0, &crate::animation::timeline::frame_params(0.0), &mut ts);
    assert_eq!(scene.drawn_layers(), vec![Layer::Background]);
    assert_eq!(scene.clear, Some(FRAME_FILL));
}

#[test]
fn steady_state_matches_static() {
    let config = AssetConfig::default();
    let images = full_images(AssetKind::Social, &config);
    let mut ts = Typesetter::new();
    let comp = Compositor::new(AssetKind::Social, &config, &images, None);
    let still = comp.static_scene(&mut ts);
    for t in [TIMELINE.cursor.end, 6.0, TIMELINE.hold_until] {
        let frame = comp.frame_scene(t, &crate::animation::timeline::frame_params(t), &mut ts);
        assert_eq!(frame.layers, still.layers, "t = {t}");
    }
    assert_eq!(still.clear, None);
}
