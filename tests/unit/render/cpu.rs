use super::*;
use crate::animation::timeline::Layer;
use crate::compose::scene::LayerOps;

fn scene(w: u32, h: u32, layers: Vec<LayerOps>) -> Scene {
    Scene {
        canvas: Canvas {
            width: w,
            height: h,
        },
        clear: None,
        layers,
    }
}

fn fill(rect: Rect, c: Rgba8) -> DrawOp {
    DrawOp::Fill {
        geometry: Geometry::Rect(rect),
        paint: Paint::Solid(c),
    }
}

fn render(s: &Scene, images: &ImageSet) -> FrameRGBA {
    CpuBackend::new()
        .render_scene(s, images, &mut Typesetter::new())
        .unwrap()
}

#[test]
fn zero_sized_surface_is_a_surface_error() {
    let err = CpuBackend::new()
        .render_scene(&scene(0, 4, vec![]), &ImageSet::new(), &mut Typesetter::new())
        .unwrap_err();
    assert!(matches!(err, PromoError::Surface(_)));
}

#[test]
fn clear_colour_fills_opaque() {
    let mut s = scene(4, 4, vec![]);
    s.clear = Some(Rgba8::opaque(13, 17, 23));
    let f = render(&s, &ImageSet::new());
    assert!(f.premultiplied);
    assert_eq!(f.pixel(2, 2), Some([13, 17, 23, 255]));
}

#[test]
fn empty_scene_is_transparent() {
    let f = render(&scene(3, 2, vec![]), &ImageSet::new());
    assert_eq!(f.data, vec![0; 3 * 2 * 4]);
}

#[test]
fn opacity_scope_halves_alpha() {
    let mut layer = LayerOps::new(Layer::Product);
    layer.with_opacity(0.5, |l| {
        l.push(fill(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba8::WHITE))
    });
    let f = render(&scene(4, 4, vec![layer]), &ImageSet::new());
    let [_, _, _, a] = f.pixel(1, 1).unwrap();
    assert!((126..=129).contains(&a), "alpha {a}");
}

#[test]
fn clip_limits_drawing() {
    let mut layer = LayerOps::new(Layer::Overlay);
    layer.with_clip(Rect::new(0.0, 0.0, 2.0, 4.0), |l| {
        l.push(fill(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba8::WHITE))
    });
    let f = render(&scene(4, 4, vec![layer]), &ImageSet::new());
    assert_eq!(f.pixel(0, 0).map(|p| p[3]), Some(255));
    assert_eq!(f.pixel(3, 0).map(|p| p[3]), Some(0));
}

#[test]
fn broken_layer_does_not_abort_frame() {
    let mut bad = LayerOps::new(Layer::Headline);
    bad.push(DrawOp::Pop);
    bad.push(fill(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba8::opaque(255, 0, 0)));
    let mut good = LayerOps::new(Layer::Cursor);
    good.push(fill(Rect::new(2.0, 0.0, 4.0, 4.0), Rgba8::opaque(0, 0, 255)));

    let f = render(&scene(4, 4, vec![bad, good]), &ImageSet::new());
    assert_eq!(f.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(f.pixel(3, 0), Some([0, 0, 255, 255]));
}

#[test]
fn image_sub_rect_lands_in_destination() {
    // 2x1 image: left red, right green.
    let img = PreparedImage::from_premul(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
    let mut images = ImageSet::new();
    images.insert("px", img);
    let mut layer = LayerOps::new(Layer::Background);
    layer.push(DrawOp::Image {
        id: "px".into(),
        src: Some(Rect::new(1.0, 0.0, 2.0, 1.0)),
        dst: Rect::new(0.0, 0.0, 4.0, 4.0),
        tint_white: false,
    });
    let f = render(&scene(4, 4, vec![layer]), &images);
    assert_eq!(f.pixel(3, 1), Some([0, 255, 0, 255]));
}

#[test]
fn missing_image_draws_nothing() {
    let mut layer = LayerOps::new(Layer::Cursor);
    layer.push(DrawOp::Image {
        id: "nope".into(),
        src: None,
        dst: Rect::new(0.0, 0.0, 4.0, 4.0),
        tint_white: false,
    });
    let f = render(&scene(4, 4, vec![layer]), &ImageSet::new());
    assert!(f.data.iter().all(|&b| b == 0));
}

#[test]
fn tinted_image_is_white() {
    let img = PreparedImage::from_premul(1, 1, vec![10, 20, 30, 255]).unwrap();
    let mut images = ImageSet::new();
    images.insert("logo", img);
    let mut layer = LayerOps::new(Layer::Product);
    layer.push(DrawOp::Image {
        id: "logo".into(),
        src: None,
        dst: Rect::new(0.0, 0.0, 2.0, 2.0),
        tint_white: true,
    });
    let f = render(&scene(2, 2, vec![layer]), &images);
    assert_eq!(f.pixel(0, 0), Some([255, 255, 255, 255]));
}

#[test]
fn gradient_ramp_follows_stops() {
    let stops = vec![
        GradientStop {
            offset: 0.0,
            color: Rgba8::opaque(0, 0, 0),
        },
        GradientStop {
            offset: 1.0,
            color: Rgba8::opaque(200, 100, 0),
        },
    ];
    let canvas = Canvas {
        width: 10,
        height: 1,
    };
    let px = linear_gradient_premul(canvas, Point::new(0.0, 0.0), Point::new(10.0, 0.0), &stops);
    assert_eq!(&px[0..4], &[10, 5, 0, 255]);
    assert_eq!(&px[36..40], &[190, 95, 0, 255]);
    assert_eq!(sample_stops(&stops, 2.0), stops[1].color);
    assert_eq!(sample_stops(&[], 0.5), Rgba8::TRANSPARENT);
}

#[test]
fn rendering_is_deterministic() {
    let mut layer = LayerOps::new(Layer::Overlay);
    layer.push(DrawOp::Shadow {
        rect: Rect::new(4.0, 4.0, 20.0, 12.0),
        radius: 4.0,
        blur: 6.0,
        offset: crate::foundation::core::Vec2::new(2.0, 3.0),
        color: Rgba8::new(0, 0, 0, 15),
    });
    layer.push(DrawOp::Fill {
        geometry: Geometry::rounded(Rect::new(4.0, 4.0, 20.0, 12.0), 4.0),
        paint: Paint::Solid(Rgba8::opaque(0x28, 0x2f, 0x38)),
    });
    layer.push(DrawOp::Stroke {
        geometry: Geometry::rounded(Rect::new(2.0, 2.0, 22.0, 14.0), 3.0),
        color: Rgba8::opaque(0x39, 0xd3, 0x53),
        width: 2.0,
    });
    let s = scene(24, 18, vec![layer]);
    let mut backend = CpuBackend::new();
    let mut ts = Typesetter::new();
    let a = backend.render_scene(&s, &ImageSet::new(), &mut ts).unwrap();
    let b = backend.render_scene(&s, &ImageSet::new(), &mut ts).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a, b);
    assert_eq!(a.pixel(12, 8).map(|p| p[3]), Some(255));
}
