use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

#[test]
fn png_decodes_premultiplied() {
    let img = decode_image(&png_bytes(3, 2, [200, 100, 50, 128])).unwrap();
    assert_eq!((img.width, img.height), (3, 2));
    assert_eq!(img.natural_width, 3.0);
    assert_eq!(&img.rgba8_premul[0..4], &[100, 50, 25, 128]);
}

#[test]
fn garbage_bytes_fail() {
    assert!(decode_image(b"not an image").is_err());
    assert!(decode_asset("icons/x.svg", b"<nope").is_err());
}

#[test]
fn svg_rasterises_at_scale_with_natural_size() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="6">
        <rect width="10" height="6" fill="#ffffff"/></svg>"##;
    let img = decode_asset("icons/dropdown-chevron.svg", svg).unwrap();
    assert_eq!((img.width, img.height), (40, 24));
    assert_eq!((img.natural_width, img.natural_height), (10.0, 6.0));
    assert_eq!(&img.rgba8_premul[0..4], &[255, 255, 255, 255]);
}

#[test]
fn svg_detection_ignores_query() {
    assert!(is_svg_id("icons/a.SVG"));
    assert!(is_svg_id("https://x.test/a.svg?v=2"));
    assert!(!is_svg_id("logos/a.png"));
}

#[test]
fn tint_keeps_coverage() {
    let img = PreparedImage::from_premul(2, 1, vec![10, 20, 30, 40, 0, 0, 0, 0]).unwrap();
    let t = tint_white(&img);
    assert_eq!(t.rgba8_premul.as_slice(), &[40, 40, 40, 40, 0, 0, 0, 0]);
    assert!(PreparedImage::from_premul(2, 2, vec![0; 4]).is_err());
}

#[test]
fn equality_includes_natural_size() {
    let a = PreparedImage::from_premul(2, 2, vec![255; 16]).unwrap();
    assert_eq!(a.clone(), a);
    let scaled = PreparedImage {
        natural_width: 0.5,
        natural_height: 0.5,
        ..a.clone()
    };
    assert_ne!(scaled, a);
}
