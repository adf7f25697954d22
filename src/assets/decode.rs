use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{PromoError, PromoResult};

/// SVG icons are rasterised at this multiple of their intrinsic size so they stay sharp when
/// drawn larger than authored.
pub const SVG_RASTER_SCALE: f32 = 4.0;

/// Decoded raster image in premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Intrinsic (layout) size. Differs from the pixel size for rasterised SVGs.
    pub natural_width: f64,
    pub natural_height: f64,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap premultiplied pixels whose natural size equals their pixel size.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> PromoResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if rgba8_premul.len() != expected {
            return Err(PromoError::validation(format!(
                "image buffer is {} bytes, expected {expected} for {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            natural_width: f64::from(width),
            natural_height: f64::from(height),
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }
}

/// Whether `id` names an SVG document.
pub fn is_svg_id(id: &str) -> bool {
    let path = id.split(['?', '#']).next().unwrap_or(id);
    path.to_ascii_lowercase().ends_with(".svg")
}

/// Decode bytes for `id`, choosing the SVG path by extension.
pub fn decode_asset(id: &str, bytes: &[u8]) -> PromoResult<PreparedImage> {
    if is_svg_id(id) {
        decode_svg(bytes, SVG_RASTER_SCALE)
    } else {
        decode_image(bytes)
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> PromoResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    PreparedImage::from_premul(width, height, rgba8_premul)
}

/// Parse and rasterise an SVG at `scale` times its intrinsic size.
pub fn decode_svg(bytes: &[u8], scale: f32) -> PromoResult<PreparedImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    let size = tree.size();
    if !size.width().is_finite() || size.width() <= 0.0 || !size.height().is_finite() {
        return Err(PromoError::evaluation("svg has invalid width/height"));
    }
    let w = ((size.width() * scale).ceil() as u32).max(1);
    let h = ((size.height() * scale).ceil() as u32).max(1);

    let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| PromoError::evaluation("failed to allocate svg pixmap"))?;
    let xform = resvg::tiny_skia::Transform::from_scale(
        (w as f32) / size.width(),
        (h as f32) / size.height(),
    );
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    let mut out = PreparedImage::from_premul(w, h, pixmap.data().to_vec())?;
    out.natural_width = f64::from(size.width());
    out.natural_height = f64::from(size.height());
    Ok(out)
}

/// Recolour every covered pixel to white, keeping coverage (canvas `source-atop` white fill).
pub fn tint_white(img: &PreparedImage) -> PreparedImage {
    let mut px = img.rgba8_premul.as_ref().clone();
    for p in px.chunks_exact_mut(4) {
        let a = p[3];
        p[0] = a;
        p[1] = a;
        p[2] = a;
    }
    PreparedImage {
        rgba8_premul: Arc::new(px),
        ..img.clone()
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
