use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::decode::{PreparedImage, tint_white};
use crate::assets::loader::ImageSet;
use crate::compose::scene::{DrawOp, Geometry, GradientStop, Paint, Scene};
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, RoundedRect};
use crate::foundation::error::{PromoError, PromoResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::shadow::shadow_mask;
use crate::text::typeset::Typesetter;

/// Path flattening tolerance for rounded shapes, in pixels.
const PATH_TOLERANCE: f64 = 0.1;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ImageKey {
    id: String,
    /// Identity of the pixel buffer, so a replaced image never hits a stale paint.
    pixels: usize,
    tint_white: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    width: u32,
    height: u32,
    line: [u64; 4],
    stops: Vec<(u64, Rgba8)>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ShadowKey {
    size: [u64; 2],
    radius: u64,
    blur: u64,
    color: Rgba8,
}

/// CPU raster backend powered by `vello_cpu`.
///
/// Decoded images, gradient ramps and shadow bitmaps are turned into paints once and cached for
/// the life of the backend.
#[derive(Default)]
pub struct CpuBackend {
    image_cache: HashMap<ImageKey, vello_cpu::Image>,
    gradient_cache: HashMap<GradientKey, vello_cpu::Image>,
    shadow_cache: HashMap<ShadowKey, (vello_cpu::Image, f64)>,
}

impl CpuBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for CpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuBackend")
            .field("images", &self.image_cache.len())
            .field("gradients", &self.gradient_cache.len())
            .field("shadows", &self.shadow_cache.len())
            .finish()
    }
}

impl RenderBackend for CpuBackend {
    fn render_scene(
        &mut self,
        scene: &Scene,
        images: &ImageSet,
        ts: &mut Typesetter,
    ) -> PromoResult<FrameRGBA> {
        let (w, h) = surface_size(scene.canvas)?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);

        if let Some(clear) = scene.clear {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(color_to_cpu(clear));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(w), f64::from(h)));
        }

        for layer in &scene.layers {
            let mut depth = 0usize;
            for op in &layer.ops {
                if let Err(e) = self.draw_op(&mut ctx, op, scene.canvas, images, ts, &mut depth) {
                    tracing::warn!(
                        layer = layer.layer.name(),
                        error = %e,
                        "layer draw failed, remaining ops skipped"
                    );
                    break;
                }
            }
            for _ in 0..depth {
                ctx.pop_layer();
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: scene.canvas.width,
            height: scene.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

impl CpuBackend {
    fn draw_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        op: &DrawOp,
        canvas: Canvas,
        images: &ImageSet,
        ts: &mut Typesetter,
        depth: &mut usize,
    ) -> PromoResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match op {
            DrawOp::Fill { geometry, paint } => {
                match paint {
                    Paint::Solid(c) => ctx.set_paint(color_to_cpu(*c)),
                    Paint::Linear { start, end, stops } => {
                        let ramp = self.gradient_paint_for(canvas, *start, *end, stops)?;
                        ctx.set_paint(ramp);
                    }
                }
                match geometry {
                    Geometry::Rect(r) => ctx.fill_rect(&rect_to_cpu(*r)),
                    Geometry::RoundedRect { .. } => ctx.fill_path(&geometry_path(geometry)),
                }
            }
            DrawOp::Stroke {
                geometry,
                color,
                width,
            } => {
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
                ctx.set_paint(color_to_cpu(*color));
                ctx.stroke_path(&geometry_path(geometry));
            }
            DrawOp::Shadow {
                rect,
                radius,
                blur,
                offset,
                color,
            } => {
                let (paint, pad) = self.shadow_paint_for(*rect, *radius, *blur, *color)?;
                let (pw, ph) = image_paint_size(&paint)?;
                let origin = rect.origin() + *offset;
                ctx.set_transform(affine_to_cpu(Affine::translate((
                    origin.x - pad,
                    origin.y - pad,
                ))));
                ctx.set_paint(paint);
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, pw, ph));
            }
            DrawOp::Image {
                id,
                src,
                dst,
                tint_white,
            } => {
                let Some(img) = images.get(id) else {
                    return Ok(());
                };
                let paint = self.image_paint_for(id, img, *tint_white)?;
                let src_px = source_rect_px(img, *src);
                if src_px.width() <= 0.0
                    || src_px.height() <= 0.0
                    || dst.width() <= 0.0
                    || dst.height() <= 0.0
                {
                    return Ok(());
                }
                let t = Affine::translate(dst.origin().to_vec2())
                    * Affine::scale_non_uniform(
                        dst.width() / src_px.width(),
                        dst.height() / src_px.height(),
                    )
                    * Affine::translate(-src_px.origin().to_vec2());
                ctx.set_transform(affine_to_cpu(t));
                ctx.set_paint(paint);
                ctx.fill_rect(&rect_to_cpu(src_px));
            }
            DrawOp::Text {
                text,
                style,
                color,
                origin,
            } => {
                let Some(line) = ts.shape(text, *style) else {
                    tracing::trace!(role = style.role.name(), "no font for role, text skipped");
                    return Ok(());
                };
                let font = ts
                    .font_data(style.role)
                    .cloned()
                    .ok_or_else(|| PromoError::evaluation("shaped text without font data"))?;
                ctx.set_transform(affine_to_cpu(Affine::translate(origin.to_vec2())));
                ctx.set_paint(color_to_cpu(*color));
                let glyphs = line.glyphs.iter().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(line.size)
                    .fill_glyphs(glyphs);
            }
            DrawOp::PushOpacity(o) => {
                ctx.push_opacity_layer(o.clamp(0.0, 1.0) as f32);
                *depth += 1;
            }
            DrawOp::PushClip(r) => {
                ctx.push_clip_layer(&geometry_path(&Geometry::Rect(*r)));
                *depth += 1;
            }
            DrawOp::Pop => {
                *depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| PromoError::evaluation("pop without matching push"))?;
                ctx.pop_layer();
            }
        }
        Ok(())
    }

    fn image_paint_for(
        &mut self,
        id: &str,
        img: &PreparedImage,
        tint: bool,
    ) -> PromoResult<vello_cpu::Image> {
        let key = ImageKey {
            id: id.to_string(),
            pixels: Arc::as_ptr(&img.rgba8_premul) as usize,
            tint_white: tint,
        };
        if let Some(paint) = self.image_cache.get(&key) {
            return Ok(paint.clone());
        }

        let paint = if tint {
            let white = tint_white(img);
            image_paint(&white.rgba8_premul, white.width, white.height)?
        } else {
            image_paint(&img.rgba8_premul, img.width, img.height)?
        };
        self.image_cache.insert(key, paint.clone());
        Ok(paint)
    }

    fn gradient_paint_for(
        &mut self,
        canvas: Canvas,
        start: Point,
        end: Point,
        stops: &[GradientStop],
    ) -> PromoResult<vello_cpu::Image> {
        let key = GradientKey {
            width: canvas.width,
            height: canvas.height,
            line: [
                start.x.to_bits(),
                start.y.to_bits(),
                end.x.to_bits(),
                end.y.to_bits(),
            ],
            stops: stops.iter().map(|s| (s.offset.to_bits(), s.color)).collect(),
        };
        if let Some(paint) = self.gradient_cache.get(&key) {
            return Ok(paint.clone());
        }

        let bytes = linear_gradient_premul(canvas, start, end, stops);
        let paint = image_paint(&bytes, canvas.width, canvas.height)?;
        self.gradient_cache.insert(key, paint.clone());
        Ok(paint)
    }

    fn shadow_paint_for(
        &mut self,
        rect: Rect,
        radius: f64,
        blur: f64,
        color: Rgba8,
    ) -> PromoResult<(vello_cpu::Image, f64)> {
        let key = ShadowKey {
            size: [rect.width().to_bits(), rect.height().to_bits()],
            radius: radius.to_bits(),
            blur: blur.to_bits(),
            color,
        };
        if let Some(hit) = self.shadow_cache.get(&key) {
            return Ok(hit.clone());
        }

        let mask = shadow_mask(rect.width(), rect.height(), radius, blur, color)?;
        let paint = image_paint(&mask.rgba8_premul, mask.width, mask.height)?;
        let entry = (paint, f64::from(mask.pad));
        self.shadow_cache.insert(key, entry.clone());
        Ok(entry)
    }
}

fn surface_size(canvas: Canvas) -> PromoResult<(u16, u16)> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(PromoError::surface(format!(
            "cannot allocate a {}x{} surface",
            canvas.width, canvas.height
        )));
    }
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| PromoError::surface("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| PromoError::surface("surface height exceeds u16"))?;
    Ok((w, h))
}

/// `src` in image pixels. SVG images are rasterised above their natural size.
fn source_rect_px(img: &PreparedImage, src: Option<Rect>) -> Rect {
    let full = Rect::new(0.0, 0.0, f64::from(img.width), f64::from(img.height));
    let Some(src) = src else {
        return full;
    };
    let sx = if img.natural_width > 0.0 {
        f64::from(img.width) / img.natural_width
    } else {
        1.0
    };
    let sy = if img.natural_height > 0.0 {
        f64::from(img.height) / img.natural_height
    } else {
        1.0
    };
    Rect::new(src.x0 * sx, src.y0 * sy, src.x1 * sx, src.y1 * sy).intersect(full)
}

/// Premultiplied pixels of a linear gradient across the whole canvas, padded past both ends.
pub(crate) fn linear_gradient_premul(
    canvas: Canvas,
    start: Point,
    end: Point,
    stops: &[GradientStop],
) -> Vec<u8> {
    let (w, h) = (canvas.width as usize, canvas.height as usize);
    let d = end - start;
    let len2 = d.hypot2();
    let mut out = vec![0u8; w * h * 4];
    for y in 0..h {
        for x in 0..w {
            let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            let t = if len2 > 0.0 {
                ((p - start).dot(d) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let i = (y * w + x) * 4;
            out[i..i + 4].copy_from_slice(&sample_stops(stops, t).to_premul());
        }
    }
    out
}

fn sample_stops(stops: &[GradientStop], t: f64) -> Rgba8 {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Rgba8::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let u = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
            let lerp = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * u).round() as u8;
            return Rgba8::new(
                lerp(a.color.r, b.color.r),
                lerp(a.color.g, b.color.g),
                lerp(a.color.b, b.color.b),
                lerp(a.color.a, b.color.a),
            );
        }
    }
    last.color
}

fn geometry_path(geometry: &Geometry) -> vello_cpu::kurbo::BezPath {
    use kurbo::Shape as _;

    let path: BezPath = match *geometry {
        Geometry::Rect(r) => r.to_path(PATH_TOLERANCE),
        Geometry::RoundedRect { rect, radius } => {
            RoundedRect::from_rect(rect, radius).to_path(PATH_TOLERANCE)
        }
    };
    bezpath_to_cpu(&path)
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_paint(rgba8_premul: &[u8], width: u32, height: u32) -> PromoResult<vello_cpu::Image> {
    let pixmap = premul_bytes_to_pixmap(rgba8_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> PromoResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PromoError::evaluation("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PromoError::evaluation("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(PromoError::evaluation("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn image_paint_size(image: &vello_cpu::Image) -> PromoResult<(f64, f64)> {
    match &image.image {
        vello_cpu::ImageSource::Pixmap(p) => Ok((f64::from(p.width()), f64::from(p.height()))),
        vello_cpu::ImageSource::OpaqueId(_) => Err(PromoError::evaluation(
            "cpu backend does not support opaque image ids",
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
