use crate::animation::timeline::{FrameParams, Layer, LayerAnim};
use crate::assets::loader::ImageSet;
use crate::assets::resolve::{
    background_id, chevron_id, cursor_id, default_background_id, overlay_id, product_logo,
};
use crate::compose::model_list::{FOCUS_COLOR, FOCUS_STROKE_WIDTH, draw_model_list};
use crate::compose::scene::{DrawOp, Geometry, GradientStop, LayerOps, Paint, Scene};
use crate::foundation::core::{Canvas, Point, Rect, Rgba8, Vec2};
use crate::foundation::error::{PromoError, PromoResult};
use crate::layout::table::{
    AssetDescriptor, CursorAnchor, LayoutVariant, OverlayPlacement, descriptor, layout,
};
use crate::model::config::{AssetConfig, AssetKind, Background, FocusedField};
use crate::text::typeset::{FontRole, TextStyle, Typesetter};
use crate::text::wrap::wrap_headline;

/// Page colour behind animated frames.
pub const FRAME_FILL: Rgba8 = Rgba8::opaque(0x0d, 0x11, 0x17);

const GRADIENT_STOPS: [GradientStop; 3] = [
    GradientStop {
        offset: 0.0,
        color: Rgba8::opaque(0x0d, 0x11, 0x17),
    },
    GradientStop {
        offset: 0.5,
        color: Rgba8::opaque(0x0a, 0x1f, 0x1a),
    },
    GradientStop {
        offset: 1.0,
        color: Rgba8::opaque(0x0d, 0x11, 0x17),
    },
];

const MARGIN: f64 = 120.0;

const PRODUCT_LOGO_SIZE: f64 = 84.0;
const PRODUCT_GAP: f64 = 20.0;
const PRODUCT_FONT_SIZE: f64 = 84.0;
/// Clean region of the default social background, copied over its baked-in corner mark.
const PATCH_SRC: Rect = Rect::new(0.0, 280.0, 860.0, 560.0);
const PATCH_DST: Rect = Rect::new(0.0, 0.0, 860.0, 280.0);

const BADGE_FONT_SIZE: f64 = 52.0;
const BADGE_PADDING_X: f64 = 60.0;
const BADGE_HEIGHT: f64 = 141.0;
const BADGE_BORDER_WIDTH: f64 = 3.0;
const BADGE_BORDER_ALPHA: u8 = 0x55;
const BADGE_TO_TEXT_GAP: f64 = 40.0;

const COPY_FONT_SIZE: f64 = 118.0;
const COPY_LINE_HEIGHT: f64 = COPY_FONT_SIZE;
const COPY_HIGHLIGHT_PADDING: f64 = 20.0;
const COPY_HIGHLIGHT_RADIUS: f64 = 12.0;

const DROPDOWN_FILL: Rgba8 = Rgba8::opaque(0x28, 0x2f, 0x38);
/// `rgba(0, 0, 0, 0.06)`.
const DROPDOWN_SHADOW: Rgba8 = Rgba8::new(0, 0, 0, 15);

/// Baseline offset below a box's vertical centre, as a fraction of font size.
const CENTER_BASELINE: f64 = 0.35;

fn copy_style() -> TextStyle {
    TextStyle::new(FontRole::Display, COPY_FONT_SIZE)
        .with_letter_spacing(-0.03 * COPY_FONT_SIZE + 2.0)
}

/// Builds the layered scene of one asset type for one design.
///
/// Layer builders only read their inputs, so the same inputs always yield the same scene.
pub struct Compositor<'a> {
    desc: &'static AssetDescriptor,
    variant: &'static LayoutVariant,
    config: &'a AssetConfig,
    images: &'a ImageSet,
    focus: Option<FocusedField>,
}

impl<'a> Compositor<'a> {
    pub fn new(
        kind: AssetKind,
        config: &'a AssetConfig,
        images: &'a ImageSet,
        focus: Option<FocusedField>,
    ) -> Self {
        Self {
            desc: descriptor(kind),
            variant: layout(kind, config.hero_count),
            config,
            images,
            focus,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.desc.canvas(self.config.hero_count)
    }

    /// Layers present for this asset type, bottom to top.
    pub fn layers(&self) -> Vec<Layer> {
        Layer::ORDER
            .into_iter()
            .filter(|l| self.desc.has_copy_layers || !matches!(l, Layer::Product | Layer::Headline))
            .collect()
    }

    /// All layers at rest over a transparent surface.
    pub fn static_scene(&self, ts: &mut Typesetter) -> Scene {
        self.scene(None, &FrameParams::STATIC, |_| true, ts)
    }

    /// The animated frame at `t` seconds: page fill, then each layer once its window opens.
    pub fn frame_scene(&self, t: f64, params: &FrameParams, ts: &mut Typesetter) -> Scene {
        self.scene(Some(FRAME_FILL), params, |l| l.is_drawn_at(t), ts)
    }

    fn scene(
        &self,
        clear: Option<Rgba8>,
        params: &FrameParams,
        drawn: impl Fn(Layer) -> bool,
        ts: &mut Typesetter,
    ) -> Scene {
        let mut layers = Vec::new();
        for layer in self.layers() {
            if !drawn(layer) {
                continue;
            }
            match self.layer(layer, params.layer(layer), ts) {
                Ok(ops) => layers.push(ops),
                Err(e) => {
                    tracing::warn!(layer = layer.name(), error = %e, "layer skipped");
                }
            }
        }
        Scene {
            canvas: self.canvas(),
            clear,
            layers,
        }
    }

    /// Record a single layer.
    pub fn layer(
        &self,
        layer: Layer,
        anim: LayerAnim,
        ts: &mut Typesetter,
    ) -> PromoResult<LayerOps> {
        if !(anim.opacity.is_finite() && anim.offset_x.is_finite() && anim.offset_y.is_finite()) {
            return Err(PromoError::evaluation(format!(
                "non-finite animation parameters for layer '{}'",
                layer.name()
            )));
        }
        let mut out = LayerOps::new(layer);
        match layer {
            Layer::Background => self.background(&mut out, anim),
            Layer::Product => self.product_badge(&mut out, anim),
            Layer::Headline => self.badge_and_headline(&mut out, anim, ts),
            Layer::Overlay => self.model_overlay(&mut out, anim, ts),
            Layer::Cursor => self.cursor(&mut out, anim),
        }
        Ok(out)
    }

    fn full_rect(&self) -> Rect {
        let c = self.canvas();
        Rect::new(0.0, 0.0, f64::from(c.width), f64::from(c.height))
    }

    fn background(&self, out: &mut LayerOps, anim: LayerAnim) {
        let id = background_id(self.desc.kind, &self.config.background);
        let full = self.full_rect();
        out.with_opacity(anim.opacity, |out| {
            if self.images.contains(&id) {
                out.push(DrawOp::Image {
                    id,
                    src: None,
                    dst: full,
                    tint_white: false,
                });
            } else {
                out.push(DrawOp::Fill {
                    geometry: Geometry::Rect(full),
                    paint: Paint::Linear {
                        start: Point::new(0.0, 0.0),
                        end: Point::new(full.x1, full.y1),
                        stops: GRADIENT_STOPS.to_vec(),
                    },
                });
            }
        });
    }

    fn product_badge(&self, out: &mut LayerOps, anim: LayerAnim) {
        let default_bg = default_background_id(self.desc.kind);
        let (ox, oy) = (anim.offset_x, anim.offset_y);
        let product = self.config.product;
        let logo = product_logo(product);
        let label_style = TextStyle::new(FontRole::Display, PRODUCT_FONT_SIZE);

        out.with_opacity(anim.opacity, |out| {
            if matches!(self.config.background, Background::Default)
                && self.images.contains(&default_bg)
            {
                out.push(DrawOp::Image {
                    id: default_bg,
                    src: Some(PATCH_SRC),
                    dst: PATCH_DST,
                    tint_white: false,
                });
            }
            if self.images.contains(&logo) {
                out.push(DrawOp::Image {
                    id: logo,
                    src: None,
                    dst: Rect::from_origin_size(
                        (MARGIN + ox, MARGIN + oy),
                        (PRODUCT_LOGO_SIZE, PRODUCT_LOGO_SIZE),
                    ),
                    tint_white: product.tint_white(),
                });
            }
            out.push(DrawOp::Text {
                text: product.label().to_string(),
                style: label_style,
                color: Rgba8::WHITE,
                origin: Point::new(
                    MARGIN + PRODUCT_LOGO_SIZE + PRODUCT_GAP + ox,
                    MARGIN + PRODUCT_LOGO_SIZE / 2.0 + PRODUCT_FONT_SIZE * CENTER_BASELINE + oy,
                ),
            });
        });
    }

    fn badge_and_headline(&self, out: &mut LayerOps, anim: LayerAnim, ts: &mut Typesetter) {
        let (ox, oy) = (anim.offset_x, anim.offset_y);
        let height = f64::from(self.canvas().height);
        let badge = self.config.badge;
        let badge_style = TextStyle::new(FontRole::Mono, BADGE_FONT_SIZE);
        let badge_text_w = ts.measure(badge.label(), badge_style);
        let badge_w = BADGE_PADDING_X * 2.0 + badge_text_w;

        let lines = wrap_headline(&self.config.social_copy);
        let block_h = lines.len() as f64 * COPY_LINE_HEIGHT;
        let content_top = height - MARGIN - block_h + oy;
        let badge_x = MARGIN + ox;
        let badge_y = content_top - BADGE_TO_TEXT_GAP - BADGE_HEIGHT;

        let style = copy_style();
        let highlight_w = if self.focus == Some(FocusedField::SocialCopy) && !lines.is_empty() {
            Some(
                lines
                    .iter()
                    .map(|l| ts.measure(l, style))
                    .fold(0.0_f64, f64::max),
            )
        } else {
            None
        };

        out.with_opacity(anim.opacity, |out| {
            out.push(DrawOp::Stroke {
                geometry: Geometry::rounded(
                    Rect::from_origin_size((badge_x, badge_y), (badge_w, BADGE_HEIGHT)),
                    BADGE_HEIGHT / 2.0,
                ),
                color: badge.color().with_alpha(BADGE_BORDER_ALPHA),
                width: BADGE_BORDER_WIDTH,
            });
            out.push(DrawOp::Text {
                text: badge.label().to_string(),
                style: badge_style,
                color: badge.color(),
                origin: Point::new(
                    badge_x + (badge_w - badge_text_w) / 2.0,
                    badge_y + BADGE_HEIGHT / 2.0 + BADGE_FONT_SIZE * CENTER_BASELINE,
                ),
            });

            for (i, line) in lines.iter().enumerate() {
                out.push(DrawOp::Text {
                    text: line.clone(),
                    style,
                    color: Rgba8::WHITE,
                    origin: Point::new(
                        MARGIN + ox,
                        content_top + i as f64 * COPY_LINE_HEIGHT + COPY_FONT_SIZE * 0.85,
                    ),
                });
            }

            if let Some(max_w) = highlight_w {
                let pad = COPY_HIGHLIGHT_PADDING;
                out.push(DrawOp::Stroke {
                    geometry: Geometry::rounded(
                        Rect::from_origin_size(
                            (MARGIN + ox - pad, content_top - pad),
                            (max_w + pad * 2.0, block_h + pad * 2.0),
                        ),
                        COPY_HIGHLIGHT_RADIUS,
                    ),
                    color: FOCUS_COLOR,
                    width: FOCUS_STROKE_WIDTH,
                });
            }
        });
    }

    /// Overlay top-left corner at rest (before the layer's animation offset).
    fn overlay_origin(&self, w: f64, h: f64) -> Point {
        let c = self.canvas();
        let (cw, ch) = (f64::from(c.width), f64::from(c.height));
        match self.desc.overlay_placement {
            OverlayPlacement::RightPinned => Point::new(cw - w, (ch - h) / 2.0),
            OverlayPlacement::Centered => Point::new((cw - w) / 2.0, (ch - h) / 2.0),
        }
    }

    fn model_overlay(&self, out: &mut LayerOps, anim: LayerAnim, ts: &mut Typesetter) {
        let id = overlay_id(self.desc.kind, self.config.hero_count);
        let Some(overlay) = self.images.get(&id) else {
            return;
        };
        let (ow, oh) = (overlay.natural_width, overlay.natural_height);
        let origin = self.overlay_origin(ow, oh) + Vec2::new(anim.offset_x, anim.offset_y);

        let dd = &self.desc.dropdown;
        let hero_name = &self.config.hero_models[0].name;
        let dd_style = TextStyle::new(FontRole::UiMedium, dd.font_size);
        let text_w = ts.measure(hero_name, dd_style);
        let btn_w = dd.padding_left + text_w + dd.gap + dd.chevron_size + dd.padding_right;
        let btn_h = dd.padding_y * 2.0 + dd.font_size;
        let btn = Rect::from_origin_size(
            (origin.x + ow - btn_w - dd.right_inset, origin.y + dd.top),
            (btn_w, btn_h),
        );
        let text_origin = Point::new(
            btn.x0 + dd.padding_left,
            btn.y0 + btn_h / 2.0 + dd.font_size * CENTER_BASELINE,
        );
        let chevron = chevron_id();

        out.with_opacity(anim.opacity, |out| {
            out.push(DrawOp::Image {
                id,
                src: None,
                dst: Rect::from_origin_size(origin, (ow, oh)),
                tint_white: false,
            });

            out.push(DrawOp::Shadow {
                rect: btn,
                radius: dd.radius,
                blur: dd.shadow_blur,
                offset: Vec2::new(dd.shadow_offset.0, dd.shadow_offset.1),
                color: DROPDOWN_SHADOW,
            });
            out.push(DrawOp::Fill {
                geometry: Geometry::rounded(btn, dd.radius),
                paint: Paint::Solid(DROPDOWN_FILL),
            });
            out.push(DrawOp::Text {
                text: hero_name.clone(),
                style: dd_style,
                color: Rgba8::WHITE,
                origin: text_origin,
            });
            if self.images.contains(&chevron) {
                out.push(DrawOp::Image {
                    id: chevron,
                    src: None,
                    dst: Rect::from_origin_size(
                        (
                            text_origin.x + text_w + dd.gap,
                            btn.y0 + (btn_h - dd.chevron_size) / 2.0,
                        ),
                        (dd.chevron_size, dd.chevron_size),
                    ),
                    tint_white: false,
                });
            }

            draw_model_list(
                out,
                &self.desc.list,
                self.variant,
                self.config,
                self.images,
                self.focus,
                origin,
                ts,
            );
        });
    }

    fn cursor(&self, out: &mut LayerOps, anim: LayerAnim) {
        let id = cursor_id();
        let Some(cursor) = self.images.get(&id) else {
            return;
        };
        let v = self.variant;
        let anchor = match self.desc.cursor_anchor {
            CursorAnchor::Canvas => Point::new(v.cursor_x, v.cursor_y),
            CursorAnchor::OverlayRightEdge => {
                let Some(overlay) = self
                    .images
                    .get(&overlay_id(self.desc.kind, self.config.hero_count))
                else {
                    return;
                };
                let origin = self.overlay_origin(overlay.natural_width, overlay.natural_height);
                Point::new(
                    origin.x + overlay.natural_width + v.cursor_x,
                    origin.y + v.cursor_y,
                )
            }
        };
        out.with_opacity(anim.opacity, |out| {
            out.push(DrawOp::Image {
                id,
                src: None,
                dst: Rect::from_origin_size(
                    (anchor.x + anim.offset_x, anchor.y + anim.offset_y),
                    (
                        cursor.natural_width * v.cursor_scale,
                        cursor.natural_height * v.cursor_scale,
                    ),
                ),
                tint_white: false,
            });
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layers.rs"]
mod tests;
