//! The model list shared by both asset types.
//!
//! Rows run `other1, hero1, [hero2], [hero3], other2`. The first hero row is centred on the mask
//! midpoint for one hero; with two or three heroes the midpoint falls between hero1 and hero2.

use crate::assets::loader::ImageSet;
use crate::assets::resolve::provider_logo;
use crate::compose::scene::{DrawOp, Geometry, LayerOps};
use crate::foundation::core::{Point, Rect, Rgba8};
use crate::layout::table::{ListMetrics, LayoutVariant};
use crate::model::config::{AssetConfig, FocusedField, HeroCount, ModelConfig, ModelSlot};
use crate::text::typeset::{TextStyle, Typesetter};

pub const FOCUS_COLOR: Rgba8 = Rgba8::opaque(0x39, 0xd3, 0x53);
pub const FOCUS_STROKE_WIDTH: f64 = 2.0;
/// Logo opacity for non-hero rows.
pub const OTHER_LOGO_OPACITY: f64 = 0.4;
/// `rgba(139, 148, 158, 0.6)`.
pub const OTHER_TEXT_COLOR: Rgba8 = Rgba8::new(139, 148, 158, 153);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelRow<'a> {
    pub slot: ModelSlot,
    pub model: &'a ModelConfig,
    pub row_index: usize,
    /// Hero rows are selected; the bookending rows are not.
    pub selected: bool,
}

impl ModelRow<'_> {
    pub fn field(&self) -> FocusedField {
        self.slot.field()
    }
}

/// Exactly `2 + hero_count` rows in display order.
pub fn build_model_rows(config: &AssetConfig) -> Vec<ModelRow<'_>> {
    let heroes = [ModelSlot::Hero1, ModelSlot::Hero2, ModelSlot::Hero3];
    std::iter::once(ModelSlot::Other1)
        .chain(heroes.into_iter().take(config.hero_count.get()))
        .chain(std::iter::once(ModelSlot::Other2))
        .enumerate()
        .map(|(row_index, slot)| ModelRow {
            slot,
            model: config.model(slot),
            row_index,
            selected: slot.is_hero(),
        })
        .collect()
}

/// Row index placed at the mask's vertical midpoint.
pub fn center_row_index(hero_count: HeroCount) -> f64 {
    match hero_count {
        HeroCount::One => 1.0,
        HeroCount::Two | HeroCount::Three => 1.5,
    }
}

/// Clipping box of the list for an overlay whose top-left corner is at `overlay_origin`.
pub fn mask_rect(list: &ListMetrics, variant: &LayoutVariant, overlay_origin: Point) -> Rect {
    Rect::from_origin_size(
        (overlay_origin.x + list.mask_x, overlay_origin.y + variant.mask_y),
        (list.mask_width, variant.mask_height),
    )
}

/// Top edge of row `row_index`.
pub fn row_top(
    list: &ListMetrics,
    variant: &LayoutVariant,
    mask: Rect,
    hero_count: HeroCount,
    row_index: usize,
) -> f64 {
    let hero_row_top =
        mask.y0 + variant.mask_height / 2.0 + variant.list_offset_y - list.row_height / 2.0;
    hero_row_top + (row_index as f64 - center_row_index(hero_count)) * list.row_height
}

/// Record the clipped list into `out`.
#[allow(clippy::too_many_arguments)]
pub fn draw_model_list(
    out: &mut LayerOps,
    list: &ListMetrics,
    variant: &LayoutVariant,
    config: &AssetConfig,
    images: &ImageSet,
    focus: Option<FocusedField>,
    overlay_origin: Point,
    ts: &mut Typesetter,
) {
    let mask = mask_rect(list, variant, overlay_origin);
    let item_x = mask.x0 + list.padding_x;
    let rows = build_model_rows(config);

    out.with_clip(mask, |out| {
        for row in &rows {
            let top = row_top(list, variant, mask, config.hero_count, row.row_index);
            let logo_y = top + (list.row_height - list.logo_size) / 2.0;

            let logo = provider_logo(row.model.provider);
            if images.contains(&logo) {
                let opacity = if row.selected { 1.0 } else { OTHER_LOGO_OPACITY };
                out.with_opacity(opacity, |out| {
                    out.push(DrawOp::Image {
                        id: logo,
                        src: None,
                        dst: Rect::from_origin_size(
                            (item_x, logo_y),
                            (list.logo_size, list.logo_size),
                        ),
                        tint_white: false,
                    });
                });
            }

            let style = TextStyle::new(
                if row.selected {
                    list.hero_font
                } else {
                    list.other_font
                },
                list.font_size,
            );
            out.push(DrawOp::Text {
                text: row.model.name.clone(),
                style,
                color: if row.selected {
                    Rgba8::WHITE
                } else {
                    OTHER_TEXT_COLOR
                },
                origin: Point::new(
                    item_x + list.logo_size + list.logo_text_gap,
                    top + list.row_height / 2.0 + list.font_size * 0.35,
                ),
            });

            if focus == Some(row.field()) {
                let pad = list.highlight_padding;
                let text_w = ts.measure(&row.model.name, style);
                out.push(DrawOp::Stroke {
                    geometry: Geometry::rounded(
                        Rect::from_origin_size(
                            (item_x - pad, logo_y - pad),
                            (
                                list.logo_size + list.logo_text_gap + text_w + pad * 2.0,
                                list.logo_size + pad * 2.0,
                            ),
                        ),
                        list.highlight_radius,
                    ),
                    color: FOCUS_COLOR,
                    width: FOCUS_STROKE_WIDTH,
                });
            }
        }
    });
}

#[cfg(test)]
#[path = "../../tests/unit/compose/model_list.rs"]
mod tests;
