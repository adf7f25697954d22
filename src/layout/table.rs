//! Fixed geometry for each asset type and hero-count variant.
//!
//! Every literal here is a tuned design constant. They are looked up, never derived: the per-row
//! deltas between variants are not uniform and must stay exactly as listed.

use crate::foundation::core::Canvas;
use crate::model::config::{AssetKind, HeroCount};
use crate::text::typeset::FontRole;

/// Per-variant geometry, keyed by asset type and hero count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutVariant {
    pub canvas_height: u32,
    /// Overlay file name under `overlays/`.
    pub overlay: &'static str,
    /// Mask top, relative to the overlay's top edge.
    pub mask_y: f64,
    pub mask_height: f64,
    pub list_offset_y: f64,
    /// Cursor anchor; see [`CursorAnchor`] for the reference point.
    pub cursor_x: f64,
    pub cursor_y: f64,
    pub cursor_scale: f64,
}

const SOCIAL_1: LayoutVariant = LayoutVariant {
    canvas_height: 1260,
    overlay: "SocialBox.png",
    mask_y: 320.0,
    mask_height: 369.0,
    list_offset_y: 0.0,
    cursor_x: 2150.0,
    cursor_y: 780.0,
    cursor_scale: 0.8,
};

const SOCIAL_2: LayoutVariant = LayoutVariant {
    canvas_height: 1260,
    overlay: "SocialBox_2.png",
    mask_y: 308.0,
    mask_height: 515.0,
    list_offset_y: 0.0,
    cursor_x: 2150.0,
    cursor_y: 710.0,
    cursor_scale: 0.8,
};

const SOCIAL_3: LayoutVariant = LayoutVariant {
    canvas_height: 1260,
    overlay: "SocialBox_3.png",
    mask_y: 320.0,
    mask_height: 717.0,
    list_offset_y: 0.0,
    cursor_x: 2150.0,
    cursor_y: 980.0,
    cursor_scale: 0.8,
};

const HEADER_1: LayoutVariant = LayoutVariant {
    canvas_height: 600,
    overlay: "HeaderBox.png",
    mask_y: 209.0,
    mask_height: 217.0,
    list_offset_y: 0.0,
    cursor_x: -450.0,
    cursor_y: 320.0,
    cursor_scale: 0.5,
};

const HEADER_2: LayoutVariant = LayoutVariant {
    canvas_height: 713,
    overlay: "HeaderBox_2.png",
    mask_y: 209.0,
    mask_height: 330.0,
    list_offset_y: 0.0,
    cursor_x: -450.0,
    cursor_y: 380.0,
    cursor_scale: 0.5,
};

const HEADER_3: LayoutVariant = LayoutVariant {
    canvas_height: 826,
    overlay: "HeaderBox_3.png",
    mask_y: 209.0,
    mask_height: 443.0,
    list_offset_y: 0.0,
    cursor_x: -450.0,
    cursor_y: 440.0,
    cursor_scale: 0.5,
};

/// Look up the layout for one asset type and hero count.
pub fn layout(kind: AssetKind, hero_count: HeroCount) -> &'static LayoutVariant {
    match (kind, hero_count) {
        (AssetKind::Social, HeroCount::One) => &SOCIAL_1,
        (AssetKind::Social, HeroCount::Two) => &SOCIAL_2,
        (AssetKind::Social, HeroCount::Three) => &SOCIAL_3,
        (AssetKind::Header, HeroCount::One) => &HEADER_1,
        (AssetKind::Header, HeroCount::Two) => &HEADER_2,
        (AssetKind::Header, HeroCount::Three) => &HEADER_3,
    }
}

/// Where the overlay panel sits on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayPlacement {
    /// Right edge flush with the canvas, vertically centred.
    RightPinned,
    /// Centred on both axes.
    Centered,
}

/// Reference point for [`LayoutVariant::cursor_x`] / [`LayoutVariant::cursor_y`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorAnchor {
    /// Absolute canvas coordinates.
    Canvas,
    /// `x` from the overlay's right edge, `y` from the overlay's top edge.
    OverlayRightEdge,
}

/// Model list metrics shared by all variants of one asset type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ListMetrics {
    /// Mask left edge, relative to the overlay's left edge.
    pub mask_x: f64,
    pub mask_width: f64,
    pub logo_size: f64,
    pub logo_text_gap: f64,
    pub row_height: f64,
    pub font_size: f64,
    pub padding_x: f64,
    pub highlight_padding: f64,
    pub highlight_radius: f64,
    pub hero_font: FontRole,
    pub other_font: FontRole,
}

/// Dropdown button metrics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropdownMetrics {
    pub padding_left: f64,
    pub padding_right: f64,
    pub padding_y: f64,
    pub font_size: f64,
    pub radius: f64,
    pub gap: f64,
    pub chevron_size: f64,
    /// Distance between the button's right edge and the overlay's right edge.
    pub right_inset: f64,
    /// Distance from the overlay's top edge.
    pub top: f64,
    pub shadow_blur: f64,
    pub shadow_offset: (f64, f64),
}

/// Everything that distinguishes one asset type from the other.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AssetDescriptor {
    pub kind: AssetKind,
    pub width: u32,
    /// Default background file name under `backgrounds/`.
    pub default_background: &'static str,
    pub overlay_placement: OverlayPlacement,
    pub cursor_anchor: CursorAnchor,
    /// Whether the product badge and badge/headline layers exist.
    pub has_copy_layers: bool,
    pub list: ListMetrics,
    pub dropdown: DropdownMetrics,
}

impl AssetDescriptor {
    pub fn canvas(&self, hero_count: HeroCount) -> Canvas {
        Canvas {
            width: self.width,
            height: layout(self.kind, hero_count).canvas_height,
        }
    }
}

const SOCIAL: AssetDescriptor = AssetDescriptor {
    kind: AssetKind::Social,
    width: 2400,
    default_background: "Social_Background.jpg",
    overlay_placement: OverlayPlacement::RightPinned,
    cursor_anchor: CursorAnchor::Canvas,
    has_copy_layers: true,
    list: ListMetrics {
        mask_x: 159.0,
        mask_width: 1244.0,
        logo_size: 109.0,
        logo_text_gap: 44.0,
        row_height: 174.0,
        font_size: 72.0,
        padding_x: 60.0,
        highlight_padding: 16.0,
        highlight_radius: 12.0,
        hero_font: FontRole::UiMedium,
        other_font: FontRole::Ui,
    },
    dropdown: DropdownMetrics {
        padding_left: 48.0,
        padding_right: 32.0,
        padding_y: 26.0,
        font_size: 65.0,
        radius: 24.0,
        gap: 16.0,
        chevron_size: 40.0,
        right_inset: 30.0,
        top: 110.0,
        shadow_blur: 8.0,
        shadow_offset: (8.0, 9.0),
    },
};

const HEADER: AssetDescriptor = AssetDescriptor {
    kind: AssetKind::Header,
    width: 2064,
    default_background: "Header_Background.png",
    overlay_placement: OverlayPlacement::Centered,
    cursor_anchor: CursorAnchor::OverlayRightEdge,
    has_copy_layers: false,
    list: ListMetrics {
        mask_x: 546.0,
        mask_width: 800.0,
        logo_size: 70.0,
        logo_text_gap: 28.0,
        row_height: 112.0,
        font_size: 49.0,
        padding_x: 27.0,
        highlight_padding: 10.0,
        highlight_radius: 8.0,
        hero_font: FontRole::Ui,
        other_font: FontRole::Ui,
    },
    dropdown: DropdownMetrics {
        padding_left: 37.0,
        padding_right: 25.0,
        padding_y: 22.0,
        font_size: 55.0,
        radius: 18.0,
        gap: 20.0,
        chevron_size: 50.0,
        right_inset: 258.0,
        top: 90.0,
        shadow_blur: 6.0,
        shadow_offset: (6.0, 7.0),
    },
};

pub fn descriptor(kind: AssetKind) -> &'static AssetDescriptor {
    match kind {
        AssetKind::Social => &SOCIAL,
        AssetKind::Header => &HEADER,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/table.rs"]
mod tests;
