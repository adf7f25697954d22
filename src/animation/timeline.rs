//! Time → per-layer animation parameters.
//!
//! Four layers enter in fixed, non-overlapping windows; the background is always fully shown.
//! The sequence holds on the final state until [`TOTAL_DURATION`].

use crate::animation::ease::ease_out_cubic;
use crate::foundation::core::Fps;

/// One keyframe window, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    pub start: f64,
    pub end: f64,
}

/// Keyframe windows for the intro sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timeline {
    pub product: Window,
    pub headline: Window,
    pub overlay: Window,
    pub cursor: Window,
    pub hold_until: f64,
}

pub const TIMELINE: Timeline = Timeline {
    product: Window {
        start: 0.4,
        end: 1.2,
    },
    headline: Window {
        start: 1.4,
        end: 2.2,
    },
    overlay: Window {
        start: 2.4,
        end: 3.2,
    },
    cursor: Window {
        start: 3.4,
        end: 4.2,
    },
    hold_until: 8.0,
};

pub const TOTAL_DURATION: f64 = TIMELINE.hold_until;
pub const FPS: Fps = Fps { num: 30, den: 1 };
/// `ceil(TOTAL_DURATION * 30)`.
pub const TOTAL_FRAMES: u64 = 240;

/// Eased progress through `window` at `t`: 0 at or before the start, 1 at or after the end.
pub fn progress(t: f64, window: Window) -> f64 {
    if t <= window.start {
        return 0.0;
    }
    if t >= window.end {
        return 1.0;
    }
    ease_out_cubic((t - window.start) / (window.end - window.start))
}

/// Opacity and positional offset applied to one layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerAnim {
    pub opacity: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl LayerAnim {
    /// Fully shown, no offset.
    pub const REST: Self = Self {
        opacity: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };
}

impl Default for LayerAnim {
    fn default() -> Self {
        Self::REST
    }
}

/// The five compositing layers, bottom to top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    Background,
    Product,
    Headline,
    Overlay,
    Cursor,
}

impl Layer {
    pub const ORDER: [Layer; 5] = [
        Layer::Background,
        Layer::Product,
        Layer::Headline,
        Layer::Overlay,
        Layer::Cursor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Product => "product",
            Self::Headline => "headline",
            Self::Overlay => "overlay",
            Self::Cursor => "cursor",
        }
    }

    /// Entry window, `None` for the always-on background.
    pub fn window(self) -> Option<Window> {
        match self {
            Self::Background => None,
            Self::Product => Some(TIMELINE.product),
            Self::Headline => Some(TIMELINE.headline),
            Self::Overlay => Some(TIMELINE.overlay),
            Self::Cursor => Some(TIMELINE.cursor),
        }
    }

    /// Whether the layer is drawn at all at time `t`.
    ///
    /// A gated layer is skipped outright rather than drawn invisible, so the first frame is
    /// background only regardless of easing round-off.
    pub fn is_drawn_at(self, t: f64) -> bool {
        self.window().is_none_or(|w| t >= w.start)
    }
}

/// Per-frame animation parameters for all five layers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    pub background: LayerAnim,
    pub product: LayerAnim,
    pub headline: LayerAnim,
    pub overlay: LayerAnim,
    pub cursor: LayerAnim,
}

impl FrameParams {
    /// Every layer at rest: the static rendering.
    pub const STATIC: Self = Self {
        background: LayerAnim::REST,
        product: LayerAnim::REST,
        headline: LayerAnim::REST,
        overlay: LayerAnim::REST,
        cursor: LayerAnim::REST,
    };

    pub fn layer(&self, layer: Layer) -> LayerAnim {
        match layer {
            Layer::Background => self.background,
            Layer::Product => self.product,
            Layer::Headline => self.headline,
            Layer::Overlay => self.overlay,
            Layer::Cursor => self.cursor,
        }
    }
}

pub fn frame_params(t: f64) -> FrameParams {
    let p = progress(t, TIMELINE.product);
    let h = progress(t, TIMELINE.headline);
    let o = progress(t, TIMELINE.overlay);
    let c = progress(t, TIMELINE.cursor);
    FrameParams {
        background: LayerAnim::REST,
        product: LayerAnim {
            opacity: p,
            offset_x: (1.0 - p) * -80.0,
            offset_y: 0.0,
        },
        headline: LayerAnim {
            opacity: h,
            offset_x: 0.0,
            offset_y: (1.0 - h) * 40.0,
        },
        overlay: LayerAnim {
            opacity: o,
            offset_x: (1.0 - o) * 200.0,
            offset_y: 0.0,
        },
        cursor: LayerAnim {
            opacity: c,
            offset_x: (1.0 - c) * 100.0,
            offset_y: (1.0 - c) * 50.0,
        },
    }
}

/// Timestamp of frame `index` at [`FPS`].
pub fn frame_time(index: u64) -> f64 {
    FPS.frames_to_secs(index)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
