//! Backend-agnostic draw list.
//!
//! The compositor records what to draw as [`DrawOp`]s grouped per layer; a backend replays them.
//! Push ops open a scope that the matching [`DrawOp::Pop`] closes, and a layer's ops are always
//! balanced, so one layer can never leak opacity or clipping into the next.

use crate::animation::timeline::Layer;
use crate::foundation::core::{Canvas, Point, Rect, Rgba8, Vec2};
use crate::text::typeset::TextStyle;

/// Fillable or strokable outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    Rect(Rect),
    RoundedRect { rect: Rect, radius: f64 },
}

impl Geometry {
    pub fn rounded(rect: Rect, radius: f64) -> Self {
        Self::RoundedRect { rect, radius }
    }

    pub fn bounds(&self) -> Rect {
        match *self {
            Self::Rect(r) | Self::RoundedRect { rect: r, .. } => r,
        }
    }
}

/// One colour stop at `offset` in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba8,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba8),
    /// Linear gradient between two canvas points, padded beyond the ends.
    Linear {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Fill {
        geometry: Geometry,
        paint: Paint,
    },
    Stroke {
        geometry: Geometry,
        color: Rgba8,
        width: f64,
    },
    /// Soft shadow of a rounded rectangle (canvas `shadowBlur` semantics).
    Shadow {
        rect: Rect,
        radius: f64,
        blur: f64,
        offset: Vec2,
        color: Rgba8,
    },
    /// Draw image `id`, or the `src` sub-rectangle of it (in natural units), into `dst`.
    Image {
        id: String,
        src: Option<Rect>,
        dst: Rect,
        tint_white: bool,
    },
    /// Single-line text with its left edge at `origin.x` and baseline at `origin.y`.
    Text {
        text: String,
        style: TextStyle,
        color: Rgba8,
        origin: Point,
    },
    PushOpacity(f64),
    PushClip(Rect),
    Pop,
}

/// Draw ops of one layer, in paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerOps {
    pub layer: Layer,
    pub ops: Vec<DrawOp>,
}

impl LayerOps {
    pub fn new(layer: Layer) -> Self {
        Self {
            layer,
            ops: Vec::new(),
        }
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Record `body` inside an opacity scope. Fully opaque scopes are elided.
    pub fn with_opacity(&mut self, opacity: f64, body: impl FnOnce(&mut Self)) {
        let scoped = opacity < 1.0;
        if scoped {
            self.ops.push(DrawOp::PushOpacity(opacity.clamp(0.0, 1.0)));
        }
        body(self);
        if scoped {
            self.ops.push(DrawOp::Pop);
        }
    }

    pub fn with_clip(&mut self, clip: Rect, body: impl FnOnce(&mut Self)) {
        self.ops.push(DrawOp::PushClip(clip));
        body(self);
        self.ops.push(DrawOp::Pop);
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Whether every push has a matching pop.
    pub fn is_balanced(&self) -> bool {
        let mut depth = 0usize;
        for op in &self.ops {
            match op {
                DrawOp::PushOpacity(_) | DrawOp::PushClip(_) => depth += 1,
                DrawOp::Pop => match depth.checked_sub(1) {
                    Some(d) => depth = d,
                    None => return false,
                },
                _ => {}
            }
        }
        depth == 0
    }
}

/// A full frame: optional clear colour, then layers bottom to top.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub canvas: Canvas,
    /// `None` leaves the surface transparent before the first layer.
    pub clear: Option<Rgba8>,
    pub layers: Vec<LayerOps>,
}

impl Scene {
    pub fn layer(&self, layer: Layer) -> Option<&LayerOps> {
        self.layers.iter().find(|l| l.layer == layer)
    }

    pub fn drawn_layers(&self) -> Vec<Layer> {
        self.layers.iter().map(|l| l.layer).collect()
    }
}
