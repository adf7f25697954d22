//! Scene composition: turns a design plus loaded images into a layered draw list.

pub(crate) mod layers;
pub(crate) mod model_list;
pub(crate) mod scene;

use crate::animation::timeline::frame_params;
use crate::assets::loader::ImageSet;
use crate::model::config::{AssetConfig, AssetKind, FocusedField};
use crate::text::typeset::Typesetter;

use layers::Compositor;
use scene::Scene;

/// The editor preview / PNG export scene: every layer at rest, transparent base.
pub fn compose_static(
    kind: AssetKind,
    config: &AssetConfig,
    images: &ImageSet,
    focus: Option<FocusedField>,
    ts: &mut Typesetter,
) -> Scene {
    Compositor::new(kind, config, images, focus).static_scene(ts)
}

/// One animation frame at `t` seconds. Animated frames never carry a focus highlight.
pub fn compose_frame(
    kind: AssetKind,
    config: &AssetConfig,
    images: &ImageSet,
    t: f64,
    ts: &mut Typesetter,
) -> Scene {
    Compositor::new(kind, config, images, None).frame_scene(t, &frame_params(t), ts)
}
