//! promocard composes model-announcement promo images: a 2400×1260 social card and a
//! 2064-wide header image, built from a small design document ([`AssetConfig`]).
//!
//! The same layer routines serve the editor preview, lossless PNG export and an eight second
//! intro animation encoded to MP4/WebM:
//!
//! - Resolve the design's images with an [`AssetLoader`]
//! - Compose a [`Scene`] (static, or at time `t` on the [`TIMELINE`])
//! - Rasterise it with a [`FrameRenderer`] and hand frames to a [`FrameSink`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod assets;
pub(crate) mod compose;
pub(crate) mod encode;
pub(crate) mod export;
pub(crate) mod generate;
pub(crate) mod layout;
pub(crate) mod model;
pub(crate) mod render;
pub(crate) mod settings;
pub(crate) mod text;

pub use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{PromoError, PromoResult};

pub use crate::model::catalog::{BadgeType, ProductType, Provider};
pub use crate::model::config::{
    AssetConfig, AssetKind, Background, BackgroundSource, FocusedField, HeroCount,
    MODEL_NAME_LIMIT, ModelConfig, ModelSlot, SOCIAL_COPY_LIMIT,
};

pub use crate::layout::table::{
    AssetDescriptor, CursorAnchor, DropdownMetrics, LayoutVariant, ListMetrics,
    OverlayPlacement, descriptor, layout,
};

pub use crate::animation::ease::ease_out_cubic;
pub use crate::animation::timeline::{
    FPS, FrameParams, Layer, LayerAnim, TIMELINE, TOTAL_DURATION, TOTAL_FRAMES, Timeline, Window,
    frame_params, frame_time, progress,
};

pub use crate::assets::decode::{PreparedImage, SVG_RASTER_SCALE, decode_asset};
pub use crate::assets::loader::{AssetLoader, ImageSet, LoadState};
pub use crate::assets::resolve::{background_id, image_sources, overlay_id};
pub use crate::assets::source::{AssetSource, FsAssetSource, MemoryAssetSource};

pub use crate::text::typeset::{FontRole, FontSet, TextStyle, Typesetter};
pub use crate::text::wrap::{HEADLINE_MAX_CHARS, HEADLINE_MAX_LINES, wrap_headline, wrap_words};

pub use crate::compose::layers::{Compositor, FRAME_FILL};
pub use crate::compose::model_list::{ModelRow, build_model_rows};
pub use crate::compose::scene::{DrawOp, Geometry, GradientStop, LayerOps, Paint, Scene};
pub use crate::compose::{compose_frame, compose_static};

pub use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::pipeline::{
    CancelToken, FrameProgress, FrameRenderer, RenderStats, RenderThreading,
};

pub use crate::encode::ffmpeg::{
    FfmpegSink, FfmpegSinkOpts, VideoContainer, check_encoder, is_ffmpeg_on_path,
};
pub use crate::encode::png::{encode_png, save_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};

pub use crate::export::animation::{
    AnimationExport, ExportFormat, ExportJob, ExportState, ExportStatus, FfmpegEncoder,
    VideoEncoder, frame_fraction,
};
pub use crate::export::still::{StillExport, export_png, save_still};

pub use crate::generate::{
    BackgroundProvider, DEFAULT_PROMPT, GenerateRequest, GenerateResponse, GenerationStatus,
    MockProvider, PollOptions, STYLE_PRESETS, StylePreset, apply_generated, generate_background,
    poll_generation, style_preset,
};

pub use crate::settings::{EngineSettings, FontPaths};
