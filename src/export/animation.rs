//! Animated export: renders the intro timeline once per requested container and tracks the
//! export state machine (`idle -> rendering -> encoding -> done | error`).

use std::path::{Path, PathBuf};

use crate::animation::timeline::TOTAL_FRAMES;
use crate::assets::loader::ImageSet;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, VideoContainer, check_encoder};
use crate::encode::sink::FrameSink;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{PromoError, PromoResult};
use crate::layout::table::descriptor;
use crate::model::config::{AssetConfig, AssetKind};
use crate::render::pipeline::{CancelToken, FrameProgress, FrameRenderer, RenderThreading};

pub const MSG_PREPARING: &str = "Preparing renderer...";
pub const MSG_COMPLETE: &str = "Export complete!";
pub const MSG_CANCELLED: &str = "Export cancelled";

/// Which containers an animated export produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Mp4,
    Webm,
    #[default]
    Both,
}

impl ExportFormat {
    pub fn containers(self) -> &'static [VideoContainer] {
        match self {
            Self::Mp4 => &[VideoContainer::Mp4],
            Self::Webm => &[VideoContainer::Webm],
            Self::Both => &[VideoContainer::Mp4, VideoContainer::Webm],
        }
    }

    /// Overall progress range (percent) covered by `container`'s pass.
    pub fn progress_span(self, container: VideoContainer) -> (f64, f64) {
        match (self, container) {
            (Self::Both, VideoContainer::Mp4) => (0.0, 50.0),
            (Self::Both, VideoContainer::Webm) => (50.0, 100.0),
            _ => (0.0, 100.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStatus {
    #[default]
    Idle,
    Rendering,
    Encoding,
    Done,
    Error,
}

/// Observable export state.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ExportState {
    pub status: ExportStatus,
    /// 0 to 100.
    pub progress: f64,
    pub message: String,
    pub mp4: Option<PathBuf>,
    pub webm: Option<PathBuf>,
    pub error: Option<String>,
}

impl ExportState {
    /// Whether the last export ended in a user cancellation rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        self.status == ExportStatus::Error && self.message == MSG_CANCELLED
    }
}

/// Fraction of one container pass completed, from frame counts.
pub fn frame_fraction(p: FrameProgress) -> f64 {
    if p.total == 0 {
        return 1.0;
    }
    (p.rendered.max(p.encoded) as f64 / p.total as f64).min(1.0)
}

/// Produces video files from rendered frames.
pub trait VideoEncoder: Send + Sync {
    /// Fail with [`PromoError::ExportUnsupported`] when `container` cannot be produced at
    /// `canvas` size.
    fn check_support(&self, container: VideoContainer, canvas: Canvas) -> PromoResult<()>;

    /// A sink writing `container` to `path`.
    fn open(&self, container: VideoContainer, path: &Path) -> PromoResult<Box<dyn FrameSink>>;
}

/// [`VideoEncoder`] backed by the system `ffmpeg`.
#[derive(Clone, Debug)]
pub struct FfmpegEncoder {
    /// Colour transparent pixels are flattened over.
    pub bg: Rgba8,
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self {
            bg: Rgba8::opaque(0x0d, 0x11, 0x17),
        }
    }
}

impl VideoEncoder for FfmpegEncoder {
    fn check_support(&self, container: VideoContainer, canvas: Canvas) -> PromoResult<()> {
        if !canvas.width.is_multiple_of(2) || !canvas.height.is_multiple_of(2) {
            return Err(PromoError::export_unsupported(format!(
                "{container} export needs even dimensions (yuv420p), got {}x{}",
                canvas.width, canvas.height
            )));
        }
        check_encoder(container)
    }

    fn open(&self, container: VideoContainer, path: &Path) -> PromoResult<Box<dyn FrameSink>> {
        let mut opts = FfmpegSinkOpts::new(path, container);
        opts.bg = self.bg;
        Ok(Box::new(FfmpegSink::new(opts)))
    }
}

/// One animated export request.
#[derive(Clone, Debug)]
pub struct ExportJob {
    pub kind: AssetKind,
    pub format: ExportFormat,
    pub out_dir: PathBuf,
}

impl ExportJob {
    pub fn output_path(&self, container: VideoContainer) -> PathBuf {
        self.out_dir.join(
            Path::new(self.kind.default_file_name()).with_extension(container.extension()),
        )
    }
}

/// Drives animated exports and owns their state.
pub struct AnimationExport {
    encoder: Box<dyn VideoEncoder>,
    threading: RenderThreading,
    cancel: CancelToken,
    state: ExportState,
}

impl std::fmt::Debug for AnimationExport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationExport")
            .field("threading", &self.threading)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl AnimationExport {
    pub fn new(encoder: Box<dyn VideoEncoder>) -> Self {
        Self {
            encoder,
            threading: RenderThreading::default(),
            cancel: CancelToken::new(),
            state: ExportState::default(),
        }
    }

    pub fn with_threading(mut self, threading: RenderThreading) -> Self {
        self.threading = threading;
        self
    }

    pub fn state(&self) -> &ExportState {
        &self.state
    }

    /// Handle for cancelling from another thread while [`Self::export`] runs.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Run `job`. `on_state` sees every state change; the final state is also kept in
    /// [`Self::state`]. Unsupported containers are rejected before any frame is rendered.
    #[tracing::instrument(level = "info", skip_all, fields(kind = ?job.kind, format = ?job.format))]
    pub fn export(
        &mut self,
        job: &ExportJob,
        renderer: &mut FrameRenderer,
        config: &AssetConfig,
        images: &ImageSet,
        on_state: &mut dyn FnMut(&ExportState),
    ) -> PromoResult<&ExportState> {
        self.cancel.reset();
        self.state = ExportState {
            status: ExportStatus::Rendering,
            progress: 0.0,
            message: MSG_PREPARING.to_string(),
            ..ExportState::default()
        };
        on_state(&self.state);

        let mut produced: Vec<(VideoContainer, PathBuf)> = Vec::new();
        let result = self.run(job, renderer, config, images, on_state, &mut produced);
        match result {
            Ok(()) => {
                let mut done = ExportState {
                    status: ExportStatus::Done,
                    progress: 100.0,
                    message: MSG_COMPLETE.to_string(),
                    ..ExportState::default()
                };
                for (container, path) in produced {
                    match container {
                        VideoContainer::Mp4 => done.mp4 = Some(path),
                        VideoContainer::Webm => done.webm = Some(path),
                    }
                }
                tracing::info!(mp4 = ?done.mp4, webm = ?done.webm, "export complete");
                self.state = done;
                on_state(&self.state);
                Ok(&self.state)
            }
            Err(e) => {
                for (_, path) in &produced {
                    remove_output(path);
                }
                let message = if e.is_cancelled() {
                    MSG_CANCELLED.to_string()
                } else {
                    e.to_string()
                };
                self.state = ExportState {
                    status: ExportStatus::Error,
                    progress: 0.0,
                    message: message.clone(),
                    error: Some(message),
                    ..ExportState::default()
                };
                on_state(&self.state);
                Err(e)
            }
        }
    }

    fn run(
        &self,
        job: &ExportJob,
        renderer: &mut FrameRenderer,
        config: &AssetConfig,
        images: &ImageSet,
        on_state: &mut dyn FnMut(&ExportState),
        produced: &mut Vec<(VideoContainer, PathBuf)>,
    ) -> PromoResult<()> {
        let canvas = descriptor(job.kind).canvas(config.hero_count);
        for &container in job.format.containers() {
            self.encoder.check_support(container, canvas)?;
        }

        for &container in job.format.containers() {
            if self.cancel.is_cancelled() {
                return Err(PromoError::Cancelled);
            }
            let path = job.output_path(container);
            let (start, end) = job.format.progress_span(container);
            let message = format!("Encoding {}...", container.extension().to_uppercase());
            let mut sink = self.encoder.open(container, &path)?;

            let mut last_percent = -1i64;
            let mut report = |p: FrameProgress| {
                let progress = start + frame_fraction(p) * (end - start);
                // Report whole-percent changes only.
                let percent = progress.floor() as i64;
                if percent != last_percent {
                    last_percent = percent;
                    on_state(&ExportState {
                        status: ExportStatus::Encoding,
                        progress,
                        message: message.clone(),
                        ..ExportState::default()
                    });
                }
            };
            let stats = renderer.render_animation(
                job.kind,
                config,
                images,
                sink.as_mut(),
                &self.threading,
                &self.cancel,
                &mut report,
            )?;
            tracing::debug!(
                container = container.extension(),
                frames = stats.frames_total,
                expected = TOTAL_FRAMES,
                "container pass finished"
            );
            produced.push((container, path));
        }
        Ok(())
    }

    /// Return to idle, deleting any files the last export produced.
    pub fn reset(&mut self) {
        self.discard_outputs();
        self.state = ExportState::default();
    }

    fn discard_outputs(&mut self) {
        for path in [self.state.mp4.take(), self.state.webm.take()]
            .into_iter()
            .flatten()
        {
            remove_output(&path);
        }
    }
}

fn remove_output(path: &Path) {
    if let Err(e) = std::fs::remove_file(path)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        tracing::warn!(path = %path.display(), error = %e, "failed to remove export output");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/animation.rs"]
mod tests;
