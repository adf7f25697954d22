use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::animation::timeline::{FPS, TOTAL_FRAMES, frame_time};
use crate::assets::loader::ImageSet;
use crate::compose::scene::Scene;
use crate::compose::{compose_frame, compose_static};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PromoError, PromoResult};
use crate::model::config::{AssetConfig, AssetKind, FocusedField};
use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
use crate::render::cpu::CpuBackend;
use crate::text::typeset::{FontSet, Typesetter};

/// Shared cancellation signal for an in-flight animated export.
///
/// Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear a previous cancellation before a new run.
    pub(crate) fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    fn check(&self) -> PromoResult<()> {
        if self.is_cancelled() {
            Err(PromoError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Frame render threading and chunking.
#[derive(Clone, Debug)]
pub struct RenderThreading {
    /// Render each chunk's distinct frames on a rayon pool.
    pub parallel: bool,
    pub chunk_size: usize,
    /// Worker count; `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Reuse the previous frame's pixels when its scene is unchanged (the closing hold).
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 30,
            threads: None,
            static_frame_elision: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub frames_rendered: u64,
    pub frames_elided: u64,
}

/// Progress of an animated render: frames produced and frames accepted by the sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameProgress {
    pub rendered: u64,
    pub encoded: u64,
    pub total: u64,
}

/// Owns the backend and typesetter used for every frame of one asset pipeline.
pub struct FrameRenderer {
    backend: Box<dyn RenderBackend>,
    typesetter: Typesetter,
}

impl std::fmt::Debug for FrameRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameRenderer")
            .field("typesetter", &self.typesetter)
            .finish_non_exhaustive()
    }
}

impl FrameRenderer {
    pub fn new(typesetter: Typesetter) -> Self {
        Self {
            backend: create_backend(BackendKind::Cpu),
            typesetter,
        }
    }

    pub fn typesetter(&mut self) -> &mut Typesetter {
        &mut self.typesetter
    }

    /// The static scene (all layers at rest) as a draw list.
    pub fn static_scene(
        &mut self,
        kind: AssetKind,
        config: &AssetConfig,
        images: &ImageSet,
        focus: Option<FocusedField>,
    ) -> Scene {
        compose_static(kind, config, images, focus, &mut self.typesetter)
    }

    /// Render the static asset over a transparent surface.
    #[tracing::instrument(level = "debug", skip(self, config, images))]
    pub fn render_static(
        &mut self,
        kind: AssetKind,
        config: &AssetConfig,
        images: &ImageSet,
        focus: Option<FocusedField>,
    ) -> PromoResult<FrameRGBA> {
        let scene = compose_static(kind, config, images, focus, &mut self.typesetter);
        self.backend
            .render_scene(&scene, images, &mut self.typesetter)
    }

    /// Render the animation frame at `t` seconds.
    #[tracing::instrument(level = "trace", skip(self, config, images))]
    pub fn render_at(
        &mut self,
        kind: AssetKind,
        config: &AssetConfig,
        images: &ImageSet,
        t: f64,
    ) -> PromoResult<FrameRGBA> {
        let scene = compose_frame(kind, config, images, t, &mut self.typesetter);
        self.backend
            .render_scene(&scene, images, &mut self.typesetter)
    }

    /// Render every frame of the intro animation into `sink`, in order.
    ///
    /// `cancel` is polled between chunks and before every frame handed to the sink; a cancelled
    /// run aborts the sink and returns [`PromoError::Cancelled`]. Any other failure also aborts
    /// the sink. `progress` is called after each chunk renders and after each frame is encoded.
    #[allow(clippy::too_many_arguments)]
    pub fn render_animation(
        &mut self,
        kind: AssetKind,
        config: &AssetConfig,
        images: &ImageSet,
        sink: &mut dyn FrameSink,
        threading: &RenderThreading,
        cancel: &CancelToken,
        progress: &mut dyn FnMut(FrameProgress),
    ) -> PromoResult<RenderStats> {
        cancel.check()?;
        let canvas = crate::layout::table::descriptor(kind).canvas(config.hero_count);
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: FPS,
        })?;

        let run = self.render_animation_frames(
            kind, config, images, sink, threading, cancel, progress,
        );
        match run {
            Ok(stats) => {
                if let Err(e) = sink.end() {
                    sink.abort();
                    return Err(e);
                }
                tracing::info!(
                    kind = ?kind,
                    frames = stats.frames_total,
                    rendered = stats.frames_rendered,
                    elided = stats.frames_elided,
                    "animation rendered"
                );
                Ok(stats)
            }
            Err(e) => {
                sink.abort();
                if e.is_cancelled() {
                    tracing::info!(kind = ?kind, "animation cancelled");
                } else {
                    tracing::error!(kind = ?kind, error = %e, "animation failed");
                }
                Err(e)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_animation_frames(
        &mut self,
        kind: AssetKind,
        config: &AssetConfig,
        images: &ImageSet,
        sink: &mut dyn FrameSink,
        threading: &RenderThreading,
        cancel: &CancelToken,
        progress: &mut dyn FnMut(FrameProgress),
    ) -> PromoResult<RenderStats> {
        let chunk_size = normalized_chunk_size(threading.chunk_size);
        let pool = if threading.parallel {
            Some(build_thread_pool(threading.threads)?)
        } else {
            None
        };
        let font_set = self.typesetter.font_set();

        let mut stats = RenderStats::default();
        let mut prev: Option<(Scene, FrameRGBA)> = None;
        let mut encoded = 0u64;

        let mut chunk_start = 0u64;
        while chunk_start < TOTAL_FRAMES {
            cancel.check()?;
            let chunk_end = (chunk_start + chunk_size).min(TOTAL_FRAMES);

            let scenes: Vec<Scene> = (chunk_start..chunk_end)
                .map(|f| compose_frame(kind, config, images, frame_time(f), &mut self.typesetter))
                .collect();

            // `source[i]` is the index in `scenes` whose pixels frame `i` reuses, or `None` to
            // reuse the last frame of the previous chunk.
            let mut source: Vec<Option<usize>> = Vec::with_capacity(scenes.len());
            let mut unique: Vec<usize> = Vec::new();
            for (i, scene) in scenes.iter().enumerate() {
                let same_as_prev = threading.static_frame_elision
                    && match i.checked_sub(1) {
                        Some(p) => scenes[p] == *scene,
                        None => prev.as_ref().is_some_and(|(s, _)| s == scene),
                    };
                if same_as_prev {
                    let reuse = i.checked_sub(1).and_then(|p| source[p]);
                    source.push(reuse);
                } else {
                    source.push(Some(unique.len()));
                    unique.push(i);
                }
            }

            let rendered = match &pool {
                Some(pool) => render_parallel(pool, &scenes, &unique, images, &font_set)?,
                None => unique
                    .iter()
                    .map(|&i| {
                        self.backend
                            .render_scene(&scenes[i], images, &mut self.typesetter)
                    })
                    .collect::<PromoResult<Vec<_>>>()?,
            };

            let chunk_len = chunk_end - chunk_start;
            stats.frames_total += chunk_len;
            stats.frames_rendered += rendered.len() as u64;
            stats.frames_elided += chunk_len - rendered.len() as u64;
            progress(FrameProgress {
                rendered: stats.frames_total,
                encoded,
                total: TOTAL_FRAMES,
            });

            for (i, src) in source.iter().enumerate() {
                cancel.check()?;
                let frame = match src {
                    Some(u) => &rendered[*u],
                    None => match &prev {
                        Some((_, f)) => f,
                        None => {
                            return Err(PromoError::evaluation(
                                "elided frame has no previous frame",
                            ));
                        }
                    },
                };
                sink.push_frame(FrameIndex(chunk_start + i as u64), frame)?;
                encoded += 1;
                progress(FrameProgress {
                    rendered: stats.frames_total,
                    encoded,
                    total: TOTAL_FRAMES,
                });
            }

            if let (Some(last_scene), Some(last_src)) = (scenes.last(), source.last()) {
                let last_frame = match last_src {
                    Some(u) => rendered.get(*u).cloned(),
                    None => prev.map(|(_, f)| f),
                };
                prev = last_frame.map(|f| (last_scene.clone(), f));
            }
            chunk_start = chunk_end;
        }

        Ok(stats)
    }
}

fn render_parallel(
    pool: &rayon::ThreadPool,
    scenes: &[Scene],
    unique: &[usize],
    images: &ImageSet,
    font_set: &FontSet,
) -> PromoResult<Vec<FrameRGBA>> {
    let rendered = pool.install(|| {
        unique
            .par_iter()
            .map_init(
                || Typesetter::from_font_set(font_set).map(|ts| (CpuBackend::new(), ts)),
                |worker, &i| -> PromoResult<FrameRGBA> {
                    let (backend, ts) = worker.as_mut().map_err(|e| {
                        PromoError::evaluation(format!("worker typesetter setup failed: {e}"))
                    })?;
                    backend.render_scene(&scenes[i], images, ts)
                },
            )
            .collect::<Vec<_>>()
    });
    rendered.into_iter().collect()
}

fn build_thread_pool(threads: Option<usize>) -> PromoResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PromoError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PromoError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
