use crate::assets::loader::ImageSet;
use crate::compose::scene::Scene;
use crate::foundation::error::PromoResult;
use crate::foundation::math::{Fnv1a64, unpremul_u8};
use crate::text::typeset::Typesetter;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha** straight out of a backend. The `premultiplied` flag keeps
/// that explicit at API boundaries (PNG export and video encoding convert differently).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Content hash over size and pixels. Equal frames always hash equal.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_bytes(&self.data);
        h.finish()
    }

    /// Straight-alpha copy of the pixels.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = px[3];
            if a == 255 {
                continue;
            }
            px[0] = unpremul_u8(px[0], a);
            px[1] = unpremul_u8(px[1], a);
            px[2] = unpremul_u8(px[2], a);
        }
        out
    }

    /// Premultiplied RGBA of the pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// A renderer that replays a composed [`Scene`] into a [`FrameRGBA`].
///
/// Text ops are shaped through the caller's [`Typesetter`] so preview, PNG export and video
/// frames all use one shaping cache.
pub trait RenderBackend: Send {
    fn render_scene(
        &mut self,
        scene: &Scene,
        images: &ImageSet,
        ts: &mut Typesetter,
    ) -> PromoResult<FrameRGBA>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Create a rendering backend implementation.
pub fn create_backend(kind: BackendKind) -> Box<dyn RenderBackend> {
    match kind {
        BackendKind::Cpu => Box::new(crate::render::cpu::CpuBackend::new()),
    }
}
