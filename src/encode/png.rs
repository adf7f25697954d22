//! Lossless PNG output of a rendered frame at its native size.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{PromoError, PromoResult};
use crate::render::backend::FrameRGBA;

/// Encode `frame` as a straight-alpha RGBA8 PNG.
pub fn encode_png(frame: &FrameRGBA) -> PromoResult<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(PromoError::validation(format!(
            "frame data is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    let rgba = frame.to_straight_rgba8();
    let mut out = std::io::Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut out,
        &rgba,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .context("encode png")?;
    Ok(out.into_inner())
}

/// Write `frame` to `path` as PNG, creating parent directories.
pub fn save_png(frame: &FrameRGBA, path: &Path) -> PromoResult<()> {
    let bytes = encode_png(frame)?;
    crate::encode::ffmpeg::ensure_parent_dir(path)?;
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}
