use std::path::{Path, PathBuf};

use crate::assets::loader::ImageSet;
use crate::encode::png::{encode_png, save_png};
use crate::foundation::error::PromoResult;
use crate::model::config::{AssetConfig, AssetKind};
use crate::render::pipeline::FrameRenderer;

/// An encoded static export.
#[derive(Clone, Debug)]
pub struct StillExport {
    pub width: u32,
    pub height: u32,
    pub file_name: &'static str,
    pub png: Vec<u8>,
}

/// Render the static asset at its native size and encode it as PNG.
///
/// Exports never carry the editor's focus highlight.
#[tracing::instrument(level = "debug", skip(renderer, config, images))]
pub fn export_png(
    renderer: &mut FrameRenderer,
    kind: AssetKind,
    config: &AssetConfig,
    images: &ImageSet,
) -> PromoResult<StillExport> {
    let frame = renderer.render_static(kind, config, images, None)?;
    let png = encode_png(&frame)?;
    tracing::info!(
        kind = ?kind,
        width = frame.width,
        height = frame.height,
        bytes = png.len(),
        "still exported"
    );
    Ok(StillExport {
        width: frame.width,
        height: frame.height,
        file_name: kind.default_file_name(),
        png,
    })
}

/// Render and write the static asset. A directory `out` receives the default file name.
pub fn save_still(
    renderer: &mut FrameRenderer,
    kind: AssetKind,
    config: &AssetConfig,
    images: &ImageSet,
    out: &Path,
) -> PromoResult<PathBuf> {
    let path = if out.is_dir() {
        out.join(kind.default_file_name())
    } else {
        out.to_path_buf()
    };
    let frame = renderer.render_static(kind, config, images, None)?;
    save_png(&frame, &path)?;
    tracing::info!(kind = ?kind, path = %path.display(), "still saved");
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/export/still.rs"]
mod tests;
