//! Process-level engine settings: where assets and fonts live and how exports are rendered.
//!
//! Resolution order is defaults, then an optional JSON file, then `PROMOCARD_*` environment
//! variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::assets::loader::AssetLoader;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{PromoError, PromoResult};
use crate::render::pipeline::RenderThreading;
use crate::text::typeset::{FontRole, Typesetter};

pub const ENV_ASSETS_DIR: &str = "PROMOCARD_ASSETS_DIR";
pub const ENV_FONTS_DIR: &str = "PROMOCARD_FONTS_DIR";
pub const ENV_THREADS: &str = "PROMOCARD_THREADS";

/// Explicit font file per role. Unset roles are looked up in `dir` as `<role>.ttf`/`<role>.otf`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontPaths {
    pub dir: Option<PathBuf>,
    pub display: Option<PathBuf>,
    pub mono: Option<PathBuf>,
    pub ui: Option<PathBuf>,
    pub ui_medium: Option<PathBuf>,
}

impl FontPaths {
    fn explicit(&self, role: FontRole) -> Option<&PathBuf> {
        match role {
            FontRole::Display => self.display.as_ref(),
            FontRole::Mono => self.mono.as_ref(),
            FontRole::Ui => self.ui.as_ref(),
            FontRole::UiMedium => self.ui_medium.as_ref(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    /// Root the image ids (`/backgrounds/...`, `/logos/...`) resolve against.
    pub assets_root: PathBuf,
    pub fonts: FontPaths,
    /// `#rrggbb` colour transparent pixels are flattened over in video exports.
    pub video_background: String,
    pub parallel: bool,
    pub threads: Option<usize>,
    pub chunk_size: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            assets_root: PathBuf::from("public"),
            fonts: FontPaths::default(),
            video_background: "#0d1117".to_string(),
            parallel: false,
            threads: None,
            chunk_size: RenderThreading::default().chunk_size,
        }
    }
}

impl EngineSettings {
    /// Read settings from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> PromoResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        serde_json::from_str(&text)
            .map_err(|e| PromoError::serde(format!("settings '{}': {e}", path.display())))
    }

    /// Defaults or `path`, then environment overrides.
    pub fn resolve(path: Option<&Path>) -> PromoResult<Self> {
        let base = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        Ok(base.with_env(|k| std::env::var(k).ok()))
    }

    /// Apply `PROMOCARD_*` overrides read through `var`.
    pub fn with_env(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = var(ENV_ASSETS_DIR).filter(|v| !v.is_empty()) {
            self.assets_root = PathBuf::from(dir);
        }
        if let Some(dir) = var(ENV_FONTS_DIR).filter(|v| !v.is_empty()) {
            self.fonts.dir = Some(PathBuf::from(dir));
        }
        if let Some(n) = var(ENV_THREADS)
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
        {
            self.parallel = true;
            self.threads = Some(n);
        }
        self
    }

    pub fn video_background(&self) -> PromoResult<Rgba8> {
        Rgba8::from_hex(&self.video_background)
    }

    pub fn threading(&self) -> RenderThreading {
        RenderThreading {
            parallel: self.parallel,
            chunk_size: self.chunk_size,
            threads: self.threads,
            ..RenderThreading::default()
        }
    }

    pub fn asset_loader(&self) -> AssetLoader {
        AssetLoader::from_dir(&self.assets_root)
    }

    /// Font file for `role`, if one is configured or present in the fonts directory.
    pub fn font_path(&self, role: FontRole) -> Option<PathBuf> {
        if let Some(p) = self.fonts.explicit(role) {
            return Some(p.clone());
        }
        let dir = self.fonts.dir.as_ref()?;
        ["ttf", "otf"]
            .iter()
            .map(|ext| dir.join(format!("{}.{ext}", role.name())))
            .find(|p| p.is_file())
    }

    /// A typesetter with every available role font registered.
    ///
    /// A role whose font cannot be read or parsed is logged and measured with the fallback
    /// advance; its text is not drawn.
    pub fn build_typesetter(&self) -> Typesetter {
        let mut ts = Typesetter::new();
        for role in FontRole::ALL {
            let Some(path) = self.font_path(role) else {
                tracing::warn!(role = role.name(), "no font configured");
                continue;
            };
            let loaded = std::fs::read(&path)
                .map_err(|e| {
                    PromoError::asset_unavailable(path.display().to_string(), e.to_string())
                })
                .and_then(|bytes| ts.set_font(role, bytes));
            if let Err(e) = loaded {
                tracing::warn!(
                    role = role.name(),
                    path = %path.display(),
                    error = %e,
                    "font unavailable"
                );
            }
        }
        ts
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
