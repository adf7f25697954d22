use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::foundation::error::{PromoError, PromoResult};

/// Byte source behind the asset loader.
///
/// Implementations must be callable from worker threads. A failed fetch is reported per id and
/// never affects other ids.
pub trait AssetSource: Send + Sync {
    fn fetch(&self, id: &str) -> PromoResult<Vec<u8>>;
}

/// Reads ids as paths relative to an assets root; absolute paths are read as-is.
///
/// Remote (`http`, `https`, `data`) ids are reported unavailable, so a custom background given as
/// a URL falls back to the gradient.
#[derive(Clone, Debug)]
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> PromoResult<PathBuf> {
        if is_remote_id(id) {
            return Err(PromoError::asset_unavailable(
                id,
                "remote ids are not readable from the filesystem source",
            ));
        }
        let p = Path::new(id);
        if p.is_absolute() {
            return Ok(p.to_path_buf());
        }
        let norm = normalize_rel_path(id)?;
        Ok(self.root.join(Path::new(&norm)))
    }
}

impl AssetSource for FsAssetSource {
    fn fetch(&self, id: &str) -> PromoResult<Vec<u8>> {
        let p = self.path_for(id)?;
        std::fs::read(&p).map_err(|e| {
            PromoError::asset_unavailable(id, format!("failed to read '{}': {e}", p.display()))
        })
    }
}

/// In-memory source, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssetSource {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, bytes: Vec<u8>) -> &mut Self {
        self.entries.insert(id.into(), bytes);
        self
    }
}

impl AssetSource for MemoryAssetSource {
    fn fetch(&self, id: &str) -> PromoResult<Vec<u8>> {
        self.entries
            .get(id)
            .cloned()
            .ok_or_else(|| PromoError::asset_unavailable(id, "not present in memory source"))
    }
}

fn is_remote_id(id: &str) -> bool {
    let lower = id.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("data:")
}

/// Normalize and validate assets-root-relative paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects parent
/// traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> PromoResult<String> {
    let s = source.replace('\\', "/");
    if s.is_empty() {
        return Err(PromoError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(PromoError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(PromoError::validation("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}
