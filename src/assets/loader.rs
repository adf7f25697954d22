//! Memoizing image loader.
//!
//! One [`AssetLoader`] is constructed per process and injected into whoever renders. Each id owns
//! a write-once slot; the first caller to reach a slot performs the fetch and decode, everybody
//! else waits on (or observes) that single result. Slots are never evicted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use rayon::prelude::*;

use crate::assets::decode::{PreparedImage, decode_asset};
use crate::assets::source::{AssetSource, FsAssetSource};

/// Observable load state of one id.
#[derive(Clone, Debug)]
pub enum LoadState {
    /// Not requested yet, or still loading.
    Pending,
    Ready(Arc<PreparedImage>),
    /// Failed permanently; the reason is kept for diagnostics.
    Failed(String),
}

type Outcome = Result<Arc<PreparedImage>, String>;

#[derive(Default)]
struct Slot {
    cell: OnceLock<Outcome>,
    fetches: AtomicUsize,
}

impl Slot {
    fn load(&self, id: &str, source: &dyn AssetSource) -> &Outcome {
        self.cell.get_or_init(|| {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let out = source
                .fetch(id)
                .and_then(|bytes| decode_asset(id, &bytes))
                .map(Arc::new)
                .map_err(|e| e.to_string());
            match &out {
                Ok(img) => tracing::debug!(id, w = img.width, h = img.height, "asset loaded"),
                Err(reason) => tracing::warn!(id, %reason, "asset unavailable"),
            }
            out
        })
    }
}

/// Resolved images keyed by id. Missing ids are simply absent.
#[derive(Clone, Debug, Default)]
pub struct ImageSet {
    images: HashMap<String, Arc<PreparedImage>>,
}

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&PreparedImage> {
        self.images.get(id).map(Arc::as_ref)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.images.contains_key(id)
    }

    pub fn insert(&mut self, id: impl Into<String>, image: PreparedImage) {
        self.images.insert(id.into(), Arc::new(image));
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }
}

/// Process-wide image cache with background loading.
pub struct AssetLoader {
    source: Arc<dyn AssetSource>,
    slots: Mutex<HashMap<String, Arc<Slot>>>,
}

impl AssetLoader {
    pub fn new(source: impl AssetSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Loader reading from an assets directory.
    pub fn from_dir(root: impl Into<std::path::PathBuf>) -> Self {
        Self::new(FsAssetSource::new(root))
    }

    fn slot(&self, id: &str) -> Arc<Slot> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(id.to_string()).or_default())
    }

    fn existing_slot(&self, id: &str) -> Option<Arc<Slot>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(id).cloned()
    }

    /// Start loading `ids` in the background and return immediately.
    ///
    /// Ids that are already loaded or in flight are not fetched again.
    pub fn request(&self, ids: &[String]) {
        for id in ids {
            let slot = self.slot(id);
            if slot.cell.get().is_some() {
                continue;
            }
            let source = Arc::clone(&self.source);
            let id = id.clone();
            rayon::spawn(move || {
                slot.load(&id, source.as_ref());
            });
        }
    }

    pub fn state(&self, id: &str) -> LoadState {
        match self.existing_slot(id).as_deref().and_then(|s| s.cell.get()) {
            None => LoadState::Pending,
            Some(Ok(img)) => LoadState::Ready(Arc::clone(img)),
            Some(Err(reason)) => LoadState::Failed(reason.clone()),
        }
    }

    /// Synchronous view of whatever has finished loading. Never blocks on a fetch.
    pub fn snapshot(&self, ids: &[String]) -> ImageSet {
        let mut out = ImageSet::new();
        for id in ids {
            if let LoadState::Ready(img) = self.state(id) {
                out.images.insert(id.clone(), img);
            }
        }
        out
    }

    /// Load every id (in parallel) and wait for all of them.
    ///
    /// A failed id is logged and left out of the result; it never prevents the others from
    /// resolving.
    #[tracing::instrument(skip(self, ids), fields(count = ids.len()))]
    pub fn resolve(&self, ids: &[String]) -> ImageSet {
        let slots: Vec<(String, Arc<Slot>)> =
            ids.iter().map(|id| (id.clone(), self.slot(id))).collect();
        let source = self.source.as_ref();
        let loaded: Vec<(String, Arc<PreparedImage>)> = slots
            .par_iter()
            .filter_map(|(id, slot)| match slot.load(id, source) {
                Ok(img) => Some((id.clone(), Arc::clone(img))),
                Err(_) => None,
            })
            .collect();
        ImageSet {
            images: loaded.into_iter().collect(),
        }
    }

    /// How many times `id` has been fetched. Stays at most 1 for the life of the loader.
    pub fn load_count(&self, id: &str) -> usize {
        self.existing_slot(id)
            .map(|s| s.fetches.load(Ordering::SeqCst))
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for AssetLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("AssetLoader").field("slots", &n).finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
