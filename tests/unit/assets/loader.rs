use std::io::Cursor;
use std::sync::atomic::AtomicUsize;
use std::time::Duration;

use super::*;
use crate::assets::source::MemoryAssetSource;
use crate::foundation::error::{PromoError, PromoResult};

fn png(px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba(px));
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

struct SlowSource {
    calls: Arc<AtomicUsize>,
}

impl AssetSource for SlowSource {
    fn fetch(&self, _id: &str) -> PromoResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(20));
        Ok(png([1, 2, 3, 255]))
    }
}

#[test]
fn resolve_skips_failures_and_keeps_the_rest() {
    let mut src = MemoryAssetSource::new();
    src.insert("a.png", png([255, 0, 0, 255]))
        .insert("broken.png", b"xx".to_vec());
    let loader = AssetLoader::new(src);
    let ids = vec![
        "a.png".to_string(),
        "missing.png".to_string(),
        "broken.png".to_string(),
    ];
    let set = loader.resolve(&ids);
    assert_eq!(set.len(), 1);
    assert!(set.contains("a.png"));
    assert!(matches!(loader.state("missing.png"), LoadState::Failed(_)));
    assert!(matches!(loader.state("broken.png"), LoadState::Failed(_)));
    assert!(matches!(loader.state("a.png"), LoadState::Ready(_)));
}

#[test]
fn concurrent_requests_share_one_load() {
    let calls = Arc::new(AtomicUsize::new(0));
    let loader = Arc::new(AssetLoader::new(SlowSource {
        calls: Arc::clone(&calls),
    }));
    let ids = vec!["same.png".to_string()];
    loader.request(&ids);
    loader.request(&ids);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let loader = Arc::clone(&loader);
            let ids = ids.clone();
            std::thread::spawn(move || loader.resolve(&ids).len())
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), 1);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(loader.load_count("same.png"), 1);
}

#[test]
fn snapshot_never_blocks_and_sees_finished_loads() {
    let mut src = MemoryAssetSource::new();
    src.insert("x.png", png([0, 0, 0, 255]));
    let loader = AssetLoader::new(src);
    let ids = vec!["x.png".to_string()];
    assert!(loader.snapshot(&ids).is_empty());
    assert!(matches!(loader.state("x.png"), LoadState::Pending));
    loader.resolve(&ids);
    assert_eq!(loader.snapshot(&ids).len(), 1);
    assert_eq!(loader.load_count("never-requested"), 0);
}

#[test]
fn failing_source_reports_reason() {
    struct Refuse;
    impl AssetSource for Refuse {
        fn fetch(&self, id: &str) -> PromoResult<Vec<u8>> {
            Err(PromoError::asset_unavailable(id, "offline"))
        }
    }
    let loader = AssetLoader::new(Refuse);
    loader.resolve(&["r.png".to_string()]);
    let LoadState::Failed(reason) = loader.state("r.png") else {
        panic!("expected failure");
    };
    assert!(reason.contains("offline"));
}
