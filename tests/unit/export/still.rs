use super::*;
use crate::text::typeset::Typesetter;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "promocard_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn header_png_has_native_size_and_default_name() {
    let mut renderer = FrameRenderer::new(Typesetter::new());
    let config = AssetConfig::default()
        .with_hero_count(crate::model::config::HeroCount::Three);
    let out = export_png(&mut renderer, AssetKind::Header, &config, &ImageSet::new()).unwrap();
    assert_eq!((out.width, out.height), (2064, 826));
    assert_eq!(out.file_name, "github-copilot-header.png");

    let decoded = image::load_from_memory(&out.png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (2064, 826));
}

#[test]
fn save_into_directory_uses_default_name() {
    let dir = temp_dir("still_dir");
    let mut renderer = FrameRenderer::new(Typesetter::new());
    let path = save_still(
        &mut renderer,
        AssetKind::Social,
        &AssetConfig::default(),
        &ImageSet::new(),
        &dir,
    )
    .unwrap();
    assert_eq!(path, dir.join("github-copilot-social-card.png"));
    let decoded = image::open(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (2400, 1260));
}
