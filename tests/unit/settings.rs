use std::collections::HashMap;

use super::*;

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

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |k| map.get(k).cloned()
}

#[test]
fn defaults_are_sequential_and_dark() {
    let s = EngineSettings::default();
    assert_eq!(s.assets_root, PathBuf::from("public"));
    assert_eq!(s.video_background().unwrap(), Rgba8::opaque(0x0d, 0x11, 0x17));
    let t = s.threading();
    assert!(!t.parallel && t.static_frame_elision);
    assert_eq!(t.chunk_size, 30);
}

#[test]
fn file_keeps_defaults_for_missing_keys() {
    let dir = temp_dir("settings_file");
    let path = dir.join("settings.json");
    std::fs::write(
        &path,
        r##"{ "assets_root": "/srv/assets", "fonts": { "mono": "/f/mono.otf" }, "video_background": "#000000" }"##,
    )
    .unwrap();
    let s = EngineSettings::load(&path).unwrap();
    assert_eq!(s.assets_root, PathBuf::from("/srv/assets"));
    assert_eq!(s.font_path(FontRole::Mono), Some(PathBuf::from("/f/mono.otf")));
    assert_eq!(s.video_background().unwrap(), Rgba8::opaque(0, 0, 0));
    assert_eq!(s.chunk_size, 30);
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = temp_dir("settings_unknown");
    let path = dir.join("settings.json");
    std::fs::write(&path, r#"{ "asset_root": "typo" }"#).unwrap();
    assert!(matches!(
        EngineSettings::load(&path),
        Err(PromoError::Serde(_))
    ));
}

#[test]
fn environment_overrides_file_values() {
    let s = EngineSettings::default().with_env(env(&[
        (ENV_ASSETS_DIR, "/opt/promo"),
        (ENV_FONTS_DIR, "/opt/fonts"),
        (ENV_THREADS, "4"),
    ]));
    assert_eq!(s.assets_root, PathBuf::from("/opt/promo"));
    assert_eq!(s.fonts.dir, Some(PathBuf::from("/opt/fonts")));
    assert!(s.parallel);
    assert_eq!(s.threads, Some(4));

    let s = EngineSettings::default().with_env(env(&[(ENV_THREADS, "0"), (ENV_ASSETS_DIR, "")]));
    assert!(!s.parallel);
    assert_eq!(s.assets_root, PathBuf::from("public"));
}

#[test]
fn fonts_dir_is_searched_by_role_name() {
    let dir = temp_dir("settings_fonts");
    std::fs::write(dir.join("ui-medium.otf"), b"not a font").unwrap();
    let s = EngineSettings {
        fonts: FontPaths {
            dir: Some(dir.clone()),
            ..FontPaths::default()
        },
        ..EngineSettings::default()
    };
    assert_eq!(s.font_path(FontRole::UiMedium), Some(dir.join("ui-medium.otf")));
    assert_eq!(s.font_path(FontRole::Display), None);

    // Unparseable and missing fonts both fall back to measuring without a face.
    let ts = s.build_typesetter();
    assert!(FontRole::ALL.iter().all(|r| !ts.has_font(*r)));
}
