use super::*;
use crate::model::config::{ModelConfig, ModelSlot};

#[test]
fn social_sources_for_default_config() {
    let ids = image_sources(AssetKind::Social, &AssetConfig::default());
    assert_eq!(
        ids,
        vec![
            "backgrounds/Social_Background.jpg",
            "overlays/SocialBox.png",
            "overlays/Cursor.png",
            "icons/dropdown-chevron.svg",
            "logos/OpenAi.png",
            "logos/OpenAi.png",
            "logos/OpenAi.png",
            "logos/Google.png",
            "logos/Antropic.png",
            "logos/GitHub.png",
        ]
    );
}

#[test]
fn header_sources_skip_product_logo() {
    let config = AssetConfig::default().with_hero_count(HeroCount::Two);
    let ids = image_sources(AssetKind::Header, &config);
    assert_eq!(ids.len(), 9);
    assert_eq!(ids[0], "backgrounds/Header_Background.png");
    assert_eq!(ids[1], "overlays/HeaderBox_2.png");
}

#[test]
fn sources_follow_the_inputs() {
    let base = AssetConfig::default();
    let custom = base.with_background(Background::Custom {
        url: "/tmp/bg.png".to_string(),
    });
    assert_eq!(image_sources(AssetKind::Social, &custom)[0], "/tmp/bg.png");

    let swapped = base.with_model(
        ModelSlot::Other2,
        ModelConfig::new("Grok 5", Provider::Xai),
    );
    assert_eq!(image_sources(AssetKind::Social, &swapped)[8], "logos/xAi.png");

    let foundry = base.with_product(ProductType::MicrosoftFoundry);
    assert_eq!(
        image_sources(AssetKind::Social, &foundry)[9],
        "logos/MicrosoftFoundry.png"
    );

    // Name edits do not change the dependency set.
    let renamed = base.with_social_copy("Something else");
    assert_eq!(
        image_sources(AssetKind::Social, &renamed),
        image_sources(AssetKind::Social, &base)
    );
}
