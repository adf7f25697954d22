//! Pure mapping from semantic choices to asset ids.
//!
//! Ids are asset-root-relative paths (`logos/OpenAi.png`) or, for a custom background, the URL
//! exactly as the user supplied it. Nothing here touches the filesystem.

use crate::layout::table::{descriptor, layout};
use crate::model::catalog::{ProductType, Provider};
use crate::model::config::{AssetConfig, AssetKind, Background, HeroCount};

pub const CURSOR_FILE: &str = "Cursor.png";
pub const CHEVRON_FILE: &str = "dropdown-chevron.svg";

pub fn overlay_path(file: &str) -> String {
    format!("overlays/{file}")
}

pub fn background_path(file: &str) -> String {
    format!("backgrounds/{file}")
}

pub fn icon_path(file: &str) -> String {
    format!("icons/{file}")
}

pub fn provider_logo(provider: Provider) -> String {
    format!("logos/{}", provider.logo_file())
}

pub fn product_logo(product: ProductType) -> String {
    format!("logos/{}", product.logo_file())
}

/// The default background id for an asset type.
pub fn default_background_id(kind: AssetKind) -> String {
    background_path(descriptor(kind).default_background)
}

/// The background id actually drawn for `config`.
pub fn background_id(kind: AssetKind, background: &Background) -> String {
    match background {
        Background::Custom { url } => url.clone(),
        Background::Default => default_background_id(kind),
    }
}

pub fn overlay_id(kind: AssetKind, hero_count: HeroCount) -> String {
    overlay_path(layout(kind, hero_count).overlay)
}

pub fn cursor_id() -> String {
    overlay_path(CURSOR_FILE)
}

pub fn chevron_id() -> String {
    icon_path(CHEVRON_FILE)
}

/// Every id needed to render `config` as `kind`, in a stable order.
///
/// Order: background, overlay, cursor, chevron, five provider logos (hero1..3, other1, other2),
/// then the product logo for the social card. Duplicates are kept so the list length depends
/// only on `kind`; treat the list as the dependency set for loading.
pub fn image_sources(kind: AssetKind, config: &AssetConfig) -> Vec<String> {
    let mut ids = vec![
        background_id(kind, &config.background),
        overlay_id(kind, config.hero_count),
        cursor_id(),
        chevron_id(),
    ];
    ids.extend(
        config
            .hero_models
            .iter()
            .chain(config.other_models.iter())
            .map(|m| provider_logo(m.provider)),
    );
    if descriptor(kind).has_copy_layers {
        ids.push(product_logo(config.product));
    }
    ids
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolve.rs"]
mod tests;
