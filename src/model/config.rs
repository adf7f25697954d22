//! The editable design: what the card says and which models it shows.
//!
//! [`AssetConfig`] is replaced wholesale on every edit. The `with_*` methods are the editing
//! boundary: they return a new value and apply the character limits, so the compositor never
//! has to.

use crate::foundation::error::{PromoError, PromoResult};
use crate::model::catalog::{BadgeType, ProductType, Provider};

/// Soft limit for the announcement headline.
pub const SOCIAL_COPY_LIMIT: usize = 60;
/// Soft limit for a model display name.
pub const MODEL_NAME_LIMIT: usize = 30;

/// Which composed image is being produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Social,
    Header,
}

impl AssetKind {
    /// Default download name for a static export.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Social => "github-copilot-social-card.png",
            Self::Header => "github-copilot-header.png",
        }
    }
}

/// Number of highlighted model rows; selects one of three fixed layouts.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum HeroCount {
    One = 1,
    Two = 2,
    Three = 3,
}

impl HeroCount {
    pub const ALL: [HeroCount; 3] = [HeroCount::One, HeroCount::Two, HeroCount::Three];

    pub fn get(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for HeroCount {
    type Error = PromoError;

    fn try_from(v: u8) -> PromoResult<Self> {
        match v {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            _ => Err(PromoError::validation(format!(
                "heroCount must be 1, 2 or 3 (got {v})"
            ))),
        }
    }
}

impl From<HeroCount> for u8 {
    fn from(v: HeroCount) -> Self {
        v as u8
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ModelConfig {
    pub name: String,
    pub provider: Provider,
}

impl ModelConfig {
    pub fn new(name: impl Into<String>, provider: Provider) -> Self {
        Self {
            name: name.into(),
            provider,
        }
    }
}

/// Background image choice. A custom background always carries its URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Background {
    #[default]
    Default,
    Custom {
        url: String,
    },
}

impl Background {
    /// Build from the loose `(source, url)` pair used on the wire.
    ///
    /// `custom` without a (non-empty) URL is the default background.
    pub fn from_parts(source: BackgroundSource, url: Option<String>) -> Self {
        match (source, url) {
            (BackgroundSource::Custom, Some(url)) if !url.trim().is_empty() => {
                Self::Custom { url }
            }
            _ => Self::Default,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    pub fn source(&self) -> BackgroundSource {
        match self {
            Self::Default => BackgroundSource::Default,
            Self::Custom { .. } => BackgroundSource::Custom,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundSource {
    Default,
    Custom,
}

/// Editor field that may carry a focus highlight on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FocusedField {
    SocialCopy,
    HeroModel1,
    HeroModel2,
    HeroModel3,
    OtherModel1,
    OtherModel2,
}

/// One of the five model slots held by [`AssetConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelSlot {
    Hero1,
    Hero2,
    Hero3,
    Other1,
    Other2,
}

impl ModelSlot {
    pub fn field(self) -> FocusedField {
        match self {
            Self::Hero1 => FocusedField::HeroModel1,
            Self::Hero2 => FocusedField::HeroModel2,
            Self::Hero3 => FocusedField::HeroModel3,
            Self::Other1 => FocusedField::OtherModel1,
            Self::Other2 => FocusedField::OtherModel2,
        }
    }

    pub fn is_hero(self) -> bool {
        matches!(self, Self::Hero1 | Self::Hero2 | Self::Hero3)
    }
}

/// Root configuration of a design.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "AssetConfigWire", into = "AssetConfigWire")]
pub struct AssetConfig {
    pub social_copy: String,
    pub hero_count: HeroCount,
    pub hero_models: [ModelConfig; 3],
    pub other_models: [ModelConfig; 2],
    pub background: Background,
    pub badge: BadgeType,
    pub product: ProductType,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            social_copy: "GPT-5.2-Codex now available in GitHub Copilot".to_string(),
            hero_count: HeroCount::One,
            hero_models: [
                ModelConfig::new("GPT-5.2-Codex", Provider::Openai),
                ModelConfig::new("GPT-5.2", Provider::Openai),
                ModelConfig::new("GPT-5.2-Mini", Provider::Openai),
            ],
            other_models: [
                ModelConfig::new("Gemini 3 Pro (Preview)", Provider::Google),
                ModelConfig::new("Claude Opus 4.5", Provider::Anthropic),
            ],
            background: Background::Default,
            badge: BadgeType::NewRelease,
            product: ProductType::Github,
        }
    }
}

impl AssetConfig {
    pub fn model(&self, slot: ModelSlot) -> &ModelConfig {
        match slot {
            ModelSlot::Hero1 => &self.hero_models[0],
            ModelSlot::Hero2 => &self.hero_models[1],
            ModelSlot::Hero3 => &self.hero_models[2],
            ModelSlot::Other1 => &self.other_models[0],
            ModelSlot::Other2 => &self.other_models[1],
        }
    }

    /// Replace the headline, truncated to [`SOCIAL_COPY_LIMIT`] characters.
    pub fn with_social_copy(&self, text: &str) -> Self {
        Self {
            social_copy: truncate_chars(text, SOCIAL_COPY_LIMIT),
            ..self.clone()
        }
    }

    /// Replace one model slot; the name is truncated to [`MODEL_NAME_LIMIT`] characters.
    pub fn with_model(&self, slot: ModelSlot, model: ModelConfig) -> Self {
        let mut next = self.clone();
        let model = ModelConfig {
            name: truncate_chars(&model.name, MODEL_NAME_LIMIT),
            provider: model.provider,
        };
        match slot {
            ModelSlot::Hero1 => next.hero_models[0] = model,
            ModelSlot::Hero2 => next.hero_models[1] = model,
            ModelSlot::Hero3 => next.hero_models[2] = model,
            ModelSlot::Other1 => next.other_models[0] = model,
            ModelSlot::Other2 => next.other_models[1] = model,
        }
        next
    }

    pub fn with_hero_count(&self, hero_count: HeroCount) -> Self {
        Self {
            hero_count,
            ..self.clone()
        }
    }

    pub fn with_background(&self, background: Background) -> Self {
        Self {
            background,
            ..self.clone()
        }
    }

    pub fn with_badge(&self, badge: BadgeType) -> Self {
        Self {
            badge,
            ..self.clone()
        }
    }

    pub fn with_product(&self, product: ProductType) -> Self {
        Self {
            product,
            ..self.clone()
        }
    }

    /// Parse a design from its JSON wire form.
    pub fn from_json(json: &str) -> PromoResult<Self> {
        serde_json::from_str(json).map_err(|e| PromoError::serde(format!("asset config: {e}")))
    }

    pub fn to_json_pretty(&self) -> PromoResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PromoError::serde(format!("asset config: {e}")))
    }
}

fn truncate_chars(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}

/// Wire shape: flat camelCase object with a loose background pair.
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetConfigWire {
    social_copy: String,
    hero_count: HeroCount,
    hero_model1: ModelConfig,
    hero_model2: ModelConfig,
    hero_model3: ModelConfig,
    other_model1: ModelConfig,
    other_model2: ModelConfig,
    background_source: BackgroundSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_background_url: Option<String>,
    badge_type: BadgeType,
    product_type: ProductType,
}

impl From<AssetConfigWire> for AssetConfig {
    fn from(w: AssetConfigWire) -> Self {
        Self {
            social_copy: w.social_copy,
            hero_count: w.hero_count,
            hero_models: [w.hero_model1, w.hero_model2, w.hero_model3],
            other_models: [w.other_model1, w.other_model2],
            background: Background::from_parts(w.background_source, w.custom_background_url),
            badge: w.badge_type,
            product: w.product_type,
        }
    }
}

impl From<AssetConfig> for AssetConfigWire {
    fn from(c: AssetConfig) -> Self {
        let background_source = c.background.source();
        let custom_background_url = match c.background {
            Background::Custom { url } => Some(url),
            Background::Default => None,
        };
        let [hero_model1, hero_model2, hero_model3] = c.hero_models;
        let [other_model1, other_model2] = c.other_models;
        Self {
            social_copy: c.social_copy,
            hero_count: c.hero_count,
            hero_model1,
            hero_model2,
            hero_model3,
            other_model1,
            other_model2,
            background_source,
            custom_background_url,
            badge_type: c.badge,
            product_type: c.product,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/config.rs"]
mod tests;
