//! Generated backgrounds: request/response types, the provider boundary, an in-process mock
//! provider and the polling contract.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::foundation::error::{PromoError, PromoResult};
use crate::model::config::{AssetConfig, Background};

pub const DEFAULT_PROMPT: &str = "abstract tech gradient background, dark theme, modern";
pub const DEFAULT_NEGATIVE_PROMPT: &str = "text, watermark, signature, blur";
pub const DEFAULT_WIDTH: u32 = 2400;
pub const DEFAULT_HEIGHT: u32 = 1260;

const MSG_EMPTY_PROMPT: &str = "Please enter a prompt";
const MSG_FAILED: &str = "Generation failed";
const MSG_TIMEOUT: &str = "Generation timeout - please try again";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StylePreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const STYLE_PRESETS: [StylePreset; 5] = [
    StylePreset {
        id: "tech-gradient",
        name: "Tech Gradient",
        description: "Modern gradient with tech vibes",
    },
    StylePreset {
        id: "abstract-geometric",
        name: "Abstract Geometric",
        description: "Sharp geometric shapes and patterns",
    },
    StylePreset {
        id: "dark-nebula",
        name: "Dark Nebula",
        description: "Deep space with colorful nebula clouds",
    },
    StylePreset {
        id: "cyber-grid",
        name: "Cyber Grid",
        description: "Futuristic grid and neon accents",
    },
    StylePreset {
        id: "minimal-blur",
        name: "Minimal Blur",
        description: "Soft blurred background with subtle colors",
    },
];

pub fn style_preset(id: &str) -> Option<&'static StylePreset> {
    STYLE_PRESETS.iter().find(|p| p.id == id)
}

/// Body of a generation request.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub negative_prompt: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_preset: Option<String>,
}

impl GenerateRequest {
    /// A social-card sized request with the default negative prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            negative_prompt: DEFAULT_NEGATIVE_PROMPT.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            style_preset: None,
        }
    }

    pub fn with_style_preset(mut self, id: impl Into<String>) -> Self {
        self.style_preset = Some(id.into());
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl GenerationStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenerateResponse {
    pub id: String,
    pub status: GenerationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// An image-generation service.
pub trait BackgroundProvider: Send + Sync {
    /// Submit `request`; the response may already be terminal.
    fn generate(&self, request: &GenerateRequest) -> PromoResult<GenerateResponse>;

    /// Current status of generation `id`.
    fn status(&self, id: &str) -> PromoResult<GenerateResponse>;
}

/// Polling cadence for [`poll_generation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollOptions {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval: Duration::from_secs(2),
        }
    }
}

/// Poll `id` until it completes or fails, sleeping `interval` between non-terminal checks.
pub fn poll_generation(
    provider: &dyn BackgroundProvider,
    id: &str,
    opts: PollOptions,
) -> PromoResult<GenerateResponse> {
    for attempt in 0..opts.max_attempts {
        let response = provider.status(id)?;
        if response.status.is_terminal() {
            tracing::debug!(id, attempt, status = ?response.status, "generation finished");
            return Ok(response);
        }
        std::thread::sleep(opts.interval);
    }
    tracing::warn!(id, attempts = opts.max_attempts, "generation timed out");
    Err(PromoError::generation(MSG_TIMEOUT))
}

/// Generate a background and return its image URL.
#[tracing::instrument(level = "info", skip(provider, request), fields(style = ?request.style_preset))]
pub fn generate_background(
    provider: &dyn BackgroundProvider,
    request: &GenerateRequest,
    opts: PollOptions,
) -> PromoResult<String> {
    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        return Err(PromoError::generation(MSG_EMPTY_PROMPT));
    }
    let request = GenerateRequest {
        prompt: prompt.to_string(),
        ..request.clone()
    };

    let mut response = provider.generate(&request)?;
    if !response.status.is_terminal() {
        response = poll_generation(provider, &response.id, opts)?;
    }
    match (response.status, response.image_url) {
        (GenerationStatus::Completed, Some(url)) => {
            tracing::info!(id = %response.id, %url, "background generated");
            Ok(url)
        }
        (_, _) => Err(PromoError::generation(
            response.error.unwrap_or_else(|| MSG_FAILED.to_string()),
        )),
    }
}

/// `config` with a generated image as its custom background.
pub fn apply_generated(config: &AssetConfig, url: impl Into<String>) -> AssetConfig {
    config.with_background(Background::Custom { url: url.into() })
}

/// In-process provider that never touches the network.
#[derive(Debug)]
pub struct MockProvider {
    image_url: String,
    pending_polls: usize,
    failure: Option<String>,
    submitted: AtomicUsize,
    polls: AtomicUsize,
}

pub const MOCK_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1634017839464-5c339ebe3cb4?w=2400&h=1260&fit=crop";

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            image_url: MOCK_IMAGE_URL.to_string(),
            pending_polls: 0,
            failure: None,
            submitted: AtomicUsize::new(0),
            polls: AtomicUsize::new(0),
        }
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completes with `url` instead of the stock image.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// Report `processing` for the first `n` status checks.
    pub fn with_pending_polls(mut self, n: usize) -> Self {
        self.pending_polls = n;
        self
    }

    /// Finish as failed; an empty message reports no error text.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn poll_count(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    fn finished(&self, id: &str) -> GenerateResponse {
        match &self.failure {
            Some(message) => GenerateResponse {
                id: id.to_string(),
                status: GenerationStatus::Failed,
                image_url: None,
                error: (!message.is_empty()).then(|| message.clone()),
            },
            None => GenerateResponse {
                id: id.to_string(),
                status: GenerationStatus::Completed,
                image_url: Some(self.image_url.clone()),
                error: None,
            },
        }
    }
}

impl BackgroundProvider for MockProvider {
    fn generate(&self, _request: &GenerateRequest) -> PromoResult<GenerateResponse> {
        let n = self.submitted.fetch_add(1, Ordering::SeqCst);
        let id = format!("mock-{n}");
        if self.pending_polls == 0 {
            return Ok(self.finished(&id));
        }
        Ok(GenerateResponse {
            id,
            status: GenerationStatus::Pending,
            image_url: None,
            error: None,
        })
    }

    fn status(&self, id: &str) -> PromoResult<GenerateResponse> {
        let seen = self.polls.fetch_add(1, Ordering::SeqCst);
        if seen < self.pending_polls {
            return Ok(GenerateResponse {
                id: id.to_string(),
                status: GenerationStatus::Processing,
                image_url: None,
                error: None,
            });
        }
        Ok(self.finished(id))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/mod.rs"]
mod tests;
