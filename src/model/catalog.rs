use crate::foundation::core::Rgba8;

/// Model vendor shown with its logo in the model list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    Ai21,
    Anthropic,
    AzureOpenai,
    Bayer,
    BlackForestLabs,
    Bria,
    Cerence,
    Claude,
    Cohere,
    Databricks,
    Deci,
    Deepseek,
    Fidelity,
    Foundry,
    Google,
    Grok,
    Huggingface,
    Jais,
    Meta,
    Microsoft,
    Mistral,
    Nixtla,
    Nvidia,
    Openai,
    PaigeAi,
    Rockwell,
    Sdaia,
    SightMachine,
    Snowflake,
    Xai,
}

impl Provider {
    pub const ALL: [Provider; 30] = [
        Provider::Ai21,
        Provider::Anthropic,
        Provider::AzureOpenai,
        Provider::Bayer,
        Provider::BlackForestLabs,
        Provider::Bria,
        Provider::Cerence,
        Provider::Claude,
        Provider::Cohere,
        Provider::Databricks,
        Provider::Deci,
        Provider::Deepseek,
        Provider::Fidelity,
        Provider::Foundry,
        Provider::Google,
        Provider::Grok,
        Provider::Huggingface,
        Provider::Jais,
        Provider::Meta,
        Provider::Microsoft,
        Provider::Mistral,
        Provider::Nixtla,
        Provider::Nvidia,
        Provider::Openai,
        Provider::PaigeAi,
        Provider::Rockwell,
        Provider::Sdaia,
        Provider::SightMachine,
        Provider::Snowflake,
        Provider::Xai,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Ai21 => "AI21",
            Self::Anthropic => "Anthropic",
            Self::AzureOpenai => "Azure OpenAI",
            Self::Bayer => "Bayer",
            Self::BlackForestLabs => "Black Forest Labs",
            Self::Bria => "Bria",
            Self::Cerence => "Cerence",
            Self::Claude => "Claude",
            Self::Cohere => "Cohere",
            Self::Databricks => "Databricks",
            Self::Deci => "Deci",
            Self::Deepseek => "Deepseek",
            Self::Fidelity => "Fidelity",
            Self::Foundry => "Foundry",
            Self::Google => "Google",
            Self::Grok => "Grok",
            Self::Huggingface => "Hugging Face",
            Self::Jais => "JAIs",
            Self::Meta => "Meta",
            Self::Microsoft => "Microsoft",
            Self::Mistral => "Mistral",
            Self::Nixtla => "Nixtla",
            Self::Nvidia => "NVIDIA",
            Self::Openai => "OpenAI",
            Self::PaigeAi => "Paige AI",
            Self::Rockwell => "Rockwell",
            Self::Sdaia => "SDAIA",
            Self::SightMachine => "Sight Machine",
            Self::Snowflake => "Snowflake",
            Self::Xai => "xAI",
        }
    }

    /// Logo file name under the `logos/` asset directory.
    ///
    /// The first four names match files shipped with the original asset pack
    /// (including the `Antropic` spelling).
    pub fn logo_file(self) -> &'static str {
        match self {
            Self::Openai => "OpenAi.png",
            Self::Anthropic => "Antropic.png",
            Self::Google => "Google.png",
            Self::Xai => "xAi.png",
            Self::Ai21 => "AI21.png",
            Self::AzureOpenai => "AzureOpenAi.png",
            Self::Bayer => "Bayer.png",
            Self::BlackForestLabs => "BlackForestLabs.png",
            Self::Bria => "Bria.png",
            Self::Cerence => "Cerence.png",
            Self::Claude => "Claude.png",
            Self::Cohere => "Cohere.png",
            Self::Databricks => "Databricks.png",
            Self::Deci => "Deci.png",
            Self::Deepseek => "Deepseek.png",
            Self::Fidelity => "Fidelity.png",
            Self::Foundry => "Foundry.png",
            Self::Grok => "Grok.png",
            Self::Huggingface => "HuggingFace.png",
            Self::Jais => "Jais.png",
            Self::Meta => "Meta.png",
            Self::Microsoft => "Microsoft.png",
            Self::Mistral => "Mistral.png",
            Self::Nixtla => "Nixtla.png",
            Self::Nvidia => "Nvidia.png",
            Self::PaigeAi => "PaigeAi.png",
            Self::Rockwell => "Rockwell.png",
            Self::Sdaia => "Sdaia.png",
            Self::SightMachine => "SightMachine.png",
            Self::Snowflake => "Snowflake.png",
        }
    }
}

/// Status pill shown above the headline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeType {
    Preview,
    GenerallyAvailable,
    NewRelease,
    Deprecate,
}

impl BadgeType {
    pub const ALL: [BadgeType; 4] = [
        BadgeType::Preview,
        BadgeType::GenerallyAvailable,
        BadgeType::NewRelease,
        BadgeType::Deprecate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Preview => "PREVIEW",
            Self::GenerallyAvailable => "GENERALLY AVAILABLE",
            Self::NewRelease => "NEW RELEASE",
            Self::Deprecate => "DEPRECATE",
        }
    }

    pub fn color(self) -> Rgba8 {
        match self {
            Self::Preview => Rgba8::opaque(0xc9, 0xa4, 0x4a),
            Self::GenerallyAvailable | Self::NewRelease => Rgba8::opaque(0x6a, 0xbf, 0x7b),
            Self::Deprecate => Rgba8::opaque(0xd4, 0x80, 0x78),
        }
    }
}

/// Product whose logo and name sit in the top-left corner of the social card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductType {
    Github,
    MicrosoftFoundry,
}

impl ProductType {
    pub const ALL: [ProductType; 2] = [ProductType::Github, ProductType::MicrosoftFoundry];

    pub fn label(self) -> &'static str {
        match self {
            Self::Github => "GitHub",
            Self::MicrosoftFoundry => "Microsoft Foundry",
        }
    }

    /// Logo file name under the `logos/` asset directory.
    pub fn logo_file(self) -> &'static str {
        match self {
            Self::Github => "GitHub.png",
            Self::MicrosoftFoundry => "MicrosoftFoundry.png",
        }
    }

    /// The GitHub mark ships uncoloured and is recoloured white at draw time.
    pub fn tint_white(self) -> bool {
        matches!(self, Self::Github)
    }
}
