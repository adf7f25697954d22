use super::*;

const FAST: PollOptions = PollOptions {
    max_attempts: 5,
    interval: Duration::ZERO,
};

#[test]
fn request_serializes_snake_case_with_defaults() {
    let req = GenerateRequest::new("dark waves").with_style_preset("cyber-grid");
    let json: serde_json::Value = serde_json::to_value(&req).unwrap();
    assert_eq!(json["negative_prompt"], DEFAULT_NEGATIVE_PROMPT);
    assert_eq!(json["width"], 2400);
    assert_eq!(json["height"], 1260);
    assert_eq!(json["style_preset"], "cyber-grid");

    let bare = serde_json::to_value(GenerateRequest::new("x")).unwrap();
    assert!(bare.get("style_preset").is_none());
}

#[test]
fn response_reads_provider_json() {
    let resp: GenerateResponse = serde_json::from_str(
        r#"{"id":"g1","status":"completed","image_url":"https://x/y.png"}"#,
    )
    .unwrap();
    assert_eq!(resp.status, GenerationStatus::Completed);
    assert_eq!(resp.image_url.as_deref(), Some("https://x/y.png"));
    assert!(resp.error.is_none());
}

#[test]
fn presets_are_addressable_by_id() {
    assert_eq!(STYLE_PRESETS.len(), 5);
    assert_eq!(style_preset("dark-nebula").map(|p| p.name), Some("Dark Nebula"));
    assert!(style_preset("sepia").is_none());
}

#[test]
fn blank_prompt_is_rejected_before_submitting() {
    let provider = MockProvider::new();
    let err = generate_background(&provider, &GenerateRequest::new("   "), FAST).unwrap_err();
    assert_eq!(err.to_string(), "generation error: Please enter a prompt");
    assert_eq!(provider.poll_count(), 0);
}

#[test]
fn immediate_completion_skips_polling() {
    let provider = MockProvider::new().with_image_url("https://img/bg.png");
    let url = generate_background(&provider, &GenerateRequest::new(DEFAULT_PROMPT), FAST).unwrap();
    assert_eq!(url, "https://img/bg.png");
    assert_eq!(provider.poll_count(), 0);
}

#[test]
fn pending_generation_is_polled_until_done() {
    let provider = MockProvider::new().with_pending_polls(3);
    let url = generate_background(&provider, &GenerateRequest::new("nebula"), FAST).unwrap();
    assert_eq!(url, MOCK_IMAGE_URL);
    assert_eq!(provider.poll_count(), 4);
}

#[test]
fn never_finishing_times_out() {
    let provider = MockProvider::new().with_pending_polls(100);
    let err = generate_background(&provider, &GenerateRequest::new("nebula"), FAST).unwrap_err();
    assert!(matches!(err, PromoError::Generation(_)));
    assert!(err.to_string().ends_with("Generation timeout - please try again"));
    assert_eq!(provider.poll_count(), 5);
}

#[test]
fn failure_reports_provider_message_or_generic() {
    let provider = MockProvider::new().failing("quota exceeded");
    let err = generate_background(&provider, &GenerateRequest::new("a"), FAST).unwrap_err();
    assert!(err.to_string().ends_with("quota exceeded"));

    let provider = MockProvider::new().with_pending_polls(1).failing("");
    let err = generate_background(&provider, &GenerateRequest::new("a"), FAST).unwrap_err();
    assert!(err.to_string().ends_with("Generation failed"));
}

#[test]
fn applying_sets_custom_background_only() {
    let base = AssetConfig::default();
    let next = apply_generated(&base, "https://img/bg.png");
    assert_eq!(
        next.background,
        Background::Custom {
            url: "https://img/bg.png".to_string()
        }
    );
    assert_eq!(next.with_background(Background::Default), base);
}
