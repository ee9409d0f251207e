//! Headless renderer integration tests.

use std::time::Duration;

use veloxi_render::{HeadlessRenderer, RenderConfig, ThumbnailRenderer};

/// Sample GLB hosted by the model-viewer project.
const SAMPLE_MODEL_URL: &str =
    "https://modelviewer.dev/shared-assets/models/Astronaut.glb";

/// Test an end-to-end render of a known-good model.
#[tokio::test]
#[ignore = "requires Chromium and network access"]
async fn test_render_sample_model() {
    dotenvy::dotenv().ok();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("astronaut_thumb.png");

    let renderer = HeadlessRenderer::new(RenderConfig::from_env());
    renderer
        .render(SAMPLE_MODEL_URL, &output)
        .await
        .expect("Render failed");

    let bytes = std::fs::metadata(&output).expect("Thumbnail missing").len();
    assert!(bytes > 0, "Thumbnail is empty");
    println!("Rendered {} bytes to {}", bytes, output.display());
}

/// Test that the deadline bounds a render against an unreachable model.
#[tokio::test]
#[ignore = "requires Chromium"]
async fn test_render_unreachable_model_respects_deadline() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("thumb.png");

    let renderer = HeadlessRenderer::new(RenderConfig {
        deadline: Duration::from_secs(10),
        ..RenderConfig::default()
    });

    let started = std::time::Instant::now();
    let result = renderer
        .render("https://localhost:1/does-not-exist.glb", &output)
        .await;

    assert!(result.is_err());
    assert!(started.elapsed() < Duration::from_secs(30));
    assert!(!output.exists());
}
