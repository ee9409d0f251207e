//! Viewer page construction.

use crate::config::RenderConfig;

/// Global the embedded script writes the viewer's load status into.
pub const STATUS_GLOBAL: &str = "window.__veloxiViewerStatus";

/// Build the minimal document embedding a model viewer for `model_url`.
///
/// The inline script mirrors the viewer's `load`/`error` events into a
/// status global so the renderer can poll for completion over CDP without
/// holding a promise open in the page.
pub fn viewer_page(model_url: &str, config: &RenderConfig) -> String {
    let (width, height) = config.viewport;
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Thumbnail Generator</title>
    <script type="module" src="{module_url}"></script>
    <style>
        body, html {{ margin: 0; padding: 0; overflow: hidden; }}
        model-viewer {{ width: {width}px; height: {height}px; }}
    </style>
</head>
<body>
    <model-viewer
        id="viewer"
        src="{model_url}"
        camera-controls
        auto-rotate
        ar
        shadow-intensity="1"
        camera-orbit="{camera_orbit}"
        exposure="{exposure}">
    </model-viewer>
    <script>
        const viewer = document.getElementById("viewer");
        {status} = "pending";
        viewer.addEventListener("error", (e) => {{
            const detail = e && e.detail ? JSON.stringify(e.detail) : "unknown";
            {status} = "error:" + detail;
        }}, {{ once: true }});
        viewer.addEventListener("load", () => {{
            {status} = "loaded";
        }}, {{ once: true }});
    </script>
</body>
</html>
"#,
        module_url = config.module_url,
        model_url = model_url,
        camera_orbit = config.camera_orbit,
        exposure = config.exposure,
        status = STATUS_GLOBAL,
    )
}
