//! Typed payloads exchanged with the mesh API.

use serde::{Deserialize, Serialize};

use veloxi_models::MeshState;

/// Fields written when a task completes successfully.
///
/// Field names follow the platform's mesh schema: the refine-stage model
/// and preview image columns.
#[derive(Debug, Clone, Serialize)]
pub struct MeshCompletion {
    /// Servable URL of the downloaded model file
    #[serde(rename = "modelGlbRefine")]
    pub model_url: String,

    /// Servable URL of the resolved preview image
    #[serde(rename = "refineImage")]
    pub preview_url: String,

    /// Terminal state, always `succeeded` for completions
    pub state: MeshState,
}

impl MeshCompletion {
    pub fn new(model_url: impl Into<String>, preview_url: impl Into<String>) -> Self {
        Self {
            model_url: model_url.into(),
            preview_url: preview_url.into(),
            state: MeshState::Succeeded,
        }
    }
}

/// Persisted mesh record as returned by update calls.
///
/// Only the internal identity is consumed; textures attach to it rather
/// than to the task id.
#[derive(Debug, Clone, Deserialize)]
pub struct MeshRecord {
    /// Internal result identity
    pub id: String,
}

/// Texture record attached to a mesh result.
#[derive(Debug, Clone, Serialize)]
pub struct NewTexture {
    /// Texture type tag
    #[serde(rename = "type")]
    pub kind: String,

    /// Servable URL of the downloaded texture
    pub url: String,
}

impl NewTexture {
    /// Create a PBR texture record.
    pub fn pbr(url: impl Into<String>) -> Self {
        Self {
            kind: "pbr_texture".to_string(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_field_names() {
        let completion = MeshCompletion::new("https://x/m.glb", "https://x/p.png");
        let json = serde_json::to_value(&completion).unwrap();

        assert_eq!(json["modelGlbRefine"], "https://x/m.glb");
        assert_eq!(json["refineImage"], "https://x/p.png");
        assert_eq!(json["state"], "succeeded");
    }

    #[test]
    fn test_pbr_texture_tag() {
        let tex = NewTexture::pbr("https://x/t.png");
        let json = serde_json::to_value(&tex).unwrap();
        assert_eq!(json["type"], "pbr_texture");
    }
}
