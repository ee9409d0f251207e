//! Wire types for the Rodin queue result endpoint.

use serde::{Deserialize, Serialize};

/// Result payload of a finished Rodin generation job.
///
/// Unknown fields are ignored; the worker only consumes the mesh URL and
/// the texture list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    /// The produced 3D model file
    pub model_mesh: MeshAsset,

    /// PBR texture files, possibly empty
    #[serde(default)]
    pub textures: Vec<TextureAsset>,
}

/// Remote reference to the generated mesh file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshAsset {
    /// Download URL
    pub url: String,

    /// Original file name, when the API reports one
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Remote reference to a generated texture file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureAsset {
    /// Download URL
    pub url: String,

    /// File name used as the local naming suffix
    pub file_name: String,
}
