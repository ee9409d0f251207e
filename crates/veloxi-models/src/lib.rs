//! Shared data models for the Veloxi mesh backend.
//!
//! This crate provides Serde-serializable types for:
//! - Task identity and lifecycle phases
//! - Terminal mesh states persisted by the result store
//! - Progress message schemas published per task
//! - Deterministic asset path and servable-URL derivation

pub mod assets;
pub mod message;
pub mod task;

// Re-export common types
pub use assets::{AssetLayout, LocalAsset};
pub use message::ProgressMessage;
pub use task::{MeshState, TaskId, TaskPhase};
