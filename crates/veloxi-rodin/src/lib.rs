//! Client for the fal.ai Hyper3D Rodin generation queue.
//!
//! This crate provides:
//! - A typed reqwest client for the queue result endpoint
//! - Structured error kinds separating "job still running" from real
//!   failures, so callers never classify by message substrings
//! - The `GenerationJobClient` contract the task processor polls through

pub mod client;
pub mod error;
pub mod types;

pub use client::{GenerationJobClient, RodinClient, RodinConfig};
pub use error::{RodinError, RodinResult};
pub use types::{GenerationResult, MeshAsset, TextureAsset};
