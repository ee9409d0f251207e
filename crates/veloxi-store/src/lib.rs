//! Result store client for persisted mesh records.
//!
//! This crate provides:
//! - The `ResultStore` contract the worker persists through
//! - A REST implementation against the platform's internal mesh API
//! - Typed update/record payloads for mesh results and textures

pub mod client;
pub mod error;
pub mod store;
pub mod types;

pub use client::{MeshApiConfig, MeshApiStore};
pub use error::{StoreError, StoreResult};
pub use store::ResultStore;
pub use types::{MeshCompletion, MeshRecord, NewTexture};
