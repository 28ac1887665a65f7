//! Letterfall Core - Foundational types for the Letterfall sandbox
//!
//! This crate provides the core types that all other Letterfall crates depend on:
//! - `LetterId` - Stable identifiers for spawned letters
//! - `Vec2`, `Color`, `BodyTransform` - Planar value types
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{LetterfallError, Result};
pub use id::LetterId;
pub use types::{BodyTransform, Color, Vec2};
