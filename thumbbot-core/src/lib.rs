// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `thumbbot` Core
//!
//! Core types and models for the `thumbbot` media resolution engine.
//!
//! This crate provides the foundational abstractions used across all other
//! `thumbbot` crates:
//!
//! - Domain models (providers, posts, media items)
//! - Error types
//!
//! ## Key Types
//!
//! ### Provider Types
//! - [`ProviderKind`] - Enum of all supported platform adapters
//!
//! ### Content Types
//! - [`PostResult`] - Normalized post returned by every post adapter
//! - [`MediaItem`] - A single photo or video attached to a post
//! - [`ClipStream`] - A buffered audio clip from a voice-clip host
//! - [`ResolvedContent`] - Either of the above
//! - [`VariantCandidate`] - One encoded quality of a video

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Provider types
    ProviderKind,
    // Content types
    ClipStream,
    MediaItem,
    MediaKind,
    PostResult,
    ResolvedContent,
    VariantCandidate,
};
