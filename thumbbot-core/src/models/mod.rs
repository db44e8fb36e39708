//! Domain models for `thumbbot`.
//!
//! ## Submodules
//!
//! - [`provider`] - Provider kinds
//! - [`media`] - Media items and encoded variants
//! - [`post`] - Normalized posts, clips and resolved content

mod media;
mod post;
mod provider;

// Re-export everything at the models level
pub use media::{MediaItem, MediaKind, VariantCandidate};
pub use post::{ClipStream, PostResult, ResolvedContent};
pub use provider::ProviderKind;
