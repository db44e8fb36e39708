// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Thumbbot Providers
//!
//! Platform adapters and the resolution coordinator.
//!
//! Each provider module includes:
//!
//! - **Descriptor**: Static configuration (metadata, host table, fetch plan)
//! - **Strategies**: Fetch strategy implementations
//! - **Parser**: Payload decoding into [`thumbbot_core::PostResult`]
//!
//! ## Supported Providers
//!
//! | Group | Hosts | Strategies |
//! |-------|-------|------------|
//! | X / Twitter | `x.com`, `twitter.com`, `t.co`, ... | FxTwitter API, VxTwitter API |
//! | Instagram | `instagram.com`, `www.instagram.com` | GraphQL scrape |
//! | YouTube | `youtube.com`, `youtu.be`, ... | oEmbed |
//! | Vocaroo | `vocaroo.com`, `voca.ro` | MP3 download |
//!
//! ## Usage
//!
//! ```ignore
//! use thumbbot_fetch::FetchContext;
//! use thumbbot_providers::Resolver;
//!
//! let resolver = Resolver::new(FetchContext::new());
//! if let Some(resolution) = resolver.resolve("look https://x.com/jack/status/20").await {
//!     println!("{:?}", resolution.content);
//! }
//! ```

pub mod classify;
mod decode;
pub mod descriptor;
pub mod links;
pub mod registry;
pub mod resolver;

// Provider modules (registry order)
pub mod twitter;
pub mod instagram;
pub mod youtube;
pub mod vocaroo;

// Re-export key types
pub use classify::{Classified, classify};
pub use descriptor::{FetchPlan, GroupMetadata, ProviderDescriptor, ProviderDescriptorBuilder};
pub use links::{extract_links, first_link, strip_query};
pub use registry::{ProviderRegistry, classify_host};
pub use resolver::{Resolution, Resolver};

// Re-export provider descriptors
pub use instagram::instagram_descriptor;
pub use twitter::twitter_descriptor;
pub use vocaroo::vocaroo_descriptor;
pub use youtube::youtube_descriptor;

// Re-export strategy types for convenience
pub use instagram::{CsrfCache, InstagramGraphQlStrategy};
pub use twitter::{FxTwitterApiStrategy, VxTwitterApiStrategy};
pub use vocaroo::VocarooDownloadStrategy;
pub use youtube::YouTubeOEmbedStrategy;
