//! Vocaroo provider implementation.
//!
//! Clips are downloaded as MP3 from the media host, which rejects requests
//! without a `Referer` from the main site.

mod descriptor;
mod strategies;

pub use descriptor::{VOCAROO_HOSTS, vocaroo_descriptor};
pub use strategies::{MEDIA_BASE, VocarooDownloadStrategy, clip_id};
