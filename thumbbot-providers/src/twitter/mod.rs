//! Microblog provider implementation.
//!
//! Posts are resolved through two public embed APIs: FxTwitter first,
//! VxTwitter when FxTwitter fails for any reason. Both take the post path
//! (`/<user>/status/<id>`) unchanged.

mod descriptor;
pub mod fxtwitter;
mod strategies;
pub mod vxtwitter;

pub use descriptor::{TWITTER_HOSTS, twitter_descriptor};
pub use fxtwitter::{best_media, parse_fxtwitter_response};
pub use strategies::{FxTwitterApiStrategy, VxTwitterApiStrategy};
pub use vxtwitter::parse_vxtwitter_response;
