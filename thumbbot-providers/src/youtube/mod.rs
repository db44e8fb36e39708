//! YouTube provider implementation.
//!
//! Metadata comes from the public oEmbed endpoint. oEmbed carries no
//! description, so the watch page is fetched as well and scraped; that
//! second request never fails the resolution.

mod descriptor;
mod parser;
mod strategies;
mod video_id;

pub use descriptor::{YOUTUBE_HOSTS, youtube_descriptor};
pub use parser::{OEmbedResponse, decode_entities, parse_oembed_response, scrape_description};
pub use strategies::YouTubeOEmbedStrategy;
pub use video_id::{WATCH_URL, canonical_url, extract_video_id, is_valid_video_id};
