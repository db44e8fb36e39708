//! Instagram provider implementation.
//!
//! Posts and reels are read from the private GraphQL endpoint the web client
//! uses. Every call needs an anti-forgery token scraped from the landing
//! page, cached for ten minutes in a [`CsrfCache`].
//!
//! ## Flow
//!
//! 1. Reject story links.
//! 2. Follow `/share/` redirects to the real post.
//! 3. Extract the shortcode after `p`, `reel`, `tv` or `reels`.
//! 4. POST the persisted query with the token; on 429/403 drop the token,
//!    back off and retry.

mod api;
mod csrf;
mod descriptor;
mod error;
pub(crate) mod parser;
mod shortcode;
mod strategies;

pub use api::{DOC_ID, GRAPHQL_URL, InstagramApiClient, browser_headers, graphql_headers};
pub use csrf::{CSRF_TTL, CsrfCache, LANDING_URL, token_from_set_cookie};
pub use descriptor::{INSTAGRAM_HOSTS, instagram_descriptor};
pub use error::CsrfError;
pub use parser::parse_graphql_response;
pub use shortcode::{extract_shortcode, is_share_link, is_story};
pub use strategies::InstagramGraphQlStrategy;
