//! Link classification with short-link expansion.

use thumbbot_core::ProviderKind;
use thumbbot_fetch::{FetchError, HttpClient};
use tracing::{debug, instrument};
use url::Url;

use crate::links::strip_query;
use crate::registry::classify_host;

/// Host of the microblog link shortener.
pub const SHORTENER_HOST: &str = "t.co";

/// A link mapped to the provider that handles it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    /// The link after short-link expansion, query stripped.
    pub url: Url,
    /// The link after short-link expansion, query intact.
    pub link: Url,
    /// Provider kind chosen by host.
    pub kind: ProviderKind,
}

/// Parses and classifies a raw link.
///
/// Hosts are matched exactly as written, so `X.com` is not `x.com`.
/// Shortener links are expanded first with a HEAD request that does not
/// follow redirects. No other host causes network traffic.
#[instrument(skip(http))]
pub async fn classify(link: &str, http: &HttpClient) -> Result<Option<Classified>, FetchError> {
    let mut url = Url::parse(link)?;
    if written_host(link).is_some_and(|host| url.host_str() != Some(host)) {
        debug!("Host differs from its parsed form");
        return Ok(None);
    }

    if url.host_str() == Some(SHORTENER_HOST) {
        url = expand_short_link(http, &url).await?;
        debug!(expanded = %url, "Expanded short link");
    }

    Ok(classify_host(&url).map(|kind| Classified {
        url: strip_query(&url),
        link: url,
        kind,
    }))
}

/// Reads the redirect target of a short link without following it.
pub async fn expand_short_link(http: &HttpClient, url: &Url) -> Result<Url, FetchError> {
    let location = http.head_location(url.as_str()).await?;
    // Location may be relative to the short link.
    Ok(url.join(&location)?)
}

/// Host of `link` as written; the URL parser lowercases it.
fn written_host(link: &str) -> Option<&str> {
    let (_, rest) = link.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    Some(match host_port.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => host_port,
    })
}
