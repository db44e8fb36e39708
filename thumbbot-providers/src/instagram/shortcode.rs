//! Link shape helpers: stories, share links and shortcode extraction.

use thumbbot_fetch::FetchError;
use url::Url;

/// Path segments that precede a shortcode.
const SHORTCODE_MARKERS: &[&str] = &["p", "reel", "tv", "reels"];

/// Returns true for story links, which the GraphQL document cannot serve.
pub fn is_story(url: &Url) -> bool {
    url.path().contains("/stories")
}

/// Returns true for share links that redirect to the real post.
pub fn is_share_link(url: &Url) -> bool {
    url.path().contains("/share")
}

/// Extracts the shortcode from a post URL or path.
///
/// The shortcode is the segment right after the first `p`, `reel`, `tv` or
/// `reels` segment.
pub fn extract_shortcode(link: &str) -> Result<String, FetchError> {
    let parts: Vec<&str> = link.split('/').collect();

    parts
        .iter()
        .position(|part| SHORTCODE_MARKERS.contains(part))
        .and_then(|i| parts.get(i + 1))
        .filter(|code| !code.is_empty())
        .map(|code| (*code).to_string())
        .ok_or_else(|| FetchError::ShortcodeNotFound(link.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_shortcode() {
        assert_eq!(extract_shortcode("https://instagram.com/reel/ABC123/").unwrap(), "ABC123");
        assert_eq!(extract_shortcode("/p/Cx9_zz/").unwrap(), "Cx9_zz");
        assert_eq!(extract_shortcode("/tv/TV1").unwrap(), "TV1");
        assert_eq!(extract_shortcode("/someone/reels/R2/").unwrap(), "R2");
    }

    #[test]
    fn test_shortcode_not_found() {
        assert!(matches!(
            extract_shortcode("https://instagram.com/someone/"),
            Err(FetchError::ShortcodeNotFound(_))
        ));
        assert!(extract_shortcode("/p/").is_err());
        assert!(extract_shortcode("/p").is_err());
    }

    #[test]
    fn test_link_shapes() {
        let story = Url::parse("https://www.instagram.com/stories/someone/123/").unwrap();
        assert!(is_story(&story));

        let share = Url::parse("https://www.instagram.com/share/reel/BAxyz/").unwrap();
        assert!(is_share_link(&share));
        assert!(!is_story(&share));
    }
}
