//! Provider registry for managing all provider descriptors.
//!
//! The registry provides static access to all provider group configurations
//! and is the central point for host classification.

use std::collections::HashMap;
use std::sync::OnceLock;
use thumbbot_core::ProviderKind;
use url::Url;

use crate::descriptor::ProviderDescriptor;
use crate::instagram::instagram_descriptor;
use crate::twitter::twitter_descriptor;
use crate::vocaroo::vocaroo_descriptor;
use crate::youtube::youtube_descriptor;

// ============================================================================
// Static Registry
// ============================================================================

/// Static storage for all provider descriptors.
static DESCRIPTORS: OnceLock<Vec<ProviderDescriptor>> = OnceLock::new();

/// Static storage for CLI name to provider kind mapping.
static CLI_NAME_MAP: OnceLock<HashMap<&'static str, ProviderKind>> = OnceLock::new();

/// Initializes all provider descriptors in resolution order.
fn init_descriptors() -> Vec<ProviderDescriptor> {
    vec![
        twitter_descriptor(),
        instagram_descriptor(),
        youtube_descriptor(),
        vocaroo_descriptor(),
    ]
}

/// Builds the CLI name to provider kind mapping.
fn build_cli_name_map(descriptors: &[ProviderDescriptor]) -> HashMap<&'static str, ProviderKind> {
    let mut map = HashMap::new();

    for desc in descriptors {
        map.insert(desc.metadata.cli_name, desc.id);
        for kind in desc.kinds {
            map.insert(kind.cli_name(), desc.id);
        }
    }

    map
}

// ============================================================================
// Provider Registry
// ============================================================================

/// Global registry of all provider group descriptors.
///
/// The registry is initialized lazily on first access; groups keep the fixed
/// order microblog, photo, video, voice.
pub struct ProviderRegistry;

impl ProviderRegistry {
    /// Returns all provider descriptors.
    pub fn all() -> &'static [ProviderDescriptor] {
        DESCRIPTORS.get_or_init(init_descriptors)
    }

    /// Gets the descriptor of the group that produces `id`.
    pub fn get(id: ProviderKind) -> Option<&'static ProviderDescriptor> {
        Self::all().iter().find(|d| d.handles(id))
    }

    /// Returns the CLI name to provider kind mapping.
    pub fn cli_name_map() -> &'static HashMap<&'static str, ProviderKind> {
        CLI_NAME_MAP.get_or_init(|| build_cli_name_map(Self::all()))
    }

    /// Looks up a group by CLI name.
    pub fn get_by_cli_name(name: &str) -> Option<&'static ProviderDescriptor> {
        let kind = Self::cli_name_map().get(name)?;
        Self::get(*kind)
    }

    /// Returns the number of registered groups.
    pub fn count() -> usize {
        Self::all().len()
    }

    /// Returns the primary kind of each group, in order.
    pub fn kinds() -> Vec<ProviderKind> {
        Self::all().iter().map(|d| d.id).collect()
    }

    /// Maps a host to the descriptor whose host table contains it.
    pub fn for_host(host: &str) -> Option<&'static ProviderDescriptor> {
        Self::all().iter().find(|d| d.matches_host(host))
    }
}

/// Classifies a URL by exact, case-sensitive host comparison.
///
/// Pure: never touches the network. Short links stay classified as the
/// microblog group; expansion happens in [`crate::classify::classify`].
pub fn classify_host(url: &Url) -> Option<ProviderKind> {
    let host = url.host_str()?;
    ProviderRegistry::for_host(host).map(|d| d.id)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(link: &str) -> Option<ProviderKind> {
        classify_host(&Url::parse(link).unwrap())
    }

    #[test]
    fn test_registry_order() {
        assert_eq!(
            ProviderRegistry::kinds(),
            vec![
                ProviderKind::FxTwitter,
                ProviderKind::Instagram,
                ProviderKind::YouTube,
                ProviderKind::Vocaroo,
            ]
        );
        assert_eq!(ProviderRegistry::count(), 4);
    }

    #[test]
    fn test_every_kind_has_a_group() {
        for kind in ProviderKind::all() {
            let desc = ProviderRegistry::get(*kind);
            assert!(desc.is_some(), "Should find group for {kind:?}");
        }
        assert_eq!(
            ProviderRegistry::get(ProviderKind::VxTwitter).unwrap().id,
            ProviderKind::FxTwitter
        );
    }

    #[test]
    fn test_cli_name_lookup() {
        assert_eq!(
            ProviderRegistry::get_by_cli_name("vxtwitter").unwrap().id,
            ProviderKind::FxTwitter
        );
        assert_eq!(
            ProviderRegistry::get_by_cli_name("youtube").unwrap().id,
            ProviderKind::YouTube
        );
        assert!(ProviderRegistry::get_by_cli_name("myspace").is_none());
    }

    #[test]
    fn test_host_tables_do_not_overlap() {
        let mut seen = std::collections::HashSet::new();
        for desc in ProviderRegistry::all() {
            for host in desc.hosts {
                assert!(seen.insert(*host), "duplicate host {host}");
            }
        }
    }

    #[test]
    fn test_classify_examples() {
        assert_eq!(classify("https://x.com/a/status/1"), Some(ProviderKind::FxTwitter));
        assert_eq!(classify("https://mobile.twitter.com/a/status/1"), Some(ProviderKind::FxTwitter));
        assert_eq!(classify("https://t.co/abc"), Some(ProviderKind::FxTwitter));
        assert_eq!(classify("https://www.instagram.com/p/ABC/"), Some(ProviderKind::Instagram));
        assert_eq!(classify("https://m.youtube.com/watch?v=dQw4w9WgXcQ"), Some(ProviderKind::YouTube));
        assert_eq!(classify("https://youtu.be/dQw4w9WgXcQ"), Some(ProviderKind::YouTube));
        assert_eq!(classify("https://vocaroo.com/abc123"), Some(ProviderKind::Vocaroo));
        assert_eq!(classify("https://voca.ro/abc123"), Some(ProviderKind::Vocaroo));
    }

    #[test]
    fn test_classify_none() {
        assert_eq!(classify("https://example.com/x"), None);
        assert_eq!(classify("https://api.x.com/a/status/1"), None);
        assert_eq!(classify("https://instagram.com.evil.net/p/A/"), None);
    }
}
