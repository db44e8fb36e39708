//! Provider-related types.
//!
//! This module contains [`ProviderKind`], the closed set of platform
//! adapters the engine knows about. Classification of a link yields an
//! `Option<ProviderKind>`; `None` means no adapter handles the host.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// Provider Kind
// ============================================================================

/// Supported platform adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Microblog posts via the FxTwitter API (primary).
    FxTwitter,
    /// Microblog posts via the VxTwitter API (fallback).
    VxTwitter,
    /// Instagram posts and reels.
    Instagram,
    /// YouTube videos.
    YouTube,
    /// Vocaroo voice clips.
    Vocaroo,
}

impl ProviderKind {
    /// Returns the display name for this provider.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FxTwitter => "FxTwitter",
            Self::VxTwitter => "VxTwitter",
            Self::Instagram => "Instagram",
            Self::YouTube => "YouTube",
            Self::Vocaroo => "Vocaroo",
        }
    }

    /// Returns all provider kinds.
    pub fn all() -> &'static [ProviderKind] {
        &[
            Self::FxTwitter,
            Self::VxTwitter,
            Self::Instagram,
            Self::YouTube,
            Self::Vocaroo,
        ]
    }

    /// Returns the CLI name for this provider (lowercase, no spaces).
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::FxTwitter => "fxtwitter",
            Self::VxTwitter => "vxtwitter",
            Self::Instagram => "instagram",
            Self::YouTube => "youtube",
            Self::Vocaroo => "vocaroo",
        }
    }

    /// Returns true for the two microblog adapters.
    pub fn is_microblog(&self) -> bool {
        matches!(self, Self::FxTwitter | Self::VxTwitter)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ProviderKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.cli_name() == lower)
            .ok_or_else(|| CoreError::UnknownProvider(s.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_names_are_unique() {
        let mut names: Vec<_> = ProviderKind::all().iter().map(|k| k.cli_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ProviderKind::all().len());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("youtube".parse::<ProviderKind>().unwrap(), ProviderKind::YouTube);
        assert_eq!(" Vocaroo ".parse::<ProviderKind>().unwrap(), ProviderKind::Vocaroo);
        assert!(matches!(
            "myspace".parse::<ProviderKind>(),
            Err(CoreError::UnknownProvider(_))
        ));
    }

    #[test]
    fn test_microblog() {
        assert!(ProviderKind::FxTwitter.is_microblog());
        assert!(ProviderKind::VxTwitter.is_microblog());
        assert!(!ProviderKind::Instagram.is_microblog());
    }
}
