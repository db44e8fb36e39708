//! Provider descriptor system.
//!
//! A descriptor contains all the static configuration for a provider group:
//! - Metadata (display name, CLI name, description)
//! - Host table used for classification
//! - Fetch plan (how to resolve a link)

use thumbbot_core::ProviderKind;
use thumbbot_fetch::{FetchContext, FetchPipeline};

// ============================================================================
// Provider Descriptor
// ============================================================================

/// Complete descriptor for a provider group.
///
/// A group is keyed by its primary [`ProviderKind`]; the microblog group
/// also produces content under its fallback kind.
pub struct ProviderDescriptor {
    /// Primary provider kind; the result of classifying one of `hosts`.
    pub id: ProviderKind,
    /// Every kind this group's strategies can report.
    pub kinds: &'static [ProviderKind],
    /// Display metadata.
    pub metadata: GroupMetadata,
    /// Hosts handled by this group, compared exactly.
    pub hosts: &'static [&'static str],
    /// How to resolve links.
    pub fetch_plan: FetchPlan,
}

impl ProviderDescriptor {
    /// Creates a new descriptor builder.
    pub fn builder(id: ProviderKind) -> ProviderDescriptorBuilder {
        ProviderDescriptorBuilder::new(id)
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &str {
        self.metadata.display_name
    }

    /// Returns the CLI name.
    pub fn cli_name(&self) -> &str {
        self.metadata.cli_name
    }

    /// Returns true if `host` is in this group's host table.
    pub fn matches_host(&self, host: &str) -> bool {
        self.hosts.contains(&host)
    }

    /// Returns true if this group produces content for `kind`.
    pub fn handles(&self, kind: ProviderKind) -> bool {
        self.id == kind || self.kinds.contains(&kind)
    }

    /// Builds the fetch pipeline for this group.
    pub fn build_pipeline(&self, ctx: &FetchContext) -> FetchPipeline {
        (self.fetch_plan.build_pipeline)(ctx)
    }
}

impl std::fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("id", &self.id)
            .field("metadata", &self.metadata)
            .field("hosts", &self.hosts)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Group Metadata
// ============================================================================

/// Display metadata for a provider group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupMetadata {
    /// Human-readable name.
    pub display_name: &'static str,
    /// Lowercase name used on the command line.
    pub cli_name: &'static str,
    /// One-line description of what the group resolves.
    pub description: &'static str,
}

impl GroupMetadata {
    /// Metadata derived from a provider kind.
    pub fn for_provider(id: ProviderKind) -> Self {
        Self {
            display_name: id.display_name(),
            cli_name: id.cli_name(),
            description: "",
        }
    }
}

// ============================================================================
// Fetch Plan
// ============================================================================

/// Configuration for how to resolve a link.
pub struct FetchPlan {
    /// Function to build the fetch pipeline.
    pub build_pipeline: fn(&FetchContext) -> FetchPipeline,
}

impl Default for FetchPlan {
    fn default() -> Self {
        Self {
            build_pipeline: |_| FetchPipeline::new(),
        }
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for `ProviderDescriptor`.
pub struct ProviderDescriptorBuilder {
    id: ProviderKind,
    kinds: &'static [ProviderKind],
    metadata: Option<GroupMetadata>,
    hosts: &'static [&'static str],
    fetch_plan: FetchPlan,
}

impl ProviderDescriptorBuilder {
    /// Creates a new builder for the given provider.
    pub fn new(id: ProviderKind) -> Self {
        Self {
            id,
            kinds: &[],
            metadata: None,
            hosts: &[],
            fetch_plan: FetchPlan::default(),
        }
    }

    /// Sets the kinds the group can report.
    pub fn kinds(mut self, kinds: &'static [ProviderKind]) -> Self {
        self.kinds = kinds;
        self
    }

    /// Sets the metadata.
    pub fn metadata(mut self, metadata: GroupMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Sets the host table.
    pub fn hosts(mut self, hosts: &'static [&'static str]) -> Self {
        self.hosts = hosts;
        self
    }

    /// Sets the fetch plan.
    pub fn fetch_plan(mut self, plan: FetchPlan) -> Self {
        self.fetch_plan = plan;
        self
    }

    /// Builds the descriptor.
    pub fn build(self) -> ProviderDescriptor {
        ProviderDescriptor {
            id: self.id,
            kinds: self.kinds,
            metadata: self
                .metadata
                .unwrap_or_else(|| GroupMetadata::for_provider(self.id)),
            hosts: self.hosts,
            fetch_plan: self.fetch_plan,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let desc = ProviderDescriptor::builder(ProviderKind::Vocaroo)
            .hosts(&["vocaroo.com"])
            .build();

        assert_eq!(desc.display_name(), "Vocaroo");
        assert_eq!(desc.cli_name(), "vocaroo");
        assert!(desc.matches_host("vocaroo.com"));
        assert!(!desc.matches_host("VOCAROO.COM"));
        assert!(desc.handles(ProviderKind::Vocaroo));
        assert!(!desc.handles(ProviderKind::YouTube));
        assert!(desc.build_pipeline(&FetchContext::new()).is_empty());
    }
}
