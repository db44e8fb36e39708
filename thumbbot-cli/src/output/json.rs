//! JSON output formatting.

use anyhow::Result;
use serde::Serialize;
use thumbbot_core::{ProviderKind, ResolvedContent};
use thumbbot_providers::{ProviderDescriptor, Resolution};

use super::text::caption;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a resolved message.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionOutput<'a> {
    pub provider: ProviderKind,
    pub strategy: &'a str,
    pub caption: String,
    pub content: &'a ResolvedContent,
    /// Clip size; the clip bytes themselves are not serialized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_bytes: Option<usize>,
}

impl<'a> From<&'a Resolution> for ResolutionOutput<'a> {
    fn from(resolution: &'a Resolution) -> Self {
        Self {
            provider: resolution.provider,
            strategy: &resolution.strategy_id,
            caption: caption(resolution),
            content: &resolution.content,
            clip_bytes: resolution.content.as_clip().map(thumbbot_core::ClipStream::len),
        }
    }
}

/// Classification result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyOutput {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub provider: Option<ProviderKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Adapter group info.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfoOutput {
    pub id: ProviderKind,
    pub display_name: String,
    pub cli_name: String,
    pub description: String,
    pub kinds: Vec<ProviderKind>,
    pub hosts: Vec<String>,
}

impl From<&ProviderDescriptor> for ProviderInfoOutput {
    fn from(desc: &ProviderDescriptor) -> Self {
        Self {
            id: desc.id,
            display_name: desc.display_name().to_string(),
            cli_name: desc.cli_name().to_string(),
            description: desc.metadata.description.to_string(),
            kinds: desc.kinds.to_vec(),
            hosts: desc.hosts.iter().map(ToString::to_string).collect(),
        }
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats the adapter group list.
    pub fn format_providers(&self, providers: &[ProviderDescriptor]) -> Result<String> {
        let outputs: Vec<ProviderInfoOutput> = providers.iter().map(ProviderInfoOutput::from).collect();
        self.format(&outputs)
    }
}

// ============================================================================
// Tests
// ============================================================================
