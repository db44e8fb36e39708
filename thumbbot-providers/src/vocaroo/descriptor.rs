//! Vocaroo provider descriptor.

use thumbbot_core::ProviderKind;
use thumbbot_fetch::{FetchContext, FetchPipeline, FetchStrategy};

use super::strategies::VocarooDownloadStrategy;
use crate::descriptor::{FetchPlan, GroupMetadata, ProviderDescriptor};

/// Voice-clip hosts.
pub const VOCAROO_HOSTS: &[&str] = &["vocaroo.com", "voca.ro", "www.vocaroo.com"];

/// Creates the Vocaroo provider descriptor.
pub fn vocaroo_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        id: ProviderKind::Vocaroo,
        kinds: &[ProviderKind::Vocaroo],
        metadata: GroupMetadata {
            description: "Voice clips downloaded as MP3",
            ..GroupMetadata::for_provider(ProviderKind::Vocaroo)
        },
        hosts: VOCAROO_HOSTS,
        fetch_plan: FetchPlan {
            build_pipeline: build_vocaroo_pipeline,
        },
    }
}

fn build_vocaroo_pipeline(_ctx: &FetchContext) -> FetchPipeline {
    let strategies: Vec<Box<dyn FetchStrategy>> = vec![Box::new(VocarooDownloadStrategy::new())];

    FetchPipeline::with_strategies(strategies)
}
