//! Instagram provider descriptor.

use thumbbot_core::ProviderKind;
use thumbbot_fetch::{FetchContext, FetchPipeline, FetchStrategy};

use super::strategies::InstagramGraphQlStrategy;
use crate::descriptor::{FetchPlan, GroupMetadata, ProviderDescriptor};

/// Photo-platform hosts.
pub const INSTAGRAM_HOSTS: &[&str] = &["instagram.com", "www.instagram.com"];

/// Creates the Instagram provider descriptor.
pub fn instagram_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        id: ProviderKind::Instagram,
        kinds: &[ProviderKind::Instagram],
        metadata: GroupMetadata {
            description: "Posts and reels via the web GraphQL endpoint",
            ..GroupMetadata::for_provider(ProviderKind::Instagram)
        },
        hosts: INSTAGRAM_HOSTS,
        fetch_plan: FetchPlan {
            build_pipeline: build_instagram_pipeline,
        },
    }
}

fn build_instagram_pipeline(_ctx: &FetchContext) -> FetchPipeline {
    let strategies: Vec<Box<dyn FetchStrategy>> = vec![Box::new(InstagramGraphQlStrategy::new())];

    FetchPipeline::with_strategies(strategies)
}
