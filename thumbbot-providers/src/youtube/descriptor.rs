//! YouTube provider descriptor.

use thumbbot_core::ProviderKind;
use thumbbot_fetch::{FetchContext, FetchPipeline, FetchStrategy};

use super::strategies::YouTubeOEmbedStrategy;
use crate::descriptor::{FetchPlan, GroupMetadata, ProviderDescriptor};

/// Video-platform hosts.
pub const YOUTUBE_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "youtu.be",
    "www.youtu.be",
];

/// Creates the YouTube provider descriptor.
pub fn youtube_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        id: ProviderKind::YouTube,
        kinds: &[ProviderKind::YouTube],
        metadata: GroupMetadata {
            description: "Video metadata via oEmbed",
            ..GroupMetadata::for_provider(ProviderKind::YouTube)
        },
        hosts: YOUTUBE_HOSTS,
        fetch_plan: FetchPlan {
            build_pipeline: build_youtube_pipeline,
        },
    }
}

fn build_youtube_pipeline(_ctx: &FetchContext) -> FetchPipeline {
    let strategies: Vec<Box<dyn FetchStrategy>> = vec![Box::new(YouTubeOEmbedStrategy::new())];

    FetchPipeline::with_strategies(strategies)
}
