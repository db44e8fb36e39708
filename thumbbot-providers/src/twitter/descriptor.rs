//! Microblog provider descriptor.

use thumbbot_core::ProviderKind;
use thumbbot_fetch::{FetchContext, FetchPipeline, FetchStrategy};

use super::strategies::{FxTwitterApiStrategy, VxTwitterApiStrategy};
use crate::descriptor::{FetchPlan, GroupMetadata, ProviderDescriptor};

/// Microblog hosts, including the `t.co` shortener.
pub const TWITTER_HOSTS: &[&str] = &[
    "twitter.com",
    "mobile.twitter.com",
    "www.twitter.com",
    "t.co",
    "x.com",
    "www.x.com",
];

/// Creates the microblog provider descriptor.
///
/// One group covers both API mirrors; the fallback only runs when the
/// primary fails.
pub fn twitter_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        id: ProviderKind::FxTwitter,
        kinds: &[ProviderKind::FxTwitter, ProviderKind::VxTwitter],
        metadata: GroupMetadata {
            display_name: "X / Twitter",
            cli_name: "twitter",
            description: "Posts via FxTwitter, falling back to VxTwitter",
        },
        hosts: TWITTER_HOSTS,
        fetch_plan: FetchPlan {
            build_pipeline: build_twitter_pipeline,
        },
    }
}

fn build_twitter_pipeline(_ctx: &FetchContext) -> FetchPipeline {
    let strategies: Vec<Box<dyn FetchStrategy>> = vec![
        Box::new(FxTwitterApiStrategy::new()),
        Box::new(VxTwitterApiStrategy::new()),
    ];

    FetchPipeline::with_strategies(strategies)
}
