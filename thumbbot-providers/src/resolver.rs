//! Resolution coordinator.
//!
//! Takes raw message text, picks its first link, classifies it and runs the
//! matching group's pipeline. Failures are logged and reported as `None`;
//! nothing here produces user-facing error text.

use std::sync::Arc;

use serde::Serialize;
use thumbbot_core::{ProviderKind, ResolvedContent};
use thumbbot_fetch::{CancellationToken, FetchContext, FetchPipeline};
use tracing::{debug, info, instrument, warn};

use crate::classify::classify;
use crate::links::first_link;
use crate::registry::ProviderRegistry;

// ============================================================================
// Resolution
// ============================================================================

/// Content produced for one message.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// Kind that produced the content; `VxTwitter` when the fallback answered.
    pub provider: ProviderKind,
    /// The resolved post or clip.
    pub content: ResolvedContent,
    /// Strategy that succeeded.
    pub strategy_id: String,
}

// ============================================================================
// Resolver
// ============================================================================

#[derive(Clone)]
struct ResolverGroup {
    kind: ProviderKind,
    pipeline: Arc<FetchPipeline>,
}

/// Runs classification and dispatches to provider pipelines.
///
/// Pipelines are built once, so state they own (the Instagram token cache)
/// survives across messages. Cloning is cheap and shares that state.
#[derive(Clone)]
pub struct Resolver {
    ctx: FetchContext,
    groups: Arc<Vec<ResolverGroup>>,
}

impl Resolver {
    /// Builds a resolver with every registered group.
    pub fn new(ctx: FetchContext) -> Self {
        let groups = ProviderRegistry::all()
            .iter()
            .map(|desc| ResolverGroup {
                kind: desc.id,
                pipeline: Arc::new(desc.build_pipeline(&ctx)),
            })
            .collect();

        Self {
            ctx,
            groups: Arc::new(groups),
        }
    }

    /// Replaces the pipeline of the group whose primary kind is `kind`.
    pub fn with_pipeline(mut self, kind: ProviderKind, pipeline: FetchPipeline) -> Self {
        let groups = Arc::make_mut(&mut self.groups);
        if let Some(group) = groups.iter_mut().find(|g| g.kind == kind) {
            group.pipeline = Arc::new(pipeline);
        }
        self
    }

    /// Returns a resolver sharing this one's pipelines but observing `cancel`.
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            ctx: self.ctx.with_cancellation(cancel),
            groups: Arc::clone(&self.groups),
        }
    }

    /// Returns the fetch context.
    pub fn context(&self) -> &FetchContext {
        &self.ctx
    }

    /// Resolves the first link of a message.
    #[instrument(skip(self, text))]
    pub async fn resolve(&self, text: &str) -> Option<Resolution> {
        let Some(link) = first_link(text) else {
            debug!("No link in message");
            return None;
        };

        self.resolve_link(link).await
    }

    /// Resolves a single link.
    #[instrument(skip(self))]
    pub async fn resolve_link(&self, link: &str) -> Option<Resolution> {
        let classified = match self.ctx.run_cancellable(classify(link, &self.ctx.http)).await {
            Ok(Some(classified)) => classified,
            Ok(None) => {
                debug!("Unsupported host");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Failed to classify link");
                return None;
            }
        };

        for group in self.groups.iter().filter(|g| g.kind == classified.kind) {
            let outcome = tokio::select! {
                biased;
                () = self.ctx.cancel.cancelled() => {
                    warn!(provider = ?group.kind, "Resolution cancelled");
                    return None;
                }
                outcome = group.pipeline.execute(&self.ctx, &classified.link) => outcome,
            };

            match outcome.result {
                Ok(result) => {
                    info!(
                        provider = ?result.provider,
                        strategy = %result.strategy_id,
                        attempts = outcome.attempts.len(),
                        "Link resolved"
                    );
                    return Some(Resolution {
                        provider: result.provider,
                        content: result.content,
                        strategy_id: result.strategy_id,
                    });
                }
                Err(e) => {
                    warn!(provider = ?group.kind, error = %e, "Provider failed");
                }
            }
        }

        None
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("ctx", &self.ctx)
            .field("groups", &self.groups.iter().map(|g| g.kind).collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use thumbbot_core::PostResult;
    use thumbbot_fetch::{FetchError, FetchKind, FetchResult, FetchStrategy};
    use url::Url;

    struct CountingStrategy {
        provider: ProviderKind,
        calls: Arc<AtomicUsize>,
        outcome: fn(&Url) -> Result<(), FetchError>,
        delay: Duration,
    }

    impl CountingStrategy {
        fn ok(provider: ProviderKind, calls: &Arc<AtomicUsize>) -> Self {
            Self {
                provider,
                calls: Arc::clone(calls),
                outcome: |_| Ok(()),
                delay: Duration::ZERO,
            }
        }

        fn failing(provider: ProviderKind, calls: &Arc<AtomicUsize>) -> Self {
            Self {
                outcome: |_| Err(FetchError::upstream(503, "down")),
                ..Self::ok(provider, calls)
            }
        }
    }

    #[async_trait]
    impl FetchStrategy for CountingStrategy {
        fn id(&self) -> &str {
            "counting"
        }

        fn provider(&self) -> ProviderKind {
            self.provider
        }

        fn kind(&self) -> FetchKind {
            FetchKind::JsonApi
        }

        async fn fetch(&self, _ctx: &FetchContext, link: &Url) -> Result<FetchResult, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            (self.outcome)(link)?;
            Ok(FetchResult::new(
                ResolvedContent::Post(PostResult::new(link.as_str(), "someone")),
                self.provider,
                self.id(),
                self.kind(),
            ))
        }
    }

    fn resolver_with(kind: ProviderKind, strategy: CountingStrategy) -> Resolver {
        let mut resolver = Resolver::new(FetchContext::new());
        for other in ProviderRegistry::kinds() {
            resolver = resolver.with_pipeline(other, FetchPipeline::new());
        }
        resolver.with_pipeline(kind, FetchPipeline::with_strategies(vec![Box::new(strategy)]))
    }

    #[tokio::test]
    async fn test_only_first_link_resolved() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = resolver_with(
            ProviderKind::FxTwitter,
            CountingStrategy::ok(ProviderKind::FxTwitter, &calls),
        );

        let resolution = resolver
            .resolve("look https://x.com/a/status/1?s=20 and https://x.com/b/status/2")
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(resolution.provider, ProviderKind::FxTwitter);
        let post = resolution.content.as_post().unwrap();
        assert_eq!(post.source_url, "https://x.com/a/status/1?s=20");
    }

    #[tokio::test]
    async fn test_unknown_host_makes_no_calls() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = resolver_with(
            ProviderKind::FxTwitter,
            CountingStrategy::ok(ProviderKind::FxTwitter, &calls),
        );

        assert!(resolver.resolve("https://example.com/x").await.is_none());
        assert!(resolver.resolve("no links here").await.is_none());
        assert!(resolver.resolve("").await.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dispatch_by_host() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = resolver_with(
            ProviderKind::Vocaroo,
            CountingStrategy::ok(ProviderKind::Vocaroo, &calls),
        );

        assert!(resolver.resolve("https://x.com/a/status/1").await.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let resolution = resolver.resolve("listen https://voca.ro/abc123").await.unwrap();
        assert_eq!(resolution.provider, ProviderKind::Vocaroo);
        assert_eq!(resolution.strategy_id, "counting");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_adapter_failure_is_none() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = resolver_with(
            ProviderKind::YouTube,
            CountingStrategy::failing(ProviderKind::YouTube, &calls),
        );

        assert!(resolver.resolve("https://youtu.be/dQw4w9WgXcQ").await.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancellation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let slow = CountingStrategy {
            delay: Duration::from_secs(30),
            ..CountingStrategy::ok(ProviderKind::Instagram, &calls)
        };
        let resolver = resolver_with(ProviderKind::Instagram, slow);

        let cancel = CancellationToken::new();
        let scoped = resolver.with_cancellation(cancel.clone());
        let task = tokio::spawn(async move { scoped.resolve("https://www.instagram.com/p/ABC/").await });

        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();

        assert!(task.await.unwrap().is_none());
        assert!(!resolver.context().is_cancelled());
    }
}
