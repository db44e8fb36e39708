// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # thumbbot Fetch
//!
//! HTTP host API and fetch machinery for the thumbbot resolution engine.
//!
//! ## Host APIs
//!
//! - [`host::http`] - HTTP client with tracing and redirect control
//!
//! ## Fetch Pipeline
//!
//! The fetch pipeline executes multiple strategies in priority order:
//!
//! - [`strategy::FetchStrategy`] - Trait for adapter implementations
//! - [`pipeline::FetchPipeline`] - Executes strategies in order, falling back on error
//! - [`context::FetchContext`] - Shared HTTP client, settings and cancellation
//!
//! ## Policies
//!
//! - [`retry::RetryPolicy`] - Exponential backoff with jitter and ceiling
//! - [`variant::select_best_variant`] - Largest video encoding under a size budget
//!
//! ## Example
//!
//! ```ignore
//! use thumbbot_fetch::{FetchContext, FetchPipeline};
//!
//! let ctx = FetchContext::new();
//!
//! let pipeline = FetchPipeline::with_strategies(vec![
//!     Box::new(FxTwitterApiStrategy::new()),
//!     Box::new(VxTwitterApiStrategy::new()),
//! ]);
//!
//! let outcome = pipeline.execute(&ctx, &link).await;
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod host;
pub mod pipeline;
pub mod retry;
pub mod strategy;
pub mod variant;

// Errors
pub use error::{ConfigError, FetchError, HttpError};

// Host APIs
pub use host::http::{HttpClient, ResponseExt, header_map};

// Strategy & Pipeline
pub use context::{FetchContext, FetchContextBuilder, FetchSettings};
pub use pipeline::{FetchAttempt, FetchOutcome, FetchPipeline};
pub use strategy::{FetchKind, FetchResult, FetchStrategy, StrategyInfo};

// Policies
pub use config::Config;
pub use retry::{Backoff, RetryPolicy, sleep_or_cancel};
pub use variant::{DEFAULT_SIZE_BUDGET, estimate_size, select_best_variant};

// Re-exported for strategy implementations and callers.
pub use tokio_util::sync::CancellationToken;
