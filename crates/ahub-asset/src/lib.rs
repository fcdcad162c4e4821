//! # ahub-asset: Remote Asset Fetch and Push Services
//!
//! Resolves asset URIs to content in a content-addressable store, and
//! refuses to answer with references to content the store no longer holds.
//!
//! ## Structure
//!
//! - **`fetch`**: the [`Fetcher`] trait and its decorators: request
//!   validation, completeness checking, logging, and an unimplemented stub.
//! - **`push`**: the [`Pusher`] trait with validation, logging and stub
//!   decorators.
//! - **`policy`**: what the completeness checker does when content is
//!   missing.
//! - **`config`** / **`pipeline`**: YAML configuration and assembly of the
//!   decorator chains from it.
//! - **`telemetry`**: `tracing` subscriber setup.
//!
//! ## Crate Policy
//!
//! - Depends on `ahub-core` and `ahub-cas` internally.
//! - Decorators hold the next link as `Arc<dyn Fetcher>` / `Arc<dyn Pusher>`
//!   and never share per-call state.

pub mod config;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod policy;
pub mod push;
pub mod telemetry;
pub mod types;
pub mod validation;

pub use config::{CompletenessConfig, ConfigError, HubConfig, LogConfig, LogFormat};
pub use error::{AssetError, Operation, ValidationError};
pub use fetch::{
    CompletenessCheckingFetcher, Fetcher, LoggingFetcher, UnimplementedFetcher, ValidatingFetcher,
};
pub use pipeline::Pipeline;
pub use policy::{Incident, IncompletePolicy, PolicyDecision, SurfaceIncomplete};
pub use push::{LoggingPusher, Pusher, UnimplementedPusher, ValidatingPusher};
pub use types::{
    AssetRequest, FetchBlobRequest, FetchBlobResponse, FetchDirectoryRequest,
    FetchDirectoryResponse, PushBlobRequest, PushBlobResponse, PushDirectoryRequest,
    PushDirectoryResponse,
};
