//! # Pipeline Assembly
//!
//! Builds the fetch and push decorator chains from [`HubConfig`]. Links are
//! wrapped innermost first, so a request passes through them in this
//! order:
//!
//! ```text
//! fetch: validate -> check completeness -> log -> resolver
//! push:  validate -> log -> pusher
//! ```
//!
//! Completeness checking is present only when `completeness_checking` is
//! configured, and logging only when `logging` is true.

use std::sync::Arc;

use ahub_cas::ContentAddressableStorage;

use crate::config::{ConfigError, HubConfig};
use crate::fetch::{CompletenessCheckingFetcher, Fetcher, LoggingFetcher, ValidatingFetcher};
use crate::policy::IncompletePolicy;
use crate::push::{LoggingPusher, Pusher, ValidatingPusher};

pub struct Pipeline {
    config: HubConfig,
    policy: Option<Arc<dyn IncompletePolicy>>,
}

impl Pipeline {
    pub fn new(config: HubConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            policy: None,
        })
    }

    /// Use `policy` for incomplete content instead of surfacing failures.
    /// Refetches stay bounded by `completeness_checking.max_refetches`.
    pub fn with_policy(mut self, policy: Arc<dyn IncompletePolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    pub fn build_fetcher(
        &self,
        resolver: Arc<dyn Fetcher>,
        cas: Arc<dyn ContentAddressableStorage>,
    ) -> Arc<dyn Fetcher> {
        let mut fetcher = resolver;
        if self.config.logging {
            fetcher = Arc::new(LoggingFetcher::new(fetcher));
        }
        if let Some(completeness) = &self.config.completeness_checking {
            let mut checker = CompletenessCheckingFetcher::from_config(fetcher, cas, completeness);
            if let Some(policy) = &self.policy {
                checker = checker.with_policy(policy.clone(), completeness.max_refetches);
            }
            tracing::debug!(
                batch_size = completeness.batch_size,
                maximum_message_size_bytes = completeness.maximum_message_size_bytes,
                max_refetches = completeness.max_refetches,
                "completeness checking enabled"
            );
            fetcher = Arc::new(checker);
        }
        Arc::new(ValidatingFetcher::new(
            fetcher,
            self.config.supported_qualifier_set(),
        ))
    }

    pub fn build_pusher(&self, pusher: Arc<dyn Pusher>) -> Arc<dyn Pusher> {
        let mut pusher = pusher;
        if self.config.logging {
            pusher = Arc::new(LoggingPusher::new(pusher));
        }
        Arc::new(ValidatingPusher::new(
            pusher,
            self.config.supported_qualifier_set(),
        ))
    }
}
