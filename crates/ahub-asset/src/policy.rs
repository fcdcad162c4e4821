//! # Incomplete Asset Policy
//!
//! What to do when the resolver hands back an asset whose content is not
//! fully present in the CAS. The completeness checker consults an
//! [`IncompletePolicy`] only when the check proves content missing (a leaf
//! miss or an unavailable Tree). Store outages, delegate failures and
//! cancellations bypass the policy.
//!
//! Refetches are bounded by the checker's `max_refetches`, whatever the
//! policy answers.

use ahub_cas::{CallContext, CheckError};
use ahub_core::InstanceName;
use async_trait::async_trait;

use crate::error::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Return the completeness failure to the caller.
    Surface,
    /// Call the resolver again and re-check its answer.
    Refetch,
}

/// A failed completeness check, as presented to the policy.
#[derive(Debug)]
pub struct Incident<'a> {
    pub operation: Operation,
    pub instance: &'a InstanceName,
    /// The URI the resolver answered with.
    pub uri: &'a str,
    pub error: &'a CheckError,
    /// Refetches already made for this call.
    pub attempt: u32,
}

#[async_trait]
pub trait IncompletePolicy: Send + Sync + 'static {
    async fn decide(&self, ctx: &CallContext, incident: &Incident<'_>) -> PolicyDecision;
}

/// Always surfaces the failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceIncomplete;

#[async_trait]
impl IncompletePolicy for SurfaceIncomplete {
    async fn decide(&self, _ctx: &CallContext, _incident: &Incident<'_>) -> PolicyDecision {
        PolicyDecision::Surface
    }
}
