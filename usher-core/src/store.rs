//! Collaborator interfaces.
//!
//! The engine does not own persistence. These traits are the shapes it
//! expects from surrounding glue: an authority repository that loads and
//! saves [`PermissionSet`]s, and a feature-enablement lookup that `matches`
//! implementations may consult. Both are async because real implementations
//! sit on databases or caches.

use crate::error::BoxError;
use crate::permission::PermissionSet;
use std::future::Future;

/// Source of truth for user authority.
///
/// Populated and persisted outside the engine; the router itself never calls
/// this — permission-aware middleware and handlers do.
pub trait AuthorityStore: Send + Sync + 'static {
    /// Load the permission set of `entity`. Unknown entities load as the
    /// empty set (every scope resolves to the default rank).
    fn load(&self, entity: i64) -> impl Future<Output = PermissionSet> + Send;

    /// Persist the permission set of `entity`.
    fn save(
        &self,
        entity: i64,
        set: &PermissionSet,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Per-scope feature toggle lookup.
///
/// `matches` implementations may consult this to skip scopes where their
/// feature is switched off. Implementations must default to **enabled** when
/// the scope is unknown.
pub trait FeatureGate: Send + Sync + 'static {
    /// Whether `feature` is enabled for `scope`.
    fn enabled(&self, feature: &str, scope: i64) -> impl Future<Output = bool> + Send;
}
