//! # Permission Model
//!
//! Ordered authority ranks and per-scope resolution.
//!
//! Authority is expressed as a totally ordered [`Permission`] rank; comparison
//! operators are the only mechanism for authority checks. A user carries a
//! [`PermissionSet`] mapping scope ids to ranks, with scope `0` reserved as
//! the global tier: the effective rank in any concrete scope is the maximum
//! of the global entry and the scope entry, so a globally configured operator
//! keeps their authority everywhere without per-scope duplication.

use std::collections::HashMap;
use std::time::SystemTime;

/// The scope id reserved for the global (cross-scope) permission tier.
pub const GLOBAL_SCOPE: i64 = 0;

/// An authority rank, totally ordered: `None < User < Admin < SuperAdmin < Owner`.
///
/// Derived `Ord` is the sole authority mechanism; there is no capability
/// matrix behind the ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Permission {
    /// Explicitly revoked; below every other rank.
    None,
    /// The default rank of any known caller.
    #[default]
    User,
    /// Scope-level moderation authority.
    Admin,
    /// Above scope admins; typically cross-scope staff.
    SuperAdmin,
    /// The top rank; outranks everything else.
    Owner,
}

impl Permission {
    /// Whether a caller of this rank may manage a caller of rank `other`.
    ///
    /// Strict: equal rank cannot manage equal rank.
    pub fn can_manage(self, other: Permission) -> bool {
        self > other
    }

    /// Decode a stored integer rank.
    ///
    /// Out-of-range values decode to [`Permission::None`], which fails every
    /// requirement above the bottom rank.
    pub fn from_level(level: i64) -> Permission {
        match level {
            1 => Permission::User,
            2 => Permission::Admin,
            3 => Permission::SuperAdmin,
            4 => Permission::Owner,
            _ => Permission::None,
        }
    }

    /// The integer form used by storage collaborators.
    pub fn level(self) -> i64 {
        match self {
            Permission::None => 0,
            Permission::User => 1,
            Permission::Admin => 2,
            Permission::SuperAdmin => 3,
            Permission::Owner => 4,
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Permission::None => "none",
            Permission::User => "user",
            Permission::Admin => "admin",
            Permission::SuperAdmin => "superadmin",
            Permission::Owner => "owner",
        };
        f.write_str(name)
    }
}

/// Per-scope authority ranks owned by one user entity.
///
/// Absence of a scope key means the default [`Permission::User`] for
/// resolution purposes; an explicit [`Permission::None`] may still be stored
/// to mark a revocation.
#[derive(Debug, Clone)]
pub struct PermissionSet {
    scopes: HashMap<i64, Permission>,
    updated_at: SystemTime,
}

impl PermissionSet {
    /// Create an empty set: every scope resolves to [`Permission::User`].
    pub fn new() -> Self {
        Self {
            scopes: HashMap::new(),
            updated_at: SystemTime::now(),
        }
    }

    /// The effective rank in `scope`: `max(global tier, scope tier)`, each
    /// tier defaulting to [`Permission::User`] when unset.
    pub fn effective(&self, scope: i64) -> Permission {
        let global = self.rank_or_default(GLOBAL_SCOPE);
        let local = self.rank_or_default(scope);
        global.max(local)
    }

    /// Whether the effective rank in `scope` meets `required`.
    pub fn has(&self, scope: i64, required: Permission) -> bool {
        self.effective(scope) >= required
    }

    /// Store `rank` for `scope` and bump the last-modified timestamp.
    pub fn set(&mut self, scope: i64, rank: Permission) {
        self.scopes.insert(scope, rank);
        self.updated_at = SystemTime::now();
    }

    /// The rank explicitly stored for `scope`, if any.
    pub fn stored(&self, scope: i64) -> Option<Permission> {
        self.scopes.get(&scope).copied()
    }

    /// When any entry was last modified.
    pub fn updated_at(&self) -> SystemTime {
        self.updated_at
    }

    fn rank_or_default(&self, scope: i64) -> Permission {
        self.scopes.get(&scope).copied().unwrap_or(Permission::User)
    }
}

impl Default for PermissionSet {
    fn default() -> Self {
        Self::new()
    }
}
