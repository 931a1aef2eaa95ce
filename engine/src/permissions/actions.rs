//! Action permission tables.
//!
//! Actions are `<resource>:<verb>` tokens. Tokens in a tournament-scoped
//! namespace are looked up in [`ACTION_PERMISSIONS`]; everything else is a
//! global action governed by [`GLOBAL_ACTION_GRANTS`].

use std::collections::HashMap;
use std::sync::LazyLock;

use fw_common::GlobalRole;
use serde::Serialize;

/// Resources whose actions are scoped to a single tournament.
pub const ACTION_NAMESPACES: [&str; 5] = ["tournament", "event", "score", "membership", "report"];

/// Minimum tournament rank required for an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionPermission {
    pub action: &'static str,
    pub min_rank: u8,
}

/// Global roles allowed to perform a global (non-tournament) action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GlobalActionGrant {
    pub action: &'static str,
    pub roles: &'static [GlobalRole],
}

const fn perm(action: &'static str, min_rank: u8) -> ActionPermission {
    ActionPermission { action, min_rank }
}

/// Tournament-scoped actions and the minimum role rank each requires.
pub const ACTION_PERMISSIONS: &[ActionPermission] = &[
    // Tournament management
    perm("tournament:delete", 5), // owner only
    perm("tournament:edit", 3),   // td and above
    perm("tournament:view", 1),
    // Membership management
    perm("membership:invite", 3),
    perm("membership:remove", 3),
    perm("membership:view", 1),
    // Events
    perm("event:create", 3),
    perm("event:edit", 3),
    perm("event:delete", 3),
    // Scoring
    perm("score:enter", 2), // scorer and above
    perm("score:edit", 2),
    perm("score:view", 1),
    // Reporting
    perm("report:generate", 2),
    perm("report:view", 1),
];

/// Grants for global actions held by non-sysadmins.
///
/// Empty: every global action is currently sysadmin-only. New global
/// capabilities for other platform roles are added here.
pub const GLOBAL_ACTION_GRANTS: &[GlobalActionGrant] = &[];

static ACTION_TABLE: LazyLock<HashMap<&'static str, u8>> = LazyLock::new(|| {
    ACTION_PERMISSIONS
        .iter()
        .map(|p| (p.action, p.min_rank))
        .collect()
});

/// The tournament-scoped namespace of an action, if it has one.
///
/// # Examples
///
/// ```
/// use fw_engine::permissions::namespace_of;
///
/// assert_eq!(namespace_of("score:enter"), Some("score"));
/// assert_eq!(namespace_of("billing:view"), None);
/// ```
#[must_use]
pub fn namespace_of(action: &str) -> Option<&'static str> {
    let (resource, _verb) = action.split_once(':')?;
    ACTION_NAMESPACES.iter().copied().find(|ns| *ns == resource)
}

/// Check whether an action belongs to a tournament-scoped namespace.
#[must_use]
pub fn is_tournament_scoped(action: &str) -> bool {
    namespace_of(action).is_some()
}

/// Minimum rank for a tournament-scoped action; `None` if unknown.
#[must_use]
pub fn required_rank(action: &str) -> Option<u8> {
    ACTION_TABLE.get(action).copied()
}

/// Check whether a non-sysadmin global role may perform a global action.
#[must_use]
pub fn global_action_granted(role: GlobalRole, action: &str) -> bool {
    GLOBAL_ACTION_GRANTS
        .iter()
        .any(|grant| grant.action == action && grant.roles.contains(&role))
}
