//! Permission evaluation.
//!
//! Guard order:
//! 1. No user: deny
//! 2. Sysadmin: allow
//! 3. Global action: allow only via an explicit global grant
//! 4. No membership, or membership not active: deny
//! 5. Action missing from the table: deny
//! 6. Allow iff the membership rank meets the action's minimum

use fw_common::{TournamentContext, TournamentMembership, TournamentRole, User};
use serde::Serialize;
use tracing::{debug, warn};

use super::actions::{global_action_granted, is_tournament_scoped, required_rank};
use super::roles::{is_sysadmin, rank};

/// Why a request was allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowReason {
    /// Global sysadmin bypass.
    Sysadmin,
    /// Global action granted to the user's global role.
    GlobalGrant,
    /// Membership rank meets the action's minimum.
    RoleSufficient,
}

/// Why a request was denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Global action is not granted to this role")]
    GlobalActionNotGranted,

    #[error("User is not a member of this tournament")]
    NoMembership,

    #[error("Tournament membership is not active (status: {status})")]
    InactiveMembership { status: String },

    #[error("Unknown action")]
    UnknownAction,

    #[error("Requires role rank {required} (yours: {actual})")]
    InsufficientRole { required: u8, actual: u8 },
}

/// Outcome of the guard chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum Decision {
    Allow(AllowReason),
    Deny(DenyReason),
}

impl Decision {
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }

    /// Convert into a `Result` for `?`-style gating in handlers.
    pub fn into_result(self) -> Result<AllowReason, DenyReason> {
        match self {
            Self::Allow(reason) => Ok(reason),
            Self::Deny(reason) => Err(reason),
        }
    }
}

/// Run the full guard chain for `action`.
///
/// `context` is the user's membership snapshot for the tournament the action
/// targets, or `None` if there is none. Never fails: anything ambiguous or
/// unrecognized is a denial.
pub fn evaluate(
    user: Option<&User>,
    action: &str,
    context: Option<&TournamentContext>,
) -> Decision {
    let Some(user) = user else {
        return deny(action, DenyReason::Unauthenticated);
    };

    if is_sysadmin(user.role) {
        return Decision::Allow(AllowReason::Sysadmin);
    }

    if !is_tournament_scoped(action) {
        if global_action_granted(user.role, action) {
            return Decision::Allow(AllowReason::GlobalGrant);
        }
        return deny(action, DenyReason::GlobalActionNotGranted);
    }

    let context = match active_membership(context) {
        Ok(context) => context,
        Err(reason) => return deny(action, reason),
    };

    let Some(required) = required_rank(action) else {
        warn!(action, "Unknown tournament action denied");
        return Decision::Deny(DenyReason::UnknownAction);
    };

    match check_rank(context.role, required) {
        Ok(()) => Decision::Allow(AllowReason::RoleSufficient),
        Err(reason) => deny(action, reason),
    }
}

/// Check whether `user` may perform `action`.
///
/// # Examples
///
/// ```
/// use fw_common::{GlobalRole, TournamentContext, TournamentRole, User};
/// use fw_engine::permissions::can;
///
/// let user = User::new("u1", "scorer@example.com", GlobalRole::Scorer);
/// let ctx = TournamentContext::active(1, "org", TournamentRole::Scorer);
///
/// assert!(can(Some(&user), "score:enter", Some(&ctx)));
/// assert!(!can(Some(&user), "tournament:edit", Some(&ctx)));
/// ```
pub fn can(user: Option<&User>, action: &str, context: Option<&TournamentContext>) -> bool {
    evaluate(user, action, context).is_allowed()
}

/// Like [`can`] but reports the denial reason.
pub fn require(
    user: Option<&User>,
    action: &str,
    context: Option<&TournamentContext>,
) -> Result<AllowReason, DenyReason> {
    evaluate(user, action, context).into_result()
}

/// Membership guard: present and exactly `"active"`.
pub fn active_membership(
    context: Option<&TournamentContext>,
) -> Result<&TournamentContext, DenyReason> {
    let context = context.ok_or(DenyReason::NoMembership)?;
    if !context.is_active() {
        return Err(DenyReason::InactiveMembership {
            status: context.status.clone(),
        });
    }
    Ok(context)
}

/// Rank guard: `role` holds at least `required`.
pub const fn check_rank(role: TournamentRole, required: u8) -> Result<(), DenyReason> {
    let actual = rank(role);
    if actual >= required {
        Ok(())
    } else {
        Err(DenyReason::InsufficientRole { required, actual })
    }
}

/// Check for an active membership at or above `min_role`.
pub fn has_role_level(context: Option<&TournamentContext>, min_role: TournamentRole) -> bool {
    active_membership(context)
        .and_then(|context| check_rank(context.role, rank(min_role)))
        .is_ok()
}

/// Check for an active membership of td or higher.
pub fn is_privileged_member(context: Option<&TournamentContext>) -> bool {
    has_role_level(context, TournamentRole::Td)
}

/// Check whether `user` may edit the tournament `membership` belongs to.
///
/// A membership whose stored role cannot be parsed is treated as absent.
pub fn check_edit_permission(
    user: Option<&User>,
    membership: Option<&TournamentMembership>,
    now: i64,
) -> bool {
    let context = membership.and_then(|m| match m.context(now) {
        Ok(context) => Some(context),
        Err(e) => {
            warn!(membership_id = %m.id, error = %e, "Ignoring membership with invalid role");
            None
        }
    });

    can(user, "tournament:edit", context.as_ref())
}

fn deny(action: &str, reason: DenyReason) -> Decision {
    debug!(action, reason = %reason, "Permission denied");
    Decision::Deny(reason)
}

#[cfg(test)]
mod tests {
    use fw_common::GlobalRole;

    use super::*;

    fn player() -> User {
        User::new("u1", "player@example.com", GlobalRole::Player)
    }

    fn ctx(role: TournamentRole) -> TournamentContext {
        TournamentContext::active(1, "org-1", role)
    }

    #[test]
    fn test_anonymous_denied() {
        assert_eq!(
            evaluate(None, "tournament:view", Some(&ctx(TournamentRole::Owner))),
            Decision::Deny(DenyReason::Unauthenticated)
        );
    }

    #[test]
    fn test_sysadmin_bypasses_everything() {
        let admin = User::new("a", "admin@example.com", GlobalRole::Admin);
        for action in ["tournament:delete", "users:list", "not-an-action", ""] {
            assert_eq!(
                evaluate(Some(&admin), action, None),
                Decision::Allow(AllowReason::Sysadmin),
                "{action}"
            );
        }
    }

    #[test]
    fn test_global_action_denied_for_non_sysadmin() {
        assert_eq!(
            evaluate(Some(&player()), "users:list", Some(&ctx(TournamentRole::Owner))),
            Decision::Deny(DenyReason::GlobalActionNotGranted)
        );
    }

    #[test]
    fn test_missing_membership_denied() {
        assert_eq!(
            evaluate(Some(&player()), "tournament:view", None),
            Decision::Deny(DenyReason::NoMembership)
        );
    }

    #[test]
    fn test_inactive_membership_denied() {
        let suspended = TournamentContext::new(1, "org", TournamentRole::Owner, "suspended");
        assert_eq!(
            evaluate(Some(&player()), "tournament:view", Some(&suspended)),
            Decision::Deny(DenyReason::InactiveMembership {
                status: "suspended".to_string()
            })
        );
    }

    #[test]
    fn test_status_checked_before_action_lookup() {
        let pending = TournamentContext::new(1, "org", TournamentRole::Owner, "pending");
        assert!(matches!(
            evaluate(Some(&player()), "tournament:archive", Some(&pending)),
            Decision::Deny(DenyReason::InactiveMembership { .. })
        ));
    }

    #[test]
    fn test_unknown_namespaced_action_denied() {
        assert_eq!(
            evaluate(Some(&player()), "tournament:archive", Some(&ctx(TournamentRole::Owner))),
            Decision::Deny(DenyReason::UnknownAction)
        );
    }

    #[test]
    fn test_rank_comparison() {
        let scorer = ctx(TournamentRole::Scorer);
        assert_eq!(
            evaluate(Some(&player()), "score:enter", Some(&scorer)),
            Decision::Allow(AllowReason::RoleSufficient)
        );
        assert_eq!(
            evaluate(Some(&player()), "event:create", Some(&scorer)),
            Decision::Deny(DenyReason::InsufficientRole {
                required: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_owner_only_delete() {
        let user = player();
        assert!(can(Some(&user), "tournament:delete", Some(&ctx(TournamentRole::Owner))));
        assert!(!can(Some(&user), "tournament:delete", Some(&ctx(TournamentRole::Admin))));
    }

    #[test]
    fn test_require_reports_reason() {
        let err = require(Some(&player()), "tournament:edit", Some(&ctx(TournamentRole::Viewer)))
            .unwrap_err();
        assert!(err.to_string().contains("rank 3"));
        assert!(err.to_string().contains("yours: 1"));
    }

    #[test]
    fn test_has_role_level() {
        let td = ctx(TournamentRole::Td);
        assert!(has_role_level(Some(&td), TournamentRole::Td));
        assert!(has_role_level(Some(&td), TournamentRole::Viewer));
        assert!(!has_role_level(Some(&td), TournamentRole::Admin));
        assert!(!has_role_level(None, TournamentRole::Viewer));

        let expired = TournamentContext::new(1, "org", TournamentRole::Owner, "expired");
        assert!(!has_role_level(Some(&expired), TournamentRole::Viewer));
    }

    #[test]
    fn test_is_privileged_member() {
        assert!(is_privileged_member(Some(&ctx(TournamentRole::Owner))));
        assert!(is_privileged_member(Some(&ctx(TournamentRole::Td))));
        assert!(!is_privileged_member(Some(&ctx(TournamentRole::Scorer))));
        assert!(!is_privileged_member(None));
    }

    #[test]
    fn test_decision_serialization() {
        let allow = serde_json::to_value(Decision::Allow(AllowReason::Sysadmin)).unwrap();
        assert_eq!(
            allow,
            serde_json::json!({"decision": "allow", "reason": "sysadmin"})
        );

        let deny = serde_json::to_value(Decision::Deny(DenyReason::InsufficientRole {
            required: 3,
            actual: 1,
        }))
        .unwrap();
        assert_eq!(deny["decision"], "deny");
        assert_eq!(deny["reason"]["insufficient_role"]["required"], 3);
    }
}
