//! Permission system.
//!
//! Two-tier model:
//! - Global role: the sysadmin marker bypasses every check
//! - Tournament role: ranked membership role compared against a per-action minimum

pub mod actions;
pub mod engine;
pub mod roles;

pub use actions::{
    global_action_granted, is_tournament_scoped, namespace_of, required_rank, ActionPermission,
    GlobalActionGrant, ACTION_NAMESPACES, ACTION_PERMISSIONS, GLOBAL_ACTION_GRANTS,
};
pub use engine::{
    active_membership, can, check_edit_permission, check_rank, evaluate, has_role_level,
    is_privileged_member, require, AllowReason, Decision, DenyReason,
};
pub use roles::{is_sysadmin, rank, role_for_rank, MAX_RANK, SYSADMIN_ROLE};
