//! User Types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Platform-wide user role.
///
/// Only [`GlobalRole::Admin`] carries authorization meaning (sysadmin
/// bypass); every other value is opaque to the permission engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GlobalRole {
    /// System administrator.
    Admin,
    /// Signed-in user without any platform function.
    #[default]
    Guest,
    /// Enters scores.
    Scorer,
    /// Validates entered scores.
    Validator,
    /// Tournament director.
    Td,
    /// Runs on-site presentation screens.
    Presenter,
    /// Competitor.
    Player,
    /// Account created from a pending invitation.
    Invitee,
}

impl GlobalRole {
    /// Stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Guest => "guest",
            Self::Scorer => "scorer",
            Self::Validator => "validator",
            Self::Td => "td",
            Self::Presenter => "presenter",
            Self::Player => "player",
            Self::Invitee => "invitee",
        }
    }

    /// Every global role.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Admin,
            Self::Guest,
            Self::Scorer,
            Self::Validator,
            Self::Td,
            Self::Presenter,
            Self::Player,
            Self::Invitee,
        ]
    }
}

impl fmt::Display for GlobalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GlobalRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| Error::UnknownGlobalRole(s.to_string()))
    }
}

/// Resolved identity handed to the authorization core by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque user ID.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Global role.
    pub role: GlobalRole,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>, role: GlobalRole) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            role,
        }
    }
}
