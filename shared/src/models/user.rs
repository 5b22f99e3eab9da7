//! User session models
//!
//! Authentication lives at the front boundary; the service only sees the
//! resulting session and enforces the role gate.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The two roles of the office
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Sees everything: dashboard, movements, orders, stats, admin
    Admin,
    /// Sees only the distribution page
    Secretary,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Secretary => "SECRETARY",
        }
    }
}

impl FromStr for UserRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(UserRole::Admin),
            "SECRETARY" => Ok(UserRole::Secretary),
            _ => Err(()),
        }
    }
}

/// The logged-in user attached to each request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    pub name: String,
    pub role: UserRole,
}
