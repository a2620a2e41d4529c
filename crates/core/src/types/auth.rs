//! Authentication records for admin and customer accounts.
//!
//! Identity itself travels in HttpOnly cookies; these are the profile
//! records the API returns alongside them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AdminId, CustomerId};

/// An admin account profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: AdminId,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

/// A customer account profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

/// Response to an admin login/register/refresh call.
///
/// The `token` mirrors the session cookie for diagnostic display; the
/// client never attaches it to requests (cookies carry identity).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub admin: Admin,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}
