//! Account and login types.

use serde::{Deserialize, Serialize};

/// The signed-in administrator, as returned by the login endpoint and
/// persisted alongside the bearer token.
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct AdminUser {
    #[serde(default)]
    pub id: Option<i64>,

    pub username: String,

    /// Role tag checked by the console; teaching admins are "edu_admin".
    pub role: String,
}

/// Answer of `POST /auth/login`.
#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AdminUser,
}

/// Body of `POST /auth/login`.
#[derive(Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}
