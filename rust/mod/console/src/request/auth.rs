//! Auth requests.

use campus_flux::request;

#[request("auth/login")]
pub struct LoginReq {
    pub username: String,
    pub password: String,
}

/// Resume a session from a previously issued token.
#[request("auth/restore")]
pub struct RestoreSessionReq {
    pub user_id: i64,
    pub username: String,
    pub token: String,
}

/// Drop the session and everything loaded with it.
#[request("auth/logout")]
pub struct LogoutReq;
