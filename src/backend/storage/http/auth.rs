//! Auth endpoints of the persistence collaborator.
//!
//! Session handling itself is the collaborator's job; the core only
//! exchanges credentials for a bearer token and pins it on the connection.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::connection::{ApiConnection, ApiError};

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// The account record `POST /auth/register` returns.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

impl ApiConnection {
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthUser, ApiError> {
        let user: AuthUser = self
            .post_json("/auth/register", &Credentials { email, password })
            .await?;
        info!(email, "registered account");
        Ok(user)
    }

    /// Log in and keep the issued bearer token for every later call.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let response: TokenResponse = self
            .post_json("/auth/login", &Credentials { email, password })
            .await?;
        self.set_token(response.token);
        info!(email, "logged in");
        Ok(())
    }
}
