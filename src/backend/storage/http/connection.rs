//! Connection to the persistence collaborator: base URL, HTTP client, and
//! the bearer token issued at login.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::warn;

/// Failure of a collaborator call. The error payload is surfaced verbatim
/// in `message`; the core never parses it deeply.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API request failed ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("API transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

struct ConnectionInner {
    base_url: String,
    client: reqwest::Client,
    token: RwLock<Option<String>>,
}

/// Shared handle to the remote store. Cloning is cheap; all clones share
/// the same client and token.
#[derive(Clone)]
pub struct ApiConnection {
    inner: Arc<ConnectionInner>,
}

impl ApiConnection {
    /// `base_url` is the API root including any mount prefix, e.g.
    /// `http://localhost:4000/api`. A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            inner: Arc::new(ConnectionInner {
                base_url,
                client: reqwest::Client::new(),
                token: RwLock::new(None),
            }),
        }
    }

    /// Install the bearer token used on every subsequent request.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.inner.token.write().expect("token lock poisoned") = Some(token.into());
    }

    pub fn has_token(&self) -> bool {
        self.inner.token.read().expect("token lock poisoned").is_some()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.inner.base_url, path);
        let mut builder = self.inner.client.request(method, url);
        if let Some(token) = self.inner.token.read().expect("token lock poisoned").as_deref() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn check(&self, path: &str, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        warn!(%path, status = status.as_u16(), "persistence call failed");
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    pub(super) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path).send().await?;
        Ok(self.check(path, response).await?.json().await?)
    }

    pub(super) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Ok(self.check(path, response).await?.json().await?)
    }

    pub(super) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        Ok(self.check(path, response).await?.json().await?)
    }

    pub(super) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE, path).send().await?;
        // 204, no body to decode.
        self.check(path, response).await?;
        Ok(())
    }
}
