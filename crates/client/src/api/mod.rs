//! Typed access to the backend API.
//!
//! All requests flow through one dispatcher that attaches the bearer
//! token, decodes the response envelope and classifies failures. A 401
//! triggers one transparent refresh-and-retry; everything else surfaces
//! as an [`ApiError`](crate::ApiError) variant.
mod auth;
mod dashboard;
mod insights;
mod transactions;
mod user;

pub use dashboard::DashboardData;

use std::sync::Arc;

use api_types::Envelope;
use chrono_tz::Tz;
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::credentials::CredentialStore;
use crate::error::{ApiError, Result};
use crate::refresh::SessionRefresher;

/// Marks where a request is in the 401 recovery path. A retried request
/// can never trigger another refresh, which bounds every call to a single
/// retry regardless of what the backend answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Attempt {
    First,
    Retried,
}

/// Authenticated backend client.
///
/// Cheap to clone; clones share the HTTP pool, the session store and the
/// refresher.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tz: Tz,
    store: Arc<dyn CredentialStore>,
    refresher: Arc<SessionRefresher>,
}

impl ApiClient {
    /// Builds a client from configuration and a session store.
    pub fn new(config: &ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|err| ApiError::InvalidUrl(format!("{}: {err}", config.base_url)))?;
        Url::parse(&config.token_url)
            .map_err(|err| ApiError::InvalidUrl(format!("{}: {err}", config.token_url)))?;

        let http = reqwest::Client::new();
        let refresher = Arc::new(SessionRefresher::new(
            http.clone(),
            config.token_url.clone(),
            config.api_key.clone(),
            Arc::clone(&store),
        ));
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tz: config.tz(),
            store,
            refresher,
        })
    }

    /// The session store shared with the refresher.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// The refresher driving the 401 recovery path. Exposed for callers
    /// that want to refresh eagerly, e.g. on app start.
    pub fn refresher(&self) -> &SessionRefresher {
        &self.refresher
    }

    fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/api/{}",
            self.base_url,
            endpoint.trim_start_matches('/')
        )
    }

    /// Sends one request, decoding the envelope and running the 401
    /// recovery path. `Ok(None)` is a successful envelope without data.
    async fn dispatch<Q, B, T>(
        &self,
        method: Method,
        endpoint: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<Option<T>>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint);
        let mut attempt = Attempt::First;
        loop {
            // Sampled before sending so a 401 can prove its token predates
            // any refresh that completed in the meantime.
            let observed = self.refresher.generation();

            let mut request = self.http.request(method.clone(), url.as_str());
            if let Some(query) = query {
                request = request.query(query);
            }
            if let Some(body) = body {
                request = request.json(body);
            }
            if let Some(token) = self.store.access_token() {
                request = request.bearer_auth(token);
            }

            let response = request.send().await.map_err(ApiError::Connectivity)?;
            let status = response.status();
            let envelope: Envelope<T> = match response.json().await {
                Ok(envelope) => envelope,
                Err(err) => {
                    tracing::warn!(endpoint, %status, %err, "response did not match the envelope");
                    return Err(ApiError::Parse);
                }
            };

            if status == StatusCode::UNAUTHORIZED {
                if attempt == Attempt::First && self.refresher.refresh_after(observed).await {
                    attempt = Attempt::Retried;
                    continue;
                }
                tracing::warn!(endpoint, "authentication exhausted, clearing session");
                self.store.clear_session();
                return Err(ApiError::SessionExpired);
            }

            if status.is_success() && envelope.success {
                return Ok(envelope.data);
            }

            let message = if envelope.message.is_empty() {
                format!("HTTP error! status: {}", status.as_u16())
            } else {
                envelope.message
            };
            tracing::debug!(endpoint, %status, "request rejected by the backend");
            return Err(ApiError::Validation(message));
        }
    }

    pub(crate) async fn get<T>(&self, endpoint: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.dispatch::<(), (), T>(Method::GET, endpoint, None, None)
            .await?
            .ok_or(ApiError::Parse)
    }

    pub(crate) async fn get_query<Q, T>(&self, endpoint: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch::<Q, (), T>(Method::GET, endpoint, Some(query), None)
            .await?
            .ok_or(ApiError::Parse)
    }

    pub(crate) async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch::<(), B, T>(Method::POST, endpoint, None, Some(body))
            .await?
            .ok_or(ApiError::Parse)
    }

    /// POST whose response data, if any, is not interesting.
    pub(crate) async fn post_discard<B>(&self, endpoint: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.dispatch::<(), B, serde_json::Value>(Method::POST, endpoint, None, Some(body))
            .await
            .map(|_| ())
    }

    /// Bodyless POST whose response data is not interesting.
    pub(crate) async fn post_empty_discard(&self, endpoint: &str) -> Result<()> {
        self.dispatch::<(), (), serde_json::Value>(Method::POST, endpoint, None, None)
            .await
            .map(|_| ())
    }

    pub(crate) async fn put<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch::<(), B, T>(Method::PUT, endpoint, None, Some(body))
            .await?
            .ok_or(ApiError::Parse)
    }

    pub(crate) async fn delete_discard(&self, endpoint: &str) -> Result<()> {
        self.dispatch::<(), (), serde_json::Value>(Method::DELETE, endpoint, None, None)
            .await
            .map(|_| ())
    }
}
