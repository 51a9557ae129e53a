//! Credential refresh against the identity provider.
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use api_types::auth::TokenExchangeResponse;
use tokio::sync::Mutex;

use crate::credentials::{CredentialPair, CredentialStore};

/// Exchanges the stored refresh token for a fresh pair.
///
/// Outcomes are all-or-nothing: any anomaly during the exchange clears the
/// whole pair, so no half-valid session ever survives. Concurrent callers
/// share one in-flight exchange instead of stampeding the provider with
/// the same refresh token.
pub struct SessionRefresher {
    http: reqwest::Client,
    token_url: String,
    api_key: Option<String>,
    store: Arc<dyn CredentialStore>,
    gate: Mutex<()>,
    generation: AtomicU64,
}

impl SessionRefresher {
    pub fn new(
        http: reqwest::Client,
        token_url: String,
        api_key: Option<String>,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            http,
            token_url,
            api_key,
            store,
            gate: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Completed-exchange counter. Sampled before a request goes out so a
    /// later 401 can tell whether some other task already refreshed in the
    /// meantime.
    pub(crate) fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Refreshes now. `true` means a usable pair is in the store.
    pub async fn refresh(&self) -> bool {
        self.refresh_after(self.generation()).await
    }

    /// Refreshes unless another exchange already completed after the
    /// caller observed generation `observed`; in that case the existing
    /// outcome is adopted without touching the network again.
    pub(crate) async fn refresh_after(&self, observed: u64) -> bool {
        // Missing preconditions mean "cannot refresh", not "session is
        // broken": the stored pair, if any, stays untouched.
        if self.store.refresh_token().is_none() {
            return false;
        }
        let Some(api_key) = self.api_key.clone() else {
            tracing::debug!("no identity provider key configured, cannot refresh");
            return false;
        };

        let _gate = self.gate.lock().await;
        if self.generation.load(Ordering::Acquire) != observed {
            return self.store.credentials().is_some();
        }
        let Some(refresh_token) = self.store.refresh_token() else {
            return false;
        };
        let refreshed = self.exchange(&refresh_token, &api_key).await;
        self.generation.fetch_add(1, Ordering::Release);
        refreshed
    }

    async fn exchange(&self, refresh_token: &str, api_key: &str) -> bool {
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];
        let response = self
            .http
            .post(&self.token_url)
            .query(&[("key", api_key)])
            .form(&form)
            .send()
            .await;
        let response = match response {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%err, "token exchange unreachable, clearing credentials");
                self.store.clear_credentials();
                return false;
            }
        };
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "token exchange rejected, clearing credentials");
            self.store.clear_credentials();
            return false;
        }
        let body: TokenExchangeResponse = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(%err, "token exchange body unreadable, clearing credentials");
                self.store.clear_credentials();
                return false;
            }
        };
        match (body.id_token, body.refresh_token) {
            (Some(access_token), Some(refresh_token))
                if !access_token.is_empty() && !refresh_token.is_empty() =>
            {
                self.store.store_credentials(CredentialPair {
                    access_token,
                    refresh_token,
                });
                tracing::debug!("session credentials refreshed");
                true
            }
            _ => {
                tracing::warn!("token exchange answered without a full pair, clearing credentials");
                self.store.clear_credentials();
                false
            }
        }
    }
}
