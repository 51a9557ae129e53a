use api_types::auth::{AuthPayload, LoginRequest, RegisterRequest, UserSummary, VerifiedUser};

use super::ApiClient;
use crate::credentials::CredentialPair;
use crate::error::Result;

impl ApiClient {
    /// Authenticates and adopts the returned session locally.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let payload: AuthPayload = self.post("auth/login", &request).await?;
        self.adopt_session(&payload);
        Ok(payload)
    }

    /// Creates an account. The backend signs the new user in, so the
    /// session is adopted exactly as for [`login`](Self::login).
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<AuthPayload> {
        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };
        let payload: AuthPayload = self.post("auth/register", &request).await?;
        self.adopt_session(&payload);
        Ok(payload)
    }

    /// Tells the backend the session is over and wipes local state. The
    /// server call is best-effort: local state clears no matter what.
    pub async fn logout(&self) {
        if let Err(err) = self.post_empty_discard("auth/logout").await {
            tracing::warn!(%err, "server logout failed, clearing local session anyway");
        }
        self.store.clear_session();
    }

    /// Asks the backend whether the current token is valid.
    pub async fn verify(&self) -> Result<VerifiedUser> {
        self.get("auth/verify").await
    }

    fn adopt_session(&self, payload: &AuthPayload) {
        // A lone token is useless: without its refresh counterpart the
        // session would die within the hour and could never recover.
        if let (Some(access), Some(refresh)) = (&payload.id_token, &payload.refresh_token) {
            self.store.store_credentials(CredentialPair {
                access_token: access.clone(),
                refresh_token: refresh.clone(),
            });
        } else {
            tracing::warn!("auth response missing a full token pair, session not stored");
        }
        self.store.cache_user(UserSummary {
            uid: payload.uid.clone(),
            email: payload.email.clone(),
            name: payload.name.clone(),
        });
    }
}
