//! Google OAuth2 client

use super::types::{IdentityError, TokenResponse};
use crate::config::IdentityConfig;
use crate::domain::IdentityProfile;
use crate::error::{AppError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

/// Client for the identity provider's OAuth2 endpoints
#[derive(Clone)]
pub struct IdentityClient {
    config: IdentityConfig,
    http_client: Client,
}

impl IdentityClient {
    /// Create a new identity client. Every outbound call is bounded by
    /// `config.timeout_secs`.
    pub fn new(config: IdentityConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Consent page URL the login endpoint redirects to
    pub fn authorization_url(&self, state: &str) -> Result<String> {
        let mut auth_url = Url::parse(&self.config.auth_url)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid auth URL: {}", e)))?;

        {
            let mut pairs = auth_url.query_pairs_mut();
            pairs.append_pair("access_type", "offline");
            pairs.append_pair("client_id", &self.config.client_id);
            pairs.append_pair("redirect_uri", &self.config.redirect_url);
            pairs.append_pair("response_type", "code");
            pairs.append_pair("scope", &self.config.scopes.join(" "));
            pairs.append_pair("state", state);
        }

        Ok(auth_url.to_string())
    }

    /// Exchange an authorization code for an access token
    pub async fn exchange_code(&self, code: &str) -> std::result::Result<TokenResponse, IdentityError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_url.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        let result = self.post_form(&self.config.token_url, &params).await;

        record_outcome("exchange_code", &result);
        result
    }

    /// Resolve an access token to the caller's profile. Single attempt,
    /// no caching.
    pub async fn fetch_profile(
        &self,
        access_token: &str,
    ) -> std::result::Result<IdentityProfile, IdentityError> {
        tracing::debug!(
            "Fetching userinfo from {} with token length {}",
            self.config.userinfo_url,
            access_token.len()
        );

        let result = self
            .get_with_bearer(&self.config.userinfo_url, access_token)
            .await;

        record_outcome("fetch_profile", &result);
        result
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> std::result::Result<T, IdentityError> {
        let response = self.http_client.post(url).form(params).send().await?;
        decode_response(response).await
    }

    async fn get_with_bearer<T: DeserializeOwned>(
        &self,
        url: &str,
        token: &str,
    ) -> std::result::Result<T, IdentityError> {
        let response = self.http_client.get(url).bearer_auth(token).send().await?;
        decode_response(response).await
    }
}

async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> std::result::Result<T, IdentityError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(IdentityError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| IdentityError::MalformedProfile(e.to_string()))
}

fn record_outcome<T>(operation: &'static str, result: &std::result::Result<T, IdentityError>) {
    let outcome = match result {
        Ok(_) => "success",
        Err(e) => {
            tracing::warn!(operation, error = %e, "Identity provider call failed");
            e.outcome()
        }
    };
    metrics::counter!("syra_identity_requests_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
}
