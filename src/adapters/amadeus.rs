use crate::config::ApiConfig;
use crate::domain::model::{AccessToken, FlightQuery};
use crate::domain::offers::{ApiErrors, FlightOffers};
use crate::domain::ports::FlightOffersApi;
use crate::utils::error::{FinderError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Client-credentials token endpoint plus the flight-offers search endpoint.
pub struct AmadeusClient {
    config: ApiConfig,
    client: Client,
}

impl AmadeusClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl FlightOffersApi for AmadeusClient {
    async fn access_token(&self) -> Result<AccessToken> {
        tracing::debug!("Requesting access token from: {}", self.config.token_url);

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.api_key.as_str()),
            ("client_secret", self.config.api_secret.as_str()),
        ];

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| FinderError::TokenAcquisitionFailed {
                reason: format!("token request failed: {}", e),
            })?;

        let status = response.status();
        tracing::debug!("Token endpoint status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| FinderError::TokenAcquisitionFailed {
                reason: format!("failed to read token response ({}): {}", status, e),
            })?;

        if !status.is_success() {
            return Err(FinderError::TokenAcquisitionFailed {
                reason: format!(
                    "token endpoint returned {}: {}",
                    status,
                    describe_error_body(&body)
                ),
            });
        }

        let token: AccessToken =
            serde_json::from_str(&body).map_err(|e| FinderError::TokenAcquisitionFailed {
                reason: format!("unexpected token response: {}", e),
            })?;

        if token.access_token.is_empty() {
            return Err(FinderError::TokenAcquisitionFailed {
                reason: "token endpoint returned an empty access_token".to_string(),
            });
        }

        tracing::info!("Access token acquired (expires in {:?}s)", token.expires_in);
        Ok(token)
    }

    async fn search_offers(
        &self,
        token: &AccessToken,
        query: &FlightQuery,
    ) -> Result<FlightOffers> {
        let params = query.query_pairs();
        tracing::debug!(
            "Searching flight offers at {} with {:?}",
            self.config.search_url,
            params
        );

        let response = self
            .client
            .get(&self.config.search_url)
            .bearer_auth(&token.access_token)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Search endpoint status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FinderError::SearchRejected {
                status: status.as_u16(),
                detail: describe_error_body(&body),
            });
        }

        let body = response.text().await?;
        let offers: FlightOffers = serde_json::from_str(&body)?;
        tracing::info!(
            "Received {} flight offers for {} -> {}",
            offers.count(),
            query.origin,
            query.destination
        );
        Ok(offers)
    }
}

/// Summarises an API error payload, falling back to the trimmed raw body.
fn describe_error_body(body: &str) -> String {
    let parsed = serde_json::from_str::<ApiErrors>(body)
        .ok()
        .and_then(|errors| errors.summary());

    match parsed {
        Some(summary) => summary,
        None if body.trim().is_empty() => "<empty response>".to_string(),
        None => body.trim().to_string(),
    }
}
