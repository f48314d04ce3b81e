use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::rates::{RateProvider, RateSnapshot, RateSource, RateTable};

/// ExchangeRate-API implementation for RateProvider
pub struct ExchangeRateApiProvider {
    base_url: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct LatestRatesResponse {
    time_last_updated: i64,
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(
        name = "RateFetch",
        skip(self),
        fields(base = %base)
    )]
    async fn latest(&self, base: &str) -> Result<RateSnapshot> {
        let url = format!("{}/v4/latest/{}", self.base_url, base);
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder().user_agent("fxconv/1.0").build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for base: {} URL: {}", e, base, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for base: {}",
                response.status(),
                base
            ));
        }

        let text = response.text().await?;

        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse rates response for {}: {}", base, e))?;

        if data.rates.is_empty() {
            return Err(anyhow!("No rates found for base: {}", base));
        }

        let last_updated = Utc
            .timestamp_opt(data.time_last_updated, 0)
            .single()
            .unwrap_or_else(Utc::now);

        Ok(RateSnapshot {
            table: RateTable::new(base, data.rates),
            last_updated,
            source: RateSource::Live,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(base: &str, mock_response: &str) -> wiremock::MockServer {
        let mock_server = wiremock::MockServer::start().await;
        let request_path = format!("/v4/latest/{base}");

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_rate_fetch() {
        let mock_response = r#"{
            "base": "USD",
            "time_last_updated": 1755907201,
            "rates": {
                "USD": 1,
                "IDR": 16234.5,
                "EUR": 0.86
            }
        }"#;

        let mock_server = create_mock_server("USD", mock_response).await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri());

        let snapshot = provider.latest("USD").await.unwrap();
        assert_eq!(snapshot.source, RateSource::Live);
        assert_eq!(snapshot.table.base(), "USD");
        assert_eq!(snapshot.table.get("USD"), Some(1.0));
        assert_eq!(snapshot.table.get("IDR"), Some(16234.5));
        assert_eq!(snapshot.table.get("EUR"), Some(0.86));
        assert_eq!(snapshot.last_updated.timestamp(), 1755907201);
    }

    #[tokio::test]
    async fn test_base_rate_inserted_when_missing_from_payload() {
        let mock_response = r#"{
            "time_last_updated": 1755907201,
            "rates": {
                "USD": 1.18,
                "GBP": 0.86
            }
        }"#;

        let mock_server = create_mock_server("EUR", mock_response).await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri());

        let snapshot = provider.latest("EUR").await.unwrap();
        assert_eq!(snapshot.table.get("EUR"), Some(1.0));
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = MockServer::start().await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/v4/latest/USD"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let result = provider.latest("USD").await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for base: USD"
        );
    }

    #[tokio::test]
    async fn test_api_malformed_response() {
        // "rate" instead of "rates"
        let mock_response = r#"{
            "time_last_updated": 1755907201,
            "rate": {}
        }"#;

        let mock_server = create_mock_server("USD", mock_response).await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri());

        let result = provider.latest("USD").await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse rates response for USD")
        );
    }

    #[tokio::test]
    async fn test_empty_rates_is_an_error() {
        let mock_response = r#"{
            "time_last_updated": 1755907201,
            "rates": {}
        }"#;

        let mock_server = create_mock_server("USD", mock_response).await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri());

        let result = provider.latest("USD").await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "No rates found for base: USD"
        );
    }
}
