//! QueryFlow client binding.
//!
//! Thin typed binding over the hosted QueryFlow query endpoint. Request
//! signing, on-chain settlement, and receipt verification all happen inside
//! the service; this module only issues the paid call, reads back the typed
//! payload, and records the settlement receipt so callers can link to it.
//!
//! Every call is billed. There is no retry machinery here on purpose: a
//! failed attempt surfaces as an error and the user decides whether to pay
//! again.

use crate::error::SdkError;
use crate::types::{
    MarketInsight, PaymentMode, PaymentReceipt, Prediction, PricePrediction, Sentiment,
    TechnicalAnalysis, Trend,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// The default hosted QueryFlow endpoint.
const DEFAULT_BASE_URL: &str = "https://api.queryflow.dev/v1";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection options for [`QueryFlowClient`].
///
/// `mode` defaults to [`PaymentMode::Signature`], the SDK default; callers
/// wanting real on-chain payments enable [`PaymentMode::Transaction`]
/// explicitly.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub mode: PaymentMode,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            mode: PaymentMode::Signature,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Capability surface of the pay-per-query service.
///
/// Two paid calls plus an out-of-band read of the last settlement record.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Purchase a market sentiment insight over a basket of assets.
    async fn market(&self, assets: &[String], timeframe: &str) -> Result<MarketInsight, SdkError>;

    /// Purchase a price prediction for a single asset over a horizon.
    async fn predict(&self, asset: &str, horizon: &str) -> Result<PricePrediction, SdkError>;

    /// Settlement record of the most recent paid call, if any.
    fn last_payment(&self) -> Option<PaymentReceipt>;
}

/// HTTP client for the hosted QueryFlow service.
///
/// Authenticates with the payment credential as a bearer token and stores
/// the settlement receipt of the most recent successful call.
pub struct QueryFlowClient {
    client: Client,
    base_url: String,
    private_key: String,
    mode: PaymentMode,
    timeout_secs: u64,
    last_receipt: Mutex<Option<PaymentReceipt>>,
}

/// Wire shape of a successful query response.
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: T,
    payment: SettlementInfo,
}

/// Settlement block attached to every paid response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettlementInfo {
    tx_hash: Option<String>,
    paid_at: Option<DateTime<Utc>>,
}

impl SettlementInfo {
    /// Convert to a receipt, treating a missing or empty hash as no receipt.
    fn into_receipt(self) -> Option<PaymentReceipt> {
        let tx_hash = self.tx_hash.filter(|hash| !hash.is_empty())?;
        Some(PaymentReceipt {
            tx_hash,
            paid_at: self.paid_at.unwrap_or_else(Utc::now),
        })
    }
}

impl QueryFlowClient {
    /// Create a new client with the given payment credential and options.
    pub fn new(private_key: impl Into<String>, options: ClientOptions) -> Result<Self, SdkError> {
        let timeout_secs = options.timeout.as_secs();
        let client = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| SdkError::Connection {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: options.base_url,
            private_key: private_key.into(),
            mode: options.mode,
            timeout_secs,
            last_receipt: Mutex::new(None),
        })
    }

    /// Issue one paid query and capture the settlement receipt.
    async fn post_query<T>(&self, path: &str, body: Value) -> Result<T, SdkError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let request_id = Uuid::new_v4();

        debug!(
            url = url.as_str(),
            request_id = %request_id,
            mode = self.mode.as_str(),
            "Sending QueryFlow query"
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.private_key))
            .header("x-request-id", request_id.to_string())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SdkError::Timeout {
                        timeout_secs: self.timeout_secs,
                    }
                } else {
                    SdkError::Connection {
                        message: format!("Request to QueryFlow service failed: {}", e),
                    }
                }
            })?;

        let status = response.status();
        let body_text = response.text().await.map_err(|e| SdkError::ResponseParse {
            message: format!("Failed to read response body: {}", e),
        })?;

        if !status.is_success() {
            return Err(Self::map_http_error(status, &body_text));
        }

        let parsed: QueryResponse<T> =
            serde_json::from_str(&body_text).map_err(|e| SdkError::ResponseParse {
                message: format!("Invalid JSON in response: {}", e),
            })?;

        let receipt = parsed
            .payment
            .into_receipt()
            .ok_or(SdkError::MissingReceipt)?;
        *self.last_receipt.lock().unwrap() = Some(receipt);

        Ok(parsed.result)
    }

    /// Map an HTTP status code to the appropriate `SdkError`.
    fn map_http_error(status: reqwest::StatusCode, body_text: &str) -> SdkError {
        match status.as_u16() {
            401 | 403 => SdkError::AuthFailed,
            402 => {
                let message = serde_json::from_str::<Value>(body_text)
                    .ok()
                    .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
                    .unwrap_or_else(|| "payment required".to_string());
                SdkError::PaymentDeclined { message }
            }
            429 => {
                // Try to parse retry-after from the response body.
                let retry_after = serde_json::from_str::<Value>(body_text)
                    .ok()
                    .and_then(|v| v["error"]["retry_after_secs"].as_u64())
                    .unwrap_or(30);
                SdkError::RateLimited {
                    retry_after_secs: retry_after,
                }
            }
            _ => SdkError::ApiRequest {
                message: format!("HTTP {} from QueryFlow service: {}", status, body_text),
            },
        }
    }
}

#[async_trait]
impl InsightProvider for QueryFlowClient {
    async fn market(&self, assets: &[String], timeframe: &str) -> Result<MarketInsight, SdkError> {
        let body = serde_json::json!({
            "assets": assets,
            "timeframe": timeframe,
            "mode": self.mode,
        });
        self.post_query("/market", body).await
    }

    async fn predict(&self, asset: &str, horizon: &str) -> Result<PricePrediction, SdkError> {
        let body = serde_json::json!({
            "asset": asset,
            "horizon": horizon,
            "mode": self.mode,
        });
        self.post_query("/predict", body).await
    }

    fn last_payment(&self) -> Option<PaymentReceipt> {
        self.last_receipt.lock().unwrap().clone()
    }
}

/// A mock insight provider for testing and development.
///
/// Queued responses are consumed in order; an empty queue falls back to a
/// canned sample payload. Every call bumps the call counter so tests can
/// assert how many paid calls an action actually made.
pub struct MockInsightProvider {
    market_responses: Mutex<Vec<Result<MarketInsight, SdkError>>>,
    predict_responses: Mutex<Vec<Result<PricePrediction, SdkError>>>,
    receipt: Mutex<Option<PaymentReceipt>>,
    calls: AtomicUsize,
}

impl MockInsightProvider {
    pub fn new() -> Self {
        Self {
            market_responses: Mutex::new(Vec::new()),
            predict_responses: Mutex::new(Vec::new()),
            receipt: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock that answers market queries with the given insight and
    /// carries a settlement receipt.
    pub fn with_market(insight: MarketInsight, tx_hash: &str) -> Self {
        let provider = Self::new();
        provider.queue_market(Ok(insight));
        provider.set_receipt(tx_hash);
        provider
    }

    /// Create a mock that answers price queries with the given prediction and
    /// carries a settlement receipt.
    pub fn with_prediction(prediction: PricePrediction, tx_hash: &str) -> Self {
        let provider = Self::new();
        provider.queue_predict(Ok(prediction));
        provider.set_receipt(tx_hash);
        provider
    }

    /// Queue a response for the next `market` call.
    pub fn queue_market(&self, response: Result<MarketInsight, SdkError>) {
        self.market_responses.lock().unwrap().push(response);
    }

    /// Queue a response for the next `predict` call.
    pub fn queue_predict(&self, response: Result<PricePrediction, SdkError>) {
        self.predict_responses.lock().unwrap().push(response);
    }

    /// Set the settlement receipt returned by `last_payment`.
    pub fn set_receipt(&self, tx_hash: &str) {
        *self.receipt.lock().unwrap() = Some(PaymentReceipt::new(tx_hash));
    }

    /// Number of paid calls made against this mock.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// A plausible market insight for tests and demos.
    pub fn sample_market() -> MarketInsight {
        MarketInsight {
            sentiment: Sentiment {
                score: 72,
                trend: Trend::Bullish,
                summary: "Institutional demand is lifting the majors while funding rates stay balanced.".to_string(),
            },
            factors: vec![
                "ETF inflows".to_string(),
                "Hash rate at all-time high".to_string(),
                "Stablecoin supply expanding".to_string(),
            ],
        }
    }

    /// A plausible price prediction for tests and demos.
    pub fn sample_prediction() -> PricePrediction {
        PricePrediction {
            prediction: Prediction {
                target_price: 65000.5,
                confidence: 80,
                direction: Trend::Bearish,
            },
            context: "Price is stalling under the range high while momentum cools.".to_string(),
            technical_analysis: TechnicalAnalysis {
                rsi: 45.3,
                support: 60000.0,
                resistance: 70000.0,
            },
        }
    }
}

impl Default for MockInsightProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InsightProvider for MockInsightProvider {
    async fn market(&self, _assets: &[String], _timeframe: &str) -> Result<MarketInsight, SdkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut responses = self.market_responses.lock().unwrap();
        if responses.is_empty() {
            Ok(Self::sample_market())
        } else {
            responses.remove(0)
        }
    }

    async fn predict(&self, _asset: &str, _horizon: &str) -> Result<PricePrediction, SdkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut responses = self.predict_responses.lock().unwrap();
        if responses.is_empty() {
            Ok(Self::sample_prediction())
        } else {
            responses.remove(0)
        }
    }

    fn last_payment(&self) -> Option<PaymentReceipt> {
        self.receipt.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_options_default() {
        let options = ClientOptions::default();
        assert_eq!(options.mode, PaymentMode::Signature);
        assert_eq!(options.base_url, DEFAULT_BASE_URL);
        assert_eq!(options.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_map_http_error_auth() {
        let err = QueryFlowClient::map_http_error(reqwest::StatusCode::UNAUTHORIZED, "");
        assert!(matches!(err, SdkError::AuthFailed));

        let err = QueryFlowClient::map_http_error(reqwest::StatusCode::FORBIDDEN, "");
        assert!(matches!(err, SdkError::AuthFailed));
    }

    #[test]
    fn test_map_http_error_payment_declined() {
        let body = r#"{"error": {"message": "insufficient AVAX balance"}}"#;
        let err = QueryFlowClient::map_http_error(reqwest::StatusCode::PAYMENT_REQUIRED, body);
        match err {
            SdkError::PaymentDeclined { message } => {
                assert_eq!(message, "insufficient AVAX balance");
            }
            other => panic!("Expected PaymentDeclined, got {:?}", other),
        }
    }

    #[test]
    fn test_map_http_error_payment_declined_without_body() {
        let err = QueryFlowClient::map_http_error(reqwest::StatusCode::PAYMENT_REQUIRED, "");
        match err {
            SdkError::PaymentDeclined { message } => assert_eq!(message, "payment required"),
            other => panic!("Expected PaymentDeclined, got {:?}", other),
        }
    }

    #[test]
    fn test_map_http_error_rate_limited() {
        let body = r#"{"error": {"retry_after_secs": 12}}"#;
        let err = QueryFlowClient::map_http_error(reqwest::StatusCode::TOO_MANY_REQUESTS, body);
        match err {
            SdkError::RateLimited { retry_after_secs } => assert_eq!(retry_after_secs, 12),
            other => panic!("Expected RateLimited, got {:?}", other),
        }
    }

    #[test]
    fn test_map_http_error_server() {
        let err =
            QueryFlowClient::map_http_error(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom");
        match err {
            SdkError::ApiRequest { message } => {
                assert!(message.contains("HTTP 500"));
                assert!(message.contains("boom"));
            }
            other => panic!("Expected ApiRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_settlement_into_receipt() {
        let info = SettlementInfo {
            tx_hash: Some("0xabc".into()),
            paid_at: None,
        };
        let receipt = info.into_receipt().unwrap();
        assert_eq!(receipt.tx_hash, "0xabc");

        let info = SettlementInfo {
            tx_hash: Some(String::new()),
            paid_at: None,
        };
        assert!(info.into_receipt().is_none());

        let info = SettlementInfo {
            tx_hash: None,
            paid_at: None,
        };
        assert!(info.into_receipt().is_none());
    }

    #[test]
    fn test_query_response_wire_shape() {
        let json = r#"{
            "result": {
                "sentiment": { "score": 61, "trend": "neutral", "summary": "Chop" },
                "factors": []
            },
            "payment": { "txHash": "0xfeed", "paidAt": "2025-11-02T10:30:00Z" }
        }"#;
        let parsed: QueryResponse<MarketInsight> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.result.sentiment.score, 61);
        let receipt = parsed.payment.into_receipt().unwrap();
        assert_eq!(receipt.tx_hash, "0xfeed");
    }

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let mock = MockInsightProvider::new();
        assert_eq!(mock.call_count(), 0);

        let assets = vec!["BTC".to_string()];
        mock.market(&assets, "24h").await.unwrap();
        mock.predict("BTC", "24h").await.unwrap();
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_queue_order() {
        let mock = MockInsightProvider::new();
        mock.queue_market(Err(SdkError::AuthFailed));
        mock.queue_market(Ok(MockInsightProvider::sample_market()));

        let assets = vec!["BTC".to_string()];
        assert!(mock.market(&assets, "24h").await.is_err());
        assert!(mock.market(&assets, "24h").await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_default_payloads() {
        let mock = MockInsightProvider::new();
        let assets = vec!["BTC".to_string(), "ETH".to_string()];

        let insight = mock.market(&assets, "24h").await.unwrap();
        assert_eq!(insight.sentiment.score, 72);

        let prediction = mock.predict("BTC", "7d").await.unwrap();
        assert_eq!(prediction.prediction.target_price, 65000.5);
    }

    #[test]
    fn test_mock_receipt() {
        let mock = MockInsightProvider::new();
        assert!(mock.last_payment().is_none());

        mock.set_receipt("0xabc");
        assert_eq!(mock.last_payment().unwrap().tx_hash, "0xabc");
    }
}
