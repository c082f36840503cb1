//! The query action: one paid insight purchase per invocation.
//!
//! Deliberately thin. Checks the payment credential, forwards the intent to
//! the client binding, and reshapes whatever comes back into the result
//! envelope the view renders. No retries, no error classification, no
//! partial results.

use crate::client::{InsightProvider, MockInsightProvider, QueryFlowClient};
use crate::config::AppConfig;
use crate::error::{Result, SdkError};
use crate::types::{InsightData, QueryIntent, QueryKind, QueryOutcome};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Message surfaced when the payment credential is not configured.
pub const MISSING_KEY_ERROR: &str = "Server Error: Missing PRIVATE_KEY in .env.local";

/// Fallback message for failures that carry no text of their own.
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Message surfaced when the intent names no assets.
pub const NO_ASSETS_ERROR: &str = "No assets selected";

/// The one action of the demo: purchase an AI market insight.
///
/// Every invocation makes at most one paid call. The credential check runs
/// before the provider is touched, so a missing key never costs anything.
pub struct InsightAction {
    // Presence only; the value itself is never logged.
    credential: Option<String>,
    provider: Arc<dyn InsightProvider>,
}

impl InsightAction {
    /// Build the action from configuration.
    ///
    /// The payment credential is read from the environment variable named in
    /// `config.sdk.private_key_env`. When it is absent the action still
    /// constructs; `invoke` then reports the configuration failure without
    /// making any paid call.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let credential = std::env::var(&config.sdk.private_key_env)
            .ok()
            .filter(|key| !key.is_empty());

        let provider: Arc<dyn InsightProvider> = match &credential {
            Some(key) => Arc::new(QueryFlowClient::new(
                key.clone(),
                config.sdk.client_options(),
            )?),
            None => {
                warn!(
                    var = config.sdk.private_key_env.as_str(),
                    "Payment credential not set; queries will fail until configured"
                );
                Arc::new(MockInsightProvider::new())
            }
        };

        Ok(Self {
            credential,
            provider,
        })
    }

    /// Build the action with an explicit credential and provider.
    pub fn with_provider(credential: Option<String>, provider: Arc<dyn InsightProvider>) -> Self {
        Self {
            credential,
            provider,
        }
    }

    /// Whether a payment credential is configured.
    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Run one paid query and reshape the response into the result envelope.
    ///
    /// The outcome is tagged by the query type that produced it, so the view
    /// can dispatch on the payload instead of trusting live selector state.
    pub async fn invoke(&self, intent: QueryIntent) -> QueryOutcome {
        if self.credential.is_none() {
            return QueryOutcome::failure(MISSING_KEY_ERROR);
        }

        let Some(subject) = intent.subject() else {
            return QueryOutcome::failure(NO_ASSETS_ERROR);
        };

        info!(
            kind = %intent.kind,
            assets = ?intent.assets,
            timeframe = intent.timeframe.as_str(),
            "Querying market insights"
        );

        let result = match intent.kind {
            QueryKind::Market => self
                .provider
                .market(&intent.assets, &intent.timeframe)
                .await
                .map(InsightData::Market),
            QueryKind::Price => self
                .provider
                .predict(subject, &intent.timeframe)
                .await
                .map(InsightData::Price),
        };

        match result {
            Ok(data) => match self.provider.last_payment() {
                Some(receipt) => {
                    match &data {
                        InsightData::Market(insight) => info!(
                            score = insight.sentiment.score,
                            tx_hash = receipt.tx_hash.as_str(),
                            "Query succeeded"
                        ),
                        InsightData::Price(prediction) => info!(
                            target_price = prediction.prediction.target_price,
                            tx_hash = receipt.tx_hash.as_str(),
                            "Query succeeded"
                        ),
                    }
                    QueryOutcome::success(data, receipt)
                }
                None => {
                    error!("Query succeeded but no settlement receipt was recorded");
                    QueryOutcome::failure(SdkError::MissingReceipt.to_string())
                }
            },
            Err(err) => {
                error!(error = %err, "SDK error");
                let message = err.to_string();
                if message.is_empty() {
                    QueryOutcome::failure(UNKNOWN_ERROR)
                } else {
                    QueryOutcome::failure(message)
                }
            }
        }
    }
}
