//! Core type definitions for the QueryFlow insights demo.
//!
//! Defines the query intents, the insight payloads returned by the service,
//! the payment receipt, and the result envelope handed to the view layer.
//! Wire field names are camelCase to match the service JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two query types the demo can purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Market,
    Price,
}

impl QueryKind {
    /// The other query type, for the selector toggle.
    pub fn toggle(self) -> Self {
        match self {
            QueryKind::Market => QueryKind::Price,
            QueryKind::Price => QueryKind::Market,
        }
    }
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryKind::Market => write!(f, "market"),
            QueryKind::Price => write!(f, "price"),
        }
    }
}

/// How the client settles payment for a query.
///
/// The SDK defaults to `Signature` (signed payment intent); the demo
/// explicitly enables `Transaction` for real on-chain payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    Signature,
    #[serde(rename = "tx")]
    Transaction,
}

impl PaymentMode {
    /// Wire value sent to the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Signature => "signature",
            PaymentMode::Transaction => "tx",
        }
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single user-triggered query, built fresh per action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryIntent {
    pub kind: QueryKind,
    pub assets: Vec<String>,
    pub timeframe: String,
}

impl QueryIntent {
    /// Create a market sentiment intent over a basket of assets.
    pub fn market(assets: Vec<String>, timeframe: impl Into<String>) -> Self {
        Self {
            kind: QueryKind::Market,
            assets,
            timeframe: timeframe.into(),
        }
    }

    /// Create a price prediction intent for a single asset.
    ///
    /// The shared timeframe doubles as the prediction horizon.
    pub fn price(asset: impl Into<String>, horizon: impl Into<String>) -> Self {
        Self {
            kind: QueryKind::Price,
            assets: vec![asset.into()],
            timeframe: horizon.into(),
        }
    }

    /// The prediction subject: the first asset symbol, if any.
    pub fn subject(&self) -> Option<&str> {
        self.assets.first().map(String::as_str)
    }
}

/// Market direction as reported by the service.
///
/// Serves both the sentiment trend and the prediction direction; the service
/// never emits `neutral` as a prediction bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Bullish => write!(f, "bullish"),
            Trend::Bearish => write!(f, "bearish"),
            Trend::Neutral => write!(f, "neutral"),
        }
    }
}

/// Aggregate market sentiment for the queried basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// 0 to 100.
    pub score: u8,
    pub trend: Trend,
    pub summary: String,
}

/// Payload of a market sentiment query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketInsight {
    pub sentiment: Sentiment,
    pub factors: Vec<String>,
}

/// The headline numbers of a price prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub target_price: f64,
    /// 0 to 100.
    pub confidence: u8,
    pub direction: Trend,
}

/// Indicator levels accompanying a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalAnalysis {
    pub rsi: f64,
    pub support: f64,
    pub resistance: f64,
}

/// Payload of a price prediction query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePrediction {
    pub prediction: Prediction,
    pub context: String,
    pub technical_analysis: TechnicalAnalysis,
}

/// An insight payload tagged by the query type that produced it.
///
/// The tag is attached at the action boundary, so the view dispatches on the
/// payload itself and a late response can never render into the wrong block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "queryType", rename_all = "lowercase")]
pub enum InsightData {
    Market(MarketInsight),
    Price(PricePrediction),
}

impl InsightData {
    /// The query type this payload answers.
    pub fn kind(&self) -> QueryKind {
        match self {
            InsightData::Market(_) => QueryKind::Market,
            InsightData::Price(_) => QueryKind::Price,
        }
    }
}

/// Settlement record for the last paid query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub tx_hash: String,
    pub paid_at: DateTime<Utc>,
}

impl PaymentReceipt {
    /// Create a receipt stamped with the current time.
    pub fn new(tx_hash: impl Into<String>) -> Self {
        Self {
            tx_hash: tx_hash.into(),
            paid_at: Utc::now(),
        }
    }

    /// Block explorer link for this transaction.
    ///
    /// Plain template substitution; the hash is not validated.
    pub fn explorer_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.tx_hash)
    }
}

/// The result envelope every query resolves to, success or failure.
///
/// Exactly one of the two shapes is populated; each new query overwrites the
/// previous one in the view.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Success {
        data: InsightData,
        receipt: PaymentReceipt,
    },
    Failure {
        error: String,
    },
}

impl QueryOutcome {
    /// Create a success outcome.
    pub fn success(data: InsightData, receipt: PaymentReceipt) -> Self {
        QueryOutcome::Success { data, receipt }
    }

    /// Create a failure outcome.
    pub fn failure(error: impl Into<String>) -> Self {
        QueryOutcome::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryOutcome::Success { .. })
    }

    /// The failure message, if this is a failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            QueryOutcome::Failure { error } => Some(error),
            QueryOutcome::Success { .. } => None,
        }
    }

    /// Serialize to the wire envelope `{ success, data?, txHash?, error? }`.
    pub fn to_envelope(&self) -> serde_json::Value {
        match self {
            QueryOutcome::Success { data, receipt } => serde_json::json!({
                "success": true,
                "data": data,
                "txHash": receipt.tx_hash,
            }),
            QueryOutcome::Failure { error } => serde_json::json!({
                "success": false,
                "error": error,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_market() -> MarketInsight {
        MarketInsight {
            sentiment: Sentiment {
                score: 72,
                trend: Trend::Bullish,
                summary: "Momentum building across majors".into(),
            },
            factors: vec!["ETF inflows".into(), "Rate cut odds".into()],
        }
    }

    #[test]
    fn test_intent_constructors() {
        let intent = QueryIntent::market(vec!["BTC".into(), "ETH".into()], "24h");
        assert_eq!(intent.kind, QueryKind::Market);
        assert_eq!(intent.subject(), Some("BTC"));

        let intent = QueryIntent::price("BTC", "24h");
        assert_eq!(intent.kind, QueryKind::Price);
        assert_eq!(intent.assets, vec!["BTC".to_string()]);
    }

    #[test]
    fn test_query_kind_toggle() {
        assert_eq!(QueryKind::Market.toggle(), QueryKind::Price);
        assert_eq!(QueryKind::Price.toggle(), QueryKind::Market);
    }

    #[test]
    fn test_payment_mode_wire_values() {
        assert_eq!(PaymentMode::Signature.as_str(), "signature");
        assert_eq!(PaymentMode::Transaction.as_str(), "tx");
        assert_eq!(
            serde_json::to_string(&PaymentMode::Transaction).unwrap(),
            "\"tx\""
        );
    }

    #[test]
    fn test_unknown_trend_is_a_parse_error() {
        assert!(serde_json::from_str::<Trend>("\"sideways\"").is_err());
        let trend: Trend = serde_json::from_str("\"neutral\"").unwrap();
        assert_eq!(trend, Trend::Neutral);
    }

    #[test]
    fn test_market_insight_wire_shape() {
        let json = r#"{
            "sentiment": { "score": 72, "trend": "bullish", "summary": "Up only" },
            "factors": ["ETF inflows"]
        }"#;
        let insight: MarketInsight = serde_json::from_str(json).unwrap();
        assert_eq!(insight.sentiment.score, 72);
        assert_eq!(insight.sentiment.trend, Trend::Bullish);
        assert_eq!(insight.factors, vec!["ETF inflows".to_string()]);
    }

    #[test]
    fn test_price_prediction_wire_shape() {
        let json = r#"{
            "prediction": { "targetPrice": 65000.5, "confidence": 80, "direction": "bearish" },
            "context": "Distribution near resistance",
            "technicalAnalysis": { "rsi": 45.3, "support": 60000.0, "resistance": 70000.0 }
        }"#;
        let prediction: PricePrediction = serde_json::from_str(json).unwrap();
        assert_eq!(prediction.prediction.target_price, 65000.5);
        assert_eq!(prediction.prediction.confidence, 80);
        assert_eq!(prediction.prediction.direction, Trend::Bearish);
        assert_eq!(prediction.technical_analysis.rsi, 45.3);
    }

    #[test]
    fn test_insight_data_tag() {
        let data = InsightData::Market(sample_market());
        assert_eq!(data.kind(), QueryKind::Market);

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["queryType"], "market");
        assert_eq!(value["sentiment"]["score"], 72);
    }

    #[test]
    fn test_envelope_success_shape() {
        let outcome = QueryOutcome::success(
            InsightData::Market(sample_market()),
            PaymentReceipt::new("0xabc"),
        );
        let envelope = outcome.to_envelope();
        assert_eq!(envelope["success"], true);
        assert_eq!(envelope["txHash"], "0xabc");
        assert_eq!(envelope["data"]["sentiment"]["trend"], "bullish");
        assert!(envelope.get("error").is_none());
    }

    #[test]
    fn test_envelope_failure_shape() {
        let outcome = QueryOutcome::failure("Payment declined: out of gas");
        let envelope = outcome.to_envelope();
        assert_eq!(envelope["success"], false);
        assert_eq!(envelope["error"], "Payment declined: out of gas");
        assert!(envelope.get("data").is_none());
        assert!(envelope.get("txHash").is_none());
    }

    #[test]
    fn test_receipt_explorer_url() {
        let receipt = PaymentReceipt::new("0xdeadbeef");
        assert_eq!(
            receipt.explorer_url("https://testnet.snowtrace.io/tx/"),
            "https://testnet.snowtrace.io/tx/0xdeadbeef"
        );
    }
}
