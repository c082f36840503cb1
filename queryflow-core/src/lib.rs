//! # QueryFlow Core
//!
//! Core library for the QueryFlow pay-per-query insights demo.
//! Provides the typed client binding for the hosted QueryFlow service, the
//! single query action, layered configuration, and the data model shared
//! with the terminal view.

pub mod action;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types at the crate root.
pub use action::{InsightAction, MISSING_KEY_ERROR, NO_ASSETS_ERROR, UNKNOWN_ERROR};
pub use client::{ClientOptions, InsightProvider, MockInsightProvider, QueryFlowClient};
pub use config::{AppConfig, QueryConfig, SdkConfig, UiConfig, init_config, load_config};
pub use error::{ConfigError, QueryFlowError, Result, SdkError};
pub use types::{
    InsightData, MarketInsight, PaymentMode, PaymentReceipt, Prediction, PricePrediction,
    QueryIntent, QueryKind, QueryOutcome, Sentiment, TechnicalAnalysis, Trend,
};
