//! Configuration system for the QueryFlow demo.
//!
//! Uses `figment` for layered configuration: defaults -> user config file ->
//! workspace config file -> environment. The payment credential itself never
//! lives in a config file; only the name of the environment variable holding
//! it does.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::ClientOptions;
use crate::types::{PaymentMode, QueryIntent, QueryKind};

/// Top-level configuration for the demo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub sdk: SdkConfig,
    pub query: QueryConfig,
    pub ui: UiConfig,
}

/// QueryFlow SDK connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Environment variable name containing the payment credential.
    pub private_key_env: String,
    /// Optional base URL override for the query endpoint.
    pub base_url: Option<String>,
    /// Payment settlement mode: "signature" or "tx".
    pub mode: PaymentMode,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            private_key_env: "PRIVATE_KEY".to_string(),
            base_url: None,
            // The SDK defaults to signature mode; the demo ships with real
            // on-chain payments enabled.
            mode: PaymentMode::Transaction,
            timeout_secs: 30,
        }
    }
}

impl SdkConfig {
    /// Build client options from this config.
    pub fn client_options(&self) -> ClientOptions {
        let defaults = ClientOptions::default();
        ClientOptions {
            mode: self.mode,
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Default query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Asset basket queried by default.
    pub assets: Vec<String>,
    /// Timeframe for market queries; doubles as the prediction horizon.
    pub timeframe: String,
    /// Advertised price per query in USD, shown on the trigger.
    pub price_usd: f64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            assets: vec!["BTC".to_string(), "ETH".to_string()],
            timeframe: "24h".to_string(),
            price_usd: 0.02,
        }
    }
}

impl QueryConfig {
    /// Build the intent for one query of the given type.
    pub fn intent(&self, kind: QueryKind) -> QueryIntent {
        QueryIntent {
            kind,
            assets: self.assets.clone(),
            timeframe: self.timeframe.clone(),
        }
    }
}

/// Terminal UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Color theme: "dark" or "light".
    pub theme: String,
    /// Block explorer base URL the receipt links into.
    pub explorer_base_url: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            explorer_base_url: "https://testnet.snowtrace.io/tx/".to_string(),
        }
    }
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `QUERYFLOW_`)
/// 3. Workspace-local config (`queryflow.toml`)
/// 4. User config (`~/.config/queryflow/config.toml`)
/// 5. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    overrides: Option<&AppConfig>,
) -> Result<AppConfig, Box<figment::Error>> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    // User-level config
    if let Some(config_dir) = directories::ProjectDirs::from("dev", "queryflow", "queryflow") {
        let user_config = config_dir.config_dir().join("config.toml");
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    // Workspace-level config
    if let Some(ws) = workspace {
        let ws_config = ws.join("queryflow.toml");
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    // Environment variables (QUERYFLOW_SDK__MODE, QUERYFLOW_UI__THEME, etc.)
    figment = figment.merge(Env::prefixed("QUERYFLOW_").split("__"));

    // Explicit overrides
    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    figment.extract().map_err(Box::new)
}

/// Write a default `queryflow.toml` into the workspace.
///
/// Never overwrites: an existing file is left untouched and the second
/// element of the returned pair is `false`.
pub fn init_config(workspace: &Path) -> crate::error::Result<(PathBuf, bool)> {
    let config_path = workspace.join("queryflow.toml");
    if config_path.exists() {
        return Ok((config_path, false));
    }

    let toml_str = toml::to_string_pretty(&AppConfig::default()).map_err(|e| {
        crate::error::ConfigError::ParseError {
            message: e.to_string(),
        }
    })?;
    std::fs::write(&config_path, toml_str)?;
    Ok((config_path, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.sdk.private_key_env, "PRIVATE_KEY");
        assert_eq!(config.sdk.mode, PaymentMode::Transaction);
        assert_eq!(config.query.assets, vec!["BTC", "ETH"]);
        assert_eq!(config.query.timeframe, "24h");
        assert_eq!(config.ui.theme, "dark");
        assert_eq!(config.ui.explorer_base_url, "https://testnet.snowtrace.io/tx/");
    }

    #[test]
    fn test_client_options_from_config() {
        let mut sdk = SdkConfig::default();
        sdk.base_url = Some("http://localhost:8402/v1".to_string());
        sdk.timeout_secs = 5;

        let options = sdk.client_options();
        assert_eq!(options.mode, PaymentMode::Transaction);
        assert_eq!(options.base_url, "http://localhost:8402/v1");
        assert_eq!(options.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_intent_from_query_config() {
        let query = QueryConfig::default();

        let intent = query.intent(QueryKind::Market);
        assert_eq!(intent.kind, QueryKind::Market);
        assert_eq!(intent.assets, vec!["BTC", "ETH"]);
        assert_eq!(intent.timeframe, "24h");

        let intent = query.intent(QueryKind::Price);
        assert_eq!(intent.kind, QueryKind::Price);
        assert_eq!(intent.subject(), Some("BTC"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized.sdk.mode, config.sdk.mode);
        assert_eq!(deserialized.query.assets, config.query.assets);
        assert_eq!(deserialized.ui.theme, config.ui.theme);
    }

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(None, None).unwrap();
        assert_eq!(config.sdk.private_key_env, "PRIVATE_KEY");
        assert_eq!(config.query.price_usd, 0.02);
    }

    #[test]
    fn test_load_config_with_overrides() {
        let mut overrides = AppConfig::default();
        overrides.query.timeframe = "7d".to_string();
        overrides.ui.theme = "light".to_string();

        let config = load_config(None, Some(&overrides)).unwrap();
        assert_eq!(config.query.timeframe, "7d");
        assert_eq!(config.ui.theme, "light");
    }

    #[test]
    fn test_load_config_from_workspace() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("queryflow.toml"),
            r#"
[sdk]
private_key_env = "PRIVATE_KEY"
mode = "signature"
timeout_secs = 10

[query]
assets = ["AVAX"]
timeframe = "1h"
price_usd = 0.02

[ui]
theme = "light"
explorer_base_url = "https://testnet.snowtrace.io/tx/"
"#,
        )
        .unwrap();

        let config = load_config(Some(dir.path()), None).unwrap();
        assert_eq!(config.sdk.mode, PaymentMode::Signature);
        assert_eq!(config.sdk.timeout_secs, 10);
        assert_eq!(config.query.assets, vec!["AVAX"]);
        assert_eq!(config.ui.theme, "light");
    }

    #[test]
    fn test_init_config_writes_and_preserves() {
        let dir = tempfile::tempdir().unwrap();

        let (path, created) = init_config(dir.path()).unwrap();
        assert!(created);
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: AppConfig = toml::from_str(&content).unwrap();
        assert_eq!(parsed.sdk.private_key_env, "PRIVATE_KEY");

        let (_, created_again) = init_config(dir.path()).unwrap();
        assert!(!created_again);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    }
}
