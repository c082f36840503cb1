//! One-shot mode: run a single paid query without the TUI and print the
//! outcome to stdout.

use queryflow_core::types::{InsightData, QueryKind, QueryOutcome};
use queryflow_core::{AppConfig, InsightAction};

/// Run one query and print the outcome.
///
/// With `as_json` the raw result envelope is printed instead of the
/// human-readable report. Exits nonzero when the query fails.
pub async fn run(config: AppConfig, kind: QueryKind, as_json: bool) -> anyhow::Result<()> {
    let action = InsightAction::from_config(&config)?;
    let intent = config.query.intent(kind);

    let outcome = action.invoke(intent).await;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&outcome.to_envelope())?);
    } else {
        print_outcome(&outcome, &config);
    }

    if outcome.is_success() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

fn print_outcome(outcome: &QueryOutcome, config: &AppConfig) {
    match outcome {
        QueryOutcome::Success { data, receipt } => {
            match data {
                InsightData::Market(insight) => {
                    println!("\x1b[1mMarket Sentiment\x1b[0m");
                    println!(
                        "  Score:      {}/100 ({})",
                        insight.sentiment.score, insight.sentiment.trend
                    );
                    println!("  Summary:    {}", insight.sentiment.summary);
                    println!("  Key Factors:");
                    for factor in &insight.factors {
                        println!("    - {}", factor);
                    }
                }
                InsightData::Price(prediction) => {
                    println!("\x1b[1mPrice Prediction\x1b[0m");
                    println!(
                        "  Target:     ${:.2} ({})",
                        prediction.prediction.target_price, prediction.prediction.direction
                    );
                    println!("  Confidence: {}%", prediction.prediction.confidence);
                    println!(
                        "  RSI {} | Support ${} | Resistance ${}",
                        prediction.technical_analysis.rsi,
                        prediction.technical_analysis.support,
                        prediction.technical_analysis.resistance
                    );
                    println!("  Context:    {}", prediction.context);
                }
            }
            println!();
            println!("\x1b[32m✓ Payment Verified on Chain\x1b[0m");
            println!(
                "  View Transaction ↗ {}",
                receipt.explorer_url(&config.ui.explorer_base_url)
            );
        }
        QueryOutcome::Failure { error } => {
            eprintln!("\x1b[31m🚨 Error: {}\x1b[0m", error);
        }
    }
}
