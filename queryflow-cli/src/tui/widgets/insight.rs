//! Insight panel: renders the purchased payload for either query type.
//!
//! The panel dispatches on the tagged payload, not on the current selector
//! state, so a result always renders as the product that was actually bought.

use crate::tui::theme::Theme;
use queryflow_core::types::{InsightData, MarketInsight, PricePrediction};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Format a sentiment score out of 100.
pub fn format_score(score: u8) -> String {
    format!("{}/100", score)
}

/// Format a predicted price, always two decimals.
pub fn format_target(price: f64) -> String {
    format!("${:.2}", price)
}

/// Format model confidence as a percentage.
pub fn format_confidence(confidence: u8) -> String {
    format!("{}%", confidence)
}

/// Render the insight panel for whichever product was purchased.
pub fn render_insight(frame: &mut Frame, area: Rect, data: &InsightData, theme: &Theme) {
    match data {
        InsightData::Market(insight) => render_market(frame, area, insight, theme),
        InsightData::Price(prediction) => render_price(frame, area, prediction, theme),
    }
}

fn render_market(frame: &mut Frame, area: Rect, insight: &MarketInsight, theme: &Theme) {
    let sentiment = &insight.sentiment;
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Sentiment Score: ", theme.dim_style()),
            Span::styled(
                format_score(sentiment.score),
                theme.base_style().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                sentiment.trend.to_string(),
                theme.trend_style(sentiment.trend),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(sentiment.summary.clone(), theme.base_style())),
        Line::from(""),
        Line::from(Span::styled("Key Factors", theme.accent_style())),
    ];
    for factor in &insight.factors {
        lines.push(Line::from(vec![
            Span::styled("  • ", theme.dim_style()),
            Span::styled(factor.clone(), theme.base_style()),
        ]));
    }

    let block = Block::default()
        .title(" Market Sentiment ")
        .borders(Borders::ALL)
        .border_style(theme.border_style());
    let panel = Paragraph::new(lines)
        .block(block)
        .style(theme.base_style())
        .wrap(Wrap { trim: false });
    frame.render_widget(panel, area);
}

fn render_price(frame: &mut Frame, area: Rect, prediction: &PricePrediction, theme: &Theme) {
    let headline = &prediction.prediction;
    let ta = &prediction.technical_analysis;
    let lines = vec![
        Line::from(vec![
            Span::styled("Target: ", theme.dim_style()),
            Span::styled(
                format_target(headline.target_price),
                theme.base_style().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                headline.direction.to_string(),
                theme.trend_style(headline.direction),
            ),
            Span::raw("  "),
            Span::styled("Confidence: ", theme.dim_style()),
            Span::styled(format_confidence(headline.confidence), theme.base_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("RSI ", theme.dim_style()),
            Span::styled(ta.rsi.to_string(), theme.base_style()),
            Span::styled(" │ Support $", theme.dim_style()),
            Span::styled(ta.support.to_string(), theme.base_style()),
            Span::styled(" │ Resistance $", theme.dim_style()),
            Span::styled(ta.resistance.to_string(), theme.base_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(prediction.context.clone(), theme.base_style())),
    ];

    let block = Block::default()
        .title(" Price Prediction ")
        .borders(Borders::ALL)
        .border_style(theme.border_style());
    let panel = Paragraph::new(lines)
        .block(block)
        .style(theme.base_style())
        .wrap(Wrap { trim: false });
    frame.render_widget(panel, area);
}
