//! Purchase trigger: the button that buys one insight.

use crate::tui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Spinner frames for animation.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Data needed to render the purchase trigger.
#[derive(Debug, Clone)]
pub struct TriggerData {
    /// Price per query in USD, shown on the button.
    pub price_usd: f64,
    /// A query is in flight and the trigger is disabled.
    pub pending: bool,
    /// Animation frame counter while pending.
    pub tick: usize,
}

impl Default for TriggerData {
    fn default() -> Self {
        Self {
            price_usd: 0.02,
            pending: false,
            tick: 0,
        }
    }
}

impl TriggerData {
    /// The button label for the current state.
    pub fn label(&self) -> String {
        if self.pending {
            let spinner = SPINNER_FRAMES[self.tick % SPINNER_FRAMES.len()];
            format!("{} Processing...", spinner)
        } else {
            format!("Get Insights (${:.2})", self.price_usd)
        }
    }
}

/// Render the purchase trigger button.
pub fn render_trigger(frame: &mut Frame, area: Rect, data: &TriggerData, theme: &Theme) {
    let style = if data.pending {
        theme.warning_style()
    } else {
        theme.accent_style()
    };
    let hint = if data.pending {
        Span::styled("  (payment in flight, not cancellable)", theme.dim_style())
    } else {
        Span::styled("  [Enter] buy", theme.dim_style())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style());
    let button = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {}", data.label()), style),
        hint,
    ]))
    .block(block)
    .style(theme.base_style());
    frame.render_widget(button, area);
}
