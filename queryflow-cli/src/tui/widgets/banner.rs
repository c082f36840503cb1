//! Error banner shown when a query resolves to a failure.

use crate::tui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// The banner text for a failure message.
pub fn error_banner_text(message: &str) -> String {
    format!("🚨 Error: {}", message)
}

/// Render the error banner.
pub fn render_error_banner(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.error_style());
    let banner = Paragraph::new(Line::from(Span::styled(
        error_banner_text(message),
        theme.error_style(),
    )))
    .block(block)
    .style(theme.base_style())
    .wrap(Wrap { trim: false });
    frame.render_widget(banner, area);
}
