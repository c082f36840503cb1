//! Header bar widget showing the demo title, payment mode, endpoint,
//! and credential status.

use crate::tui::theme::Theme;
use queryflow_core::client::ClientOptions;
use queryflow_core::types::PaymentMode;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Tagline rendered under the title bar.
pub const TAGLINE: &str = "Real Pay-Per-Query AI Insights (Powered by AVAX)";

/// Data needed to render the header bar.
#[derive(Debug, Clone)]
pub struct HeaderData {
    pub mode: PaymentMode,
    pub endpoint: String,
    pub credential_ok: bool,
    pub is_busy: bool,
}

impl Default for HeaderData {
    fn default() -> Self {
        Self {
            mode: PaymentMode::Transaction,
            endpoint: ClientOptions::default().base_url,
            credential_ok: false,
            is_busy: false,
        }
    }
}

impl HeaderData {
    /// Short label for the credential state.
    pub fn credential_display(&self) -> &'static str {
        if self.credential_ok {
            "key loaded"
        } else {
            "key missing"
        }
    }
}

/// Render the header: title bar on the first line, tagline on the second.
pub fn render_header(frame: &mut Frame, area: Rect, data: &HeaderData, theme: &Theme) {
    let status_indicator = if data.is_busy { "⟳" } else { "●" };
    let credential_style = if data.credential_ok {
        theme.header_style().fg(theme.success_fg)
    } else {
        theme.header_style().fg(theme.error_fg)
    };

    let spans = vec![
        Span::styled(
            format!(" {} QueryFlow SDK Demo", status_indicator),
            theme
                .header_style()
                .add_modifier(Modifier::BOLD)
                .fg(theme.accent),
        ),
        Span::styled(" │ ", theme.header_style().fg(theme.border_color)),
        Span::styled(format!("mode: {}", data.mode), theme.header_style()),
        Span::styled(" │ ", theme.header_style().fg(theme.border_color)),
        Span::styled(data.endpoint.clone(), theme.header_style()),
        Span::styled(" │ ", theme.header_style().fg(theme.border_color)),
        Span::styled(data.credential_display(), credential_style),
    ];
    let title = Paragraph::new(Line::from(spans)).style(theme.header_style());

    if area.height >= 2 {
        let [title_area, tagline_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);
        frame.render_widget(title, title_area);

        let tagline = Paragraph::new(Line::from(Span::styled(
            format!(" {}", TAGLINE),
            theme.header_style().fg(theme.dim_fg),
        )))
        .style(theme.header_style());
        frame.render_widget(tagline, tagline_area);
    } else {
        frame.render_widget(title, area);
    }
}
