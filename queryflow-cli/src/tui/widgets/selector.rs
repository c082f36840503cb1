//! Query type selector: one tab per insight product.

use crate::tui::theme::Theme;
use queryflow_core::types::QueryKind;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Data needed to render the query type selector.
#[derive(Debug, Clone)]
pub struct SelectorData {
    pub selected: QueryKind,
    /// Switching is locked while a query is in flight.
    pub locked: bool,
}

impl Default for SelectorData {
    fn default() -> Self {
        Self {
            selected: QueryKind::Market,
            locked: false,
        }
    }
}

/// Display label for a query type tab.
pub fn tab_label(kind: QueryKind) -> &'static str {
    match kind {
        QueryKind::Market => "Market Analysis",
        QueryKind::Price => "Price Prediction",
    }
}

/// Render the selector tabs with a key hint on the right.
pub fn render_selector(frame: &mut Frame, area: Rect, data: &SelectorData, theme: &Theme) {
    let mut spans = Vec::new();
    for kind in [QueryKind::Market, QueryKind::Price] {
        let style = if data.locked {
            theme.dim_style()
        } else {
            theme.tab_style(kind == data.selected)
        };
        spans.push(Span::styled(format!(" {} ", tab_label(kind)), style));
        spans.push(Span::raw(" "));
    }
    let hint = if data.locked {
        "(locked while processing)"
    } else {
        "[Tab] switch │ [m/p] jump"
    };
    spans.push(Span::styled(hint, theme.dim_style()));

    let tabs = Paragraph::new(Line::from(spans)).style(theme.base_style());
    frame.render_widget(tabs, area);
}
