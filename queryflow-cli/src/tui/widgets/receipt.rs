//! Payment receipt panel with the block explorer link.

use crate::tui::theme::Theme;
use queryflow_core::types::PaymentReceipt;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Data needed to render the payment receipt.
#[derive(Debug, Clone)]
pub struct ReceiptData {
    pub receipt: PaymentReceipt,
    pub explorer_base_url: String,
}

impl ReceiptData {
    pub fn new(receipt: PaymentReceipt, explorer_base_url: impl Into<String>) -> Self {
        Self {
            receipt,
            explorer_base_url: explorer_base_url.into(),
        }
    }

    /// Block explorer link for the settled transaction.
    pub fn link(&self) -> String {
        self.receipt.explorer_url(&self.explorer_base_url)
    }

    /// Settlement timestamp, rendered in UTC.
    pub fn paid_at_display(&self) -> String {
        self.receipt.paid_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}

/// Render the receipt panel under a successful result.
pub fn render_receipt(frame: &mut Frame, area: Rect, data: &ReceiptData, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(
            "✓ Payment Verified on Chain",
            theme.success_style(),
        )),
        Line::from(vec![
            Span::styled("View Transaction ↗  ", theme.base_style()),
            Span::styled(data.link(), theme.link_style()),
        ]),
        Line::from(Span::styled(
            format!("paid {}", data.paid_at_display()),
            theme.dim_style(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.success_style());
    let panel = Paragraph::new(lines).block(block).style(theme.base_style());
    frame.render_widget(panel, area);
}
