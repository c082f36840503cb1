//! Status bar widget showing the view phase and keybinding hints.

use crate::tui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// The view phase as shown in the status bar chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseIndicator {
    Idle,
    Pending,
    Success,
    Failure,
}

impl PhaseIndicator {
    /// Short display label for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Pending => "PENDING",
            Self::Success => "PAID",
            Self::Failure => "FAILED",
        }
    }
}

impl std::fmt::Display for PhaseIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Render the status bar.
pub fn render_status_bar(frame: &mut Frame, area: Rect, phase: PhaseIndicator, theme: &Theme) {
    let hints = match phase {
        PhaseIndicator::Idle => {
            "[Enter] Get Insights │ [Tab] Query Type │ [t] Theme │ [q] Quit"
        }
        PhaseIndicator::Pending => "[q] Quit │ payment in flight, cannot cancel",
        PhaseIndicator::Success | PhaseIndicator::Failure => {
            "[Enter] Buy Again │ [Tab] Query Type │ [t] Theme │ [q] Quit"
        }
    };

    let spans = vec![
        Span::styled(
            format!(" {} ", phase.label()),
            theme
                .status_bar_style()
                .fg(theme.bg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", theme.status_bar_style()),
        Span::styled(hints, theme.status_bar_style()),
    ];

    let bar = Paragraph::new(Line::from(spans)).style(theme.status_bar_style());
    frame.render_widget(bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_labels() {
        assert_eq!(PhaseIndicator::Idle.label(), "IDLE");
        assert_eq!(PhaseIndicator::Pending.label(), "PENDING");
        assert_eq!(PhaseIndicator::Success.label(), "PAID");
        assert_eq!(PhaseIndicator::Failure.label(), "FAILED");
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(format!("{}", PhaseIndicator::Idle), "IDLE");
        assert_eq!(format!("{}", PhaseIndicator::Pending), "PENDING");
    }

    #[test]
    fn test_render_status_bar_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(80, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                render_status_bar(frame, frame.area(), PhaseIndicator::Idle, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_status_bar_pending() {
        let backend = ratatui::backend::TestBackend::new(80, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let theme = Theme::light();
        terminal
            .draw(|frame| {
                render_status_bar(frame, frame.area(), PhaseIndicator::Pending, &theme);
            })
            .unwrap();
    }
}
