//! Theme system for the QueryFlow TUI.
//!
//! Provides dark and light color palettes, loaded from UiConfig.theme.

use queryflow_core::types::Trend;
use ratatui::style::{Color, Modifier, Style};

/// Complete color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,

    // Status colors
    pub error_fg: Color,
    pub warning_fg: Color,
    pub success_fg: Color,
    pub info_fg: Color,
    pub dim_fg: Color,

    // Trend pill colors
    pub bullish_fg: Color,
    pub bearish_fg: Color,
    pub neutral_fg: Color,

    // UI chrome
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub border_color: Color,
    pub selection_bg: Color,
}

impl Theme {
    /// Create the default dark theme.
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            bg: Color::Rgb(30, 30, 46),
            fg: Color::Rgb(205, 214, 244),
            accent: Color::Rgb(78, 205, 126),

            error_fg: Color::Rgb(243, 139, 168),
            warning_fg: Color::Rgb(250, 179, 135),
            success_fg: Color::Rgb(166, 227, 161),
            info_fg: Color::Rgb(180, 190, 254),
            dim_fg: Color::Rgb(127, 132, 156),

            bullish_fg: Color::Rgb(166, 227, 161),
            bearish_fg: Color::Rgb(243, 139, 168),
            neutral_fg: Color::Rgb(127, 132, 156),

            header_bg: Color::Rgb(24, 24, 37),
            header_fg: Color::Rgb(205, 214, 244),
            status_bar_bg: Color::Rgb(24, 24, 37),
            status_bar_fg: Color::Rgb(166, 173, 200),
            border_color: Color::Rgb(69, 71, 90),
            selection_bg: Color::Rgb(69, 71, 90),
        }
    }

    /// Create the light theme.
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            bg: Color::Rgb(239, 241, 245),
            fg: Color::Rgb(76, 79, 105),
            accent: Color::Rgb(30, 102, 245),

            error_fg: Color::Rgb(210, 15, 57),
            warning_fg: Color::Rgb(254, 100, 11),
            success_fg: Color::Rgb(64, 160, 43),
            info_fg: Color::Rgb(114, 135, 253),
            dim_fg: Color::Rgb(140, 143, 161),

            bullish_fg: Color::Rgb(64, 160, 43),
            bearish_fg: Color::Rgb(210, 15, 57),
            neutral_fg: Color::Rgb(140, 143, 161),

            header_bg: Color::Rgb(220, 224, 232),
            header_fg: Color::Rgb(76, 79, 105),
            status_bar_bg: Color::Rgb(220, 224, 232),
            status_bar_fg: Color::Rgb(92, 95, 119),
            border_color: Color::Rgb(172, 176, 190),
            selection_bg: Color::Rgb(188, 192, 204),
        }
    }

    /// Load a theme by name from config. Falls back to dark.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    // -- Convenience style constructors --

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn header_style(&self) -> Style {
        Style::default().fg(self.header_fg).bg(self.header_bg)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default()
            .fg(self.status_bar_fg)
            .bg(self.status_bar_bg)
    }

    pub fn error_style(&self) -> Style {
        Style::default()
            .fg(self.error_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning_fg)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success_fg)
    }

    pub fn accent_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim_fg)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border_color)
    }

    /// Style for the transaction link in the receipt panel.
    pub fn link_style(&self) -> Style {
        Style::default()
            .fg(self.info_fg)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Pill color for a sentiment trend or prediction direction.
    pub fn trend_style(&self, trend: Trend) -> Style {
        let fg = match trend {
            Trend::Bullish => self.bullish_fg,
            Trend::Bearish => self.bearish_fg,
            Trend::Neutral => self.neutral_fg,
        };
        Style::default().fg(fg).add_modifier(Modifier::BOLD)
    }

    /// Style for a query type tab in the selector.
    pub fn tab_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.accent)
                .bg(self.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.dim_fg)
        }
    }
}
