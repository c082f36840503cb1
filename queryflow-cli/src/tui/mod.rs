//! TUI (Terminal User Interface) module for the QueryFlow demo.
//!
//! Provides the interactive storefront: query type selector, purchase
//! trigger, insight panel, and on-chain payment receipt.

pub mod app;
pub mod event;
pub mod theme;
pub mod widgets;

use app::App;
use queryflow_core::{AppConfig, InsightAction};

/// Run the TUI application.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let action = InsightAction::from_config(&config)?;

    // Setup terminal
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::EnterAlternateScreen)?;

    let backend = ratatui::backend::CrosstermBackend::new(std::io::stdout());
    let mut terminal = ratatui::Terminal::new(backend)?;
    terminal.clear()?;

    // Run app
    let mut app = App::new(config, action);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
