//! Main TUI application: state, event loop, and top-level draw function.

use crate::tui::event::{Action, EventHandler, map_key};
use crate::tui::theme::Theme;
use crate::tui::widgets::banner::render_error_banner;
use crate::tui::widgets::header::{HeaderData, render_header};
use crate::tui::widgets::insight::render_insight;
use crate::tui::widgets::receipt::{ReceiptData, render_receipt};
use crate::tui::widgets::selector::{SelectorData, render_selector};
use crate::tui::widgets::status_bar::{PhaseIndicator, render_status_bar};
use crate::tui::widgets::trigger::{TriggerData, render_trigger};
use crossterm::event::{Event, KeyEvent};
use queryflow_core::types::{QueryIntent, QueryKind, QueryOutcome};
use queryflow_core::{AppConfig, InsightAction, UNKNOWN_ERROR};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Where the view is in the life of the current query.
///
/// A resolved outcome stays on screen until the user triggers another query
/// or switches query type.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryPhase {
    Idle,
    Pending,
    Resolved(QueryOutcome),
}

impl QueryPhase {
    pub fn is_pending(&self) -> bool {
        matches!(self, QueryPhase::Pending)
    }
}

/// The main TUI application state.
pub struct App {
    // UI state
    pub phase: QueryPhase,
    pub selected: QueryKind,
    pub theme: Theme,
    pub should_quit: bool,

    // The one action the view can invoke
    action: Arc<InsightAction>,
    config: AppConfig,

    // Receiver for the in-flight query task, if any
    pending_outcome: Option<oneshot::Receiver<QueryOutcome>>,

    // Animation frame counter
    tick: usize,
}

impl App {
    /// Create a new TUI application.
    pub fn new(config: AppConfig, action: InsightAction) -> Self {
        let theme = Theme::from_name(&config.ui.theme);
        Self {
            phase: QueryPhase::Idle,
            selected: QueryKind::Market,
            theme,
            should_quit: false,
            action: Arc::new(action),
            config,
            pending_outcome: None,
            tick: 0,
        }
    }

    /// Run the main event loop.
    pub async fn run(
        &mut self,
        terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_handler = EventHandler::new();
        let tick_rate = std::time::Duration::from_millis(100);

        loop {
            // Draw
            terminal.draw(|frame| self.draw(frame))?;

            // Poll events
            tokio::select! {
                // Terminal events
                event = event_handler.next() => {
                    if let Some(event) = event {
                        self.handle_terminal_event(event);
                    }
                }
                // The in-flight query resolving
                outcome = await_outcome(&mut self.pending_outcome), if self.pending_outcome.is_some() => {
                    self.pending_outcome = None;
                    self.resolve_outcome(outcome);
                }
                // Tick for spinner animation
                _ = tokio::time::sleep(tick_rate) => {
                    self.tick = self.tick.wrapping_add(1);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Draw the full UI.
    pub fn draw(&self, frame: &mut Frame) {
        let [header_area, selector_area, caption_area, trigger_area, main_area, status_area] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .areas(frame.area());

        let header = HeaderData {
            mode: self.config.sdk.mode,
            endpoint: self.config.sdk.client_options().base_url,
            credential_ok: self.action.has_credential(),
            is_busy: self.phase.is_pending(),
        };
        render_header(frame, header_area, &header, &self.theme);

        let selector = SelectorData {
            selected: self.selected,
            locked: self.phase.is_pending(),
        };
        render_selector(frame, selector_area, &selector, &self.theme);

        let caption = Paragraph::new(Line::from(Span::styled(
            format!(" {}", self.query_caption()),
            self.theme.dim_style(),
        )))
        .style(self.theme.base_style());
        frame.render_widget(caption, caption_area);

        let trigger = TriggerData {
            price_usd: self.config.query.price_usd,
            pending: self.phase.is_pending(),
            tick: self.tick,
        };
        render_trigger(frame, trigger_area, &trigger, &self.theme);

        self.draw_result(frame, main_area);

        render_status_bar(frame, status_area, self.phase_indicator(), &self.theme);
    }

    /// Draw the result area for the current phase.
    ///
    /// Idle and pending render nothing here; the trigger button already
    /// carries the spinner.
    fn draw_result(&self, frame: &mut Frame, area: Rect) {
        match &self.phase {
            QueryPhase::Idle | QueryPhase::Pending => {}
            QueryPhase::Resolved(QueryOutcome::Success { data, receipt }) => {
                let [insight_area, receipt_area] =
                    Layout::vertical([Constraint::Min(6), Constraint::Length(5)]).areas(area);
                render_insight(frame, insight_area, data, &self.theme);
                let receipt_data =
                    ReceiptData::new(receipt.clone(), self.config.ui.explorer_base_url.clone());
                render_receipt(frame, receipt_area, &receipt_data, &self.theme);
            }
            QueryPhase::Resolved(QueryOutcome::Failure { error }) => {
                render_error_banner(frame, area, error, &self.theme);
            }
        }
    }

    /// Caption describing what the next trigger will buy.
    pub fn query_caption(&self) -> String {
        let subject = match self.selected {
            QueryKind::Market => self.config.query.assets.join(", "),
            QueryKind::Price => self
                .config
                .query
                .assets
                .first()
                .cloned()
                .unwrap_or_else(|| "—".to_string()),
        };
        format!("Querying: {} ({})", subject, self.config.query.timeframe)
    }

    /// The status bar chip for the current phase.
    pub fn phase_indicator(&self) -> PhaseIndicator {
        match &self.phase {
            QueryPhase::Idle => PhaseIndicator::Idle,
            QueryPhase::Pending => PhaseIndicator::Pending,
            QueryPhase::Resolved(outcome) if outcome.is_success() => PhaseIndicator::Success,
            QueryPhase::Resolved(_) => PhaseIndicator::Failure,
        }
    }

    /// The intent the next trigger will submit.
    pub fn intent(&self) -> QueryIntent {
        self.config.query.intent(self.selected)
    }

    fn handle_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event),
            Event::Resize(_, _) => {} // ratatui redraws on next frame
            _ => {}
        }
    }

    /// Handle a key event.
    fn handle_key_event(&mut self, key: KeyEvent) {
        if let Some(action) = map_key(&key) {
            self.execute_action(action);
        }
    }

    /// Execute a mapped action.
    pub fn execute_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Trigger => self.trigger_query(),
            Action::ToggleKind => self.select_kind(self.selected.toggle()),
            Action::SelectKind(kind) => self.select_kind(kind),
            Action::ToggleTheme => {
                self.theme = if self.theme.name == "light" {
                    Theme::dark()
                } else {
                    Theme::light()
                };
            }
        }
    }

    /// Switch the query type selector.
    ///
    /// Ignored while a query is in flight; otherwise any selection clears the
    /// previous result so a stale payload never sits under a fresh label.
    fn select_kind(&mut self, kind: QueryKind) {
        if self.phase.is_pending() {
            return;
        }
        self.selected = kind;
        self.phase = QueryPhase::Idle;
    }

    /// Spawn the paid query for the current selection.
    ///
    /// One query at a time: repeated triggers while pending are ignored, and
    /// the in-flight payment is never cancelled.
    fn trigger_query(&mut self) {
        if self.phase.is_pending() {
            return;
        }

        let intent = self.intent();
        let action = self.action.clone();
        let (tx, rx) = oneshot::channel();

        self.phase = QueryPhase::Pending;
        self.pending_outcome = Some(rx);

        tokio::spawn(async move {
            let outcome = action.invoke(intent).await;
            let _ = tx.send(outcome);
        });
    }

    /// Resolve the in-flight query with its outcome.
    pub fn resolve_outcome(&mut self, outcome: QueryOutcome) {
        self.phase = QueryPhase::Resolved(outcome);
    }
}

/// Await the outcome of the in-flight query task.
///
/// A dropped sender means the task died before reporting, which surfaces as
/// the generic failure message.
async fn await_outcome(rx: &mut Option<oneshot::Receiver<QueryOutcome>>) -> QueryOutcome {
    match rx {
        Some(rx) => rx
            .await
            .unwrap_or_else(|_| QueryOutcome::failure(UNKNOWN_ERROR)),
        None => std::future::pending().await,
    }
}
