//! Terminal event handling using crossterm EventStream.

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use queryflow_core::types::QueryKind;

/// High-level actions the TUI can perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Trigger,
    ToggleKind,
    SelectKind(QueryKind),
    ToggleTheme,
}

/// Reads terminal events asynchronously using crossterm's EventStream.
pub struct EventHandler {
    stream: EventStream,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            stream: EventStream::new(),
        }
    }

    /// Read the next terminal event. Returns None if the stream ends.
    pub async fn next(&mut self) -> Option<Event> {
        self.stream.next().await.and_then(|r| r.ok())
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a key event to an Action. Returns None for keys the demo ignores.
pub fn map_key(event: &KeyEvent) -> Option<Action> {
    match (event.modifiers, event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
        (KeyModifiers::CONTROL, KeyCode::Char('d')) => Some(Action::Quit),
        (_, KeyCode::Char('q') | KeyCode::Esc) => Some(Action::Quit),
        (_, KeyCode::Enter | KeyCode::Char(' ')) => Some(Action::Trigger),
        (_, KeyCode::Tab) => Some(Action::ToggleKind),
        (_, KeyCode::Char('m') | KeyCode::Char('M')) => Some(Action::SelectKind(QueryKind::Market)),
        (_, KeyCode::Char('p') | KeyCode::Char('P')) => Some(Action::SelectKind(QueryKind::Price)),
        (_, KeyCode::Char('t') | KeyCode::Char('T')) => Some(Action::ToggleTheme),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn test_ctrl_c_quits() {
        assert_eq!(map_key(&ctrl(KeyCode::Char('c'))), Some(Action::Quit));
    }

    #[test]
    fn test_ctrl_d_quits() {
        assert_eq!(map_key(&ctrl(KeyCode::Char('d'))), Some(Action::Quit));
    }

    #[test]
    fn test_q_quits() {
        assert_eq!(map_key(&key(KeyCode::Char('q'))), Some(Action::Quit));
    }

    #[test]
    fn test_esc_quits() {
        assert_eq!(map_key(&key(KeyCode::Esc)), Some(Action::Quit));
    }

    #[test]
    fn test_enter_triggers_query() {
        assert_eq!(map_key(&key(KeyCode::Enter)), Some(Action::Trigger));
    }

    #[test]
    fn test_space_triggers_query() {
        assert_eq!(map_key(&key(KeyCode::Char(' '))), Some(Action::Trigger));
    }

    #[test]
    fn test_tab_toggles_kind() {
        assert_eq!(map_key(&key(KeyCode::Tab)), Some(Action::ToggleKind));
    }

    #[test]
    fn test_m_selects_market() {
        assert_eq!(
            map_key(&key(KeyCode::Char('m'))),
            Some(Action::SelectKind(QueryKind::Market))
        );
    }

    #[test]
    fn test_p_selects_price() {
        assert_eq!(
            map_key(&key(KeyCode::Char('p'))),
            Some(Action::SelectKind(QueryKind::Price))
        );
    }

    #[test]
    fn test_t_toggles_theme() {
        assert_eq!(map_key(&key(KeyCode::Char('t'))), Some(Action::ToggleTheme));
    }

    #[test]
    fn test_unknown_key_ignored() {
        assert_eq!(map_key(&key(KeyCode::Char('x'))), None);
    }
}
