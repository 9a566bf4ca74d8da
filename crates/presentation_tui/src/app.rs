//! Widget application state and event loop.
//!
//! [`WidgetApp`] owns the session plus the surface-local state (input
//! buffer, spinner frame). [`run`] takes over the terminal and drives
//! the loop: key events mutate the app, accepted sends are dispatched
//! on background tasks and their outcomes fed back through a channel,
//! so the surface keeps drawing while a reply is pending.

use std::io::{self, Stdout};
use std::time::Duration;

use application::{ApplicationError, AssistantReply, PendingSend, WidgetSession};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use domain::{WidgetPosition, WidgetState};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::debug;

use crate::render;

/// Milliseconds between spinner frames.
const TICK_MS: u64 = 120;

/// State driving one embedded widget surface.
#[derive(Debug)]
pub struct WidgetApp {
    session: WidgetSession,
    input: String,
    animation_frame: usize,
    should_quit: bool,
}

impl WidgetApp {
    #[must_use]
    pub const fn new(session: WidgetSession) -> Self {
        Self {
            session,
            input: String::new(),
            animation_frame: 0,
            should_quit: false,
        }
    }

    /// The session behind this surface.
    #[must_use]
    pub const fn session(&self) -> &WidgetSession {
        &self.session
    }

    /// Current contents of the input box.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current spinner frame counter.
    #[must_use]
    pub const fn animation_frame(&self) -> usize {
        self.animation_frame
    }

    /// The configured anchor position.
    #[must_use]
    pub const fn position(&self) -> WidgetPosition {
        self.session.config().position()
    }

    /// Whether the loop should exit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Advance the spinner.
    pub const fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    /// Feed a completed send back into the session.
    pub fn complete(&mut self, outcome: Result<AssistantReply, ApplicationError>) {
        self.session.complete_send(outcome);
    }

    /// Apply one key event, possibly starting a send.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PendingSend> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        match self.session.state() {
            WidgetState::Closed => {
                self.handle_closed_key(key.code);
                None
            }
            WidgetState::Minimized => {
                self.handle_minimized_key(key.code);
                None
            }
            WidgetState::Open => self.handle_open_key(key.code),
        }
    }

    fn handle_closed_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter | KeyCode::Char(' ') => self.session.toggle_launcher(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_minimized_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Tab => self.session.toggle_minimize(),
            KeyCode::Esc => self.session.close(),
            _ => {}
        }
    }

    fn handle_open_key(&mut self, code: KeyCode) -> Option<PendingSend> {
        match code {
            KeyCode::Enter => {
                let pending = self.session.begin_send(&self.input);
                if pending.is_some() {
                    self.input.clear();
                }
                pending
            }
            KeyCode::Esc => {
                self.session.close();
                None
            }
            KeyCode::Tab => {
                self.session.toggle_minimize();
                None
            }
            KeyCode::Backspace => {
                if !self.session.is_busy() {
                    self.input.pop();
                }
                None
            }
            KeyCode::Char(c) => {
                if !self.session.is_busy() {
                    self.input.push(c);
                }
                None
            }
            _ => None,
        }
    }
}

/// Run the widget loop until the user quits.
///
/// Takes over the terminal (raw mode plus alternate screen) and
/// restores it on exit, including on error paths.
pub async fn run(session: WidgetSession) -> io::Result<()> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, WidgetApp::new(session)).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: WidgetApp,
) -> io::Result<()> {
    debug!(widget = %app.session().id(), "Widget surface started");

    let mut events = EventStream::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut ticker = tokio::time::interval(Duration::from_millis(TICK_MS));

    while !app.should_quit() {
        terminal.draw(|f| render::render(f, &app))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        if let Some(pending) = app.handle_key(key) {
                            let tx = tx.clone();
                            tokio::spawn(async move {
                                let outcome = pending.dispatch().await;
                                let _ = tx.send(outcome);
                            });
                        }
                    }
                    Some(Ok(_)) => {} // resize and friends redraw next pass
                    Some(Err(e)) => return Err(e),
                    None => break,
                }
            }
            Some(outcome) = rx.recv() => app.complete(outcome),
            _ = ticker.tick() => app.tick(),
        }
    }

    debug!(widget = %app.session().id(), "Widget surface stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use application::{
        ActionAck, AnalyticsSnapshot, AssistantGateway, BroadcastOutcome, ConversationSnapshot,
        OutboundMessage,
    };
    use domain::{Sender, WaId, WidgetConfig};

    use super::*;

    struct ScriptedGateway {
        reply: String,
    }

    #[async_trait::async_trait]
    impl AssistantGateway for ScriptedGateway {
        async fn send_message(
            &self,
            _message: OutboundMessage,
        ) -> Result<AssistantReply, ApplicationError> {
            Ok(AssistantReply {
                text: self.reply.clone(),
            })
        }

        async fn conversation_history(
            &self,
            _wa_id: &WaId,
        ) -> Result<ConversationSnapshot, ApplicationError> {
            Err(ApplicationError::Gateway("not scripted".into()))
        }

        async fn reset_handover(&self, _wa_id: &WaId) -> Result<ActionAck, ApplicationError> {
            Err(ApplicationError::Gateway("not scripted".into()))
        }

        async fn delete_conversation(&self, _wa_id: &WaId) -> Result<ActionAck, ApplicationError> {
            Err(ApplicationError::Gateway("not scripted".into()))
        }

        async fn broadcast(
            &self,
            _recipients: &[WaId],
            _message: &str,
        ) -> Result<BroadcastOutcome, ApplicationError> {
            Err(ApplicationError::Gateway("not scripted".into()))
        }

        async fn analytics(&self) -> Result<AnalyticsSnapshot, ApplicationError> {
            Err(ApplicationError::Gateway("not scripted".into()))
        }
    }

    fn test_app() -> WidgetApp {
        let gateway = Arc::new(ScriptedGateway {
            reply: "scripted reply".to_string(),
        });
        WidgetApp::new(WidgetSession::new(WidgetConfig::new(), gateway))
    }

    fn press(app: &mut WidgetApp, code: KeyCode) -> Option<PendingSend> {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut WidgetApp, text: &str) {
        for c in text.chars() {
            drop(press(app, KeyCode::Char(c)));
        }
    }

    #[test]
    fn new_app_starts_closed_with_empty_input() {
        let app = test_app();

        assert_eq!(app.session().state(), WidgetState::Closed);
        assert_eq!(app.input(), "");
        assert!(!app.should_quit());
    }

    #[test]
    fn enter_or_space_opens_the_launcher() {
        let mut app = test_app();
        drop(press(&mut app, KeyCode::Enter));
        assert_eq!(app.session().state(), WidgetState::Open);

        let mut app = test_app();
        drop(press(&mut app, KeyCode::Char(' ')));
        assert_eq!(app.session().state(), WidgetState::Open);
    }

    #[test]
    fn q_or_esc_quits_while_closed() {
        let mut app = test_app();
        drop(press(&mut app, KeyCode::Char('q')));
        assert!(app.should_quit());

        let mut app = test_app();
        drop(press(&mut app, KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[test]
    fn typing_fills_the_input_while_open() {
        let mut app = test_app();
        drop(press(&mut app, KeyCode::Enter));
        type_text(&mut app, "hello");

        assert_eq!(app.input(), "hello");

        drop(press(&mut app, KeyCode::Backspace));
        assert_eq!(app.input(), "hell");
    }

    #[test]
    fn enter_with_blank_input_starts_nothing() {
        let mut app = test_app();
        drop(press(&mut app, KeyCode::Enter));
        type_text(&mut app, "   ");

        assert!(press(&mut app, KeyCode::Enter).is_none());
        assert!(!app.session().is_busy());
    }

    #[test]
    fn enter_accepts_input_and_clears_the_box() {
        let mut app = test_app();
        drop(press(&mut app, KeyCode::Enter));
        type_text(&mut app, "hello");

        let pending = press(&mut app, KeyCode::Enter);

        assert!(pending.is_some());
        assert_eq!(app.input(), "");
        assert!(app.session().is_busy());
    }

    #[test]
    fn edits_are_ignored_while_busy() {
        let mut app = test_app();
        drop(press(&mut app, KeyCode::Enter));
        type_text(&mut app, "first");
        drop(press(&mut app, KeyCode::Enter));

        type_text(&mut app, "second");
        drop(press(&mut app, KeyCode::Backspace));

        assert_eq!(app.input(), "");
    }

    #[test]
    fn second_enter_while_busy_is_refused() {
        let mut app = test_app();
        drop(press(&mut app, KeyCode::Enter));
        type_text(&mut app, "first");
        drop(press(&mut app, KeyCode::Enter));
        let before = app.session().transcript().len();

        type_text(&mut app, "x");
        assert!(press(&mut app, KeyCode::Enter).is_none());
        assert_eq!(app.session().transcript().len(), before);
    }

    #[test]
    fn esc_closes_the_open_panel_without_quitting() {
        let mut app = test_app();
        drop(press(&mut app, KeyCode::Enter));
        drop(press(&mut app, KeyCode::Esc));

        assert_eq!(app.session().state(), WidgetState::Closed);
        assert!(!app.should_quit());
    }

    #[test]
    fn tab_minimizes_and_restores() {
        let mut app = test_app();
        drop(press(&mut app, KeyCode::Enter));
        drop(press(&mut app, KeyCode::Tab));
        assert_eq!(app.session().state(), WidgetState::Minimized);

        drop(press(&mut app, KeyCode::Tab));
        assert_eq!(app.session().state(), WidgetState::Open);
    }

    #[test]
    fn esc_from_minimized_closes() {
        let mut app = test_app();
        drop(press(&mut app, KeyCode::Enter));
        drop(press(&mut app, KeyCode::Tab));
        drop(press(&mut app, KeyCode::Esc));

        assert_eq!(app.session().state(), WidgetState::Closed);
    }

    #[test]
    fn ctrl_c_quits_from_any_state() {
        let mut app = test_app();
        drop(press(&mut app, KeyCode::Enter));
        drop(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));

        assert!(app.should_quit());
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = test_app();
        let release = KeyEvent::new_with_kind(
            KeyCode::Enter,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );

        assert!(app.handle_key(release).is_none());
        assert_eq!(app.session().state(), WidgetState::Closed);
    }

    #[test]
    fn tick_advances_the_spinner() {
        let mut app = test_app();
        app.tick();
        app.tick();

        assert_eq!(app.animation_frame(), 2);
    }

    #[tokio::test]
    async fn dispatched_send_round_trips_into_the_transcript() {
        let mut app = test_app();
        drop(press(&mut app, KeyCode::Enter));
        type_text(&mut app, "hello");

        let pending = press(&mut app, KeyCode::Enter).unwrap();
        let outcome = pending.dispatch().await;
        app.complete(outcome);

        assert!(!app.session().is_busy());
        let last = app.session().transcript().last().unwrap();
        assert_eq!(last.sender, Sender::Bot);
        assert_eq!(last.text, "scripted reply");
    }
}
