//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (typewriter title, toasts, sidebar slide/fade, typing
//!   dots): draws every ~40ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events, background
//!   results or terminal resize.
//!
//! Every iteration first feeds `Action::Tick` so timed state (toasts,
//! titles, fading entries) advances even when nothing else happens.
//!
//! A `SteadyBlock` cursor style is used because ratatui's
//! `set_cursor_position` resets the blink timer on every `draw()`.

mod component;
mod components;
mod event;
mod ui;

use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::{debug, info};

use crate::core::action::{Action, update};
use crate::core::conversation::ConversationId;
use crate::core::state::App;
use crate::dispatch::Dispatcher;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, TranscriptViewState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::{HitMap, Target};

const ANIMATION_FRAME: Duration = Duration::from_millis(40);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Sidebar,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub transcript: TranscriptViewState,
    pub input_box: InputBox,
    pub focus: Focus,
    /// Keyboard focus on the dialog's confirm button (Cancel by default)
    pub confirm_focused: bool,
    /// Clickable regions of the last frame
    pub hits: HitMap,
    /// Reference point for frame-based animations
    pub started: Instant,
    /// Conversation shown in the last frame, to reset scrolling on switch
    shown: Option<ConversationId>,
}

impl TuiState {
    pub fn new(now: Instant) -> Self {
        Self {
            transcript: TranscriptViewState::new(),
            input_box: InputBox::new(),
            focus: Focus::Input,
            confirm_focused: false,
            hits: HitMap::default(),
            started: now,
            shown: None,
        }
    }

    /// Copy props from `App` into the persistent components.
    fn sync(&mut self, app: &mut App) {
        if self.shown != app.active {
            self.shown = app.active;
            self.transcript.reset();
        }
        if app.sidebar.hidden && self.focus == Focus::Sidebar {
            self.focus = Focus::Input;
        }
        if !app.dialog.is_open() {
            self.confirm_focused = false;
        }
        if let Some(text) = app.voice.take_transcript() {
            self.input_box.set_text(&text);
        }
        self.input_box.placeholder = app.voice.placeholder();
        self.input_box.listening = app.voice.listening;
        self.input_box.focused = self.focus == Focus::Input && !app.dialog.is_open();
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Apply an action and run its effects. Returns true when the app must quit.
fn dispatch(app: &mut App, dispatcher: &mut Dispatcher, action: Action) -> bool {
    let mut quit = false;
    for effect in update(app, action) {
        quit |= dispatcher.run(effect);
    }
    quit
}

/// Run the chat screen until the user quits.
///
/// `rx` receives results from background tasks; the caller primes it with
/// `Action::Started` so the first frames already reflect the startup data.
pub fn run(mut app: App, dispatcher: &mut Dispatcher, rx: mpsc::Receiver<Action>) -> std::io::Result<()> {
    let mut tui = TuiState::new(Instant::now());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true;

    'main: loop {
        dispatch(&mut app, dispatcher, Action::Tick(Instant::now()));
        tui.sync(&mut app);

        let animating = app.is_animating();
        if needs_redraw || animating {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_FRAME } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&app, &mut tui, event)
                && dispatch(&mut app, dispatcher, action)
            {
                break 'main;
            }
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, dispatcher, action) {
                break 'main;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Translate a terminal event into an action, updating presentation state
/// (focus, scroll, input buffer) along the way.
fn route_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    if app.dialog.is_open() {
        return route_dialog_event(tui, event);
    }

    match event {
        TuiEvent::ForceQuit => Some(Action::Quit),
        TuiEvent::NewConversation => Some(Action::CreateConversation),
        TuiEvent::DeleteConversation => app.active.map(Action::RequestDelete),
        TuiEvent::ToggleSidebar => Some(Action::ToggleSidebar),
        TuiEvent::ToggleVoice => Some(Action::ToggleVoice),
        TuiEvent::Suggestion(index) if app.transcript.is_welcome() => Some(submit_suggestion(tui, index)),
        TuiEvent::Suggestion(_) | TuiEvent::Resize => None,
        TuiEvent::MouseClick(col, row) => {
            let target = tui.hits.target_at(col, row)?;
            click(app, tui, target)
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.transcript.handle_event(&event);
            None
        }
        TuiEvent::FocusNext => {
            tui.focus = match tui.focus {
                Focus::Input if !app.sidebar.hidden => Focus::Sidebar,
                _ => Focus::Input,
            };
            None
        }
        TuiEvent::Escape if !app.notifications.is_empty() => Some(Action::DismissLatestToast),
        TuiEvent::Escape => {
            tui.focus = Focus::Input;
            None
        }
        event => match tui.focus {
            Focus::Sidebar => route_sidebar_key(app, tui, event),
            Focus::Input => route_input(tui, &event),
        },
    }
}

fn route_dialog_event(tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => Some(Action::Quit),
        TuiEvent::Escape => Some(Action::AnswerDialog(false)),
        TuiEvent::Submit => Some(Action::AnswerDialog(tui.confirm_focused)),
        TuiEvent::CursorLeft | TuiEvent::CursorRight | TuiEvent::FocusNext => {
            tui.confirm_focused = !tui.confirm_focused;
            None
        }
        TuiEvent::MouseClick(col, row) => match tui.hits.target_at(col, row) {
            Some(Target::DialogConfirm) => Some(Action::AnswerDialog(true)),
            Some(Target::DialogCancel) => Some(Action::AnswerDialog(false)),
            Some(Target::DialogBody) => None,
            _ => Some(Action::DialogBackdropClicked),
        },
        _ => None,
    }
}

/// A chip replaces whatever was typed, so the input ends up empty as after a submit.
fn submit_suggestion(tui: &mut TuiState, index: usize) -> Action {
    tui.input_box.set_text("");
    Action::SubmitSuggestion(index)
}

fn click(app: &App, tui: &mut TuiState, target: Target) -> Option<Action> {
    match target {
        Target::ToggleSidebar => Some(Action::ToggleSidebar),
        Target::NewConversation => Some(Action::CreateConversation),
        Target::Conversation(id) if app.active == Some(id) => None,
        Target::Conversation(id) => Some(Action::LoadConversation(id)),
        Target::DeleteConversation(id) => Some(Action::RequestDelete(id)),
        Target::Suggestion(index) => Some(submit_suggestion(tui, index)),
        Target::Microphone => Some(Action::ToggleVoice),
        Target::Toast(id) => Some(Action::DismissToast(id)),
        Target::Input => {
            tui.focus = Focus::Input;
            None
        }
        Target::DialogConfirm | Target::DialogCancel | Target::DialogBody | Target::DialogBackdrop => {
            None
        }
    }
}

fn route_sidebar_key(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::CursorUp => Some(Action::SelectPrevious),
        TuiEvent::CursorDown => Some(Action::SelectNext),
        TuiEvent::Submit => match app.sidebar.selected_id() {
            Some(id) if app.active != Some(id) => Some(Action::LoadConversation(id)),
            _ => None,
        },
        TuiEvent::Delete => app.sidebar.selected_id().map(Action::RequestDelete),
        // Typing jumps back to the input
        TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
            tui.focus = Focus::Input;
            route_input(tui, &event)
        }
        _ => None,
    }
}

fn route_input(tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match tui.input_box.handle_event(event)? {
        InputEvent::Submit(text) => {
            tui.transcript.stick_to_bottom = true;
            Some(Action::Submit(text))
        }
        InputEvent::ContentChanged => None,
    }
}
