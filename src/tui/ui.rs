//! # Screen Layout
//!
//! ```text
//! ┌ Conversaciones ─┐☰ Title                          ● Ctrl+L
//! │+ Nueva conver.. │ transcript / welcome           [toasts]
//! │ Ventas        ✕ │
//! │ 09:30           │
//! │                 │╭──────────────────────────────────────╮
//! │                 ││ input                                │
//! └─────────────────┘╰──────────────────────────────────────╯
//!  Ctrl+N nueva · Ctrl+D eliminar · ...
//! ```
//!
//! Components record their clickable regions in `TuiState::hits` while
//! drawing; mouse clicks are resolved against that map afterwards.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::core::conversation::ConversationId;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    ConfirmDialogView, Header, SidebarView, ToastStack, TranscriptView, Welcome,
};

const SIDEBAR_MAX_WIDTH: u16 = 30;
/// Typing dots advance every this many milliseconds.
const DOT_INTERVAL_MS: u128 = 400;

/// Something on screen that reacts to a mouse click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    ToggleSidebar,
    NewConversation,
    Conversation(ConversationId),
    DeleteConversation(ConversationId),
    Suggestion(usize),
    Microphone,
    Toast(u64),
    Input,
    DialogConfirm,
    DialogCancel,
    DialogBody,
    DialogBackdrop,
}

/// Clickable regions of the last drawn frame.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Target)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, rect: Rect, target: Target) {
        if rect.width > 0 && rect.height > 0 {
            self.regions.push((rect, target));
        }
    }

    /// Topmost target under the cell. Later regions are drawn above earlier ones.
    pub fn target_at(&self, col: u16, row: u16) -> Option<Target> {
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| {
                col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
            })
            .map(|&(_, target)| target)
    }
}

fn hint_line(voice_supported: bool) -> Line<'static> {
    let mut hints = vec![
        ("Ctrl+N", "nueva"),
        ("Ctrl+D", "eliminar"),
        ("Ctrl+B", "panel"),
        ("Tab", "foco"),
    ];
    if voice_supported {
        hints.push(("Ctrl+L", "voz"));
    }
    hints.push(("Ctrl+Q", "salir"));

    let mut spans = vec![Span::raw(" ")];
    for (i, (key, label)) in hints.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(key, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(format!(" {}", label), Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    tui.hits.clear();
    let area = frame.area();
    let [main_area, hint_area] = Layout::vertical([Min(0), Length(1)]).areas(area);

    let chat_area = if app.sidebar.hidden {
        main_area
    } else {
        let width = SIDEBAR_MAX_WIDTH.min(main_area.width / 3);
        let [sidebar_area, chat_area] = Layout::horizontal([Length(width), Min(0)]).areas(main_area);
        SidebarView {
            sidebar: &app.sidebar,
            now: app.now,
            focused: tui.focus == super::Focus::Sidebar,
            hits: &mut tui.hits,
        }
        .render(frame, sidebar_area);
        chat_area
    };

    let input_height = tui.input_box.calculate_height(chat_area.width);
    let [header_area, body_area, input_area] =
        Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(chat_area);

    Header {
        title: app.header.display(app.now),
        voice_supported: app.voice.supported,
        listening: app.voice.listening,
        hits: &mut tui.hits,
    }
    .render(frame, header_area);

    if app.transcript.is_welcome() {
        Welcome { hits: &mut tui.hits }.render(frame, body_area);
    } else {
        let elapsed = app.now.saturating_duration_since(tui.started).as_millis();
        TranscriptView {
            state: &mut tui.transcript,
            transcript: &app.transcript,
            dots: (elapsed / DOT_INTERVAL_MS) as usize,
        }
        .render(frame, body_area);
    }

    tui.input_box.render(frame, input_area);
    tui.hits.push(input_area, Target::Input);

    frame.render_widget(hint_line(app.voice.supported), hint_area);

    ToastStack {
        toasts: app.notifications.toasts(),
        now: app.now,
        hits: &mut tui.hits,
    }
    .render(frame, main_area);

    if let Some(request) = app.dialog.request() {
        ConfirmDialogView {
            request,
            confirm_focused: tui.confirm_focused,
            hits: &mut tui.hits,
        }
        .render(frame, area);
    }
}
