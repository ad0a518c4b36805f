//! # Transcript Component
//!
//! Scrollable view of the active conversation.
//!
//! ## Architecture
//!
//! `TranscriptView` is a transient component (created each frame) that wraps
//! `&'a mut TranscriptViewState` (persistent state) and the core
//! `Transcript` (props). Heights are measured up front so the scroll view
//! gets an exact canvas and `stick_to_bottom` can follow new messages.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::{Transcript, TranscriptItem};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageBubble;
use crate::tui::event::TuiEvent;

const TYPING_LABEL: &str = "Escribiendo";
/// Typing indicator: one text row plus a spacer.
const TYPING_HEIGHT: u16 = 2;

/// Scroll state for the transcript. Persisted in `TuiState`.
pub struct TranscriptViewState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Item heights measured during the last render
    pub heights: Vec<u16>,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for TranscriptViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptViewState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            heights: Vec::new(),
            viewport_height: 0,
        }
    }

    /// Jump back to the newest message, e.g. after switching conversation.
    pub fn reset(&mut self) {
        self.scroll_state = ScrollViewState::default();
        self.stick_to_bottom = true;
    }

    fn max_offset(&self) -> u16 {
        let total: u16 = self.heights.iter().sum();
        total.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Re-engage auto-scroll once the user has scrolled back to the end.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }
}

impl EventHandler for TranscriptViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

pub struct TranscriptView<'a> {
    pub state: &'a mut TranscriptViewState,
    pub transcript: &'a Transcript,
    /// Animation step for the typing dots
    pub dots: usize,
}

fn typing_line(dots: usize) -> Line<'static> {
    let dots = ".".repeat(dots % 4);
    Line::from(vec![
        Span::styled(" Asistente ", Style::default().fg(Color::Blue)),
        Span::styled(
            format!("{}{}", TYPING_LABEL, dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ),
    ])
}

impl Component for TranscriptView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // scrollbar column

        self.state.heights = self
            .transcript
            .items()
            .iter()
            .map(|item| match item {
                TranscriptItem::Message(m) => MessageBubble::calculate_height(m, content_width),
                TranscriptItem::Typing => TYPING_HEIGHT,
            })
            .collect();
        let total_height: u16 = self.state.heights.iter().sum();

        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y = 0;
        for (item, &height) in self.transcript.items().iter().zip(&self.state.heights) {
            let rect = Rect::new(0, y, content_width, height);
            match item {
                TranscriptItem::Message(m) => scroll_view.render_widget(MessageBubble::new(m), rect),
                TranscriptItem::Typing => {
                    scroll_view.render_widget(typing_line(self.dots), Rect { height: 1, ..rect })
                }
            }
            y += height;
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
