//! # InputBox Component
//!
//! Single-line message input that wraps onto up to three visual rows.
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. The placeholder and the
//! listening flag are props refreshed from `VoiceState` every frame.
//!
//! Wrapping is a hard character wrap (no word breaking) so the cursor row
//! and column can be derived from the same byte ranges that are drawn.

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::texts;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Border (2) + padding (2) consumed horizontally by the bordered block
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible rows before internal scrolling kicks in
const MAX_VISIBLE_LINES: u16 = 3;
/// Offset from area edge to the first content column (border + padding)
const CONTENT_OFFSET_X: u16 = 2;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text or cursor changed
    ContentChanged,
}

pub struct InputBox {
    buffer: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    /// First visible row when the text is taller than the box
    scroll_offset: u16,
    /// Inner width from the last render (used for vertical movement)
    last_width: u16,
    /// Placeholder text (Prop)
    pub placeholder: &'static str,
    /// Voice capture running (Prop)
    pub listening: bool,
    /// Draw the terminal cursor (Prop)
    pub focused: bool,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte ranges of each visual row when `text` is hard-wrapped at `width`
/// columns. A trailing empty row is added when the last row is full so the
/// cursor has somewhere to sit.
fn wrap_ranges(text: &str, width: u16) -> Vec<Range<usize>> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    let mut start = 0;
    let mut used = 0;
    for (i, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > width && used > 0 {
            rows.push(start..i);
            start = i;
            used = 0;
        }
        used += w;
    }
    rows.push(start..text.len());
    if used >= width {
        rows.push(text.len()..text.len());
    }
    rows
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll_offset: 0,
            last_width: 80,
            placeholder: texts::PLACEHOLDER_IDLE,
            listening: false,
            focused: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Replace the content (e.g. with a voice transcript), cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.replace(['\r', '\n'], " ");
        self.cursor = self.buffer.len();
    }

    /// Required height for the current content at `area_width`, clamped to
    /// `[1, MAX_VISIBLE_LINES]` rows plus borders.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let width = area_width.saturating_sub(HORIZONTAL_OVERHEAD);
        let rows = wrap_ranges(&self.buffer, width).len() as u16;
        rows.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Visual (row, column) of the cursor.
    fn cursor_cell(&self, rows: &[Range<usize>]) -> (u16, u16) {
        let row = rows
            .iter()
            .rposition(|r| r.start <= self.cursor)
            .unwrap_or(0);
        let col = self.buffer[rows[row].start..self.cursor].width();
        (row as u16, col as u16)
    }

    fn move_vertically(&mut self, down: bool) -> bool {
        let rows = wrap_ranges(&self.buffer, self.last_width);
        let (row, col) = self.cursor_cell(&rows);
        let target = if down {
            usize::from(row) + 1
        } else if row == 0 {
            return false;
        } else {
            usize::from(row) - 1
        };
        let Some(range) = rows.get(target) else {
            return false;
        };

        let mut pos = range.start;
        let mut used = 0;
        for (i, c) in self.buffer[range.clone()].char_indices() {
            let w = c.width().unwrap_or(0);
            if used + w > usize::from(col) {
                break;
            }
            used += w;
            pos = range.start + i + c.len_utf8();
        }
        self.cursor = pos;
        true
    }

    fn update_scroll_offset(&mut self, cursor_row: u16) {
        if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        } else if cursor_row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_row + 1 - MAX_VISIBLE_LINES;
        }
    }

    fn insert(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.listening {
            Style::default().fg(Color::Red)
        } else if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1));

        let width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        self.last_width = width;

        if self.buffer.is_empty() {
            self.scroll_offset = 0;
            let style = if self.listening {
                Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            frame.render_widget(
                Paragraph::new(self.placeholder).style(style).block(block),
                area,
            );
            if self.focused {
                frame.set_cursor_position((area.x + CONTENT_OFFSET_X, area.y + 1));
            }
            return;
        }

        let rows = wrap_ranges(&self.buffer, width);
        let (cursor_row, cursor_col) = self.cursor_cell(&rows);
        self.update_scroll_offset(cursor_row);

        let lines: Vec<Line> = rows
            .iter()
            .skip(usize::from(self.scroll_offset))
            .take(usize::from(MAX_VISIBLE_LINES))
            .map(|r| Line::raw(&self.buffer[r.clone()]))
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);

        if self.focused {
            frame.set_cursor_position((
                area.x + CONTENT_OFFSET_X + cursor_col,
                area.y + 1 + cursor_row - self.scroll_offset,
            ));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.insert(c.encode_utf8(&mut [0; 4]));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                let text = text.replace('\r', "").replace('\n', " ");
                self.insert(&text);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorUp => self.move_vertically(false).then_some(InputEvent::ContentChanged),
            TuiEvent::CursorDown => self.move_vertically(true).then_some(InputEvent::ContentChanged),
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                self.scroll_offset = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}
