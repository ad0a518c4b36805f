//! # Sidebar Component
//!
//! Conversation list on the left. The newest conversation slides in from the
//! left edge; removed ones dim out until the core purges them.
//!
//! Follows the transient wrapper pattern: `SidebarView` is built each frame
//! around the core `Sidebar` and records its clickable rows in the `HitMap`.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::sidebar::{EntryPhase, Sidebar, SidebarEntry};
use crate::core::texts;
use crate::tui::component::Component;
use crate::tui::ui::{HitMap, Target};

const NEW_BUTTON: &str = "+ Nueva conversación";
const DELETE_ICON: &str = "✕";
/// Columns an entry travels while sliding in.
const SLIDE_DISTANCE: f32 = 6.0;
/// Rows per entry: title line + date line.
const ENTRY_HEIGHT: u16 = 2;

pub struct SidebarView<'a> {
    pub sidebar: &'a Sidebar,
    pub now: Instant,
    /// Keyboard focus is on the list
    pub focused: bool,
    pub hits: &'a mut HitMap,
}

impl SidebarView<'_> {
    fn entry_lines(&self, entry: &SidebarEntry, selected: bool, width: u16) -> [Line<'static>; 2] {
        let active = self.sidebar.active() == Some(entry.id);
        let opacity = entry.opacity(self.now);

        let indent = match entry.phase {
            EntryPhase::Entering { .. } => ((1.0 - opacity) * SLIDE_DISTANCE).round() as usize,
            _ => 0,
        };

        let mut style = if active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        if entry.is_leaving() {
            style = Style::default().fg(Color::DarkGray);
            if opacity < 0.5 {
                style = style.add_modifier(Modifier::DIM);
            }
        }
        if selected && self.focused {
            style = style.add_modifier(Modifier::REVERSED);
        }

        let marker = if active { "▌" } else { " " };
        let title_width = (width as usize)
            .saturating_sub(indent + marker.width() + DELETE_ICON.width() + 1);
        let title = truncate_str(entry.title.display(self.now), title_width);
        let padding = title_width.saturating_sub(title.width());

        let title_line = Line::from(vec![
            Span::raw(" ".repeat(indent)),
            Span::styled(marker, style),
            Span::styled(format!("{}{}", title, " ".repeat(padding)), style),
            Span::raw(" "),
            Span::styled(DELETE_ICON, Style::default().fg(Color::DarkGray)),
        ]);
        let date_line = Line::from(Span::styled(
            format!("{}  {}", " ".repeat(indent), entry.updated_at),
            Style::default().fg(Color::DarkGray),
        ));
        [title_line, date_line]
    }
}

impl Component for SidebarView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_color = if self.focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(border_color))
            .title(" Conversaciones ")
            .title_alignment(Alignment::Left)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let button = Rect { height: 1, ..inner };
        frame.render_widget(
            Paragraph::new(NEW_BUTTON).style(Style::default().fg(Color::Green)),
            button,
        );
        self.hits.push(button, Target::NewConversation);

        let list = Rect {
            y: inner.y + 2,
            height: inner.height.saturating_sub(2),
            ..inner
        };
        if self.sidebar.is_empty() && self.sidebar.entries().is_empty() {
            frame.render_widget(
                Paragraph::new(texts::EMPTY_SIDEBAR)
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center),
                list,
            );
            return;
        }

        let selected = self.sidebar.selected_id();
        let mut y = list.y;
        for entry in self.sidebar.entries() {
            if y + ENTRY_HEIGHT > list.y + list.height {
                break;
            }
            let row = Rect {
                y,
                height: ENTRY_HEIGHT,
                ..list
            };
            let lines = self.entry_lines(entry, selected == Some(entry.id), list.width);
            frame.render_widget(Paragraph::new(lines.to_vec()), row);

            if !entry.is_leaving() {
                self.hits.push(row, Target::Conversation(entry.id));
                let icon = Rect {
                    x: row.x + row.width.saturating_sub(DELETE_ICON.width() as u16),
                    width: DELETE_ICON.width() as u16,
                    height: 1,
                    ..row
                };
                self.hits.push(icon, Target::DeleteConversation(entry.id));
            }
            y += ENTRY_HEIGHT;
        }
    }
}

/// Truncate to `max_width` display columns, adding "…" when cut.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
