//! # Toast Stack
//!
//! Notifications stacked in the top-right corner, newest at the bottom.
//! A toast is drawn once its entrance delay has passed and dimmed while it
//! fades out. Clicking a toast dismisses it.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::core::notification::{Toast, ToastKind};
use crate::tui::component::Component;
use crate::tui::ui::{HitMap, Target};

const TOAST_WIDTH: u16 = 42;
/// Border (2) + padding (2)
const HORIZONTAL_OVERHEAD: u16 = 4;
const MAX_MESSAGE_LINES: u16 = 3;

pub fn kind_color(kind: ToastKind) -> Color {
    match kind {
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
        ToastKind::Warning => Color::Yellow,
        ToastKind::Info => Color::Cyan,
    }
}

pub struct ToastStack<'a> {
    pub toasts: &'a [Toast],
    pub now: Instant,
    pub hits: &'a mut HitMap,
}

fn toast_height(toast: &Toast, width: u16) -> u16 {
    let inner = usize::from(width.saturating_sub(HORIZONTAL_OVERHEAD).max(1));
    let lines = textwrap::wrap(&toast.message, inner).len() as u16;
    lines.clamp(1, MAX_MESSAGE_LINES) + 2
}

impl Component for ToastStack<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = TOAST_WIDTH.min(area.width);
        let x = area.x + area.width - width;
        let mut y = area.y;

        for toast in self.toasts {
            if !toast.is_visible(self.now) && !toast.is_leaving() {
                continue;
            }
            let height = toast_height(toast, width);
            if y + height > area.y + area.height {
                break;
            }
            let rect = Rect { x, y, width, height };

            let color = kind_color(toast.kind);
            let mut style = Style::default().fg(color);
            if toast.is_leaving() {
                style = style.add_modifier(Modifier::DIM);
            }
            let title = Line::from(vec![
                Span::styled(format!(" {} ", toast.kind.icon()), style),
                Span::styled(format!("{} ", toast.title), style.add_modifier(Modifier::BOLD)),
            ]);
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(style)
                .title(title)
                .title(Line::from(" ✕ ").right_aligned())
                .padding(Padding::horizontal(1));

            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(toast.message.as_str())
                    .wrap(Wrap { trim: true })
                    .block(block),
                rect,
            );
            self.hits.push(rect, Target::Toast(toast.id));
            y += height;
        }
    }
}
