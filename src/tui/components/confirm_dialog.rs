//! # Confirm Dialog
//!
//! Centered modal for the pending `ConfirmRequest`. Two buttons: "Cancelar"
//! and the request's confirm label, shown in red for destructive actions.
//! Keyboard focus starts on "Cancelar".

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::modal::ConfirmRequest;
use crate::tui::component::Component;
use crate::tui::ui::{HitMap, Target};

const CANCEL_LABEL: &str = "Cancelar";
const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 9;

pub struct ConfirmDialogView<'a> {
    pub request: &'a ConfirmRequest,
    /// Keyboard focus is on the confirm button
    pub confirm_focused: bool,
    pub hits: &'a mut HitMap,
}

fn button(label: &str, color: Color, focused: bool) -> Span<'static> {
    let mut style = Style::default().fg(color);
    if focused {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }
    Span::styled(format!("[ {} ]", label), style)
}

/// A `width` x `height` rect centered in `outer`, clipped to it.
pub fn centered_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let width = width.min(outer.width);
    let height = height.min(outer.height);
    Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    }
}

impl Component for ConfirmDialogView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Everything outside the dialog is the backdrop
        self.hits.push(area, Target::DialogBackdrop);

        let dialog = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
        frame.render_widget(Clear, dialog);
        self.hits.push(dialog, Target::DialogBody);

        let accent = if self.request.danger { Color::Red } else { Color::Cyan };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(accent))
            .title(Span::styled(
                format!(" {} ", self.request.title),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ))
            .padding(Padding::new(2, 2, 1, 0));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let [message_area, buttons_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
        frame.render_widget(
            Paragraph::new(self.request.message.as_str()).wrap(Wrap { trim: true }),
            message_area,
        );

        let cancel = button(CANCEL_LABEL, Color::Gray, !self.confirm_focused);
        let confirm = button(&self.request.confirm_label, accent, self.confirm_focused);
        let cancel_width = cancel.content.width() as u16;
        let confirm_width = confirm.content.width() as u16;
        let gap = 2;
        let total = cancel_width + gap + confirm_width;
        let start = buttons_area.x + buttons_area.width.saturating_sub(total) / 2;

        frame.render_widget(
            Paragraph::new(Line::from(vec![cancel, Span::raw("  "), confirm]))
                .alignment(Alignment::Center),
            buttons_area,
        );
        self.hits.push(
            Rect { x: start, width: cancel_width, ..buttons_area },
            Target::DialogCancel,
        );
        self.hits.push(
            Rect { x: start + cancel_width + gap, width: confirm_width, ..buttons_area },
            Target::DialogConfirm,
        );
    }
}
