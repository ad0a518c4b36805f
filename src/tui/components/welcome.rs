//! # Welcome Component
//!
//! Shown in place of the transcript when a conversation has no messages:
//! a greeting and one chip per canned suggestion (F1..F3 or click).

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::texts;
use crate::core::transcript::SUGGESTIONS;
use crate::tui::component::Component;
use crate::tui::ui::{HitMap, Target};

pub struct Welcome<'a> {
    pub hits: &'a mut HitMap,
}

fn chip_text(index: usize, label: &str) -> String {
    format!("[F{}] {}", index + 1, label)
}

impl Component for Welcome<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chips = SUGGESTIONS.len() as u16;
        let [greeting, _, chip_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(chips * 2 - 1),
        ])
        .flex(Flex::Center)
        .areas(area);

        let lines = vec![
            Line::from(Span::styled(
                texts::WELCOME_TITLE,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                texts::WELCOME_SUBTITLE,
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), greeting);

        for (i, suggestion) in SUGGESTIONS.iter().enumerate() {
            let y = chip_area.y + i as u16 * 2;
            if y >= chip_area.y + chip_area.height {
                break;
            }
            let text = chip_text(i, suggestion.label);
            let width = (text.width() as u16).min(chip_area.width);
            let rect = Rect {
                x: chip_area.x + (chip_area.width - width) / 2,
                y,
                width,
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(text).style(Style::default().fg(Color::Cyan)),
                rect,
            );
            self.hits.push(rect, Target::Suggestion(i));
        }
    }
}
