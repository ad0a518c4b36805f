//! # Header Component
//!
//! One-line bar above the transcript: sidebar toggle, the conversation title
//! (mid-animation when a new title is being typed out) and the mic state.
//!
//! Stateless: every field is a prop, rebuilt each frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;
use crate::tui::ui::{HitMap, Target};

const TOGGLE: &str = "☰ ";
const MIC: &str = " ● Ctrl+L ";

pub struct Header<'a> {
    /// Title as currently revealed
    pub title: &'a str,
    pub voice_supported: bool,
    pub listening: bool,
    pub hits: &'a mut HitMap,
}

impl Component for Header<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(TOGGLE, Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.title,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ];
        let toggle_width = TOGGLE.chars().count() as u16;
        self.hits.push(
            Rect { width: toggle_width.min(area.width), height: 1, ..area },
            Target::ToggleSidebar,
        );

        if self.voice_supported {
            let mic_width = MIC.chars().count() as u16;
            let used = toggle_width + unicode_width::UnicodeWidthStr::width(self.title) as u16;
            let gap = area.width.saturating_sub(used + mic_width);
            let mic_style = if self.listening {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::raw(" ".repeat(gap as usize)));
            spans.push(Span::styled(MIC, mic_style));
            if used + mic_width <= area.width {
                self.hits.push(
                    Rect {
                        x: area.x + area.width - mic_width,
                        width: mic_width,
                        height: 1,
                        ..area
                    },
                    Target::Microphone,
                );
            }
        }

        frame.render_widget(Line::from(spans), area);
    }
}
