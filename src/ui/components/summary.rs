use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

/// End-of-session summary. Counts are per question view, so a re-queued
/// miss answered correctly later contributes one wrong and one right view.
pub struct SummaryPanel<'a> {
    answered: usize,
    correct: usize,
    theme: &'a Theme,
}

impl<'a> SummaryPanel<'a> {
    pub fn new(answered: usize, correct: usize, theme: &'a Theme) -> Self {
        Self {
            answered,
            correct,
            theme,
        }
    }

    fn accuracy(&self) -> f64 {
        if self.answered == 0 {
            return 0.0;
        }
        self.correct as f64 / self.answered as f64 * 100.0
    }
}

impl Widget for SummaryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Session Complete ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Session complete",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("Questions answered: {}", self.answered),
                Style::default().fg(colors.fg()),
            )),
            Line::from(Span::styled(
                format!("Correct: {}", self.correct),
                Style::default().fg(colors.correct()),
            )),
            Line::from(Span::styled(
                format!("Accuracy: {:.0}%", self.accuracy()),
                Style::default().fg(colors.fg()),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
