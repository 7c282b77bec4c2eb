use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::controller::AnswerStatus;
use crate::session::options::AnswerOption;
use crate::store::bank::QuestionRecord;
use crate::ui::theme::Theme;

/// The question card: prompt, numbered options, and the post-answer
/// reveal. Before an answer, options follow the cursor; afterwards the
/// correct option and a wrong pick are highlighted.
pub struct QuestionCard<'a> {
    index: usize,
    total: usize,
    record: &'a QuestionRecord,
    options: &'a [AnswerOption],
    status: AnswerStatus,
    chosen: Option<usize>,
    cursor: usize,
    theme: &'a Theme,
}

impl<'a> QuestionCard<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        index: usize,
        total: usize,
        record: &'a QuestionRecord,
        options: &'a [AnswerOption],
        status: AnswerStatus,
        chosen: Option<usize>,
        cursor: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            index,
            total,
            record,
            options,
            status,
            chosen,
            cursor,
            theme,
        }
    }

    fn option_style(&self, i: usize, option: &AnswerOption) -> Style {
        let colors = &self.theme.colors;
        match self.status {
            AnswerStatus::Unanswered => {
                if i == self.cursor {
                    Style::default()
                        .fg(colors.highlight())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                }
            }
            AnswerStatus::Correct | AnswerStatus::Incorrect => {
                if option.is_correct {
                    Style::default()
                        .fg(colors.correct())
                        .add_modifier(Modifier::BOLD)
                } else if self.chosen == Some(i) {
                    Style::default()
                        .fg(colors.incorrect())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.dim())
                }
            }
        }
    }
}

impl Widget for QuestionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let title = format!(
            " Question {}/{} \u{2014} {} ",
            self.index, self.total, self.record.domain
        );
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::new();

        if let Some(ref lesson) = self.record.lesson {
            lines.push(Line::from(Span::styled(
                lesson.clone(),
                Style::default().fg(colors.dim()),
            )));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            self.record.prompt.clone(),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        for (i, option) in self.options.iter().enumerate() {
            let indicator = if self.status == AnswerStatus::Unanswered && i == self.cursor {
                ">"
            } else {
                " "
            };
            lines.push(Line::from(Span::styled(
                format!(" {indicator} [{}] {}", i + 1, option.text),
                self.option_style(i, option),
            )));
        }

        lines.push(Line::from(""));
        match self.status {
            AnswerStatus::Unanswered => {}
            AnswerStatus::Correct => {
                lines.push(Line::from(Span::styled(
                    " Correct!",
                    Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::BOLD),
                )));
            }
            AnswerStatus::Incorrect => {
                lines.push(Line::from(Span::styled(
                    " Incorrect \u{2014} this one will come back.",
                    Style::default()
                        .fg(colors.error())
                        .add_modifier(Modifier::BOLD),
                )));
            }
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
