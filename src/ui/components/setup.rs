use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

/// Session setup screen: domain checklist plus the question-count row.
/// The cursor walks the domain rows and then the count row at the bottom.
pub struct SetupPanel<'a> {
    domains: &'a [String],
    selected: &'a [bool],
    cursor: usize,
    count: usize,
    error: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> SetupPanel<'a> {
    pub fn new(
        domains: &'a [String],
        selected: &'a [bool],
        cursor: usize,
        count: usize,
        error: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            domains,
            selected,
            cursor,
            count,
            error,
            theme,
        }
    }
}

impl Widget for SetupPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" New Session ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(Span::styled(
                "quizdr",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Pick your domains, set a length, start",
                Style::default().fg(colors.dim()),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let mut rows: Vec<Line> = Vec::with_capacity(self.domains.len() + 2);
        for (i, domain) in self.domains.iter().enumerate() {
            let is_cursor = i == self.cursor;
            let checked = self.selected.get(i).copied().unwrap_or(false);
            let indicator = if is_cursor { ">" } else { " " };
            let checkbox = if checked { "[x]" } else { "[ ]" };

            let style = Style::default()
                .fg(if is_cursor {
                    colors.accent()
                } else if checked {
                    colors.fg()
                } else {
                    colors.dim()
                })
                .add_modifier(if is_cursor {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                });

            rows.push(Line::from(Span::styled(
                format!(" {indicator} {checkbox} {domain}"),
                style,
            )));
        }

        rows.push(Line::from(""));
        let on_count = self.cursor == self.domains.len();
        let indicator = if on_count { ">" } else { " " };
        rows.push(Line::from(Span::styled(
            format!(" {indicator} Questions: < {} >", self.count),
            Style::default()
                .fg(if on_count { colors.accent() } else { colors.fg() })
                .add_modifier(if on_count {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                }),
        )));

        Paragraph::new(rows).render(layout[1], buf);

        if let Some(error) = self.error {
            Paragraph::new(Line::from(Span::styled(
                format!(" {error}"),
                Style::default().fg(colors.error()),
            )))
            .render(layout[2], buf);
        }
    }
}
