use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::queue::TABLE_MAX;
use crate::ui::theme::Theme;

/// Toggle-list of the tables 1-12. Two columns, cursor moves through both.
pub struct TablePicker<'a> {
    pub selected: &'a [bool; TABLE_MAX as usize],
    pub cursor: usize,
    pub error: Option<&'a str>,
    pub theme: &'a Theme,
}

impl<'a> TablePicker<'a> {
    pub fn new(
        selected: &'a [bool; TABLE_MAX as usize],
        cursor: usize,
        error: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            selected,
            cursor,
            error,
            theme,
        }
    }

    fn entry(&self, idx: usize) -> Vec<Span<'static>> {
        let colors = &self.theme.colors;
        let is_cursor = idx == self.cursor;
        let mark = if self.selected[idx] { "x" } else { " " };
        let indicator = if is_cursor { ">" } else { " " };

        let style = Style::default()
            .fg(if is_cursor {
                colors.accent()
            } else if self.selected[idx] {
                colors.fg()
            } else {
                colors.muted()
            })
            .add_modifier(if is_cursor {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });

        vec![Span::styled(
            format!(" {indicator} [{mark}] table {:>2} ", idx + 1),
            style,
        )]
    }
}

impl Widget for &TablePicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Which tables do you want to practice? ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = TABLE_MAX as usize / 2;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(rows as u16),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let mut lines = Vec::with_capacity(rows);
        for row in 0..rows {
            let mut spans = self.entry(row);
            spans.extend(self.entry(row + rows));
            lines.push(Line::from(spans));
        }
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(layout[1], buf);

        if let Some(error) = self.error {
            let line = Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(colors.bad()).add_modifier(Modifier::BOLD),
            ));
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .render(layout[3], buf);
        }
    }
}
