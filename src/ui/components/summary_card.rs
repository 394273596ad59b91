use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::stats::SessionStats;
use crate::session::summary::SessionSummary;
use crate::ui::theme::Theme;

pub struct SummaryCard<'a> {
    pub summary: &'a SessionSummary,
    pub theme: &'a Theme,
}

impl<'a> SummaryCard<'a> {
    pub fn new(summary: &'a SessionSummary, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }
}

fn totals_line(label: &str, correct: u64, incorrect: u64, percent: Option<u32>) -> String {
    match percent {
        Some(pct) => format!("{label}: ✓ {correct}  ✗ {incorrect}  ({pct}%)"),
        None => format!("{label}: no problems answered yet"),
    }
}

impl Widget for &SummaryCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let stats: &SessionStats = &self.summary.stats;

        let title = if self.summary.mastered {
            " All mastered! "
        } else {
            " Session summary "
        };
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let headline = if self.summary.mastered {
            ("You know every problem in this set!", colors.good())
        } else {
            ("Nice work, see you next time.", colors.fg())
        };
        Paragraph::new(Line::from(Span::styled(
            headline.0,
            Style::default().fg(headline.1).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        let session = totals_line(
            "This session",
            u64::from(stats.session_correct),
            u64::from(stats.session_incorrect),
            stats.session_percent(),
        );
        Paragraph::new(Line::from(Span::styled(
            session,
            Style::default().fg(colors.fg()),
        )))
        .alignment(Alignment::Center)
        .render(layout[1], buf);

        let lifetime = totals_line(
            "All sessions",
            stats.lifetime_correct,
            stats.lifetime_incorrect,
            stats.lifetime_percent(),
        );
        Paragraph::new(Line::from(Span::styled(
            lifetime,
            Style::default().fg(colors.muted()),
        )))
        .alignment(Alignment::Center)
        .render(layout[2], buf);

        if !self.summary.tricky.is_empty() {
            let mut lines = vec![Line::from(Span::styled(
                "These still need work:",
                Style::default().fg(colors.warning()).add_modifier(Modifier::BOLD),
            ))];
            for fact in &self.summary.tricky {
                lines.push(Line::from(Span::styled(
                    format!("{} × {} = {}", fact.a, fact.b, fact.product()),
                    Style::default().fg(colors.bad()),
                )));
            }
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(layout[4], buf);
        }
    }
}
