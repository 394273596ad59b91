use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::fact::Fact;
use crate::session::answer::AnswerError;
use crate::session::practice::Outcome;
use crate::ui::theme::Theme;

pub struct ProblemCard<'a> {
    pub fact: Fact,
    pub answer: &'a str,
    pub feedback: Option<&'a Result<Outcome, AnswerError>>,
    pub theme: &'a Theme,
}

impl<'a> ProblemCard<'a> {
    pub fn new(
        fact: Fact,
        answer: &'a str,
        feedback: Option<&'a Result<Outcome, AnswerError>>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            fact,
            answer,
            feedback,
            theme,
        }
    }
}

impl Widget for &ProblemCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let problem = format!("{} × {} = ?", self.fact.a, self.fact.b);
        Paragraph::new(Line::from(Span::styled(
            problem,
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[1], buf);

        // The scored answer stays visible while feedback is on screen.
        let answered = matches!(self.feedback, Some(Ok(_)));
        let cursor = if answered { "" } else { "_" };
        let answer_line = Line::from(vec![
            Span::styled("answer: ", Style::default().fg(colors.muted())),
            Span::styled(
                format!("{}{cursor}", self.answer),
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(answer_line)
            .alignment(Alignment::Center)
            .render(layout[3], buf);

        let feedback_area = layout[4];
        match self.feedback {
            Some(Ok(outcome)) if outcome.correct => {
                banner(buf, feedback_area, "Correct!", colors.good(), colors.good_bg());
            }
            Some(Ok(outcome)) => {
                let text = format!(
                    "Not quite. {} × {} = {}",
                    outcome.fact.a, outcome.fact.b, outcome.expected
                );
                banner(buf, feedback_area, &text, colors.bad(), colors.bad_bg());
            }
            Some(Err(err)) => {
                Paragraph::new(Line::from(Span::styled(
                    err.to_string(),
                    Style::default().fg(colors.warning()),
                )))
                .alignment(Alignment::Center)
                .render(feedback_area, buf);
            }
            None => {}
        }
    }
}

fn banner(buf: &mut Buffer, area: Rect, text: &str, fg: ratatui::style::Color, bg: ratatui::style::Color) {
    if area.height == 0 {
        return;
    }
    let row = Rect::new(area.x, area.y, area.width, 1);
    for x in row.x..row.x + row.width {
        buf[(x, row.y)].set_style(Style::default().bg(bg));
    }
    let start = row.x + row.width.saturating_sub(text.chars().count() as u16) / 2;
    buf.set_string(
        start,
        row.y,
        text,
        Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
    );
}
