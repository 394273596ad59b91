mod app;
mod config;
mod engine;
mod session;
mod store;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, AppScreen};
use engine::queue;
use ui::components::problem_card::ProblemCard;
use ui::components::summary_card::SummaryCard;
use ui::components::table_picker::TablePicker;
use ui::layout::{ScreenLayout, centered_rect};

#[derive(Parser)]
#[command(
    name = "factdr",
    version,
    about = "Terminal times-table trainer with adaptive drilling"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Preselect tables, e.g. 3,6,7")]
    tables: Option<String>,

    #[arg(short = 'n', long, help = "Problems per table")]
    per_table: Option<u8>,

    #[arg(long, help = "Seed the shuffle for a reproducible session")]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app = App::new(cli.seed);

    if let Some(per_table) = cli.per_table {
        app.config.problems_per_table = per_table;
        app.config.validate();
    }
    if let Some(theme_name) = cli.theme {
        if let Some(theme) = ui::theme::Theme::load(&theme_name) {
            let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));
            app.theme = theme;
        }
    }
    if let Some(list) = cli.tables {
        let tables = queue::parse_table_list(&list).map_err(|err| anyhow!("--tables: {err}"))?;
        app.preselect_tables(&tables);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        // Nothing in the UI is animated, so a plain poll keeps the loop
        // responsive without a background event thread.
        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::TableSelect => handle_select_key(app, key),
        AppScreen::Practice => handle_practice_key(app, key),
        AppScreen::Summary => handle_summary_key(app, key),
    }
}

fn handle_select_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        // Jump between the two picker columns
        KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
            let len = app.selected.len();
            app.cursor = (app.cursor + len / 2) % len;
        }
        KeyCode::Char(' ') => app.toggle_cursor(),
        KeyCode::Char('0') => app.toggle_table(10),
        KeyCode::Char(ch) if ch.is_ascii_digit() => {
            app.toggle_table(ch.to_digit(10).unwrap_or(0) as u8);
        }
        KeyCode::Enter => app.start_session(),
        _ => {}
    }
}

fn handle_practice_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.stop_session(),
        KeyCode::Backspace => app.backspace_answer(),
        KeyCode::Enter => {
            if matches!(app.feedback, Some(Ok(_))) {
                app.next_problem();
            } else {
                app.submit_answer();
            }
        }
        KeyCode::Char(ch) => app.push_answer_char(ch),
        _ => {}
    }
}

fn handle_summary_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('r') => app.restart_session(),
        KeyCode::Enter | KeyCode::Esc => app.back_to_select(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::TableSelect => render_select(frame, app),
        AppScreen::Practice => render_practice(frame, app),
        AppScreen::Summary => render_summary(frame, app),
    }
}

fn header_bar(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, info: String) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " factdr ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(info, Style::default().fg(colors.muted()).bg(colors.header_bg())),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn footer_bar(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, hints: &str) {
    let colors = &app.theme.colors;
    let footer = Paragraph::new(Line::from(Span::styled(
        hints.to_string(),
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(footer, area);
}

fn lifetime_info(app: &App) -> String {
    let correct = app.profile.lifetime_correct;
    let incorrect = app.profile.lifetime_incorrect;
    let total = correct + incorrect;
    if total == 0 {
        " no problems answered yet".to_string()
    } else {
        let pct = (correct as f64 / total as f64 * 100.0).round() as u32;
        format!(" all time: ✓ {correct}  ✗ {incorrect}  ({pct}%)")
    }
}

fn render_select(frame: &mut ratatui::Frame, app: &App) {
    let layout = ScreenLayout::new(frame.area());
    header_bar(frame, app, layout.header, lifetime_info(app));

    let picker_area = centered_rect(60, 80, layout.main);
    let picker = TablePicker::new(
        &app.selected,
        app.cursor,
        app.select_error.as_deref(),
        app.theme,
    );
    frame.render_widget(&picker, picker_area);

    footer_bar(
        frame,
        app,
        layout.footer,
        " [space] toggle  [1-9/0] quick toggle  [enter] start  [q] quit ",
    );
}

fn render_practice(frame: &mut ratatui::Frame, app: &App) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let layout = ScreenLayout::new(frame.area());

    let stats = session.stats();
    let mut info = format!(
        " ✓ {}  ✗ {}  |  {} new left",
        stats.session_correct,
        stats.session_incorrect,
        session.remaining_new(),
    );
    if session.difficult_count() > 0 {
        info.push_str(&format!("  |  {} tricky", session.difficult_count()));
    }
    header_bar(frame, app, layout.header, info);

    if let Some(fact) = session.current() {
        let card_area = centered_rect(50, 60, layout.main);
        let card = ProblemCard::new(fact, &app.answer, app.feedback.as_ref(), app.theme);
        frame.render_widget(&card, card_area);
    }

    let hints = if matches!(app.feedback, Some(Ok(_))) {
        " [enter] next problem  [esc] finish "
    } else {
        " [0-9] answer  [enter] check  [esc] finish "
    };
    footer_bar(frame, app, layout.footer, hints);
}

fn render_summary(frame: &mut ratatui::Frame, app: &App) {
    let Some(summary) = app.summary.as_ref() else {
        return;
    };
    let layout = ScreenLayout::new(frame.area());
    header_bar(frame, app, layout.header, lifetime_info(app));

    let card_area = centered_rect(60, 80, layout.main);
    let card = SummaryCard::new(summary, app.theme);
    frame.render_widget(&card, card_area);

    let hints = if summary.mastered {
        " [r] same tables again  [enter] pick tables  [q] quit "
    } else {
        " [enter] pick tables  [q] quit "
    };
    footer_bar(frame, app, layout.footer, hints);
}
