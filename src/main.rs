mod app;
mod config;
mod event;
mod session;
mod store;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, AppScreen};
use config::Config;
use event::{AppEvent, EventHandler};
use session::controller::AnswerStatus;
use ui::components::question::QuestionCard;
use ui::components::setup::SetupPanel;
use ui::components::summary::SummaryPanel;
use ui::layout::AppLayout;

#[derive(Parser)]
#[command(
    name = "quizdr",
    version,
    about = "Terminal multiple-choice quiz trainer with adaptive retry"
)]
struct Cli {
    #[arg(short, long, help = "Question bank JSON file (default: bundled bank)")]
    bank: Option<PathBuf>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Questions per session (5-100)")]
    count: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(bank) = cli.bank {
        config.bank_path = Some(bank.to_string_lossy().to_string());
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(count) = cli.count {
        config.question_count = count;
    }
    config.validate();

    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(Instant::now()),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Setup => handle_setup_key(app, key),
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::Summary => handle_summary_key(app, key),
    }
}

fn handle_setup_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            let _ = app.config.save();
            app.should_quit = true;
        }
        KeyCode::Up | KeyCode::Char('k') => app.setup_up(),
        KeyCode::Down | KeyCode::Char('j') => app.setup_down(),
        KeyCode::Char(' ') => app.toggle_domain(),
        KeyCode::Left | KeyCode::Char('h') => app.adjust_count(-5),
        KeyCode::Right | KeyCode::Char('l') => app.adjust_count(5),
        KeyCode::Enter | KeyCode::Char('s') => {
            let _ = app.config.save();
            app.start_session();
        }
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    let status = match app.session.as_ref() {
        Some(session) => session.status(),
        None => return,
    };

    match key.code {
        KeyCode::Esc => app.abandon_session(),
        KeyCode::Char(ch @ '1'..='9') => {
            app.answer(ch as usize - '1' as usize);
        }
        KeyCode::Up | KeyCode::Char('k') if status == AnswerStatus::Unanswered => {
            app.option_up();
        }
        KeyCode::Down | KeyCode::Char('j') if status == AnswerStatus::Unanswered => {
            app.option_down();
        }
        KeyCode::Enter => {
            if status == AnswerStatus::Unanswered {
                let choice = app.option_cursor;
                app.answer(choice);
            } else {
                // Manual advance always beats the pending auto-advance
                app.advance();
            }
        }
        KeyCode::Char('n') | KeyCode::Char(' ') if status != AnswerStatus::Unanswered => {
            app.advance();
        }
        _ => {}
    }
}

fn handle_summary_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.start_session(),
        KeyCode::Char('m') | KeyCode::Esc => app.go_to_setup(),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Setup => render_setup(frame, app),
        AppScreen::Quiz => render_quiz(frame, app),
        AppScreen::Summary => render_summary(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;

    let info = match &app.bank {
        Some(bank) => format!(
            " {} questions across {} domains",
            bank.len(),
            bank.domains().len()
        ),
        None => " no question bank loaded".to_string(),
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " quizdr ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(ratatui::style::Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default().fg(colors.dim()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, text: &str, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;
    let footer = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(colors.dim()),
    )));
    frame.render_widget(footer, area);
}

fn render_setup(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header);

    let panel_area = ui::layout::centered_rect(60, 80, layout.main);
    match &app.bank {
        Some(bank) => {
            let panel = SetupPanel::new(
                bank.domains(),
                &app.selected,
                app.setup_cursor,
                app.config.question_count,
                app.setup_error.as_deref(),
                app.theme,
            );
            frame.render_widget(panel, panel_area);
        }
        None => {
            let colors = &app.theme.colors;
            let message = app
                .load_error
                .as_deref()
                .unwrap_or("question bank unavailable");
            let error = Paragraph::new(Line::from(Span::styled(
                format!(" {message}"),
                Style::default().fg(colors.error()),
            )))
            .block(
                Block::bordered()
                    .title(" Load Error ")
                    .border_style(Style::default().fg(colors.error())),
            );
            frame.render_widget(error, panel_area);
        }
    }

    render_footer(
        frame,
        app,
        " [Space] Toggle  [h/l] Count  [Enter] Start  [q] Quit ",
        layout.footer,
    );
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header);

    if let (Some(session), Some(bank)) = (&app.session, &app.bank) {
        let card_area = ui::layout::centered_rect(70, 85, layout.main);
        let card = QuestionCard::new(
            session.position() + 1,
            session.queue_len(),
            session.current(bank),
            session.options(),
            session.status(),
            session.chosen(),
            app.option_cursor,
            app.theme,
        );
        frame.render_widget(card, card_area);
    }

    let hint = match app.session.as_ref().map(|s| s.status()) {
        Some(AnswerStatus::Unanswered) => " [1-9] Answer  [j/k] Move  [Enter] Select  [Esc] End ",
        _ => " [Enter/n] Next  [Esc] End session ",
    };
    render_footer(frame, app, hint, layout.footer);
}

fn render_summary(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header);

    if let Some(session) = &app.session {
        let (answered, correct) = session.tally();
        let panel = SummaryPanel::new(answered, correct, app.theme);
        let panel_area = ui::layout::centered_rect(50, 60, layout.main);
        frame.render_widget(panel, panel_area);
    }

    render_footer(
        frame,
        app,
        " [r] Restart  [m/Esc] Setup  [q] Quit ",
        layout.footer,
    );
}
