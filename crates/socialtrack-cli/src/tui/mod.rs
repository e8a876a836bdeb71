//! Interactive TUI dashboard for the month tracker.

pub mod app;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use socialtrack_core::narrative::{NarrativeGenerator, TemplateNarrative};
use socialtrack_store::MonthStore;

use app::{App, View};

/// Launch the interactive TUI dashboard.
pub async fn run_dashboard(store: MonthStore, export_dir: PathBuf) -> Result<()> {
    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, export_dir);
    let generator = TemplateNarrative;

    let result = run_event_loop(&mut terminal, &mut app, &generator).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    generator: &dyn NarrativeGenerator,
) -> Result<()> {
    let tick_rate = app.tick_rate;

    loop {
        // Render.
        terminal.draw(|f| ui::render(f, app))?;

        // Poll for events with a timeout matching the tick rate.
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // The reset modal swallows every key.
                if app.confirm_reset {
                    match key.code {
                        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_reset_now(),
                        _ => app.cancel_reset(),
                    }
                    continue;
                }

                // Clear status message on any keypress.
                app.status_message = None;

                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        app.navigate_back();
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.should_quit = true;
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        app.activate();
                    }
                    KeyCode::Char('j') | KeyCode::Down => {
                        app.move_down();
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        app.move_up();
                    }
                    KeyCode::Tab => {
                        app.cycle_view();
                    }
                    KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                        app.adjust_count(1);
                    }
                    KeyCode::Char('-') | KeyCode::Left => {
                        app.adjust_count(-1);
                    }
                    KeyCode::Char('n') if app.view == View::Report => {
                        app.regenerate_narrative(generator).await;
                    }
                    KeyCode::Char('s') if app.view == View::Report => {
                        app.start_send();
                    }
                    KeyCode::Char('u') if app.view == View::Report => {
                        app.clear_signature();
                    }
                    KeyCode::Char('x') if app.view == View::Report => {
                        app.export(crate::export::ExportFormat::Pdf);
                    }
                    KeyCode::Char('w') if app.view == View::Report => {
                        app.export(crate::export::ExportFormat::Docx);
                    }
                    KeyCode::Char('p') => {
                        app.open_plan_selection();
                    }
                    KeyCode::Char('r') => {
                        app.request_reset();
                    }
                    KeyCode::Char('?') => {
                        app.show_help();
                    }
                    _ => {}
                }
            }
        } else {
            // Tick: advance any in-flight simulated send.
            app.tick();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
