use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt};

use thewclub_packs::app::{App, Event};
use thewclub_packs::config::{self, AppConfig};
use thewclub_packs::lore::{GeminiClient, LoreSource, Offline};
use thewclub_packs::ui;

fn main() -> Result<()> {
    let config = config::from_args();
    let _guard = init_tracing(&config.log_dir)?;
    tracing::info!(seed = ?config.seed, offline = config.offline, "starting thewclub");

    let lore = lore_source(&config);
    let (tx, rx) = mpsc::channel();
    let mut app = App::new(config, lore, tx.clone());
    let mut terminal = setup_terminal()?;
    let res = run_app(&mut terminal, &mut app, tx, rx);
    restore_terminal(&mut terminal)?;
    tracing::info!("exiting");
    res
}

fn init_tracing(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let appender = rolling::daily(log_dir, "thewclub.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))?;
    Ok(guard)
}

fn lore_source(config: &AppConfig) -> Arc<dyn LoreSource> {
    if config.offline {
        return Arc::new(Offline);
    }
    let Some(key) = config.api_key.as_deref() else {
        tracing::warn!("no GEMINI_API_KEY set, pack lore will use stock copy");
        return Arc::new(Offline);
    };
    match GeminiClient::new(key, config.model.clone(), config.timings.lore_timeout) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "lore client unavailable");
            Arc::new(Offline)
        }
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input(tx: Sender<Event>) {
    thread::spawn(move || {
        loop {
            if !event::poll(Duration::from_millis(250)).unwrap_or(false) {
                continue;
            }
            let forwarded = match event::read() {
                Ok(CEvent::Key(key)) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
                Ok(CEvent::Mouse(mouse)) => match mouse.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(Event::Pointer {
                        column: mouse.column,
                        row: mouse.row,
                    }),
                    _ => None,
                },
                Ok(CEvent::Resize(_, _)) => Some(Event::Resize),
                Ok(_) => None,
                Err(_) => None,
            };
            if let Some(event) = forwarded {
                if tx.send(event).is_err() {
                    break;
                }
            }
        }
    });
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    tx: Sender<Event>,
    rx: mpsc::Receiver<Event>,
) -> Result<()> {
    spawn_input(tx);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        match rx.recv()? {
            Event::Pointer { column, row } => {
                let plot = ui::chart_area(terminal.size()?);
                app.on_pointer(column, row, plot);
            }
            event => app.on_event(event),
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
