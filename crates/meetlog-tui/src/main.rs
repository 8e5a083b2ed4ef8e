mod actions;
mod app;
mod ui;

use std::fs::File;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::actions::execute_action;
use crate::app::App;
use meetlog_store::sample::sample_meetings;
use meetlog_store::Store;

#[derive(Debug, Parser)]
#[command(name = "meetlog-tui", version, about = "Customer meeting log (TUI)")]
struct Args {
    /// Config file to load instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start with an empty meeting list.
    #[arg(long)]
    no_sample_data: bool,
    /// Write logs to this file; nothing is logged without it.
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path, args.verbose)?;
    }

    let config = meetlog_config::load(args.config.clone()).context("load config")?;
    let mut store = if config.sample_data && !args.no_sample_data {
        Store::with_meetings(sample_meetings()).context("seed sample meetings")?
    } else {
        Store::new()
    };
    info!(meetings = store.len(), "starting");

    let mut app = App::new(&config);
    let mut terminal = TerminalGuard::new()?;
    run_app(&mut terminal, &mut store, &mut app)
}

/// The terminal belongs to the UI, so logs only ever go to a file.
fn init_logging(path: &Path, verbose: bool) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("create log file {}", path.display()))?;
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
    Ok(())
}

fn run_app(terminal: &mut TerminalGuard, store: &mut Store, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        while let Some(action) = app.next_action() {
            if let Err(err) = execute_action(app, store, action) {
                app.set_error(err.to_string());
            }
        }
        app.sync(store);

        terminal
            .terminal_mut()
            .draw(|frame| ui::draw(frame, app, store))?;

        if app.should_quit {
            break;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_secs(0));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key, store);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            original_hook(info);
        }));

        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "meetlog-tui",
            "--no-sample-data",
            "--log-file",
            "/tmp/meetlog.log",
            "-v",
        ])
        .expect("parse");
        assert!(args.no_sample_data);
        assert!(args.verbose);
        assert!(args.config.is_none());
        assert_eq!(
            args.log_file.as_deref(),
            Some(std::path::Path::new("/tmp/meetlog.log"))
        );
    }
}
