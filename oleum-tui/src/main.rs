//! Oleum terminal client
//!
//! Run: cargo run -p oleum-tui -- --demo

mod app;
mod demo;
mod logger;
mod ui;

use anyhow::Result;
use app::{App, TaskResult};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use oleum_client::{Backend, ClientConfig, Shell};
use ratatui::prelude::*;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[clap(version, about)]
struct Cli {
    /// Directory holding the session file [env: OLEUM_DATA_DIR]
    #[clap(long)]
    data_dir: Option<PathBuf>,

    /// Base URL of the hosted store [env: OLEUM_BACKEND_URL]
    #[clap(long)]
    backend_url: Option<String>,

    /// API key of the hosted store [env: OLEUM_API_KEY]
    #[clap(long)]
    api_key: Option<String>,

    /// Use an in-memory store with sample data instead of the hosted one
    #[clap(long)]
    demo: bool,

    /// Also write logs to daily files in this directory
    #[clap(long)]
    log_dir: Option<PathBuf>,
}

impl Cli {
    /// Environment first, then flags on top
    fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &self.backend_url {
            config.backend_url = url.clone();
        }
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key.clone());
        }
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir.clone());
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    logger::init_logger(cli.log_dir.as_deref())?;

    let config = cli.config();
    let backend: Arc<dyn Backend> = if cli.demo {
        tracing::info!(
            "Demo store: sign in as '{}' / '{}'",
            demo::DEMO_USER,
            demo::DEMO_PASSWORD
        );
        Arc::new(demo::seeded_backend()?)
    } else {
        tracing::info!(url = %config.backend_url, "Using hosted store");
        Arc::new(config.build_backend()?)
    };

    let (shell, task) = Shell::start(config.session_store());
    let (tx, mut rx) = mpsc::channel(32);
    let mut app = App::new(shell, backend, tx);
    app.spawn(task);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, &mut app, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    rx: &mut mpsc::Receiver<TaskResult>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
        {
            app.handle_key(key);
        }

        // Outcomes of finished backend calls (non-blocking)
        while let Ok(result) = rx.try_recv() {
            app.apply(result);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
