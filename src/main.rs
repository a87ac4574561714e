mod input;
mod logging;
mod view;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::broadcast::{self, error::RecvError};

use input::UiState;
use now_playing::model::{load_queue_file, sample_queue};
use now_playing::{PlaybackConfig, PlaybackController, PlaybackEvent};
use view::AppView;

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Terminal now-playing screen with an editable play queue
#[derive(Parser, Debug)]
#[command(name = "now-playing", version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, env = "NOW_PLAYING_CONFIG")]
    config: Option<PathBuf>,

    /// JSON file with the queue to load; a built-in sample queue is used otherwise
    #[arg(short, long)]
    queue: Option<PathBuf>,

    /// Directory for log files
    #[arg(long, default_value = logging::DEFAULT_LOG_DIR)]
    log_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = match logging::init_logging(&cli.log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!("=== Now Playing Starting ===");

    let config = PlaybackConfig::load_or_default(cli.config.as_deref())?;
    let queue = match &cli.queue {
        Some(path) => load_queue_file(path)?,
        None => {
            tracing::debug!("No queue file given, using sample queue");
            sample_queue()
        }
    };

    let controller = PlaybackController::new(queue, config);
    let event_logger = tokio::spawn(log_playback_events(controller.events()));

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    controller.shutdown().await;
    drop(controller);
    event_logger.abort();

    if let Err(err) = &res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Now Playing shutting down");
    res
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, controller: &PlaybackController) -> Result<()> {
    let mut snapshots = controller.subscribe();
    let mut ui = UiState::default();
    let mut needs_redraw = true;

    loop {
        if ui.auto_clear_status() {
            needs_redraw = true;
        }
        // A closed channel means the controller is gone; keep drawing the last state
        if snapshots.has_changed().unwrap_or(false) {
            needs_redraw = true;
        }

        if needs_redraw {
            let snapshot = snapshots.borrow_and_update().clone();
            ui.clamp_selection(snapshot.queue.len());
            terminal
                .draw(|f| AppView::render(f, &snapshot, &ui))
                .context("Failed to draw frame")?;
            needs_redraw = false;
        }

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = input::handle_key_event(controller, &mut ui, key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
                needs_redraw = true;
            } else {
                // Resize and friends
                needs_redraw = true;
            }
        }

        if ui.should_quit {
            break;
        }
    }

    Ok(())
}

async fn log_playback_events(mut events: broadcast::Receiver<PlaybackEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => tracing::debug!(?event, "Playback event"),
            Err(RecvError::Lagged(skipped)) => tracing::warn!(skipped, "Event logger lagged"),
            Err(RecvError::Closed) => break,
        }
    }
}
