// main.rs

mod app;
mod config;
mod store;
mod sync;
mod todo;
mod tui;

use crate::app::App;
use crate::store::TodoStore;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self};
use std::sync::{Arc, mpsc};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let cfg = config::load_config();
    let db_path = cfg.db_path();
    let store = TodoStore::open(&db_path)?;
    let snapshot = store.list()?;
    tracing::info!(db = %db_path.display(), todos = snapshot.len(), "store opened");

    let (command_tx, command_rx) = mpsc::channel();
    let (event_tx, event_rx) = mpsc::channel();
    let writer = sync::spawn_writer(store, command_rx, event_tx);

    let mut app = App::new(snapshot, command_tx, event_rx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the TUI event loop (this blocks until exit)
    let res = tui::run_app(&mut terminal, &mut app);

    // Restore terminal state
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Dropping the app closes the command channel; joining the writer lets
    // queued mutations land before exit
    drop(app);
    if writer.join().is_err() {
        eprintln!("Store writer panicked; recent changes may not be saved");
    }

    // Handle errors from the event loop if any
    if let Err(err) = res {
        eprintln!("Application error: {}", err);
    }

    Ok(())
}

fn init_logging() {
    let file = match std::fs::File::create(config::log_file_path()) {
        Ok(file) => file,
        Err(_) => return,
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
}
