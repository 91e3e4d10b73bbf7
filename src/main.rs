use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use character_chat::config::AppConfig;
use character_chat::core::logging;
use character_chat::error::{Error, Result};
use character_chat::tui::app::App;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (config, config_error) = AppConfig::load();

    // Initialize logging (file only; stdout belongs to the TUI)
    let _log_guard = logging::init_tui(
        &config.data_dir(),
        &config.logging.level,
        config.logging.keep_files,
    );
    log::info!("{} v{} starting", character_chat::NAME, character_chat::VERSION);

    // Setup terminal
    let mut terminal = setup_terminal(config.tui.mouse_enabled)?;

    // Run the app
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut app = App::new(&config, event_rx, event_tx);
    if let Some(e) = &config_error {
        app.report_config_error(e);
    }
    let result = app.run(&mut terminal, config.tick_rate()).await;

    // Restore terminal
    restore_terminal(&mut terminal, config.tui.mouse_enabled)?;

    if let Err(e) = result {
        log::error!("Event loop failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    log::info!("Shut down cleanly");
    Ok(())
}

fn setup_terminal(mouse: bool) -> Result<Tui> {
    enable_raw_mode().map_err(|e| Error::terminal(format!("enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Tui, mouse: bool) -> Result<()> {
    disable_raw_mode().map_err(|e| Error::terminal(format!("disable raw mode: {e}")))?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
