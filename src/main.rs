//! ZiaMet - NMSU weather station network dashboard
//!
//! A terminal UI application that displays current conditions, 24h trends and
//! the network map for the ZiaMet weather stations across New Mexico.

use std::io;
use std::panic;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use ziamet::app::App;
use ziamet::cli::{Cli, StartupConfig};
use ziamet::config::Config;
use ziamet::{logging, ui};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Validate CLI arguments before touching the terminal
    let startup = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    startup.apply_to(&mut config);

    if let Err(e) = logging::init(cli.log_level, config.log_path().as_deref()) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    tracing::debug!(?config, "Resolved configuration");
    tracing::info!(
        endpoint = %config.endpoint,
        live_data = config.live_data.as_str(),
        "Starting ZiaMet dashboard"
    );

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let provider = Arc::new(config.station_client());
    let mut app = App::with_startup_config(provider, &startup, config.auto_refresh_interval());

    // Initial fetch runs in the background while the loading state renders
    app.mount();

    // Main event loop
    loop {
        app.poll_refresh();
        app.tick();

        terminal.draw(|f| ui::render(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    tracing::info!("ZiaMet dashboard closed");

    Ok(())
}
