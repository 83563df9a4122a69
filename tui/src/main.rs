//! FinFund TUI Entry Point
//!
//! Launches the terminal surface for the pitch coach, trust gauge and secure
//! chat.
//!
//! Timings come from `$XDG_CONFIG_HOME/finfund/disclosure.toml` and the
//! `FINFUND_*` environment variables. Logs go to
//! `$XDG_CACHE_HOME/finfund/tui.log`, filtered by `RUST_LOG`.

use std::fs;
use std::io::{self, IsTerminal};
use std::panic;
use std::sync::Mutex;

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finfund_tui::mock::MockData;
use finfund_tui::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: finfund-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  • Running in a non-interactive environment (CI, container)");
        eprintln!("  • SSH without -t flag");
        eprintln!("  • Piped stdin/stdout");
        std::process::exit(1);
    }

    init_logging()?;

    let config = disclosure_core::load_config().context("Failed to load configuration")?;
    tracing::info!(
        source = %config.source(),
        char_delay_ms = config.reveal.char_delay.as_millis(),
        gauge_duration_ms = config.gauge_duration.as_millis(),
        "Configuration loaded"
    );
    let mock = MockData::embedded().context("Failed to parse embedded mock data")?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(config, mock)?;
    let result = app.run(&mut terminal).await;
    app.shutdown().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

/// Send logs to a file so they never draw over the alternate screen
fn init_logging() -> anyhow::Result<()> {
    let Some(dir) = dirs::cache_dir().map(|p| p.join("finfund")) else {
        return Ok(());
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let path = dir.join("tui.log");
    let file = fs::File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    Ok(())
}
