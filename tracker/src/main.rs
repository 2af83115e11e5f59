//! Combat tracker TUI application.
//!
//! A vim-style terminal interface for tracking hit points and initiative
//! at the table.
//!
//! # Headless Mode
//!
//! Run with `--headless` to drive the tracker from a line-oriented script on
//! stdin, suitable for automated testing:
//!
//! ```bash
//! cargo run -p tracker -- --headless < encounter.txt
//! ```

mod app;
mod editor;
mod events;
mod modal;
mod ui;

use std::fs::File;
use std::io::{self, stdout};
use std::sync::Mutex;

use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tracker_core::{FileStore, HeadlessRunner, Tracker, TrackerConfig};

use app::App;
use events::{handle_event, EventResult};
use modal::TerminalPrompter;
use ui::render::render;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    // Check for --help
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let config = parse_config_from_args(&args, TrackerConfig::from_env())?;
    let headless = args.iter().any(|a| a == "--headless");
    init_logging(&config, headless);
    info!(save_file = %config.save_file.display(), headless, "starting tracker");

    let store = FileStore::new(&config.save_file);
    let tracker = Tracker::new(store, config);

    if headless {
        let mut runner = HeadlessRunner::new(tracker, io::stdin().lock(), stdout());
        runner.run()?;
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, App::new(tracker));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        // Render, keeping the frame as the backdrop for any popups
        let backdrop = terminal.draw(|f| render(f, &app))?.buffer.clone();

        let ev = event::read()?;
        match handle_event(&mut app, ev) {
            EventResult::Quit => return Ok(()),
            EventResult::Dispatch(actions) => {
                let mut prompter = TerminalPrompter::new(terminal, &backdrop, app.theme.clone());
                for action in actions {
                    app.dispatch(action, &mut prompter);
                }
                if let Some(notice) = prompter.into_notices().pop() {
                    app.set_status(notice);
                }
            }
            EventResult::NeedsRedraw | EventResult::Continue => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Apply command line overrides on top of `config`.
fn parse_config_from_args(args: &[String], mut config: TrackerConfig) -> Result<TrackerConfig, String> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--save-file" => {
                let path = iter
                    .next()
                    .ok_or_else(|| "--save-file needs a path".to_string())?;
                config = config.with_save_file(path);
            }
            "--headless" | "--help" | "-h" => {}
            other => return Err(format!("Unknown argument: {other} (try --help)")),
        }
    }
    Ok(config)
}

/// Log to stderr in headless mode and to the log file under the TUI, where
/// stderr would corrupt the screen.
fn init_logging(config: &TrackerConfig, headless: bool) {
    let filter = EnvFilter::try_from_env("TRACKER_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if headless {
        let _ = registry.with(fmt::layer().with_writer(io::stderr)).try_init();
        return;
    }

    match File::create(&config.log_file) {
        Ok(file) => {
            let _ = registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init();
        }
        Err(e) => eprintln!(
            "Warning: could not open log file {}: {e}",
            config.log_file.display()
        ),
    }
}

fn print_help() {
    println!("Combat Tracker - hit points and initiative for tabletop games");
    println!();
    println!("USAGE:");
    println!("  tracker [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help            Show this help message");
    println!("  --headless            Read commands from stdin instead of running the TUI");
    println!("  --save-file <PATH>    File the party is saved in (default: tracker-storage.json)");
    println!();
    println!("ENVIRONMENT:");
    println!("  TRACKER_SAVE_FILE     Same as --save-file");
    println!("  TRACKER_SLOT_KEY      Key the party is stored under (default: savedParty)");
    println!("  TRACKER_LOG_FILE      TUI log file (default: tracker.log)");
    println!("  TRACKER_LOG           Log filter, e.g. debug or tracker_core=trace");
    println!();
    println!("HEADLESS COMMANDS:");
    for line in tracker_core::headless::HELP.lines().skip(1) {
        println!("{line}");
    }
    println!();
    println!("EXAMPLES:");
    println!("  tracker                               # Interactive TUI mode");
    println!("  tracker --headless < encounter.txt    # Scripted session");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("tracker")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_save_file_flag_overrides_config() {
        let config = parse_config_from_args(
            &args(&["--headless", "--save-file", "party.json"]),
            TrackerConfig::new(),
        )
        .unwrap();
        assert_eq!(config.save_file, std::path::PathBuf::from("party.json"));
    }

    #[test]
    fn test_missing_save_file_path_is_an_error() {
        assert!(parse_config_from_args(&args(&["--save-file"]), TrackerConfig::new()).is_err());
    }

    #[test]
    fn test_unknown_argument_is_an_error() {
        let err = parse_config_from_args(&args(&["--frobnicate"]), TrackerConfig::new()).unwrap_err();
        assert!(err.contains("--frobnicate"));
    }
}
