//! hubterm - Main entry point.
//!
//! Opens a terminal connection dialog for one device.
//!
//! Usage: hubterm [OPTIONS] [TARGET]
//!
//! Options:
//!   --version, -v           Show version
//!   --config PATH           Read settings from PATH instead of ~/.hubtermrc
//!   --icon                  Use the console icon + menu item trigger
//!   --list-keys             List saved private keys
//!   --add-key NAME FILE     Save the private key in FILE as NAME
//!   --remove-key NAME       Remove saved keys named NAME
//!
//! Requests submitted in the dialog are printed as JSON on exit, with
//! secrets omitted.

use std::env;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use hubterm::app::App;
use hubterm::config::Config;
use hubterm::credentials::{CredentialList, CredentialStorage};
use hubterm::logging;
use hubterm::session::{PendingSessions, VisibilityRegistry};

/// Application version.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum iterations for main loop (safety bound).
const MAX_MAIN_ITERATIONS: usize = 10_000_000;

/// Flags followed by values, with how many values they take.
const VALUE_FLAGS: [(&str, usize); 3] = [("--config", 1), ("--add-key", 2), ("--remove-key", 1)];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    // Handle --version flag
    if args.iter().any(|a| a == "--version" || a == "-v") {
        println!("hubterm v{}", VERSION);
        return Ok(());
    }

    let mut config = match flag_value(&args, "--config") {
        Some(path) => Config::load_from(Path::new(path))?,
        None => Config::load()?,
    };
    apply_overrides(&mut config, &args);

    if let Err(e) = logging::init(&config.log_config) {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    let storage = CredentialStorage::with_path(config.credentials_path.clone());

    // Key management commands run without the TUI
    if let Some(name) = flag_value(&args, "--add-key") {
        let Some(file) = args
            .iter()
            .position(|a| a == "--add-key")
            .and_then(|i| args.get(i + 2))
        else {
            eprintln!("Usage: hubterm --add-key NAME FILE");
            std::process::exit(2);
        };
        storage.add_key_file(name, &PathBuf::from(file))?;
        println!("Saved key '{}' to {}", name, storage.path().display());
        return Ok(());
    }

    if let Some(name) = flag_value(&args, "--remove-key") {
        let removed = storage.remove_key(name)?;
        println!("Removed {} key(s) named '{}'", removed, name);
        return Ok(());
    }

    let keys = match storage.load() {
        Ok(keys) => keys,
        Err(e) => {
            tracing::warn!("Failed to load saved keys: {}", e);
            eprintln!("Warning: could not load saved keys: {}", e);
            CredentialList::new()
        }
    };

    if args.iter().any(|a| a == "--list-keys") {
        if keys.is_empty() {
            println!("No private keys saved");
        }
        for (i, key) in keys.iter().enumerate() {
            println!("{:>3}  {}", i + 1, key.name);
        }
        return Ok(());
    }

    let target = positional(&args).unwrap_or_default();

    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create application
    let pending = PendingSessions::new();
    let mut app = App::new(
        config,
        target,
        Box::new(keys),
        Box::new(VisibilityRegistry::new()),
        Box::new(pending.clone()),
    );

    // Main event loop
    let mut iterations = 0;
    let result = loop {
        if !app.is_running() || iterations >= MAX_MAIN_ITERATIONS {
            break Ok(());
        }
        if let Err(e) = terminal.draw(|frame| app.render(frame)) {
            break Err(e);
        }
        if let Err(e) = app.update() {
            break Err(e);
        }
        iterations += 1;
    };

    // Restore terminal
    restore_terminal()?;
    result?;

    for request in pending.drain() {
        println!("{}", serde_json::to_string(&request)?);
    }

    Ok(())
}

/// Returns the argument following `flag`.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

/// Returns the first positional argument (skipping flags and their values).
fn positional(args: &[String]) -> Option<String> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if let Some((_, values)) = VALUE_FLAGS.iter().find(|(flag, _)| *flag == arg.as_str()) {
            for _ in 0..*values {
                iter.next();
            }
            continue;
        }
        if !arg.starts_with('-') {
            return Some(arg.clone());
        }
    }
    None
}

/// Applies command-line settings that win over the config file.
fn apply_overrides(config: &mut Config, args: &[String]) {
    if args.iter().any(|a| a == "--icon") {
        config.enable_connect_button = false;
    }
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(line: &str) -> Vec<String> {
        std::iter::once("hubterm")
            .chain(line.split_whitespace())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_target_after_config_path() {
        let args = args("--config /tmp/rc a582b47a");
        assert_eq!(flag_value(&args, "--config"), Some("/tmp/rc"));
        assert_eq!(positional(&args), Some("a582b47a".to_string()));
    }

    #[test]
    fn test_target_before_flags() {
        let args = args("a582b47a --icon");
        assert_eq!(positional(&args), Some("a582b47a".to_string()));
        assert_eq!(flag_value(&args, "--config"), None);
    }

    #[test]
    fn test_add_key_values_are_not_targets() {
        let args = args("--add-key work /home/me/.ssh/id_ed25519");
        assert_eq!(flag_value(&args, "--add-key"), Some("work"));
        assert_eq!(positional(&args), None);
    }

    #[test]
    fn test_no_target() {
        assert_eq!(positional(&args("--icon")), None);
        assert_eq!(positional(&args("--config")), None);
    }

    #[test]
    fn test_icon_overrides_connect_button() {
        let mut config = Config::default();
        apply_overrides(&mut config, &args("a582b47a"));
        assert!(config.enable_connect_button);

        apply_overrides(&mut config, &args("--icon a582b47a"));
        assert!(!config.enable_connect_button);
    }
}
