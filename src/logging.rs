//! File logging for hubterm.
//!
//! The TUI owns stdout and stderr, so every event goes to a session file
//! `hubterm_<timestamp>.log` under ~/.hubterm/logs/. Session files past the
//! retention age are pruned when logging starts.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Default log retention in hours.
pub const DEFAULT_LOG_RETENTION_HOURS: u32 = 24;

/// Prefix of session log file names.
const FILE_PREFIX: &str = "hubterm_";

/// Verbosity of the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// Parses a level name. Unknown names fall back to `Info`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "trace" => Self::Trace,
            "debug" => Self::Debug,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            "off" | "none" | "disabled" => Self::Off,
            _ => Self::Info,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Off => LevelFilter::OFF,
        }
    }
}

/// Logging settings read from .hubtermrc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub enabled: bool,
    pub level: LogLevel,
    /// Age in hours after which session files are pruned.
    pub retention_hours: u32,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::default(),
            retention_hours: DEFAULT_LOG_RETENTION_HOURS,
        }
    }
}

impl LogConfig {
    /// Returns true if a subscriber should be installed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled && self.level != LogLevel::Off
    }

    /// Returns the retention age.
    #[must_use]
    pub fn retention(&self) -> Duration {
        Duration::from_secs(u64::from(self.retention_hours) * 3600)
    }
}

/// Directory holding the session log files.
#[derive(Debug, Clone)]
pub struct LogDir {
    path: PathBuf,
}

impl Default for LogDir {
    fn default() -> Self {
        let path = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".hubterm")
            .join("logs");
        Self { path }
    }
}

impl LogDir {
    /// Uses `path` as the log directory.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the session file name for a start time.
    #[must_use]
    pub fn file_name(started: DateTime<Local>) -> String {
        format!("{}{}.log", FILE_PREFIX, started.format("%Y-%m-%d_%H-%M-%S"))
    }

    /// Creates the directory and a fresh session file.
    pub fn create_session_file(&self, started: DateTime<Local>) -> io::Result<(PathBuf, File)> {
        fs::create_dir_all(&self.path)?;
        let path = self.path.join(Self::file_name(started));
        let file = File::create(&path)?;
        Ok((path, file))
    }

    /// Removes session files last modified more than `max_age` before `now`.
    ///
    /// Other files in the directory are left alone. Returns the removed paths.
    pub fn prune(&self, max_age: Duration, now: SystemTime) -> io::Result<Vec<PathBuf>> {
        if !self.path.is_dir() {
            return Ok(Vec::new());
        }

        let mut removed = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            let path = entry?.path();
            if !is_session_file(&path) {
                continue;
            }

            let expired = fs::metadata(&path)
                .and_then(|m| m.modified())
                .ok()
                .and_then(|modified| now.duration_since(modified).ok())
                .is_some_and(|age| age > max_age);

            if expired && fs::remove_file(&path).is_ok() {
                removed.push(path);
            }
        }

        Ok(removed)
    }
}

fn is_session_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.starts_with(FILE_PREFIX) && name.ends_with(".log")
}

/// Installs the global subscriber writing to a new session file.
///
/// `RUST_LOG` directives take precedence over the configured level.
/// Returns the session file path, or `None` when logging is disabled.
pub fn init(config: &LogConfig) -> io::Result<Option<PathBuf>> {
    if !config.is_active() {
        return Ok(None);
    }

    let dir = LogDir::default();
    let pruned = dir.prune(config.retention(), SystemTime::now())?;
    let (path, file) = dir.create_session_file(Local::now())?;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(config.level).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(file).with_ansi(false))
        .init();

    tracing::info!(file = %path.display(), level = ?config.level, "hubterm logging started");
    if !pruned.is_empty() {
        tracing::debug!("Pruned {} expired log file(s)", pruned.len());
    }

    Ok(Some(path))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_level_names() {
        assert_eq!(LogLevel::parse("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::parse("warning"), LogLevel::Warn);
        assert_eq!(LogLevel::parse("none"), LogLevel::Off);
        assert_eq!(LogLevel::parse("verbose"), LogLevel::Info);
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::ERROR);
    }

    #[test]
    fn test_disabled_config_installs_nothing() {
        let off = LogConfig {
            level: LogLevel::Off,
            ..LogConfig::default()
        };
        assert!(!off.is_active());
        assert_eq!(init(&off).unwrap(), None);

        let disabled = LogConfig {
            enabled: false,
            ..LogConfig::default()
        };
        assert_eq!(init(&disabled).unwrap(), None);
    }

    #[test]
    fn test_session_file_name() {
        let started = Local.with_ymd_and_hms(2026, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(LogDir::file_name(started), "hubterm_2026-03-07_09-05-01.log");
    }

    #[test]
    fn test_prune_removes_only_expired_session_files() {
        let temp = tempfile::tempdir().unwrap();
        let dir = LogDir::with_path(temp.path().join("logs"));
        let (session, _) = dir.create_session_file(Local::now()).unwrap();
        let notes = dir.path().join("notes.log");
        fs::write(&notes, "keep").unwrap();

        let now = SystemTime::now();
        assert!(dir.prune(Duration::from_secs(3600), now).unwrap().is_empty());

        let later = now + Duration::from_secs(2 * 3600);
        let removed = dir.prune(Duration::from_secs(3600), later).unwrap();
        assert_eq!(removed, vec![session.clone()]);
        assert!(!session.exists());
        assert!(notes.exists());
    }

    #[test]
    fn test_prune_missing_dir() {
        let temp = tempfile::tempdir().unwrap();
        let dir = LogDir::with_path(temp.path().join("missing"));
        assert!(dir.prune(Duration::ZERO, SystemTime::now()).unwrap().is_empty());
    }
}
