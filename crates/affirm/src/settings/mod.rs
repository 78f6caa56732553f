//! Process-wide settings, read once from the environment.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `AFFIRM_DIFF_CONTEXT` | unchanged lines kept around each diff change |
//! | `AFFIRM_COLOR` | `auto`, `always` or `never` |
//! | `NO_COLOR` | when set (and `AFFIRM_COLOR` is not), disables color |
//! | `AFFIRM_EVENT_TIMEOUT_MS` | default wait for `to emit` checks |

use std::sync::OnceLock;
use std::time::Duration;

use affirm_diagnostic::{ColorMode, DiffOptions};
use tracing::warn;

const DEFAULT_DIFF_CONTEXT: usize = 3;
const DEFAULT_EVENT_TIMEOUT: Duration = Duration::from_millis(2000);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub diff_context: usize,
    pub color: ColorMode,
    /// How long event checks wait when the call gives no `within`.
    pub event_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            diff_context: DEFAULT_DIFF_CONTEXT,
            color: ColorMode::Never,
            event_timeout: DEFAULT_EVENT_TIMEOUT,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source. Invalid values
    /// are reported and replaced by defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Settings::default();

        if let Some(raw) = lookup("AFFIRM_DIFF_CONTEXT") {
            match raw.trim().parse::<usize>() {
                Ok(context) => settings.diff_context = context,
                Err(_) => warn!(value = %raw, "ignoring invalid AFFIRM_DIFF_CONTEXT"),
            }
        }

        match lookup("AFFIRM_COLOR") {
            Some(raw) => match parse_color(&raw) {
                Some(color) => settings.color = color,
                None => warn!(value = %raw, "ignoring invalid AFFIRM_COLOR"),
            },
            None => {
                if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
                    settings.color = ColorMode::Never;
                }
            }
        }

        if let Some(raw) = lookup("AFFIRM_EVENT_TIMEOUT_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => settings.event_timeout = Duration::from_millis(ms),
                Err(_) => warn!(value = %raw, "ignoring invalid AFFIRM_EVENT_TIMEOUT_MS"),
            }
        }

        settings
    }

    /// Diff options for rendering failures.
    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions::default()
            .with_context(self.diff_context)
            .with_color(self.color)
    }
}

fn parse_color(raw: &str) -> Option<ColorMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "auto" => Some(ColorMode::Auto),
        "always" => Some(ColorMode::Always),
        "never" => Some(ColorMode::Never),
        _ => None,
    }
}

/// The process-wide settings, loaded on first use.
pub fn settings() -> &'static Settings {
    static SETTINGS: OnceLock<Settings> = OnceLock::new();
    SETTINGS.get_or_init(Settings::from_env)
}
