//! Configuration for number and time boxes.
//!
//! Every field has a default, so a configuration file only needs the settings
//! it changes. Declared numbers may be written as JSON numbers or as text in
//! the declared culture (`"1,5"` with `"declared_culture": "de-DE"`).

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use numbox_core::{Declared, LookupError, NumberKind};
use serde::{Deserialize, Serialize};

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

// =============================================================================
// Behaviour Settings
// =============================================================================

/// What to place in an empty field when it loses focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullValuePolicy {
    /// Leave the field empty
    #[default]
    None,
    /// Restore the default value
    Default,
    Minimum,
    Maximum,
}

/// Normalisation applied when the field loses focus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LostFocusBehavior {
    /// Policy for an empty field
    pub null_value: NullValuePolicy,

    /// Re-render the value so typed leading zeros disappear
    pub trim_leading_zero: bool,

    /// Display template such as `"{0:F2} kg"`, applied last
    pub format_text: Option<String>,
}

/// When the whole text gets selected automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    #[default]
    None,
    OnFocus,
    OnStep,
    OnFocusAndStep,
}

impl SelectionPolicy {
    pub fn on_focus(self) -> bool {
        matches!(self, SelectionPolicy::OnFocus | SelectionPolicy::OnFocusAndStep)
    }

    pub fn on_step(self) -> bool {
        matches!(self, SelectionPolicy::OnStep | SelectionPolicy::OnFocusAndStep)
    }
}

/// Which controls step the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpDownBehavior {
    #[default]
    None,
    /// Up and Down arrow keys
    Arrows,
    /// Spinner buttons drawn by the host
    Buttons,
    ArrowsAndButtons,
}

impl UpDownBehavior {
    pub fn arrows(self) -> bool {
        matches!(self, UpDownBehavior::Arrows | UpDownBehavior::ArrowsAndButtons)
    }

    pub fn buttons(self) -> bool {
        matches!(self, UpDownBehavior::Buttons | UpDownBehavior::ArrowsAndButtons)
    }
}

/// How an attached check box enables the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckBoxBehavior {
    /// No check box
    #[default]
    None,
    DisableIfChecked,
    EnableIfChecked,
}

impl CheckBoxBehavior {
    /// Whether the field accepts input given the check box state.
    pub fn enables(self, checked: bool) -> bool {
        match self {
            CheckBoxBehavior::None => true,
            CheckBoxBehavior::DisableIfChecked => !checked,
            CheckBoxBehavior::EnableIfChecked => checked,
        }
    }
}

/// Log level setting for the demo driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    #[default]
    Warn,
    /// Show errors, warnings, and info messages
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(ConfigError::UnknownLogLevel(other.to_string())),
        }
    }
}

// =============================================================================
// Number Box
// =============================================================================

/// Complete configuration of a [`NumberBox`](crate::NumberBox).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberBoxConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Representation of the value
    pub kind: NumberKind,

    /// Value, bounds, step, default and cultures
    #[serde(flatten)]
    pub declared: Declared,

    pub lost_focus: LostFocusBehavior,

    pub selection: SelectionPolicy,

    pub up_down: UpDownBehavior,

    /// Stepping an empty field jumps to the minimum (up) or maximum (down)
    pub accept_up_down_on_null: bool,

    pub read_only: bool,

    pub check_box: CheckBoxBehavior,

    /// State of the check box, ignored without one
    pub is_checked: bool,
}

impl Default for NumberBoxConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            kind: NumberKind::default(),
            declared: Declared::default(),
            lost_focus: LostFocusBehavior::default(),
            selection: SelectionPolicy::default(),
            up_down: UpDownBehavior::default(),
            accept_up_down_on_null: false,
            read_only: false,
            check_box: CheckBoxBehavior::default(),
            is_checked: false,
        }
    }
}

impl NumberBoxConfig {
    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        check_version(config.version)?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_with(path, Self::from_json)
    }
}

// =============================================================================
// Time Box
// =============================================================================

/// Which parts of a time are edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFormat {
    /// Hours, minutes and seconds
    #[default]
    Long,
    /// Hours and minutes
    Short,
}

/// Configuration of a [`TimeBox`](crate::TimeBox).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeBoxConfig {
    /// Version of the configuration file format
    pub version: u32,

    pub format: TimeFormat,

    /// Initial time of day, written `"h:mm"` or `"h:mm:ss"`
    #[serde(with = "clock")]
    pub time: Option<Duration>,

    /// Selection policy of each field
    pub selection: SelectionPolicy,

    pub read_only: bool,
}

impl Default for TimeBoxConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            format: TimeFormat::default(),
            time: None,
            selection: SelectionPolicy::default(),
            read_only: false,
        }
    }
}

impl TimeBoxConfig {
    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        check_version(config.version)?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_with(path, Self::from_json)
    }
}

/// `Option<Duration>` as a clock string.
mod clock {
    use std::time::Duration;

    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(time) => {
                let total = time.as_secs();
                let text = format!(
                    "{}:{:02}:{:02}",
                    total / 3600,
                    total % 3600 / 60,
                    total % 60
                );
                serializer.serialize_str(&text)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(text) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        parse(&text)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid time '{text}', expected h:mm[:ss]")))
    }

    fn parse(text: &str) -> Option<Duration> {
        let parts = text
            .trim()
            .split(':')
            .map(|part| part.parse::<u64>().ok())
            .collect::<Option<Vec<_>>>()?;
        let (hours, minutes, seconds) = match parts.as_slice() {
            [h, m] => (*h, *m, 0),
            [h, m, s] => (*h, *m, *s),
            _ => return None,
        };
        if minutes >= 60 || seconds >= 60 {
            return None;
        }
        Some(Duration::from_secs(hours * 3600 + minutes * 60 + seconds))
    }
}

// =============================================================================
// Loading
// =============================================================================

fn check_version(version: u32) -> Result<(), ConfigError> {
    if version > CONFIG_VERSION {
        return Err(ConfigError::VersionTooNew {
            file_version: version,
            supported_version: CONFIG_VERSION,
        });
    }
    Ok(())
}

fn load_with<T>(path: &Path, parse: fn(&str) -> Result<T, ConfigError>) -> Result<T, ConfigError> {
    let json = std::fs::read_to_string(path).inspect_err(|e| {
        log::warn!("Failed to read config file {:?}: {}", path, e);
    })?;
    match parse(&json) {
        Ok(config) => {
            log::info!("Loaded configuration from {:?}", path);
            Ok(config)
        }
        Err(e) => {
            log::warn!("Failed to parse config file {:?}: {}", path, e);
            Err(e)
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unknown culture or number kind
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Unknown log level: '{0}'")]
    UnknownLogLevel(String),
}
