//! numbox - headless numeric input fields
//!
//! A [`NumberBox`] turns raw editing events (typed characters, deletions,
//! pastes, arrow keys, focus changes) into validated numeric values, for any
//! of the representations in [`NumberKind`]. A [`TimeBox`] composes three of
//! them into a time-of-day editor. The host renders whatever the
//! notification outbox tells it to.

mod config;
mod display_format;
mod event;
mod notification;
mod number_box;
mod text_edit;
mod time_box;

pub use config::{
    CheckBoxBehavior, ConfigError, LogLevel, LostFocusBehavior, NullValuePolicy, NumberBoxConfig,
    SelectionPolicy, TimeBoxConfig, TimeFormat, UpDownBehavior, CONFIG_VERSION,
};
pub use event::Key;
pub use notification::{Notification, UpdateSource, Verdict};
pub use number_box::NumberBox;
pub use text_edit::Selection;
pub use time_box::{TimeBox, TimeField, TimeNotification};

// Re-export the value layer so hosts need a single dependency
pub use numbox_core::{
    BigInt, Culture, Decimal, Declared, LookupError, Number, NumberKind, NumberStrategy,
    RawNumber,
};
