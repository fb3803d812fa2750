//! A time-of-day editor composed of number boxes.
//!
//! Hours, minutes and seconds are separate [`NumberBox`]es. The time box
//! routes keys to the focused field, moves focus between fields as the caret
//! runs off either end, wraps stepping around each field's range and turns
//! field edits into a single [`Duration`].

use std::time::Duration;

use numbox_core::{Declared, NumberKind, RawNumber};

use crate::config::{LostFocusBehavior, NullValuePolicy, NumberBoxConfig, TimeBoxConfig, TimeFormat};
use crate::event::Key;
use crate::notification::{Notification, Verdict};
use crate::number_box::NumberBox;
use crate::text_edit::char_len;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;
const HOURS_PER_DAY: u64 = 24;

/// Digits typed into a field before focus moves on.
const FIELD_WIDTH: usize = 2;

/// One of the three sub-fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeField {
    Hours,
    Minutes,
    Seconds,
}

impl TimeField {
    fn index(self) -> usize {
        match self {
            TimeField::Hours => 0,
            TimeField::Minutes => 1,
            TimeField::Seconds => 2,
        }
    }

    /// Largest value of the field.
    pub fn maximum(self) -> u8 {
        match self {
            TimeField::Hours => 23,
            TimeField::Minutes | TimeField::Seconds => 59,
        }
    }

    fn previous(self) -> Option<TimeField> {
        match self {
            TimeField::Hours => None,
            TimeField::Minutes => Some(TimeField::Hours),
            TimeField::Seconds => Some(TimeField::Minutes),
        }
    }

    fn next(self, format: TimeFormat) -> Option<TimeField> {
        match (self, format) {
            (TimeField::Hours, _) => Some(TimeField::Minutes),
            (TimeField::Minutes, TimeFormat::Long) => Some(TimeField::Seconds),
            (TimeField::Minutes, TimeFormat::Short) | (TimeField::Seconds, _) => None,
        }
    }
}

/// Outbound events of a [`TimeBox`].
#[derive(Debug, Clone, PartialEq)]
pub enum TimeNotification {
    /// Forwarded from one of the fields
    Field {
        field: TimeField,
        notification: Notification,
    },
    /// Keyboard focus moved to another field
    FocusMoved(TimeField),
    /// The user changed the time
    TimeChanged { old: Duration, new: Duration },
}

/// Time editor built from hour, minute and second fields.
#[derive(Debug, Clone)]
pub struct TimeBox {
    format: TimeFormat,
    fields: [NumberBox; 3],
    focused: Option<TimeField>,
    time: Duration,
    outbox: Vec<TimeNotification>,
}

impl Default for TimeBox {
    fn default() -> Self {
        Self::new(TimeBoxConfig::default())
    }
}

impl TimeBox {
    pub fn new(config: TimeBoxConfig) -> Self {
        let field = |field: TimeField| {
            NumberBox::new(NumberBoxConfig {
                kind: NumberKind::Byte,
                declared: Declared {
                    minimum: Some(RawNumber::from(0u8)),
                    maximum: Some(RawNumber::from(field.maximum())),
                    default: Some(RawNumber::from(0u8)),
                    ..Declared::default()
                },
                lost_focus: LostFocusBehavior {
                    null_value: NullValuePolicy::Default,
                    ..LostFocusBehavior::default()
                },
                selection: config.selection,
                read_only: config.read_only,
                ..NumberBoxConfig::default()
            })
        };

        let mut time_box = Self {
            format: config.format,
            fields: [
                field(TimeField::Hours),
                field(TimeField::Minutes),
                field(TimeField::Seconds),
            ],
            focused: None,
            time: Duration::ZERO,
            outbox: Vec::new(),
        };
        time_box.set_time(config.time.unwrap_or(Duration::ZERO));
        time_box.outbox.clear();
        time_box
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn time(&self) -> Duration {
        self.time
    }

    pub fn format(&self) -> TimeFormat {
        self.format
    }

    pub fn field(&self, field: TimeField) -> &NumberBox {
        &self.fields[field.index()]
    }

    pub fn focused(&self) -> Option<TimeField> {
        self.focused
    }

    /// Take every notification raised since the last call.
    pub fn drain_notifications(&mut self) -> Vec<TimeNotification> {
        std::mem::take(&mut self.outbox)
    }

    // =========================================================================
    // Host Input
    // =========================================================================

    /// Show `time` in the fields. Days are dropped; a short format ignores
    /// the seconds. Does not raise `TimeChanged`.
    pub fn set_time(&mut self, time: Duration) {
        let total = time.as_secs();
        let parts = [
            total / SECONDS_PER_HOUR % HOURS_PER_DAY,
            total / SECONDS_PER_MINUTE % 60,
            total % 60,
        ];
        for (field, part) in [TimeField::Hours, TimeField::Minutes, TimeField::Seconds]
            .into_iter()
            .zip(parts)
        {
            let value = u8::try_from(part).unwrap_or(0);
            self.field_mut(field).set_value(Some(RawNumber::from(value)));
        }
        self.forward_field_notifications();
        self.time = self.compose();
        log::debug!("Time set to {:?}", self.time);
    }

    // =========================================================================
    // User Input
    // =========================================================================

    /// Give keyboard focus to `field`.
    pub fn focus(&mut self, field: TimeField) -> Verdict {
        if field == TimeField::Seconds && self.format == TimeFormat::Short {
            return Verdict::Rejected;
        }
        self.move_focus(field, None);
        self.sync();
        Verdict::Accepted
    }

    /// Keyboard focus left the time box.
    pub fn blur(&mut self) -> Verdict {
        if let Some(field) = self.focused.take() {
            self.field_mut(field).focus_lost();
        }
        self.sync();
        Verdict::Accepted
    }

    /// Route a key press to the focused field.
    pub fn handle_key(&mut self, key: Key) -> Verdict {
        let Some(field) = self.focused else {
            return Verdict::Rejected;
        };

        let verdict = match key {
            Key::Up => return self.step_up(),
            Key::Down => return self.step_down(),
            Key::Left if self.caret_at_start(field) => match field.previous() {
                Some(previous) => {
                    let end = char_len(self.field(previous).text());
                    self.move_focus(previous, Some(end));
                    Verdict::Accepted
                }
                None => self.field_mut(field).handle_key(key),
            },
            Key::Right if self.caret_at_end(field) => match field.next(self.format) {
                Some(next) => {
                    self.move_focus(next, Some(0));
                    Verdict::Accepted
                }
                None => self.field_mut(field).handle_key(key),
            },
            Key::Char(_) => {
                let verdict = self.field_mut(field).handle_key(key);
                let typed_full_field = verdict.is_accepted()
                    && self.field(field).selection().start == FIELD_WIDTH
                    && self.caret_at_end(field);
                if typed_full_field {
                    if let Some(next) = field.next(self.format) {
                        self.move_focus(next, Some(0));
                    }
                }
                verdict
            }
            _ => self.field_mut(field).handle_key(key),
        };

        self.sync();
        verdict
    }

    /// Paste into the focused field.
    pub fn paste(&mut self, clipboard: &str) -> Verdict {
        let Some(field) = self.focused else {
            return Verdict::Rejected;
        };
        let verdict = self.field_mut(field).paste(clipboard);
        self.sync();
        verdict
    }

    /// Increase the focused field, wrapping from its maximum to zero.
    pub fn step_up(&mut self) -> Verdict {
        self.change_focused(|value, maximum| if value >= maximum { 0 } else { value + 1 })
    }

    /// Decrease the focused field, wrapping from zero to its maximum.
    pub fn step_down(&mut self) -> Verdict {
        self.change_focused(|value, maximum| if value == 0 { maximum } else { value - 1 })
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn field_mut(&mut self, field: TimeField) -> &mut NumberBox {
        &mut self.fields[field.index()]
    }

    /// Value of a field, an empty field counting as zero.
    fn field_value(&self, field: TimeField) -> u64 {
        self.field(field)
            .value()
            .and_then(|number| number.to_i64())
            .and_then(|value| u64::try_from(value).ok())
            .unwrap_or(0)
    }

    fn compose(&self) -> Duration {
        let seconds = match self.format {
            TimeFormat::Long => self.field_value(TimeField::Seconds),
            TimeFormat::Short => 0,
        };
        Duration::from_secs(
            self.field_value(TimeField::Hours) * SECONDS_PER_HOUR
                + self.field_value(TimeField::Minutes) * SECONDS_PER_MINUTE
                + seconds,
        )
    }

    fn caret_at_start(&self, field: TimeField) -> bool {
        let selection = self.field(field).selection();
        selection.is_empty() && selection.start == 0
    }

    fn caret_at_end(&self, field: TimeField) -> bool {
        let number_box = self.field(field);
        let selection = number_box.selection();
        selection.is_empty() && selection.start == char_len(number_box.text())
    }

    /// Focus `field`, optionally placing its caret before focus arrives.
    fn move_focus(&mut self, field: TimeField, caret: Option<usize>) {
        if self.focused == Some(field) {
            return;
        }
        if let Some(previous) = self.focused.replace(field) {
            self.field_mut(previous).focus_lost();
        }
        if let Some(caret) = caret {
            self.field_mut(field).set_selection(caret, 0);
        }
        self.field_mut(field).focus_gained();
        self.outbox.push(TimeNotification::FocusMoved(field));
    }

    fn change_focused(&mut self, change: impl Fn(u8, u8) -> u8) -> Verdict {
        let Some(field) = self.focused else {
            return Verdict::Rejected;
        };
        if !self.field(field).is_editable() {
            return Verdict::Rejected;
        }
        let current = u8::try_from(self.field_value(field)).unwrap_or(0);
        let value = change(current, field.maximum());
        let verdict = self.field_mut(field).set_value(Some(RawNumber::from(value)));
        self.sync();
        verdict
    }

    fn forward_field_notifications(&mut self) {
        for field in [TimeField::Hours, TimeField::Minutes, TimeField::Seconds] {
            let notifications = self.field_mut(field).drain_notifications();
            self.outbox.extend(
                notifications
                    .into_iter()
                    .map(|notification| TimeNotification::Field { field, notification }),
            );
        }
    }

    /// Forward field events and report a changed time.
    fn sync(&mut self) {
        self.forward_field_notifications();
        let time = self.compose();
        if time != self.time {
            let old = std::mem::replace(&mut self.time, time);
            log::debug!("Time changed from {:?} to {:?}", old, time);
            self.outbox.push(TimeNotification::TimeChanged { old, new: time });
        }
    }
}
