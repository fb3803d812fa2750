//! The numeric input controller.
//!
//! A [`NumberBox`] owns one [`NumberStrategy`] and a text surface (text plus
//! selection). The host forwards editing events; each one is vetted against
//! the strategy before the surface changes, so the text always holds either
//! a parsable number, nothing, or a lone minus sign on its way to one.
//!
//! Results are reported back through a notification outbox the host drains
//! with [`NumberBox::drain_notifications`].

use numbox_core::{Culture, Number, NumberKind, NumberStrategy, RawNumber};

use crate::config::{
    LostFocusBehavior, NullValuePolicy, NumberBoxConfig, SelectionPolicy, UpDownBehavior,
};
use crate::display_format;
use crate::event::Key;
use crate::notification::{Notification, UpdateSource, Verdict};
use crate::text_edit::{self, char_len, Edit, Selection};

/// Text of a field where only the sign has been typed so far.
const LONE_MINUS: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// Numeric input controller: validates edits, steps, normalises on focus loss.
#[derive(Debug, Clone)]
pub struct NumberBox {
    config: NumberBoxConfig,
    strategy: NumberStrategy,
    text: String,
    selection: Selection,
    focused: bool,
    /// Last value reported through `ValueChanged`
    committed: Option<Number>,
    can_step_up: bool,
    can_step_down: bool,
    /// Clipboard text accepted by the last `validate_paste`
    pending_paste: Option<String>,
    outbox: Vec<Notification>,
}

impl Default for NumberBox {
    fn default() -> Self {
        Self::new(NumberBoxConfig::default())
    }
}

impl NumberBox {
    /// Create a box and seed its strategy from the declared values.
    pub fn new(config: NumberBoxConfig) -> Self {
        let strategy = NumberStrategy::with_declared(config.kind, &config.declared);
        let text = strategy.format();
        let mut number_box = Self {
            selection: Selection::caret(char_len(&text)),
            committed: strategy.current(),
            config,
            strategy,
            text,
            focused: false,
            can_step_up: false,
            can_step_down: false,
            pending_paste: None,
            outbox: Vec::new(),
        };
        (number_box.can_step_up, number_box.can_step_down) = number_box.step_flags();
        log::debug!(
            "Created {} number box with text '{}'",
            number_box.kind(),
            number_box.text
        );
        number_box
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn config(&self) -> &NumberBoxConfig {
        &self.config
    }

    pub fn kind(&self) -> NumberKind {
        self.strategy.kind()
    }

    pub fn strategy(&self) -> &NumberStrategy {
        &self.strategy
    }

    /// The current value, `None` when the field is empty.
    pub fn value(&self) -> Option<Number> {
        self.committed.clone()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn can_step_up(&self) -> bool {
        self.can_step_up
    }

    pub fn can_step_down(&self) -> bool {
        self.can_step_down
    }

    /// Whether the attached check box (if any) enables the field.
    pub fn is_enabled(&self) -> bool {
        self.config.check_box.enables(self.config.is_checked)
    }

    /// Whether user edits and steps are allowed.
    pub fn is_editable(&self) -> bool {
        self.is_enabled() && !self.config.read_only
    }

    /// Take every notification raised since the last call.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Insert a typed character in place of the selection.
    pub fn preview_text_input(&mut self, c: char) -> Verdict {
        if !self.is_editable() {
            log::trace!("Rejected '{}': field is not editable", c);
            return Verdict::Rejected;
        }
        if c.is_whitespace() {
            return Verdict::Rejected;
        }
        let mut buffer = [0u8; 4];
        let edit = text_edit::replace_selection(&self.text, self.selection, c.encode_utf8(&mut buffer));
        self.apply_edit(edit)
    }

    /// Delete key: remove the selection or the character after the caret.
    pub fn delete_forward(&mut self) -> Verdict {
        if !self.is_editable() {
            return Verdict::Rejected;
        }
        match text_edit::delete_forward(&self.text, self.selection) {
            Some(edit) => self.apply_edit(edit),
            None => Verdict::Accepted,
        }
    }

    /// Backspace: remove the selection or the character before the caret.
    pub fn delete_backward(&mut self) -> Verdict {
        if !self.is_editable() {
            return Verdict::Rejected;
        }
        match text_edit::delete_backward(&self.text, self.selection) {
            Some(edit) => self.apply_edit(edit),
            None => Verdict::Accepted,
        }
    }

    /// Check whether pasting `clipboard` over the selection yields a valid
    /// value, without changing anything. A positive answer arms
    /// [`Self::commit_paste`].
    ///
    /// Surrounding whitespace of the clipboard text is dropped.
    pub fn validate_paste(&mut self, clipboard: &str) -> bool {
        self.pending_paste = None;
        if !self.is_editable() {
            return false;
        }
        let clipboard = clipboard.trim();
        let edit = text_edit::replace_selection(&self.text, self.selection, clipboard);
        let valid = self.accepts(&edit.text);
        if valid {
            self.pending_paste = Some(clipboard.to_string());
        } else {
            log::trace!("Vetoed paste of '{}'", clipboard);
        }
        valid
    }

    /// Apply the paste approved by the last [`Self::validate_paste`].
    pub fn commit_paste(&mut self) -> Verdict {
        let Some(clipboard) = self.pending_paste.take() else {
            return Verdict::Rejected;
        };
        // Re-derived from the current surface; the edit is vetted again
        let edit = text_edit::replace_selection(&self.text, self.selection, &clipboard);
        self.apply_edit(edit)
    }

    /// Validate and commit a paste in one go.
    pub fn paste(&mut self, clipboard: &str) -> Verdict {
        if self.validate_paste(clipboard) {
            self.commit_paste()
        } else {
            Verdict::Rejected
        }
    }

    /// Route a key press.
    ///
    /// Space is always swallowed. Arrow keys step only when the up/down
    /// behaviour includes arrows.
    pub fn handle_key(&mut self, key: Key) -> Verdict {
        match key {
            Key::Space => Verdict::Rejected,
            Key::Char(c) => self.preview_text_input(c),
            Key::Backspace => self.delete_backward(),
            Key::Delete => self.delete_forward(),
            Key::Up if self.config.up_down.arrows() => self.step_up(),
            Key::Down if self.config.up_down.arrows() => self.step_down(),
            Key::Up | Key::Down => Verdict::Rejected,
            Key::Left => {
                self.selection = text_edit::move_left(self.selection);
                Verdict::Accepted
            }
            Key::Right => {
                self.selection = text_edit::move_right(self.selection, char_len(&self.text));
                Verdict::Accepted
            }
            Key::Home => {
                self.selection = Selection::caret(0);
                Verdict::Accepted
            }
            Key::End => {
                self.selection = Selection::caret(char_len(&self.text));
                Verdict::Accepted
            }
        }
    }

    /// Move the caret or selection, clamped to the text.
    pub fn set_selection(&mut self, start: usize, length: usize) -> Verdict {
        self.selection = Selection::new(start, length).clamp(char_len(&self.text));
        Verdict::Accepted
    }

    // =========================================================================
    // Stepping
    // =========================================================================

    /// Increase by one step; an empty field may jump to the minimum.
    pub fn step_up(&mut self) -> Verdict {
        self.step(Direction::Up)
    }

    /// Decrease by one step; an empty field may jump to the maximum.
    pub fn step_down(&mut self) -> Verdict {
        self.step(Direction::Down)
    }

    /// Restore the default value.
    pub fn reset(&mut self) -> Verdict {
        if !self.is_editable() {
            return Verdict::Rejected;
        }
        self.strategy.reset();
        self.render();
        self.commit(UpdateSource::User);
        log::debug!("Reset to '{}'", self.text);
        Verdict::Accepted
    }

    fn step(&mut self, direction: Direction) -> Verdict {
        if !self.is_editable() {
            log::trace!("Rejected step {:?}: field is not editable", direction);
            return Verdict::Rejected;
        }

        let empty = self.strategy.current().is_none();
        if empty && self.config.accept_up_down_on_null {
            match direction {
                Direction::Up => self.strategy.to_minimum(),
                Direction::Down => self.strategy.to_maximum(),
            }
        } else {
            let possible = !empty
                && match direction {
                    Direction::Up => self.strategy.can_increase(),
                    Direction::Down => self.strategy.can_decrease(),
                };
            if !possible {
                log::trace!("Rejected step {:?}: bound reached", direction);
                return Verdict::Rejected;
            }
            match direction {
                Direction::Up => self.strategy.increase(),
                Direction::Down => self.strategy.decrease(),
            }
        }

        self.render();
        self.commit(UpdateSource::User);
        if self.config.selection.on_step() {
            self.select_all();
        }
        log::debug!("Stepped {:?} to '{}'", direction, self.text);
        Verdict::Accepted
    }

    // =========================================================================
    // Focus
    // =========================================================================

    pub fn focus_gained(&mut self) -> Verdict {
        self.focused = true;
        // A display template is for reading; editing starts from the plain value
        if self.has_display_format() && self.strategy.current().is_some() {
            self.render();
        }
        if self.config.selection.on_focus() {
            self.select_all();
        }
        Verdict::Accepted
    }

    /// Normalise the field: raise to the minimum, fill an empty field per
    /// policy, trim leading zeros, apply the display template. In that order.
    pub fn focus_lost(&mut self) -> Verdict {
        self.focused = false;
        self.pending_paste = None;

        if self.strategy.is_below_minimum() {
            self.strategy.to_minimum();
            self.render();
            self.commit(UpdateSource::User);
            log::debug!("Raised value to the minimum '{}'", self.text);
        }

        if self.strategy.current().is_none() {
            match self.config.lost_focus.null_value {
                NullValuePolicy::None => {}
                NullValuePolicy::Default => self.strategy.reset(),
                NullValuePolicy::Minimum => self.strategy.to_minimum(),
                NullValuePolicy::Maximum => self.strategy.to_maximum(),
            }
            self.render();
            self.commit(UpdateSource::User);
        }

        if self.config.lost_focus.trim_leading_zero {
            self.render();
        }

        if let Some(template) = self.display_format() {
            let value = self.strategy.current();
            match display_format::apply(&template, value.as_ref(), self.strategy.culture()) {
                Some(text) => self.set_surface(text, None),
                None => log::warn!("Ignoring invalid display format '{}'", template),
            }
        }

        Verdict::Accepted
    }

    fn display_format(&self) -> Option<String> {
        self.config
            .lost_focus
            .format_text
            .clone()
            .filter(|template| !template.trim().is_empty())
    }

    fn has_display_format(&self) -> bool {
        self.display_format().is_some()
    }

    // =========================================================================
    // Declared Configuration
    // =========================================================================

    /// Switch representation, re-seeding from the declared values.
    ///
    /// Declared values the new representation cannot hold are dropped.
    pub fn set_kind(&mut self, kind: NumberKind) -> Verdict {
        self.config.kind = kind;
        self.strategy = NumberStrategy::with_declared(kind, &self.config.declared);
        self.pending_paste = None;
        self.render();
        self.commit(UpdateSource::Host);
        log::debug!("Representation changed to {}", kind);
        Verdict::Accepted
    }

    /// Push a value from the host. Text is read under the declared culture.
    ///
    /// Rejected values leave the field unchanged but stay declared for a
    /// later representation change.
    pub fn set_value(&mut self, value: Option<RawNumber>) -> Verdict {
        let accepted = self.declare(|strategy| strategy.set_current(value.as_ref()));
        self.config.declared.value = value;
        if accepted {
            self.render();
            self.commit(UpdateSource::Host);
        } else {
            log::debug!("Declared value {:?} rejected", self.config.declared.value);
        }
        accepted.into()
    }

    pub fn set_minimum(&mut self, minimum: Option<RawNumber>) -> Verdict {
        let accepted = self.declare(|strategy| strategy.set_minimum(minimum.as_ref()));
        self.config.declared.minimum = minimum;
        self.refresh_step_flags();
        accepted.into()
    }

    pub fn set_maximum(&mut self, maximum: Option<RawNumber>) -> Verdict {
        let accepted = self.declare(|strategy| strategy.set_maximum(maximum.as_ref()));
        self.config.declared.maximum = maximum;
        self.refresh_step_flags();
        accepted.into()
    }

    pub fn set_step(&mut self, step: Option<RawNumber>) -> Verdict {
        let accepted = self.declare(|strategy| strategy.set_step(step.as_ref()));
        self.config.declared.step = step;
        self.refresh_step_flags();
        accepted.into()
    }

    pub fn set_default(&mut self, default: Option<RawNumber>) -> Verdict {
        let accepted = self.declare(|strategy| strategy.set_default(default.as_ref()));
        self.config.declared.default = default;
        accepted.into()
    }

    /// Run a declared setter with the declared culture active, so the stored
    /// text means the same when a representation change re-reads it.
    fn declare(&mut self, apply: impl FnOnce(&mut NumberStrategy) -> bool) -> bool {
        let live = self.strategy.culture().clone();
        self.strategy.set_culture(self.config.declared.declared_culture.clone());
        let accepted = apply(&mut self.strategy);
        self.strategy.set_culture(Some(live));
        accepted
    }

    /// Culture of the live value; the text is re-rendered in it.
    pub fn set_parsing_culture(&mut self, culture: Option<Culture>) -> Verdict {
        self.config.declared.parsing_culture = culture.clone();
        self.strategy.set_culture(culture);
        if self.strategy.current().is_some() {
            self.render();
        }
        Verdict::Accepted
    }

    /// Culture of the declared values, used on the next representation change.
    pub fn set_declared_culture(&mut self, culture: Option<Culture>) -> Verdict {
        self.config.declared.declared_culture = culture;
        Verdict::Accepted
    }

    pub fn set_checked(&mut self, checked: bool) -> Verdict {
        self.config.is_checked = checked;
        Verdict::Accepted
    }

    pub fn set_read_only(&mut self, read_only: bool) -> Verdict {
        self.config.read_only = read_only;
        Verdict::Accepted
    }

    pub fn set_accept_up_down_on_null(&mut self, accept: bool) -> Verdict {
        self.config.accept_up_down_on_null = accept;
        self.refresh_step_flags();
        Verdict::Accepted
    }

    pub fn set_selection_policy(&mut self, policy: SelectionPolicy) -> Verdict {
        self.config.selection = policy;
        Verdict::Accepted
    }

    pub fn set_up_down_behavior(&mut self, behavior: UpDownBehavior) -> Verdict {
        self.config.up_down = behavior;
        Verdict::Accepted
    }

    pub fn set_lost_focus_behavior(&mut self, behavior: LostFocusBehavior) -> Verdict {
        self.config.lost_focus = behavior;
        Verdict::Accepted
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Whether `text` may become the surface.
    fn accepts(&self, text: &str) -> bool {
        if text == LONE_MINUS {
            self.strategy.accepts_negative_sign()
        } else {
            self.strategy.accepts_edit(text)
        }
    }

    /// Vet a candidate surface and commit it.
    fn apply_edit(&mut self, edit: Edit) -> Verdict {
        let accepted = if edit.text == LONE_MINUS {
            // The sign alone carries no value yet
            self.strategy.accepts_negative_sign() && self.strategy.set_current_from_edit("")
        } else {
            self.strategy.set_current_from_edit(&edit.text)
        };
        if !accepted {
            log::trace!("Rejected edit '{}'", edit.text);
            return Verdict::Rejected;
        }

        self.set_surface(edit.text, Some(Selection::caret(edit.caret)));
        self.commit(UpdateSource::User);
        log::debug!("Edited to '{}'", self.text);
        Verdict::Accepted
    }

    /// Replace the text with the strategy's rendering.
    fn render(&mut self) {
        let text = self.strategy.format();
        self.set_surface(text, None);
    }

    /// Replace the text; without an explicit selection the caret goes to the end.
    fn set_surface(&mut self, text: String, selection: Option<Selection>) {
        self.selection = selection.unwrap_or_else(|| Selection::caret(char_len(&text)));
        if text != self.text {
            self.outbox.push(Notification::Render(text.clone()));
            self.text = text;
        }
    }

    fn select_all(&mut self) {
        self.selection = Selection::all(char_len(&self.text));
        self.outbox.push(Notification::RequestSelectAll);
    }

    /// Report a value change, if any, and refresh the step flags.
    fn commit(&mut self, source: UpdateSource) {
        let new = self.strategy.current();
        if new != self.committed {
            let old = std::mem::replace(&mut self.committed, new.clone());
            if source == UpdateSource::User {
                self.config.declared.value = new.clone().map(RawNumber::Typed);
            }
            self.outbox
                .push(Notification::ValueChanged { old, new, source });
        }
        self.refresh_step_flags();
    }

    fn step_flags(&self) -> (bool, bool) {
        if self.config.accept_up_down_on_null && self.strategy.current().is_none() {
            (true, true)
        } else {
            (self.strategy.can_increase(), self.strategy.can_decrease())
        }
    }

    fn refresh_step_flags(&mut self) {
        let (up, down) = self.step_flags();
        if up != self.can_step_up {
            self.can_step_up = up;
            self.outbox.push(Notification::CanStepUpChanged(up));
        }
        if down != self.can_step_down {
            self.can_step_down = down;
            self.outbox.push(Notification::CanStepDownChanged(down));
        }
    }
}

#[cfg(test)]
mod tests {
    use numbox_core::{Decimal, Declared};

    use super::*;

    fn raw(text: &str) -> Option<RawNumber> {
        Some(RawNumber::text(text))
    }

    fn number_box(kind: NumberKind, declared: Declared) -> NumberBox {
        NumberBox::new(NumberBoxConfig {
            kind,
            declared,
            ..NumberBoxConfig::default()
        })
    }

    fn bounded_int(min: i32, max: i32, value: Option<i32>) -> NumberBox {
        number_box(
            NumberKind::Int,
            Declared {
                minimum: Some(min.into()),
                maximum: Some(max.into()),
                value: value.map(RawNumber::from),
                ..Declared::default()
            },
        )
    }

    fn type_text(number_box: &mut NumberBox, text: &str) {
        for c in text.chars() {
            assert_eq!(number_box.preview_text_input(c), Verdict::Accepted, "{c}");
        }
    }

    #[test]
    fn test_typing_commits_each_keystroke() {
        let mut nb = NumberBox::default();
        type_text(&mut nb, "42");
        assert_eq!(nb.text(), "42");
        assert_eq!(nb.value(), Some(Number::Int(42)));
        assert_eq!(nb.selection(), Selection::caret(2));
    }

    #[test]
    fn test_first_keystroke_notifications() {
        let mut nb = NumberBox::default();
        assert!(!nb.can_step_up());
        assert_eq!(nb.preview_text_input('7'), Verdict::Accepted);
        assert_eq!(
            nb.drain_notifications(),
            vec![
                Notification::Render("7".to_string()),
                Notification::ValueChanged {
                    old: None,
                    new: Some(Number::Int(7)),
                    source: UpdateSource::User,
                },
                Notification::CanStepUpChanged(true),
                Notification::CanStepDownChanged(true),
            ]
        );
        assert!(nb.drain_notifications().is_empty());
    }

    #[test]
    fn test_invalid_keystroke_leaves_surface() {
        let mut nb = bounded_int(0, 15, Some(12));
        nb.drain_notifications();
        assert_eq!(nb.preview_text_input('x'), Verdict::Rejected);
        assert_eq!(nb.preview_text_input('3'), Verdict::Rejected);
        assert_eq!(nb.text(), "12");
        assert_eq!(nb.value(), Some(Number::Int(12)));
        assert!(nb.drain_notifications().is_empty());
    }

    #[test]
    fn test_space_is_suppressed() {
        let mut nb = NumberBox::default();
        assert_eq!(nb.handle_key(Key::Space), Verdict::Rejected);
        assert_eq!(nb.handle_key(Key::Char(' ')), Verdict::Rejected);
        assert_eq!(nb.text(), "");
    }

    #[test]
    fn test_paste_over_selection_is_vetoed() {
        let mut nb = bounded_int(0, 15, Some(12));
        nb.set_selection(1, 1);
        assert!(!nb.validate_paste("9"));
        assert_eq!(nb.commit_paste(), Verdict::Rejected);
        assert_eq!(nb.paste("9"), Verdict::Rejected);
        assert_eq!(nb.text(), "12");

        assert!(nb.validate_paste("4"));
        assert_eq!(nb.text(), "12");
        assert_eq!(nb.commit_paste(), Verdict::Accepted);
        assert_eq!(nb.text(), "14");
        assert_eq!(nb.value(), Some(Number::Int(14)));
        assert_eq!(nb.selection(), Selection::caret(2));
    }

    #[test]
    fn test_paste_drops_surrounding_whitespace() {
        let mut nb = bounded_int(0, 100, None);
        assert_eq!(nb.paste(" 5 "), Verdict::Accepted);
        assert_eq!(nb.text(), "5");
        assert_eq!(nb.selection(), Selection::caret(1));
        assert_eq!(nb.value(), Some(Number::Int(5)));

        assert_eq!(nb.paste("\t7\n"), Verdict::Accepted);
        assert_eq!(nb.text(), "57");
        assert_eq!(nb.paste("1 2"), Verdict::Rejected);
        assert_eq!(nb.text(), "57");
    }

    #[test]
    fn test_lone_minus() {
        let mut nb = NumberBox::default();
        assert_eq!(nb.preview_text_input('-'), Verdict::Accepted);
        assert_eq!(nb.text(), "-");
        assert_eq!(nb.value(), None);
        assert_eq!(nb.preview_text_input('5'), Verdict::Accepted);
        assert_eq!(nb.value(), Some(Number::Int(-5)));

        // Backspace back to the sign clears the value but keeps the text
        assert_eq!(nb.delete_backward(), Verdict::Accepted);
        assert_eq!(nb.text(), "-");
        assert_eq!(nb.value(), None);

        // Fully selected text may be replaced by the sign
        type_text(&mut nb, "8");
        nb.set_selection(0, 2);
        assert_eq!(nb.preview_text_input('-'), Verdict::Accepted);
        assert_eq!(nb.text(), "-");
    }

    #[test]
    fn test_unsigned_never_accepts_minus() {
        let mut nb = number_box(NumberKind::UShort, Declared::default());
        assert_eq!(nb.preview_text_input('-'), Verdict::Rejected);
        type_text(&mut nb, "5");
        nb.set_selection(0, 0);
        assert_eq!(nb.preview_text_input('-'), Verdict::Rejected);
        assert_eq!(nb.paste("-1"), Verdict::Rejected);
        assert_eq!(nb.text(), "5");
    }

    #[test]
    fn test_minus_refused_with_non_negative_minimum() {
        let mut nb = bounded_int(0, 100, None);
        assert_eq!(nb.preview_text_input('-'), Verdict::Rejected);
        assert_eq!(nb.text(), "");
    }

    #[test]
    fn test_deletion() {
        let mut nb = bounded_int(0, 1000, Some(123));
        nb.set_selection(3, 0);
        assert_eq!(nb.delete_forward(), Verdict::Accepted);
        assert_eq!(nb.text(), "123");

        nb.set_selection(0, 0);
        assert_eq!(nb.delete_backward(), Verdict::Accepted);
        assert_eq!(nb.text(), "123");

        assert_eq!(nb.delete_forward(), Verdict::Accepted);
        assert_eq!(nb.text(), "23");
        assert_eq!(nb.selection(), Selection::caret(0));

        nb.set_selection(0, 2);
        assert_eq!(nb.delete_backward(), Verdict::Accepted);
        assert_eq!(nb.text(), "");
        assert_eq!(nb.value(), None);
    }

    #[test]
    fn test_deletion_to_invalid_text_is_rejected() {
        let mut nb = number_box(NumberKind::Double, Declared::default());
        assert_eq!(nb.paste("1e5"), Verdict::Accepted);
        assert_eq!(nb.value(), Some(Number::Double(100000.0)));
        assert_eq!(nb.delete_backward(), Verdict::Rejected);
        assert_eq!(nb.text(), "1e5");
    }

    #[test]
    fn test_step_stops_at_maximum() {
        let mut nb = bounded_int(0, 10, Some(10));
        assert!(!nb.can_step_up());
        assert_eq!(nb.step_up(), Verdict::Rejected);
        assert_eq!(nb.value(), Some(Number::Int(10)));

        assert_eq!(nb.step_down(), Verdict::Accepted);
        assert_eq!(nb.text(), "9");
        assert!(nb.can_step_up());
    }

    #[test]
    fn test_step_on_empty_field() {
        let mut nb = bounded_int(-5, 5, None);
        assert_eq!(nb.step_up(), Verdict::Rejected);

        nb.set_accept_up_down_on_null(true);
        assert!(nb.can_step_up());
        assert!(nb.can_step_down());
        assert_eq!(nb.step_down(), Verdict::Accepted);
        assert_eq!(nb.value(), Some(Number::Int(5)));

        nb.set_value(None);
        assert_eq!(nb.step_up(), Verdict::Accepted);
        assert_eq!(nb.value(), Some(Number::Int(-5)));
    }

    #[test]
    fn test_arrow_keys_follow_up_down_behavior() {
        let mut nb = bounded_int(0, 10, Some(5));
        assert_eq!(nb.handle_key(Key::Up), Verdict::Rejected);
        assert_eq!(nb.value(), Some(Number::Int(5)));

        nb.set_up_down_behavior(UpDownBehavior::Buttons);
        assert_eq!(nb.handle_key(Key::Up), Verdict::Rejected);
        assert_eq!(nb.step_up(), Verdict::Accepted);

        nb.set_up_down_behavior(UpDownBehavior::Arrows);
        assert_eq!(nb.handle_key(Key::Up), Verdict::Accepted);
        assert_eq!(nb.handle_key(Key::Down), Verdict::Accepted);
        assert_eq!(nb.handle_key(Key::Down), Verdict::Accepted);
        assert_eq!(nb.value(), Some(Number::Int(5)));
    }

    #[test]
    fn test_caret_keys() {
        let mut nb = bounded_int(0, 1000, Some(123));
        assert_eq!(nb.selection(), Selection::caret(3));
        nb.handle_key(Key::Left);
        assert_eq!(nb.selection(), Selection::caret(2));
        nb.handle_key(Key::Home);
        assert_eq!(nb.selection(), Selection::caret(0));
        nb.handle_key(Key::Right);
        assert_eq!(nb.selection(), Selection::caret(1));
        nb.handle_key(Key::End);
        assert_eq!(nb.selection(), Selection::caret(3));
    }

    #[test]
    fn test_selection_policy() {
        let mut nb = bounded_int(0, 10, Some(5));
        nb.set_selection_policy(SelectionPolicy::OnFocusAndStep);
        nb.focus_gained();
        assert_eq!(nb.drain_notifications(), vec![Notification::RequestSelectAll]);
        assert_eq!(nb.selection(), Selection::all(1));

        nb.step_up();
        assert!(nb
            .drain_notifications()
            .contains(&Notification::RequestSelectAll));

        nb.set_selection_policy(SelectionPolicy::OnStep);
        nb.focus_gained();
        assert!(nb.drain_notifications().is_empty());
    }

    #[test]
    fn test_focus_lost_raises_to_minimum() {
        let mut nb = number_box(
            NumberKind::Double,
            Declared {
                minimum: raw("0"),
                maximum: raw("100"),
                ..Declared::default()
            },
        );
        assert_eq!(nb.paste("-5"), Verdict::Accepted);
        assert_eq!(nb.value(), Some(Number::Double(-5.0)));

        nb.focus_lost();
        assert_eq!(nb.value(), Some(Number::Double(0.0)));
        assert_eq!(nb.text(), "0");
    }

    #[test]
    fn test_focus_lost_typed_prefix_below_minimum() {
        let mut nb = bounded_int(10, 20, None);
        type_text(&mut nb, "1");
        assert_eq!(nb.value(), Some(Number::Int(1)));
        type_text(&mut nb, "5");
        assert_eq!(nb.value(), Some(Number::Int(15)));

        nb.set_selection(0, 2);
        type_text(&mut nb, "3");
        nb.focus_lost();
        assert_eq!(nb.value(), Some(Number::Int(10)));
    }

    #[test]
    fn test_focus_lost_null_policy() {
        let mut nb = number_box(
            NumberKind::Int,
            Declared {
                default: raw("7"),
                ..Declared::default()
            },
        );
        nb.set_lost_focus_behavior(LostFocusBehavior {
            null_value: NullValuePolicy::Default,
            ..LostFocusBehavior::default()
        });
        nb.focus_lost();
        assert_eq!(nb.value(), Some(Number::Int(7)));
        assert_eq!(nb.text(), "7");

        // Without a policy a lone sign is cleared
        nb.set_lost_focus_behavior(LostFocusBehavior::default());
        nb.set_selection(0, 1);
        nb.preview_text_input('-');
        nb.focus_lost();
        assert_eq!(nb.text(), "");
        assert_eq!(nb.value(), None);
    }

    #[test]
    fn test_focus_lost_trim_and_format() {
        let mut nb = NumberBox::default();
        type_text(&mut nb, "007");
        assert_eq!(nb.text(), "007");

        nb.set_lost_focus_behavior(LostFocusBehavior {
            trim_leading_zero: true,
            ..LostFocusBehavior::default()
        });
        nb.focus_lost();
        assert_eq!(nb.text(), "7");

        nb.set_lost_focus_behavior(LostFocusBehavior {
            format_text: Some("{0:D3} pcs".to_string()),
            ..LostFocusBehavior::default()
        });
        nb.focus_lost();
        assert_eq!(nb.text(), "007 pcs");

        // Editing resumes from the plain value
        nb.focus_gained();
        assert_eq!(nb.text(), "7");

        nb.set_lost_focus_behavior(LostFocusBehavior {
            format_text: Some("{0:X}".to_string()),
            ..LostFocusBehavior::default()
        });
        nb.focus_lost();
        assert_eq!(nb.text(), "7");
    }

    #[test]
    fn test_reset() {
        let mut nb = number_box(
            NumberKind::Short,
            Declared {
                value: raw("3"),
                default: raw("1"),
                ..Declared::default()
            },
        );
        assert_eq!(nb.reset(), Verdict::Accepted);
        assert_eq!(nb.value(), Some(Number::Short(1)));
        assert_eq!(nb.text(), "1");
    }

    #[test]
    fn test_host_value_does_not_echo_as_user_edit() {
        let mut nb = bounded_int(0, 100, None);
        assert_eq!(nb.set_value(Some(42i32.into())), Verdict::Accepted);
        let notifications = nb.drain_notifications();
        assert_eq!(notifications[0], Notification::Render("42".to_string()));
        assert_eq!(
            notifications[1],
            Notification::ValueChanged {
                old: None,
                new: Some(Number::Int(42)),
                source: UpdateSource::Host,
            }
        );

        assert_eq!(nb.set_value(raw("500")), Verdict::Rejected);
        assert_eq!(nb.value(), Some(Number::Int(42)));
        assert!(nb.drain_notifications().is_empty());
    }

    #[test]
    fn test_representation_change_drops_incompatible_value() {
        let mut nb = number_box(
            NumberKind::SByte,
            Declared {
                value: raw("300"),
                ..Declared::default()
            },
        );
        assert_eq!(nb.value(), None);

        nb.set_kind(NumberKind::Byte);
        assert_eq!(nb.value(), None);
        assert_eq!(nb.text(), "");

        nb.set_kind(NumberKind::Short);
        assert_eq!(nb.value(), Some(Number::Short(300)));
        assert_eq!(nb.text(), "300");
    }

    #[test]
    fn test_representation_change_keeps_user_value() {
        let mut nb = NumberBox::default();
        type_text(&mut nb, "12");
        nb.set_kind(NumberKind::Decimal);
        assert_eq!(nb.text(), "12");
        assert_eq!(nb.kind(), NumberKind::Decimal);

        type_text(&mut nb, ".5");
        nb.set_kind(NumberKind::Long);
        assert_eq!(nb.value(), None);
    }

    #[test]
    fn test_representation_change_keeps_declared_settings() {
        let mut nb = number_box(
            NumberKind::Int,
            Declared {
                minimum: raw("-5"),
                maximum: raw("300"),
                ..Declared::default()
            },
        );
        assert_eq!(nb.set_step(raw("2")), Verdict::Accepted);
        assert_eq!(nb.set_default(raw("7")), Verdict::Accepted);

        // Settings a byte cannot hold fall back to the natural bounds
        nb.set_kind(NumberKind::Byte);
        let strategy = nb.strategy();
        assert_eq!(strategy.minimum(), Some(Number::Byte(0)));
        assert_eq!(strategy.maximum(), Some(Number::Byte(255)));
        assert_eq!(strategy.step(), Number::Byte(2));
        assert_eq!(strategy.default_value(), Some(Number::Byte(7)));

        nb.set_kind(NumberKind::SByte);
        let strategy = nb.strategy();
        assert_eq!(strategy.minimum(), Some(Number::SByte(-5)));
        assert_eq!(strategy.maximum(), Some(Number::SByte(127)));
        assert_eq!(strategy.step(), Number::SByte(2));
        assert_eq!(strategy.default_value(), Some(Number::SByte(7)));

        assert_eq!(nb.reset(), Verdict::Accepted);
        assert_eq!(nb.value(), Some(Number::SByte(7)));
    }

    #[test]
    fn test_declared_setters_read_text_in_declared_culture() {
        let mut nb = number_box(
            NumberKind::Double,
            Declared {
                parsing_culture: Some(Culture::from_name("de-DE").unwrap()),
                declared_culture: Some(Culture::invariant()),
                ..Declared::default()
            },
        );

        assert_eq!(nb.set_value(raw("2,5")), Verdict::Rejected);
        assert_eq!(nb.set_value(raw("2.5")), Verdict::Accepted);
        assert_eq!(nb.value(), Some(Number::Double(2.5)));
        assert_eq!(nb.text(), "2,5");
        assert_eq!(nb.set_minimum(raw("1.5")), Verdict::Accepted);
        assert_eq!(nb.set_maximum(raw("10.5")), Verdict::Accepted);
        assert_eq!(nb.set_step(raw("0.5")), Verdict::Accepted);

        nb.set_kind(NumberKind::Decimal);
        assert_eq!(nb.value(), Some(Number::Decimal(Decimal::new(25, 1))));
        assert_eq!(nb.text(), "2,5");
        assert_eq!(
            nb.strategy().minimum(),
            Some(Number::Decimal(Decimal::new(15, 1)))
        );

        nb.set_kind(NumberKind::Double);
        let strategy = nb.strategy();
        assert_eq!(strategy.current(), Some(Number::Double(2.5)));
        assert_eq!(strategy.minimum(), Some(Number::Double(1.5)));
        assert_eq!(strategy.maximum(), Some(Number::Double(10.5)));
        assert_eq!(strategy.step(), Number::Double(0.5));

        // User edits stay in the parsing culture
        nb.set_selection(0, 3);
        assert_eq!(nb.paste("3,5"), Verdict::Accepted);
        assert_eq!(nb.value(), Some(Number::Double(3.5)));
    }

    #[test]
    fn test_read_only_and_check_box() {
        let mut nb = bounded_int(0, 10, Some(5));
        nb.set_read_only(true);
        assert_eq!(nb.preview_text_input('1'), Verdict::Rejected);
        assert_eq!(nb.step_up(), Verdict::Rejected);
        assert_eq!(nb.delete_backward(), Verdict::Rejected);
        assert!(!nb.validate_paste("1"));
        assert_eq!(nb.reset(), Verdict::Rejected);

        // Host values still flow in
        assert_eq!(nb.set_value(Some(6i32.into())), Verdict::Accepted);

        let mut nb = NumberBox::new(NumberBoxConfig {
            check_box: crate::config::CheckBoxBehavior::EnableIfChecked,
            ..NumberBoxConfig::default()
        });
        assert!(!nb.is_enabled());
        assert_eq!(nb.preview_text_input('1'), Verdict::Rejected);
        nb.set_checked(true);
        assert_eq!(nb.preview_text_input('1'), Verdict::Accepted);
    }

    #[test]
    fn test_parsing_culture() {
        let mut nb = number_box(
            NumberKind::Double,
            Declared {
                value: raw("1.5"),
                declared_culture: Some(Culture::invariant()),
                parsing_culture: Some(Culture::invariant()),
                ..Declared::default()
            },
        );
        assert_eq!(nb.text(), "1.5");

        nb.set_parsing_culture(Some(Culture::from_name("de-DE").unwrap()));
        assert_eq!(nb.text(), "1,5");
        nb.set_selection(0, 3);
        assert_eq!(nb.paste("2.5"), Verdict::Rejected);
        assert_eq!(nb.paste("2,5"), Verdict::Accepted);
        assert_eq!(nb.value(), Some(Number::Double(2.5)));
    }

    #[test]
    fn test_bound_setters_update_step_flags() {
        let mut nb = bounded_int(0, 10, Some(5));
        nb.drain_notifications();
        assert_eq!(nb.set_maximum(raw("5")), Verdict::Accepted);
        assert_eq!(
            nb.drain_notifications(),
            vec![Notification::CanStepUpChanged(false)]
        );
        assert_eq!(nb.set_maximum(raw("five")), Verdict::Rejected);
        assert_eq!(nb.set_step(raw("2")), Verdict::Accepted);
        assert_eq!(nb.step_down(), Verdict::Accepted);
        assert_eq!(nb.value(), Some(Number::Int(3)));
    }
}
