//! Value strategies: current/min/max/step/default state per representation.
//!
//! [`Strategy<T>`] implements the value semantics once, generically over
//! [`Numeric`]. [`NumberStrategy`] closes the set of representations into a
//! tagged union and is what a field actually holds, since the representation
//! is picked at runtime from a [`NumberKind`].

use num_bigint::BigInt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::culture::Culture;
use crate::kind::NumberKind;
use crate::number::{Number, RawNumber};
use crate::numeric::Numeric;

/// Declared configuration a strategy is seeded from.
///
/// Text values are interpreted under `declared_culture`; the live value the
/// user edits afterwards is interpreted under `parsing_culture`. Either culture
/// falls back to the ambient culture of the thread when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Declared {
    pub value: Option<RawNumber>,
    pub minimum: Option<RawNumber>,
    pub maximum: Option<RawNumber>,
    pub step: Option<RawNumber>,
    pub default: Option<RawNumber>,
    pub parsing_culture: Option<Culture>,
    pub declared_culture: Option<Culture>,
}

/// Outcome of interpreting a raw input.
enum Parsed<T> {
    /// Empty input: the field holds no value
    Absent,
    Value(T),
    Invalid,
}

/// Which bounds a candidate value is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeCheck {
    Full,
    /// Only the maximum; used while the user is still typing
    UpperOnly,
}

// =============================================================================
// Generic Strategy
// =============================================================================

/// Value state of a numeric field for one machine representation.
#[derive(Debug, Clone)]
pub struct Strategy<T: Numeric> {
    current: Option<T>,
    minimum: Option<T>,
    maximum: Option<T>,
    step: T,
    default: Option<T>,
    culture: Culture,
}

impl<T: Numeric> Default for Strategy<T> {
    fn default() -> Self {
        Self {
            current: None,
            minimum: T::natural_min(),
            maximum: T::natural_max(),
            step: T::default_step(),
            default: None,
            culture: Culture::current(),
        }
    }
}

impl<T: Numeric> Strategy<T> {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn minimum(&self) -> Option<&T> {
        self.minimum.as_ref()
    }

    pub fn maximum(&self) -> Option<&T> {
        self.maximum.as_ref()
    }

    pub fn step(&self) -> &T {
        &self.step
    }

    pub fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }

    pub fn culture(&self) -> &Culture {
        &self.culture
    }

    /// Whether stepping up stays within the maximum.
    ///
    /// Without a value there is nothing to step, except for an unbounded
    /// maximum which always allows it.
    pub fn can_increase(&self) -> bool {
        match &self.maximum {
            None => true,
            Some(maximum) => self
                .current
                .as_ref()
                .and_then(|current| current.step_up(&self.step))
                .is_some_and(|next| next <= *maximum),
        }
    }

    /// Whether stepping down stays within the minimum.
    pub fn can_decrease(&self) -> bool {
        match &self.minimum {
            None => true,
            Some(minimum) => self
                .current
                .as_ref()
                .and_then(|current| current.step_down(&self.step))
                .is_some_and(|next| next >= *minimum),
        }
    }

    /// Whether a leading `-` may be typed.
    pub fn accepts_negative_sign(&self) -> bool {
        T::KIND.is_signed() && self.minimum.as_ref().is_none_or(Numeric::is_negative)
    }

    pub fn is_below_minimum(&self) -> bool {
        match (&self.current, &self.minimum) {
            (Some(current), Some(minimum)) => current < minimum,
            _ => false,
        }
    }

    /// Whether `text` would be accepted by [`Self::set_current_from_edit`].
    pub fn accepts_edit(&self, text: &str) -> bool {
        match self.parse_text(text) {
            Parsed::Absent => true,
            Parsed::Value(value) => self.in_range(&value, RangeCheck::UpperOnly),
            Parsed::Invalid => false,
        }
    }

    /// Render the current value, empty when absent.
    pub fn format(&self) -> String {
        self.current
            .as_ref()
            .map(|current| current.format(&self.culture))
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Seed every setting in dependency order.
    ///
    /// Bounds are set before the value so the value is range-checked against
    /// them; the declared culture is only active while the declared values are
    /// read.
    pub fn initialize(&mut self, declared: &Declared) {
        self.set_culture(declared.declared_culture.clone());
        // Declared values that do not fit this representation are dropped
        self.set_minimum(declared.minimum.as_ref());
        self.set_maximum(declared.maximum.as_ref());
        self.set_step(declared.step.as_ref());
        self.set_default(declared.default.as_ref());
        self.set_current(declared.value.as_ref());
        self.set_culture(declared.parsing_culture.clone());
    }

    pub fn set_culture(&mut self, culture: Option<Culture>) {
        self.culture = culture.unwrap_or_else(Culture::current);
    }

    /// Replace the value if `raw` parses and lies within `[minimum, maximum]`.
    ///
    /// `None` and empty text clear the value and always succeed.
    pub fn set_current(&mut self, raw: Option<&RawNumber>) -> bool {
        self.take(self.parse_raw(raw), RangeCheck::Full)
    }

    /// Replace the value from text the user is typing.
    ///
    /// Only the maximum is enforced: a prefix of a valid number may lie below
    /// the minimum (`1` on the way to `15` with a minimum of 10). Values left
    /// below the minimum are corrected with [`Self::to_minimum`] once editing
    /// ends.
    pub fn set_current_from_edit(&mut self, text: &str) -> bool {
        self.take(self.parse_text(text), RangeCheck::UpperOnly)
    }

    /// Absent resets to the natural minimum; unparsable input is ignored.
    ///
    /// Returns whether `raw` could be interpreted.
    pub fn set_minimum(&mut self, raw: Option<&RawNumber>) -> bool {
        match self.parse_raw(raw) {
            Parsed::Absent => self.minimum = T::natural_min(),
            Parsed::Value(value) => self.minimum = Some(value),
            Parsed::Invalid => return false,
        }
        true
    }

    /// Absent resets to the natural maximum; unparsable input is ignored.
    pub fn set_maximum(&mut self, raw: Option<&RawNumber>) -> bool {
        match self.parse_raw(raw) {
            Parsed::Absent => self.maximum = T::natural_max(),
            Parsed::Value(value) => self.maximum = Some(value),
            Parsed::Invalid => return false,
        }
        true
    }

    /// Unparsable input still resets the step to its default.
    pub fn set_step(&mut self, raw: Option<&RawNumber>) -> bool {
        let (step, valid) = match self.parse_raw(raw) {
            Parsed::Value(value) => (value, true),
            Parsed::Absent => (T::default_step(), true),
            Parsed::Invalid => (T::default_step(), false),
        };
        self.step = step;
        valid
    }

    pub fn set_default(&mut self, raw: Option<&RawNumber>) -> bool {
        match self.parse_raw(raw) {
            Parsed::Absent => self.default = None,
            Parsed::Value(value) => self.default = Some(value),
            Parsed::Invalid => return false,
        }
        true
    }

    pub fn increase(&mut self) {
        if !self.can_increase() {
            return;
        }
        if let Some(next) = self.current.as_ref().and_then(|c| c.step_up(&self.step)) {
            self.current = Some(next);
        }
    }

    pub fn decrease(&mut self) {
        if !self.can_decrease() {
            return;
        }
        if let Some(next) = self.current.as_ref().and_then(|c| c.step_down(&self.step)) {
            self.current = Some(next);
        }
    }

    pub fn reset(&mut self) {
        self.current = self.default.clone();
    }

    pub fn to_maximum(&mut self) {
        self.current = self.maximum.clone();
    }

    pub fn to_minimum(&mut self) {
        self.current = self.minimum.clone();
    }

    // -------------------------------------------------------------------------
    // Parsing
    // -------------------------------------------------------------------------

    fn parse_raw(&self, raw: Option<&RawNumber>) -> Parsed<T> {
        match raw {
            None => Parsed::Absent,
            Some(RawNumber::Text(text)) => self.parse_text(text),
            Some(RawNumber::Typed(number)) => {
                let text = number.to_string();
                match T::parse(&text, &Culture::invariant()) {
                    Some(value) => Parsed::Value(value),
                    None => Parsed::Invalid,
                }
            }
        }
    }

    fn parse_text(&self, text: &str) -> Parsed<T> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Parsed::Absent;
        }
        match T::parse(trimmed, &self.culture) {
            Some(value) => Parsed::Value(value),
            None => Parsed::Invalid,
        }
    }

    fn in_range(&self, value: &T, check: RangeCheck) -> bool {
        let below_max = self.maximum.as_ref().is_none_or(|max| value <= max);
        let above_min = match check {
            RangeCheck::Full => self.minimum.as_ref().is_none_or(|min| value >= min),
            RangeCheck::UpperOnly => true,
        };
        below_max && above_min
    }

    fn take(&mut self, parsed: Parsed<T>, check: RangeCheck) -> bool {
        match parsed {
            Parsed::Absent => {
                self.current = None;
                true
            }
            Parsed::Value(value) if self.in_range(&value, check) => {
                self.current = Some(value);
                true
            }
            Parsed::Value(_) | Parsed::Invalid => false,
        }
    }
}

// =============================================================================
// Tagged Union
// =============================================================================

/// The value strategy of a field, one variant per [`NumberKind`].
#[derive(Debug, Clone)]
pub enum NumberStrategy {
    SByte(Strategy<i8>),
    Byte(Strategy<u8>),
    Short(Strategy<i16>),
    UShort(Strategy<u16>),
    Int(Strategy<i32>),
    UInt(Strategy<u32>),
    Long(Strategy<i64>),
    ULong(Strategy<u64>),
    BigInteger(Strategy<BigInt>),
    Float(Strategy<f32>),
    Double(Strategy<f64>),
    Decimal(Strategy<Decimal>),
}

/// Run `$body` with `$s` bound to the inner strategy, whatever its type.
macro_rules! dispatch {
    ($strategy:expr, $s:ident => $body:expr) => {
        match $strategy {
            NumberStrategy::SByte($s) => $body,
            NumberStrategy::Byte($s) => $body,
            NumberStrategy::Short($s) => $body,
            NumberStrategy::UShort($s) => $body,
            NumberStrategy::Int($s) => $body,
            NumberStrategy::UInt($s) => $body,
            NumberStrategy::Long($s) => $body,
            NumberStrategy::ULong($s) => $body,
            NumberStrategy::BigInteger($s) => $body,
            NumberStrategy::Float($s) => $body,
            NumberStrategy::Double($s) => $body,
            NumberStrategy::Decimal($s) => $body,
        }
    };
}

impl NumberStrategy {
    /// Create an empty strategy for `kind`.
    pub fn new(kind: NumberKind) -> Self {
        match kind {
            NumberKind::SByte => Self::SByte(Strategy::new()),
            NumberKind::Byte => Self::Byte(Strategy::new()),
            NumberKind::Short => Self::Short(Strategy::new()),
            NumberKind::UShort => Self::UShort(Strategy::new()),
            NumberKind::Int => Self::Int(Strategy::new()),
            NumberKind::UInt => Self::UInt(Strategy::new()),
            NumberKind::Long => Self::Long(Strategy::new()),
            NumberKind::ULong => Self::ULong(Strategy::new()),
            NumberKind::BigInteger => Self::BigInteger(Strategy::new()),
            NumberKind::Float => Self::Float(Strategy::new()),
            NumberKind::Double => Self::Double(Strategy::new()),
            NumberKind::Decimal => Self::Decimal(Strategy::new()),
        }
    }

    /// Create a strategy for `kind` and seed it from `declared`.
    pub fn with_declared(kind: NumberKind, declared: &Declared) -> Self {
        let mut strategy = Self::new(kind);
        strategy.initialize(declared);
        strategy
    }

    pub fn kind(&self) -> NumberKind {
        match self {
            Self::SByte(_) => NumberKind::SByte,
            Self::Byte(_) => NumberKind::Byte,
            Self::Short(_) => NumberKind::Short,
            Self::UShort(_) => NumberKind::UShort,
            Self::Int(_) => NumberKind::Int,
            Self::UInt(_) => NumberKind::UInt,
            Self::Long(_) => NumberKind::Long,
            Self::ULong(_) => NumberKind::ULong,
            Self::BigInteger(_) => NumberKind::BigInteger,
            Self::Float(_) => NumberKind::Float,
            Self::Double(_) => NumberKind::Double,
            Self::Decimal(_) => NumberKind::Decimal,
        }
    }

    pub fn current(&self) -> Option<Number> {
        dispatch!(self, s => s.current().cloned().map(Numeric::into_number))
    }

    pub fn minimum(&self) -> Option<Number> {
        dispatch!(self, s => s.minimum().cloned().map(Numeric::into_number))
    }

    pub fn maximum(&self) -> Option<Number> {
        dispatch!(self, s => s.maximum().cloned().map(Numeric::into_number))
    }

    pub fn step(&self) -> Number {
        dispatch!(self, s => s.step().clone().into_number())
    }

    pub fn default_value(&self) -> Option<Number> {
        dispatch!(self, s => s.default_value().cloned().map(Numeric::into_number))
    }

    pub fn culture(&self) -> &Culture {
        dispatch!(self, s => s.culture())
    }

    pub fn can_increase(&self) -> bool {
        dispatch!(self, s => s.can_increase())
    }

    pub fn can_decrease(&self) -> bool {
        dispatch!(self, s => s.can_decrease())
    }

    pub fn accepts_negative_sign(&self) -> bool {
        dispatch!(self, s => s.accepts_negative_sign())
    }

    pub fn is_below_minimum(&self) -> bool {
        dispatch!(self, s => s.is_below_minimum())
    }

    pub fn accepts_edit(&self, text: &str) -> bool {
        dispatch!(self, s => s.accepts_edit(text))
    }

    pub fn format(&self) -> String {
        dispatch!(self, s => s.format())
    }

    pub fn initialize(&mut self, declared: &Declared) {
        dispatch!(self, s => s.initialize(declared));
    }

    pub fn set_culture(&mut self, culture: Option<Culture>) {
        dispatch!(self, s => s.set_culture(culture));
    }

    pub fn set_current(&mut self, raw: Option<&RawNumber>) -> bool {
        dispatch!(self, s => s.set_current(raw))
    }

    pub fn set_current_from_edit(&mut self, text: &str) -> bool {
        dispatch!(self, s => s.set_current_from_edit(text))
    }

    pub fn set_minimum(&mut self, raw: Option<&RawNumber>) -> bool {
        dispatch!(self, s => s.set_minimum(raw))
    }

    pub fn set_maximum(&mut self, raw: Option<&RawNumber>) -> bool {
        dispatch!(self, s => s.set_maximum(raw))
    }

    pub fn set_step(&mut self, raw: Option<&RawNumber>) -> bool {
        dispatch!(self, s => s.set_step(raw))
    }

    pub fn set_default(&mut self, raw: Option<&RawNumber>) -> bool {
        dispatch!(self, s => s.set_default(raw))
    }

    pub fn increase(&mut self) {
        dispatch!(self, s => s.increase());
    }

    pub fn decrease(&mut self) {
        dispatch!(self, s => s.decrease());
    }

    pub fn reset(&mut self) {
        dispatch!(self, s => s.reset());
    }

    pub fn to_maximum(&mut self) {
        dispatch!(self, s => s.to_maximum());
    }

    pub fn to_minimum(&mut self) {
        dispatch!(self, s => s.to_minimum());
    }
}

impl Default for NumberStrategy {
    fn default() -> Self {
        Self::new(NumberKind::default())
    }
}
