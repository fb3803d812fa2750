//! Culture settings used to parse and render numbers.
//!
//! A culture only carries what numeric text needs: the decimal separator and
//! the digit group separator. Named presets cover the common locales; the
//! ambient culture is a per-thread setting, matching a UI thread that owns
//! every field it edits.

use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Known presets: (name, decimal separator, group separator).
const PRESETS: &[(&str, char, char)] = &[
    ("en-US", '.', ','),
    ("en-GB", '.', ','),
    ("de-DE", ',', '.'),
    ("de-CH", '.', '\u{2019}'),
    ("fr-FR", ',', '\u{202f}'),
    ("es-ES", ',', '.'),
    ("it-IT", ',', '.'),
    ("nl-NL", ',', '.'),
    ("pt-BR", ',', '.'),
    ("ru-RU", ',', '\u{a0}'),
    ("sv-SE", ',', '\u{a0}'),
    ("ja-JP", '.', ','),
];

thread_local! {
    static AMBIENT: RefCell<Culture> = RefCell::new(Culture::invariant());
}

/// Number formatting conventions of a locale.
///
/// Presets serialise as their name (`"de-DE"`); any other culture as an
/// object carrying its separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CultureRepr", into = "CultureRepr")]
pub struct Culture {
    name: Cow<'static, str>,
    decimal_separator: char,
    group_separator: char,
}

impl Culture {
    /// The culture-neutral conventions: `.` for decimals, `,` for groups.
    pub const fn invariant() -> Self {
        Self {
            name: Cow::Borrowed(""),
            decimal_separator: '.',
            group_separator: ',',
        }
    }

    /// Build a culture that is not part of the preset table.
    pub fn custom(name: impl Into<String>, decimal_separator: char, group_separator: char) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            decimal_separator,
            group_separator,
        }
    }

    /// Look up a preset by its name (`"de-DE"`, `"de_de"` and `"invariant"` all work).
    pub fn from_name(name: &str) -> Result<Self, LookupError> {
        let wanted = name.trim().replace('_', "-");
        if wanted.is_empty() || wanted.eq_ignore_ascii_case("invariant") {
            return Ok(Self::invariant());
        }

        PRESETS
            .iter()
            .find(|(preset, _, _)| preset.eq_ignore_ascii_case(&wanted))
            .map(|&(preset, decimal_separator, group_separator)| Self {
                name: Cow::Borrowed(preset),
                decimal_separator,
                group_separator,
            })
            .ok_or_else(|| LookupError::unknown_culture(name))
    }

    /// Get the ambient culture of the current thread.
    pub fn current() -> Self {
        AMBIENT.with(|ambient| ambient.borrow().clone())
    }

    /// Replace the ambient culture of the current thread.
    pub fn set_current(culture: Culture) {
        log::debug!("Ambient culture set to '{}'", culture);
        AMBIENT.with(|ambient| *ambient.borrow_mut() = culture);
    }

    /// Name of the culture, empty for the invariant culture.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn group_separator(&self) -> char {
        self.group_separator
    }

    pub fn is_invariant(&self) -> bool {
        self.name.is_empty()
    }

    /// Rewrite invariant numeric text (`.` as decimal point) for this culture.
    pub fn localize(&self, invariant: &str) -> String {
        if self.decimal_separator == '.' {
            invariant.to_string()
        } else {
            invariant.replace('.', &self.decimal_separator.to_string())
        }
    }

    /// Insert group separators into a run of ASCII digits.
    ///
    /// `"1234567"` becomes `"1,234,567"` in the invariant culture.
    pub fn group_digits(&self, digits: &str) -> String {
        let len = digits.chars().count();
        let mut grouped = String::with_capacity(len + len / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                grouped.push(self.group_separator);
            }
            grouped.push(c);
        }
        grouped
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invariant() {
            f.write_str("invariant")
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Serialised form of a [`Culture`].
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CultureRepr {
    Name(String),
    Custom {
        name: String,
        decimal_separator: char,
        group_separator: char,
    },
}

impl TryFrom<CultureRepr> for Culture {
    type Error = LookupError;

    fn try_from(repr: CultureRepr) -> Result<Self, Self::Error> {
        match repr {
            CultureRepr::Name(name) => Self::from_name(&name),
            CultureRepr::Custom {
                name,
                decimal_separator,
                group_separator,
            } => Ok(Self::custom(name, decimal_separator, group_separator)),
        }
    }
}

impl From<Culture> for CultureRepr {
    fn from(culture: Culture) -> Self {
        if Culture::from_name(&culture.name).as_ref() == Ok(&culture) {
            CultureRepr::Name(culture.name.into_owned())
        } else {
            CultureRepr::Custom {
                name: culture.name.into_owned(),
                decimal_separator: culture.decimal_separator,
                group_separator: culture.group_separator,
            }
        }
    }
}
