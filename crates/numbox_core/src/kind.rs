//! The numeric representations a field can be declared with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Machine representation backing a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberKind {
    /// 8-bit signed integer
    SByte,
    /// 8-bit unsigned integer
    Byte,
    /// 16-bit signed integer
    Short,
    /// 16-bit unsigned integer
    UShort,
    /// 32-bit signed integer
    #[default]
    Int,
    /// 32-bit unsigned integer
    UInt,
    /// 64-bit signed integer
    Long,
    /// 64-bit unsigned integer
    ULong,
    /// Arbitrary precision integer without natural bounds
    BigInteger,
    /// Single precision floating point
    Float,
    /// Double precision floating point
    Double,
    /// 96-bit mantissa decimal with a variable scale
    Decimal,
}

impl NumberKind {
    /// Get the display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            NumberKind::SByte => "sbyte",
            NumberKind::Byte => "byte",
            NumberKind::Short => "short",
            NumberKind::UShort => "ushort",
            NumberKind::Int => "int",
            NumberKind::UInt => "uint",
            NumberKind::Long => "long",
            NumberKind::ULong => "ulong",
            NumberKind::BigInteger => "biginteger",
            NumberKind::Float => "float",
            NumberKind::Double => "double",
            NumberKind::Decimal => "decimal",
        }
    }

    /// Get all kinds, integers first.
    pub fn all() -> &'static [NumberKind] {
        &[
            NumberKind::SByte,
            NumberKind::Byte,
            NumberKind::Short,
            NumberKind::UShort,
            NumberKind::Int,
            NumberKind::UInt,
            NumberKind::Long,
            NumberKind::ULong,
            NumberKind::BigInteger,
            NumberKind::Float,
            NumberKind::Double,
            NumberKind::Decimal,
        ]
    }

    /// Whether values of this kind can be negative.
    pub fn is_signed(&self) -> bool {
        !matches!(
            self,
            NumberKind::Byte | NumberKind::UShort | NumberKind::UInt | NumberKind::ULong
        )
    }

    /// Whether this kind holds fractional values.
    pub fn is_fractional(&self) -> bool {
        matches!(
            self,
            NumberKind::Float | NumberKind::Double | NumberKind::Decimal
        )
    }

    /// Whether this kind has no natural minimum or maximum.
    pub fn is_unbounded(&self) -> bool {
        matches!(self, NumberKind::BigInteger)
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumberKind {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        NumberKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LookupError::unknown_kind(wanted))
    }
}
