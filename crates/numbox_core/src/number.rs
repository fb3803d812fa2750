//! Typed numeric values and the raw inputs they are parsed from.

use std::fmt;

use num_bigint::BigInt;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::kind::NumberKind;

/// A value held by a numeric field, tagged with its representation.
///
/// `Display` renders the culture-invariant form, which every representation
/// can parse back.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    SByte(i8),
    Byte(u8),
    Short(i16),
    UShort(u16),
    Int(i32),
    UInt(u32),
    Long(i64),
    ULong(u64),
    BigInteger(BigInt),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
}

impl Number {
    /// The representation of this value.
    pub fn kind(&self) -> NumberKind {
        match self {
            Number::SByte(_) => NumberKind::SByte,
            Number::Byte(_) => NumberKind::Byte,
            Number::Short(_) => NumberKind::Short,
            Number::UShort(_) => NumberKind::UShort,
            Number::Int(_) => NumberKind::Int,
            Number::UInt(_) => NumberKind::UInt,
            Number::Long(_) => NumberKind::Long,
            Number::ULong(_) => NumberKind::ULong,
            Number::BigInteger(_) => NumberKind::BigInteger,
            Number::Float(_) => NumberKind::Float,
            Number::Double(_) => NumberKind::Double,
            Number::Decimal(_) => NumberKind::Decimal,
        }
    }

    /// Convert to `i64` when the value is integral and fits.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Number::SByte(v) => Some(i64::from(*v)),
            Number::Byte(v) => Some(i64::from(*v)),
            Number::Short(v) => Some(i64::from(*v)),
            Number::UShort(v) => Some(i64::from(*v)),
            Number::Int(v) => Some(i64::from(*v)),
            Number::UInt(v) => Some(i64::from(*v)),
            Number::Long(v) => Some(*v),
            Number::ULong(v) => i64::try_from(*v).ok(),
            Number::BigInteger(v) => i64::try_from(v).ok(),
            Number::Float(v) => float_to_i64(f64::from(*v)),
            Number::Double(v) => float_to_i64(*v),
            Number::Decimal(v) => {
                if v.fract().is_zero() {
                    v.to_i64()
                } else {
                    None
                }
            }
        }
    }
}

fn float_to_i64(value: f64) -> Option<i64> {
    // 2^63 is exactly representable, anything at or above it does not fit
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if value.fract() == 0.0 && value >= -LIMIT && value < LIMIT {
        Some(value as i64)
    } else {
        None
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::SByte(v) => write!(f, "{v}"),
            Number::Byte(v) => write!(f, "{v}"),
            Number::Short(v) => write!(f, "{v}"),
            Number::UShort(v) => write!(f, "{v}"),
            Number::Int(v) => write!(f, "{v}"),
            Number::UInt(v) => write!(f, "{v}"),
            Number::Long(v) => write!(f, "{v}"),
            Number::ULong(v) => write!(f, "{v}"),
            Number::BigInteger(v) => write!(f, "{v}"),
            Number::Float(v) => write!(f, "{v}"),
            Number::Double(v) => write!(f, "{v}"),
            Number::Decimal(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! number_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::$variant(value)
                }
            }
        )*
    };
}

number_from! {
    i8 => SByte,
    u8 => Byte,
    i16 => Short,
    u16 => UShort,
    i32 => Int,
    u32 => UInt,
    i64 => Long,
    u64 => ULong,
    BigInt => BigInteger,
    f32 => Float,
    f64 => Double,
    Decimal => Decimal,
}

// =============================================================================
// Raw input
// =============================================================================

/// A declared number before it is interpreted by a representation.
///
/// Text is parsed in the culture active on the receiving strategy. A typed
/// value is converted through its invariant rendering, so `Int(300)` fails to
/// become a `Byte` exactly as the text `"300"` would.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNumber {
    Text(String),
    Typed(Number),
}

impl RawNumber {
    /// Create a textual raw number.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

impl From<&str> for RawNumber {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RawNumber {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Number> for RawNumber {
    fn from(number: Number) -> Self {
        Self::Typed(number)
    }
}

macro_rules! raw_from_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for RawNumber {
                fn from(value: $ty) -> Self {
                    Self::Typed(Number::from(value))
                }
            }
        )*
    };
}

raw_from_primitive!(i8, u8, i16, u16, i32, u32, i64, u64, BigInt, f32, f64, Decimal);

impl Serialize for RawNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            RawNumber::Text(text) => serializer.serialize_str(text),
            RawNumber::Typed(number) => match number {
                Number::SByte(v) => serializer.serialize_i8(*v),
                Number::Byte(v) => serializer.serialize_u8(*v),
                Number::Short(v) => serializer.serialize_i16(*v),
                Number::UShort(v) => serializer.serialize_u16(*v),
                Number::Int(v) => serializer.serialize_i32(*v),
                Number::UInt(v) => serializer.serialize_u32(*v),
                Number::Long(v) => serializer.serialize_i64(*v),
                Number::ULong(v) => serializer.serialize_u64(*v),
                Number::Float(v) => serializer.serialize_f32(*v),
                Number::Double(v) => serializer.serialize_f64(*v),
                // Strings keep the full precision of these two
                Number::BigInteger(_) | Number::Decimal(_) => {
                    serializer.serialize_str(&number.to_string())
                }
            },
        }
    }
}

impl<'de> Deserialize<'de> for RawNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawNumberVisitor)
    }
}

struct RawNumberVisitor;

impl<'de> Visitor<'de> for RawNumberVisitor {
    type Value = RawNumber;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a number or numeric text")
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(RawNumber::Typed(Number::Long(v)))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(RawNumber::Typed(Number::ULong(v)))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(RawNumber::Typed(Number::Double(v)))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(RawNumber::Text(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(RawNumber::Text(v))
    }
}
