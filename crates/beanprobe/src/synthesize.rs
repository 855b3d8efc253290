//! Setter argument synthesis.
//!
//! Priority: enum (first declared value), well-known scalar (canonical
//! default), array (empty, same element type), optional (`Some` of the
//! inner synthesis), opaque (stand-in).

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::One;

use crate::{
    error::{Error, Result},
    stand_in::StandInSource,
    value::{ArrayValue, EnumType, EnumValue, ScalarKind, Value, ValueType},
};

impl ScalarKind {
    /// Canonical default: false, zero, `'\0'`, empty text.
    ///
    /// Big numbers default to one so their non-null paths run.
    #[must_use]
    pub fn default_value(self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::I8 => Value::I8(0),
            Self::I16 => Value::I16(0),
            Self::I32 => Value::I32(0),
            Self::I64 => Value::I64(0),
            Self::I128 => Value::I128(0),
            Self::Isize => Value::Isize(0),
            Self::U8 => Value::U8(0),
            Self::U16 => Value::U16(0),
            Self::U32 => Value::U32(0),
            Self::U64 => Value::U64(0),
            Self::U128 => Value::U128(0),
            Self::Usize => Value::Usize(0),
            Self::F32 => Value::F32(0.0),
            Self::F64 => Value::F64(0.0),
            Self::Char => Value::Char('\0'),
            Self::Text => Value::Text(String::new()),
            Self::BigInt => Value::BigInt(BigInt::one()),
            Self::BigDecimal => Value::BigDecimal(BigDecimal::one()),
        }
    }
}

/// Default for a type identifier such as `"i32"` or `"BigInt"`.
pub fn default_for_type_name(name: &str) -> Option<Value> {
    name.parse::<ScalarKind>().ok().map(ScalarKind::default_value)
}

/// Produce a fresh setter argument of `value_type`.
///
/// An enum with no values fails with [`Error::IndexOutOfRange`]; an opaque
/// type nobody can stand in for fails with [`Error::MissingStandIn`].
pub fn synthesize_value(value_type: &ValueType, stand_ins: &dyn StandInSource) -> Result<Value> {
    match value_type {
        ValueType::Enum(ty) => first_variant(ty),
        ValueType::Scalar(kind) => Ok(kind.default_value()),
        ValueType::Array(element) => Ok(Value::Array(ArrayValue::empty(element.as_ref().clone()))),
        ValueType::Optional(inner) => {
            synthesize_value(inner, stand_ins).map(|value| Value::Optional(Some(Box::new(value))))
        }
        ValueType::Opaque(ty) => stand_ins
            .stand_in(ty)
            .map(Value::Opaque)
            .ok_or(Error::MissingStandIn {
                type_name: ty.name(),
            }),
    }
}

fn first_variant(ty: &EnumType) -> Result<Value> {
    ty.variants()
        .first()
        .map(|&name| {
            Value::Enum(EnumValue {
                type_name: ty.name(),
                index: 0,
                name,
            })
        })
        .ok_or(Error::IndexOutOfRange {
            type_name: ty.name(),
            index: 0,
            len: ty.variants().len(),
        })
}
