//! Dynamic values passed through the erased accessors.
//!
//! Setters and getters registered on a [`Bean`](crate::Bean) are typed; the
//! tester only ever sees [`Value`] and [`ValueType`]. [`BeanValue`] is the
//! bridge between the two.

use std::{
    any::{type_name, Any, TypeId},
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    fmt,
    hash::BuildHasher,
};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantArray, VariantNames};

// ═══════════════════════════════════════════════════════════════════════════
// VALUE TYPES
// ═══════════════════════════════════════════════════════════════════════════

/// Well-known scalar types with a canonical default.
///
/// The string form is the type identifier used for lookups
/// (`"i32".parse::<ScalarKind>()`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Char,
    #[strum(serialize = "String")]
    Text,
    #[strum(serialize = "BigInt")]
    BigInt,
    #[strum(serialize = "BigDecimal")]
    BigDecimal,
}

/// An enum type: its name and the ordered list of its legal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumType {
    name: &'static str,
    variants: &'static [&'static str],
}

impl EnumType {
    #[must_use]
    pub const fn new(name: &'static str, variants: &'static [&'static str]) -> Self {
        Self { name, variants }
    }

    /// Describe an enum through its strum variant names.
    #[must_use]
    pub fn of<T: VariantNames + 'static>() -> Self {
        Self::new(type_name::<T>(), <T as VariantNames>::VARIANTS)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn variants(&self) -> &'static [&'static str] {
        self.variants
    }
}

type DefaultFactory = fn() -> Box<dyn Any>;

/// A type with no simpler representation. Values of it come from a
/// [`StandInSource`](crate::StandInSource).
#[derive(Clone, Copy)]
pub struct OpaqueType {
    name: &'static str,
    type_id: TypeId,
    default: Option<DefaultFactory>,
}

fn make_default<T: Default + Any>() -> Box<dyn Any> {
    Box::new(T::default())
}

impl OpaqueType {
    /// An opaque type that needs a registered stand-in.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            name: type_name::<T>(),
            type_id: TypeId::of::<T>(),
            default: None,
        }
    }

    /// An opaque type whose `Default` value can stand in for it.
    #[must_use]
    pub fn with_default<T: Default + Any>() -> Self {
        Self {
            default: Some(make_default::<T>),
            ..Self::of::<T>()
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// A fresh default instance, when the type declared one.
    #[must_use]
    pub fn default_value(&self) -> Option<OpaqueValue> {
        self.default
            .map(|factory| OpaqueValue::from_boxed(self.name, factory()))
    }
}

impl PartialEq for OpaqueType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for OpaqueType {}

impl fmt::Debug for OpaqueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueType")
            .field("name", &self.name)
            .field("has_default", &self.has_default())
            .finish()
    }
}

/// Declared type of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    Scalar(ScalarKind),
    Enum(EnumType),
    Array(Box<ValueType>),
    Optional(Box<ValueType>),
    Opaque(OpaqueType),
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Enum(ty) => write!(f, "enum {}", ty.name()),
            Self::Array(element) => write!(f, "Vec<{element}>"),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
            Self::Opaque(ty) => write!(f, "{}", ty.name()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// VALUES
// ═══════════════════════════════════════════════════════════════════════════

/// One value of an enum type, identified by its position in the declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumValue {
    pub type_name: &'static str,
    pub index: usize,
    pub name: &'static str,
}

/// An array value. Carries its element type so empty arrays stay typed.
#[derive(Debug, PartialEq)]
pub struct ArrayValue {
    pub element: ValueType,
    pub items: Vec<Value>,
}

impl ArrayValue {
    #[must_use]
    pub const fn empty(element: ValueType) -> Self {
        Self {
            element,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A boxed value of an opaque type.
///
/// Compares by identity: equal only when both hold the same allocation.
/// Zero-sized values never allocate, so any two values of the same
/// zero-sized type compare equal.
pub struct OpaqueValue {
    type_name: &'static str,
    inner: Box<dyn Any>,
}

impl OpaqueValue {
    #[must_use]
    pub fn new<T: Any>(value: T) -> Self {
        Self::from_boxed(type_name::<T>(), Box::new(value))
    }

    #[must_use]
    pub fn from_boxed(type_name: &'static str, inner: Box<dyn Any>) -> Self {
        Self { type_name, inner }
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    /// Recover the typed value, handing `self` back on a type mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        self.inner
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|inner| Self { type_name, inner })
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        let (this, that): (&dyn Any, &dyn Any) = (&*self.inner, &*other.inner);
        Any::type_id(this) == Any::type_id(that) && std::ptr::addr_eq(this, that)
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OpaqueValue").field(&self.type_name).finish()
    }
}

/// Erased value handed to setters and returned by getters.
#[derive(Debug, PartialEq, IntoStaticStr)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
    F32(f32),
    F64(f64),
    Char(char),
    Text(String),
    BigInt(BigInt),
    BigDecimal(BigDecimal),
    Enum(EnumValue),
    Array(ArrayValue),
    Optional(Option<Box<Value>>),
    Opaque(OpaqueValue),
}

impl Value {
    /// Variant name, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TYPED <-> ERASED
// ═══════════════════════════════════════════════════════════════════════════

/// A Rust type usable as a bean property.
pub trait BeanValue: Sized + 'static {
    /// The declared type setters of this type accept.
    fn value_type() -> ValueType;

    fn into_value(self) -> Value;

    /// `None` when `value` is not of this type.
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! scalar_bean_value {
    ($($ty:ty => $kind:ident),+ $(,)?) => {$(
        impl BeanValue for $ty {
            fn value_type() -> ValueType {
                ValueType::Scalar(ScalarKind::$kind)
            }

            fn into_value(self) -> Value {
                Value::$kind(self)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$kind(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    )+};
}

scalar_bean_value!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    char => Char,
    String => Text,
    BigInt => BigInt,
    BigDecimal => BigDecimal,
);

impl<T: BeanValue> BeanValue for Vec<T> {
    fn value_type() -> ValueType {
        ValueType::Array(Box::new(T::value_type()))
    }

    fn into_value(self) -> Value {
        Value::Array(ArrayValue {
            element: T::value_type(),
            items: self.into_iter().map(BeanValue::into_value).collect(),
        })
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(array) if array.element == T::value_type() => {
                array.items.into_iter().map(T::from_value).collect()
            }
            _ => None,
        }
    }
}

impl<T: BeanValue> BeanValue for Option<T> {
    fn value_type() -> ValueType {
        ValueType::Optional(Box::new(T::value_type()))
    }

    fn into_value(self) -> Value {
        Value::Optional(self.map(|inner| Box::new(inner.into_value())))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Optional(Some(inner)) => T::from_value(*inner).map(Some),
            Value::Optional(None) => Some(None),
            _ => None,
        }
    }
}

impl<K: 'static, V: 'static, S: BuildHasher + Default + 'static> BeanValue for HashMap<K, V, S> {
    fn value_type() -> ValueType {
        ValueType::Opaque(OpaqueType::with_default::<Self>())
    }

    fn into_value(self) -> Value {
        Value::Opaque(OpaqueValue::new(self))
    }

    fn from_value(value: Value) -> Option<Self> {
        opaque_from_value(value)
    }
}

impl<T: 'static, S: BuildHasher + Default + 'static> BeanValue for HashSet<T, S> {
    fn value_type() -> ValueType {
        ValueType::Opaque(OpaqueType::with_default::<Self>())
    }

    fn into_value(self) -> Value {
        Value::Opaque(OpaqueValue::new(self))
    }

    fn from_value(value: Value) -> Option<Self> {
        opaque_from_value(value)
    }
}

impl<K: 'static, V: 'static> BeanValue for BTreeMap<K, V> {
    fn value_type() -> ValueType {
        ValueType::Opaque(OpaqueType::with_default::<Self>())
    }

    fn into_value(self) -> Value {
        Value::Opaque(OpaqueValue::new(self))
    }

    fn from_value(value: Value) -> Option<Self> {
        opaque_from_value(value)
    }
}

impl<T: 'static> BeanValue for BTreeSet<T> {
    fn value_type() -> ValueType {
        ValueType::Opaque(OpaqueType::with_default::<Self>())
    }

    fn into_value(self) -> Value {
        Value::Opaque(OpaqueValue::new(self))
    }

    fn from_value(value: Value) -> Option<Self> {
        opaque_from_value(value)
    }
}

/// Erase a unit enum variant. Used by [`bean_enum!`](crate::bean_enum).
pub fn enum_into_value<T>(variant: &T) -> Value
where
    T: VariantArray + VariantNames + PartialEq,
{
    let index = <T as VariantArray>::VARIANTS
        .iter()
        .position(|candidate| candidate == variant)
        .unwrap_or_default();
    Value::Enum(EnumValue {
        type_name: type_name::<T>(),
        index,
        name: <T as VariantNames>::VARIANTS
            .get(index)
            .copied()
            .unwrap_or_default(),
    })
}

/// Recover a unit enum variant. Used by [`bean_enum!`](crate::bean_enum).
pub fn enum_from_value<T>(value: Value) -> Option<T>
where
    T: VariantArray + Clone,
{
    match value {
        Value::Enum(variant) if variant.type_name == type_name::<T>() => {
            <T as VariantArray>::VARIANTS.get(variant.index).cloned()
        }
        _ => None,
    }
}

/// Recover an opaque value. Used by [`bean_opaque!`](crate::bean_opaque).
pub fn opaque_from_value<T: Any>(value: Value) -> Option<T> {
    match value {
        Value::Opaque(opaque) => opaque.downcast().ok(),
        _ => None,
    }
}

/// Implement [`BeanValue`] for unit-only enums deriving strum's
/// `VariantArray` and `VariantNames` (plus `Clone` and `PartialEq`).
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, VariantArray, VariantNames)]
/// enum Color { Red, Green }
/// beanprobe::bean_enum!(Color);
/// ```
#[macro_export]
macro_rules! bean_enum {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::BeanValue for $ty {
            fn value_type() -> $crate::ValueType {
                $crate::ValueType::Enum($crate::EnumType::of::<$ty>())
            }

            fn into_value(self) -> $crate::Value {
                $crate::value::enum_into_value(&self)
            }

            fn from_value(value: $crate::Value) -> ::std::option::Option<Self> {
                $crate::value::enum_from_value(value)
            }
        }
    )+};
}

/// Implement [`BeanValue`] for an opaque type.
///
/// `bean_opaque!(T)` needs a stand-in registered on the tester;
/// `bean_opaque!(default: T)` falls back to `T::default()`.
#[macro_export]
macro_rules! bean_opaque {
    (default: $($ty:ty),+ $(,)?) => {$(
        $crate::bean_opaque!(@impl $ty, $crate::OpaqueType::with_default::<$ty>());
    )+};
    (@impl $ty:ty, $opaque:expr) => {
        impl $crate::BeanValue for $ty {
            fn value_type() -> $crate::ValueType {
                $crate::ValueType::Opaque($opaque)
            }

            fn into_value(self) -> $crate::Value {
                $crate::Value::Opaque($crate::OpaqueValue::new(self))
            }

            fn from_value(value: $crate::Value) -> ::std::option::Option<Self> {
                $crate::value::opaque_from_value(value)
            }
        }
    };
    ($($ty:ty),+ $(,)?) => {$(
        $crate::bean_opaque!(@impl $ty, $crate::OpaqueType::of::<$ty>());
    )+};
}
