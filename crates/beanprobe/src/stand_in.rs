//! Placeholder values for opaque setter arguments.
//!
//! The tester never calls into a synthesized argument; it only passes it
//! through the setter. Anything of the right type will do.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
};

use crate::value::{OpaqueType, OpaqueValue};

/// Produces a placeholder of an arbitrary opaque type.
pub trait StandInSource {
    /// `None` when this source cannot produce `ty`.
    fn stand_in(&self, ty: &OpaqueType) -> Option<OpaqueValue>;
}

type Factory = Box<dyn Fn() -> Box<dyn Any>>;

/// Registry of stand-in factories keyed by type.
///
/// Types without a registered factory fall back to their own default
/// (see [`OpaqueType::with_default`]).
#[derive(Default)]
pub struct StandIns {
    factories: HashMap<TypeId, Factory>,
}

impl StandIns {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` for `T`, replacing any earlier one.
    pub fn register<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Any,
        F: Fn() -> T + 'static,
    {
        self.factories.insert(
            TypeId::of::<T>(),
            Box::new(move || Box::new(factory()) as Box<dyn Any>),
        );
        self
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with<T, F>(mut self, factory: F) -> Self
    where
        T: Any,
        F: Fn() -> T + 'static,
    {
        self.register::<T, F>(factory);
        self
    }

    #[must_use]
    pub fn contains(&self, ty: &OpaqueType) -> bool {
        self.factories.contains_key(&ty.type_id())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl StandInSource for StandIns {
    fn stand_in(&self, ty: &OpaqueType) -> Option<OpaqueValue> {
        self.factories.get(&ty.type_id()).map_or_else(
            || ty.default_value(),
            |factory| Some(OpaqueValue::from_boxed(ty.name(), factory())),
        )
    }
}

impl fmt::Debug for StandIns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandIns")
            .field("factories", &self.factories.len())
            .finish()
    }
}
