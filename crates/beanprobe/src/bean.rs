//! Bean introspection.
//!
//! A type opts in by implementing [`Bean`] and registering its accessors by
//! property name. [`Introspector`] pairs getters with setters into
//! [`PropertyDescriptor`]s, in first-registration order.

use std::{any::type_name, fmt};

use crate::{
    error::IntrospectionError,
    selection::CLASS_PROPERTY,
    value::{BeanValue, Value, ValueType},
};

/// Failure raised by a bean's own accessor.
pub type BeanFailure = anyhow::Error;

/// A type whose accessor pairs can be exercised.
///
/// ```ignore
/// impl Bean for Account {
///     fn describe(accessors: &mut Accessors<Self>) {
///         accessors
///             .property("owner", |a: &Self| a.owner.clone(), |a, v| a.owner = v)
///             .getter("balance", |a: &Self| a.balance);
///     }
/// }
/// ```
pub trait Bean: Sized + 'static {
    fn describe(accessors: &mut Accessors<Self>);
}

type Getter<B> = Box<dyn Fn(&B) -> Result<Value, BeanFailure>>;
type Setter<B> = Box<dyn Fn(&mut B, Value) -> Result<(), InvocationError>>;

/// Why an accessor call did not complete.
#[derive(Debug)]
pub(crate) enum InvocationError {
    /// The bean's own code failed
    Failed(BeanFailure),
    /// The call never reached the bean
    Inaccessible(String),
}

enum Accessor<B> {
    Getter(Getter<B>),
    Setter(Setter<B>),
}

struct Registration<B> {
    name: String,
    value_type: ValueType,
    accessor: Accessor<B>,
}

/// Accessor registrations collected from [`Bean::describe`].
pub struct Accessors<B> {
    registrations: Vec<Registration<B>>,
}

impl<B: 'static> Accessors<B> {
    fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    pub fn getter<T, G>(&mut self, name: impl Into<String>, get: G) -> &mut Self
    where
        T: BeanValue,
        G: Fn(&B) -> T + 'static,
    {
        self.try_getter(name, move |bean: &B| Ok(get(bean)))
    }

    /// A getter that may fail with the bean's own error.
    pub fn try_getter<T, G>(&mut self, name: impl Into<String>, get: G) -> &mut Self
    where
        T: BeanValue,
        G: Fn(&B) -> Result<T, BeanFailure> + 'static,
    {
        self.registrations.push(Registration {
            name: name.into(),
            value_type: T::value_type(),
            accessor: Accessor::Getter(Box::new(move |bean: &B| get(bean).map(T::into_value))),
        });
        self
    }

    pub fn setter<T, S>(&mut self, name: impl Into<String>, set: S) -> &mut Self
    where
        T: BeanValue,
        S: Fn(&mut B, T) + 'static,
    {
        self.try_setter(name, move |bean: &mut B, value: T| {
            set(bean, value);
            Ok(())
        })
    }

    /// A setter that may fail with the bean's own error.
    pub fn try_setter<T, S>(&mut self, name: impl Into<String>, set: S) -> &mut Self
    where
        T: BeanValue,
        S: Fn(&mut B, T) -> Result<(), BeanFailure> + 'static,
    {
        self.registrations.push(Registration {
            name: name.into(),
            value_type: T::value_type(),
            accessor: Accessor::Setter(Box::new(
                move |bean: &mut B, value: Value| -> Result<(), InvocationError> {
                    let kind = value.kind();
                    let typed = T::from_value(value).ok_or_else(|| {
                        InvocationError::Inaccessible(format!(
                            "setter expects {} but was handed {kind}",
                            T::value_type()
                        ))
                    })?;
                    set(bean, typed).map_err(InvocationError::Failed)
                },
            )),
        });
        self
    }

    /// Getter and setter for the same property.
    pub fn property<T, G, S>(&mut self, name: impl Into<String>, get: G, set: S) -> &mut Self
    where
        T: BeanValue,
        G: Fn(&B) -> T + 'static,
        S: Fn(&mut B, T) + 'static,
    {
        let name = name.into();
        self.getter(name.clone(), get).setter(name, set)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

/// A named property with its declared type and whichever accessors exist.
pub struct PropertyDescriptor<B> {
    name: String,
    value_type: ValueType,
    getter: Option<Getter<B>>,
    setter: Option<Setter<B>>,
}

impl<B> PropertyDescriptor<B> {
    fn from_registration(registration: Registration<B>) -> Self {
        let (getter, setter) = match registration.accessor {
            Accessor::Getter(getter) => (Some(getter), None),
            Accessor::Setter(setter) => (None, Some(setter)),
        };
        Self {
            name: registration.name,
            value_type: registration.value_type,
            getter,
            setter,
        }
    }

    fn merge(&mut self, registration: Registration<B>) -> Result<(), IntrospectionError> {
        let is_getter = matches!(registration.accessor, Accessor::Getter(_));
        if is_getter && self.getter.is_some() {
            return Err(IntrospectionError::DuplicateGetter(self.name.clone()));
        }
        if !is_getter && self.setter.is_some() {
            return Err(IntrospectionError::DuplicateSetter(self.name.clone()));
        }
        if registration.value_type != self.value_type {
            let (getter, setter) = if is_getter {
                (&registration.value_type, &self.value_type)
            } else {
                (&self.value_type, &registration.value_type)
            };
            return Err(IntrospectionError::TypeMismatch {
                property: self.name.clone(),
                getter: getter.to_string(),
                setter: setter.to_string(),
            });
        }

        match registration.accessor {
            Accessor::Getter(getter) => self.getter = Some(getter),
            Accessor::Setter(setter) => self.setter = Some(setter),
        }
        Ok(())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    #[must_use]
    pub const fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    /// Both accessors exist.
    #[must_use]
    pub const fn is_testable(&self) -> bool {
        self.is_readable() && self.is_writable()
    }

    pub(crate) fn read(&self, bean: &B) -> Result<Value, InvocationError> {
        self.getter.as_ref().map_or_else(
            || Err(InvocationError::Inaccessible(format!("`{}` has no getter", self.name))),
            |getter| getter(bean).map_err(InvocationError::Failed),
        )
    }

    pub(crate) fn write(&self, bean: &mut B, value: Value) -> Result<(), InvocationError> {
        self.setter.as_ref().map_or_else(
            || Err(InvocationError::Inaccessible(format!("`{}` has no setter", self.name))),
            |setter| setter(bean, value),
        )
    }
}

impl<B> fmt::Debug for PropertyDescriptor<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .finish()
    }
}

/// Properties discovered on a bean type.
pub struct BeanInfo<B> {
    type_name: &'static str,
    properties: Vec<PropertyDescriptor<B>>,
}

impl<B> BeanInfo<B> {
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// All properties, in discovery order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyDescriptor<B>] {
        &self.properties
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor<B>> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Properties with both accessors, in discovery order.
    pub fn testable(&self) -> impl Iterator<Item = &PropertyDescriptor<B>> {
        self.properties.iter().filter(|p| p.is_testable())
    }
}

impl<B> fmt::Debug for BeanInfo<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanInfo")
            .field("type_name", &self.type_name)
            .field("properties", &self.properties)
            .finish()
    }
}

/// Turns a [`Bean`]'s accessor registrations into a [`BeanInfo`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Introspector;

impl Introspector {
    pub fn introspect<B: Bean>() -> Result<BeanInfo<B>, IntrospectionError> {
        let mut accessors = Accessors::new();
        B::describe(&mut accessors);

        let mut properties: Vec<PropertyDescriptor<B>> = Vec::new();
        for registration in accessors.registrations {
            if registration.name.is_empty() {
                return Err(IntrospectionError::EmptyName);
            }
            match properties.iter_mut().find(|p| p.name == registration.name) {
                Some(existing) => existing.merge(registration)?,
                None => properties.push(PropertyDescriptor::from_registration(registration)),
            }
        }

        if !properties.iter().any(|p| p.name == CLASS_PROPERTY) {
            properties.insert(0, class_property::<B>());
        }

        tracing::debug!(
            bean = type_name::<B>(),
            properties = properties.len(),
            testable = properties.iter().filter(|p| p.is_testable()).count(),
            "introspected bean"
        );

        Ok(BeanInfo {
            type_name: type_name::<B>(),
            properties,
        })
    }
}

fn class_property<B: 'static>() -> PropertyDescriptor<B> {
    PropertyDescriptor {
        name: CLASS_PROPERTY.to_string(),
        value_type: String::value_type(),
        getter: Some(Box::new(|_: &B| -> Result<Value, BeanFailure> {
            Ok(Value::Text(type_name::<B>().to_string()))
        })),
        setter: None,
    }
}
