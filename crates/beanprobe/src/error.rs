//! Error types for beanprobe with categorization:
//!
//! - **Invalid argument**: null object under test, wrong-mode selection
//!   calls, introspection and config failures
//! - **Bean failures**: whatever the bean's own accessor returned, passed
//!   through untouched
//! - **Degenerate fixtures**: enums without values, opaque types nobody can
//!   stand in for

use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller handed the tester something it cannot work with
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    /// A getter or setter of the object under test failed.
    ///
    /// Display and downcasting see the bean's original failure.
    #[error(transparent)]
    Bean(anyhow::Error),

    /// An enum setter argument was requested from an enum with no values
    #[error("index {index} out of range: enum `{type_name}` declares {len} values")]
    IndexOutOfRange {
        type_name: &'static str,
        index: usize,
        len: usize,
    },

    /// No placeholder could be produced for an opaque setter argument
    #[error("no stand-in available for opaque type `{type_name}`")]
    MissingStandIn { type_name: &'static str },
}

impl Error {
    /// True for every failure raised synchronously against the caller's input.
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// The bean's own failure, if this error carries one.
    pub const fn bean_failure(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Bean(failure) => Some(failure),
            _ => None,
        }
    }

    /// Unwraps the bean's own failure so callers can downcast it by value.
    pub fn into_bean_failure(self) -> std::result::Result<anyhow::Error, Self> {
        match self {
            Self::Bean(failure) => Ok(failure),
            other => Err(other),
        }
    }
}

/// Rejected input, raised before any accessor runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    #[error("Object under test must not be null")]
    NullObject,

    #[error("Cannot accept exclusion properties in INCLUDE mode")]
    ExclusionInIncludeMode,

    #[error("Cannot accept inclusion properties in EXCLUDE mode")]
    InclusionInExcludeMode,

    #[error("cannot introspect bean: {0}")]
    Introspection(#[from] IntrospectionError),

    #[error("invalid selection config: {0}")]
    Config(String),
}

/// Why a bean's accessor registrations could not be turned into properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntrospectionError {
    #[error("property name must not be empty")]
    EmptyName,

    #[error("property `{0}` registers more than one getter")]
    DuplicateGetter(String),

    #[error("property `{0}` registers more than one setter")]
    DuplicateSetter(String),

    #[error("property `{property}` getter returns {getter} but setter accepts {setter}")]
    TypeMismatch {
        property: String,
        getter: String,
        setter: String,
    },
}

impl From<toml::de::Error> for InvalidArgument {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::InvalidArgument(err.into())
    }
}

/// Result type alias for beanprobe operations
pub type Result<T> = std::result::Result<T, Error>;
