//! # Beanprobe
//!
//! Exercises every getter/setter pair a bean exposes so that unit-test
//! suites do not need to hand-write trivial accessor tests.
//!
//! ## Usage
//!
//! ```ignore
//! let mut bean = Account::default();
//! let mut probe = BeanTester::new(&mut bean)?;
//! probe.exclude_property("balance")?;
//! probe.execute_accessor_tests()?;
//! ```
//!
//! A type opts in by implementing [`Bean`], registering its accessors by
//! property name. Arguments for setters are synthesized from the declared
//! value type (see [`synthesize_value`]); anything the bean itself fails
//! with is returned unchanged as [`Error::Bean`].
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` - returns `Result` instead
//! - No `expect()` - returns `Result` instead
//! - No `panic!()` - returns `Result` instead
//! - No `unsafe` - safe Rust only

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod bean;
pub mod error;
pub mod selection;
pub mod stand_in;
pub mod synthesize;
pub mod tester;
pub mod value;

pub use bean::{Accessors, Bean, BeanFailure, BeanInfo, Introspector, PropertyDescriptor};
pub use error::{Error, IntrospectionError, InvalidArgument, Result};
pub use selection::{Selection, SelectionConfig, TestMode, CLASS_PROPERTY};
pub use stand_in::{StandInSource, StandIns};
pub use synthesize::{default_for_type_name, synthesize_value};
pub use tester::BeanTester;
pub use value::{
    ArrayValue, BeanValue, EnumType, EnumValue, OpaqueType, OpaqueValue, ScalarKind, Value,
    ValueType,
};
