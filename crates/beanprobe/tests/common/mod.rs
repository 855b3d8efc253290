//! Shared fixtures for beanprobe integration tests.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    dead_code,
    // Test code ergonomics
    clippy::too_many_lines,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::needless_pass_by_value
)]

use std::{cell::RefCell, collections::HashMap};

use beanprobe::{bean_enum, bean_opaque, Accessors, Bean, BeanFailure};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use strum::{VariantArray, VariantNames};

/// Route tracing output through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, VariantArray, VariantNames)]
pub enum TestEnum {
    Red,
    Green,
}

/// An enum with no values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoEnum {}

impl VariantArray for NoEnum {
    const VARIANTS: &'static [Self] = &[];
}

impl VariantNames for NoEnum {
    const VARIANTS: &'static [&'static str] = &[];
}

bean_enum!(TestEnum, NoEnum);

/// Opaque type with no default; needs a registered stand-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
}

bean_opaque!(Endpoint);

/// Opaque type whose default stands in for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub retries: u8,
}

bean_opaque!(default: Settings);

/// Bean with one property of each interesting kind.
#[derive(Debug)]
pub struct TestBean {
    pub boolean_prop: bool,
    pub int_prop: i32,
    pub string: String,
    pub big_integer: BigInt,
    pub initial: char,
    pub ratio: f64,
    pub amount: BigDecimal,
    pub map: HashMap<String, String>,
    pub int_array: Vec<i32>,
    pub color: TestEnum,
    pub nothing: Option<NoEnum>,
    pub exception_when_set: f32,
}

impl Default for TestBean {
    fn default() -> Self {
        Self {
            boolean_prop: true,
            int_prop: 42,
            string: "initial".to_string(),
            big_integer: BigInt::from(7),
            initial: 'x',
            ratio: 2.5,
            amount: BigDecimal::from(250),
            map: HashMap::from([("k".to_string(), "v".to_string())]),
            int_array: vec![1, 2, 3],
            color: TestEnum::Green,
            nothing: None,
            exception_when_set: 1.5,
        }
    }
}

impl Bean for TestBean {
    fn describe(accessors: &mut Accessors<Self>) {
        accessors
            .property("booleanProp", |b: &Self| b.boolean_prop, |b, v| b.boolean_prop = v)
            .property("intProp", |b: &Self| b.int_prop, |b, v| b.int_prop = v)
            .property("string", |b: &Self| b.string.clone(), |b, v| b.string = v)
            .property(
                "bigInteger",
                |b: &Self| b.big_integer.clone(),
                |b, v| b.big_integer = v,
            )
            .property("initial", |b: &Self| b.initial, |b, v| b.initial = v)
            .property("ratio", |b: &Self| b.ratio, |b, v| b.ratio = v)
            .property("amount", |b: &Self| b.amount.clone(), |b, v| b.amount = v)
            .property("map", |b: &Self| b.map.clone(), |b, v| b.map = v)
            .property(
                "intArray",
                |b: &Self| b.int_array.clone(),
                |b, v| b.int_array = v,
            )
            .property("color", |b: &Self| b.color, |b, v| b.color = v)
            .getter("nothing", |b: &Self| {
                b.nothing.unwrap_or_else(|| unreachable!("no NoEnum value exists"))
            })
            .setter("nothing", |b: &mut Self, v: NoEnum| b.nothing = Some(v))
            .try_getter("exceptionWithGet", |_: &Self| -> Result<f32, BeanFailure> {
                Err(anyhow::anyhow!("getException"))
            })
            .setter("exceptionWithGet", |_: &mut Self, _: f32| {})
            .getter("exceptionWhenSet", |b: &Self| b.exception_when_set)
            .try_setter("exceptionWhenSet", |b: &mut Self, v: f32| {
                b.exception_when_set = v;
                Err(anyhow::anyhow!("setException"))
            })
            .getter("readOnly", |b: &Self| b.int_prop * 2);
    }
}

/// Properties of [`TestBean`] that execute cleanly.
pub const CLEAN_PROPERTIES: &[&str] = &[
    "booleanProp",
    "intProp",
    "string",
    "bigInteger",
    "initial",
    "ratio",
    "amount",
    "map",
    "intArray",
    "color",
];

/// Properties of [`TestBean`] that fail on purpose.
pub const FAILING_PROPERTIES: &[&str] = &["nothing", "exceptionWithGet", "exceptionWhenSet"];

/// Bean that logs every accessor call it receives.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: RefCell<Vec<String>>,
    pub alpha: i64,
    pub beta: String,
    pub gamma: bool,
}

impl Recorder {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_string());
    }
}

impl Bean for Recorder {
    fn describe(accessors: &mut Accessors<Self>) {
        accessors
            .property(
                "alpha",
                |r: &Self| {
                    r.record("getAlpha");
                    r.alpha
                },
                |r, v| {
                    r.record("setAlpha");
                    r.alpha = v;
                },
            )
            .property(
                "beta",
                |r: &Self| {
                    r.record("getBeta");
                    r.beta.clone()
                },
                |r, v| {
                    r.record("setBeta");
                    r.beta = v;
                },
            )
            .property(
                "gamma",
                |r: &Self| {
                    r.record("getGamma");
                    r.gamma
                },
                |r, v| {
                    r.record("setGamma");
                    r.gamma = v;
                },
            );
    }
}

/// Bean that declares its own `class` property, which must never run in
/// exclude mode.
#[derive(Debug, Default)]
pub struct Classy {
    pub name: String,
}

impl Bean for Classy {
    fn describe(accessors: &mut Accessors<Self>) {
        accessors
            .getter("class", |_: &Self| -> String { panic!("class getter invoked") })
            .setter("class", |_: &mut Self, _: String| panic!("class setter invoked"))
            .property("name", |c: &Self| c.name.clone(), |c, v| c.name = v);
    }
}

/// Bean with opaque-typed properties.
#[derive(Debug)]
pub struct Service {
    pub endpoint: Endpoint,
    pub settings: Settings,
    pub fallback: Option<Settings>,
}

impl Default for Service {
    fn default() -> Self {
        Self {
            endpoint: Endpoint {
                url: "http://localhost".into(),
            },
            settings: Settings { retries: 3 },
            fallback: None,
        }
    }
}

impl Bean for Service {
    fn describe(accessors: &mut Accessors<Self>) {
        accessors
            .property(
                "endpoint",
                |s: &Self| s.endpoint.clone(),
                |s, v| s.endpoint = v,
            )
            .property(
                "settings",
                |s: &Self| s.settings.clone(),
                |s, v| s.settings = v,
            )
            .property(
                "fallback",
                |s: &Self| s.fallback.clone(),
                |s, v| s.fallback = v,
            );
    }
}

/// Bean whose accessors cannot be paired.
pub struct Broken;

impl Bean for Broken {
    fn describe(accessors: &mut Accessors<Self>) {
        accessors
            .getter("size", |_: &Self| 0_u32)
            .setter("size", |_: &mut Self, _: i64| {});
    }
}
