//! The accessor tester.
//!
//! ```ignore
//! let mut probe = BeanTester::with_mode(&mut bean, TestMode::Include)?;
//! probe.include_property("owner")?;
//! probe.execute_accessor_tests()?;
//! ```

use std::fmt;

use crate::{
    bean::{Bean, BeanInfo, InvocationError, Introspector, PropertyDescriptor},
    error::{Error, InvalidArgument, Result},
    selection::{Selection, SelectionConfig, TestMode},
    stand_in::{StandInSource, StandIns},
    synthesize::synthesize_value,
};

/// Exercises the accessor pairs of one borrowed object under test.
pub struct BeanTester<'a, B: Bean> {
    out: &'a mut B,
    info: BeanInfo<B>,
    selection: Selection,
    stand_ins: Box<dyn StandInSource>,
}

impl<'a, B: Bean> BeanTester<'a, B> {
    /// Exclude mode: every testable property except `class`.
    pub fn new(out: &'a mut B) -> Result<Self> {
        Self::with_mode(out, TestMode::Exclude)
    }

    pub fn with_mode(out: &'a mut B, mode: TestMode) -> Result<Self> {
        Self::try_new(Some(out), mode)
    }

    /// Fails with [`InvalidArgument::NullObject`] when `out` is `None`, or
    /// with [`InvalidArgument::Introspection`] when `B`'s accessors do not
    /// form valid properties.
    pub fn try_new(out: Option<&'a mut B>, mode: TestMode) -> Result<Self> {
        let out = out.ok_or(InvalidArgument::NullObject)?;
        let info = Introspector::introspect::<B>().map_err(InvalidArgument::from)?;
        Ok(Self {
            out,
            info,
            selection: Selection::new(mode),
            stand_ins: Box::new(StandIns::new()),
        })
    }

    /// Mode and names both come from `config`.
    pub fn from_config(out: &'a mut B, config: &SelectionConfig) -> Result<Self> {
        let mut tester = Self::with_mode(out, config.mode)?;
        tester.selection = config.to_selection();
        Ok(tester)
    }

    /// Replace where opaque setter arguments come from.
    #[must_use]
    pub fn with_stand_ins(mut self, stand_ins: impl StandInSource + 'static) -> Self {
        self.stand_ins = Box::new(stand_ins);
        self
    }

    pub fn exclude_property(&mut self, name: impl Into<String>) -> Result<()> {
        self.selection.exclude(name)
    }

    pub fn include_property(&mut self, name: impl Into<String>) -> Result<()> {
        self.selection.include(name)
    }

    /// Run setter then getter for every selected testable property.
    ///
    /// Stops at the first failure. A failure raised by the bean itself comes
    /// back as [`Error::Bean`], unchanged. Re-running applies the same policy.
    pub fn execute_accessor_tests(&mut self) -> Result<()> {
        let span = tracing::debug_span!(
            "accessor_tests",
            bean = self.info.type_name(),
            mode = %self.selection.mode()
        );
        let _guard = span.enter();

        for property in self.info.testable() {
            if !self.selection.selects(property.name()) {
                tracing::trace!(property = property.name(), "not selected");
                continue;
            }
            exercise(self.out, property, self.stand_ins.as_ref())?;
        }
        Ok(())
    }

    pub fn out(&self) -> &B {
        &*self.out
    }

    pub fn out_mut(&mut self) -> &mut B {
        &mut *self.out
    }

    /// Swap in another object of the same type.
    pub fn set_out(&mut self, out: &'a mut B) {
        self.out = out;
    }

    pub const fn mode(&self) -> TestMode {
        self.selection.mode()
    }

    pub fn is_exclusion_mode(&self) -> bool {
        self.mode() == TestMode::Exclude
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub const fn bean_info(&self) -> &BeanInfo<B> {
        &self.info
    }
}

fn exercise<B>(
    out: &mut B,
    property: &PropertyDescriptor<B>,
    stand_ins: &dyn StandInSource,
) -> Result<()> {
    let value = synthesize_value(property.value_type(), stand_ins)?;

    tracing::debug!(
        property = property.name(),
        value_type = %property.value_type(),
        "invoking setter"
    );
    settle(property, property.write(out, value))?;

    tracing::debug!(property = property.name(), "invoking getter");
    if let Some(value) = settle(property, property.read(out))? {
        tracing::trace!(property = property.name(), ?value, "getter returned");
    }
    Ok(())
}

/// Bean failures surface as-is; calls that never reached the bean are
/// dropped, since only properties with both accessors get this far.
fn settle<B, T>(
    property: &PropertyDescriptor<B>,
    outcome: std::result::Result<T, InvocationError>,
) -> Result<Option<T>> {
    match outcome {
        Ok(value) => Ok(Some(value)),
        Err(InvocationError::Failed(failure)) => Err(Error::Bean(failure)),
        Err(InvocationError::Inaccessible(reason)) => {
            tracing::warn!(property = property.name(), %reason, "accessor not invoked");
            Ok(None)
        }
    }
}

impl<B: Bean> fmt::Debug for BeanTester<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanTester")
            .field("bean", &self.info.type_name())
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}
