use std::borrow::Cow;

use crate::{
    param::{Parametrized, Params},
    schedule::{RunDays, Scheduled},
};

/// Read access to a case's stable identifier.
pub trait Named {
    fn name(&self) -> &str;
}

/// A collected test case, as handed over by the host runner.
///
/// This is the ready-made descriptor for hosts without their own item type.
/// Hosts that already have one implement [`Named`], [`Scheduled`] and
/// [`Parametrized`] on it instead; every stage is generic over the case type,
/// so nothing forces this struct on anyone.
///
/// Selection only reads from a case. Attaching group tags goes through a
/// [`TagSink`](crate::TagSink) the host controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestCase<Extra = ()> {
    /// Stable identifier of the case.
    pub name: Cow<'static, str>,
    /// Day-of-week schedule, if the test author attached one.
    pub run_days: Option<RunDays>,
    /// Resolved parametrization, populated once the host expanded it.
    pub params: Option<Params>,
    /// Resolved fixture values, if the host exposes them.
    pub fixtures: Option<Params>,
    /// Host-defined payload.
    pub extra: Extra,
}

impl<Extra: Default> TestCase<Extra> {
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl<Extra> Named for TestCase<Extra> {
    fn name(&self) -> &str {
        self.name.as_ref()
    }
}

impl<Extra> Scheduled for TestCase<Extra> {
    fn run_days(&self) -> Option<&RunDays> {
        self.run_days.as_ref()
    }
}

impl<Extra> Parametrized for TestCase<Extra> {
    fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    fn fixtures(&self) -> Option<&Params> {
        self.fixtures.as_ref()
    }
}
