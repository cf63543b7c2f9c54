//! Selection stages.
//!
//! A stage takes the current [`Selection`] and produces the next one. Two
//! stages ship with the crate:
//! - [`DayFilter`] drops cases whose schedule keeps them off today's run
//! - [`ParamGrouper`] folds cases into named groups by their resolved values
//!
//! Stages compose sequentially in a [`Pipeline`](crate::Pipeline), each one
//! consuming the previous one's output. Custom stages are just
//! implementations of [`SelectionStage`]; a closure over a selection works
//! too.

mod date;
pub use date::*;

mod group;
pub use group::*;

/// The value threaded between stages.
///
/// A stage either narrows the case list ([`Selection::Cases`]) or folds it
/// into named groups ([`Selection::Groups`]). The pipeline does not care
/// which one a stage produced; a later stage sees the underlying case
/// sequence either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<'t, Case> {
    /// A filtered, ordered sequence of cases.
    Cases(Vec<&'t Case>),
    /// Cases folded into named groups.
    Groups(ParamGroups<'t, Case>),
}

impl<'t, Case> Selection<'t, Case> {
    /// The case sequence behind this selection.
    ///
    /// For a grouped selection this is the full roster the grouping stage
    /// saw, in its original order.
    pub fn cases(&self) -> &[&'t Case] {
        match self {
            Selection::Cases(cases) => cases,
            Selection::Groups(groups) => groups.cases(),
        }
    }

    pub fn into_cases(self) -> Vec<&'t Case> {
        match self {
            Selection::Cases(cases) => cases,
            Selection::Groups(groups) => groups.into_cases(),
        }
    }

    /// The grouping result, if the last stage was a grouping stage.
    pub fn groups(&self) -> Option<&ParamGroups<'t, Case>> {
        match self {
            Selection::Cases(_) => None,
            Selection::Groups(groups) => Some(groups),
        }
    }

    pub fn into_groups(self) -> Option<ParamGroups<'t, Case>> {
        match self {
            Selection::Cases(_) => None,
            Selection::Groups(groups) => Some(groups),
        }
    }

    pub fn len(&self) -> usize {
        self.cases().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases().is_empty()
    }
}

impl<'t, Case> From<Vec<&'t Case>> for Selection<'t, Case> {
    fn from(cases: Vec<&'t Case>) -> Self {
        Selection::Cases(cases)
    }
}

/// A single selection step.
///
/// Everything a stage may do is expressed by one operation: turn the current
/// selection into the next one. A stage must not panic on structurally valid
/// input; unusable annotation or parameter data reads as "no constraint"
/// rather than an error.
pub trait SelectionStage<Case> {
    fn apply<'t>(&self, input: Selection<'t, Case>) -> Selection<'t, Case>;
}

impl<Case, F> SelectionStage<Case> for F
where
    F: for<'t> Fn(Selection<'t, Case>) -> Selection<'t, Case>,
{
    fn apply<'t>(&self, input: Selection<'t, Case>) -> Selection<'t, Case> {
        self(input)
    }
}
