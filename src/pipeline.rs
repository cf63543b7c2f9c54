use std::fmt::{self, Debug};

use crate::stage::{Selection, SelectionStage};

/// An ordered chain of selection stages.
///
/// [`Pipeline::apply`] feeds the host's collected cases to the first stage
/// and each stage's output to the next, returning whatever the last stage
/// produced. Stages run strictly in insertion order, one at a time; with no
/// stages the input comes back untouched.
///
/// A pipeline is exclusively owned by the invocation that built it and holds
/// no state across `apply` calls.
pub struct Pipeline<Case> {
    stages: Vec<Box<dyn SelectionStage<Case>>>,
}

impl<Case> Pipeline<Case> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage to the end of the chain.
    pub fn push(&mut self, stage: impl SelectionStage<Case> + 'static) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Drop all stages.
    pub fn clear(&mut self) {
        self.stages.clear();
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage over `cases`.
    pub fn apply<'t>(&self, cases: &'t [Case]) -> Selection<'t, Case> {
        let mut selection = Selection::Cases(cases.iter().collect());
        for stage in &self.stages {
            selection = stage.apply(selection);
        }
        selection
    }
}

impl<Case> Default for Pipeline<Case> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Case> Debug for Pipeline<Case> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stages.len())
            .finish()
    }
}
