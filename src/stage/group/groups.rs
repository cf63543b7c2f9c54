use std::borrow::Cow;

/// The outcome of a grouping stage.
///
/// Holds the members of every declared group, the cases no group claimed,
/// and the full roster the stage saw. A case sits either in the unmatched
/// list or in at least one group, never both; a case matching several groups
/// appears once in each of them. The roster keeps every case exactly once,
/// in input order, so a pipeline can keep threading after a grouping stage
/// and a host can put the full (now tagged) list back in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamGroups<'t, Case> {
    groups: Vec<(Cow<'static, str>, Vec<&'t Case>)>,
    unmatched: Vec<&'t Case>,
    cases: Vec<&'t Case>,
}

impl<'t, Case> ParamGroups<'t, Case> {
    pub(crate) fn new(
        groups: Vec<(Cow<'static, str>, Vec<&'t Case>)>,
        unmatched: Vec<&'t Case>,
        cases: Vec<&'t Case>,
    ) -> Self {
        Self {
            groups,
            unmatched,
            cases,
        }
    }

    /// Members of one group, in input order. `None` for a name the map never
    /// declared.
    pub fn group(&self, name: &str) -> Option<&[&'t Case]> {
        self.groups
            .iter()
            .find(|(n, _)| n.as_ref() == name)
            .map(|(_, members)| members.as_slice())
    }

    /// All groups in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'t Case])> {
        self.groups
            .iter()
            .map(|(name, members)| (name.as_ref(), members.as_slice()))
    }

    /// Declared group names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_ref())
    }

    /// Cases no group claimed.
    pub fn unmatched(&self) -> &[&'t Case] {
        &self.unmatched
    }

    /// Every case the stage saw, in input order.
    pub fn cases(&self) -> &[&'t Case] {
        &self.cases
    }

    pub(crate) fn into_cases(self) -> Vec<&'t Case> {
        self.cases
    }

    /// Number of declared groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
