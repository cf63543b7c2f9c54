use std::borrow::Cow;

use tracing::debug;

use crate::{
    case::Named,
    param::Parametrized,
    stage::{NoTags, ParamGroups, Selection, SelectionStage, TagSink},
};

/// Declares the grouping buckets: group name → identifier substrings.
///
/// Group names are unique; redefining a name replaces its identifiers.
/// Identifier lists may overlap between groups, so a single value can
/// satisfy several groups at once. The map is immutable once handed to a
/// [`ParamGrouper`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMap {
    groups: Vec<(Cow<'static, str>, Vec<Cow<'static, str>>)>,
}

impl GroupMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group, or redefine its identifiers if the name exists already.
    pub fn group<N, I>(mut self, name: N, identifiers: I) -> Self
    where
        N: Into<Cow<'static, str>>,
        I: IntoIterator,
        I::Item: Into<Cow<'static, str>>,
    {
        let name = name.into();
        let identifiers: Vec<_> = identifiers.into_iter().map(Into::into).collect();
        match self.groups.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = identifiers,
            None => self.groups.push((name, identifiers)),
        }
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub(crate) fn entries(&self) -> &[(Cow<'static, str>, Vec<Cow<'static, str>>)] {
        &self.groups
    }
}

impl<N, I> FromIterator<(N, I)> for GroupMap
where
    N: Into<Cow<'static, str>>,
    I: IntoIterator,
    I::Item: Into<Cow<'static, str>>,
{
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(GroupMap::new(), |map, (name, identifiers)| {
                map.group(name, identifiers)
            })
    }
}

/// What to do with a case that matches more than one group.
///
/// Whether such a case should count for every group it matches or be pinned
/// to a single one is a judgment call; both behaviors exist in the wild.
/// The default records it everywhere, switch to [`GroupPolicy::FirstMatch`]
/// only when downstream tooling needs disjoint buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupPolicy {
    /// Record the case under every group it matches.
    #[default]
    AllMatching,
    /// Record the case only under the first matching group, in map order.
    FirstMatch,
}

/// Folds cases into the buckets of a [`GroupMap`].
///
/// A case matches a group when any of the group's identifiers occurs,
/// case-insensitively, inside the textual form of any of the case's resolved
/// values. Parametrization values are preferred; fixture values are only
/// consulted when no parametrization is present. Cases matching no group end
/// up unmatched, they are never dropped.
#[derive(Debug, Clone)]
pub struct ParamGrouper<Sink = NoTags> {
    map: GroupMap,
    policy: GroupPolicy,
    param: Option<Cow<'static, str>>,
    sink: Sink,
}

impl ParamGrouper {
    pub fn new(map: GroupMap) -> Self {
        Self {
            map,
            policy: GroupPolicy::default(),
            param: None,
            sink: NoTags,
        }
    }
}

impl<Sink> ParamGrouper<Sink> {
    /// Report every (case, group) assignment to `sink`.
    pub fn with_sink<WithSink>(self, sink: WithSink) -> ParamGrouper<WithSink> {
        ParamGrouper {
            map: self.map,
            policy: self.policy,
            param: self.param,
            sink,
        }
    }

    pub fn with_policy(self, policy: GroupPolicy) -> Self {
        Self { policy, ..self }
    }

    /// Only consider the value of one named parameter (or fixture) instead
    /// of scanning all resolved values.
    pub fn for_param(self, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            param: Some(name.into()),
            ..self
        }
    }

    /// The textual forms to match against, already lowercased.
    fn candidate_texts<Case: Parametrized>(&self, case: &Case) -> Vec<String> {
        let source = match case.params() {
            Some(params) if !params.is_empty() => Some(params),
            _ => case.fixtures(),
        };
        let Some(source) = source else {
            return Vec::new();
        };

        match &self.param {
            Some(name) => source
                .get(name)
                .map(|value| vec![value.to_string().to_lowercase()])
                .unwrap_or_default(),
            None => source
                .values()
                .map(|value| value.to_string().to_lowercase())
                .collect(),
        }
    }
}

impl<Case, Sink> SelectionStage<Case> for ParamGrouper<Sink>
where
    Case: Named + Parametrized,
    Sink: TagSink<Case>,
{
    fn apply<'t>(&self, input: Selection<'t, Case>) -> Selection<'t, Case> {
        let cases = input.into_cases();
        let entries = self.map.entries();
        let mut members: Vec<Vec<&'t Case>> = (0..entries.len()).map(|_| Vec::new()).collect();
        let mut unmatched = Vec::new();

        for case in &cases {
            let texts = self.candidate_texts(*case);
            let mut matched = Vec::new();

            for (index, (_, identifiers)) in entries.iter().enumerate() {
                let hit = identifiers.iter().any(|identifier| {
                    let identifier = identifier.to_lowercase();
                    texts.iter().any(|text| text.contains(&identifier))
                });
                if hit {
                    matched.push(index);
                    if matches!(self.policy, GroupPolicy::FirstMatch) {
                        break;
                    }
                }
            }

            if matched.is_empty() {
                unmatched.push(*case);
                continue;
            }

            debug!(
                "'{}' assigned to groups: {:?}",
                case.name(),
                matched
                    .iter()
                    .map(|index| entries[*index].0.as_ref())
                    .collect::<Vec<_>>()
            );
            for index in matched {
                members[index].push(*case);
                self.sink.tag(case, entries[index].0.as_ref());
            }
        }

        let groups = entries
            .iter()
            .map(|(name, _)| name.clone())
            .zip(members)
            .collect();
        Selection::Groups(ParamGroups::new(groups, unmatched, cases))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{case::TestCase, param::Params};

    fn mapping() -> GroupMap {
        GroupMap::new()
            .group("fast", ["quick"])
            .group("slow", ["slow"])
    }

    fn parametrized(name: &'static str, value: &'static str) -> TestCase {
        TestCase {
            params: Some(Params::from_iter([("mode", value)])),
            ..TestCase::named(name)
        }
    }

    fn group_names<'g>(groups: &'g ParamGroups<'_, TestCase>, case: &str) -> Vec<&'g str> {
        groups
            .iter()
            .filter(|(_, members)| members.iter().any(|member| member.name == case))
            .map(|(name, _)| name)
            .collect()
    }

    #[test]
    fn value_lands_in_its_group() {
        let cases = [parametrized("t", "quick_mode")];
        let grouper = ParamGrouper::new(mapping());

        let selection = grouper.apply(Selection::Cases(cases.iter().collect()));
        let groups = selection.into_groups().unwrap();

        assert_eq!(group_names(&groups, "t"), ["fast"]);
        assert!(groups.unmatched().is_empty());
    }

    #[test]
    fn value_may_satisfy_several_groups() {
        let cases = [parametrized("t", "quick_slow_combo")];
        let grouper = ParamGrouper::new(mapping());

        let selection = grouper.apply(Selection::Cases(cases.iter().collect()));
        let groups = selection.into_groups().unwrap();

        assert_eq!(group_names(&groups, "t"), ["fast", "slow"]);
        assert!(groups.unmatched().is_empty());
    }

    #[test]
    fn first_match_pins_to_one_group() {
        let cases = [parametrized("t", "quick_slow_combo")];
        let grouper = ParamGrouper::new(mapping()).with_policy(GroupPolicy::FirstMatch);

        let selection = grouper.apply(Selection::Cases(cases.iter().collect()));
        let groups = selection.into_groups().unwrap();

        assert_eq!(group_names(&groups, "t"), ["fast"]);
    }

    #[test]
    fn unmatched_cases_stay_out_of_every_group() {
        let cases = [parametrized("t", "other")];
        let grouper = ParamGrouper::new(mapping());

        let selection = grouper.apply(Selection::Cases(cases.iter().collect()));
        let groups = selection.into_groups().unwrap();

        assert!(groups.group("fast").unwrap().is_empty());
        assert!(groups.group("slow").unwrap().is_empty());
        assert!(groups.group("undeclared").is_none());
        assert_eq!(groups.unmatched().len(), 1);
    }

    #[test]
    fn matching_ignores_case() {
        let cases = [parametrized("t", "QUICK_MODE")];
        let grouper = ParamGrouper::new(GroupMap::new().group("fast", ["Quick"]));

        let selection = grouper.apply(Selection::Cases(cases.iter().collect()));
        let groups = selection.into_groups().unwrap();

        assert_eq!(groups.group("fast").unwrap().len(), 1);
    }

    #[test]
    fn fixtures_are_the_fallback_source() {
        let with_fixtures = TestCase {
            fixtures: Some(Params::from_iter([("sleep_time", "slow")])),
            ..TestCase::named("fixture_only")
        };
        let with_both = TestCase {
            params: Some(Params::from_iter([("mode", "quick")])),
            fixtures: Some(Params::from_iter([("sleep_time", "slow")])),
            ..TestCase::named("both")
        };
        let cases = [with_fixtures, with_both];
        let grouper = ParamGrouper::new(mapping());

        let selection = grouper.apply(Selection::Cases(cases.iter().collect()));
        let groups = selection.into_groups().unwrap();

        // fixtures only count while no parametrization is present
        assert_eq!(group_names(&groups, "fixture_only"), ["slow"]);
        assert_eq!(group_names(&groups, "both"), ["fast"]);
    }

    #[test]
    fn cases_without_values_are_unmatched() {
        let cases: [TestCase; 1] = [TestCase::named("bare")];
        let grouper = ParamGrouper::new(mapping());

        let selection = grouper.apply(Selection::Cases(cases.iter().collect()));
        let groups = selection.into_groups().unwrap();

        assert_eq!(groups.unmatched().len(), 1);
    }

    #[test]
    fn for_param_scopes_matching_to_one_value() {
        let case = TestCase {
            params: Some(Params::from_iter([
                ("mode", "quick"),
                ("detail", "slow_variant"),
            ])),
            ..TestCase::named("t")
        };
        let cases = [case];

        let scoped = ParamGrouper::new(mapping()).for_param("mode");
        let selection = scoped.apply(Selection::Cases(cases.iter().collect()));
        let groups = selection.into_groups().unwrap();
        assert_eq!(group_names(&groups, "t"), ["fast"]);

        let unscoped = ParamGrouper::new(mapping());
        let selection = unscoped.apply(Selection::Cases(cases.iter().collect()));
        let groups = selection.into_groups().unwrap();
        assert_eq!(group_names(&groups, "t"), ["fast", "slow"]);
    }

    #[test]
    fn sink_sees_every_assignment() {
        let tagged = RefCell::new(Vec::new());
        let sink = |case: &TestCase, group: &str| {
            tagged.borrow_mut().push((case.name.to_string(), group.to_string()));
        };

        let cases = [
            parametrized("combo", "quick_slow_combo"),
            parametrized("plain", "other"),
        ];
        let grouper = ParamGrouper::new(mapping()).with_sink(&sink);
        grouper.apply(Selection::Cases(cases.iter().collect()));

        let tagged = tagged.into_inner();
        assert_eq!(
            tagged,
            [
                ("combo".to_string(), "fast".to_string()),
                ("combo".to_string(), "slow".to_string()),
            ]
        );
    }

    #[test]
    fn empty_input_yields_empty_groups() {
        let grouper = ParamGrouper::new(mapping());
        let selection: Selection<'_, TestCase> = grouper.apply(Selection::Cases(Vec::new()));
        let groups = selection.into_groups().unwrap();

        assert_eq!(groups.names().collect::<Vec<_>>(), ["fast", "slow"]);
        assert!(groups.iter().all(|(_, members)| members.is_empty()));
        assert!(groups.unmatched().is_empty());
        assert!(groups.cases().is_empty());
    }

    #[test]
    fn roster_keeps_input_order() {
        let cases = [
            parametrized("a", "slow_run"),
            parametrized("b", "other"),
            parametrized("c", "quick_run"),
        ];
        let grouper = ParamGrouper::new(mapping());

        let selection = grouper.apply(Selection::Cases(cases.iter().collect()));
        let roster: Vec<_> = selection
            .cases()
            .iter()
            .map(|case| case.name.as_ref())
            .collect();

        assert_eq!(roster, ["a", "b", "c"]);
    }

    #[test]
    fn redefining_a_group_replaces_its_identifiers() {
        let map = GroupMap::new()
            .group("fast", ["quick"])
            .group("fast", ["rapid"]);

        assert_eq!(map.len(), 1);

        let cases = [parametrized("t", "quick_mode")];
        let grouper = ParamGrouper::new(map);
        let selection = grouper.apply(Selection::Cases(cases.iter().collect()));
        let groups = selection.into_groups().unwrap();

        assert_eq!(groups.unmatched().len(), 1);
    }
}
