/// Write access for attaching a group tag to a case.
///
/// When a case lands in a group, the grouping stage hands the pair to the
/// sink, once per (case, group) assignment. The host decides what a tag
/// means, for example a marker on its own item type. A closure
/// `Fn(&Case, &str)` works as a sink.
pub trait TagSink<Case> {
    fn tag(&self, case: &Case, group: &str);
}

impl<Case, F> TagSink<Case> for F
where
    F: Fn(&Case, &str),
{
    fn tag(&self, case: &Case, group: &str) {
        self(case, group)
    }
}

/// A [`TagSink`] that drops all tags.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoTags;

impl<Case> TagSink<Case> for NoTags {
    fn tag(&self, _: &Case, _: &str) {}
}
