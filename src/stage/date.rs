use tracing::debug;

use crate::{
    case::Named,
    schedule::{Clock, Scheduled, SystemClock},
    stage::{Selection, SelectionStage},
};

/// Drops cases whose schedule keeps them off today's run.
///
/// Cases opt into a schedule with a [`RunDays`](crate::schedule::RunDays)
/// annotation. A case without one runs every day, and so does a case whose
/// annotation resolves to an empty day set. Relative order of the remaining
/// cases is preserved.
#[derive(Debug, Clone, Default)]
pub struct DayFilter<C = SystemClock> {
    clock: C,
}

impl DayFilter {
    /// A filter against the real local day.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> DayFilter<C> {
    /// A filter against an injected day source.
    ///
    /// Anything that yields a [`Weekday`](crate::schedule::Weekday) works: a
    /// closure, or a plain `Weekday` to pin the filter to one day.
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }
}

impl<Case, C> SelectionStage<Case> for DayFilter<C>
where
    Case: Named + Scheduled,
    C: Clock,
{
    fn apply<'t>(&self, input: Selection<'t, Case>) -> Selection<'t, Case> {
        let today = self.clock.today();
        let cases = input.into_cases();

        let eligible = cases
            .into_iter()
            .filter(|case| {
                let eligible = match case.run_days() {
                    None => true,
                    Some(run_days) => {
                        let allowed = run_days.allowed();
                        allowed.is_empty() || allowed.contains(today)
                    }
                };
                if !eligible {
                    debug!("dropping '{}', not scheduled for {}", case.name(), today);
                }
                eligible
            })
            .collect();

        Selection::Cases(eligible)
    }
}
