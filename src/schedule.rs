//! Day-of-week scheduling.
//!
//! Test authors attach a [`RunDays`] annotation to a case to restrict which
//! days it runs on. The annotation carries the raw tokens as written;
//! [`RunDays::allowed`] resolves them into a [`DaySet`]. Resolution is
//! forgiving on purpose: tokens nobody recognizes are dropped, and an
//! annotation that resolves to nothing acts as if it were never written.
//!
//! Days use a fixed numbering, Sunday = 0 through Saturday = 6, and the
//! `"weekend"` keyword always expands to the Friday/Saturday pair under that
//! numbering.

use std::{
    borrow::Cow,
    fmt::{self, Display},
};

use chrono::Datelike;

/// Days of the week, numbered Sunday = 0 through Saturday = 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Weekday {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The day for an index, wrapping modulo 7.
    pub const fn from_index(index: u8) -> Weekday {
        Self::ALL[(index % 7) as usize]
    }

    /// Parse a single day token.
    ///
    /// Accepts full English names and their 3-letter abbreviations in any
    /// casing. Everything else, including `"weekend"`, is `None`.
    pub fn from_token(token: &str) -> Option<Weekday> {
        let token = token.to_lowercase();
        match token.as_str() {
            "sun" | "sunday" => Some(Weekday::Sunday),
            "mon" | "monday" => Some(Weekday::Monday),
            "tue" | "tuesday" => Some(Weekday::Tuesday),
            "wed" | "wednesday" => Some(Weekday::Wednesday),
            "thu" | "thursday" => Some(Weekday::Thursday),
            "fri" | "friday" => Some(Weekday::Friday),
            "sat" | "saturday" => Some(Weekday::Saturday),
            _ => None,
        }
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weekday::Sunday => f.write_str("sunday"),
            Weekday::Monday => f.write_str("monday"),
            Weekday::Tuesday => f.write_str("tuesday"),
            Weekday::Wednesday => f.write_str("wednesday"),
            Weekday::Thursday => f.write_str("thursday"),
            Weekday::Friday => f.write_str("friday"),
            Weekday::Saturday => f.write_str("saturday"),
        }
    }
}

/// A set of weekdays, stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DaySet(u8);

impl DaySet {
    pub const EMPTY: DaySet = DaySet(0);

    /// The fixed weekend pair, Friday and Saturday.
    pub const WEEKEND: DaySet = DaySet::EMPTY
        .insert(Weekday::Friday)
        .insert(Weekday::Saturday);

    pub const fn insert(self, day: Weekday) -> DaySet {
        DaySet(self.0 | 1 << day.index())
    }

    pub const fn union(self, other: DaySet) -> DaySet {
        DaySet(self.0 | other.0)
    }

    pub const fn contains(self, day: Weekday) -> bool {
        self.0 & 1 << day.index() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.into_iter().filter(move |day| self.contains(*day))
    }
}

impl FromIterator<Weekday> for DaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        iter.into_iter().fold(DaySet::EMPTY, DaySet::insert)
    }
}

/// The `run_days` annotation a test author attaches to a case.
///
/// Carries the positional tokens and the optional `days = [...]` list the
/// annotation was written with, untouched. [`RunDays::allowed`] folds both
/// into a [`DaySet`]; dropping unrecognized tokens happens there, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunDays {
    args: Vec<Cow<'static, str>>,
    days: Vec<Cow<'static, str>>,
}

impl RunDays {
    /// An annotation with positional tokens, e.g. `run_days("mon", "tue")`.
    pub fn new<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Cow<'static, str>>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            days: Vec::new(),
        }
    }

    /// The `days = [...]` keyword list, e.g. `run_days(days = ["weekend"])`.
    pub fn days<I>(mut self, days: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Cow<'static, str>>,
    {
        self.days = days.into_iter().map(Into::into).collect();
        self
    }

    /// Resolve the allowed-day set.
    ///
    /// Positional tokens and the `days` list contribute equally. `"weekend"`
    /// expands to [`DaySet::WEEKEND`], weekday names and their 3-letter
    /// abbreviations map to single days, anything unrecognized is ignored.
    pub fn allowed(&self) -> DaySet {
        self.args
            .iter()
            .chain(self.days.iter())
            .fold(DaySet::EMPTY, |set, token| {
                if token.eq_ignore_ascii_case("weekend") {
                    return set.union(DaySet::WEEKEND);
                }
                match Weekday::from_token(token) {
                    Some(day) => set.insert(day),
                    None => set,
                }
            })
    }
}

/// Read access to a case's schedule annotation.
///
/// `None` means the case is eligible every day.
pub trait Scheduled {
    fn run_days(&self) -> Option<&RunDays>;
}

/// A source for "today", injected into the day filter.
///
/// Implemented for zero-argument closures and for [`Weekday`] itself, so a
/// fixed day can stand in for the real clock in tests.
pub trait Clock {
    fn today(&self) -> Weekday;
}

impl<F> Clock for F
where
    F: Fn() -> Weekday,
{
    fn today(&self) -> Weekday {
        self()
    }
}

impl Clock for Weekday {
    fn today(&self) -> Weekday {
        *self
    }
}

/// The real local day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Weekday {
        let today = chrono::Local::now().date_naive();
        Weekday::from_index(today.weekday().num_days_from_sunday() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_parse_in_any_case() {
        assert_eq!(Weekday::from_token("mon"), Some(Weekday::Monday));
        assert_eq!(Weekday::from_token("MONDAY"), Some(Weekday::Monday));
        assert_eq!(Weekday::from_token("Sat"), Some(Weekday::Saturday));
        assert_eq!(Weekday::from_token("funday"), None);
        assert_eq!(Weekday::from_token("weekend"), None);
        assert_eq!(Weekday::from_token("tues"), None);
    }

    #[test]
    fn numbering_is_sunday_first() {
        assert_eq!(Weekday::Sunday.index(), 0);
        assert_eq!(Weekday::Saturday.index(), 6);
        assert_eq!(Weekday::from_index(5), Weekday::Friday);
        assert_eq!(Weekday::from_index(8), Weekday::Monday);
    }

    #[test]
    fn weekend_is_friday_and_saturday() {
        let weekend: Vec<_> = DaySet::WEEKEND.iter().collect();
        assert_eq!(weekend, [Weekday::Friday, Weekday::Saturday]);
    }

    #[test]
    fn allowed_merges_args_and_days() {
        let run_days = RunDays::new(["mon"]).days(["weekend"]);
        let allowed = run_days.allowed();

        assert!(allowed.contains(Weekday::Monday));
        assert!(allowed.contains(Weekday::Friday));
        assert!(allowed.contains(Weekday::Saturday));
        assert_eq!(allowed.len(), 3);
    }

    #[test]
    fn unrecognized_tokens_resolve_to_nothing() {
        let run_days = RunDays::new(["funday", "someday"]);
        assert!(run_days.allowed().is_empty());
    }

    #[test]
    fn duplicate_tokens_collapse() {
        let run_days = RunDays::new(["fri", "weekend", "FRIDAY"]);
        assert_eq!(run_days.allowed(), DaySet::WEEKEND);
    }

    #[test]
    fn clocks_from_closures_and_days() {
        let pinned = Weekday::Wednesday;
        assert_eq!(pinned.today(), Weekday::Wednesday);

        let closure = || Weekday::Friday;
        assert_eq!(closure.today(), Weekday::Friday);
    }
}
