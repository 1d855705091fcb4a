use std::fmt;
use std::ops::{Bound, RangeBounds};
use time::Date;

/// Decides which dates are disabled in a picker.  Evaluated once per
/// displayed cell on every render, so implementations should be pure and
/// cheap.
pub trait DateFilter {
    fn is_disabled(&self, date: Date) -> bool;
}

impl<F: Fn(Date) -> bool> DateFilter for F {
    fn is_disabled(&self, date: Date) -> bool {
        self(date)
    }
}

/// A filter under which no date is disabled
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct NoDisabledDates;

impl DateFilter for NoDisabledDates {
    fn is_disabled(&self, _date: Date) -> bool {
        false
    }
}

/// Disables every date outside of a range.  Built from any range
/// expression over dates:
///
/// ```
/// use chronogrid::DateBounds;
/// use time::macros::date;
///
/// let bounds = DateBounds::new(date!(2024 - 11 - 10)..);
/// assert!(bounds.contains(&date!(2024 - 12 - 25)));
/// assert!(!bounds.contains(&date!(2024 - 11 - 09)));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DateBounds {
    start: Bound<Date>,
    end: Bound<Date>,
}

impl DateBounds {
    pub fn new<R: RangeBounds<Date>>(range: R) -> DateBounds {
        DateBounds {
            start: range.start_bound().cloned(),
            end: range.end_bound().cloned(),
        }
    }

    /// Bounds that do not exclude any date
    pub fn unbounded() -> DateBounds {
        DateBounds::new(..)
    }

    pub fn contains(&self, date: &Date) -> bool {
        RangeBounds::contains(self, date)
    }
}

impl Default for DateBounds {
    fn default() -> DateBounds {
        DateBounds::unbounded()
    }
}

impl RangeBounds<Date> for DateBounds {
    fn start_bound(&self) -> Bound<&Date> {
        self.start.as_ref()
    }

    fn end_bound(&self) -> Bound<&Date> {
        self.end.as_ref()
    }
}

impl DateFilter for DateBounds {
    fn is_disabled(&self, date: Date) -> bool {
        !self.contains(&date)
    }
}

/// Adapts a fallible predicate into a [`DateFilter`].  A date for which the
/// predicate fails is logged and treated as not disabled, so that one bad
/// lookup never aborts rendering.
#[derive(Clone, Copy)]
pub struct Fallible<F>(F);

impl<F> Fallible<F> {
    pub fn new(predicate: F) -> Fallible<F> {
        Fallible(predicate)
    }
}

impl<F, E> DateFilter for Fallible<F>
where
    F: Fn(Date) -> Result<bool, E>,
    E: fmt::Display,
{
    fn is_disabled(&self, date: Date) -> bool {
        (self.0)(date).unwrap_or_else(|e| {
            tracing::warn!(%date, error = %e, "date filter failed; treating date as enabled");
            false
        })
    }
}

impl<F> fmt::Debug for Fallible<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fallible").finish_non_exhaustive()
    }
}
