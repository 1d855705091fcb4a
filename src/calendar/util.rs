use std::iter::successors;
use time::{Date, Month, Weekday};

pub(super) trait WeekdayExt {
    fn index1(&self) -> u8;
}

impl WeekdayExt for Weekday {
    fn index1(&self) -> u8 {
        self.number_from_sunday()
    }
}

/// Number of days in the given month, or 0 if the month is not
/// representable
pub(super) fn month_length(year: i32, month: Month) -> u8 {
    (28..=31)
        .rev()
        .find(|&day| Date::from_calendar_date(year, month, day).is_ok())
        .unwrap_or(0)
}

pub(super) fn iter_days_after(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day()).skip(1)
}

pub(super) fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}
