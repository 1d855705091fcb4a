mod grid;
mod navigation;
mod util;
pub use self::grid::{Cell, MonthGrid};
use self::util::WeekdayExt;
use std::fmt;
use thiserror::Error;
use time::{Date, Duration, Month, OffsetDateTime, UtcOffset, Weekday};

const ENGLISH_WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The calendar system a [`Calendar`] follows.  Both systems share the
/// proleptic Gregorian date arithmetic; they differ in which weekday starts
/// the week by default.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CalendarSystem {
    /// Weeks start on Sunday
    #[default]
    Gregorian,
    /// Weeks start on Monday
    Iso8601,
}

impl CalendarSystem {
    pub fn default_first_weekday(self) -> FirstWeekday {
        match self {
            CalendarSystem::Gregorian => FirstWeekday::SUNDAY,
            CalendarSystem::Iso8601 => FirstWeekday::MONDAY,
        }
    }
}

/// The weekday shown in the first column of a month grid, numbered from
/// Sunday = 1 through Saturday = 7.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
// Invariant: 1 <= self.0 <= 7
pub struct FirstWeekday(u8);

impl FirstWeekday {
    pub const SUNDAY: FirstWeekday = FirstWeekday(1);
    pub const MONDAY: FirstWeekday = FirstWeekday(2);
    pub const SATURDAY: FirstWeekday = FirstWeekday(7);

    pub fn new(index: u8) -> Result<FirstWeekday, InvalidWeekdayError> {
        if (1..=7).contains(&index) {
            Ok(FirstWeekday(index))
        } else {
            Err(InvalidWeekdayError(index))
        }
    }

    /// Returns the 1-based index, Sunday being 1
    pub fn get(self) -> u8 {
        self.0
    }

    pub fn weekday(self) -> Weekday {
        match self.0 {
            1 => Weekday::Sunday,
            2 => Weekday::Monday,
            3 => Weekday::Tuesday,
            4 => Weekday::Wednesday,
            5 => Weekday::Thursday,
            6 => Weekday::Friday,
            _ => Weekday::Saturday,
        }
    }
}

impl TryFrom<u8> for FirstWeekday {
    type Error = InvalidWeekdayError;

    fn try_from(index: u8) -> Result<FirstWeekday, InvalidWeekdayError> {
        FirstWeekday::new(index)
    }
}

impl From<Weekday> for FirstWeekday {
    fn from(wd: Weekday) -> FirstWeekday {
        FirstWeekday(wd.index1())
    }
}

impl fmt::Display for FirstWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.weekday())
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("weekday index must be between 1 and 7, got {0}")]
pub struct InvalidWeekdayError(pub u8);

/// Failure to resolve a calendar computation.  For the proleptic Gregorian
/// calendar this only happens when a computation runs past the first or last
/// representable date.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum CalendarError {
    #[error("reached the end of time")]
    OutOfTime,
    #[error("invalid calendar date")]
    ComponentRange(#[from] time::error::ComponentRange),
}

/// Calendar configuration consumed by every grid and navigation computation:
/// the calendar system, the first weekday of the week, the UTC offset used
/// to reduce instants to calendar days, and the symbols used for headers.
///
/// A `Calendar` is never mutated by the computations that read it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Calendar {
    system: CalendarSystem,
    first_weekday: FirstWeekday,
    offset: UtcOffset,
    // Sunday-first, as in the calendar's native ordering
    weekday_symbols: [String; 7],
    month_symbols: [String; 12],
}

impl Calendar {
    pub fn new(system: CalendarSystem) -> Calendar {
        Calendar {
            system,
            first_weekday: system.default_first_weekday(),
            offset: UtcOffset::UTC,
            weekday_symbols: ENGLISH_WEEKDAYS.map(String::from),
            month_symbols: ENGLISH_MONTHS.map(String::from),
        }
    }

    pub fn gregorian() -> Calendar {
        Calendar::new(CalendarSystem::Gregorian)
    }

    pub fn iso8601() -> Calendar {
        Calendar::new(CalendarSystem::Iso8601)
    }

    pub fn with_first_weekday<W: Into<FirstWeekday>>(mut self, first_weekday: W) -> Calendar {
        self.first_weekday = first_weekday.into();
        self
    }

    pub fn with_offset(mut self, offset: UtcOffset) -> Calendar {
        self.offset = offset;
        self
    }

    /// Set the weekday symbols, given in Sunday-first order regardless of the
    /// first weekday
    pub fn with_weekday_symbols<S: Into<String>>(mut self, symbols: [S; 7]) -> Calendar {
        self.weekday_symbols = symbols.map(Into::into);
        self
    }

    /// Set the month symbols, given in January-first order
    pub fn with_month_symbols<S: Into<String>>(mut self, symbols: [S; 12]) -> Calendar {
        self.month_symbols = symbols.map(Into::into);
        self
    }

    pub fn system(&self) -> CalendarSystem {
        self.system
    }

    pub fn first_weekday(&self) -> FirstWeekday {
        self.first_weekday
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// The native, Sunday-first weekday symbols
    pub fn weekday_symbols(&self) -> &[String; 7] {
        &self.weekday_symbols
    }

    pub fn month_symbol(&self, month: Month) -> &str {
        self.month_symbols
            .get(usize::from(u8::from(month)) - 1)
            .map_or("", String::as_str)
    }

    /// Returns the calendar day on which `instant` falls under this
    /// calendar's UTC offset
    pub fn day_of(&self, instant: OffsetDateTime) -> Date {
        let shift = self.offset.whole_seconds() - instant.offset().whole_seconds();
        // The shifted value keeps `instant`'s offset, so its wall-clock date
        // is the wall-clock date at `self.offset`.
        if let Some(shifted) = instant.checked_add(Duration::seconds(i64::from(shift))) {
            shifted.date()
        } else {
            tracing::warn!(%instant, "instant cannot be shifted to calendar offset; using its own date");
            instant.date()
        }
    }

    /// Day-granularity equality of two instants
    pub fn same_day(&self, a: OffsetDateTime, b: OffsetDateTime) -> bool {
        self.day_of(a) == self.day_of(b)
    }

    /// The current date under this calendar's UTC offset
    pub fn today(&self) -> Date {
        self.day_of(OffsetDateTime::now_utc())
    }

    /// Position of `date` within a displayed week, 0 being the column of the
    /// first weekday
    pub(crate) fn column_of(&self, date: Date) -> usize {
        usize::from((date.weekday().index1() + 7 - self.first_weekday.get()) % 7)
    }
}

impl Default for Calendar {
    fn default() -> Calendar {
        Calendar::gregorian()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, offset};

    #[test]
    fn test_first_weekday_bounds() {
        assert_eq!(FirstWeekday::new(0), Err(InvalidWeekdayError(0)));
        assert_eq!(FirstWeekday::new(8), Err(InvalidWeekdayError(8)));
        for i in 1..=7 {
            assert_eq!(FirstWeekday::try_from(i).map(FirstWeekday::get), Ok(i));
        }
    }

    #[test]
    fn test_first_weekday_from_weekday() {
        assert_eq!(FirstWeekday::from(Weekday::Sunday), FirstWeekday::SUNDAY);
        assert_eq!(FirstWeekday::from(Weekday::Monday), FirstWeekday::MONDAY);
        assert_eq!(FirstWeekday::from(Weekday::Saturday), FirstWeekday::SATURDAY);
        for i in 1..=7 {
            let fw = FirstWeekday::new(i).unwrap();
            assert_eq!(FirstWeekday::from(fw.weekday()), fw);
        }
    }

    #[test]
    fn test_system_defaults() {
        assert_eq!(Calendar::gregorian().first_weekday(), FirstWeekday::SUNDAY);
        assert_eq!(Calendar::iso8601().first_weekday(), FirstWeekday::MONDAY);
        assert_eq!(Calendar::default().system(), CalendarSystem::Gregorian);
    }

    #[test]
    fn test_column_of() {
        // 2024-11-01 is a Friday
        let cal = Calendar::gregorian();
        assert_eq!(cal.column_of(date!(2024 - 11 - 01)), 5);
        let cal = Calendar::iso8601();
        assert_eq!(cal.column_of(date!(2024 - 11 - 01)), 4);
        assert_eq!(cal.column_of(date!(2024 - 11 - 03)), 6);
        assert_eq!(cal.column_of(date!(2024 - 11 - 04)), 0);
        let cal = Calendar::gregorian().with_first_weekday(Weekday::Saturday);
        assert_eq!(cal.column_of(date!(2024 - 11 - 02)), 0);
        assert_eq!(cal.column_of(date!(2024 - 11 - 01)), 6);
    }

    #[test]
    fn test_day_of() {
        let instant = datetime!(2024-11-30 23:30 UTC);
        assert_eq!(Calendar::gregorian().day_of(instant), date!(2024 - 11 - 30));
        let cal = Calendar::gregorian().with_offset(offset!(+1));
        assert_eq!(cal.day_of(instant), date!(2024 - 12 - 01));
        let cal = Calendar::gregorian().with_offset(offset!(-5));
        assert_eq!(cal.day_of(datetime!(2024-12-01 03:00 UTC)), date!(2024 - 11 - 30));
    }

    #[test]
    fn test_day_of_past_end_of_time() {
        // Shifting to +01:00 would land on 10000-01-01, so the instant's own
        // date is used
        let cal = Calendar::gregorian().with_offset(offset!(+1));
        assert_eq!(cal.day_of(datetime!(9999-12-31 23:30 UTC)), Date::MAX);
        let cal = Calendar::gregorian().with_offset(offset!(-1));
        assert_eq!(cal.day_of(datetime!(-9999-01-01 00:30 UTC)), Date::MIN);
    }

    #[test]
    fn test_same_day() {
        let cal = Calendar::gregorian();
        assert!(cal.same_day(
            datetime!(2024-11-15 00:00 UTC),
            datetime!(2024-11-15 23:59:59 UTC)
        ));
        assert!(!cal.same_day(
            datetime!(2024-11-15 23:59:59 UTC),
            datetime!(2024-11-16 00:00 UTC)
        ));
        // Same instant expressed in two offsets
        assert!(cal.same_day(
            datetime!(2024-11-15 22:00 UTC),
            datetime!(2024-11-16 01:00 +3)
        ));
        let cal = cal.with_offset(offset!(+3));
        assert!(!cal.same_day(
            datetime!(2024-11-15 20:00 UTC),
            datetime!(2024-11-15 22:00 UTC)
        ));
    }

    #[test]
    fn test_symbols() {
        let cal = Calendar::gregorian();
        assert_eq!(cal.month_symbol(Month::January), "January");
        assert_eq!(cal.month_symbol(Month::December), "December");
        assert_eq!(cal.weekday_symbols()[0], "Sun");
        let cal = cal.with_weekday_symbols(["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"]);
        assert_eq!(cal.weekday_symbols()[1], "Mo");
    }
}
