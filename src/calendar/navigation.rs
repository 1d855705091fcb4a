use super::util::month_length;
use super::{Calendar, CalendarError};
use time::{Date, Month};

impl Calendar {
    /// The first day of the month containing `date`
    pub fn start_of_month(&self, date: Date) -> Date {
        self.try_start_of_month(date).unwrap_or_else(|e| {
            tracing::warn!(%date, error = %e, "could not resolve start of month");
            date
        })
    }

    pub fn try_start_of_month(&self, date: Date) -> Result<Date, CalendarError> {
        Ok(Date::from_calendar_date(date.year(), date.month(), 1)?)
    }

    /// Move `date` by `delta` months, keeping its day of the month where
    /// possible and otherwise clamping to the last day of the target month.
    ///
    /// Saturates at [`Date::MIN`] or [`Date::MAX`] when the target month is
    /// not representable.
    pub fn add_months(&self, date: Date, delta: i32) -> Date {
        self.try_add_months(date, delta).unwrap_or_else(|e| {
            tracing::warn!(%date, delta, error = %e, "month arithmetic out of range; saturating");
            if delta < 0 {
                Date::MIN
            } else {
                Date::MAX
            }
        })
    }

    pub fn try_add_months(&self, date: Date, delta: i32) -> Result<Date, CalendarError> {
        let months = i64::from(date.year()) * 12 + i64::from(u8::from(date.month())) - 1
            + i64::from(delta);
        let year = i32::try_from(months.div_euclid(12)).map_err(|_| CalendarError::OutOfTime)?;
        let month = u8::try_from(months.rem_euclid(12) + 1).map_err(|_| CalendarError::OutOfTime)?;
        let month = Month::try_from(month)?;
        let day = date.day().min(month_length(year, month));
        Date::from_calendar_date(year, month, day).map_err(|_| CalendarError::OutOfTime)
    }

    pub fn next_month(&self, current: Date) -> Date {
        self.add_months(current, 1)
    }

    pub fn previous_month(&self, current: Date) -> Date {
        self.add_months(current, -1)
    }

    /// Header text for the month containing `date`, e.g. "November 2024"
    pub fn month_title(&self, date: Date) -> String {
        format!("{} {}", self.month_symbol(date.month()), date.year())
    }
}
