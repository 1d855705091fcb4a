use super::util::{iter_days_after, iter_days_before, month_length};
use super::{Calendar, CalendarError};
use std::iter::{once, repeat_n};
use std::slice::{ChunksExact, Iter};
use std::vec::IntoIter;
use time::Date;

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// One position in a month grid
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Cell {
    /// Padding in place of an adjacent-month day
    Blank,
    Day { date: Date, in_current_month: bool },
}

impl Cell {
    pub fn date(&self) -> Option<Date> {
        match self {
            Cell::Blank => None,
            Cell::Day { date, .. } => Some(*date),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Blank)
    }

    /// True for days belonging to the previous or next month
    pub fn is_adjacent(&self) -> bool {
        matches!(
            self,
            Cell::Day {
                in_current_month: false,
                ..
            }
        )
    }

    fn current(date: Date) -> Cell {
        Cell::Day {
            date,
            in_current_month: true,
        }
    }

    fn adjacent(date: Date) -> Cell {
        Cell::Day {
            date,
            in_current_month: false,
        }
    }
}

/// The cells of one displayed month, in chronological order and always
/// filling whole weeks
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MonthGrid(Vec<Cell>);

impl MonthGrid {
    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the rows of the grid, seven cells apiece
    pub fn weeks(&self) -> ChunksExact<'_, Cell> {
        self.0.chunks_exact(DAYS_IN_WEEK)
    }

    pub fn iter(&self) -> Iter<'_, Cell> {
        self.0.iter()
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.0
    }
}

impl IntoIterator for MonthGrid {
    type Item = Cell;
    type IntoIter = IntoIter<Cell>;

    fn into_iter(self) -> IntoIter<Cell> {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MonthGrid {
    type Item = &'a Cell;
    type IntoIter = Iter<'a, Cell>;

    fn into_iter(self) -> Iter<'a, Cell> {
        self.0.iter()
    }
}

impl Calendar {
    /// Every day of the month containing `month_ref`, in ascending order.
    /// Only the year and month of `month_ref` are used.
    ///
    /// Returns an empty vector if the month cannot be resolved.
    pub fn days_in_month(&self, month_ref: Date) -> Vec<Date> {
        self.try_days_in_month(month_ref).unwrap_or_else(|e| {
            tracing::warn!(%month_ref, error = %e, "could not resolve days of month");
            Vec::new()
        })
    }

    pub fn try_days_in_month(&self, month_ref: Date) -> Result<Vec<Date>, CalendarError> {
        let first = self.try_start_of_month(month_ref)?;
        let month = first.month();
        Ok(once(first)
            .chain(iter_days_after(first).take_while(|d| d.month() == month))
            .collect())
    }

    /// The trailing days of the previous month that pad the first displayed
    /// week.  Empty when the month starts on the first weekday, or when the
    /// previous month is not representable.
    pub fn leading_adjacent_dates(&self, month_ref: Date) -> Vec<Date> {
        self.try_leading_adjacent_dates(month_ref)
            .unwrap_or_else(|e| {
                tracing::warn!(%month_ref, error = %e, "could not resolve leading adjacent dates");
                Vec::new()
            })
    }

    pub fn try_leading_adjacent_dates(&self, month_ref: Date) -> Result<Vec<Date>, CalendarError> {
        let first = self.try_start_of_month(month_ref)?;
        let qty = self.column_of(first);
        let mut dates = iter_days_before(first).take(qty).collect::<Vec<_>>();
        if dates.len() < qty {
            return Err(CalendarError::OutOfTime);
        }
        dates.reverse();
        Ok(dates)
    }

    /// The leading days of the next month that complete the last displayed
    /// week.  Empty when the month ends on the last weekday, or when the next
    /// month is not representable.
    pub fn trailing_adjacent_dates(&self, month_ref: Date) -> Vec<Date> {
        self.try_trailing_adjacent_dates(month_ref)
            .unwrap_or_else(|e| {
                tracing::warn!(%month_ref, error = %e, "could not resolve trailing adjacent dates");
                Vec::new()
            })
    }

    pub fn try_trailing_adjacent_dates(
        &self,
        month_ref: Date,
    ) -> Result<Vec<Date>, CalendarError> {
        let last = self.try_end_of_month(month_ref)?;
        let qty = trailing_qty(self.column_of(last));
        let dates = iter_days_after(last).take(qty).collect::<Vec<_>>();
        if dates.len() < qty {
            return Err(CalendarError::OutOfTime);
        }
        Ok(dates)
    }

    /// The cells to display for the month containing `month_ref`: the
    /// leading adjacent days, the days of the month, then the trailing
    /// adjacent days.  When `include_adjacent` is false, adjacent days are
    /// replaced by the same number of [`Cell::Blank`]s, so the result is a
    /// whole number of weeks either way.
    pub fn calendar_cells(&self, month_ref: Date, include_adjacent: bool) -> Vec<Cell> {
        self.month_grid(month_ref, include_adjacent).into_cells()
    }

    /// Like [`Calendar::calendar_cells`], but wrapped for week-by-week
    /// access.  Adjacent days that fall outside the representable range of
    /// dates are rendered as blanks.
    pub fn month_grid(&self, month_ref: Date, include_adjacent: bool) -> MonthGrid {
        let days = self.days_in_month(month_ref);
        let (Some(&first), Some(&last)) = (days.first(), days.last()) else {
            return MonthGrid::default();
        };
        let lead_qty = self.column_of(first);
        let trail_qty = trailing_qty(self.column_of(last));
        let mut cells = Vec::with_capacity(lead_qty + days.len() + trail_qty);
        if include_adjacent {
            match self.try_leading_adjacent_dates(first) {
                Ok(dates) => cells.extend(dates.into_iter().map(Cell::adjacent)),
                Err(e) => {
                    tracing::warn!(%month_ref, error = %e, "blanking leading adjacent dates");
                    cells.extend(repeat_n(Cell::Blank, lead_qty));
                }
            }
        } else {
            cells.extend(repeat_n(Cell::Blank, lead_qty));
        }
        cells.extend(days.into_iter().map(Cell::current));
        if include_adjacent {
            match self.try_trailing_adjacent_dates(last) {
                Ok(dates) => cells.extend(dates.into_iter().map(Cell::adjacent)),
                Err(e) => {
                    tracing::warn!(%month_ref, error = %e, "blanking trailing adjacent dates");
                    cells.extend(repeat_n(Cell::Blank, trail_qty));
                }
            }
        } else {
            cells.extend(repeat_n(Cell::Blank, trail_qty));
        }
        MonthGrid(cells)
    }

    /// The weekday symbols rotated so that the configured first weekday
    /// comes first
    pub fn ordered_weekday_symbols(&self) -> Vec<&str> {
        let i = usize::from(self.first_weekday().get() - 1);
        let (before, after) = self.weekday_symbols().split_at(i);
        after
            .iter()
            .chain(before)
            .map(String::as_str)
            .collect()
    }

    pub(crate) fn try_end_of_month(&self, date: Date) -> Result<Date, CalendarError> {
        Ok(Date::from_calendar_date(
            date.year(),
            date.month(),
            month_length(date.year(), date.month()),
        )?)
    }
}

fn trailing_qty(last_column: usize) -> usize {
    (DAYS_IN_WEEK - 1 - last_column) % DAYS_IN_WEEK
}
