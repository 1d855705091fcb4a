//! Calendar grid generation and date selection for date pickers.
//!
//! This crate holds the toolkit-independent half of a date picker: computing
//! which dates a displayed month shows (including the padding days of the
//! adjacent months, for any first weekday), and keeping track of what the
//! user has selected as they click on dates.  Drawing the result is left to
//! the caller.
//!
//! ```
//! use chronogrid::{Calendar, Cell, Selection, SelectionMode};
//! use time::macros::date;
//!
//! let calendar = Calendar::iso8601();
//! let cells = calendar.calendar_cells(date!(2024 - 11 - 15), true);
//! assert_eq!(cells.len(), 35);
//! assert_eq!(cells[0].date(), Some(date!(2024 - 10 - 28)));
//! assert!(cells[0].is_adjacent());
//!
//! let mut selection = Selection::new(SelectionMode::Range);
//! selection.click(date!(2024 - 11 - 05));
//! selection.click(date!(2024 - 11 - 09));
//! assert!(selection.is_selected(date!(2024 - 11 - 07)));
//! ```
mod calendar;
mod filter;
mod picker;
mod selection;
pub use crate::calendar::{
    Calendar, CalendarError, CalendarSystem, Cell, FirstWeekday, InvalidWeekdayError, MonthGrid,
};
pub use crate::filter::{DateBounds, DateFilter, Fallible, NoDisabledDates};
pub use crate::picker::{CellRenderer, CellView, DatePicker, DayState};
pub use crate::selection::{DateRange, RangeState, Selection, SelectionMode};
