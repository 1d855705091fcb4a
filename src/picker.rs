use crate::calendar::{Calendar, Cell};
use crate::filter::{DateFilter, NoDisabledDates};
use crate::selection::{Selection, SelectionMode};
use std::fmt;
use time::{Date, OffsetDateTime};

/// Display state of one day in a month grid
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DayState {
    pub date: Date,
    /// The day belongs to the previous or next month
    pub adjacent: bool,
    pub selected: bool,
    pub disabled: bool,
    pub today: bool,
}

/// A grid cell annotated with everything a renderer needs to know about it
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CellView {
    Blank,
    Day(DayState),
}

impl CellView {
    pub fn day(&self) -> Option<&DayState> {
        match self {
            CellView::Blank => None,
            CellView::Day(day) => Some(day),
        }
    }
}

/// Turns annotated cells into whatever a UI layer draws.  Closures taking a
/// `CellView` implement this trait.
pub trait CellRenderer {
    type Output;

    fn render_cell(&self, cell: CellView) -> Self::Output;
}

impl<F, T> CellRenderer for F
where
    F: Fn(CellView) -> T,
{
    type Output = T;

    fn render_cell(&self, cell: CellView) -> T {
        self(cell)
    }
}

/// A calendar, a selection, and a disabled-date filter, bundled together to
/// answer everything a UI layer asks when drawing a month and routing
/// clicks.
///
/// The displayed month is not part of the picker; it is passed in to each
/// query and advanced with [`Calendar::next_month`] and
/// [`Calendar::previous_month`].
#[derive(Clone)]
pub struct DatePicker<F = NoDisabledDates> {
    calendar: Calendar,
    selection: Selection,
    filter: F,
    show_adjacent: bool,
    today: Option<Date>,
}

impl DatePicker {
    pub fn new(calendar: Calendar, mode: SelectionMode) -> DatePicker {
        DatePicker::with_selection(calendar, Selection::new(mode))
    }

    /// Create a picker that resumes from an existing selection
    pub fn with_selection(calendar: Calendar, selection: Selection) -> DatePicker {
        DatePicker {
            calendar,
            selection,
            filter: NoDisabledDates,
            show_adjacent: false,
            today: None,
        }
    }
}

impl<F: DateFilter> DatePicker<F> {
    pub fn disabled_dates<G: DateFilter>(self, filter: G) -> DatePicker<G> {
        DatePicker {
            calendar: self.calendar,
            selection: self.selection,
            filter,
            show_adjacent: self.show_adjacent,
            today: self.today,
        }
    }

    pub fn show_adjacent(mut self, show_adjacent: bool) -> Self {
        self.show_adjacent = show_adjacent;
        self
    }

    /// Set the date to flag as today in cell views
    pub fn today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn into_selection(self) -> Selection {
        self.selection
    }

    pub fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub fn shows_adjacent(&self) -> bool {
        self.show_adjacent
    }

    pub fn is_selected(&self, date: Date) -> bool {
        self.selection.is_selected(date)
    }

    pub fn is_disabled(&self, date: Date) -> bool {
        self.filter.is_disabled(date)
    }

    /// Route a click on `date` to the selection.  Clicks on disabled dates
    /// are refused.  Returns whether the click was applied.
    pub fn click(&mut self, date: Date) -> bool {
        if self.is_disabled(date) {
            tracing::debug!(%date, "ignoring click on disabled date");
            false
        } else {
            self.selection.click(date);
            true
        }
    }

    /// Like [`DatePicker::click`], for an instant that is first reduced to
    /// its calendar day
    pub fn click_instant(&mut self, instant: OffsetDateTime) -> bool {
        self.click(self.calendar.day_of(instant))
    }

    /// The annotated cells of the month containing `month_ref`
    pub fn cells(&self, month_ref: Date) -> Vec<CellView> {
        self.calendar
            .month_grid(month_ref, self.show_adjacent)
            .into_iter()
            .map(|cell| self.view(cell))
            .collect()
    }

    /// The cells of the month containing `month_ref`, each passed through
    /// `renderer`
    pub fn render_cells<R: CellRenderer>(&self, month_ref: Date, renderer: &R) -> Vec<R::Output> {
        self.cells(month_ref)
            .into_iter()
            .map(|cell| renderer.render_cell(cell))
            .collect()
    }

    /// Column headers for the month grid
    pub fn weekday_symbols(&self) -> Vec<&str> {
        self.calendar.ordered_weekday_symbols()
    }

    fn view(&self, cell: Cell) -> CellView {
        match cell {
            Cell::Blank => CellView::Blank,
            Cell::Day {
                date,
                in_current_month,
            } => CellView::Day(DayState {
                date,
                adjacent: !in_current_month,
                selected: self.is_selected(date),
                disabled: self.is_disabled(date),
                today: self.today == Some(date),
            }),
        }
    }
}

impl<F> fmt::Debug for DatePicker<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePicker")
            .field("calendar", &self.calendar)
            .field("selection", &self.selection)
            .field("show_adjacent", &self.show_adjacent)
            .field("today", &self.today)
            .finish_non_exhaustive()
    }
}
