use time::Date;

/// Whether a picker selects one date or a start/end range.  Fixed for the
/// lifetime of a picker.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SelectionMode {
    Single,
    Range,
}

/// A possibly incomplete range of dates.
///
/// An end date is only ever present together with a start date, and the
/// start never falls after the end.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct DateRange {
    start: Option<Date>,
    end: Option<Date>,
}

/// The three states a [`DateRange`] can be in
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RangeState {
    Empty,
    StartOnly(Date),
    Complete(Date, Date),
}

impl DateRange {
    /// Construct a range from possibly-unordered endpoints, e.g., when
    /// restoring a persisted selection.  A lone end date becomes the start,
    /// and reversed endpoints are swapped.
    pub fn new(start: Option<Date>, end: Option<Date>) -> DateRange {
        match (start, end) {
            (Some(s), Some(e)) if e < s => DateRange {
                start: Some(e),
                end: Some(s),
            },
            (None, Some(e)) => DateRange {
                start: Some(e),
                end: None,
            },
            _ => DateRange { start, end },
        }
    }

    pub fn start(&self) -> Option<Date> {
        self.start
    }

    pub fn end(&self) -> Option<Date> {
        self.end
    }

    pub fn state(&self) -> RangeState {
        match (self.start, self.end) {
            (Some(s), Some(e)) => RangeState::Complete(s, e),
            (Some(s), None) => RangeState::StartOnly(s),
            (None, _) => RangeState::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }

    /// Whether `date` is shown as selected: it lies within a complete range
    /// (inclusive), or it is the lone start date
    pub fn contains(&self, date: Date) -> bool {
        match self.state() {
            RangeState::Empty => false,
            RangeState::StartOnly(s) => date == s,
            RangeState::Complete(s, e) => (s..=e).contains(&date),
        }
    }

    fn click(&mut self, date: Date) {
        *self = match self.state() {
            RangeState::Empty => DateRange {
                start: Some(date),
                end: None,
            },
            RangeState::StartOnly(s) if date == s => DateRange::default(),
            RangeState::StartOnly(s) if date > s => DateRange {
                start: Some(s),
                end: Some(date),
            },
            // Clicking before the start moves the start
            RangeState::StartOnly(_) => DateRange {
                start: Some(date),
                end: None,
            },
            RangeState::Complete(s, e) if date == e => DateRange {
                start: Some(s),
                end: None,
            },
            RangeState::Complete(s, e) if date == s => DateRange {
                start: Some(e),
                end: None,
            },
            RangeState::Complete(..) => DateRange {
                start: Some(date),
                end: None,
            },
        };
    }
}

/// The current selection of a picker.  This is the only state that persists
/// between clicks; it is owned by the caller and updated with
/// [`Selection::click`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Selection {
    Single(Option<Date>),
    Range(DateRange),
}

impl Selection {
    pub fn new(mode: SelectionMode) -> Selection {
        match mode {
            SelectionMode::Single => Selection::Single(None),
            SelectionMode::Range => Selection::Range(DateRange::default()),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        match self {
            Selection::Single(_) => SelectionMode::Single,
            Selection::Range(_) => SelectionMode::Range,
        }
    }

    /// Apply a click on `date`.
    ///
    /// In single mode, clicking the selected date deselects it and clicking
    /// any other date selects that date instead.
    ///
    /// In range mode:
    ///
    /// - With nothing selected, the date becomes the start.
    /// - With only a start, clicking the start deselects it, clicking a later
    ///   date completes the range, and clicking an earlier date becomes the
    ///   new start.
    /// - With a complete range, clicking the end removes the end, clicking
    ///   the start makes the end the new lone start, and clicking anything
    ///   else starts over with that date as the start.
    ///
    /// Disabled dates are not filtered here; callers must not route clicks on
    /// them.
    pub fn click(&mut self, date: Date) {
        let before = *self;
        match self {
            Selection::Single(selected) => {
                *selected = if *selected == Some(date) {
                    None
                } else {
                    Some(date)
                };
            }
            Selection::Range(range) => range.click(date),
        }
        tracing::debug!(%date, ?before, after = ?self, "applied click to selection");
    }

    pub fn is_selected(&self, date: Date) -> bool {
        match self {
            Selection::Single(selected) => *selected == Some(date),
            Selection::Range(range) => range.contains(date),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Selection::Single(selected) => selected.is_none(),
            Selection::Range(range) => range.is_empty(),
        }
    }

    pub fn clear(&mut self) {
        *self = Selection::new(self.mode());
    }

    /// The selected date of a single-mode selection
    pub fn single(&self) -> Option<Date> {
        match self {
            Selection::Single(selected) => *selected,
            Selection::Range(_) => None,
        }
    }

    /// The range of a range-mode selection
    pub fn range(&self) -> Option<DateRange> {
        match self {
            Selection::Single(_) => None,
            Selection::Range(range) => Some(*range),
        }
    }

    /// The state of a range-mode selection
    pub fn range_state(&self) -> Option<RangeState> {
        self.range().map(|range| range.state())
    }
}

impl From<DateRange> for Selection {
    fn from(range: DateRange) -> Selection {
        Selection::Range(range)
    }
}
