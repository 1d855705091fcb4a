use crate::help::Help;
use crate::theme::BASE_STYLE;
use crate::widget::MonthView;
use chronogrid::{DateFilter, DatePicker, Selection};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, read};
use ratatui::{
    Terminal,
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
};
use std::io::{self, Write};
use time::{Date, Duration};

#[derive(Clone, Debug)]
pub(crate) struct App<F> {
    picker: DatePicker<F>,
    today: Date,
    /// First day of the displayed month
    month: Date,
    cursor: Date,
    state: AppState,
}

impl<F: DateFilter> App<F> {
    pub(crate) fn new(picker: DatePicker<F>, today: Date) -> App<F> {
        let month = picker.calendar().start_of_month(today);
        App {
            picker,
            today,
            month,
            cursor: today,
            state: AppState::Picking,
        }
    }

    /// Place the cursor on `date` instead of today
    pub(crate) fn start_date(mut self, date: Date) -> App<F> {
        self.move_cursor(date);
        self
    }

    /// Run the picker until the user accepts or cancels.  Returns the
    /// selection if it was accepted.
    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<Option<Selection>>
    where
        io::Error: From<B::Error>,
    {
        while !self.finished() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(self.into_outcome())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Cancelled;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key or the key could not
    // be acted on
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Picking => match key {
                KeyCode::Char('h') | KeyCode::Left => self.step_days(-1),
                KeyCode::Char('l') | KeyCode::Right => self.step_days(1),
                KeyCode::Char('k') | KeyCode::Up => self.step_days(-7),
                KeyCode::Char('j') | KeyCode::Down => self.step_days(7),
                KeyCode::Char('p') | KeyCode::PageUp => self.step_months(-1),
                KeyCode::Char('n') | KeyCode::PageDown => self.step_months(1),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.move_cursor(self.today);
                    true
                }
                KeyCode::Char(' ') => self.picker.click(self.cursor),
                KeyCode::Enter => {
                    tracing::debug!(selection = ?self.picker.selection(), "selection accepted");
                    self.state = AppState::Accepted;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Cancelled;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
            AppState::Accepted | AppState::Cancelled => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn finished(&self) -> bool {
        matches!(self.state, AppState::Accepted | AppState::Cancelled)
    }

    fn into_outcome(self) -> Option<Selection> {
        (self.state == AppState::Accepted).then(|| self.picker.into_selection())
    }

    fn step_days(&mut self, days: i64) -> bool {
        self.cursor
            .checked_add(Duration::days(days))
            .is_some_and(|date| self.move_cursor(date))
    }

    // Refuses to move when the target month is not representable, rather
    // than saturating within the current month
    fn step_months(&mut self, delta: i32) -> bool {
        self.picker
            .calendar()
            .try_add_months(self.cursor, delta)
            .is_ok_and(|date| self.move_cursor(date))
    }

    // Returns `false` if the cursor is already on `date`
    fn move_cursor(&mut self, date: Date) -> bool {
        if date == self.cursor {
            return false;
        }
        self.cursor = date;
        let month = self.picker.calendar().start_of_month(date);
        if month != self.month {
            tracing::debug!(from = %self.month, to = %month, "scrolling displayed month");
            self.month = month;
        }
        true
    }
}

impl<F: DateFilter> Widget for &App<F> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        MonthView::new(&self.picker, self.month, self.cursor).render(area, buf);
        if self.state == AppState::Helping {
            Help {
                style: BASE_STYLE,
                mode: self.picker.mode(),
            }
            .render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
    Accepted,
    Cancelled,
}
