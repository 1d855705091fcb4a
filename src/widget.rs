use crate::theme::{
    ADJACENT_STYLE, BASE_STYLE, DISABLED_STYLE, SELECTED_STYLE, STATUS_STYLE, TITLE_STYLE,
    TODAY_STYLE, WEEKDAY_STYLE,
};
use chronogrid::{CellRenderer, CellView, DateFilter, DatePicker, DayState, RangeState, Selection};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Span, Text},
    widgets::{Paragraph, Widget},
};
use std::iter::zip;
use time::Date;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 5;

/// Number of columns taken up by the text of a single day
const CELL_WIDTH: usize = 4;

const DAYS_IN_WEEK: usize = 7;

/// Width of the month grid in columns
const MAIN_WIDTH: u16 = DAY_WIDTH * 7 - 1;

const TITLE_LINE: u16 = 0;
const HEADER_LINE: u16 = 1;
const RULE_LINE: u16 = 2;

/// Line on which the first week is drawn
const GRID_TOP: u16 = 3;

const ACS_HLINE: char = '─';

/// One month of a [`DatePicker`], with a cursor on one of its days
#[derive(Clone, Copy, Debug)]
pub(crate) struct MonthView<'a, F> {
    picker: &'a DatePicker<F>,
    month: Date,
    cursor: Date,
}

impl<'a, F> MonthView<'a, F> {
    pub(crate) fn new(picker: &'a DatePicker<F>, month: Date, cursor: Date) -> Self {
        MonthView {
            picker,
            month,
            cursor,
        }
    }
}

impl<F: DateFilter> Widget for MonthView<'_, F> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let area = Rect {
            x: area.x.saturating_add(left),
            width: MAIN_WIDTH.min(area.width),
            ..area
        };
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(&self.picker.calendar().month_title(self.month));
        canvas.draw_header(&self.picker.weekday_symbols());
        let painter = CellPainter {
            cursor: self.cursor,
        };
        let cells = self.picker.render_cells(self.month, &painter);
        let mut weeks = 0;
        for (week_no, week) in zip(0u16.., cells.chunks(DAYS_IN_WEEK)) {
            for (col, span) in zip(0u16.., week) {
                canvas.draw_day(week_no, col, span);
            }
            weeks = week_no + 1;
        }
        canvas.draw_status(GRID_TOP + weeks + 1, &describe(self.picker.selection()));
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct CellPainter {
    cursor: Date,
}

impl CellRenderer for CellPainter {
    type Output = Span<'static>;

    fn render_cell(&self, cell: CellView) -> Span<'static> {
        match cell {
            CellView::Blank => Span::styled(" ".repeat(CELL_WIDTH), BASE_STYLE),
            CellView::Day(day) => {
                let d = day.date.day();
                let s = if day.date == self.cursor {
                    format!("[{d:2}]")
                } else {
                    format!(" {d:2} ")
                };
                Span::styled(s, day_style(&day))
            }
        }
    }
}

fn day_style(day: &DayState) -> Style {
    if day.disabled {
        DISABLED_STYLE
    } else if day.selected {
        SELECTED_STYLE
    } else if day.today {
        TODAY_STYLE
    } else if day.adjacent {
        ADJACENT_STYLE
    } else {
        BASE_STYLE
    }
}

fn describe(selection: &Selection) -> String {
    match *selection {
        Selection::Single(None) => String::from("No date selected"),
        Selection::Single(Some(date)) => format!("Selected: {date}"),
        Selection::Range(range) => match range.state() {
            RangeState::Empty => String::from("No range selected"),
            RangeState::StartOnly(start) => format!("From {start} to ..."),
            RangeState::Complete(start, end) => format!("From {start} to {end}"),
        },
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(Text::raw(title).width()).unwrap_or(u16::MAX);
        let x = MAIN_WIDTH.saturating_sub(width) / 2;
        self.mvprint(TITLE_LINE, x, title, TITLE_STYLE);
    }

    fn draw_header(&mut self, symbols: &[&str]) {
        for (col, sym) in zip(0u16.., symbols) {
            self.mvprint(
                HEADER_LINE,
                DAY_WIDTH * col,
                format!("{sym:^4.4}"),
                WEEKDAY_STYLE,
            );
        }
        self.hline(RULE_LINE, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, col: u16, s: &Span<'_>) {
        self.mvprint(GRID_TOP + week_no, DAY_WIDTH * col, &s.content, s.style);
    }

    fn draw_status(&mut self, y: u16, status: &str) {
        self.mvprint(y, 0, status, STATUS_STYLE);
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Rendering through a Paragraph truncates text that extends
            // beyond the calendar's area.  The Rect given to the Paragraph
            // must lie entirely within the frame.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), BASE_STYLE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronogrid::{Calendar, DateBounds, NoDisabledDates, SelectionMode};
    use ratatui::style::Color;
    use time::macros::date;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn render<F: DateFilter>(picker: &DatePicker<F>, cursor: Date) -> Buffer {
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        let month = picker.calendar().start_of_month(cursor);
        MonthView::new(picker, month, cursor).render(area, &mut buf);
        buf
    }

    fn november_picker() -> DatePicker<NoDisabledDates> {
        DatePicker::new(Calendar::iso8601(), SelectionMode::Single)
            .show_adjacent(true)
            .today(date!(2024 - 11 - 15))
    }

    #[test]
    fn test_render_month() {
        let buf = render(&november_picker(), date!(2024 - 11 - 15));
        let rows = (0..12).map(|y| row(&buf, y)).collect::<Vec<_>>();
        assert_eq!(rows[0].trim(), "November 2024");
        assert_eq!(rows[1].trim(), "Mon  Tue  Wed  Thu  Fri  Sat  Sun");
        assert_eq!(rows[2].trim(), "─".repeat(34));
        assert_eq!(rows[3].trim(), "28   29   30   31    1    2    3");
        assert_eq!(rows[4].trim(), "4    5    6    7    8    9   10");
        assert_eq!(rows[5].trim(), "11   12   13   14  [15]  16   17");
        assert_eq!(rows[6].trim(), "18   19   20   21   22   23   24");
        assert_eq!(rows[7].trim(), "25   26   27   28   29   30    1");
        assert_eq!(rows[8].trim(), "");
        assert_eq!(rows[9].trim(), "No date selected");
        // The grid is centered: (40 - 34) / 2 = 3
        assert_eq!(&rows[3][..4], "    ");
        assert_eq!(buf[(3 + 5 * 4 + 1, 5)].symbol(), "1");
        assert_eq!(buf[(3 + 5 * 4, 5)].symbol(), "[");
    }

    #[test]
    fn test_render_without_adjacent() {
        let picker = november_picker().show_adjacent(false);
        let buf = render(&picker, date!(2024 - 11 - 01));
        assert_eq!(row(&buf, 3).trim(), "[ 1]   2    3");
        assert_eq!(row(&buf, 7).trim(), "25   26   27   28   29   30");
    }

    #[test]
    fn test_render_styles() {
        let mut picker = DatePicker::new(Calendar::iso8601(), SelectionMode::Range)
            .show_adjacent(true)
            .today(date!(2024 - 11 - 15))
            .disabled_dates(DateBounds::new(..=date!(2024 - 11 - 28)));
        assert!(picker.click(date!(2024 - 11 - 05)));
        assert!(picker.click(date!(2024 - 11 - 06)));
        let buf = render(&picker, date!(2024 - 11 - 20));
        // Columns of the tens digit for Monday and Tuesday
        let mon = 3 + 1;
        let tue = 3 + 5 + 1;
        // 2024-11-05 and -06: Tuesday and Wednesday of the second week
        assert_eq!(buf[(tue + 1, 4)].bg, Color::LightCyan);
        assert_eq!(buf[(tue + 5 + 1, 4)].bg, Color::LightCyan);
        assert_eq!(buf[(mon + 1, 4)].bg, Color::Black);
        // 2024-10-28 is adjacent
        assert_eq!(buf[(mon, 3)].fg, Color::DarkGray);
        // 2024-11-15 is today
        assert_eq!(buf[(3 + 5 * 4 + 1, 5)].fg, Color::LightYellow);
        // 2024-11-29 is disabled
        assert_eq!(buf[(3 + 5 * 4 + 1, 7)].fg, Color::DarkGray);
        assert_eq!(row(&buf, 9).trim(), "From 2024-11-05 to 2024-11-06");
    }

    #[test]
    fn test_render_gregorian_header() {
        let picker = DatePicker::new(Calendar::gregorian(), SelectionMode::Single);
        let buf = render(&picker, date!(2024 - 11 - 30));
        assert_eq!(row(&buf, 1).trim(), "Sun  Mon  Tue  Wed  Thu  Fri  Sat");
        assert_eq!(row(&buf, 3).trim(), "1    2");
        assert_eq!(row(&buf, 7).trim(), "24   25   26   27   28   29  [30]");
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&Selection::Single(None)), "No date selected");
        assert_eq!(
            describe(&Selection::Single(Some(date!(2024 - 11 - 05)))),
            "Selected: 2024-11-05"
        );
        let mut sel = Selection::new(SelectionMode::Range);
        assert_eq!(describe(&sel), "No range selected");
        sel.click(date!(2024 - 11 - 05));
        assert_eq!(describe(&sel), "From 2024-11-05 to ...");
    }
}
