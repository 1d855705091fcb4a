mod app;
mod help;
mod theme;
mod widget;
use crate::app::App;
use anyhow::Context;
use chronogrid::{
    Calendar, CalendarSystem, DateBounds, DatePicker, FirstWeekday, RangeState, Selection,
    SelectionMode,
};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime,
    UtcOffset,
};
use tracing_subscriber::EnvFilter;

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Options {
    date: Option<Date>,
    range: bool,
    first_weekday: Option<FirstWeekday>,
    iso: bool,
    adjacent: bool,
    min: Option<Date>,
    max: Option<Date>,
    log: Option<PathBuf>,
}

impl Options {
    fn calendar(&self, offset: UtcOffset) -> Calendar {
        let system = if self.iso {
            CalendarSystem::Iso8601
        } else {
            CalendarSystem::Gregorian
        };
        let mut calendar = Calendar::new(system).with_offset(offset);
        if let Some(fw) = self.first_weekday {
            calendar = calendar.with_first_weekday(fw);
        }
        calendar
    }

    fn mode(&self) -> SelectionMode {
        if self.range {
            SelectionMode::Range
        } else {
            SelectionMode::Single
        }
    }

    fn bounds(&self) -> DateBounds {
        match (self.min, self.max) {
            (Some(min), Some(max)) => DateBounds::new(min..=max),
            (Some(min), None) => DateBounds::new(min..),
            (None, Some(max)) => DateBounds::new(..=max),
            (None, None) => DateBounds::unbounded(),
        }
    }
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('r') | Arg::Long("range") => opts.range = true,
                Arg::Short('w') | Arg::Long("first-weekday") => {
                    opts.first_weekday = Some(parser.value()?.parse_with(parse_weekday)?);
                }
                Arg::Long("iso") => opts.iso = true,
                Arg::Short('a') | Arg::Long("adjacent") => opts.adjacent = true,
                Arg::Long("min") => opts.min = Some(parser.value()?.parse_with(parse_date)?),
                Arg::Long("max") => opts.max = Some(parser.value()?.parse_with(parse_date)?),
                Arg::Long("log") => opts.log = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if opts.date.is_none() => {
                    opts.date = Some(value.parse_with(parse_date)?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        if let (Some(min), Some(max)) = (opts.min, opts.max) {
            if min > max {
                return Err(format!("--min date {min} is after --max date {max}").into());
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let now = OffsetDateTime::now_local().context("failed to determine local time")?;
                if let Some(path) = &opts.log {
                    init_logging(path)?;
                }
                let calendar = opts.calendar(now.offset());
                let today = calendar.day_of(now);
                let picker = DatePicker::new(calendar, opts.mode())
                    .show_adjacent(opts.adjacent)
                    .today(today)
                    .disabled_dates(opts.bounds());
                let mut app = App::new(picker, today);
                if let Some(date) = opts.date {
                    app = app.start_date(date);
                }
                tracing::info!(%today, ?opts, "starting date picker");
                let outcome = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    Ok(app.run(terminal)?)
                })?;
                if let Some(s) = outcome.as_ref().and_then(format_selection) {
                    println!("{s}");
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: chronogrid [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Pick a date or a range of dates from a terminal calendar");
                println!();
                println!("Options:");
                println!("  -r, --range               Pick a start/end range instead of a single date");
                println!("  -w, --first-weekday <N>   First weekday, 1 (Sunday) to 7 (Saturday)");
                println!("      --iso                 Use the ISO 8601 calendar (weeks start on Monday)");
                println!("  -a, --adjacent            Show days of the adjacent months");
                println!("      --min <YYYY-MM-DD>    Disable dates before this one");
                println!("      --max <YYYY-MM-DD>    Disable dates after this one");
                println!("      --log <FILE>          Write debug logs to FILE");
                println!("  -h, --help                Display this help message and exit");
                println!("  -V, --version             Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn parse_date(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, &YMD_FMT)
}

fn parse_weekday(s: &str) -> anyhow::Result<FirstWeekday> {
    let index = s
        .parse::<u8>()
        .with_context(|| format!("invalid weekday number {s:?}"))?;
    Ok(FirstWeekday::new(index)?)
}

/// The text printed for an accepted selection, if anything was selected
fn format_selection(selection: &Selection) -> Option<String> {
    match *selection {
        Selection::Single(date) => date.map(|d| d.to_string()),
        Selection::Range(range) => match range.state() {
            RangeState::Empty => None,
            RangeState::StartOnly(start) => Some(start.to_string()),
            RangeState::Complete(start, end) => Some(format!("{start} {end}")),
        },
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chronogrid=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronogrid::DateRange;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_iter(
            std::iter::once("chronogrid").chain(args.iter().copied()),
        ))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse(&[]).unwrap(), Command::Run(Options::default()));
    }

    #[test]
    fn test_all_options() {
        let cmd = parse(&[
            "--range",
            "-w",
            "2",
            "-a",
            "--min",
            "2024-11-01",
            "--max=2024-12-31",
            "--log",
            "picker.log",
            "2024-11-15",
        ])
        .unwrap();
        assert_eq!(
            cmd,
            Command::Run(Options {
                date: Some(date!(2024 - 11 - 15)),
                range: true,
                first_weekday: Some(FirstWeekday::MONDAY),
                iso: false,
                adjacent: true,
                min: Some(date!(2024 - 11 - 01)),
                max: Some(date!(2024 - 12 - 31)),
                log: Some(PathBuf::from("picker.log")),
            })
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["-r", "--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_bad_args() {
        assert!(parse(&["2024-13-01"]).is_err());
        assert!(parse(&["-w", "8"]).is_err());
        assert!(parse(&["-w", "monday"]).is_err());
        assert!(parse(&["2024-11-01", "2024-11-02"]).is_err());
        assert!(parse(&["--min", "2024-12-01", "--max", "2024-11-01"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
    }

    #[test]
    fn test_options_calendar() {
        let opts = Options {
            iso: true,
            ..Options::default()
        };
        let cal = opts.calendar(UtcOffset::UTC);
        assert_eq!(cal.system(), CalendarSystem::Iso8601);
        assert_eq!(cal.first_weekday(), FirstWeekday::MONDAY);
        let opts = Options {
            first_weekday: Some(FirstWeekday::SATURDAY),
            ..Options::default()
        };
        let cal = opts.calendar(UtcOffset::UTC);
        assert_eq!(cal.system(), CalendarSystem::Gregorian);
        assert_eq!(cal.first_weekday(), FirstWeekday::SATURDAY);
    }

    #[test]
    fn test_options_bounds() {
        let opts = Options {
            min: Some(date!(2024 - 11 - 10)),
            ..Options::default()
        };
        let bounds = opts.bounds();
        assert!(!bounds.contains(&date!(2024 - 11 - 09)));
        assert!(bounds.contains(&date!(2024 - 11 - 10)));
        assert!(bounds.contains(&Date::MAX));
        assert!(Options::default().bounds().contains(&Date::MIN));
    }

    #[test]
    fn test_format_selection() {
        assert_eq!(format_selection(&Selection::Single(None)), None);
        assert_eq!(
            format_selection(&Selection::Single(Some(date!(2024 - 11 - 05)))),
            Some(String::from("2024-11-05"))
        );
        assert_eq!(
            format_selection(&Selection::Range(DateRange::new(
                Some(date!(2024 - 11 - 05)),
                None
            ))),
            Some(String::from("2024-11-05"))
        );
        assert_eq!(
            format_selection(&Selection::Range(DateRange::new(
                Some(date!(2024 - 11 - 09)),
                Some(date!(2024 - 11 - 05))
            ))),
            Some(String::from("2024-11-05 2024-11-09"))
        );
        assert_eq!(format_selection(&Selection::new(SelectionMode::Range)), None);
    }
}
