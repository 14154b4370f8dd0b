use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, TimeZone, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Full weekday names, indexed from Sunday.
const WEEKDAY_LABELS: [&str; 7] = [
    "DOMINGO",
    "SEGUNDA-FEIRA",
    "TERÇA-FEIRA",
    "QUARTA-FEIRA",
    "QUINTA-FEIRA",
    "SEXTA-FEIRA",
    "SÁBADO",
];

/// Grid column headers, indexed from Sunday.
const WEEKDAY_SHORT_LABELS: [&str; 7] = ["DOM", "SEG", "TER", "QUA", "QUI", "SEX", "SÁB"];

const MONTH_LABELS: [&str; 12] = [
    "JANEIRO",
    "FEVEREIRO",
    "MARÇO",
    "ABRIL",
    "MAIO",
    "JUNHO",
    "JULHO",
    "AGOSTO",
    "SETEMBRO",
    "OUTUBRO",
    "NOVEMBRO",
    "DEZEMBRO",
];

/// A date truncated to day granularity.
///
/// Every constructor drops time-of-day, so two values compare equal exactly
/// when they name the same calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Calendar day of `instant` as seen in its own time zone.
    pub fn from_datetime<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self(instant.date_naive())
    }

    pub fn naive(self) -> NaiveDate {
        self.0
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn next_day(self) -> Self {
        Self(self.0 + Duration::days(1))
    }

    /// Every day between `self` and `other`, inclusive, in ascending order
    /// regardless of which of the two comes first.
    pub fn span_to(self, other: CalendarDate) -> Vec<CalendarDate> {
        let (start, end) = if self <= other {
            (self, other)
        } else {
            (other, self)
        };
        days_in_month(start, end)
    }

    /// True when `self` falls within the inclusive span between `a` and `b`.
    pub fn is_between(self, a: CalendarDate, b: CalendarDate) -> bool {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        start <= self && self <= end
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<NaiveDateTime> for CalendarDate {
    fn from(instant: NaiveDateTime) -> Self {
        Self(instant.date())
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// First and last calendar day of the month containing `anchor`.
pub fn month_bounds(anchor: CalendarDate) -> (CalendarDate, CalendarDate) {
    let first = anchor.0 - Duration::days(i64::from(anchor.0.day0()));
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    (CalendarDate(first), CalendarDate(last))
}

/// Inclusive enumeration of the days from `first` to `last`.
/// Empty when `first` is after `last`.
pub fn days_in_month(first: CalendarDate, last: CalendarDate) -> Vec<CalendarDate> {
    let mut days = Vec::new();
    let mut current = first;

    while current <= last {
        days.push(current);
        if current == last {
            break;
        }
        current = current.next_day();
    }
    days
}

/// Empty grid cells before day 1 in a Sunday-first week (0 = Sunday).
pub fn leading_blank_count(first: CalendarDate) -> u32 {
    first.weekday().num_days_from_sunday()
}

pub fn weekday_label(date: CalendarDate) -> String {
    WEEKDAY_LABELS[date.weekday().num_days_from_sunday() as usize].to_string()
}

pub fn day_number_label(date: CalendarDate) -> String {
    date.day().to_string()
}

/// "MAIO/2024"; the default reference-month header value.
pub fn month_year_label(date: CalendarDate) -> String {
    format!("{}/{}", MONTH_LABELS[date.0.month0() as usize], date.year())
}

/// First day of the month `delta` months away from the month of `anchor`.
pub fn add_months(anchor: CalendarDate, delta: i32) -> CalendarDate {
    let (first, _) = month_bounds(anchor);
    let shift = Months::new(delta.unsigned_abs());
    let moved = if delta >= 0 {
        first.0.checked_add_months(shift)
    } else {
        first.0.checked_sub_months(shift)
    };
    moved.map(CalendarDate).unwrap_or(first)
}

/// Sunday-first layout of one month: leading blanks followed by one cell per day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    first: CalendarDate,
    last: CalendarDate,
    cells: Vec<Option<CalendarDate>>,
}

impl MonthGrid {
    pub fn for_month(anchor: CalendarDate) -> Self {
        let (first, last) = month_bounds(anchor);
        let blanks = leading_blank_count(first) as usize;
        let days = days_in_month(first, last);

        let mut cells = Vec::with_capacity(blanks + days.len());
        cells.resize(blanks, None);
        cells.extend(days.into_iter().map(Some));

        Self { first, last, cells }
    }

    pub fn column_labels() -> [&'static str; 7] {
        WEEKDAY_SHORT_LABELS
    }

    pub fn first_day(&self) -> CalendarDate {
        self.first
    }

    pub fn last_day(&self) -> CalendarDate {
        self.last
    }

    pub fn cells(&self) -> &[Option<CalendarDate>] {
        &self.cells
    }

    /// Rows of seven cells; the final row may be shorter.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<CalendarDate>]> {
        self.cells.chunks(7)
    }
}
