use crate::consts::{
    DAYS_PER_WEEK, DECEMBER, JANUARY, MAX_MONTH, WEEK_ONE_ANCHOR_DAY, WEEKS_IN_LONG_YEAR,
    WEEKS_IN_SHORT_YEAR,
};
use crate::types::days_in_month;
use crate::{CalendarDate, FormatStyle, ValueError, Year};
use std::fmt;

/// A date in the ISO week-numbering calendar.
///
/// Week 1 of an ISO year is the week holding that year's first Thursday, so
/// the ISO year can differ from the Gregorian year near New Year:
/// `2025-W01-1` is 2024-12-30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoWeekDate {
    year: u16,
    week: u8,
    weekday: u8,
}

impl IsoWeekDate {
    /// Creates a week date, checking the weekday and that the week exists
    /// in the given ISO year.
    ///
    /// # Errors
    /// `ValueError::Year` for a year outside 1-9999, `ValueError::Weekday`
    /// for a weekday outside 1-7, `ValueError::Week` for week 0, week 54+,
    /// or week 53 of a year with only 52 weeks.
    pub fn new(year: u16, week: u8, weekday: u8) -> Result<Self, ValueError> {
        let year = Year::new(year)?.get();
        if !(1..=DAYS_PER_WEEK).contains(&weekday) {
            return Err(ValueError::Weekday(weekday));
        }
        if week == 0 || week > weeks_in_year(year) {
            return Err(ValueError::Week { year, week });
        }
        Ok(Self {
            year,
            week,
            weekday,
        })
    }

    pub const fn year(&self) -> u16 {
        self.year
    }

    pub const fn week(&self) -> u8 {
        self.week
    }

    /// Day of the week, Monday = 1 through Sunday = 7.
    pub const fn weekday(&self) -> u8 {
        self.weekday
    }

    /// The Gregorian date this week date names.
    ///
    /// # Errors
    /// Returns `ValueError::Year` when the date falls outside years 1-9999,
    /// which happens only at the very end of 9999 (e.g. `9999-W52-6`).
    pub fn to_calendar_date(&self) -> Result<CalendarDate, ValueError> {
        // January 4th is always in week 1; back up to that week's Monday.
        // Days are counted from January 1st of the ISO year, zero based.
        let anchor_weekday = weekday(self.year, JANUARY, WEEK_ONE_ANCHOR_DAY);
        let anchor = i32::from(WEEK_ONE_ANCHOR_DAY) - i32::from(anchor_weekday);
        let offset = anchor
            + (i32::from(self.week) - 1) * i32::from(DAYS_PER_WEEK)
            + (i32::from(self.weekday) - 1);
        date_from_year_offset(self.year, offset)
    }

    /// Formats as `YYYY-Www-D` or `YYYYWwwD`.
    pub fn to_iso_string(&self, style: FormatStyle) -> String {
        match style {
            FormatStyle::Extended => self.to_string(),
            FormatStyle::Basic => format!("{:04}W{:02}{}", self.year, self.week, self.weekday),
        }
    }
}

impl fmt::Display for IsoWeekDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}-{}", self.year, self.week, self.weekday)
    }
}

impl TryFrom<IsoWeekDate> for CalendarDate {
    type Error = ValueError;

    fn try_from(date: IsoWeekDate) -> Result<Self, Self::Error> {
        date.to_calendar_date()
    }
}

impl From<CalendarDate> for IsoWeekDate {
    fn from(date: CalendarDate) -> Self {
        iso_week_date(date)
    }
}

/// `(y + y/4 - y/100 + y/400) mod 7`: the weekday December 31st of `y`
/// falls on, counted from Sunday = 0.
const fn dec31_weekday_index(year: i32) -> i32 {
    (year + year.div_euclid(4) - year.div_euclid(100) + year.div_euclid(400)).rem_euclid(7)
}

/// Whether the ISO year has 53 weeks.
///
/// A year is long when it ends on a Thursday, or when it starts on one
/// (the year before ended on a Wednesday).
pub const fn is_long_year(year: u16) -> bool {
    let year = year as i32;
    dec31_weekday_index(year) == 4 || dec31_weekday_index(year - 1) == 3
}

/// Number of ISO weeks in `year`: 52 or 53.
pub const fn weeks_in_year(year: u16) -> u8 {
    if is_long_year(year) {
        WEEKS_IN_LONG_YEAR
    } else {
        WEEKS_IN_SHORT_YEAR
    }
}

/// Days in all years before `year` in the proleptic Gregorian calendar.
const fn days_before_year(year: u16) -> i32 {
    let y = year as i32 - 1;
    y * 365 + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
}

/// Day of the year, January 1st = 1.
pub(crate) const fn day_of_year(year: u16, month: u8, day: u8) -> u16 {
    let mut days = day as u16;
    let mut m = JANUARY;
    while m < month {
        days += days_in_month(year, m) as u16;
        m += 1;
    }
    days
}

/// ISO day of the week, Monday = 1 through Sunday = 7.
pub(crate) const fn weekday(year: u16, month: u8, day: u8) -> u8 {
    // 0001-01-01 is day 1 and a Monday
    let ordinal = days_before_year(year) + day_of_year(year, month, day) as i32;
    // In 0..7
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (ordinal + 6).rem_euclid(DAYS_PER_WEEK as i32) as u8;
    index + 1
}

/// The date `offset` days after January 1st of `year`. The offset may reach
/// a few days into the neighbouring years but never further.
fn date_from_year_offset(year: u16, offset: i32) -> Result<CalendarDate, ValueError> {
    if offset < 0 {
        let previous = year.checked_sub(1).ok_or(ValueError::Year(0))?;
        let day = i32::from(days_in_month(previous, DECEMBER)) + 1 + offset;
        return CalendarDate::new(previous, DECEMBER, narrow_day(day));
    }

    let mut remaining = offset;
    for month in JANUARY..=MAX_MONTH {
        let length = i32::from(days_in_month(year, month));
        if remaining < length {
            return CalendarDate::new(year, month, narrow_day(remaining + 1));
        }
        remaining -= length;
    }
    CalendarDate::new(year.saturating_add(1), JANUARY, narrow_day(remaining + 1))
}

/// Week offsets stay within a few days of the year, so this never clamps
/// for a valid week date.
fn narrow_day(day: i32) -> u8 {
    u8::try_from(day).unwrap_or(0)
}

/// Converts a Gregorian date into its ISO week date.
pub(crate) fn iso_week_date(date: CalendarDate) -> IsoWeekDate {
    let (year, month, day) = (date.year(), date.month(), date.day());
    let weekday = weekday(year, month, day);
    let week = (i32::from(day_of_year(year, month, day)) - i32::from(weekday) + 10)
        / i32::from(DAYS_PER_WEEK);

    // Jan 1st of year 1 is a Monday and Dec 31st of 9999 a Friday, so the
    // ISO year never leaves 1..=9999 here.
    let (year, week) = if week < 1 {
        let previous = year - 1;
        (previous, weeks_in_year(previous))
    } else if week > i32::from(weeks_in_year(year)) {
        (year + 1, 1)
    } else {
        // Between 1 and 53
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let week = week as u8;
        (year, week)
    };
    IsoWeekDate {
        year,
        week,
        weekday,
    }
}
