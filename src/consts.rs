/// Minimum valid year (inclusive)
pub const MIN_YEAR: u16 = 1;
/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Largest hour of the day
pub const MAX_HOUR: u8 = 23;
/// Largest minute of the hour
pub const MAX_MINUTE: u8 = 59;
/// Largest second of the minute (no leap seconds)
pub const MAX_SECOND: u8 = 59;
/// Largest microsecond fraction of a second
pub const MAX_SUBSECOND: u32 = 999_999;
/// Number of fractional digits kept (microsecond resolution)
pub const SUBSECOND_DIGITS: usize = 6;

/// Days in a week; ISO weekdays run `1..=DAYS_PER_WEEK` starting on Monday
pub const DAYS_PER_WEEK: u8 = 7;
/// Weeks in a regular ISO year
pub const WEEKS_IN_SHORT_YEAR: u8 = 52;
/// Weeks in a long ISO year
pub const WEEKS_IN_LONG_YEAR: u8 = 53;
/// Day of January that always falls in ISO week 1
pub(crate) const WEEK_ONE_ANCHOR_DAY: u8 = 4;

/// Largest offset hour accepted under the strict policy
pub const MAX_OFFSET_HOUR: u8 = 23;
/// Largest offset minute
pub const MAX_OFFSET_MINUTE: u8 = 59;

/// Digits in a year field
pub(crate) const YEAR_DIGITS: usize = 4;
/// Digits in every other fixed-width field (month, day, week, hour, ...)
pub(crate) const FIELD_DIGITS: usize = 2;
/// Digits in a weekday field
pub(crate) const WEEKDAY_DIGITS: usize = 1;

/// Date component separator (extended format)
pub const DATE_SEPARATOR: char = '-';
/// Time component separator (extended format)
pub const TIME_SEPARATOR: char = ':';
/// Designator introducing the week number of an ISO week date
pub const WEEK_DESIGNATOR: char = 'W';
/// Designator that may lead a time-only string
pub const TIME_DESIGNATOR: char = 'T';
/// Designator for a zero UTC offset
pub const UTC_DESIGNATOR: char = 'Z';
/// Decimal markers accepted before a fraction of a second
pub const DECIMAL_MARKERS: [char; 2] = ['.', ','];
