use crate::consts::TIME_DESIGNATOR;
use crate::date::{CalendarDate, DateFields};
use crate::error::ParseError;
use crate::input::Input;
use crate::offset::{OffsetFields, UtcOffset};
use crate::options::ParseOptions;
use crate::parser::Parser;
use crate::time::{TimeFields, TimeOfDay};
use crate::{FormatStyle, ValueError};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// A calendar date and a time of day, with an optional UTC offset.
///
/// A value without an offset is naive: it says nothing about which instant
/// it names. That is different from an offset of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeValue {
    date: CalendarDate,
    time: TimeOfDay,
    offset: Option<UtcOffset>,
}

impl DateTimeValue {
    pub const fn new(date: CalendarDate, time: TimeOfDay, offset: Option<UtcOffset>) -> Self {
        Self { date, time, offset }
    }

    /// A date-time with no offset.
    pub const fn naive(date: CalendarDate, time: TimeOfDay) -> Self {
        Self::new(date, time, None)
    }

    pub const fn date(&self) -> CalendarDate {
        self.date
    }

    pub const fn time(&self) -> TimeOfDay {
        self.time
    }

    pub const fn offset(&self) -> Option<UtcOffset> {
        self.offset
    }

    pub const fn is_naive(&self) -> bool {
        self.offset.is_none()
    }

    /// Formats every component in the same style, joined by `T`.
    pub fn to_iso_string(&self, style: FormatStyle) -> String {
        let mut out = self.date.to_iso_string(style);
        out.push(TIME_DESIGNATOR);
        out.push_str(&self.time.to_iso_string(style));
        if let Some(offset) = self.offset {
            out.push_str(&offset.to_iso_string(style));
        }
        out
    }
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{TIME_DESIGNATOR}{}", self.date, self.time)?;
        if let Some(offset) = self.offset {
            write!(f, "{offset}")?;
        }
        Ok(())
    }
}

/// A time of day with an optional UTC offset, as read from time-only input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetTime {
    pub time: TimeOfDay,
    pub offset: Option<UtcOffset>,
}

impl OffsetTime {
    pub fn to_iso_string(&self, style: FormatStyle) -> String {
        let mut out = self.time.to_iso_string(style);
        if let Some(offset) = self.offset {
            out.push_str(&offset.to_iso_string(style));
        }
        out
    }
}

impl fmt::Display for OffsetTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.time)?;
        if let Some(offset) = self.offset {
            write!(f, "{offset}")?;
        }
        Ok(())
    }
}

fn resolve_offset(
    offset: Option<OffsetFields>,
    options: &ParseOptions,
) -> Result<Option<UtcOffset>, ValueError> {
    offset
        .map(|fields| fields.resolve(options.offset_hours))
        .transpose()
}

/// Range checks parsed fields and builds the date-time. The date is checked
/// first, then the time, then the offset.
pub(crate) fn compose_datetime(
    date: DateFields,
    time: TimeFields,
    offset: Option<OffsetFields>,
    options: &ParseOptions,
) -> Result<DateTimeValue, ValueError> {
    let date = date.resolve()?;
    let time = time.resolve()?;
    let offset = resolve_offset(offset, options)?;
    Ok(DateTimeValue::new(date, time, offset))
}

pub(crate) fn compose_offset_time(
    time: TimeFields,
    offset: Option<OffsetFields>,
    options: &ParseOptions,
) -> Result<OffsetTime, ValueError> {
    Ok(OffsetTime {
        time: time.resolve()?,
        offset: resolve_offset(offset, options)?,
    })
}

/// Values that can be read back from their own ISO text with the default
/// options. Backs `FromStr` and `Deserialize`.
trait FromIsoText: Sized {
    const EXPECTING: &'static str;

    fn from_iso_text(input: Input<'_>) -> Result<Self, ParseError>;
}

impl FromIsoText for CalendarDate {
    const EXPECTING: &'static str = "an ISO 8601 date string";

    fn from_iso_text(input: Input<'_>) -> Result<Self, ParseError> {
        Parser::default().parse_date(input)
    }
}

impl FromIsoText for TimeOfDay {
    const EXPECTING: &'static str = "an ISO 8601 time string";

    fn from_iso_text(input: Input<'_>) -> Result<Self, ParseError> {
        Parser::default().parse_time(input)
    }
}

impl FromIsoText for UtcOffset {
    const EXPECTING: &'static str = "an ISO 8601 UTC offset string";

    fn from_iso_text(input: Input<'_>) -> Result<Self, ParseError> {
        Parser::default().parse_offset(input)
    }
}

impl FromIsoText for OffsetTime {
    const EXPECTING: &'static str = "an ISO 8601 time string with an optional offset";

    fn from_iso_text(input: Input<'_>) -> Result<Self, ParseError> {
        Parser::default().parse_offset_time(input)
    }
}

impl FromIsoText for DateTimeValue {
    const EXPECTING: &'static str = "an ISO 8601 date-time string";

    fn from_iso_text(input: Input<'_>) -> Result<Self, ParseError> {
        Parser::default().parse_datetime(input)
    }
}

struct IsoTextVisitor<T>(PhantomData<T>);

impl<T: FromIsoText> serde::de::Visitor<'_> for IsoTextVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(T::EXPECTING)
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<T, E> {
        T::from_iso_text(Input::Str(value)).map_err(E::custom)
    }

    // Binary payloads are a type mismatch, reported by the parser itself.
    fn visit_bytes<E: serde::de::Error>(self, value: &[u8]) -> Result<T, E> {
        T::from_iso_text(Input::Bytes(value)).map_err(E::custom)
    }
}

macro_rules! iso_text_impls {
    ($($ty:ty),+ $(,)?) => {$(
        impl FromStr for $ty {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as FromIsoText>::from_iso_text(Input::Str(s))
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                deserializer.deserialize_str(IsoTextVisitor(PhantomData))
            }
        }
    )+};
}

iso_text_impls!(CalendarDate, TimeOfDay, UtcOffset, OffsetTime, DateTimeValue);

#[cfg(test)]
impl quickcheck::Arbitrary for CalendarDate {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use crate::consts::{MAX_MONTH, MAX_YEAR};

        let year = u16::arbitrary(g) % MAX_YEAR + 1;
        let month = u8::arbitrary(g) % MAX_MONTH + 1;
        let day = u8::arbitrary(g) % crate::days_in_month(year, month) + 1;
        match Self::new(year, month, day) {
            Ok(date) => date,
            Err(err) => unreachable!("constrained date is valid: {err}"),
        }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for TimeOfDay {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use crate::consts::{MAX_HOUR, MAX_MINUTE, MAX_SECOND, MAX_SUBSECOND};

        let hour = u8::arbitrary(g) % (MAX_HOUR + 1);
        let minute = u8::arbitrary(g) % (MAX_MINUTE + 1);
        let second = u8::arbitrary(g) % (MAX_SECOND + 1);
        // Whole seconds are common in real input; keep them common here too
        let subsecond = if bool::arbitrary(g) {
            0
        } else {
            u32::arbitrary(g) % (MAX_SUBSECOND + 1)
        };
        match Self::new(hour, minute, second, subsecond) {
            Ok(time) => time,
            Err(err) => unreachable!("constrained time is valid: {err}"),
        }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for UtcOffset {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use crate::consts::{MAX_OFFSET_HOUR, MAX_OFFSET_MINUTE};

        let bound = i16::from(MAX_OFFSET_HOUR) * 60 + i16::from(MAX_OFFSET_MINUTE);
        let minutes = i16::arbitrary(g) % (bound + 1);
        match Self::from_minutes(minutes) {
            Ok(offset) => offset,
            Err(err) => unreachable!("constrained offset is valid: {err}"),
        }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for DateTimeValue {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Self::new(
            CalendarDate::arbitrary(g),
            TimeOfDay::arbitrary(g),
            Option::<UtcOffset>::arbitrary(g),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::separator::Sign;
    use serde::Deserialize;
    use serde::de::IntoDeserializer;
    use serde::de::value::{BytesDeserializer, Error as ValueDeError};

    fn date(year: u16, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    fn time(hour: u8, minute: u8, second: u8, subsecond: u32) -> TimeOfDay {
        TimeOfDay::new(hour, minute, second, subsecond).unwrap()
    }

    #[test]
    fn test_datetime_accessors() {
        let offset = UtcOffset::from_hm(Sign::Negative, 5, 0).unwrap();
        let value = DateTimeValue::new(date(2025, 1, 2), time(3, 4, 5, 0), Some(offset));
        assert_eq!(value.date(), date(2025, 1, 2));
        assert_eq!(value.time(), time(3, 4, 5, 0));
        assert_eq!(value.offset(), Some(offset));
        assert!(!value.is_naive());

        let naive = DateTimeValue::naive(date(2025, 1, 2), TimeOfDay::MIDNIGHT);
        assert!(naive.is_naive());
        assert_ne!(
            naive,
            DateTimeValue::new(date(2025, 1, 2), TimeOfDay::MIDNIGHT, Some(UtcOffset::UTC))
        );
    }

    #[test]
    fn test_datetime_display() {
        let value = DateTimeValue::new(
            date(2025, 1, 2),
            time(3, 4, 5, 120_000),
            Some(UtcOffset::from_minutes(330).unwrap()),
        );
        assert_eq!(value.to_string(), "2025-01-02T03:04:05.120000+05:30");
        assert_eq!(
            value.to_iso_string(FormatStyle::Basic),
            "20250102T030405.120000+0530"
        );

        let naive = DateTimeValue::naive(date(9, 12, 31), time(23, 59, 59, 0));
        assert_eq!(naive.to_string(), "0009-12-31T23:59:59");
    }

    #[test]
    fn test_offset_time_display() {
        let value = OffsetTime {
            time: time(12, 30, 0, 0),
            offset: Some(UtcOffset::UTC),
        };
        assert_eq!(value.to_string(), "12:30:00+00:00");
        assert_eq!(value.to_iso_string(FormatStyle::Basic), "123000+0000");

        let naive = OffsetTime {
            time: time(12, 30, 0, 0),
            offset: None,
        };
        assert_eq!(naive.to_string(), "12:30:00");
    }

    #[test]
    fn test_compose_checks_date_before_time() {
        let fields = DateFields::Calendar {
            year: 2009,
            month: 2,
            day: 29,
        };
        let bad_time = TimeFields {
            hour: 24,
            ..TimeFields::default()
        };
        assert_eq!(
            compose_datetime(fields, bad_time, None, &ParseOptions::default()),
            Err(ValueError::Day {
                year: 2009,
                month: 2,
                day: 29
            })
        );
    }

    #[test]
    fn test_compose_applies_offset_policy() {
        let fields = DateFields::Week {
            year: 2025,
            week: 1,
            weekday: 1,
        };
        let offset = Some(OffsetFields::Fixed {
            sign: Sign::Positive,
            hours: 25,
            minutes: 0,
        });
        let strict = ParseOptions::default();
        assert_eq!(
            compose_datetime(fields, TimeFields::default(), offset, &strict),
            Err(ValueError::OffsetHour(25))
        );

        let loose = strict.with_offset_hours(crate::OffsetHourPolicy::Unconstrained);
        let value = compose_datetime(fields, TimeFields::default(), offset, &loose).unwrap();
        assert_eq!(value.date(), date(2024, 12, 30));
        assert_eq!(value.offset().map(|o| o.total_minutes()), Some(25 * 60));
    }

    #[test]
    fn test_from_str() {
        let value: DateTimeValue = "2025-01-02T03:04:05Z".parse().unwrap();
        assert_eq!(value.offset(), Some(UtcOffset::UTC));

        let value: CalendarDate = "2015W534".parse().unwrap();
        assert_eq!(value, date(2015, 12, 31));

        let value: TimeOfDay = "12:30:45,5".parse().unwrap();
        assert_eq!(value, time(12, 30, 45, 500_000));

        let value: UtcOffset = "-0330".parse().unwrap();
        assert_eq!(value.total_minutes(), -210);

        let value: OffsetTime = "1230+01".parse().unwrap();
        assert_eq!(value.offset.map(|o| o.total_minutes()), Some(60));

        let err = "2009-02-29".parse::<CalendarDate>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_serde_string_format() {
        let value = DateTimeValue::new(
            date(2025, 1, 2),
            time(3, 4, 5, 6),
            Some(UtcOffset::from_minutes(-60).unwrap()),
        );
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#""2025-01-02T03:04:05.000006-01:00""#);
        let parsed: DateTimeValue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, value);

        let json = serde_json::to_string(&date(2024, 2, 29)).unwrap();
        assert_eq!(json, r#""2024-02-29""#);
        let parsed: CalendarDate = serde_json::from_str(r#""20240229""#).unwrap();
        assert_eq!(parsed, date(2024, 2, 29));

        let json = serde_json::to_string(&UtcOffset::UTC).unwrap();
        assert_eq!(json, r#""+00:00""#);
        let parsed: UtcOffset = serde_json::from_str(r#""Z""#).unwrap();
        assert_eq!(parsed, UtcOffset::UTC);
    }

    #[test]
    fn test_serde_rejects_invalid_text() {
        assert!(serde_json::from_str::<CalendarDate>(r#""2009-02-29""#).is_err());
        assert!(serde_json::from_str::<TimeOfDay>(r#""24:00""#).is_err());
        assert!(serde_json::from_str::<DateTimeValue>("20090229").is_err());
    }

    #[test]
    fn test_serde_bytes_are_a_type_mismatch() {
        let deserializer = BytesDeserializer::<ValueDeError>::new(b"2009-03-01");
        let err = CalendarDate::deserialize(deserializer).unwrap_err();
        assert!(err.to_string().contains("expected text"), "{err}");

        let deserializer: serde::de::value::StrDeserializer<'_, ValueDeError> =
            "2009-03-01".into_deserializer();
        assert_eq!(
            CalendarDate::deserialize(deserializer).unwrap(),
            date(2009, 3, 1)
        );
    }

    quickcheck::quickcheck! {
        fn prop_date_round_trip(value: CalendarDate) -> bool {
            [FormatStyle::Extended, FormatStyle::Basic]
                .into_iter()
                .all(|style| crate::parse_date(&value.to_iso_string(style)) == Ok(value))
        }

        fn prop_time_round_trip(value: TimeOfDay) -> bool {
            [FormatStyle::Extended, FormatStyle::Basic]
                .into_iter()
                .all(|style| crate::parse_time(&value.to_iso_string(style)) == Ok(value))
        }

        fn prop_datetime_round_trip(value: DateTimeValue) -> bool {
            [FormatStyle::Extended, FormatStyle::Basic]
                .into_iter()
                .all(|style| crate::parse_datetime(&value.to_iso_string(style)) == Ok(value))
        }

        fn prop_datetime_display_round_trip(value: DateTimeValue) -> bool {
            value.to_string().parse::<DateTimeValue>() == Ok(value)
        }

        fn prop_week_date_round_trip(value: CalendarDate) -> bool {
            let week = value.iso_week_date();
            let text = week.to_iso_string(FormatStyle::Basic);
            week.to_calendar_date() == Ok(value) && crate::parse_date(&text) == Ok(value)
        }
    }
}
