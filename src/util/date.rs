use lazy_static::lazy_static;
use regex::Regex;
pub use time::OffsetDateTime;
use time::{Date, Month, Time};

use crate::util::basic::SError;

/// Date layouts observed across broker exports. Every layout may carry an
/// optional time-of-day tail, which is preserved in the parsed timestamp.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DateConvention {
    Iso,
    DayMonthYearSlash,
    MonthDayYearSlash,
    DayMonthYearDash,
}

lazy_static! {
    static ref YMD_RE: Regex = Regex::new(
        r"^(\d{4})[/.\-](\d{1,2})[/.\-](\d{1,2})(?:[ T](\d{1,2}):(\d{2})(?::(\d{2}))?)?"
    )
    .unwrap();
    static ref DMY_OR_MDY_RE: Regex = Regex::new(
        r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{2,4})(?:[ T](\d{1,2}):(\d{2})(?::(\d{2}))?)?"
    )
    .unwrap();
}

fn build_datetime(
    year: i32,
    month: u32,
    day: u32,
    hms: (u32, u32, u32),
) -> Result<OffsetDateTime, SError> {
    let month = Month::try_from(
        u8::try_from(month).map_err(|_| format!("Month {month} out of range"))?,
    )
    .map_err(|e| format!("{e}"))?;
    let date = Date::from_calendar_date(
        year,
        month,
        u8::try_from(day).map_err(|_| format!("Day {day} out of range"))?,
    )
    .map_err(|e| format!("{e}"))?;
    let (h, m, s) = hms;
    let time =
        Time::from_hms(h as u8, m as u8, s as u8).map_err(|e| format!("{e}"))?;
    Ok(date.with_time(time).assume_utc())
}

fn cap_u32(caps: &regex::Captures, i: usize) -> u32 {
    caps.get(i)
        .map(|m| m.as_str().parse::<u32>().unwrap_or(0))
        .unwrap_or(0)
}

/// Parses a date or date-time cell into a UTC timestamp.
///
/// ISO forms (with or without a time tail) are always accepted, since brokers
/// occasionally switch their exports to ISO without notice. The declared
/// convention only decides how an ambiguous two-number prefix is read.
pub fn parse_datetime(
    raw: &str,
    convention: DateConvention,
) -> Result<OffsetDateTime, SError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err("Empty date value".to_string());
    }

    if let Some(caps) = YMD_RE.captures(s) {
        let year: i32 =
            caps[1].parse().map_err(|_| format!("Bad year in \"{s}\""))?;
        return build_datetime(
            year,
            cap_u32(&caps, 2),
            cap_u32(&caps, 3),
            (cap_u32(&caps, 4), cap_u32(&caps, 5), cap_u32(&caps, 6)),
        );
    }

    let caps = match convention {
        DateConvention::Iso => None,
        _ => DMY_OR_MDY_RE.captures(s),
    };
    let caps = caps.ok_or(format!("Unable to parse date \"{s}\""))?;

    let a = cap_u32(&caps, 1);
    let b = cap_u32(&caps, 2);
    let (day, month) = match convention {
        DateConvention::MonthDayYearSlash => (b, a),
        _ => (a, b),
    };
    let mut year: i32 =
        caps[3].parse().map_err(|_| format!("Bad year in \"{s}\""))?;
    if caps[3].len() == 2 {
        year += 2000;
    }
    build_datetime(
        year,
        month,
        day,
        (cap_u32(&caps, 4), cap_u32(&caps, 5), cap_u32(&caps, 6)),
    )
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::{parse_datetime, DateConvention};

    #[test]
    fn test_parse_iso() {
        let d = parse_datetime("2024-01-15", DateConvention::Iso).unwrap();
        assert_eq!(d, datetime!(2024-01-15 00:00:00 UTC));

        let d = parse_datetime("2024-01-15 10:30:00", DateConvention::Iso).unwrap();
        assert_eq!(d, datetime!(2024-01-15 10:30:00 UTC));

        let d = parse_datetime("2024-01-15T10:30:00Z", DateConvention::Iso).unwrap();
        assert_eq!(d, datetime!(2024-01-15 10:30:00 UTC));

        parse_datetime("2024-13-01", DateConvention::Iso).unwrap_err();
        parse_datetime("2024-01-41", DateConvention::Iso).unwrap_err();
        parse_datetime("", DateConvention::Iso).unwrap_err();
    }

    #[test]
    fn test_parse_day_first() {
        let d = parse_datetime(
            "15/01/2024 10:30:00",
            DateConvention::DayMonthYearSlash,
        )
        .unwrap();
        assert_eq!(d, datetime!(2024-01-15 10:30:00 UTC));

        let d =
            parse_datetime("01-03-2024", DateConvention::DayMonthYearDash).unwrap();
        assert_eq!(d, datetime!(2024-03-01 00:00:00 UTC));

        // Two digit years are read as 20xx.
        let d =
            parse_datetime("15/01/24", DateConvention::DayMonthYearSlash).unwrap();
        assert_eq!(d, datetime!(2024-01-15 00:00:00 UTC));
    }

    #[test]
    fn test_parse_month_first() {
        let d =
            parse_datetime("01/15/2024", DateConvention::MonthDayYearSlash).unwrap();
        assert_eq!(d, datetime!(2024-01-15 00:00:00 UTC));

        parse_datetime("15/01/2024", DateConvention::MonthDayYearSlash).unwrap_err();
    }

    #[test]
    fn test_iso_always_accepted() {
        // Day-first exports sometimes flip to ISO mid-history.
        let d =
            parse_datetime("2024-01-15", DateConvention::DayMonthYearSlash).unwrap();
        assert_eq!(d, datetime!(2024-01-15 00:00:00 UTC));
    }

    #[test]
    fn test_iso_rejects_day_first() {
        parse_datetime("15/01/2024", DateConvention::Iso).unwrap_err();
    }
}
