//! Traditional Chinese (zh-TW) date/time formatting.
//!
//! Output follows the zh-TW locale's default date-time form:
//! `2024/1/1 上午8:00:00`, a 12-hour clock with a 上午/下午 marker.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Timelike, Utc};

/// Shown in the time column when a record has no scheduled departure.
pub const NO_DATA: &str = "無資料";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Format a wall-clock time the way zh-TW `toLocaleString` does.
#[must_use]
pub fn format_zh_tw(time: NaiveDateTime) -> String {
    let (is_pm, hour) = time.hour12();
    let marker = if is_pm { "下午" } else { "上午" };
    format!(
        "{}/{}/{} {marker}{hour}:{:02}:{:02}",
        time.year(),
        time.month(),
        time.day(),
        time.minute(),
        time.second()
    )
}

/// Parse an upstream timestamp into wall-clock time at `offset`.
///
/// Timestamps carrying an offset are converted; timestamps without one are
/// taken as already local.
#[must_use]
pub fn parse_timestamp(raw: &str, offset: FixedOffset) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&offset).naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Text for the scheduled-departure column.
///
/// Absent or empty values show [`NO_DATA`]; unparseable values are shown
/// as received.
#[must_use]
pub fn departure_cell(raw: Option<&str>, offset: FixedOffset) -> String {
    match raw.map(str::trim) {
        None | Some("") => NO_DATA.to_string(),
        Some(value) => parse_timestamp(value, offset)
            .map_or_else(|| value.to_string(), format_zh_tw),
    }
}

/// The current time at `offset`, formatted for the last-updated line.
#[must_use]
pub fn now_zh_tw(offset: FixedOffset) -> String {
    format_zh_tw(Utc::now().with_timezone(&offset).naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn taipei() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_format_morning() {
        assert_eq!(format_zh_tw(at(8, 0, 0)), "2024/1/1 上午8:00:00");
    }

    #[test]
    fn test_format_afternoon() {
        assert_eq!(format_zh_tw(at(15, 5, 9)), "2024/1/1 下午3:05:09");
    }

    #[test]
    fn test_format_midnight_and_noon() {
        assert_eq!(format_zh_tw(at(0, 30, 0)), "2024/1/1 上午12:30:00");
        assert_eq!(format_zh_tw(at(12, 0, 0)), "2024/1/1 下午12:00:00");
    }

    #[test]
    fn test_format_two_digit_month_and_day() {
        let time = NaiveDate::from_ymd_opt(2024, 12, 25)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert_eq!(format_zh_tw(time), "2024/12/25 下午11:59:59");
    }

    #[test]
    fn test_parse_naive() {
        assert_eq!(parse_timestamp("2024-01-01T08:00:00", taipei()), Some(at(8, 0, 0)));
        assert_eq!(parse_timestamp("2024-01-01T08:00", taipei()), Some(at(8, 0, 0)));
    }

    #[test]
    fn test_parse_with_offset_converts() {
        assert_eq!(
            parse_timestamp("2024-01-01T00:00:00Z", taipei()),
            Some(at(8, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-01T08:00:00+08:00", taipei()),
            Some(at(8, 0, 0))
        );
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_timestamp("tomorrow", taipei()), None);
    }

    #[test]
    fn test_departure_cell() {
        assert_eq!(departure_cell(None, taipei()), "無資料");
        assert_eq!(departure_cell(Some(""), taipei()), "無資料");
        assert_eq!(
            departure_cell(Some("2024-01-01T08:00:00"), taipei()),
            "2024/1/1 上午8:00:00"
        );
        assert_eq!(departure_cell(Some("soon"), taipei()), "soon");
    }

    #[test]
    fn test_now_is_formatted() {
        let now = now_zh_tw(taipei());
        assert!(now.contains('/'));
        assert!(now.contains("上午") || now.contains("下午"));
    }
}
