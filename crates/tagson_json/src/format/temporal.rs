use alloc::format;
use alloc::string::String;
use core::time::Duration;

/// Formats a duration as ISO-8601 seconds, e.g. `PT1.5S`.
pub(crate) fn format_duration(value: Duration) -> String {
    format!("PT{}S", value.as_secs_f64())
}

/// Parses `P[nD][T[nH][nM][nS]]` with an optional fraction on the last unit.
pub(crate) fn parse_duration(text: &str) -> Option<Duration> {
    let rest = text.strip_prefix('P').or_else(|| text.strip_prefix('p'))?;
    let (days, time) = match rest.find(['T', 't']) {
        Some(index) => (&rest[..index], Some(&rest[index + 1..])),
        None => (rest, None),
    };

    let mut seconds = 0.0_f64;
    if !days.is_empty() {
        seconds += parse_units(days, &[('D', 86_400.0)])?;
    }
    match time {
        Some("") => return None,
        Some(time) => seconds += parse_units(time, &[('H', 3_600.0), ('M', 60.0), ('S', 1.0)])?,
        None if days.is_empty() => return None,
        None => {}
    }
    Duration::try_from_secs_f64(seconds).ok()
}

/// Sums `<number><unit>` pairs, units in the given order.
fn parse_units(mut text: &str, units: &[(char, f64)]) -> Option<f64> {
    let mut total = 0.0;
    let mut allowed = units;
    while !text.is_empty() {
        let end = text.find(|c: char| c.is_ascii_alphabetic())?;
        let number: f64 = text[..end].parse().ok()?;
        let unit = text[end..].chars().next()?.to_ascii_uppercase();
        let position = allowed.iter().position(|(u, _)| *u == unit)?;
        total += number * allowed[position].1;
        allowed = &allowed[position + 1..];
        text = &text[end + 1..];
    }
    Some(total)
}

#[cfg(feature = "chrono")]
pub(crate) mod dates {
    use alloc::string::String;

    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

    pub fn format_date_time(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    pub fn format_naive_date_time(value: &NaiveDateTime) -> String {
        value.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
    }

    /// RFC 3339, or a zone-less date/time taken as UTC.
    pub fn parse_date_time(text: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(text)
            .map(|value| value.with_timezone(&Utc))
            .ok()
            .or_else(|| parse_naive_date_time(text).map(|value| value.and_utc()))
    }

    pub fn parse_naive_date_time(text: &str) -> Option<NaiveDateTime> {
        text.parse::<NaiveDateTime>()
            .ok()
            .or_else(|| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f").ok())
            .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|value| value.naive_utc()))
            .or_else(|| text.parse::<NaiveDate>().ok().and_then(|date| date.and_hms_opt(0, 0, 0)))
    }

    pub fn parse_date(text: &str) -> Option<NaiveDate> {
        text.parse::<NaiveDate>()
            .ok()
            .or_else(|| parse_naive_date_time(text).map(|value| value.date()))
    }

    pub fn parse_time(text: &str) -> Option<NaiveTime> {
        text.parse::<NaiveTime>()
            .ok()
            .or_else(|| parse_naive_date_time(text).map(|value| value.time()))
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::{format_duration, parse_duration};

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "PT1.5S");
        assert_eq!(format_duration(Duration::from_secs(2)), "PT2S");
        assert_eq!(parse_duration("PT1.5S"), Some(Duration::from_millis(1500)));
        assert_eq!(parse_duration("P1DT1H30M"), Some(Duration::from_secs(86_400 + 5_400)));
        assert_eq!(parse_duration("pt2m"), Some(Duration::from_secs(120)));
        assert_eq!(parse_duration("PT"), None);
        assert_eq!(parse_duration("PT1S1M"), None);
        assert_eq!(parse_duration("1.5"), None);
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn dates() {
        use chrono::{NaiveDate, TimeZone, Utc};

        use super::dates::*;

        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_date_time(&at), "2024-01-02T03:04:05Z");
        assert_eq!(parse_date_time("2024-01-02T04:04:05+01:00"), Some(at));
        assert_eq!(parse_date_time("2024-01-02T03:04:05"), Some(at));

        let naive = at.naive_utc();
        assert_eq!(format_naive_date_time(&naive), "2024-01-02T03:04:05");
        assert_eq!(parse_naive_date_time("2024-01-02 03:04:05"), Some(naive));
        assert_eq!(parse_date("2024-01-02T03:04:05Z"), NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(parse_time("03:04:05").map(|t| t.to_string()), Some("03:04:05".into()));
    }
}
