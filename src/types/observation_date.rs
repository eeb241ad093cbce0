use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc,
};
use std::fmt;
use std::fmt::{Display, Formatter};

/// The day a history request is made for, together with the instant it was resolved from.
///
/// Year, month and day are read in whatever zone the input implied: an epoch
/// timestamp is UTC, an RFC 3339 string keeps its offset, and naive values keep
/// their civil date untouched.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ObservationDate {
    instant: DateTime<FixedOffset>,
}

impl ObservationDate {
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self { instant }
    }

    /// The current moment, in UTC.
    pub fn now() -> Self {
        Utc::now().into()
    }

    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.instant
    }

    pub fn date(&self) -> NaiveDate {
        self.instant.date_naive()
    }

    pub fn year(&self) -> i32 {
        self.instant.year()
    }

    pub fn month(&self) -> u32 {
        self.instant.month()
    }

    pub fn day(&self) -> u32 {
        self.instant.day()
    }
}

impl Default for ObservationDate {
    fn default() -> Self {
        Self::now()
    }
}

impl Display for ObservationDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instant.format("%Y-%m-%d"))
    }
}

impl From<DateTime<Utc>> for ObservationDate {
    fn from(value: DateTime<Utc>) -> Self {
        Self::new(value.fixed_offset())
    }
}

/// Anything that can be turned into an [`ObservationDate`].
///
/// Implemented for epoch seconds (`i64`, `i32`, `u32`, fractional `f64`), date
/// strings and the usual chrono types.
/// Returns `None` when the input cannot be resolved to a calendar date.
pub trait AnyObservationDate {
    fn resolve_observation_date(self) -> Option<ObservationDate>;
}

impl AnyObservationDate for ObservationDate {
    fn resolve_observation_date(self) -> Option<ObservationDate> {
        Some(self)
    }
}

/// Seconds since the Unix epoch, UTC.
impl AnyObservationDate for i64 {
    fn resolve_observation_date(self) -> Option<ObservationDate> {
        DateTime::<Utc>::from_timestamp(self, 0).map(ObservationDate::from)
    }
}

impl AnyObservationDate for i32 {
    fn resolve_observation_date(self) -> Option<ObservationDate> {
        i64::from(self).resolve_observation_date()
    }
}

impl AnyObservationDate for u32 {
    fn resolve_observation_date(self) -> Option<ObservationDate> {
        i64::from(self).resolve_observation_date()
    }
}

/// Fractional seconds since the Unix epoch, UTC.
impl AnyObservationDate for f64 {
    fn resolve_observation_date(self) -> Option<ObservationDate> {
        if !self.is_finite() {
            return None;
        }
        let seconds = self.floor();
        if seconds < i64::MIN as f64 || seconds > i64::MAX as f64 {
            return None;
        }
        let nanos = ((self - seconds) * 1e9).round().min(999_999_999.0) as u32;
        DateTime::<Utc>::from_timestamp(seconds as i64, nanos).map(ObservationDate::from)
    }
}

impl AnyObservationDate for NaiveDate {
    fn resolve_observation_date(self) -> Option<ObservationDate> {
        self.and_hms_opt(0, 0, 0)?.resolve_observation_date()
    }
}

impl AnyObservationDate for NaiveDateTime {
    fn resolve_observation_date(self) -> Option<ObservationDate> {
        Some(Utc.from_utc_datetime(&self).into())
    }
}

impl AnyObservationDate for DateTime<Utc> {
    fn resolve_observation_date(self) -> Option<ObservationDate> {
        Some(self.into())
    }
}

impl AnyObservationDate for DateTime<FixedOffset> {
    fn resolve_observation_date(self) -> Option<ObservationDate> {
        Some(ObservationDate::new(self))
    }
}

impl AnyObservationDate for DateTime<Local> {
    fn resolve_observation_date(self) -> Option<ObservationDate> {
        Some(ObservationDate::new(self.fixed_offset()))
    }
}

impl AnyObservationDate for &str {
    fn resolve_observation_date(self) -> Option<ObservationDate> {
        let value = self.trim();
        if value.eq_ignore_ascii_case("now") {
            return Some(ObservationDate::now());
        }
        // Purely numeric strings are epoch seconds
        if let Ok(timestamp) = value.parse::<i64>() {
            return timestamp.resolve_observation_date();
        }
        if let Ok(timestamp) = value.parse::<f64>() {
            return timestamp.resolve_observation_date();
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return dt.resolve_observation_date();
        }
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
            return naive_dt.resolve_observation_date();
        }
        if let Ok(naive_date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return naive_date.resolve_observation_date();
        }
        None
    }
}

impl AnyObservationDate for String {
    fn resolve_observation_date(self) -> Option<ObservationDate> {
        self.as_str().resolve_observation_date()
    }
}

impl AnyObservationDate for &String {
    fn resolve_observation_date(self) -> Option<ObservationDate> {
        self.as_str().resolve_observation_date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve<D: AnyObservationDate>(date: D) -> Option<ObservationDate> {
        date.resolve_observation_date()
    }

    fn ymd(date: ObservationDate) -> (i32, u32, u32) {
        (date.year(), date.month(), date.day())
    }

    #[test]
    fn test_epoch_and_strings_resolve_to_same_day() {
        // 2014-01-15 17:51:00 UTC
        let from_epoch = 1_389_808_260_i64.resolve_observation_date().unwrap();
        let from_epoch_str = "1389808260".resolve_observation_date().unwrap();
        let from_naive = "2014-01-15 17:51:00".resolve_observation_date().unwrap();
        let from_date = "2014-01-15".resolve_observation_date().unwrap();
        let from_chrono = NaiveDate::from_ymd_opt(2014, 1, 15)
            .unwrap()
            .resolve_observation_date()
            .unwrap();

        for date in [from_epoch, from_epoch_str, from_naive, from_date, from_chrono] {
            assert_eq!(ymd(date), (2014, 1, 15));
        }
        assert_eq!(from_epoch, from_epoch_str);
    }

    #[test]
    fn test_other_epoch_number_types() {
        let expected = 1_389_808_260_i64.resolve_observation_date().unwrap();

        // An unsuffixed literal passed generically falls back to i32
        assert_eq!(resolve(1_389_808_260), Some(expected));
        assert_eq!(1_389_808_260_u32.resolve_observation_date(), Some(expected));

        let fractional = "1389808260.5".resolve_observation_date().unwrap();
        assert_eq!(ymd(fractional), (2014, 1, 15));
        assert_eq!(fractional.instant().timestamp_subsec_millis(), 500);
        assert_eq!(1_389_808_260.5_f64.resolve_observation_date(), Some(fractional));

        assert!(f64::NAN.resolve_observation_date().is_none());
        assert!("inf".resolve_observation_date().is_none());
    }

    #[test]
    fn test_rfc3339_keeps_its_own_offset() {
        // Still the 15th in New York even though it is the 16th in UTC
        let date = "2014-01-15T22:30:00-05:00"
            .resolve_observation_date()
            .unwrap();
        assert_eq!(ymd(date), (2014, 1, 15));
        assert_eq!(date.instant().with_timezone(&Utc).day(), 16);
    }

    #[test]
    fn test_now_and_garbage() {
        assert!("now".resolve_observation_date().is_some());
        assert!(String::from("NOW").resolve_observation_date().is_some());
        assert!("yesterday-ish".resolve_observation_date().is_none());
        assert!("2014-13-45".resolve_observation_date().is_none());
    }

    #[test]
    fn test_display_is_zero_padded() {
        let date = "2014-03-05".resolve_observation_date().unwrap();
        assert_eq!(date.to_string(), "2014-03-05");
    }
}
