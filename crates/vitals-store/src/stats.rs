//! Aggregate statistics over a lookback window.
//!
//! The window starts at a cutoff computed by calendar-day subtraction in
//! the local time zone: "7 days ago" keeps the current wall-clock time on
//! the date seven days earlier, so a window that spans a daylight-saving
//! change is 167 or 169 hours long rather than exactly 168.
//!
//! Averages are rounded for reporting only (one decimal for glucose, whole
//! numbers for pressure); minimum and maximum are the stored values.

use chrono::{DateTime, Days, Local, LocalResult, Offset, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{Error, Result};
use crate::models::{GlucoseRecord, PressureRecord};

/// Summary of glucose records in a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlucoseStats {
    /// Number of records.
    pub count: usize,
    /// Mean value rounded to one decimal place.
    pub average: Option<f64>,
    /// Lowest value.
    pub min: Option<f64>,
    /// Highest value.
    pub max: Option<f64>,
}

impl GlucoseStats {
    /// Compute statistics over the given records.
    pub fn from_records(records: &[GlucoseRecord]) -> Self {
        let Some(first) = records.first() else {
            return Self::default();
        };

        let mut sum = 0.0;
        let mut min = first.value;
        let mut max = first.value;
        for record in records {
            sum += record.value;
            min = min.min(record.value);
            max = max.max(record.value);
        }

        let average = sum / records.len() as f64;
        Self {
            count: records.len(),
            average: Some((average * 10.0).round() / 10.0),
            min: Some(min),
            max: Some(max),
        }
    }
}

/// Summary of blood-pressure records in a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PressureStats {
    /// Number of records.
    pub count: usize,
    /// Mean systolic pressure, rounded to the nearest integer.
    pub avg_systolic: Option<u16>,
    /// Mean diastolic pressure, rounded to the nearest integer.
    pub avg_diastolic: Option<u16>,
    pub min_systolic: Option<u16>,
    pub max_systolic: Option<u16>,
    pub min_diastolic: Option<u16>,
    pub max_diastolic: Option<u16>,
}

impl PressureStats {
    /// Compute statistics over the given records.
    pub fn from_records(records: &[PressureRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let n = records.len() as f64;
        let sys = records.iter().map(|r| r.systolic);
        let dia = records.iter().map(|r| r.diastolic);
        let sum_sys: u64 = sys.clone().map(u64::from).sum();
        let sum_dia: u64 = dia.clone().map(u64::from).sum();

        Self {
            count: records.len(),
            avg_systolic: Some((sum_sys as f64 / n).round() as u16),
            avg_diastolic: Some((sum_dia as f64 / n).round() as u16),
            min_systolic: sys.clone().min(),
            max_systolic: sys.max(),
            min_diastolic: dia.clone().min(),
            max_diastolic: dia.max(),
        }
    }
}

/// Statistics for both collections over the same window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Length of the window in calendar days.
    pub days: u32,
    /// Earliest instant included in the window.
    #[serde(with = "time::serde::rfc3339")]
    pub cutoff: OffsetDateTime,
    pub glucose: GlucoseStats,
    pub pressure: PressureStats,
}

impl Stats {
    /// Returns `true` if neither collection had records in the window.
    pub fn is_empty(&self) -> bool {
        self.glucose.count == 0 && self.pressure.count == 0
    }
}

/// Longest run of skipped wall-clock time searched when a cutoff falls in a
/// gap. Samoa skipped a whole day in 2011.
const MAX_GAP_HOURS: i64 = 48;

/// Subtract `days` calendar days from `now`, keeping its wall-clock time.
///
/// If that wall-clock time occurs twice on the target date the earlier
/// instant is used; if it was skipped by a DST jump or a zone change the
/// result is the first instant after the gap. Returns `None` only when the
/// date is out of range.
pub fn calendar_cutoff<Tz: TimeZone>(now: &DateTime<Tz>, days: u32) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let target = now
        .naive_local()
        .checked_sub_days(Days::new(u64::from(days)))?;

    match tz.from_local_datetime(&target) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => gap_end(&tz, target),
    }
}

/// First instant after the gap containing the skipped local time `target`.
fn gap_end<Tz: TimeZone>(tz: &Tz, target: chrono::NaiveDateTime) -> Option<DateTime<Tz>> {
    let (before, hours) = (1..=MAX_GAP_HOURS).find_map(|hours| {
        tz.from_local_datetime(&(target - TimeDelta::hours(hours)))
            .earliest()
            .map(|dt| (dt, hours))
    })?;

    // `target` read with the pre-gap offset is already past the transition,
    // so the offset change lies between `lo` and `hi`.
    let pre_gap = before.offset().fix();
    let mut lo = before.timestamp();
    let mut hi = lo + hours * 3600;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if tz.timestamp_opt(mid, 0).single()?.offset().fix() == pre_gap {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    tz.timestamp_opt(hi, 0).single()
}

/// Cutoff `days` calendar days before `now`, evaluated in `tz`.
pub fn cutoff_in<Tz: TimeZone>(now: OffsetDateTime, days: u32, tz: &Tz) -> Result<OffsetDateTime> {
    let now_tz = to_chrono(now)?.with_timezone(tz);
    let cutoff = calendar_cutoff(&now_tz, days)
        .ok_or_else(|| Error::InvalidTimestamp(format!("{days} days before {now}")))?;
    from_chrono(&cutoff)
}

/// Cutoff `days` calendar days before `now`, in the system time zone.
pub fn local_cutoff(now: OffsetDateTime, days: u32) -> Result<OffsetDateTime> {
    cutoff_in(now, days, &Local)
}

fn to_chrono(instant: OffsetDateTime) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(instant.unix_timestamp(), instant.nanosecond())
        .ok_or_else(|| Error::InvalidTimestamp(instant.to_string()))
}

fn from_chrono<Tz: TimeZone>(instant: &DateTime<Tz>) -> Result<OffsetDateTime> {
    let nanos = instant
        .timestamp_nanos_opt()
        .ok_or_else(|| Error::InvalidTimestamp(instant.naive_utc().to_string()))?;
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(nanos))
        .map_err(|e| Error::InvalidTimestamp(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;
    use chrono_tz::Pacific::Apia;
    use time::macros::datetime;

    fn glucose(value: f64) -> GlucoseRecord {
        GlucoseRecord {
            id: 0,
            value,
            unit: "mmol/L".to_string(),
            recorded_at: datetime!(2024-03-10 08:00 UTC),
            notes: String::new(),
        }
    }

    fn pressure(systolic: u16, diastolic: u16) -> PressureRecord {
        PressureRecord {
            id: 0,
            systolic,
            diastolic,
            recorded_at: datetime!(2024-03-10 08:00 UTC),
            notes: String::new(),
        }
    }

    // --- GlucoseStats ---

    #[test]
    fn test_glucose_stats_empty_has_no_values() {
        let stats = GlucoseStats::from_records(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.average, None);
        assert_eq!(stats.min, None);
        assert_eq!(stats.max, None);
    }

    #[test]
    fn test_glucose_stats_rounds_average_to_one_decimal() {
        let stats = GlucoseStats::from_records(&[glucose(5.0), glucose(6.4), glucose(7.1)]);
        assert_eq!(stats.count, 3);
        // 18.5 / 3 = 6.1666...
        assert_eq!(stats.average, Some(6.2));
        assert_eq!(stats.min, Some(5.0));
        assert_eq!(stats.max, Some(7.1));
    }

    #[test]
    fn test_glucose_stats_min_max_unrounded() {
        let stats = GlucoseStats::from_records(&[glucose(5.04), glucose(5.08)]);
        assert_eq!(stats.average, Some(5.1));
        assert_eq!(stats.min, Some(5.04));
        assert_eq!(stats.max, Some(5.08));
    }

    #[test]
    fn test_glucose_stats_single_record() {
        let stats = GlucoseStats::from_records(&[glucose(6.4)]);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.average, Some(6.4));
        assert_eq!(stats.min, stats.max);
    }

    // --- PressureStats ---

    #[test]
    fn test_pressure_stats_empty_has_no_values() {
        let stats = PressureStats::from_records(&[]);
        assert_eq!(stats, PressureStats::default());
        assert_eq!(stats.avg_systolic, None);
        assert_eq!(stats.max_diastolic, None);
    }

    #[test]
    fn test_pressure_stats_rounds_to_integer() {
        let stats = PressureStats::from_records(&[pressure(120, 80), pressure(131, 85)]);
        assert_eq!(stats.count, 2);
        // 125.5 rounds up, 82.5 rounds up
        assert_eq!(stats.avg_systolic, Some(126));
        assert_eq!(stats.avg_diastolic, Some(83));
        assert_eq!(stats.min_systolic, Some(120));
        assert_eq!(stats.max_systolic, Some(131));
        assert_eq!(stats.min_diastolic, Some(80));
        assert_eq!(stats.max_diastolic, Some(85));
    }

    #[test]
    fn test_stats_serializes_nulls_not_zero() {
        let stats = Stats {
            days: 7,
            cutoff: datetime!(2024-03-03 08:00 UTC),
            glucose: GlucoseStats::default(),
            pressure: PressureStats::default(),
        };
        assert!(stats.is_empty());

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["glucose"]["count"], 0);
        assert!(json["glucose"]["average"].is_null());
        assert!(json["pressure"]["avgSystolic"].is_null());
        assert_eq!(json["cutoff"], "2024-03-03T08:00:00Z");
    }

    // --- Cutoff ---

    #[test]
    fn test_calendar_cutoff_keeps_wall_clock_across_spring_forward() {
        // DST starts 2024-03-10 02:00 in New York.
        let now = New_York.with_ymd_and_hms(2024, 3, 12, 9, 0, 0).unwrap();
        let cutoff = calendar_cutoff(&now, 7).unwrap();

        assert_eq!(cutoff, New_York.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap());
        // One hour shorter than 7 x 24h.
        assert_eq!(now - cutoff, TimeDelta::hours(167));
    }

    #[test]
    fn test_calendar_cutoff_across_fall_back() {
        // DST ends 2024-11-03 02:00 in New York.
        let now = New_York.with_ymd_and_hms(2024, 11, 5, 9, 0, 0).unwrap();
        let cutoff = calendar_cutoff(&now, 7).unwrap();
        assert_eq!(now - cutoff, TimeDelta::hours(169));
    }

    #[test]
    fn test_calendar_cutoff_month_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap();
        let cutoff = calendar_cutoff(&now, 7).unwrap();
        assert_eq!(cutoff, Utc.with_ymd_and_hms(2024, 2, 24, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_calendar_cutoff_skipped_time_lands_after_gap() {
        // 02:30 does not exist on 2024-03-10 in New York.
        let now = New_York.with_ymd_and_hms(2024, 3, 11, 2, 30, 0).unwrap();
        let cutoff = calendar_cutoff(&now, 1).unwrap();
        assert_eq!(cutoff, New_York.with_ymd_and_hms(2024, 3, 10, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_cutoff_in_skipped_calendar_day() {
        // Samoa moved across the date line: 2011-12-30 never happened in Apia.
        let now = datetime!(2011-12-31 12:00 +14:00);
        let cutoff = cutoff_in(now, 1, &Apia).unwrap();
        // Midnight starting 2011-12-31, local time.
        assert_eq!(cutoff, datetime!(2011-12-31 00:00 +14:00));
        assert_eq!(now - cutoff, time::Duration::hours(12));
    }

    #[test]
    fn test_calendar_cutoff_ambiguous_time_uses_earlier() {
        // 01:30 happens twice on 2024-11-03 in New York.
        let now = New_York.with_ymd_and_hms(2024, 11, 4, 1, 30, 0).unwrap();
        let cutoff = calendar_cutoff(&now, 1).unwrap();
        assert_eq!(cutoff.naive_utc().to_string(), "2024-11-03 05:30:00");
    }

    #[test]
    fn test_calendar_cutoff_zero_days_is_now() {
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap();
        assert_eq!(calendar_cutoff(&now, 0), Some(now));
    }

    #[test]
    fn test_cutoff_in_converts_back_to_utc_instant() {
        let now = datetime!(2024-03-12 13:00 UTC); // 09:00 EDT
        let cutoff = cutoff_in(now, 7, &New_York).unwrap();
        assert_eq!(cutoff, datetime!(2024-03-05 14:00 UTC)); // 09:00 EST
    }

    #[test]
    fn test_cutoff_in_preserves_subsecond_precision() {
        let now = datetime!(2024-06-01 12:00:00.123 UTC);
        let cutoff = cutoff_in(now, 1, &Utc).unwrap();
        assert_eq!(cutoff, datetime!(2024-05-31 12:00:00.123 UTC));
    }
}
