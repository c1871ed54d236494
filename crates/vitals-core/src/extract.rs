//! Extraction of readings from transcribed speech.
//!
//! Two independent patterns are scanned for, in any order:
//!
//! - `血糖` (blood glucose), optional separators, then a decimal number
//! - `血压` (blood pressure), optional separators, then two 2-3 digit
//!   integers separated by one to three non-digit characters
//!
//! A pressure pair is only accepted if `60 <= systolic <= 250` and
//! `40 <= diastolic <= 150`. Out-of-range pairs are dropped, and [`parse`]
//! reports them exactly like an utterance without a pressure reading. Use
//! [`extract_detailed`] to tell the two apart.
//!
//! # Example
//!
//! ```
//! use vitals_core::extract::parse;
//!
//! let reading = parse("血糖6.4，血压130 85");
//! assert_eq!(reading.glucose.map(|g| g.value), Some(6.4));
//! assert_eq!(reading.pressure.map(|p| (p.systolic, p.diastolic)), Some((130, 85)));
//!
//! assert!(parse("血压300 90").pressure.is_none());
//! assert!(parse("今天天气不错").is_empty());
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use vitals_types::{GlucoseReading, PartialReading, PressureReading};

static GLUCOSE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"血糖[:：\s]*([0-9]+(?:\.[0-9]+)?)").expect("glucose pattern compiles")
});

static PRESSURE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"血压[:：\s]*([0-9]{2,3})[^0-9]{1,3}([0-9]{2,3})")
        .expect("pressure pattern compiles")
});

/// What the pressure pattern found in a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PressureOutcome {
    /// No pressure keyword followed by a pair of numbers.
    Absent,
    /// A pair within physiological bounds.
    Accepted(PressureReading),
    /// A pair was spoken but fell outside the accepted bounds.
    OutOfRange(PressureReading),
}

/// Full result of scanning a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extraction {
    pub glucose: Option<GlucoseReading>,
    pub pressure: PressureOutcome,
}

impl Extraction {
    /// The readings that should be saved.
    pub fn reading(&self) -> PartialReading {
        PartialReading {
            glucose: self.glucose,
            pressure: match self.pressure {
                PressureOutcome::Accepted(p) => Some(p),
                PressureOutcome::Absent | PressureOutcome::OutOfRange(_) => None,
            },
        }
    }
}

/// Scan `text` for readings.
///
/// Never fails; an empty result means nothing was recognized.
pub fn parse(text: &str) -> PartialReading {
    extract_detailed(text).reading()
}

/// Scan `text`, keeping rejected pressure candidates visible.
pub fn extract_detailed(text: &str) -> Extraction {
    Extraction {
        glucose: find_glucose(text),
        pressure: find_pressure(text),
    }
}

fn find_glucose(text: &str) -> Option<GlucoseReading> {
    let caps = GLUCOSE_PATTERN.captures(text)?;
    let value: f64 = caps[1].parse().ok()?;
    Some(GlucoseReading::new(value))
}

fn find_pressure(text: &str) -> PressureOutcome {
    let Some(caps) = PRESSURE_PATTERN.captures(text) else {
        return PressureOutcome::Absent;
    };

    let (Ok(systolic), Ok(diastolic)) = (caps[1].parse::<u16>(), caps[2].parse::<u16>()) else {
        return PressureOutcome::Absent;
    };

    let candidate = PressureReading::new(systolic, diastolic);
    if candidate.is_plausible() {
        PressureOutcome::Accepted(candidate)
    } else {
        PressureOutcome::OutOfRange(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressure_pair(text: &str) -> Option<(u16, u16)> {
        parse(text).pressure.map(|p| (p.systolic, p.diastolic))
    }

    fn glucose_value(text: &str) -> Option<f64> {
        parse(text).glucose.map(|g| g.value)
    }

    // --- Glucose ---

    #[test]
    fn test_glucose_decimal() {
        assert_eq!(glucose_value("血糖6.4"), Some(6.4));
    }

    #[test]
    fn test_glucose_integer() {
        assert_eq!(glucose_value("血糖7"), Some(7.0));
    }

    #[test]
    fn test_glucose_separators() {
        assert_eq!(glucose_value("血糖：5.6"), Some(5.6));
        assert_eq!(glucose_value("血糖: 5.6"), Some(5.6));
        assert_eq!(glucose_value("血糖 5.6"), Some(5.6));
    }

    #[test]
    fn test_glucose_embedded_in_sentence() {
        assert_eq!(glucose_value("我今天早上血糖是"), None);
        assert_eq!(glucose_value("早上测的血糖8.2，感觉还行"), Some(8.2));
    }

    #[test]
    fn test_glucose_first_match_wins() {
        assert_eq!(glucose_value("血糖6.1 然后 血糖9.9"), Some(6.1));
    }

    #[test]
    fn test_glucose_no_range_check() {
        assert_eq!(glucose_value("血糖99.9"), Some(99.9));
        assert_eq!(glucose_value("血糖0"), Some(0.0));
    }

    #[test]
    fn test_glucose_trailing_dot_ignored() {
        assert_eq!(glucose_value("血糖6."), Some(6.0));
    }

    // --- Pressure ---

    #[test]
    fn test_pressure_space_separated() {
        assert_eq!(pressure_pair("血压130 85"), Some((130, 85)));
    }

    #[test]
    fn test_pressure_slash_and_fullwidth_comma() {
        assert_eq!(pressure_pair("血压130/80"), Some((130, 80)));
        assert_eq!(pressure_pair("血压130，80"), Some((130, 80)));
        assert_eq!(pressure_pair("血压：120 / 75"), Some((120, 75)));
    }

    #[test]
    fn test_pressure_rejects_systolic_above_bound() {
        assert_eq!(pressure_pair("血压300 90"), None);
    }

    #[test]
    fn test_pressure_bounds_are_inclusive() {
        assert_eq!(pressure_pair("血压60 40"), Some((60, 40)));
        assert_eq!(pressure_pair("血压250 150"), Some((250, 150)));
        assert_eq!(pressure_pair("血压59 80"), None);
        assert_eq!(pressure_pair("血压120 39"), None);
        assert_eq!(pressure_pair("血压251 80"), None);
        assert_eq!(pressure_pair("血压120 151"), None);
    }

    #[test]
    fn test_pressure_separator_too_long() {
        assert_eq!(pressure_pair("血压130 over 85"), None);
    }

    #[test]
    fn test_pressure_single_number() {
        assert_eq!(pressure_pair("血压130"), None);
    }

    #[test]
    fn test_pressure_four_digit_systolic_not_matched() {
        assert_eq!(pressure_pair("血压1300 80"), None);
    }

    #[test]
    fn test_pressure_fullwidth_digits_not_matched() {
        assert_eq!(pressure_pair("血压１３０ ８５"), None);
    }

    // --- Both / neither ---

    #[test]
    fn test_dual_extraction() {
        let reading = parse("血糖6.4，血压130 85");
        assert_eq!(reading.glucose, Some(GlucoseReading::new(6.4)));
        assert_eq!(reading.pressure, Some(PressureReading::new(130, 85)));
    }

    #[test]
    fn test_dual_extraction_order_independent() {
        let reading = parse("血压130 85 血糖6.4");
        assert_eq!(reading.glucose, Some(GlucoseReading::new(6.4)));
        assert_eq!(reading.pressure, Some(PressureReading::new(130, 85)));
    }

    #[test]
    fn test_rejected_pressure_keeps_glucose() {
        let reading = parse("血糖6.4 血压300 90");
        assert_eq!(reading.glucose, Some(GlucoseReading::new(6.4)));
        assert_eq!(reading.pressure, None);
    }

    #[test]
    fn test_nothing_recognized() {
        assert!(parse("").is_empty());
        assert!(parse("hello world").is_empty());
        assert!(parse("血压 高").is_empty());
    }

    // --- Detailed outcome ---

    #[test]
    fn test_detailed_distinguishes_out_of_range() {
        let extraction = extract_detailed("血压300 90");
        assert_eq!(
            extraction.pressure,
            PressureOutcome::OutOfRange(PressureReading::new(300, 90))
        );
        assert!(extraction.reading().is_empty());

        assert_eq!(extract_detailed("没有").pressure, PressureOutcome::Absent);
    }

    #[test]
    fn test_detailed_serializes_status() {
        let extraction = extract_detailed("血压130 85");
        let json = serde_json::to_value(extraction).unwrap();
        assert_eq!(json["pressure"]["status"], "accepted");
        assert_eq!(json["pressure"]["systolic"], 130);
    }
}
