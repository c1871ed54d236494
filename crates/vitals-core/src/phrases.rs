//! Text handed to the speech synthesizer.
//!
//! Phrases are in Mandarin to match the spoken keywords the extractor
//! listens for.

use vitals_store::Stats;
use vitals_types::{GlucoseReading, PartialReading, PressureReading};

/// Prompt when nothing could be extracted.
pub const NOT_UNDERSTOOD: &str = "没有听清楚，请再说一遍，例如：血糖6.4，血压130 85";

/// Prompt when a save failed.
pub const SAVE_FAILED: &str = "保存失败，请稍后重试";

/// Prompt when listening starts.
pub const LISTENING: &str = "请说出您的血糖或血压";

fn glucose_phrase(reading: &GlucoseReading) -> String {
    format!("血糖{}", reading.value)
}

fn pressure_phrase(reading: &PressureReading) -> String {
    format!("血压{}/{}", reading.systolic, reading.diastolic)
}

/// Confirmation after saving the given readings.
///
/// Returns `None` for an empty reading.
pub fn confirmation(reading: &PartialReading) -> Option<String> {
    let parts: Vec<String> = reading
        .glucose
        .iter()
        .map(glucose_phrase)
        .chain(reading.pressure.iter().map(pressure_phrase))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(format!("已记录{}", parts.join("，")))
    }
}

/// Spoken summary of a statistics window.
pub fn summary(stats: &Stats) -> String {
    if stats.is_empty() {
        return format!("最近{}天没有记录", stats.days);
    }

    let mut sentences = Vec::new();

    let g = &stats.glucose;
    if let (Some(avg), Some(min), Some(max)) = (g.average, g.min, g.max) {
        sentences.push(format!(
            "最近{}天血糖记录{}次，平均{}，最低{}，最高{}",
            stats.days, g.count, avg, min, max
        ));
    }

    let p = &stats.pressure;
    if let (Some(sys), Some(dia)) = (p.avg_systolic, p.avg_diastolic) {
        sentences.push(format!(
            "最近{}天血压记录{}次，平均{}/{}",
            stats.days, p.count, sys, dia
        ));
    }

    sentences.join("。")
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use vitals_store::{GlucoseStats, PressureStats};

    fn stats(glucose: GlucoseStats, pressure: PressureStats) -> Stats {
        Stats {
            days: 7,
            cutoff: datetime!(2024-03-03 08:00 UTC),
            glucose,
            pressure,
        }
    }

    #[test]
    fn test_confirmation_both() {
        let reading = PartialReading {
            glucose: Some(GlucoseReading::new(6.4)),
            pressure: Some(PressureReading::new(130, 85)),
        };
        assert_eq!(
            confirmation(&reading).as_deref(),
            Some("已记录血糖6.4，血压130/85")
        );
    }

    #[test]
    fn test_confirmation_pressure_only() {
        let reading = PartialReading {
            glucose: None,
            pressure: Some(PressureReading::new(120, 80)),
        };
        assert_eq!(confirmation(&reading).as_deref(), Some("已记录血压120/80"));
    }

    #[test]
    fn test_confirmation_empty() {
        assert_eq!(confirmation(&PartialReading::default()), None);
    }

    #[test]
    fn test_summary_empty_window() {
        let s = stats(GlucoseStats::default(), PressureStats::default());
        assert_eq!(summary(&s), "最近7天没有记录");
    }

    #[test]
    fn test_summary_glucose_only() {
        let s = stats(
            GlucoseStats {
                count: 2,
                average: Some(6.1),
                min: Some(5.8),
                max: Some(6.4),
            },
            PressureStats::default(),
        );
        assert_eq!(summary(&s), "最近7天血糖记录2次，平均6.1，最低5.8，最高6.4");
    }

    #[test]
    fn test_summary_both() {
        let s = stats(
            GlucoseStats {
                count: 1,
                average: Some(6.4),
                min: Some(6.4),
                max: Some(6.4),
            },
            PressureStats {
                count: 1,
                avg_systolic: Some(130),
                avg_diastolic: Some(85),
                min_systolic: Some(130),
                max_systolic: Some(130),
                min_diastolic: Some(85),
                max_diastolic: Some(85),
            },
        );
        let text = summary(&s);
        assert!(text.contains("血糖记录1次"));
        assert!(text.ends_with("血压记录1次，平均130/85"));
    }
}
