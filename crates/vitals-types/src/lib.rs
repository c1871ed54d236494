//! Platform-agnostic types for voice-logged health readings.
//!
//! This crate provides the value types shared by the store (vitals-store),
//! the extraction and session layer (vitals-core), and the CLI.
//!
//! # Features
//!
//! - Reading types for blood glucose and blood pressure
//! - Physiological bounds used when accepting spoken values
//! - The [`Collection`] identifier for the two record sets
//!
//! # Example
//!
//! ```
//! use vitals_types::{PartialReading, PressureReading};
//!
//! let reading = PartialReading {
//!     glucose: None,
//!     pressure: Some(PressureReading::new(130, 85)),
//! };
//! assert!(!reading.is_empty());
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{
    Collection, DIASTOLIC_MAX, DIASTOLIC_MIN, GLUCOSE_UNIT, GlucoseReading, PRESSURE_UNIT,
    PartialReading, PressureReading, SYSTOLIC_MAX, SYSTOLIC_MIN,
};

#[cfg(test)]
mod tests {
    use super::*;

    // --- Collection tests ---

    #[test]
    fn test_collection_table_names() {
        assert_eq!(Collection::Glucose.table_name(), "glucose");
        assert_eq!(Collection::Pressure.table_name(), "pressure");
    }

    #[test]
    fn test_collection_parse_aliases() {
        assert_eq!("Glucose".parse::<Collection>(), Ok(Collection::Glucose));
        assert_eq!(" sugar ".parse::<Collection>(), Ok(Collection::Glucose));
        assert_eq!("pressure".parse::<Collection>(), Ok(Collection::Pressure));
        assert_eq!("bp".parse::<Collection>(), Ok(Collection::Pressure));
    }

    #[test]
    fn test_collection_parse_unknown() {
        let err = "weight".parse::<Collection>().unwrap_err();
        assert_eq!(err, ParseError::UnknownCollection("weight".to_string()));
        assert!(err.to_string().contains("weight"));
    }

    #[test]
    fn test_collection_display_matches_table() {
        for collection in Collection::ALL {
            assert_eq!(collection.to_string(), collection.table_name());
        }
    }

    // --- PressureReading bounds tests ---

    #[test]
    fn test_pressure_bounds_inclusive() {
        assert!(PressureReading::new(SYSTOLIC_MIN, DIASTOLIC_MIN).is_plausible());
        assert!(PressureReading::new(SYSTOLIC_MAX, DIASTOLIC_MAX).is_plausible());
    }

    #[test]
    fn test_pressure_bounds_exclusive_outside() {
        assert!(!PressureReading::new(SYSTOLIC_MIN - 1, 80).is_plausible());
        assert!(!PressureReading::new(SYSTOLIC_MAX + 1, 80).is_plausible());
        assert!(!PressureReading::new(120, DIASTOLIC_MIN - 1).is_plausible());
        assert!(!PressureReading::new(120, DIASTOLIC_MAX + 1).is_plausible());
    }

    #[test]
    fn test_pressure_display() {
        assert_eq!(PressureReading::new(130, 85).to_string(), "130/85 mmHg");
    }

    #[test]
    fn test_glucose_display() {
        assert_eq!(GlucoseReading::new(6.4).to_string(), "6.4 mmol/L");
    }

    // --- PartialReading tests ---

    #[test]
    fn test_partial_reading_default_is_empty() {
        assert!(PartialReading::default().is_empty());
    }

    #[test]
    fn test_partial_reading_with_glucose_not_empty() {
        let reading = PartialReading {
            glucose: Some(GlucoseReading::new(5.5)),
            pressure: None,
        };
        assert!(!reading.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_collection_serializes_lowercase() {
        let json = serde_json::to_string(&Collection::Pressure).unwrap();
        assert_eq!(json, "\"pressure\"");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_reading_serialization() {
        let reading = PartialReading {
            glucose: Some(GlucoseReading::new(6.4)),
            pressure: Some(PressureReading::new(130, 85)),
        };
        let json = serde_json::to_value(reading).unwrap();
        assert_eq!(json["glucose"]["value"], 6.4);
        assert_eq!(json["pressure"]["systolic"], 130);
        assert_eq!(json["pressure"]["diastolic"], 85);
    }
}
