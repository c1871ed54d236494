//! Core types for glucose and blood-pressure readings.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Unit every glucose value is recorded in.
pub const GLUCOSE_UNIT: &str = "mmol/L";

/// Unit blood-pressure values are spoken and displayed in.
pub const PRESSURE_UNIT: &str = "mmHg";

/// Lowest systolic value accepted from spoken input.
pub const SYSTOLIC_MIN: u16 = 60;
/// Highest systolic value accepted from spoken input.
pub const SYSTOLIC_MAX: u16 = 250;
/// Lowest diastolic value accepted from spoken input.
pub const DIASTOLIC_MIN: u16 = 40;
/// Highest diastolic value accepted from spoken input.
pub const DIASTOLIC_MAX: u16 = 150;

/// A named, independently stored set of records of one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Collection {
    /// Blood-glucose readings.
    Glucose,
    /// Blood-pressure readings.
    Pressure,
}

impl Collection {
    /// All collections, in display order.
    pub const ALL: [Collection; 2] = [Collection::Glucose, Collection::Pressure];

    /// Name of the backing table.
    #[must_use]
    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::Glucose => "glucose",
            Collection::Pressure => "pressure",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for Collection {
    type Err = ParseError;

    /// Parse a collection name (case-insensitive).
    ///
    /// ```
    /// use vitals_types::Collection;
    ///
    /// assert_eq!("glucose".parse(), Ok(Collection::Glucose));
    /// assert_eq!("BP".parse(), Ok(Collection::Pressure));
    /// assert!("weight".parse::<Collection>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "glucose" | "sugar" => Ok(Collection::Glucose),
            "pressure" | "bp" => Ok(Collection::Pressure),
            _ => Err(ParseError::UnknownCollection(s.to_string())),
        }
    }
}

/// A blood-glucose value in mmol/L.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GlucoseReading {
    /// Concentration in mmol/L.
    pub value: f64,
}

impl GlucoseReading {
    /// Create a new glucose reading.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl fmt::Display for GlucoseReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, GLUCOSE_UNIT)
    }
}

/// A systolic/diastolic blood-pressure pair in mmHg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PressureReading {
    /// Systolic pressure.
    pub systolic: u16,
    /// Diastolic pressure.
    pub diastolic: u16,
}

impl PressureReading {
    /// Create a new pressure reading without bounds checking.
    #[must_use]
    pub fn new(systolic: u16, diastolic: u16) -> Self {
        Self {
            systolic,
            diastolic,
        }
    }

    /// Whether both values fall inside the physiological bounds accepted
    /// from spoken input.
    ///
    /// ```
    /// use vitals_types::PressureReading;
    ///
    /// assert!(PressureReading::new(130, 85).is_plausible());
    /// assert!(!PressureReading::new(300, 90).is_plausible());
    /// assert!(!PressureReading::new(120, 30).is_plausible());
    /// ```
    #[must_use]
    pub fn is_plausible(&self) -> bool {
        (SYSTOLIC_MIN..=SYSTOLIC_MAX).contains(&self.systolic)
            && (DIASTOLIC_MIN..=DIASTOLIC_MAX).contains(&self.diastolic)
    }
}

impl fmt::Display for PressureReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.systolic, self.diastolic, PRESSURE_UNIT)
    }
}

/// Readings recognized in one utterance.
///
/// Either field, both, or neither may be present. An empty reading means
/// nothing was recognized; it is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartialReading {
    /// Glucose value, if one was spoken.
    pub glucose: Option<GlucoseReading>,
    /// Pressure pair, if one was spoken and within bounds.
    pub pressure: Option<PressureReading>,
}

impl PartialReading {
    /// Returns `true` when neither reading was recognized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glucose.is_none() && self.pressure.is_none()
    }
}
