use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use bon::Builder;
use chrono::{DateTime, Local};
use serde::Serialize;

use crate::{
    core::{error::DischargeError, rate_table::RateTable},
    prelude::*,
    quantity::{discharge::Discharge, flow::CubicFeetPerSecond, height::Feet, time::Hours},
};

/// Divisor which brings `gates × hours × rate` into the discharge unit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Normalization(f64);

impl Normalization {
    /// Sixteen gates over twenty-four hours.
    pub const DEFAULT: Self = Self(16.0 * 24.0);

    pub fn try_new(value: f64) -> Result<Self, DischargeError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(DischargeError::InvalidInput(format!(
                "normalization must be a positive number, got {value}",
            )))
        }
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for Normalization {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for Normalization {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim().parse::<f64>().with_context(|| format!("`{s}` is not a number"))?;
        Ok(Self::try_new(value)?)
    }
}

impl Display for Normalization {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

pub fn discharge(
    gate_count: u32,
    duration: Hours,
    rate: CubicFeetPerSecond,
    normalization: Normalization,
) -> Discharge {
    Discharge(f64::from(gate_count) * duration.0 * rate.0 / normalization.get())
}

/// Single calculation result, as exported.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalculationEntry {
    pub timestamp: DateTime<Local>,

    pub gate_count: u32,

    #[serde(rename = "duration_hours")]
    pub duration: Hours,

    pub requested_height: Feet,

    /// Table height which the rate was taken from.
    #[serde(rename = "used_height")]
    pub resolved_height: Feet,

    #[serde(rename = "cfs_rate")]
    pub rate: CubicFeetPerSecond,

    /// Whether the requested height was found in the table as is.
    #[serde(rename = "exact")]
    pub is_exact: bool,

    pub discharge: Discharge,
}

impl CalculationEntry {
    /// Warning to show along with the result when the rate was taken from another height.
    pub fn substitution_notice(&self) -> Option<String> {
        (!self.is_exact).then(|| {
            format!(
                "no rate for the gate height of {}, used the nearest height of {} ({})",
                self.requested_height, self.resolved_height, self.rate,
            )
        })
    }
}

#[must_use]
#[derive(Builder)]
pub struct DischargeEngine {
    table: RateTable,

    #[builder(default)]
    normalization: Normalization,
}

impl DischargeEngine {
    pub const fn table(&self) -> &RateTable {
        &self.table
    }

    pub const fn normalization(&self) -> Normalization {
        self.normalization
    }

    #[instrument(skip(self))]
    pub fn compute_entry(
        &self,
        gate_count: u32,
        duration: Hours,
        height: Feet,
    ) -> Result<CalculationEntry, DischargeError> {
        if gate_count < 1 {
            return Err(DischargeError::InvalidInput(format!(
                "number of gates must be at least 1, got {gate_count}",
            )));
        }
        if !duration.is_finite() || duration <= Hours::ZERO {
            return Err(DischargeError::InvalidInput(format!(
                "duration must be a positive number of hours, got {duration}",
            )));
        }

        let resolution = self.table.resolve(height)?;
        if resolution.is_exact() {
            info!(
                height = %resolution.height,
                rate = %resolution.rate,
                "found the rate for the gate height",
            );
        } else {
            warn!(
                requested = %resolution.requested,
                used = %resolution.height,
                rate = %resolution.rate,
                "no exact rate for the gate height, using the nearest one",
            );
        }
        if let Some(span) = self.table.span()
            && !span.contains(&height)
        {
            warn!(min = %span.start(), max = %span.end(), "gate height is outside of the rate table");
        }

        let discharge = discharge(gate_count, duration, resolution.rate, self.normalization);
        if !discharge.is_finite() {
            return Err(DischargeError::InvalidInput(format!(
                "discharge for {gate_count} gates over {duration} is out of range",
            )));
        }

        Ok(CalculationEntry {
            timestamp: Local::now(),
            gate_count,
            duration,
            requested_height: height,
            resolved_height: resolution.height,
            rate: resolution.rate,
            is_exact: resolution.is_exact(),
            discharge,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::rate_table::RateRecord;

    fn engine() -> DischargeEngine {
        DischargeEngine::builder().table(RateTable::default()).build()
    }

    #[test]
    fn test_discharge_formula() {
        let discharge =
            discharge(2, Hours(3.0), CubicFeetPerSecond(9000.0), Normalization::DEFAULT);
        assert_abs_diff_eq!(discharge.0, 140.625);
    }

    #[test]
    fn test_default_normalization() {
        assert_abs_diff_eq!(Normalization::default().get(), 384.0);
        assert_abs_diff_eq!(engine().normalization().get(), 384.0);
    }

    #[test]
    fn test_parse_normalization() {
        assert_abs_diff_eq!("100".parse::<Normalization>().unwrap().get(), 100.0);
        assert!("0".parse::<Normalization>().is_err());
        assert!("-384".parse::<Normalization>().is_err());
        assert!("NaN".parse::<Normalization>().is_err());
        assert!("inf".parse::<Normalization>().is_err());
        assert!("sixteen".parse::<Normalization>().is_err());
    }

    #[test]
    fn test_compute_entry_exact() {
        let entry = engine().compute_entry(2, Hours(3.0), Feet(0.5)).unwrap();
        assert!(entry.is_exact);
        assert_eq!(entry.resolved_height, Feet(0.5));
        assert_eq!(entry.rate, CubicFeetPerSecond(9000.0));
        assert_abs_diff_eq!(entry.discharge.0, 140.625);
    }

    #[test]
    fn test_compute_entry_nearest() {
        let entry = engine().compute_entry(1, Hours(1.0), Feet(1.75)).unwrap();
        assert!(!entry.is_exact);
        assert_eq!(entry.requested_height, Feet(1.75));
        assert_eq!(entry.resolved_height, Feet(1.5));
        assert_abs_diff_eq!(entry.discharge.0, 29000.0 / 384.0);
    }

    #[test]
    fn test_substitution_notice() {
        let engine = engine();
        assert_eq!(engine.compute_entry(1, Hours(1.0), Feet(1.5)).unwrap().substitution_notice(), None);
        assert_eq!(
            engine.compute_entry(1, Hours(1.0), Feet(1.75)).unwrap().substitution_notice().as_deref(),
            Some("no rate for the gate height of 1.75 ft, used the nearest height of 1.5 ft (29000 cfs)"),
        );
    }

    #[test]
    fn test_substitution_notice_close_height() {
        let notice = engine().compute_entry(1, Hours(1.0), Feet(1.501)).unwrap().substitution_notice();
        assert_eq!(
            notice.as_deref(),
            Some("no rate for the gate height of 1.501 ft, used the nearest height of 1.5 ft (29000 cfs)"),
        );
    }

    #[test]
    fn test_compute_entry_overflow() {
        let result = engine().compute_entry(u32::MAX, Hours(1e308), Feet(1.0));
        assert!(matches!(result, Err(DischargeError::InvalidInput(_))));
    }

    #[test]
    fn test_compute_entry_custom_normalization() {
        let engine = DischargeEngine::builder()
            .table(RateTable::default())
            .normalization(Normalization::try_new(100.0).unwrap())
            .build();
        let entry = engine.compute_entry(4, Hours(0.5), Feet(1.0)).unwrap();
        assert_abs_diff_eq!(entry.discharge.0, 360.0);
    }

    #[test]
    fn test_compute_entry_zero_gates() {
        let result = engine().compute_entry(0, Hours(1.0), Feet(1.0));
        assert!(matches!(result, Err(DischargeError::InvalidInput(_))));
    }

    #[test]
    fn test_compute_entry_invalid_duration() {
        for duration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = engine().compute_entry(1, Hours(duration), Feet(1.0));
            assert!(matches!(result, Err(DischargeError::InvalidInput(_))), "{duration}");
        }
    }

    #[test]
    fn test_compute_entry_empty_table() {
        let engine = DischargeEngine::builder().table(RateTable::from_iter([])).build();
        let result = engine.compute_entry(1, Hours(1.0), Feet(1.0));
        assert!(matches!(result, Err(DischargeError::DataUnavailable)));
    }

    #[test]
    fn test_compute_entry_out_of_range() {
        let engine = DischargeEngine::builder()
            .table(RateTable::from_iter([RateRecord::new(Feet(1.0), CubicFeetPerSecond(384.0))]))
            .build();
        let entry = engine.compute_entry(1, Hours(1.0), Feet(10.0)).unwrap();
        assert!(!entry.is_exact);
        assert_abs_diff_eq!(entry.discharge.0, 1.0);
    }
}
