use crate::{core::engine::CalculationEntry, quantity::discharge::Discharge};

/// Calculations made during one interactive session, in the order they were made.
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct Session {
    entries: Vec<CalculationEntry>,

    /// Running sum of the entries' discharges.
    total: Discharge,
}

impl Session {
    pub fn push(&mut self, entry: CalculationEntry) {
        self.total += entry.discharge;
        self.entries.push(entry);
    }

    /// Drop all the entries along with the running total.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn entries(&self) -> &[CalculationEntry] {
        &self.entries
    }

    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn total(&self) -> Discharge {
        self.total
    }

    /// Aggregate the entries, or [`None`] when there are none.
    pub fn summary(&self) -> Option<Summary> {
        let count = self.entries.len();
        if count == 0 {
            return None;
        }
        #[expect(clippy::cast_precision_loss)]
        let average = self.total / count as f64;
        Some(Summary { count, total: self.total, average })
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub total: Discharge,
    pub average: Discharge,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::Local;

    use super::*;
    use crate::{
        core::{engine::DischargeEngine, rate_table::RateTable},
        quantity::{flow::CubicFeetPerSecond, height::Feet, time::Hours},
    };

    fn entry(discharge: f64) -> CalculationEntry {
        CalculationEntry {
            timestamp: Local::now(),
            gate_count: 1,
            duration: Hours(1.0),
            requested_height: Feet(1.0),
            resolved_height: Feet(1.0),
            rate: CubicFeetPerSecond(18000.0),
            is_exact: true,
            discharge: Discharge(discharge),
        }
    }

    #[test]
    fn test_empty() {
        let session = Session::default();
        assert!(session.is_empty());
        assert_eq!(session.total(), Discharge::default());
        assert_eq!(session.summary(), None);
    }

    #[test]
    fn test_accumulate() {
        let mut session = Session::default();
        for discharge in [10.0, 20.0, 30.0] {
            session.push(entry(discharge));
        }
        let summary = session.summary().unwrap();
        assert_eq!(summary.count, 3);
        assert_abs_diff_eq!(summary.total.0, 60.0);
        assert_abs_diff_eq!(summary.average.0, 20.0);
    }

    #[test]
    fn test_keeps_insertion_order() {
        let mut session = Session::default();
        session.push(entry(30.0));
        session.push(entry(10.0));
        assert_eq!(session.entries()[0].discharge, Discharge(30.0));
        assert_eq!(session.entries()[1].discharge, Discharge(10.0));
    }

    #[test]
    fn test_clear() {
        let mut session = Session::default();
        session.push(entry(10.0));
        session.push(entry(20.0));
        session.clear();
        assert_eq!(session.len(), 0);
        assert_eq!(session.total(), Discharge::default());
        assert_eq!(session.summary(), None);

        session.push(entry(5.0));
        assert_abs_diff_eq!(session.total().0, 5.0);
    }

    #[test]
    fn test_clear_empty() {
        let mut session = Session::default();
        session.clear();
        assert!(session.is_empty());
        assert_eq!(session.total(), Discharge::default());
    }

    #[test]
    fn test_failed_computation_leaves_session_unchanged() {
        let engine = DischargeEngine::builder().table(RateTable::default()).build();
        let mut session = Session::default();
        session.push(engine.compute_entry(2, Hours(3.0), Feet(0.5)).unwrap());
        let (len, total) = (session.len(), session.total());

        if let Ok(entry) = engine.compute_entry(0, Hours(1.0), Feet(1.0)) {
            session.push(entry);
        }
        assert_eq!(session.len(), len);
        assert_eq!(session.total(), total);
    }
}
