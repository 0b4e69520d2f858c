use std::{
    fmt::{Display, Formatter},
    fs::File,
    io::Read,
    ops::RangeInclusive,
    path::Path,
};

use comfy_table::{Cell, CellAlignment, Table, modifiers, presets};
use itertools::Itertools;
use serde::Deserialize;

use crate::{
    core::error::DischargeError,
    prelude::*,
    quantity::{flow::CubicFeetPerSecond, height::Feet},
};

/// Rates used when the reference file cannot be read.
const DEFAULT_RATES: [(f64, f64); 6] = [
    (0.5, 9000.0),
    (1.0, 18000.0),
    (1.5, 29000.0),
    (2.0, 38000.0),
    (2.5, 49000.0),
    (3.0, 58000.0),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RateRecord {
    pub height: Feet,

    #[serde(rename = "cfs", alias = "rate")]
    pub rate: CubicFeetPerSecond,
}

impl RateRecord {
    pub const fn new(height: Feet, rate: CubicFeetPerSecond) -> Self {
        Self { height, rate }
    }
}

/// Gate opening height to flow rate reference table, in the source order.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateTable(Vec<RateRecord>);

impl Default for RateTable {
    fn default() -> Self {
        DEFAULT_RATES
            .into_iter()
            .map(|(height, rate)| RateRecord::new(Feet(height), CubicFeetPerSecond(rate)))
            .collect()
    }
}

impl FromIterator<RateRecord> for RateTable {
    fn from_iter<T: IntoIterator<Item = RateRecord>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl RateTable {
    /// Read the table from CSV with the `height` and `cfs` (or `rate`) columns.
    pub fn try_read_csv<R: Read>(reader: R) -> Result<Self> {
        csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader)
            .into_deserialize::<RateRecord>()
            .enumerate()
            .map(|(index, record)| -> Result<RateRecord> {
                let record = record.with_context(|| format!("malformed rate table row #{index}"))?;
                ensure!(
                    record.height.is_finite() && record.rate.is_finite(),
                    "non-finite value in rate table row #{index}",
                );
                Ok(record)
            })
            .collect()
    }

    /// Load the table from the file, falling back to the built-in table when it cannot be read.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load_or_default(path: &Path) -> Self {
        let result = File::open(path)
            .with_context(|| format!("failed to open `{}`", path.display()))
            .and_then(Self::try_read_csv);
        match result {
            Ok(table) => {
                if table.is_empty() {
                    warn!("the rate table is empty, no discharge can be calculated");
                } else {
                    info!(len = table.len(), "loaded the rate table");
                }
                table
            }
            Err(error) => {
                warn!("using the built-in rate table: {error:#}");
                Self::default()
            }
        }
    }

    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RateRecord> {
        self.0.iter()
    }

    /// Lowest and highest tabulated heights.
    pub fn span(&self) -> Option<RangeInclusive<Feet>> {
        self.0
            .iter()
            .map(|record| record.height)
            .minmax()
            .into_option()
            .map(|(min, max)| min..=max)
    }

    /// Find the rate for the requested height.
    ///
    /// An exactly matching row wins. Otherwise, the row with the closest height is used,
    /// and on equal distances the row which comes first in the table.
    pub fn resolve(&self, requested: Feet) -> Result<Resolution, DischargeError> {
        if !requested.is_finite() {
            return Err(DischargeError::InvalidInput(format!(
                "gate height must be a finite number, got {requested}",
            )));
        }
        let record = self
            .0
            .iter()
            .find(|record| record.height == requested)
            .or_else(|| self.0.iter().min_by_key(|record| record.height.abs_diff(requested)))
            .ok_or(DischargeError::DataUnavailable)?;
        Ok(Resolution { requested, height: record.height, rate: record.rate })
    }
}

impl Display for RateTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
            .enforce_styling()
            .set_header(vec![
                Cell::new("Height").set_alignment(CellAlignment::Right),
                Cell::new("Rate").set_alignment(CellAlignment::Right),
            ]);
        for record in self.iter() {
            table.add_row(vec![
                Cell::new(record.height).set_alignment(CellAlignment::Right),
                Cell::new(record.rate).set_alignment(CellAlignment::Right),
            ]);
        }
        write!(f, "{table}")
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub requested: Feet,

    /// Table height which the rate was taken from.
    pub height: Feet,

    pub rate: CubicFeetPerSecond,
}

impl Resolution {
    pub fn is_exact(&self) -> bool {
        self.height == self.requested
    }
}
