use std::path::PathBuf;

use clap::Parser;

use crate::core::{
    engine::{DischargeEngine, Normalization},
    rate_table::RateTable,
};

#[derive(Parser)]
pub struct EngineArgs {
    /// CSV file with the `height` and `cfs` columns. The built-in table is used when it cannot be read.
    #[clap(long = "rate-table", env = "RATE_TABLE_PATH", default_value = "discharge_data.csv")]
    rate_table_path: PathBuf,

    /// Discharge normalization constant, 16 gates × 24 hours by default.
    #[clap(long, env = "DISCHARGE_NORMALIZATION", default_value = "384")]
    normalization: Normalization,
}

impl EngineArgs {
    fn load_rate_table(&self) -> RateTable {
        RateTable::load_or_default(&self.rate_table_path)
    }

    pub fn build_engine(&self) -> DischargeEngine {
        DischargeEngine::builder()
            .table(self.load_rate_table())
            .normalization(self.normalization)
            .build()
    }
}
