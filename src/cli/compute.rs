use std::{path::PathBuf, slice};

use clap::Parser;

use crate::{
    cli::engine::EngineArgs,
    core::session::Session,
    export::export_entries,
    prelude::*,
    quantity::{height::Feet, time::Hours},
    tables::{build_entries_table, build_summary_table},
};

#[derive(Parser)]
pub struct ComputeArgs {
    #[clap(flatten)]
    engine: EngineArgs,

    /// Number of open gates.
    #[clap(long = "gates", default_value = "1")]
    gate_count: u32,

    /// Opening duration in hours.
    #[clap(long = "duration-hours", default_value = "1", allow_negative_numbers = true)]
    duration: Hours,

    /// Gate opening height in feet.
    #[clap(long, allow_negative_numbers = true)]
    height: Feet,

    /// Export the entry into the CSV file.
    #[clap(long)]
    export: Option<PathBuf>,
}

impl ComputeArgs {
    pub fn run(self) -> Result {
        let engine = self.engine.build_engine();
        let entry = engine.compute_entry(self.gate_count, self.duration, self.height)?;
        println!("{}", build_entries_table(slice::from_ref(&entry)));
        if let Some(notice) = entry.substitution_notice() {
            println!("warning: {notice}");
        }

        let mut session = Session::default();
        session.push(entry);
        println!("{}", build_summary_table(session.summary()));

        if let Some(path) = &self.export {
            export_entries(session.entries(), path)?;
        }
        Ok(())
    }
}
