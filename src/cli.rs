mod compute;
mod engine;
mod rates;
mod session;

use clap::{Parser, Subcommand};

use crate::{
    cli::{compute::ComputeArgs, rates::RatesArgs, session::SessionArgs},
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the gate opening height rate table.
    #[clap(name = "rates")]
    Rates(RatesArgs),

    /// Calculate the discharge for a single entry.
    #[clap(name = "compute")]
    Compute(ComputeArgs),

    /// Calculate multiple entries one by one, keeping the running total.
    #[clap(name = "session")]
    Session(SessionArgs),
}

impl Command {
    pub fn run(self) -> Result {
        match self {
            Self::Rates(args) => args.run(),
            Self::Compute(args) => args.run(),
            Self::Session(args) => args.run(),
        }
    }
}
