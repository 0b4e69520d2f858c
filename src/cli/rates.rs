use clap::Parser;

use crate::{cli::engine::EngineArgs, prelude::*};

#[derive(Parser)]
pub struct RatesArgs {
    #[clap(flatten)]
    engine: EngineArgs,
}

impl RatesArgs {
    pub fn run(self) -> Result {
        let engine = self.engine.build_engine();
        let table = engine.table();
        if let Some(span) = table.span() {
            info!(
                len = table.len(),
                min = %span.start(),
                max = %span.end(),
                normalization = %engine.normalization(),
                "rate table",
            );
        } else {
            warn!("the rate table is empty");
        }
        println!("{table}");
        Ok(())
    }
}
