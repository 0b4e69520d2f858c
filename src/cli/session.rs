use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    ops::ControlFlow,
    path::PathBuf,
    slice,
};

use clap::{Parser, Subcommand};

use crate::{
    cli::engine::EngineArgs,
    core::{engine::DischargeEngine, session::Session},
    export::export_entries,
    prelude::*,
    quantity::{height::Feet, time::Hours},
    tables::{build_entries_table, build_summary_table},
};

#[derive(Parser)]
pub struct SessionArgs {
    #[clap(flatten)]
    engine: EngineArgs,

    /// Read the actions from the file instead of the standard input.
    #[clap(long)]
    script: Option<PathBuf>,
}

impl SessionArgs {
    pub fn run(self) -> Result {
        let engine = self.engine.build_engine();
        let mut session = Session::default();
        let output = io::stdout().lock();
        match &self.script {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open `{}`", path.display()))?;
                run(&engine, &mut session, BufReader::new(file), output)
            }
            None => run(&engine, &mut session, io::stdin().lock(), output),
        }
    }
}

/// Process the input line by line, each line is a single action.
///
/// A failed action is reported and the session is left as it was.
pub fn run<R: BufRead, W: Write>(
    engine: &DischargeEngine,
    session: &mut Session,
    input: R,
    mut output: W,
) -> Result {
    for line in input.lines() {
        let line = line.context("failed to read the session input")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let action = match ActionLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed.action,
            Err(error) => {
                write!(output, "{error}")?;
                continue;
            }
        };
        match action.apply(engine, session, &mut output) {
            Ok(ControlFlow::Continue(())) => {}
            Ok(ControlFlow::Break(())) => break,
            Err(error) => {
                error!("{error:#}");
                writeln!(output, "error: {error:#}")?;
            }
        }
    }
    Ok(())
}

#[derive(Parser)]
#[command(no_binary_name = true)]
struct ActionLine {
    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Action {
    /// Calculate an entry and add it to the session.
    Compute {
        /// Number of open gates.
        gate_count: u32,

        /// Opening duration in hours.
        #[clap(allow_negative_numbers = true)]
        duration: Hours,

        /// Gate opening height in feet.
        #[clap(allow_negative_numbers = true)]
        height: Feet,
    },

    /// Remove all the entries.
    Clear,

    /// Show the total and average discharge.
    Summary,

    /// Show all the entries.
    Entries,

    /// Export the entries into a CSV file.
    Export { path: PathBuf },

    /// End the session.
    #[clap(alias = "exit")]
    Quit,
}

impl Action {
    fn apply<W: Write>(
        self,
        engine: &DischargeEngine,
        session: &mut Session,
        output: &mut W,
    ) -> Result<ControlFlow<()>> {
        match self {
            Self::Compute { gate_count, duration, height } => {
                let entry = engine.compute_entry(gate_count, duration, height)?;
                writeln!(output, "{}", build_entries_table(slice::from_ref(&entry)))?;
                if let Some(notice) = entry.substitution_notice() {
                    writeln!(output, "warning: {notice}")?;
                }
                writeln!(output, "discharge for entry #{}: {}", session.len() + 1, entry.discharge)?;
                session.push(entry);
                writeln!(output, "total discharge: {}", session.total())?;
            }
            Self::Clear => {
                session.clear();
                info!("cleared the session");
                writeln!(output, "cleared")?;
            }
            Self::Summary => {
                writeln!(output, "{}", build_summary_table(session.summary()))?;
            }
            Self::Entries => {
                writeln!(output, "{}", build_entries_table(session.entries()))?;
            }
            Self::Export { path } => {
                if session.is_empty() {
                    warn!("the session is empty, exporting the header only");
                }
                export_entries(session.entries(), &path)?;
                writeln!(output, "exported {} entries to `{}`", session.len(), path.display())?;
            }
            Self::Quit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }
}
