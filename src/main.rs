#![warn(rust_2018_idioms)]
//#![deny(warnings, missing_docs)]

//! Explorer for undirected graphs. Graphs are built
//! edge by edge or loaded from edge lists and then
//! checked for common graph theoretic properties.

use clap::Parser;
use std::{
    io::{self, Write},
    path::PathBuf,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod debug;
pub use debug::Error;

mod graph;

mod input;

mod misc;
use misc::{PlanarityMethod, Settings, DEFAULT_HAMILTONIAN_BUDGET};

mod output;

mod parser;

mod properties;

mod session;
use session::Session;

/// Build, inspect and store undirected graphs.
#[derive(Parser, Debug)]
#[command(name = "grafo", version)]
struct Args {
    /// Edge list (.csv or .txt) to load before the menu starts
    file: Option<PathBuf>,

    /// How planarity is decided (exact or heuristic)
    #[arg(long, default_value = "exact")]
    planarity: PlanarityMethod,

    /// Extension steps the Hamiltonian search may take, 0 for no limit
    #[arg(long, default_value_t = DEFAULT_HAMILTONIAN_BUDGET)]
    hamiltonian_budget: u64,

    /// Where "show graph" writes its DOT rendering
    #[arg(long, default_value = "graph.dot")]
    dot_output: PathBuf,

    /// Print every property of FILE and exit
    #[arg(long, requires = "file")]
    report: bool,
}

impl From<&Args> for Settings {
    fn from(args: &Args) -> Self {
        Settings {
            planarity: args.planarity,
            hamiltonian_budget: match args.hamiltonian_budget {
                0 => None,
                budget => Some(budget),
            },
            dot_output: args.dot_output.clone(),
        }
    }
}

#[cfg(not(tarpaulin_include))]
fn print_report(session: &Session) -> Result<(), Error> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    for (property, result) in session.report() {
        match result {
            Ok(value) => writeln!(stdout, "{:<17} {}", property.name(), value)?,
            Err(error) => writeln!(stdout, "{:<17} error: {}", property.name(), error)?,
        }
    }

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("grafo=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let settings = Settings::from(&args);
    info!(
        planarity = %settings.planarity,
        budget = ?settings.hamiltonian_budget,
        dot_output = %settings.dot_output.display(),
        "starting"
    );

    let mut session = Session::new(settings);
    if let Some(file) = &args.file {
        session.open(file)?;
    }

    if args.report {
        return print_report(&session);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(&mut stdin.lock(), &mut stdout.lock())
}
