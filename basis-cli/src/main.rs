//! Basis command line
//!
//! With no arguments, starts an interactive prompt. Otherwise the arguments
//! are joined into one expression, converted and printed.
//!
//! Environment:
//! - `BASIS_UNIT_DATABASE`: CSV unit database (default: built-in table)
//! - `BASIS_MAX_DEPTH`: bracket/exponent nesting limit (default 64)
//! - `BASIS_OUTPUT`: `text` or `json`
//! - `RUST_LOG`: log filter for stderr (default `warn`)

mod config;
mod repl;

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;
use basis::{Converter, LoadError, Renderer, UnitTable};
use config::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const BUNDLED_UNITS: &str = include_str!("../../data/units.csv");

const USAGE: &str = "\
Usage: basis [EXPRESSION...]

Reduce a unit expression to SI base units (s, m, kg, mol, C, K, cd).

  basis                  interactive prompt, 'q' to quit
  basis 3 km / (2 s)^2   convert one expression

Operators: * / ^, juxtaposition multiplies, brackets () [] {}.

Environment:
  BASIS_UNIT_DATABASE    CSV unit database (default: built-in table)
  BASIS_MAX_DEPTH        nesting limit (default 64)
  BASIS_OUTPUT           text (default) or json
  RUST_LOG               log filter (default warn)";

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
}

fn load_table(config: &Config) -> Result<UnitTable, LoadError> {
    match &config.unit_database {
        Some(path) => UnitTable::load(path),
        None => {
            debug!("using built-in unit table");
            UnitTable::from_csv_str(BUNDLED_UNITS)
        }
    }
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };
    debug!(?config, "configuration");

    let table = match load_table(&config) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };
    debug!(units = table.len(), "unit table ready");

    let converter = Converter::new(table).with_max_depth(config.max_depth);
    let renderer = Renderer::new(config.output);
    let mut stdout = io::stdout().lock();

    if args.is_empty() {
        let stdin = io::stdin();
        if let Err(e) = repl::run(&converter, &renderer, stdin.lock(), &mut stdout) {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    let expression = args.join(" ");
    let outcome = repl::evaluate(&converter, &renderer, &expression, &mut stdout)
        .and_then(|ok| stdout.flush().map(|_| ok));
    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
