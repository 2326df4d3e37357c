//! `hessian-pack` — encode JSON (stdin) to Hessian 2 (stdout).
//!
//! Usage:
//!   hessian-pack [--exact-lists] [--options FILE] [--hex]
//!
//! Set `RUST_LOG=hessian_pack=trace` to log every encoding decision.

use hessian_pack::cli::{parse_args, run, CliError};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = main_inner() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn main_inner() -> Result<(), CliError> {
    let args = parse_args(std::env::args().skip(1))?;

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&args, &input, &mut out)
}
