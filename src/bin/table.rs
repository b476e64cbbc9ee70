//! Text arrangement printer
//!
//! Entry point for the `table` command-line application.

use clap::Parser;
use std::io::{self, BufWriter};
use std::process;

use wordlist_tools::cli::TableArgs;
use wordlist_tools::progress::print_error;
use wordlist_tools::table::print_all;

fn main() {
    let args = TableArgs::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(args) {
        print_error(&format!("{}", e));
        process::exit(1);
    }
}

fn run(args: TableArgs) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    print_all(&mut out, &args.texts)?;
    Ok(())
}
