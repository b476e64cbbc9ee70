//! Dictionary filter
//!
//! Main entry point for the `filter-dic` command-line application.

use clap::Parser;
use std::io;
use std::process;

use wordlist_tools::cli::FilterArgs;
use wordlist_tools::processor::run_cli;
use wordlist_tools::progress::print_error;

fn main() {
    let args = FilterArgs::parse();

    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        process::exit(1);
    }
}

fn run(args: FilterArgs) -> anyhow::Result<()> {
    run_cli(&args, &mut io::stdout().lock())?;
    Ok(())
}
