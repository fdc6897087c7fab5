#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::process;

mod commands;

use commands::Commands;

use clap::{Args, CommandFactory, Parser};
use log::trace;

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        process::exit(2);
    }
}

fn try_main() -> eyre::Result<()> {
    let Cli {
        command,
        global_opts: GlobalOpts { verbosity, quiet },
    } = Cli::parse();

    setup_errlog(verbosity as usize, quiet)?;

    let command = if let Some(command) = command {
        command
    } else {
        trace!("No subcommand given, printing usage");
        println!("{}", Cli::command().render_usage());
        return Ok(());
    };

    let message = command.execute()?;
    println!("{message}");
    Ok(())
}

fn setup_errlog(verbosity: usize, quiet: bool) -> eyre::Result<()> {
    // warnings are shown unless quiet, errors are always shown
    let verbosity = if quiet { 0 } else { verbosity + 1 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "dblp")]
#[clap(about = "Get and search bibliographic entries from DBLP in the terminal")]
#[clap(version, author)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Commands>,

    #[clap(flatten)]
    global_opts: GlobalOpts,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbosity: u8,

    /// Only print errors to stderr, warnings are hidden.
    #[clap(short, long, global = true)]
    quiet: bool,
}
