use clap::Parser;
use lotledger::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
