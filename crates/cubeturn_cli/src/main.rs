//! Headless command-line driver for the cubeturn simulation.

#[cfg(test)]
use pretty_assertions as _;

mod cli;
mod prefs;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    // Initialize logging.
    env_logger::builder().init();

    color_eyre::install()?;
    cli::exec(args)
}
