use clap::Parser;
use mavenpages::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    mavenpages::logging::init(cli.verbose);
    tracing::debug!(version = mavenpages::VERSION, "mavenpages starting");

    run(cli)?;
    Ok(())
}
