//! Gapminder CLI - inspect the dataset behind the dashboard and export it.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "gm-cli",
    version,
    about = "Gapminder GDP x life expectancy data toolkit"
)]
struct Cli {
    /// Gapminder CSV to use instead of the embedded fixture
    #[arg(long, global = true)]
    data: Option<String>,

    #[command(subcommand)]
    command: gm_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    gm_cmd::run(cli.command, cli.data.as_deref())
}
