//! Climate CLI - inspect the class breaks and export the map and chart encodings.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "climate-cli",
    version,
    about = "US climate choropleth toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: climate_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("[Climate] cli: running {}", cli.command.name());
    climate_cmd::run(cli.command).await
}
