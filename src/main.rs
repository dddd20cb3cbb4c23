use anyhow::Result;
use clap::Parser;
use weatherdesk::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    weatherdesk::run(cli).await
}
