use anyhow::Result;
use fluidcal::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
