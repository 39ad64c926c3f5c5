use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use content_engine::interfaces::cli::{run, Cli};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        error!(error = %err, "generation failed");
        std::process::exit(1);
    }
}
