use clap::Parser;
use portmap::{Config, DashboardServer};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "portmap",
    about = "Layer-based vector map dashboard for port-area geographic data"
)]
struct Cli {
    /// Port to serve on
    #[arg(long, default_value_t = 8000)]
    port: u16,
    /// Folder holding the persisted custom layer file
    #[arg(long, default_value = "storage")]
    storage_folder: PathBuf,
    /// Optional folder of extra .kml/.zip/.geojson files loaded as built-in layers
    #[arg(long)]
    data_folder: Option<PathBuf>,
    /// Gemini API key for the assistant endpoint (falls back to $GEMINI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,
    /// Assistant model name
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let defaults = Config::default();
    let config = Config {
        port: cli.port,
        storage_folder: cli.storage_folder,
        data_folder: cli.data_folder,
        api_key: cli
            .api_key
            .or_else(|| std::env::var("GEMINI_API_KEY").ok()),
        assistant_model: cli.model.unwrap_or(defaults.assistant_model),
    };

    let server = DashboardServer::new(config).await?;
    server.start().await
}
