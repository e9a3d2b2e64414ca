use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use geocoding::{Bounds, Commands, Container, ContainerConfig, Provider, Router};

#[derive(Parser)]
#[command(name = "geocode")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true, value_enum, default_value_t = Provider::Mapquest)]
    provider: Provider,

    /// API key; defaults to MAPQUEST_API_KEY or GOOGLE_API_KEY
    #[arg(short, long, global = true)]
    key: Option<String>,

    /// Use the MapQuest open-data host
    #[arg(long, global = true)]
    open_data: bool,

    /// Bias results to a box: lat1,lng1,lat2,lng2
    #[arg(short, long, global = true, allow_hyphen_values = true)]
    bounding_box: Option<Bounds>,

    #[arg(short = 'n', long, global = true)]
    max_results: Option<u32>,

    #[arg(short, long, global = true)]
    locale: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Container::new(ContainerConfig {
        provider: cli.provider,
        api_key: cli.key,
        open_data: cli.open_data,
        bounding_box: cli.bounding_box,
        max_results: cli.max_results,
        locale: cli.locale,
        timeout_secs: cli.timeout,
    })?;

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}
