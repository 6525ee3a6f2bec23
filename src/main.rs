use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use waypoint_core::http::serve;
use waypoint_core::Config;
use waypoint_geo::GeoWeatherService;
use waypoint_photos::FlickrClient;
use waypoint_predictor::Predictor;

#[derive(Debug, Parser)]
#[command(name = "waypoint", version, about = "Geo-weather, photo proxy and price predictor services")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, env = "WAYPOINT_CONFIG")]
    config: Option<PathBuf>,

    /// Interface to bind (overrides server.host)
    #[arg(long, global = true)]
    host: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Reverse geocoding + weather on `GET /`
    GeoWeather {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Flickr proxy on `GET /photos.json`
    Photos {
        #[arg(long)]
        port: Option<u16>,
    },
    /// House price predictor on `GET|POST /`
    Predictor {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run all three services, each on its configured port
    All,
    /// Validate the configuration and exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    waypoint_core::init()?;

    let cli = Cli::parse();
    let (mut config, _) = Config::load_validated(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }

    match cli.command {
        Command::GeoWeather { port } => run_geo_weather(&config, port).await,
        Command::Photos { port } => run_photos(&config, port).await,
        Command::Predictor { port } => run_predictor(&config, port).await,
        Command::All => {
            tokio::try_join!(
                run_geo_weather(&config, None),
                run_photos(&config, None),
                run_predictor(&config, None),
            )?;
            Ok(())
        }
        Command::CheckConfig => {
            println!("Configuration OK");
            Ok(())
        }
    }
}

async fn run_geo_weather(config: &Config, port: Option<u16>) -> Result<()> {
    let service = Arc::new(GeoWeatherService::from_config(config)?);
    let port = port.unwrap_or(config.geo_weather.port);
    serve(
        "geo-weather",
        waypoint_geo::router(service),
        &config.server.host,
        port,
    )
    .await
}

async fn run_photos(config: &Config, port: Option<u16>) -> Result<()> {
    let client = Arc::new(FlickrClient::from_config(config)?);
    let port = port.unwrap_or(config.photos.port);
    serve(
        "photos",
        waypoint_photos::router(client),
        &config.server.host,
        port,
    )
    .await
}

async fn run_predictor(config: &Config, port: Option<u16>) -> Result<()> {
    let predictor = Arc::new(Predictor::new(
        config.predictor.coefficients,
        config.predictor.parse_policy,
    ));
    let port = port.unwrap_or(config.predictor.port);
    tracing::info!(
        "Predictor using {:?} parsing",
        config.predictor.parse_policy
    );
    serve(
        "predictor",
        waypoint_predictor::router(predictor),
        &config.server.host,
        port,
    )
    .await
}
