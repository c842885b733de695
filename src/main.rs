use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use m3u_vod_addon::{config::Config, utils::sanitize_base_url, web::WebServer};

#[derive(Parser)]
#[command(name = "m3u-vod-addon")]
#[command(version)]
#[command(about = "A Stremio addon serving a remote M3U playlist as a VOD catalog")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT", env = "PORT")]
    port: Option<u16>,

    /// Playlist used when a request carries no configuration
    #[arg(short = 'd', long, value_name = "URL")]
    default_playlist: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = if cli.log_level == "trace" {
        format!("m3u_vod_addon={},tower_http=trace", cli.log_level)
    } else {
        format!("m3u_vod_addon={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting M3U VOD addon v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(default_playlist) = cli.default_playlist {
        config.playlist.default_url = default_playlist;
    }
    config.validate()?;

    let base_url = sanitize_base_url(&config.web.base_url);
    let web_server = WebServer::new(config)?;

    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    info!("Addon live at {}/configure", base_url);
    web_server.serve().await?;

    Ok(())
}
