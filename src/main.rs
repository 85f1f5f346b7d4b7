use anthropic_gateway::{build_router, AppState, GatewayConfig, SharedLogger};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "anthropic-gateway",
    about = "Stateless edge gateway translating OpenAI chat-completion calls to the Anthropic Messages API",
    version
)]
struct Cli {
    /// Path to config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Upstream base URL (overrides config)
    #[arg(long)]
    upstream: Option<String>,

    /// Log file path
    #[arg(long, default_value = "anthropic-gateway.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anthropic_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = GatewayConfig::find_and_load(cli.config.as_deref())?;

    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(upstream) = cli.upstream {
        config.upstream.base_url = upstream;
    }

    let logger = SharedLogger::new(&cli.log_file)?;

    info!("anthropic-gateway v{}", env!("CARGO_PKG_VERSION"));
    info!("  Upstream:  {}", config.upstream.base_url);
    info!("  Timeout:   {}s", config.upstream.timeout_secs);
    info!("  Port:      {}", config.port);
    info!("  Log file:  {}", cli.log_file.display());

    logger.info(
        "startup",
        format!(
            "Starting anthropic-gateway upstream={} port={}",
            config.upstream.base_url, config.port
        ),
    );

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.upstream.timeout_secs))
        .build()?;

    let state = Arc::new(AppState {
        config: config.clone(),
        client,
        logger: logger.clone(),
    });

    let app = build_router(state);
    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Listening on http://{}", bind_addr);
    info!("");
    info!("  Point OpenAI clients at:");
    info!("    OPENAI_BASE_URL=http://localhost:{}/v1", config.port);
    info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
