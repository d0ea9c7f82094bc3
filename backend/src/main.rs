use bill_desk::{AppState, config::LogFormat, load_config, run_api_server, store};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(format: LogFormat) {
    // RUST_LOG takes precedence over the built-in default
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bill_desk=info,tower_http=info"));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    init_tracing(config.log_format);

    tracing::info!("Loaded configuration:\n{}", config);

    let store = store::connect(&config.database).await?;
    let state = AppState::new(store, config);

    run_api_server(state).await?;
    Ok(())
}
