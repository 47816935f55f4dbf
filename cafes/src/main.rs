use cafe_core::{init_tracing, shutdown_signal, AppConfig};
use cafes::{app, AppState, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();

    let config = AppConfig::load("dev")?;
    let settings = Settings::from_config(&config)?;
    let state = AppState::build(&settings).await?;

    let addr = settings.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, profile = config.profile(), "{} listening", settings.app_name);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
