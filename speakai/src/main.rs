use clap::Parser;
use dotenvy::dotenv;
use speakai::{Config, app, build_state, init_logging};
use tracing::info;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = Config::parse();
    init_logging(&config.log_directive());

    let state = build_state(&config)?;
    let app = app(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(
        "{} v{} listening on http://{}",
        config.app_name,
        config.app_version,
        listener.local_addr()?
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
