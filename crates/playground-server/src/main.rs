//! Binary entrypoint for the playground HTTP server.
//!
//! Configuration comes from `PLAYGROUND_*` environment variables; see
//! [`playground_server::config`].

use playground_server::config::ServerConfig;
use playground_server::router::build_router;
use playground_server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        run_script = %config.executor.run_script.display(),
        timeout = ?config.executor.timeout,
        db_path = %config.db_path,
        "configuration loaded"
    );

    let state = AppState::new(&config)?;
    let app = build_router(state);

    let addr = config.bind_addr();
    tracing::info!("playground server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
