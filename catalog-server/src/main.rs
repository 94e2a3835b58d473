use catalog_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. .env, configuration, logging
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    setup_environment(&config)?;

    tracing::info!(env = %config.environment, db = %config.database_path, "Catalog server starting...");

    // 2. Database + services
    let state = ServerState::initialize(&config).await?;

    // 3. HTTP server
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
