use defense_tech_tracker::config::Config;
use defense_tech_tracker::routes;
use defense_tech_tracker::services::api::ApiClient;
use anyhow::anyhow;
use dotenv::dotenv;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let config = Config::from_env()?;
    let client = ApiClient::from_config(&config).map_err(|e| anyhow!("Failed to build API client: {}", e))?;
    info!("API client ready for {}", client.base_url());

    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    info!("Will bind to: {}", addr);

    // Set up CORS
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET"]);

    let api = routes::routes(Arc::new(client)).with(cors);
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(api)
        .run(addr)
        .await;

    Ok(())
}
