// src/bin/naics.rs
//
// Lists tracked NAICS codes, or the top recipients of one code.
//
//   naics [CODE]
use anyhow::anyhow;
use defense_tech_tracker::config::Config;
use defense_tech_tracker::services::api::{validate_naics_code, ApiClient};
use defense_tech_tracker::services::pages::{load_naics_page, load_naics_recipients, LOADING_NAICS};
use defense_tech_tracker::views::PageState;
use dotenv::dotenv;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    let client = ApiClient::from_config(&config).map_err(|e| anyhow!("Failed to build API client: {}", e))?;

    print!("{}", PageState::<String>::loading(LOADING_NAICS));

    match env::args().nth(1) {
        Some(code) => {
            validate_naics_code(&code).map_err(|e| anyhow!("{}", e))?;
            print!("{}", load_naics_recipients(&client, &code).await);
        }
        None => print!("{}", load_naics_page(&client).await),
    }

    Ok(())
}
