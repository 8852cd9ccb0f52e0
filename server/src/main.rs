//! basketbridge-api: the BasketBridge board server.
//!
//! Usage:
//!   BASKETBRIDGE_ADDR=0.0.0.0:8080 \
//!   BASKETBRIDGE_DATA=data/grocery_summary.json \
//!   BASKETBRIDGE_PASSCODE=... \
//!   AZURE_OPENAI_ENDPOINT=... AZURE_OPENAI_API_KEY=... \
//!   AZURE_OPENAI_DEPLOYMENT=... AZURE_OPENAI_API_VERSION=... \
//!   basketbridge-api

use anyhow::Result;
use basketbridge_api::config::ServerConfig;
use basketbridge_api::routes::create_router;
use basketbridge_api::session::Sessions;
use basketbridge_api::upstream::AzureChat;
use basketbridge_api::AppState;
use basketbridge_core::Dataset;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = ServerConfig::from_env();

    // Serve the embedded reference snapshot when no dataset file is present;
    // the board then shows the shipped extract.
    let dataset = match Dataset::load(&config.data_path) {
        Ok(d) => d,
        Err(e) => {
            log::warn!("Falling back to embedded reference dataset: {e}");
            Dataset::reference()
        }
    };

    if config.passcode.is_none() {
        log::warn!("BASKETBRIDGE_PASSCODE unset; the unlock gate will reject all attempts");
    }

    let chat = AzureChat::new().map_err(|e| anyhow::anyhow!("HTTP client init: {e}"))?;

    let state = AppState {
        dataset: Arc::new(dataset),
        sessions: Sessions::new(),
        chat: Arc::new(chat),
        passcode: config.passcode.clone(),
    };

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    log::info!("BasketBridge board server listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
