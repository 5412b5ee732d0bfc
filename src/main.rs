//! coinlog entry point: starts the Discord bot and the companion auth API.

use coinlog::{
    api::{self, codes::CodeStore, state::ApiState, token::TokenSigner},
    bot::{self, BotData},
    config::{api::ApiConfig, database, jobs},
    core::jobs::JobCatalog,
    errors::{Error, Result},
};
use dotenvy::dotenv;
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the job catalog
    let job_config = jobs::load_default_config()
        .inspect_err(|e| error!("Failed to load job catalog: {e}"))?;
    info!("Loaded {} jobs from config.toml.", job_config.jobs.len());

    // 4. Initialize the database
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;
    info!("Database initialized successfully.");

    // 5. Assemble the shared bot context
    let api_config = ApiConfig::from_env()?;
    let default_prefix = env::var("DEFAULT_PREFIX").unwrap_or_else(|_| "!".to_string());
    let data = BotData::new(db, JobCatalog::new(job_config.jobs), default_prefix);

    // 6. Build the client, then hand its HTTP/cache handles to the auth API
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;
    let mut client = bot::build_client(&token, data).await?;

    let api_state = ApiState {
        http: Arc::clone(&client.http),
        cache: Arc::clone(&client.cache),
        codes: Arc::new(CodeStore::new()),
        signer: Arc::new(TokenSigner::new(&api_config.jwt_secret)),
        secure_cookies: api_config.secure_cookies,
    };
    tokio::spawn(async move {
        if let Err(e) = api::serve(&api_config.bind_addr, api_state).await {
            error!("Auth API exited: {e}");
        }
    });

    // 7. Run the gateway connection until shutdown
    client.start().await.map_err(Error::from)?;
    Ok(())
}
