use coin_stack::{
    bot::{self, BotData},
    config::{database, game},
    core::{session::GameSession, snapshot::DatabaseSnapshotStore},
    errors::Result,
};
use dotenvy::dotenv;
use std::env;
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

    // 3. Load the game configuration (roster, currency, snapshot key)
    let config_path = game::get_config_path();
    let app_config = game::load_config_or_default(&config_path)
        .inspect_err(|e| error!("Failed to load configuration from {}: {}", config_path, e))?;
    info!(
        "Loaded configuration with {} players.",
        app_config.players.len()
    );

    // 4. Connect to the snapshot database
    let database_url = database::get_database_url();
    let db = database::create_connection(&database_url)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Restore the saved game, or start fresh
    let store = DatabaseSnapshotStore::new(db, app_config.game.snapshot_key.clone());
    let session = GameSession::open(store, app_config.roster()).await;
    info!(
        "Game ready at round {} with {} players, snapshot key `{}`.",
        session.state().current_round,
        session.roster().len(),
        session.store().key()
    );

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))?;

    bot::run_bot(token, BotData::new(session, app_config.game.currency_symbol)).await
}
