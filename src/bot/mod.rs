//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for Coin Stack: slash commands, autocomplete
//! handlers and the shared bot context. Commands are thin callers of
//! [`crate::core::session::GameSession`]; every rule lives in the core.

/// Discord command implementations (rounds, players, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    core::{session::GameSession, snapshot::DatabaseSnapshotStore},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
///
/// The session sits behind a mutex so commands are applied strictly one at a time.
pub struct BotData {
    /// The live game
    pub session: Mutex<GameSession<DatabaseSnapshotStore>>,
    /// Symbol prefixed to amounts in replies
    pub currency: String,
}

impl BotData {
    /// Creates a new `BotData` around an opened session.
    #[must_use]
    pub fn new(session: GameSession<DatabaseSnapshotStore>, currency: impl Into<String>) -> Self {
        Self {
            session: Mutex::new(session),
            currency: currency.into(),
        }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Registers all commands and runs the bot until the gateway connection ends.
#[instrument(skip_all)]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::round(),
                commands::undo(),
                commands::reset(),
                commands::players(),
                commands::rename(),
                commands::settle(),
                commands::history(),
                commands::ping(),
                commands::help(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some("!".into()),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;

    Ok(())
}
