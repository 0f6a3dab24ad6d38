//! Player Discord commands - `players` and `rename`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::report,
        errors::{Error, Result},
    };

    /// Shows every player's balance and the current round.
    #[poise::command(slash_command, prefix_command)]
    pub async fn players(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let reply = {
            let session = data.session.lock().await;
            let state = session.state();
            format!(
                "🎲 **Round {}**\n{}",
                state.current_round,
                report::format_players(state, &data.currency)
            )
        };

        ctx.say(reply).await?;
        Ok(())
    }

    /// Changes a player's display name. Balances are not affected.
    #[poise::command(slash_command, prefix_command)]
    pub async fn rename(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Current name or id of the player"]
        #[autocomplete = "autocomplete::autocomplete_player_name"]
        player: String,
        #[description = "New name (up to 20 characters)"] new_name: String,
    ) -> Result<()> {
        let reply = {
            let mut session = ctx.data().session.lock().await;
            let player_id = session
                .state()
                .resolve_player(&player)
                .map_or_else(|| player.clone(), |p| p.id.clone());

            match session.rename_player(&player_id, &new_name).await {
                Ok(state) => {
                    let name = state.player(&player_id).map_or("", |p| p.name.as_str());
                    format!("✏️ {player} is now called {name}.")
                }
                Err(Error::PlayerNotFound { .. }) => {
                    format!("❌ No player called '{player}'. Use `/players` to see the roster.")
                }
                Err(Error::InvalidPlayerName { reason }) => format!("❌ Invalid name: {reason}"),
                Err(e) => return Err(e),
            }
        };

        ctx.say(reply).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
