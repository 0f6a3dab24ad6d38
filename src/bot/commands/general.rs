//! General Discord commands - ping and help.
//! These commands don't touch the game and provide basic bot functionality.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Coin Stack Help**\n\
        Tracks who owes whom across rounds of the game.\n\n\
        **Round Commands**\n\
        • `/round <receivers> <amount>` - Records a round. Receivers are comma-separated names; everyone else pays `amount`.\n\
        • `/undo confirm:True` - Reverses the most recent round.\n\
        • `/reset confirm:True` - Clears all balances and history. Cannot be undone.\n\n\
        **Overview Commands**\n\
        • `/players` - Shows every player's balance.\n\
        • `/settle` - Shows the payments that settle all debts.\n\
        • `/history [limit]` - Lists recent rounds.\n\
        • `/rename <player> <name>` - Changes a player's display name.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
