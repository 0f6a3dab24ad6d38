//! Round Discord commands - `round`, `undo`, `reset`, `settle` and `history`.
//!
//! These commands forward to the game session and render the outcome. Destructive commands
//! ask for an explicit `confirm` flag; the session itself trusts whoever calls it.

use crate::core::{
    game::{GameState, Player, Transaction},
    report,
};
use std::fmt::Write;

/// Default number of rounds `/history` lists.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;
/// Upper bound for `/history`, keeps replies under Discord's message size.
pub const MAX_HISTORY_LIMIT: u32 = 25;

/// Turns `"Anna, 2 ,ben"` into player ids. Entries that match no player are passed through
/// unchanged so validation can report them.
#[must_use]
pub fn parse_receivers(state: &GameState, input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            state
                .resolve_player(entry)
                .map_or_else(|| entry.to_string(), |p| p.id.clone())
        })
        .collect()
}

/// Reply after a round was applied.
pub fn format_round_reply(state: &GameState, currency: &str) -> Result<String, std::fmt::Error> {
    let mut reply = String::new();
    if let Some(tx) = state.last_transaction() {
        writeln!(
            reply,
            "✅ Round {} recorded: {} each paid {}, {} each received {}",
            state.current_round.saturating_sub(1),
            names(&tx.payers),
            report::format_amount(tx.amount_per_payer, currency),
            names(&tx.receivers),
            report::format_amount(tx.amount_per_receiver, currency),
        )?;
    }
    writeln!(reply)?;
    write!(reply, "{}", report::format_players(state, currency))?;
    Ok(reply)
}

/// Reply listing every validation problem.
#[must_use]
pub fn format_validation_reply(messages: &[String]) -> String {
    let mut reply = "❌ Round not recorded:".to_string();
    for message in messages {
        reply.push_str("\n• ");
        reply.push_str(message);
    }
    reply
}

/// Reply after the latest round was undone.
#[must_use]
pub fn format_undo_reply(undone: &Transaction, state: &GameState, currency: &str) -> String {
    format!(
        "↩️ Undid the round where {} received {} each.\n\n{}",
        names(&undone.receivers),
        report::format_amount(undone.amount_per_receiver, currency),
        report::format_players(state, currency)
    )
}

fn names(players: &[Player]) -> String {
    players
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::{
        DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT, format_round_reply, format_undo_reply,
        format_validation_reply, parse_receivers,
    };
    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{ledger::RoundRequest, report},
        errors::{Error, Result},
    };

    /// Records a round: the listed players receive, everyone else pays the amount.
    #[poise::command(slash_command, prefix_command)]
    pub async fn round(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Who receives money (comma-separated names)"]
        #[autocomplete = "autocomplete::autocomplete_receivers"]
        receivers: String,
        #[description = "Amount each payer pays"] amount: f64,
    ) -> Result<()> {
        let data = ctx.data();

        let reply = {
            let mut session = data.session.lock().await;
            let request = RoundRequest::new(parse_receivers(session.state(), &receivers), amount);

            match session.apply_transaction(&request).await {
                Ok(state) => format_round_reply(state, &data.currency)?,
                Err(Error::Validation { messages }) => format_validation_reply(&messages),
                Err(e) => return Err(e),
            }
        };

        ctx.say(reply).await?;
        Ok(())
    }

    /// Reverses the most recent round.
    #[poise::command(slash_command, prefix_command)]
    pub async fn undo(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Set to true to really undo the last round"] confirm: bool,
    ) -> Result<()> {
        let data = ctx.data();

        let reply = {
            let mut session = data.session.lock().await;
            if !session.state().can_undo() {
                "Nothing to undo.".to_string()
            } else if !confirm {
                "Undo the last round? Run `/undo confirm:True` to proceed.".to_string()
            } else {
                match session.undo_last().await {
                    Some(undone) => format_undo_reply(&undone, session.state(), &data.currency),
                    None => "Nothing to undo.".to_string(),
                }
            }
        };

        ctx.say(reply).await?;
        Ok(())
    }

    /// Clears every balance and the whole history.
    #[poise::command(slash_command, prefix_command)]
    pub async fn reset(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Set to true to really wipe all data"] confirm: bool,
    ) -> Result<()> {
        if !confirm {
            ctx.say("Reset all data? This cannot be undone. Run `/reset confirm:True` to proceed.")
                .await?;
            return Ok(());
        }

        let data = ctx.data();
        let reply = {
            let mut session = data.session.lock().await;
            let state = session.reset().await;
            format!(
                "🔄 Game reset. Round {}.\n\n{}",
                state.current_round,
                report::format_players(state, &data.currency)
            )
        };

        ctx.say(reply).await?;
        Ok(())
    }

    /// Shows who should pay whom to settle all debts.
    #[poise::command(slash_command, prefix_command)]
    pub async fn settle(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let reply = {
            let session = data.session.lock().await;
            format!(
                "💰 **Who Owes Whom**\n{}",
                report::format_settlement(&session.state().players, &data.currency)
            )
        };

        ctx.say(reply).await?;
        Ok(())
    }

    /// Lists the most recent rounds.
    #[poise::command(slash_command, prefix_command)]
    pub async fn history(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "How many rounds to show (default 10)"] limit: Option<u32>,
    ) -> Result<()> {
        let data = ctx.data();
        let limit = limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT);

        let reply = {
            let session = data.session.lock().await;
            let lines = report::format_history(
                session.state(),
                usize::try_from(limit).unwrap_or(usize::MAX),
                &data.currency,
            );
            if lines.is_empty() {
                "No rounds yet. Record one with `/round`.".to_string()
            } else {
                format!("📜 **Round History**\n{}", lines.join("\n"))
            }
        };

        ctx.say(reply).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::ledger::{RoundRequest, UndoOutcome, apply_transaction, undo_last},
        errors::Result,
        test_utils::fresh_game,
    };

    #[test]
    fn test_parse_receivers_resolves_names_and_ids() {
        let state = fresh_game();
        assert_eq!(
            parse_receivers(&state, "player 1, 3 ,, Zed"),
            vec!["1", "3", "Zed"]
        );
        assert!(parse_receivers(&state, " , ").is_empty());
    }

    #[test]
    fn test_format_round_reply() -> Result<()> {
        let state = apply_transaction(&fresh_game(), &RoundRequest::new(["1"], 3.0))?;
        let reply = format_round_reply(&state, "€")?;

        assert!(reply.starts_with(
            "✅ Round 1 recorded: Player 2, Player 3, Player 4 each paid €3.00, Player 1 each received €9.00"
        ));
        assert!(reply.ends_with("Player 4: -€3.00"));
        Ok(())
    }

    #[test]
    fn test_format_validation_reply_lists_all() {
        let reply = format_validation_reply(&[
            "Amount must be greater than 0".to_string(),
            "Select at least 1 person to receive money".to_string(),
        ]);
        assert_eq!(
            reply,
            "❌ Round not recorded:\n• Amount must be greater than 0\n• Select at least 1 person to receive money"
        );
    }

    #[test]
    fn test_format_undo_reply() -> Result<()> {
        let applied = apply_transaction(&fresh_game(), &RoundRequest::new(["2"], 1.0))?;
        let UndoOutcome::Undone { state, transaction } = undo_last(&applied) else {
            panic!("expected a round to undo");
        };

        let reply = format_undo_reply(&transaction, &state, "€");
        assert!(reply.starts_with("↩️ Undid the round where Player 2 received €3.00 each."));
        assert!(reply.contains("Player 2: +€0.00"));
        Ok(())
    }
}
