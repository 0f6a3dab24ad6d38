//! Report formatting helpers.
//!
//! This module turns balances, settlement suggestions and round history into display strings.
//! All functions are framework-agnostic; the bot layer only decides where the text goes.

use crate::core::{
    game::{GameState, Player, Transaction},
    settlement::{PlayerDebt, compute_settlement},
};

/// Name shown for an id that is not in the roster.
pub const UNKNOWN_PLAYER: &str = "Unknown";

/// Amounts below this print as `0.00` at two decimals.
const HALF_CENT: f64 = 0.005;

/// Formats an amount with two decimals, e.g. `€4.50`.
#[must_use]
pub fn format_amount(amount: f64, currency: &str) -> String {
    format!("{currency}{amount:.2}")
}

/// Formats a balance with an explicit sign, e.g. `+€4.50` or `-€3.00`.
///
/// Balances that would print as zero are shown as `+€0.00`, never `-€0.00`.
#[must_use]
pub fn format_balance(balance: f64, currency: &str) -> String {
    let rounded = (balance * 100.0).round() / 100.0;
    if rounded >= 0.0 {
        format!("+{currency}{:.2}", rounded.abs())
    } else {
        format!("-{currency}{:.2}", rounded.abs())
    }
}

/// Display name for a player id, or [`UNKNOWN_PLAYER`].
#[must_use]
pub fn player_name<'a>(players: &'a [Player], player_id: &str) -> &'a str {
    players
        .iter()
        .find(|p| p.id == player_id)
        .map_or(UNKNOWN_PLAYER, |p| p.name.as_str())
}

/// One line per suggested payment: `Player 3 owes Player 1 €4.50`.
///
/// Payments too small to show at two decimals read `less than €0.01`.
#[must_use]
pub fn format_debt_line(players: &[Player], debt: &PlayerDebt, currency: &str) -> String {
    let amount = if debt.amount < HALF_CENT {
        format!("less than {}", format_amount(0.01, currency))
    } else {
        format_amount(debt.amount, currency)
    };

    format!(
        "{} owes {} {}",
        player_name(players, &debt.from_player_id),
        player_name(players, &debt.to_player_id),
        amount
    )
}

/// Full settlement overview for the current balances.
#[must_use]
pub fn format_settlement(players: &[Player], currency: &str) -> String {
    let debts = compute_settlement(players);
    if debts.is_empty() {
        return "All settled up! No one owes anyone money right now.".to_string();
    }

    debts
        .iter()
        .map(|debt| format_debt_line(players, debt, currency))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Balance table, one player per line in roster order.
#[must_use]
pub fn format_players(state: &GameState, currency: &str) -> String {
    state
        .players
        .iter()
        .map(|p| format!("{}: {}", p.name, format_balance(p.balance, currency)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Summary of a round: `Round #2 | €3.00 per payer | Player 1, Player 2 <- Player 3, Player 4`.
///
/// `round` is the 1-based position of the round counted from the oldest.
#[must_use]
pub fn format_history_entry(transaction: &Transaction, round: usize, currency: &str) -> String {
    let receivers = transaction
        .receivers
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let payers = transaction
        .payers
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Round #{round} | {} per payer, {} each | {receivers} <- {payers}",
        format_amount(transaction.amount_per_payer, currency),
        format_amount(transaction.amount_per_receiver, currency),
    )
}

/// Most recent rounds first, numbered so the oldest round is #1.
#[must_use]
pub fn format_history(state: &GameState, limit: usize, currency: &str) -> Vec<String> {
    let total = state.transactions.len();
    state
        .transactions
        .iter()
        .enumerate()
        .take(limit)
        .map(|(index, tx)| format_history_entry(tx, total - index, currency))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::ledger::{RoundRequest, apply_transaction},
        errors::Result,
        test_utils::{fresh_game, played_game, players_with_balances},
    };

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(4.5, "€"), "€4.50");
        assert_eq!(format_amount(10.0 / 3.0, "$"), "$3.33");
    }

    #[test]
    fn test_format_balance_signs() {
        assert_eq!(format_balance(4.5, "€"), "+€4.50");
        assert_eq!(format_balance(-3.0, "€"), "-€3.00");
        assert_eq!(format_balance(0.0, "€"), "+€0.00");
        assert_eq!(format_balance(-0.001, "€"), "+€0.00");
    }

    #[test]
    fn test_player_name_falls_back_to_unknown() {
        let players = players_with_balances(&[0.0, 0.0]);
        assert_eq!(player_name(&players, "2"), "Player 2");
        assert_eq!(player_name(&players, "42"), UNKNOWN_PLAYER);
    }

    #[test]
    fn test_format_settlement_all_settled() {
        let state = fresh_game();
        assert_eq!(
            format_settlement(&state.players, "€"),
            "All settled up! No one owes anyone money right now."
        );
    }

    #[test]
    fn test_format_settlement_lists_debts() -> Result<()> {
        let state = apply_transaction(&fresh_game(), &RoundRequest::new(["1", "2"], 4.5))?;
        assert_eq!(
            format_settlement(&state.players, "€"),
            "Player 3 owes Player 1 €4.50\nPlayer 4 owes Player 2 €4.50"
        );
        Ok(())
    }

    #[test]
    fn test_format_settlement_shows_sub_cent_debts() -> Result<()> {
        let state = apply_transaction(&fresh_game(), &RoundRequest::new(["1", "2", "3"], 0.01))?;
        assert_eq!(
            format_settlement(&state.players, "€"),
            "Player 4 owes Player 1 less than €0.01\n\
             Player 4 owes Player 2 less than €0.01\n\
             Player 4 owes Player 3 less than €0.01"
        );
        Ok(())
    }

    #[test]
    fn test_format_players() -> Result<()> {
        let state = apply_transaction(&fresh_game(), &RoundRequest::new(["1"], 3.0))?;
        assert_eq!(
            format_players(&state, "€"),
            "Player 1: +€9.00\nPlayer 2: -€3.00\nPlayer 3: -€3.00\nPlayer 4: -€3.00"
        );
        Ok(())
    }

    #[test]
    fn test_format_history_numbers_from_oldest() -> Result<()> {
        let state = played_game()?;
        let lines = format_history(&state, 10, "€");

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Round #2 | €2.00 per payer, €6.00 each"));
        assert!(lines[0].ends_with("Player 3 <- Player 1, Player 2, Player 4"));
        assert!(lines[1].starts_with("Round #1 | €4.50 per payer, €4.50 each"));

        let limited = format_history(&state, 1, "€");
        assert_eq!(limited.len(), 1);
        assert!(limited[0].starts_with("Round #2"));
        Ok(())
    }
}
