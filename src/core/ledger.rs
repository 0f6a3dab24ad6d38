//! Ledger business logic - applying, undoing and resetting rounds.
//!
//! Every function here is pure: it reads the current [`GameState`] and returns a new one,
//! leaving persistence to the caller. A round uses the fixed-amount-per-payer shape: each
//! payer contributes `amount`, and the pot is split evenly among the receivers. Balances have
//! no floor or ceiling since they track net debt, not a wallet.

use crate::{
    core::game::{GameState, Player, Transaction},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Longest accepted player name, in characters.
pub const MAX_NAME_LENGTH: usize = 20;

/// A caller's description of one round.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundRequest {
    /// Ids of the players who receive money this round
    pub receivers: Vec<String>,
    /// Fixed amount each remaining player pays
    pub amount_per_payer: f64,
}

impl RoundRequest {
    /// Builds a request from receiver ids and the per-payer amount.
    #[must_use]
    pub fn new<I, S>(receivers: I, amount_per_payer: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            receivers: receivers.into_iter().map(Into::into).collect(),
            amount_per_payer,
        }
    }
}

/// Result of an undo request.
#[derive(Clone, Debug, PartialEq)]
pub enum UndoOutcome {
    /// The most recent round was reversed
    Undone {
        /// State with the round reversed and removed from history
        state: GameState,
        /// The round that was reversed
        transaction: Transaction,
    },
    /// History was empty; the state is unchanged
    NothingToUndo,
}

/// Checks a round request against the roster and returns every violation found.
///
/// An empty vector means the request is valid. Checks never stop at the first failure so
/// the caller can present all problems together.
#[must_use]
pub fn validate_request(players: &[Player], request: &RoundRequest) -> Vec<String> {
    let mut errors = Vec::new();
    let amount = request.amount_per_payer;

    if !amount.is_finite() {
        errors.push("Amount must be a valid number".to_string());
    } else if amount <= 0.0 {
        errors.push("Amount must be greater than 0".to_string());
    }

    let mut seen = HashSet::new();
    for id in &request.receivers {
        if !players.iter().any(|p| &p.id == id) {
            errors.push(format!("Unknown player: {id}"));
        } else if !seen.insert(id.as_str()) {
            errors.push(format!("Player {id} was selected more than once"));
        }
    }

    let receiver_count = seen.len();
    let max_receivers = players.len().saturating_sub(1);

    if receiver_count == 0 {
        errors.push("Select at least 1 person to receive money".to_string());
    }
    if receiver_count > max_receivers {
        errors.push(format!("At most {max_receivers} people can receive money"));
    }
    if !players.is_empty() && receiver_count >= players.len() {
        errors.push("At least 1 person must pay (not everyone can receive)".to_string());
    }

    errors
}

/// Applies a round using the current time as its timestamp.
///
/// See [`apply_transaction_at`].
pub fn apply_transaction(state: &GameState, request: &RoundRequest) -> Result<GameState> {
    apply_transaction_at(state, request, Utc::now())
}

/// Validates and applies a round, returning the new state.
///
/// Receivers each gain `total_paid / receivers`, payers each lose `amount_per_payer`, the
/// round is prepended to the history and the round counter advances. On validation failure
/// the input state is untouched and [`Error::Validation`] lists every problem.
pub fn apply_transaction_at(
    state: &GameState,
    request: &RoundRequest,
    timestamp: DateTime<Utc>,
) -> Result<GameState> {
    let messages = validate_request(&state.players, request);
    if !messages.is_empty() {
        return Err(Error::Validation { messages });
    }

    let (receivers, payers): (Vec<Player>, Vec<Player>) = state
        .players
        .iter()
        .cloned()
        .partition(|p| request.receivers.contains(&p.id));

    // Roster sizes are tiny, the casts are exact.
    #[allow(clippy::cast_precision_loss)]
    let (receiver_count, payer_count) = (receivers.len() as f64, payers.len() as f64);

    let amount_per_payer = request.amount_per_payer;
    let total_paid = amount_per_payer * payer_count;
    let amount_per_receiver = total_paid / receiver_count;

    let transaction = Transaction {
        id: format!("{}-{}", timestamp.timestamp_millis(), state.current_round),
        timestamp,
        receivers,
        payers,
        amount_per_payer,
        amount_per_receiver,
        total_paid,
    };

    let players = state
        .players
        .iter()
        .map(|p| Player {
            balance: p.balance + transaction.delta_for(&p.id),
            ..p.clone()
        })
        .collect();

    let mut transactions = Vec::with_capacity(state.transactions.len() + 1);
    transactions.push(transaction);
    transactions.extend(state.transactions.iter().cloned());

    Ok(GameState {
        players,
        transactions,
        current_round: state.current_round.saturating_add(1),
    })
}

/// Reverses the most recent round.
///
/// Every player the round touched gets back the balance recorded in the round's snapshot,
/// so the result is bit-for-bit the state before the round. Names are kept as they are now.
/// The round is dropped from history and the counter moves back, never below 1. Only the
/// latest round can be undone.
#[must_use]
pub fn undo_last(state: &GameState) -> UndoOutcome {
    let Some((transaction, rest)) = state.transactions.split_first() else {
        return UndoOutcome::NothingToUndo;
    };

    let players = state
        .players
        .iter()
        .map(|p| {
            let recorded = transaction
                .receivers
                .iter()
                .chain(&transaction.payers)
                .find(|snapshot| snapshot.id == p.id);

            Player {
                balance: recorded.map_or(p.balance, |snapshot| snapshot.balance),
                ..p.clone()
            }
        })
        .collect();

    UndoOutcome::Undone {
        state: GameState {
            players,
            transactions: rest.to_vec(),
            current_round: state.current_round.saturating_sub(1).max(1),
        },
        transaction: transaction.clone(),
    }
}

/// Starts over with the given roster at zero balances, no history and round 1.
#[must_use]
pub fn reset(roster: &[Player]) -> GameState {
    GameState::initial(roster)
}

/// Renames a player. Balances and history are not touched.
///
/// The name is trimmed first; empty or overlong names are rejected.
pub fn rename_player(state: &GameState, player_id: &str, new_name: &str) -> Result<GameState> {
    let name = new_name.trim();

    if name.is_empty() {
        return Err(Error::InvalidPlayerName {
            reason: "name cannot be empty".to_string(),
        });
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(Error::InvalidPlayerName {
            reason: format!("name cannot be longer than {MAX_NAME_LENGTH} characters"),
        });
    }
    if state.player(player_id).is_none() {
        return Err(Error::PlayerNotFound {
            id: player_id.to_string(),
        });
    }

    let players = state
        .players
        .iter()
        .map(|p| {
            if p.id == player_id {
                Player {
                    name: name.to_string(),
                    ..p.clone()
                }
            } else {
                p.clone()
            }
        })
        .collect();

    Ok(GameState {
        players,
        ..state.clone()
    })
}
