//! Game data model - players, recorded rounds and the aggregate game state.
//!
//! These types are plain values. Every ledger operation takes a `GameState` by reference and
//! returns a fresh one, so a caller always holds a complete, consistent snapshot. Field names
//! serialize in camelCase to match the persisted snapshot format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A participant in the game and their running net balance.
///
/// A positive balance means the player is owed money; a negative balance means they owe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Stable identifier, unique within the roster
    pub id: String,
    /// Display name, editable at any time
    pub name: String,
    /// Net amount owed to (positive) or by (negative) this player
    pub balance: f64,
}

impl Player {
    /// Creates a player with a zero balance.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance: 0.0,
        }
    }
}

/// One settled round. Immutable once recorded; undo applies inverse deltas instead of
/// editing the record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier of the round
    pub id: String,
    /// When the round was recorded
    pub timestamp: DateTime<Utc>,
    /// Players credited in this round, as they were before it was applied
    pub receivers: Vec<Player>,
    /// Players debited in this round, as they were before it was applied
    pub payers: Vec<Player>,
    /// Fixed amount each payer contributes
    #[serde(default)]
    pub amount_per_payer: f64,
    /// Share of the pot each receiver gets
    pub amount_per_receiver: f64,
    /// Sum of all payer contributions
    #[serde(default)]
    pub total_paid: f64,
}

impl Transaction {
    /// Balance change this round causes for the given player.
    ///
    /// Receivers gain `amount_per_receiver`, payers lose `amount_per_payer`, anyone else is
    /// unaffected. Applying adds this delta and undoing subtracts it.
    #[must_use]
    pub fn delta_for(&self, player_id: &str) -> f64 {
        if self.receivers.iter().any(|r| r.id == player_id) {
            self.amount_per_receiver
        } else if self.payers.iter().any(|p| p.id == player_id) {
            -self.amount_per_payer
        } else {
            0.0
        }
    }

    /// Whether the record predates the fixed-per-payer shape and still lacks payer amounts.
    #[must_use]
    pub fn is_legacy_shape(&self) -> bool {
        self.total_paid == 0.0 && self.amount_per_payer == 0.0 && self.amount_per_receiver != 0.0
    }

    /// Fills in `total_paid` and `amount_per_payer` for records written by the older
    /// fixed-per-receiver revision, where the pot was split evenly across payers.
    pub(crate) fn normalize_legacy_shape(&mut self) {
        if !self.is_legacy_shape() {
            return;
        }

        // Roster sizes are tiny, the casts are exact.
        #[allow(clippy::cast_precision_loss)]
        let (receiver_count, payer_count) = (self.receivers.len() as f64, self.payers.len() as f64);

        let total = self.amount_per_receiver * receiver_count;
        self.total_paid = total;
        if payer_count > 0.0 {
            self.amount_per_payer = total / payer_count;
        }
    }
}

/// Aggregate root: the roster, the round history (newest first) and the round counter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Players in roster order
    pub players: Vec<Player>,
    /// Applied rounds, most recent first
    pub transactions: Vec<Transaction>,
    /// Number of the round about to be played; `1 + transactions.len()`
    pub current_round: u32,
}

impl GameState {
    /// Fresh game for the given roster: every balance zero, no history, round 1.
    #[must_use]
    pub fn initial(roster: &[Player]) -> Self {
        Self {
            players: roster
                .iter()
                .map(|p| Player::new(p.id.clone(), p.name.clone()))
                .collect(),
            transactions: Vec::new(),
            current_round: 1,
        }
    }

    /// Looks up a player by id.
    #[must_use]
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Resolves user input to a player id, matching the id exactly or the name
    /// case-insensitively.
    #[must_use]
    pub fn resolve_player(&self, input: &str) -> Option<&Player> {
        let needle = input.trim();
        self.player(needle).or_else(|| {
            self.players
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(needle))
        })
    }

    /// Most recent transaction, if any.
    #[must_use]
    pub fn last_transaction(&self) -> Option<&Transaction> {
        self.transactions.first()
    }

    /// Whether there is something to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.transactions.is_empty()
    }
}

/// The built-in roster used when no configuration overrides it.
#[must_use]
pub fn default_roster() -> Vec<Player> {
    (1..=4)
        .map(|i| Player::new(i.to_string(), format!("Player {i}")))
        .collect()
}
