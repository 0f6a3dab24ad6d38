//! Game session - holds the live game and persists it after every change.
//!
//! The session is the only owner of the current [`GameState`]. Each method runs one pure
//! ledger operation, swaps the result in, then saves a snapshot. A failed save is logged by
//! [`snapshot::save_game`] and the in-memory state is kept.

use crate::{
    core::{
        game::{GameState, Player, Transaction},
        ledger::{self, RoundRequest, UndoOutcome},
        settlement::{PlayerDebt, compute_settlement},
        snapshot::{self, SnapshotStore},
    },
    errors::{Error, Result},
};
use tracing::{info, instrument, warn};

/// A running game bound to a snapshot store.
#[derive(Debug)]
pub struct GameSession<S> {
    state: GameState,
    roster: Vec<Player>,
    store: S,
}

impl<S: SnapshotStore> GameSession<S> {
    /// Opens the saved game from `store`, or starts a fresh one for `roster`.
    pub async fn open(store: S, roster: Vec<Player>) -> Self {
        let state = snapshot::load_game(&store, &roster).await;
        Self {
            state,
            roster,
            store,
        }
    }

    /// Current game state.
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Roster a reset returns to.
    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    /// Underlying snapshot store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Applies a round. On validation failure nothing changes and nothing is saved.
    #[instrument(skip(self), fields(round = self.state.current_round))]
    pub async fn apply_transaction(&mut self, request: &RoundRequest) -> Result<&GameState> {
        let next = match ledger::apply_transaction(&self.state, request) {
            Ok(next) => next,
            Err(Error::Validation { messages }) => {
                warn!("Rejected round: {}", messages.join("; "));
                return Err(Error::Validation { messages });
            }
            Err(e) => return Err(e),
        };

        self.state = next;
        if let Some(tx) = self.state.last_transaction() {
            info!(
                "Applied round {}: {} receivers, {} payers, {:.2} per payer",
                tx.id,
                tx.receivers.len(),
                tx.payers.len(),
                tx.amount_per_payer
            );
        }
        self.persist().await;
        Ok(&self.state)
    }

    /// Reverses the most recent round and returns it, or `None` if there was nothing to undo.
    #[instrument(skip(self))]
    pub async fn undo_last(&mut self) -> Option<Transaction> {
        match ledger::undo_last(&self.state) {
            UndoOutcome::Undone { state, transaction } => {
                self.state = state;
                info!("Undid round {}", transaction.id);
                self.persist().await;
                Some(transaction)
            }
            UndoOutcome::NothingToUndo => {
                info!("Nothing to undo");
                None
            }
        }
    }

    /// Clears all balances and history. Irreversible.
    #[instrument(skip(self))]
    pub async fn reset(&mut self) -> &GameState {
        self.state = ledger::reset(&self.roster);
        info!("Game reset to {} players", self.state.players.len());
        self.persist().await;
        &self.state
    }

    /// Renames a player; balances and history are unaffected.
    #[instrument(skip(self))]
    pub async fn rename_player(&mut self, player_id: &str, new_name: &str) -> Result<&GameState> {
        self.state = ledger::rename_player(&self.state, player_id, new_name)?;
        info!("Renamed player {}", player_id);
        self.persist().await;
        Ok(&self.state)
    }

    /// Suggested payments for the current balances.
    pub fn settlement(&self) -> Vec<PlayerDebt> {
        compute_settlement(&self.state.players)
    }

    async fn persist(&self) {
        snapshot::save_game(&self.store, &self.state).await;
    }
}
