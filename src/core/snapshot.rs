//! Snapshot persistence - saving and restoring the whole game as one JSON value.
//!
//! The core never touches storage directly. Callers hand a [`SnapshotStore`] to the session,
//! which writes after every successful mutation. Storage failures are logged and dropped:
//! a broken disk must never undo a round that was already applied in memory, and an
//! unreadable snapshot simply means a fresh game.

use crate::{
    core::game::{GameState, Player},
    entities::{SystemState, system_state},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use std::{
    future::Future,
    sync::{Mutex, PoisonError},
};
use tracing::{debug, error, info, instrument, warn};

/// Key the snapshot is stored under unless configured otherwise.
pub const DEFAULT_SNAPSHOT_KEY: &str = "coinStackGame";

/// Save port for the serialized game.
pub trait SnapshotStore: Send + Sync {
    /// Returns the stored snapshot, or `None` if nothing was saved yet.
    fn load(&self) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Replaces the stored snapshot.
    fn save(&self, snapshot: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Stores the snapshot as a row of the `system_state` table.
#[derive(Clone, Debug)]
pub struct DatabaseSnapshotStore {
    db: DatabaseConnection,
    key: String,
}

impl DatabaseSnapshotStore {
    /// Creates a store writing under `key`.
    #[must_use]
    pub fn new(db: DatabaseConnection, key: impl Into<String>) -> Self {
        Self {
            db,
            key: key.into(),
        }
    }

    /// The key this store reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl SnapshotStore for DatabaseSnapshotStore {
    async fn load(&self) -> Result<Option<String>> {
        let row = SystemState::find()
            .filter(system_state::Column::Key.eq(self.key.as_str()))
            .one(&self.db)
            .await?;

        Ok(row.map(|r| r.value))
    }

    async fn save(&self, snapshot: &str) -> Result<()> {
        let now = Utc::now().naive_utc();

        let existing = SystemState::find()
            .filter(system_state::Column::Key.eq(self.key.as_str()))
            .one(&self.db)
            .await?;

        if let Some(row) = existing {
            let mut active_model: system_state::ActiveModel = row.into();
            active_model.value = Set(snapshot.to_string());
            active_model.updated_at = Set(now);
            active_model.update(&self.db).await?;
        } else {
            let new_row = system_state::ActiveModel {
                key: Set(self.key.clone()),
                value: Set(snapshot.to_string()),
                updated_at: Set(now),
                ..Default::default()
            };
            new_row.insert(&self.db).await?;
        }

        Ok(())
    }
}

/// Keeps the snapshot in memory. Useful for tests and for embedding without a database.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    value: Mutex<Option<String>>,
}

impl MemorySnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `snapshot`.
    #[must_use]
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(snapshot.into())),
        }
    }

    /// Current stored value.
    #[must_use]
    pub fn snapshot(&self) -> Option<String> {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.snapshot())
    }

    async fn save(&self, snapshot: &str) -> Result<()> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.to_string());
        Ok(())
    }
}

/// Serializes the game to JSON.
pub fn encode(state: &GameState) -> Result<String> {
    serde_json::to_string(state).map_err(Into::into)
}

/// Parses a JSON snapshot and repairs what older snapshots may get wrong.
///
/// Rounds recorded in the fixed-per-receiver shape get their payer amounts derived, and a
/// round counter below 1 is raised to 1.
pub fn decode(raw: &str) -> Result<GameState> {
    let mut state: GameState = serde_json::from_str(raw)?;

    for tx in &mut state.transactions {
        if tx.is_legacy_shape() {
            warn!("Normalizing legacy round {} to per-payer amounts", tx.id);
            tx.normalize_legacy_shape();
        }
    }
    state.current_round = state.current_round.max(1);

    Ok(state)
}

/// Restores the saved game, falling back to a fresh game for `roster` on any failure.
#[instrument(skip_all)]
pub async fn load_game<S: SnapshotStore>(store: &S, roster: &[Player]) -> GameState {
    match store.load().await {
        Ok(Some(raw)) => match decode(&raw) {
            Ok(state) => {
                info!(
                    "Restored saved game at round {} with {} recorded rounds",
                    state.current_round,
                    state.transactions.len()
                );
                state
            }
            Err(e) => {
                error!("Failed to parse saved game, starting fresh: {}", e);
                GameState::initial(roster)
            }
        },
        Ok(None) => {
            info!("No saved game found, starting fresh");
            GameState::initial(roster)
        }
        Err(e) => {
            error!("Failed to load saved game, starting fresh: {}", e);
            GameState::initial(roster)
        }
    }
}

/// Writes the game to the store. Returns whether the write succeeded; failures are logged.
#[instrument(skip_all, fields(round = state.current_round))]
pub async fn save_game<S: SnapshotStore>(store: &S, state: &GameState) -> bool {
    let snapshot = match encode(state) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to serialize game: {}", e);
            return false;
        }
    };

    match store.save(&snapshot).await {
        Ok(()) => {
            debug!("Saved game snapshot ({} bytes)", snapshot.len());
            true
        }
        Err(e) => {
            error!("Failed to save game: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        core::{
            game::default_roster,
            ledger::{RoundRequest, apply_transaction},
        },
        test_utils::{fresh_game, played_game, setup_test_db},
    };
    use sea_orm::EntityTrait;

    /// Snapshot as written by the browser version of the game, fixed-per-receiver shape.
    const LEGACY_SNAPSHOT: &str = r#"{
        "players": [
            {"id": "1", "name": "Anna", "balance": 6},
            {"id": "2", "name": "Ben", "balance": -2},
            {"id": "3", "name": "Cleo", "balance": -2},
            {"id": "4", "name": "Dan", "balance": -2}
        ],
        "transactions": [
            {
                "id": "1717245296123",
                "timestamp": "2024-06-01T12:34:56.123Z",
                "receivers": [{"id": "1", "name": "Anna", "balance": 0}],
                "payers": [
                    {"id": "2", "name": "Ben", "balance": 0},
                    {"id": "3", "name": "Cleo", "balance": 0},
                    {"id": "4", "name": "Dan", "balance": 0}
                ],
                "amountPerReceiver": 6
            }
        ],
        "currentRound": 2
    }"#;

    #[test]
    fn test_encode_decode_preserves_state() -> Result<()> {
        let state = played_game()?;
        let decoded = decode(&encode(&state)?)?;
        assert_eq!(decoded, state);
        Ok(())
    }

    #[test]
    fn test_decode_legacy_snapshot() -> Result<()> {
        let state = decode(LEGACY_SNAPSHOT)?;

        assert_eq!(state.current_round, 2);
        assert_eq!(state.players[0].name, "Anna");
        assert_eq!(state.players[0].balance, 6.0);

        let tx = state.last_transaction().unwrap();
        assert_eq!(tx.timestamp.timestamp_millis(), 1_717_245_296_123);
        assert_eq!(tx.total_paid, 6.0);
        assert_eq!(tx.amount_per_payer, 2.0);
        assert_eq!(tx.delta_for("2"), -2.0);
        Ok(())
    }

    #[test]
    fn test_decode_clamps_round_counter() -> Result<()> {
        let mut state = fresh_game();
        state.current_round = 0;
        let decoded = decode(&encode(&state)?)?;
        assert_eq!(decoded.current_round, 1);
        Ok(())
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("{ not json").is_err());
        assert!(decode(r#"{"players": 3}"#).is_err());
    }

    #[tokio::test]
    async fn test_load_game_without_snapshot_starts_fresh() {
        let store = MemorySnapshotStore::new();
        let state = load_game(&store, &default_roster()).await;
        assert_eq!(state, fresh_game());
    }

    #[tokio::test]
    async fn test_load_game_with_corrupt_snapshot_starts_fresh() {
        let store = MemorySnapshotStore::with_snapshot("definitely not a game");
        let state = load_game(&store, &default_roster()).await;
        assert_eq!(state, fresh_game());
    }

    #[tokio::test]
    async fn test_save_then_load_memory_store() -> Result<()> {
        let store = MemorySnapshotStore::new();
        let state = apply_transaction(&fresh_game(), &RoundRequest::new(["2"], 1.5))?;

        assert!(save_game(&store, &state).await);
        assert!(store.snapshot().is_some());
        assert_eq!(load_game(&store, &default_roster()).await, state);
        Ok(())
    }

    #[tokio::test]
    async fn test_database_store_roundtrip_and_overwrite() -> Result<()> {
        let db = setup_test_db().await?;
        let store = DatabaseSnapshotStore::new(db.clone(), DEFAULT_SNAPSHOT_KEY);

        assert_eq!(store.load().await?, None);

        let first = played_game()?;
        assert!(save_game(&store, &first).await);
        assert_eq!(load_game(&store, &default_roster()).await, first);

        // A second save updates the same row rather than adding another.
        let second = fresh_game();
        assert!(save_game(&store, &second).await);
        assert_eq!(load_game(&store, &default_roster()).await, second);
        assert_eq!(SystemState::find().all(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_database_store_keys_are_independent() -> Result<()> {
        let db = setup_test_db().await?;
        let table_one = DatabaseSnapshotStore::new(db.clone(), "table-one");
        let table_two = DatabaseSnapshotStore::new(db, "table-two");

        table_one.save("{}").await?;
        assert_eq!(table_one.key(), "table-one");
        assert_eq!(table_one.load().await?, Some("{}".to_string()));
        assert_eq!(table_two.load().await?, None);
        Ok(())
    }
}
