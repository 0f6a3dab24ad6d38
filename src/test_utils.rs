//! Shared test utilities for Coin Stack.
//!
//! This module provides common helper functions for setting up test databases
//! and building games with sensible defaults.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::{
    core::{
        game::{GameState, Player, Transaction, default_roster},
        ledger::{RoundRequest, apply_transaction},
    },
    errors::Result,
};
use chrono::{TimeZone, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = crate::config::database::create_connection("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Four players "Player 1".."Player 4", all at zero, round 1.
pub fn fresh_game() -> GameState {
    GameState::initial(&default_roster())
}

/// A game with two rounds played:
/// 1. Players 1 and 2 receive, 4.50 per payer
/// 2. Player 3 receives, 2.00 per payer
///
/// Balances afterwards: `+2.5, +2.5, +1.5, -6.5`.
pub fn played_game() -> Result<GameState> {
    let state = apply_transaction(&fresh_game(), &RoundRequest::new(["1", "2"], 4.5))?;
    apply_transaction(&state, &RoundRequest::new(["3"], 2.0))
}

/// Balance of the player with `id`.
///
/// # Panics
/// If the player is not in the game.
pub fn balance_of(state: &GameState, id: &str) -> f64 {
    state.player(id).expect("player should exist").balance
}

/// Players "1".."n" named "Player i" holding the given balances.
pub fn players_with_balances(balances: &[f64]) -> Vec<Player> {
    balances
        .iter()
        .enumerate()
        .map(|(i, balance)| Player {
            balance: *balance,
            ..Player::new((i + 1).to_string(), format!("Player {}", i + 1))
        })
        .collect()
}

/// A recorded round with fixed timestamp and zero-balance snapshots.
pub fn sample_transaction(receivers: &[&str], payers: &[&str], amount_per_payer: f64) -> Transaction {
    let to_players = |ids: &[&str]| -> Vec<Player> {
        ids.iter()
            .map(|id| Player::new(*id, format!("Player {id}")))
            .collect()
    };

    #[allow(clippy::cast_precision_loss)]
    let total_paid = amount_per_payer * payers.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let amount_per_receiver = total_paid / receivers.len() as f64;

    Transaction {
        id: "sample".to_string(),
        timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap(),
        receivers: to_players(receivers),
        payers: to_players(payers),
        amount_per_payer,
        amount_per_receiver,
        total_paid,
    }
}
