//! Core business logic - framework-agnostic ledger, settlement and persistence.
//!
//! [`ledger`] and [`settlement`] are pure functions over [`game::GameState`]. The
//! [`session`] module ties them to a [`snapshot::SnapshotStore`].

/// Players, rounds and the aggregate game state
pub mod game;
/// Applying, undoing and resetting rounds
pub mod ledger;
/// Display formatting for balances, debts and history
pub mod report;
/// Live game bound to a snapshot store
pub mod session;
/// Suggested payments that zero every balance
pub mod settlement;
/// JSON snapshot encoding and the save port
pub mod snapshot;
