//! Coin Stack - balance tracking for a small card-game table
//!
//! This crate keeps a running ledger of who owes whom across rounds of a game: each round
//! some players receive money and the rest pay a fixed amount. It supports undoing the
//! latest round, resetting the table, renaming players and suggesting the payments that
//! settle every balance. The game is persisted as a single snapshot and driven from Discord.

#![deny(
    unsafe_code,
    unsafe_op_in_unsafe_fn,
    unreachable_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// `missing_docs` stays a warning: poise's command macro emits undocumented items, which
// the command modules wrap in an `allow`.
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,

    // Money is `f64`; exact comparisons belong in tests only
    clippy::float_cmp,

    // Errors are propagated, never unwrapped outside tests
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::exit,

    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::inefficient_to_string,
    clippy::large_types_passed_by_value,
    clippy::needless_pass_by_value,
    clippy::unnecessary_wraps,
    clippy::cognitive_complexity,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::too_many_lines,
    clippy::enum_glob_use,
    clippy::inconsistent_struct_constructor,
    clippy::must_use_candidate,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,
    future_incompatible,
    rust_2018_idioms,
)]
// Every fallible function returns the crate `Error`; per-function `# Errors` sections add
// nothing.
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
)]

/// Discord bot interface - commands, handlers, and bot context
pub mod bot;
/// Configuration management for database and game settings
pub mod config;
/// Core business logic - framework-agnostic ledger, settlement, and snapshot operations
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;

#[cfg(test)]
pub mod test_utils;
