//! Entity module - SeaORM entity definitions for the database.
//! The game is stored as a snapshot, so a single key-value table is all we need.

pub mod system_state;

pub use system_state::{
    Column as SystemStateColumn, Entity as SystemState, Model as SystemStateModel,
};
