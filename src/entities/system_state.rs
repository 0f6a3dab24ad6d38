//! System state entity - key-value rows for persisted application state.
//! The saved game lives here as a single JSON snapshot under its configured key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// System state database model - stores key-value pairs
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "system_state")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Lookup key (e.g., `"coinStackGame"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Stored value, the serialized game snapshot
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this row was last written
    pub updated_at: DateTime,
}

/// `SystemState` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
