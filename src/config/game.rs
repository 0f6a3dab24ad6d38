//! Game configuration loading from config.toml
//!
//! The roster a reset returns to, the currency symbol used in replies and the key the
//! snapshot is stored under all come from here. Every field has a default, and a missing
//! file means the built-in four-player table.

use crate::{
    core::{
        game::{Player, default_roster},
        snapshot::DEFAULT_SNAPSHOT_KEY,
    },
    errors::{Error, Result},
};
use serde::Deserialize;
use std::{collections::HashSet, path::Path};
use tracing::{debug, info};

/// Path used when `COIN_STACK_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// General game settings
    #[serde(default)]
    pub game: GameSettings,
    /// Fixed roster, in seating order
    #[serde(default = "default_players")]
    pub players: Vec<PlayerConfig>,
}

/// `[game]` table
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GameSettings {
    /// Symbol prefixed to every amount
    pub currency_symbol: String,
    /// Key of the snapshot row in the database
    pub snapshot_key: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            currency_symbol: "€".to_string(),
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
        }
    }
}

/// One `[[players]]` entry
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Stable identifier
    pub id: String,
    /// Initial display name
    pub name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameSettings::default(),
            players: default_players(),
        }
    }
}

fn default_players() -> Vec<PlayerConfig> {
    default_roster()
        .into_iter()
        .map(|p| PlayerConfig {
            id: p.id,
            name: p.name,
        })
        .collect()
}

impl Config {
    /// Roster as zero-balance players.
    #[must_use]
    pub fn roster(&self) -> Vec<Player> {
        self.players
            .iter()
            .map(|p| Player::new(p.id.clone(), p.name.clone()))
            .collect()
    }

    /// Checks that the roster can actually play: at least two players, ids unique and
    /// non-empty, names non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.players.len() < 2 {
            return Err(Error::Config {
                message: "At least 2 players are required".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for player in &self.players {
            if player.id.trim().is_empty() {
                return Err(Error::Config {
                    message: "Player id cannot be empty".to_string(),
                });
            }
            if player.name.trim().is_empty() {
                return Err(Error::Config {
                    message: format!("Player '{}' has an empty name", player.id),
                });
            }
            if !seen.insert(player.id.as_str()) {
                return Err(Error::Config {
                    message: format!("Duplicate player id '{}'", player.id),
                });
            }
        }

        Ok(())
    }
}

/// Parses and validates configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - The roster is unusable
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Loads configuration from `path`, or the defaults if the file does not exist.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    if path_ref.exists() {
        load_config(path_ref)
    } else {
        info!(
            "No config file at {}, using the default roster",
            path_ref.display()
        );
        Ok(Config::default())
    }
}

/// Config path from `COIN_STACK_CONFIG`, or [`DEFAULT_CONFIG_PATH`].
#[must_use]
pub fn get_config_path() -> String {
    std::env::var("COIN_STACK_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}
