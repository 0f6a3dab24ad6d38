//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests player names as the user types, including inside a comma-separated
//! receiver list.

use crate::{bot::BotData, core::game::Player, errors::Error};

/// Discord shows at most this many suggestions.
const MAX_SUGGESTIONS: usize = 25;

/// Names of players whose name contains `partial`, case-insensitively.
#[must_use]
pub fn matching_names(players: &[Player], partial: &str) -> Vec<String> {
    let partial_lower = partial.trim().to_lowercase();
    players
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&partial_lower))
        .map(|p| p.name.clone())
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Completes the last entry of a comma-separated list, keeping the entries before it and
/// skipping players already listed.
#[must_use]
pub fn complete_receiver_list(players: &[Player], partial: &str) -> Vec<String> {
    let (chosen, current) = partial.rsplit_once(',').unwrap_or(("", partial));

    let already: Vec<String> = chosen
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let prefix = if chosen.trim().is_empty() {
        String::new()
    } else {
        format!("{}, ", chosen.trim_end())
    };

    let remaining: Vec<Player> = players
        .iter()
        .filter(|p| !already.contains(&p.name.to_lowercase()) && !already.contains(&p.id))
        .cloned()
        .collect();

    matching_names(&remaining, current)
        .into_iter()
        .map(|name| format!("{prefix}{name}"))
        .collect()
}

/// Provides autocomplete suggestions for a single player name.
pub async fn autocomplete_player_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let session = ctx.data().session.lock().await;
    matching_names(&session.state().players, partial)
}

/// Provides autocomplete suggestions for a comma-separated list of receivers.
pub async fn autocomplete_receivers(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let session = ctx.data().session.lock().await;
    complete_receiver_list(&session.state().players, partial)
}
