use super::{ApiClient, Result};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct GamesResponse {
    data: Vec<GameEntry>,
}

#[derive(Debug, Deserialize)]
struct GameEntry {
    name: Option<String>,
}

/// Name of the most recently played game, if the account has any.
///
/// The list comes back sorted newest-first and capped at one entry, so the
/// head is the answer; an empty list is a normal outcome, not an error.
pub async fn last_played(api: &ApiClient, user_id: u64) -> Result<Option<String>> {
    let mut url = api.games_url(&format!("v1/users/{}/games", user_id));
    url.query_pairs_mut().append_pair("sortOrder", "Desc").append_pair("limit", "1");

    let response: GamesResponse = api.get_json(url).await?;
    let name = response.data.into_iter().next().and_then(|game| game.name);
    debug!(?name, "fetched last played game");
    Ok(name)
}
