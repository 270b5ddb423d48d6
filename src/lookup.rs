use super::client::ApiClient;
use super::{Error, Result};
use futures::try_join;
use serde::Serialize;
use tracing::debug;

mod games_api;
mod users_api;

const UNAVAILABLE: &str = "Unavailable";
const DELIMITER: &str = "========================================";

/// Everything we show for one account, fully resolved.
///
/// Every field holds either real data or [`UNAVAILABLE`] by the time the
/// record exists, so rendering and persistence never see a half-built one.
#[derive(Debug, Serialize)]
pub struct AccountReport {
    #[serde(skip)]
    username: String,
    pub user_id: u64,
    pub created: String,
    pub last_online: String,
    pub last_game: String,
}

impl AccountReport {
    pub async fn get(api: &ApiClient, username: &str) -> Result<Self> {
        let user_id = users_api::resolve_id(api, username).await?;
        debug!(user_id, "resolved username");

        // Independent reads keyed by the same id.
        let (profile, last_game) = try_join!(
            users_api::Profile::get(api, user_id),
            games_api::last_played(api, user_id),
        )?;

        Ok(Self::new(username, user_id, profile, last_game))
    }

    fn new(username: &str, user_id: u64, profile: users_api::Profile, last_game: Option<String>) -> Self {
        Self {
            username: username.to_string(),
            user_id,
            created: or_unavailable(format_timestamp(profile.created.as_deref())),
            last_online: or_unavailable(format_timestamp(profile.last_online.as_deref())),
            last_game: or_unavailable(last_game),
        }
    }

    /// Compact single-line rendering for scripting, field order fixed.
    pub fn machine_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
impl AccountReport {
    pub(crate) fn stub(user_id: u64, created: &str, last_online: &str, last_game: &str) -> Self {
        Self {
            username: "builderman".to_string(),
            user_id,
            created: created.to_string(),
            last_online: last_online.to_string(),
            last_game: last_game.to_string(),
        }
    }
}

impl std::fmt::Display for AccountReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", DELIMITER)?;
        writeln!(f, "rbxwho results for '{}'", self.username)?;
        writeln!(f, "{}", DELIMITER)?;
        writeln!(f, "{:<15}: {}", "User Id", self.user_id)?;
        writeln!(f, "{:<15}: {}", "Created", self.created)?;
        writeln!(f, "{:<15}: {}", "Last Online", self.last_online)?;
        writeln!(f, "{:<15}: {}", "Last Game", self.last_game)?;
        writeln!(f, "{}", DELIMITER)
    }
}

fn or_unavailable(value: Option<String>) -> String {
    value.unwrap_or_else(|| UNAVAILABLE.to_string())
}

/// `"2021-05-03T12:00:00.123Z"` becomes `"2021-05-03 12:00:00"`.
///
/// Input that doesn't look like an ISO-8601 timestamp passes through with
/// whatever matched transformed; nothing here panics.
fn format_timestamp(timestamp: Option<&str>) -> Option<String> {
    let timestamp = timestamp?;
    if timestamp.is_empty() {
        return None;
    }
    let spaced = timestamp.replace('T', " ");
    Some(match spaced.split_once('.') {
        Some((prefix, _)) => prefix.to_string(),
        None => spaced,
    })
}
