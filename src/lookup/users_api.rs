use super::{ApiClient, Error, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ResolveResponse {
    data: Vec<ResolvedUser>,
}

#[derive(Debug, Deserialize)]
struct ResolvedUser {
    id: u64,
}

/// Looks up the numeric id behind a username.
///
/// The endpoint answers with a match list; an empty list means no such
/// account, which is the one condition reported as `NotFound`.
pub async fn resolve_id(api: &ApiClient, username: &str) -> Result<u64> {
    let mut url = api.users_url("v1/usernames/users");
    url.query_pairs_mut().append_pair("username", username);

    let response: ResolveResponse = api.get_json(url).await?;
    match response.data.first() {
        Some(user) => Ok(user.id),
        None => Err(Error::NotFound(username.to_string())),
    }
}

/// Profile fields we care about; anything the API omits stays `None`.
#[derive(Debug, Deserialize)]
pub struct Profile {
    pub created: Option<String>,
    #[serde(rename = "lastOnline")]
    pub last_online: Option<String>,
}

impl Profile {
    pub async fn get(api: &ApiClient, user_id: u64) -> Result<Self> {
        api.get_json(api.users_url(&format!("v1/users/{}", user_id))).await
    }
}
