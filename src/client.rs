use super::{Error, Result};
use once_cell::sync::Lazy;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

static USERS_BASE: Lazy<Url> = Lazy::new(|| Url::parse("https://users.roblox.com/").unwrap());
static GAMES_BASE: Lazy<Url> = Lazy::new(|| Url::parse("https://games.roblox.com/").unwrap());

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how the upstream APIs are reached.
///
/// Defaults to the public Roblox hosts; tests point the bases at a local server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub users_base: Url,
    pub games_base: Url,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            users_base: USERS_BASE.clone(),
            games_base: GAMES_BASE.clone(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("rbxwho/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Network)?;
        Ok(Self { http, config })
    }

    pub fn users_url(&self, path: &str) -> Url {
        self.config.users_base.join(path).unwrap()
    }

    pub fn games_url(&self, path: &str) -> Url {
        self.config.games_base.join(path).unwrap()
    }

    /// Single GET returning the decoded JSON body.
    ///
    /// Transport failures map to `Network`, non-2xx statuses to `Http`, and
    /// bodies that are not valid JSON to `Decode`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let response = self.http.get(url).send().await.map_err(Error::Network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http(status.as_u16()));
        }
        let body = response.text().await.map_err(Error::Network)?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer) -> ApiConfig {
        let base = Url::parse(&server.uri()).unwrap();
        ApiConfig {
            users_base: base.clone(),
            games_base: base,
            timeout: Duration::from_millis(250),
        }
    }

    #[tokio::test]
    async fn decodes_successful_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("user-agent", concat!("rbxwho/", env!("CARGO_PKG_VERSION"))))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
            .mount(&server)
            .await;

        let api = ApiClient::new(test_config(&server)).unwrap();
        let value: serde_json::Value = api.get_json(api.users_url("ping")).await.unwrap();
        assert_eq!(value["ok"], serde_json::Value::Bool(true));
    }

    #[tokio::test]
    async fn non_success_status_is_an_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let api = ApiClient::new(test_config(&server)).unwrap();
        let err = api.get_json::<serde_json::Value>(api.users_url("ping")).await.unwrap_err();
        match err {
            Error::Http(status) => assert_eq!(status, 503),
            e => panic!("expected Http error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn invalid_json_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let api = ApiClient::new(test_config(&server)).unwrap();
        let err = api.get_json::<serde_json::Value>(api.users_url("ping")).await.unwrap_err();
        match err {
            Error::Decode(_) => {}
            e => panic!("expected Decode error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let base = Url::parse("http://127.0.0.1:1/").unwrap();
        let config = ApiConfig {
            users_base: base.clone(),
            games_base: base,
            timeout: Duration::from_millis(250),
        };

        let api = ApiClient::new(config).unwrap();
        let err = api.get_json::<serde_json::Value>(api.users_url("ping")).await.unwrap_err();
        match err {
            Error::Network(_) => {}
            e => panic!("expected Network error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn slow_response_times_out_as_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let api = ApiClient::new(test_config(&server)).unwrap();
        let err = api.get_json::<serde_json::Value>(api.users_url("ping")).await.unwrap_err();
        assert!(err.to_string().starts_with("network error"), "got: {}", err);
    }
}
