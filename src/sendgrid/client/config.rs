use std::{
    env,
    fmt::{self, Debug, Formatter},
    time::Duration,
};

use url::Url;

use super::{error, Error, DEFAULT_ENDPOINT};

/// Environment variable holding the API key
pub(super) const API_KEY_VAR: &str = "SENDGRID_API_KEY";
/// Environment variable overriding the endpoint
pub(super) const ENDPOINT_VAR: &str = "SENDGRID_ENDPOINT";

/// Response header carrying the id assigned to the mail
pub(super) const MESSAGE_ID_HEADER: &str = "x-message-id";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_USER_AGENT: &str = concat!("sendgrid-transport/", env!("CARGO_PKG_VERSION"));

/// A SendGrid API key, sent as a bearer token
///
/// Its `Debug` output never shows the key.
#[derive(PartialEq, Eq, Clone, Hash)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps an API key
    pub fn new(key: String) -> ApiKey {
        ApiKey(key)
    }

    pub(super) fn secret(&self) -> &str {
        &self.0
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        ApiKey(key)
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        ApiKey(key.to_owned())
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"*redacted*").finish()
    }
}

/// Settings shared by the HTTP clients
#[derive(Debug, Clone)]
pub(super) struct Config {
    pub(super) api_key: ApiKey,
    pub(super) endpoint: Url,
    pub(super) timeout: Option<Duration>,
    pub(super) user_agent: String,
}

/// Contains client configuration.
/// Instances of this struct can be created using functions of [`HttpClient`](super::HttpClient)
/// or [`AsyncHttpClient`](super::AsyncHttpClient).
#[derive(Debug, Clone)]
pub struct HttpClientBuilder {
    api_key: ApiKey,
    endpoint: Option<String>,
    timeout: Option<Duration>,
    user_agent: String,
}

impl HttpClientBuilder {
    /// Creates a new builder with the default settings
    ///
    /// Defaults are:
    ///
    /// * The public SendGrid v3 endpoint
    /// * A 60-seconds timeout for the whole request
    /// * A `sendgrid-transport/<version>` user agent
    pub fn new<K: Into<ApiKey>>(api_key: K) -> Self {
        HttpClientBuilder {
            api_key: api_key.into(),
            endpoint: None,
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Reads the API key from `SENDGRID_API_KEY` and, when set, the endpoint from
    /// `SENDGRID_ENDPOINT`
    pub fn from_env() -> Result<Self, Error> {
        let api_key =
            env::var(API_KEY_VAR).map_err(|_| error::config(format!("{API_KEY_VAR} is not set")))?;

        let mut builder = Self::new(api_key);
        if let Ok(endpoint) = env::var(ENDPOINT_VAR) {
            builder = builder.endpoint(endpoint);
        }
        Ok(builder)
    }

    /// Overrides the endpoint, e.g. to target a mock server
    pub fn endpoint<U: Into<String>>(mut self, endpoint: U) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the request timeout, `None` waits forever
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header
    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub(super) fn into_config(self) -> Result<Config, Error> {
        if self.api_key.secret().trim().is_empty() {
            return Err(error::config("empty API key"));
        }

        let endpoint = Url::parse(self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT))
            .map_err(error::config)?;

        Ok(Config {
            api_key: self.api_key,
            endpoint,
            timeout: self.timeout,
            user_agent: self.user_agent,
        })
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::{ApiKey, HttpClientBuilder};

    #[test]
    fn api_key_is_redacted() {
        let key = ApiKey::from("SG.very-secret");
        assert_eq!(format!("{key:?}"), r#"ApiKey("*redacted*")"#);
    }

    #[test]
    fn defaults() {
        let config = HttpClientBuilder::new("SG.key").into_config().unwrap();

        assert_eq!(
            config.endpoint.as_str(),
            "https://api.sendgrid.com/v3/mail/send"
        );
        assert_eq!(config.timeout, Some(Duration::from_secs(60)));
        assert!(config.user_agent.starts_with("sendgrid-transport/"));
    }

    #[test]
    fn overrides() {
        let config = HttpClientBuilder::new("SG.key")
            .endpoint("http://127.0.0.1:3000/v3/mail/send")
            .timeout(None)
            .user_agent("tests")
            .into_config()
            .unwrap();

        assert_eq!(config.endpoint.port(), Some(3000));
        assert_eq!(config.timeout, None);
        assert_eq!(config.user_agent, "tests");
    }

    #[test]
    fn invalid_settings() {
        let empty = HttpClientBuilder::new(" ").into_config().unwrap_err();
        assert!(empty.is_config());

        let bad_url = HttpClientBuilder::new("SG.key")
            .endpoint("not a url")
            .into_config()
            .unwrap_err();
        assert!(bad_url.is_config());
    }
}
