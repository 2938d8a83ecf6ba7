use reqwest::blocking;
use url::Url;

use super::{
    config::{Config, MESSAGE_ID_HEADER},
    error, ApiKey, Client, Error, HttpClientBuilder,
};
use crate::sendgrid::{Mail, Response, StatusCode};

/// Blocking client for the SendGrid v3 `mail/send` endpoint
///
/// ```rust,no_run
/// use sendgrid_transport::{
///     sendgrid::client::HttpClient, Message, SendGridTransport, Transport,
/// };
///
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let client = HttpClient::builder("SG.xxxxx").build()?;
/// let transport = SendGridTransport::new(client);
///
/// let message = Message::builder()
///     .from("john@doe.com")
///     .to("jane@doe.com")
///     .subject("The Message")
///     .body("Something really important");
///
/// let delivery = transport.send(&message)?;
/// assert_eq!(delivery.accepted(), 1);
/// # Ok(())
/// # }
/// ```
#[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: blocking::Client,
    endpoint: Url,
    api_key: ApiKey,
}

impl HttpClient {
    /// Creates a client for the public endpoint with default settings
    pub fn new<K: Into<ApiKey>>(api_key: K) -> Result<HttpClient, Error> {
        Self::builder(api_key).build()
    }

    /// Creates a client configured from `SENDGRID_API_KEY` and `SENDGRID_ENDPOINT`
    pub fn from_env() -> Result<HttpClient, Error> {
        HttpClientBuilder::from_env()?.build()
    }

    /// Creates a builder to configure the client
    pub fn builder<K: Into<ApiKey>>(api_key: K) -> HttpClientBuilder {
        HttpClientBuilder::new(api_key)
    }

    pub(super) fn from_config(config: Config) -> Result<HttpClient, Error> {
        let mut builder = blocking::Client::builder().user_agent(config.user_agent);
        builder = builder.timeout(config.timeout);

        Ok(HttpClient {
            inner: builder.build().map_err(error::config)?,
            endpoint: config.endpoint,
            api_key: config.api_key,
        })
    }

    /// Where requests are posted
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl HttpClientBuilder {
    /// Creates the blocking client
    #[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
    pub fn build(self) -> Result<HttpClient, Error> {
        HttpClient::from_config(self.into_config()?)
    }
}

impl Client for HttpClient {
    type Error = Error;

    fn send(&self, mail: &Mail) -> Result<Response, Self::Error> {
        #[cfg(feature = "tracing")]
        tracing::debug!(endpoint = %self.endpoint, "posting mail");

        let response = self
            .inner
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.secret())
            .json(mail)
            .send()
            .map_err(error::http)?;

        let status = StatusCode::new(response.status().as_u16());
        let message_id = response
            .headers()
            .get(MESSAGE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.text().map_err(error::http)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(%status, ?message_id, "provider answered");

        Ok(Response::new(status, body).with_message_id(message_id))
    }
}
