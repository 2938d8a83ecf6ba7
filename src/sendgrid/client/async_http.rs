use async_trait::async_trait;
use url::Url;

use super::{
    config::{Config, MESSAGE_ID_HEADER},
    error, ApiKey, AsyncClient, Error, HttpClientBuilder,
};
use crate::sendgrid::{Mail, Response, StatusCode};

/// Asynchronous client for the SendGrid v3 `mail/send` endpoint
///
/// ```rust,no_run
/// # #[cfg(feature = "tokio1")]
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use sendgrid_transport::{
///     sendgrid::client::AsyncHttpClient, AsyncTransport, Message, SendGridTransport,
/// };
///
/// let transport = SendGridTransport::new(AsyncHttpClient::from_env()?);
///
/// let message = Message::builder()
///     .from("john@doe.com")
///     .to("jane@doe.com")
///     .subject("The Message")
///     .body("Something really important");
///
/// transport.send(&message).await?;
/// # Ok(())
/// # }
/// ```
#[cfg_attr(docsrs, doc(cfg(feature = "tokio1")))]
#[derive(Debug, Clone)]
pub struct AsyncHttpClient {
    inner: reqwest::Client,
    endpoint: Url,
    api_key: ApiKey,
}

impl AsyncHttpClient {
    /// Creates a client for the public endpoint with default settings
    pub fn new<K: Into<ApiKey>>(api_key: K) -> Result<AsyncHttpClient, Error> {
        Self::builder(api_key).build_async()
    }

    /// Creates a client configured from `SENDGRID_API_KEY` and `SENDGRID_ENDPOINT`
    pub fn from_env() -> Result<AsyncHttpClient, Error> {
        HttpClientBuilder::from_env()?.build_async()
    }

    /// Creates a builder to configure the client
    pub fn builder<K: Into<ApiKey>>(api_key: K) -> HttpClientBuilder {
        HttpClientBuilder::new(api_key)
    }

    fn from_config(config: Config) -> Result<AsyncHttpClient, Error> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(AsyncHttpClient {
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
    /// Creates the asynchronous client
    #[cfg_attr(docsrs, doc(cfg(feature = "tokio1")))]
    pub fn build_async(self) -> Result<AsyncHttpClient, Error> {
        AsyncHttpClient::from_config(self.into_config()?)
    }
}

#[async_trait]
impl AsyncClient for AsyncHttpClient {
    type Error = Error;

    async fn send(&self, mail: &Mail) -> Result<Response, Self::Error> {
        #[cfg(feature = "tracing")]
        tracing::debug!(endpoint = %self.endpoint, "posting mail");

        let response = self
            .inner
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.secret())
            .json(mail)
            .send()
            .await
            .map_err(error::http)?;

        let status = StatusCode::new(response.status().as_u16());
        let message_id = response
            .headers()
            .get(MESSAGE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await.map_err(error::http)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(%status, ?message_id, "provider answered");

        Ok(Response::new(status, body).with_message_id(message_id))
    }
}
