//! Clients submitting [`Mail`] requests to the provider
//!
//! The transport never builds its client: one is constructed up front and handed to
//! [`SendGridTransport::new`](crate::SendGridTransport::new).
//!
//! * [`HttpClient`] talks to the SendGrid v3 API with blocking `reqwest`
//! * [`AsyncHttpClient`] does the same with async `reqwest`
//! * [`StubClient`] answers with a canned status and keeps every request, for tests

#[cfg(feature = "tokio1")]
use async_trait::async_trait;

#[cfg(any(feature = "blocking", feature = "tokio1"))]
pub use self::{
    config::{ApiKey, HttpClientBuilder},
    error::Error,
};
#[cfg(feature = "tokio1")]
pub use self::async_http::AsyncHttpClient;
#[cfg(feature = "blocking")]
pub use self::http::HttpClient;
pub use self::stub::StubClient;
use super::{Mail, Response};

#[cfg(feature = "tokio1")]
mod async_http;
#[cfg(any(feature = "blocking", feature = "tokio1"))]
mod config;
#[cfg(any(feature = "blocking", feature = "tokio1"))]
mod error;
#[cfg(feature = "blocking")]
mod http;
pub mod stub;

/// Default SendGrid v3 endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";

/// Submits a request and returns the provider's answer
///
/// A non-`2xx` answer is still an `Ok`: classifying it is up to the transport. `Err` is reserved
/// for requests that never got an answer.
pub trait Client {
    /// Error produced when no answer could be obtained
    type Error;

    /// Submits `mail`
    fn send(&self, mail: &Mail) -> Result<Response, Self::Error>;
}

/// Async version of [`Client`]
#[cfg(feature = "tokio1")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio1")))]
#[async_trait]
pub trait AsyncClient {
    /// Error produced when no answer could be obtained
    type Error;

    /// Submits `mail`
    async fn send(&self, mail: &Mail) -> Result<Response, Self::Error>;
}
