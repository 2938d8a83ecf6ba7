//! The stub client answers every request with a canned response and keeps a copy of the
//! request. It can be useful for testing purposes.
//!
//! ```rust
//! use sendgrid_transport::{
//!     sendgrid::{client::StubClient, StatusCode},
//!     Message, SendGridTransport, Transport,
//! };
//!
//! let client = StubClient::new(StatusCode::new(400));
//! let transport = SendGridTransport::new(client.clone());
//!
//! let message = Message::builder()
//!     .from("john@doe.com")
//!     .to("jane@doe.com")
//!     .body("Something really important");
//!
//! let error = transport.send(&message).unwrap_err();
//! assert!(error.is_rejected());
//! assert_eq!(client.requests().len(), 1);
//! ```

use std::{
    error::Error as StdError,
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

#[cfg(feature = "tokio1")]
use async_trait::async_trait;

#[cfg(feature = "tokio1")]
use super::AsyncClient;
use super::Client;
use crate::sendgrid::{Mail, Response, StatusCode};

/// The error the stub returns when configured to fail
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Error;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("stub error")
    }
}

impl StdError for Error {}

/// This client records requests and returns the given answer
///
/// Clones share the recorded requests.
#[derive(Debug, Clone)]
pub struct StubClient {
    answer: Result<StatusCode, Error>,
    body: String,
    requests: Arc<Mutex<Vec<Mail>>>,
}

impl StubClient {
    /// Creates a new client that always answers with the given status
    pub fn new(status: StatusCode) -> StubClient {
        StubClient {
            answer: Ok(status),
            body: String::new(),
            requests: Arc::default(),
        }
    }

    /// Creates a new client that always answers `202 Accepted`
    pub fn new_positive() -> StubClient {
        StubClient::new(StatusCode::ACCEPTED)
    }

    /// Creates a new client that never gets an answer
    pub fn new_error() -> StubClient {
        StubClient {
            answer: Err(Error),
            body: String::new(),
            requests: Arc::default(),
        }
    }

    /// Sets the body of every answer
    pub fn with_body<B: Into<String>>(mut self, body: B) -> StubClient {
        self.body = body.into();
        self
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<Mail> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn answer(&self, mail: &Mail) -> Result<Response, Error> {
        let mut requests = self.requests.lock().unwrap_or_else(PoisonError::into_inner);
        requests.push(mail.clone());

        #[cfg(feature = "tracing")]
        tracing::debug!(subject = mail.subject(), answer = ?self.answer, "stub request");

        let status = self.answer?;
        let message_id = status
            .is_success()
            .then(|| format!("stub-{}", requests.len()));
        Ok(Response::new(status, self.body.clone()).with_message_id(message_id))
    }
}

impl Client for StubClient {
    type Error = Error;

    fn send(&self, mail: &Mail) -> Result<Response, Self::Error> {
        self.answer(mail)
    }
}

#[cfg(feature = "tokio1")]
#[async_trait]
impl AsyncClient for StubClient {
    type Error = Error;

    async fn send(&self, mail: &Mail) -> Result<Response, Self::Error> {
        self.answer(mail)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{Error, StubClient};
    use crate::sendgrid::{client::Client, mail::EmailAddress, Mail, StatusCode};

    fn mail(subject: &str) -> Mail {
        Mail::new(EmailAddress::new("john@doe.com", None).unwrap(), subject)
    }

    #[test]
    fn positive_answers_accepted() {
        let client = StubClient::new_positive();
        let response = client.send(&mail("one")).unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(response.message_id(), Some("stub-1"));
    }

    #[test]
    fn clones_share_requests() {
        let client = StubClient::new(StatusCode::new(400)).with_body("bad request");
        let observer = client.clone();

        let response = client.send(&mail("one")).unwrap();
        assert_eq!(response.body(), "bad request");
        assert_eq!(response.message_id(), None);
        client.send(&mail("two")).unwrap();

        let subjects: Vec<_> = observer
            .requests()
            .iter()
            .map(|m| m.subject().to_owned())
            .collect();
        assert_eq!(subjects, ["one", "two"]);
    }

    #[test]
    fn error_still_records() {
        let client = StubClient::new_error();
        assert_eq!(client.send(&mail("one")), Err(Error));
        assert_eq!(client.requests().len(), 1);
    }
}
