//! What the provider answered to a `mail/send` request

use std::fmt::{self, Display, Formatter};

/// HTTP status code of a provider response
///
/// The provider answers `202 Accepted` when it queued the mail. Any `2xx` counts as an
/// acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusCode(u16);

impl StatusCode {
    /// `202 Accepted`
    pub const ACCEPTED: StatusCode = StatusCode(202);

    /// Wraps a raw HTTP status
    pub const fn new(code: u16) -> Self {
        StatusCode(code)
    }

    /// Raw HTTP status
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Status in `200..=299`
    pub const fn is_success(self) -> bool {
        200 <= self.0 && self.0 <= 299
    }

    /// Status in `400..=499`
    pub const fn is_client_error(self) -> bool {
        400 <= self.0 && self.0 <= 499
    }

    /// Status in `500..=599`
    pub const fn is_server_error(self) -> bool {
        500 <= self.0 && self.0 <= 599
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code)
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Answer of the provider, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    body: String,
    message_id: Option<String>,
}

impl Response {
    /// Creates a response without a message id
    pub fn new<B: Into<String>>(status: StatusCode, body: B) -> Self {
        Response {
            status,
            body: body.into(),
            message_id: None,
        }
    }

    /// Sets the identifier the provider assigned to the mail
    pub fn with_message_id(mut self, message_id: Option<String>) -> Self {
        self.message_id = message_id;
        self
    }

    /// Status of the answer
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Raw response body. Empty on acceptance, a JSON list of errors otherwise.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Value of the `X-Message-Id` response header
    pub fn message_id(&self) -> Option<&str> {
        self.message_id.as_deref()
    }

    /// Tells if the mail was accepted
    pub fn is_positive(&self) -> bool {
        self.status.is_success()
    }
}
