//! Error and result type for the SendGrid transport

use std::{error::Error as StdError, fmt};

use crate::{
    message::Recipients,
    sendgrid::{Response, StatusCode},
    BoxError,
};

/// The Errors that may occur when sending an email through SendGrid
///
/// Whatever went wrong, none of the recipients got the message: every error carries the
/// union of `To`, `Cc` and `Bcc` as [`failed_recipients`](Error::failed_recipients).
pub struct Error {
    inner: Box<Inner>,
}

struct Inner {
    kind: Kind,
    source: Option<BoxError>,
    failed_recipients: Recipients,
}

impl Error {
    pub(crate) fn new<E>(kind: Kind, source: Option<E>, failed_recipients: Recipients) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            inner: Box::new(Inner {
                kind,
                source: source.map(Into::into),
                failed_recipients,
            }),
        }
    }

    /// Returns true if the message could not be turned into a request
    pub fn is_translation(&self) -> bool {
        matches!(self.inner.kind, Kind::Translation)
    }

    /// Returns true if the request never got an answer
    pub fn is_client(&self) -> bool {
        matches!(self.inner.kind, Kind::Client)
    }

    /// Returns true if the provider answered with a non-2xx status
    pub fn is_rejected(&self) -> bool {
        matches!(self.inner.kind, Kind::Rejected { .. })
    }

    /// Returns the status code, if the error was generated from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self.inner.kind {
            Kind::Rejected { status, .. } => Some(status),
            _ => None,
        }
    }

    /// Returns the response body, if the error was generated from a response.
    pub fn body(&self) -> Option<&str> {
        match &self.inner.kind {
            Kind::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Recipients the message was not delivered to
    pub fn failed_recipients(&self) -> &Recipients {
        &self.inner.failed_recipients
    }
}

#[derive(Debug)]
pub(crate) enum Kind {
    /// The message could not be turned into a request
    Translation,
    /// No answer from the provider
    Client,
    /// Non-2xx answer from the provider
    Rejected { status: StatusCode, body: String },
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("sendgrid_transport::transport::sendgrid::Error");

        builder.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            builder.field("source", source);
        }

        builder.field("failed_recipients", &self.inner.failed_recipients.len());
        builder.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.kind {
            Kind::Translation => f.write_str("translation error")?,
            Kind::Client => f.write_str("client error")?,
            Kind::Rejected { status, ref body } => {
                write!(f, "rejected with status {status}")?;
                if !body.is_empty() {
                    write!(f, " ({body})")?;
                }
            }
        };

        if let Some(ref e) = self.inner.source {
            write!(f, ": {e}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| {
            let r: &(dyn std::error::Error + 'static) = &**e;
            r
        })
    }
}

pub(crate) fn translation(e: crate::Error, failed_recipients: Recipients) -> Error {
    Error::new(Kind::Translation, Some(e), failed_recipients)
}

pub(crate) fn client<E: Into<BoxError>>(e: E, failed_recipients: Recipients) -> Error {
    Error::new(Kind::Client, Some(e), failed_recipients)
}

pub(crate) fn rejected(response: Response, failed_recipients: Recipients) -> Error {
    let status = response.status();
    let kind = Kind::Rejected {
        status,
        body: response.body().to_owned(),
    };
    Error::new::<BoxError>(kind, None, failed_recipients)
}
