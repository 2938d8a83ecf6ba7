//! Error type of the HTTP clients

use std::{error::Error as StdError, fmt};

use crate::BoxError;

/// The errors that may occur before the provider answered
pub struct Error {
    inner: Box<Inner>,
}

struct Inner {
    kind: Kind,
    source: Option<BoxError>,
}

impl Error {
    pub(crate) fn new<E>(kind: Kind, source: Option<E>) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            inner: Box::new(Inner {
                kind,
                source: source.map(Into::into),
            }),
        }
    }

    /// Returns true if the client was misconfigured
    pub fn is_config(&self) -> bool {
        matches!(self.inner.kind, Kind::Config)
    }

    /// Returns true if the request failed at the HTTP level
    pub fn is_http(&self) -> bool {
        matches!(self.inner.kind, Kind::Http)
    }

    /// Returns true if the error is caused by a timeout
    pub fn is_timeout(&self) -> bool {
        let mut source = self.source();

        while let Some(err) = source {
            if let Some(http_err) = err.downcast_ref::<reqwest::Error>() {
                return http_err.is_timeout();
            }
            if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
                return io_err.kind() == std::io::ErrorKind::TimedOut;
            }

            source = err.source();
        }

        false
    }
}

#[derive(Debug)]
pub(crate) enum Kind {
    /// Missing API key or unusable endpoint
    Config,
    /// Connection, TLS or body transfer failure
    Http,
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("sendgrid_transport::sendgrid::client::Error");

        builder.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            builder.field("source", source);
        }

        builder.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.kind {
            Kind::Config => f.write_str("client configuration error")?,
            Kind::Http => f.write_str("http error")?,
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

pub(crate) fn config<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Config, Some(e))
}

pub(crate) fn http<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Http, Some(e))
}
