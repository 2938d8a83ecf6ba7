//! Translation errors

use std::{
    error::Error as StdError,
    fmt::{self, Display, Formatter},
};

use crate::address::AddressError;

/// Error raised while turning a [`Message`](crate::Message) into a provider request
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The message has no `From` address
    MissingFrom,
    /// The message has more than one `From` address
    TooManyFrom,
    /// An address of the message was rejected
    InvalidAddress {
        /// The offending address, as found in the message
        address: String,
        /// Why it was rejected
        source: AddressError,
    },
}

impl Display for Error {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Error::MissingFrom => fmt.write_str("missing source address"),
            Error::TooManyFrom => fmt.write_str("there can only be one source address"),
            Error::InvalidAddress { address, source } => {
                write!(fmt, "invalid address {address:?}: {source}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::InvalidAddress { source, .. } => Some(source),
            _ => None,
        }
    }
}
