//! The SendGrid v3 side of the crate
//!
//! * [`Mail`] is the JSON body of a `POST /v3/mail/send` request
//! * [`MessageTranslator`] builds it from a generic [`Message`](crate::Message)
//! * [`client`] submits it and returns the provider's [`Response`]

pub mod client;
pub mod mail;
mod response;
mod translate;

pub use self::{
    client::Client,
    mail::Mail,
    response::{Response, StatusCode},
    translate::MessageTranslator,
};
#[cfg(feature = "tokio1")]
pub use self::client::AsyncClient;
