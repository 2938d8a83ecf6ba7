//! sendgrid-transport delivers generic email messages through the SendGrid v3 API.
//!
//! A caller builds a [`Message`] once and hands it to a [`Transport`]. The
//! [`SendGridTransport`] translates it into a `POST /v3/mail/send` request, submits it through
//! a [`Client`](sendgrid::Client) and classifies the answer: any `2xx` status counts as an
//! acceptance of every recipient, anything else fails every recipient.
//!
//! ## Features
//!
//! ### Clients
//!
//! * **blocking** 📫: Blocking HTTP client, [`HttpClient`](sendgrid::client::HttpClient)
//! * **tokio1**: Async HTTP client and [`AsyncTransport`] implementation
//! * **native-tls** 📫: TLS through the system library
//! * **rustls-tls**: TLS through `rustls`
//!
//! ### Misc features
//!
//! * **tracing**: Logging using the `tracing` crate
//!
//! _📫 Enabled by default_
//!
//! ## Example
//!
//! ```rust,no_run
//! use sendgrid_transport::{
//!     sendgrid::client::HttpClient, Message, SendGridTransport, Transport,
//! };
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let message = Message::builder()
//!     .from_named("john@doe.com", "John Doe")
//!     .to("jane@doe.com")
//!     .subject("The Message")
//!     .body("Something really important");
//!
//! // Reads the API key from SENDGRID_API_KEY
//! let transport = SendGridTransport::new(HttpClient::from_env()?);
//!
//! match transport.send(&message) {
//!     Ok(delivery) => println!("Accepted for {} recipients", delivery.accepted()),
//!     Err(e) => eprintln!("Could not send email: {e} ({} failed)", e.failed_recipients().len()),
//! }
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/crate/sendgrid-transport/0.3.0")]
#![forbid(unsafe_code)]
#![deny(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces,
    rust_2018_idioms
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod address;
pub mod error;
pub mod mailer;
pub mod message;
pub mod sendgrid;
pub mod transport;

use std::error::Error as StdError;

pub use crate::address::Address;
pub use crate::error::Error;
pub use crate::mailer::Mailer;
pub use crate::message::Message;
#[cfg(feature = "tokio1")]
pub use crate::transport::AsyncTransport;
pub use crate::transport::{sendgrid::SendGridTransport, Transport};

pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;
