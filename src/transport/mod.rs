//! ### Sending Messages
//!
//! This section explains how to hand messages to a delivery mechanism.
//!
//! Every delivery mechanism is exposed as a [`Transport`]: a small lifecycle
//! (`start`/`stop`/`ping`) around `send`, plus plugins notified of every send. The lifecycle is
//! advisory: a transport that is not started starts itself on the first send.
//!
//! The following transports are available:
//!
//! * The [`SendGridTransport`](sendgrid::SendGridTransport) submits messages to the SendGrid v3
//!   API through a [`Client`](crate::sendgrid::Client).

#[cfg(feature = "tokio1")]
use async_trait::async_trait;

use self::event::EventListener;
use crate::Message;

pub mod event;
pub mod sendgrid;

/// Blocking Transport method for emails
pub trait Transport {
    /// Response produced by the Transport
    type Ok;
    /// Error produced by the Transport
    type Error;

    /// Tells if the transport was started
    fn is_started(&self) -> bool;

    /// Starts the transport
    fn start(&self);

    /// Stops the transport
    fn stop(&self);

    /// Tells if the transport is still usable
    fn ping(&self) -> bool;

    /// Sends the email
    fn send(&self, message: &Message) -> Result<Self::Ok, Self::Error>;

    /// Registers a listener notified around each send
    fn register_plugin(&mut self, plugin: Box<dyn EventListener>);
}

/// tokio 1.x based Transport method for emails
///
/// The lifecycle methods are not async, they are shared with [`Transport`] implementors
/// as inherent methods.
#[cfg(feature = "tokio1")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio1")))]
#[async_trait]
pub trait AsyncTransport {
    /// Response produced by the Transport
    type Ok;
    /// Error produced by the Transport
    type Error;

    /// Sends the email
    async fn send(&self, message: &Message) -> Result<Self::Ok, Self::Error>;
}
