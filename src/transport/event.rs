//! Notifications fired around each send
//!
//! A transport configured with an [`EventDispatcher`] asks it for a [`SendEvent`] before
//! submitting a message, and dispatches it twice:
//!
//! * [`Phase::BeforeSendPerformed`], where a listener may call
//!   [`SendEvent::cancel_bubble`] to abort the send
//! * [`Phase::SendPerformed`], once the outcome is known
//!
//! ```rust
//! use sendgrid_transport::{
//!     sendgrid::client::StubClient,
//!     transport::event::{EventListener, SendEvent, SimpleEventDispatcher},
//!     Message, SendGridTransport, Transport,
//! };
//!
//! struct Blocklist;
//!
//! impl EventListener for Blocklist {
//!     fn before_send_performed(&self, event: &mut SendEvent<'_>) {
//!         if event.message().to().contains("spam@doe.com") {
//!             event.cancel_bubble();
//!         }
//!     }
//! }
//!
//! let mut transport = SendGridTransport::new(StubClient::new_positive())
//!     .with_dispatcher(Box::new(SimpleEventDispatcher::new()));
//! transport.register_plugin(Box::new(Blocklist));
//!
//! let message = Message::builder()
//!     .from("john@doe.com")
//!     .to("spam@doe.com")
//!     .body("Buy now");
//!
//! let delivery = transport.send(&message).unwrap();
//! assert!(delivery.is_cancelled());
//! ```

use std::{
    fmt::{self, Debug, Display, Formatter},
    sync::Arc,
};

use crate::{message::Recipients, Message};

/// Where a send stands, as recorded on its event
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SendResult {
    /// The send has not been attempted yet
    #[default]
    Pending,
    /// The provider accepted the message
    Success,
    /// The message could not be delivered
    Failed,
}

/// The two moments an event is dispatched at
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Before the message is submitted, listeners may cancel the send
    BeforeSendPerformed,
    /// After the provider answered, or the submission failed
    SendPerformed,
}

impl Phase {
    /// Conventional name of the phase
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::BeforeSendPerformed => "beforeSendPerformed",
            Phase::SendPerformed => "sendPerformed",
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The event of a single send
#[derive(Debug, Clone)]
pub struct SendEvent<'a> {
    message: &'a Message,
    source: &'static str,
    result: SendResult,
    failed_recipients: Recipients,
    bubble_cancelled: bool,
}

impl<'a> SendEvent<'a> {
    /// Creates a pending event for `message`, sent by the transport named `source`
    pub fn new(source: &'static str, message: &'a Message) -> Self {
        SendEvent {
            message,
            source,
            result: SendResult::Pending,
            failed_recipients: Recipients::new(),
            bubble_cancelled: false,
        }
    }

    /// Message being sent
    pub fn message(&self) -> &'a Message {
        self.message
    }

    /// Name of the transport performing the send
    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Current result of the send
    pub fn result(&self) -> SendResult {
        self.result
    }

    /// Records the result of the send
    pub fn set_result(&mut self, result: SendResult) {
        self.result = result;
    }

    /// Recipients the message could not be delivered to
    pub fn failed_recipients(&self) -> &Recipients {
        &self.failed_recipients
    }

    /// Records the recipients the message could not be delivered to
    pub fn set_failed_recipients(&mut self, failed_recipients: Recipients) {
        self.failed_recipients = failed_recipients;
    }

    /// Stops the dispatch. Before the send, it also aborts the send.
    pub fn cancel_bubble(&mut self) {
        self.bubble_cancelled = true;
    }

    /// Returns `true` if a listener cancelled the bubble
    pub fn bubble_cancelled(&self) -> bool {
        self.bubble_cancelled
    }
}

/// Reacts to send events
///
/// Both methods do nothing by default.
pub trait EventListener: Send + Sync {
    /// Called before the message is submitted
    fn before_send_performed(&self, _event: &mut SendEvent<'_>) {}

    /// Called once the outcome of the send is known
    fn send_performed(&self, _event: &SendEvent<'_>) {}
}

impl<L: EventListener + ?Sized> EventListener for Arc<L> {
    fn before_send_performed(&self, event: &mut SendEvent<'_>) {
        (**self).before_send_performed(event);
    }

    fn send_performed(&self, event: &SendEvent<'_>) {
        (**self).send_performed(event);
    }
}

/// Creates send events and hands them to listeners
pub trait EventDispatcher: Send + Sync {
    /// Creates the event of a send, `None` disables notifications for it
    fn create_send_event<'a>(
        &self,
        source: &'static str,
        message: &'a Message,
    ) -> Option<SendEvent<'a>>;

    /// Hands `event` to the bound listeners for `phase`
    fn dispatch_event(&self, event: &mut SendEvent<'_>, phase: Phase);

    /// Adds a listener
    fn bind_event_listener(&mut self, listener: Box<dyn EventListener>);
}

/// Calls listeners in the order they were bound, until one of them cancels the bubble
#[derive(Default)]
pub struct SimpleEventDispatcher {
    listeners: Vec<Box<dyn EventListener>>,
}

impl SimpleEventDispatcher {
    /// Creates a dispatcher without listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bound listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` when no listener is bound
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl Debug for SimpleEventDispatcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleEventDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventDispatcher for SimpleEventDispatcher {
    fn create_send_event<'a>(
        &self,
        source: &'static str,
        message: &'a Message,
    ) -> Option<SendEvent<'a>> {
        Some(SendEvent::new(source, message))
    }

    fn dispatch_event(&self, event: &mut SendEvent<'_>, phase: Phase) {
        #[cfg(feature = "tracing")]
        tracing::trace!(%phase, listeners = self.listeners.len(), "dispatching send event");

        for listener in &self.listeners {
            if event.bubble_cancelled() {
                break;
            }
            match phase {
                Phase::BeforeSendPerformed => listener.before_send_performed(event),
                Phase::SendPerformed => listener.send_performed(event),
            }
        }
    }

    fn bind_event_listener(&mut self, listener: Box<dyn EventListener>) {
        self.listeners.push(listener);
    }
}
