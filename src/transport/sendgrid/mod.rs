//! The SendGrid transport translates each message into a v3 `mail/send` request and submits
//! it through a [`Client`].
//!
//! #### Outcome
//!
//! The provider accepted the message iff it answered with a status in `200..=299`. The
//! [`Delivery`] then counts every `To`, `Cc` and `Bcc` entry as accepted. Anything else is an
//! [`Error`], telling whether the message could not be translated, the provider could not be
//! reached, or the provider rejected the request.
//!
//! ```rust
//! use sendgrid_transport::{
//!     sendgrid::client::StubClient, Message, SendGridTransport, Transport,
//! };
//!
//! let transport = SendGridTransport::new(StubClient::new_positive());
//! assert!(!transport.is_started());
//!
//! let message = Message::builder()
//!     .from("john@doe.com")
//!     .to("jane@doe.com")
//!     .bcc("will@smith.com")
//!     .subject("The Message")
//!     .body("Something really important");
//!
//! let delivery = transport.send(&message).unwrap();
//! assert_eq!(delivery.accepted(), 2);
//! assert!(transport.is_started());
//! ```
//!
//! #### Events
//!
//! With an [`EventDispatcher`] attached, each send is surrounded by the two phases of a
//! [`SendEvent`](crate::transport::event::SendEvent). See [`crate::transport::event`].

use std::{
    fmt::{self, Debug, Formatter},
    ops::ControlFlow,
    sync::atomic::{AtomicBool, Ordering},
};

#[cfg(feature = "tokio1")]
mod async_transport;
mod delivery;
mod error;

pub use self::{delivery::Delivery, error::Error};
use super::{
    event::{EventDispatcher, EventListener, Phase, SendEvent, SendResult},
    Transport,
};
use crate::{
    message::Recipients,
    sendgrid::{Client, MessageTranslator, Response},
    BoxError, Message,
};

/// Name events of this transport are tagged with
pub const SOURCE: &str = "sendgrid";

/// Sends emails through the SendGrid v3 API
pub struct SendGridTransport<C> {
    client: C,
    translator: MessageTranslator,
    started: AtomicBool,
    dispatcher: Option<Box<dyn EventDispatcher>>,
}

impl<C> SendGridTransport<C> {
    /// Creates a stopped transport submitting requests through `client`, without events
    pub fn new(client: C) -> SendGridTransport<C> {
        SendGridTransport {
            client,
            translator: MessageTranslator::new(),
            started: AtomicBool::new(false),
            dispatcher: None,
        }
    }

    /// Attaches the dispatcher notified around each send
    pub fn with_dispatcher(mut self, dispatcher: Box<dyn EventDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// The client requests are submitted through
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Tells if the transport was started
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Marks the transport as started
    ///
    /// Nothing is opened: each send is a standalone HTTP request.
    pub fn start(&self) {
        self.started.store(true, Ordering::Release);
    }

    /// Marks the transport as stopped
    pub fn stop(&self) {
        self.started.store(false, Ordering::Release);
    }

    /// Always `true`, there is no connection to lose
    pub fn ping(&self) -> bool {
        true
    }

    /// Binds `plugin` to the dispatcher. Dropped if there is no dispatcher.
    pub fn register_plugin(&mut self, plugin: Box<dyn EventListener>) {
        match self.dispatcher.as_mut() {
            Some(dispatcher) => dispatcher.bind_event_listener(plugin),
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!("no event dispatcher, plugin dropped");
            }
        }
    }

    /// Starts the transport if needed and runs the "before send" phase.
    /// Breaks if a listener cancelled the send.
    fn begin<'a>(&self, message: &'a Message) -> ControlFlow<(), Option<SendEvent<'a>>> {
        if !self.is_started() {
            self.start();
        }

        let Some(dispatcher) = self.dispatcher.as_ref() else {
            return ControlFlow::Continue(None);
        };
        let Some(mut event) = dispatcher.create_send_event(SOURCE, message) else {
            return ControlFlow::Continue(None);
        };

        dispatcher.dispatch_event(&mut event, Phase::BeforeSendPerformed);
        if event.bubble_cancelled() {
            #[cfg(feature = "tracing")]
            tracing::debug!(subject = message.subject(), "send cancelled by a listener");
            return ControlFlow::Break(());
        }

        ControlFlow::Continue(Some(event))
    }

    /// Records the outcome on the event and runs the "send performed" phase
    fn conclude(&self, event: Option<SendEvent<'_>>, outcome: &Result<Delivery, Error>) {
        let (Some(dispatcher), Some(mut event)) = (self.dispatcher.as_ref(), event) else {
            return;
        };

        match outcome {
            Ok(_) => event.set_result(SendResult::Success),
            Err(err) => {
                event.set_result(SendResult::Failed);
                event.set_failed_recipients(err.failed_recipients().clone());
            }
        }
        dispatcher.dispatch_event(&mut event, Phase::SendPerformed);
    }

    fn translate(&self, message: &Message) -> Result<crate::sendgrid::Mail, Error> {
        self.translator
            .translate(message)
            .map_err(|e| error::translation(e, message.all_recipients()))
    }
}

/// Turns the provider answer into the outcome of the send
fn classify(message: &Message, response: Response) -> Result<Delivery, Error> {
    #[cfg(feature = "tracing")]
    tracing::debug!(status = %response.status(), "classifying provider answer");

    if response.is_positive() {
        let status = response.status();
        let message_id = response.message_id().map(str::to_owned);
        Ok(Delivery::accepted_by_provider(
            message.recipient_count(),
            status,
            message_id,
        ))
    } else {
        Err(error::rejected(response, message.all_recipients()))
    }
}

impl<C> SendGridTransport<C>
where
    C: Client,
    C::Error: Into<BoxError>,
{
    /// Sends `message`, reporting failures through `failed_recipients`
    ///
    /// Returns the number of accepted recipients. On failure returns 0 and sets
    /// `failed_recipients` to the union of `To`, `Cc`, `Bcc` and its previous content. Errors
    /// are never returned.
    pub fn send_reporting_failures(
        &self,
        message: &Message,
        failed_recipients: &mut Recipients,
    ) -> usize {
        match Transport::send(self, message) {
            Ok(delivery) => delivery.accepted(),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %err, "send failed");

                let mut failed = err.failed_recipients().clone();
                failed.merge(failed_recipients);
                *failed_recipients = failed;
                0
            }
        }
    }
}

impl<C> Transport for SendGridTransport<C>
where
    C: Client,
    C::Error: Into<BoxError>,
{
    type Ok = Delivery;
    type Error = Error;

    fn is_started(&self) -> bool {
        SendGridTransport::is_started(self)
    }

    fn start(&self) {
        SendGridTransport::start(self);
    }

    fn stop(&self) {
        SendGridTransport::stop(self);
    }

    fn ping(&self) -> bool {
        SendGridTransport::ping(self)
    }

    fn send(&self, message: &Message) -> Result<Self::Ok, Self::Error> {
        let event = match self.begin(message) {
            ControlFlow::Continue(event) => event,
            ControlFlow::Break(()) => return Ok(Delivery::cancelled()),
        };

        let outcome = self.translate(message).and_then(|mail| {
            let response = self
                .client
                .send(&mail)
                .map_err(|e| error::client(e, message.all_recipients()))?;
            classify(message, response)
        });

        self.conclude(event, &outcome);
        outcome
    }

    fn register_plugin(&mut self, plugin: Box<dyn EventListener>) {
        SendGridTransport::register_plugin(self, plugin);
    }
}

impl<C: Debug> Debug for SendGridTransport<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendGridTransport")
            .field("client", &self.client)
            .field("started", &self.is_started())
            .field("dispatcher", &self.dispatcher.is_some())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::SendGridTransport;
    use crate::{
        message::Recipients,
        sendgrid::{client::StubClient, StatusCode},
        Message, Transport,
    };

    fn message() -> Message {
        Message::builder()
            .from("john@doe.com")
            .to("jane@doe.com")
            .bcc("will@smith.com")
            .bcc("bruceLee@kung.fu")
            .subject("The Message")
            .body("Something really important")
    }

    #[test]
    fn lifecycle() {
        let transport = SendGridTransport::new(StubClient::new_positive());
        assert!(!transport.is_started());
        assert!(transport.ping());

        transport.start();
        assert!(transport.is_started());
        assert!(transport.ping());

        transport.stop();
        assert!(!transport.is_started());
        assert!(transport.ping());
    }

    #[test]
    fn send_starts_the_transport() {
        let transport = SendGridTransport::new(StubClient::new_positive());
        transport.send(&message()).unwrap();
        assert!(transport.is_started());
    }

    #[test]
    fn accepted_counts_every_recipient() {
        let transport = SendGridTransport::new(StubClient::new(StatusCode::new(200)));
        let message = message();
        let delivery = transport.send(&message).unwrap();

        assert_eq!(delivery.accepted(), 3);
        assert_eq!(delivery.accepted(), message.recipient_count());
        assert_eq!(delivery.status(), Some(StatusCode::new(200)));
        assert!(!delivery.is_cancelled());
    }

    #[test]
    fn rejection_fails_every_recipient() {
        let transport =
            SendGridTransport::new(StubClient::new(StatusCode::new(400)).with_body("bad"));
        let err = transport.send(&message()).unwrap_err();

        assert!(err.is_rejected());
        assert_eq!(err.status(), Some(StatusCode::new(400)));
        assert_eq!(err.body(), Some("bad"));
        let failed: Vec<_> = err.failed_recipients().iter().map(|(e, _)| e).collect();
        assert_eq!(failed, ["jane@doe.com", "will@smith.com", "bruceLee@kung.fu"]);
    }

    #[test]
    fn reporting_failures_merges_previous() {
        let transport = SendGridTransport::new(StubClient::new(StatusCode::new(500)));
        let mut failed = Recipients::new().with("old@doe.com", None);

        assert_eq!(transport.send_reporting_failures(&message(), &mut failed), 0);
        let failed: Vec<_> = failed.iter().map(|(e, _)| e).collect();
        assert_eq!(
            failed,
            ["jane@doe.com", "will@smith.com", "bruceLee@kung.fu", "old@doe.com"]
        );
    }

    #[test]
    fn reporting_failures_on_success() {
        let transport = SendGridTransport::new(StubClient::new_positive());
        let mut failed = Recipients::new();

        assert_eq!(transport.send_reporting_failures(&message(), &mut failed), 3);
        assert!(failed.is_empty());
    }

    #[test]
    fn plugin_without_dispatcher_is_dropped() {
        let mut transport = SendGridTransport::new(StubClient::new_positive());
        transport.register_plugin(Box::new(Noop));
        assert_eq!(transport.send(&message()).unwrap().accepted(), 3);
    }

    struct Noop;

    impl crate::transport::event::EventListener for Noop {}
}
