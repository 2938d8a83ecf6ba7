//! Batch sending on top of any [`Transport`]

use crate::{Message, Transport};

/// Sends batches of messages through a transport, managing its lifecycle
///
/// ```rust
/// use sendgrid_transport::{sendgrid::client::StubClient, Mailer, Message, SendGridTransport};
///
/// let mailer = Mailer::new(SendGridTransport::new(StubClient::new_positive()));
///
/// let messages = [
///     Message::builder().from("john@doe.com").to("jane@doe.com").body("one"),
///     Message::builder().from("john@doe.com").to("will@smith.com").body("two"),
/// ];
///
/// let results = mailer.run(&messages);
/// assert!(results.iter().all(Result::is_ok));
/// ```
#[derive(Debug, Clone)]
pub struct Mailer<T> {
    transport: T,
}

impl<T: Transport> Mailer<T> {
    /// Creates a mailer sending through `transport`
    pub fn new(transport: T) -> Mailer<T> {
        Mailer { transport }
    }

    /// Sends every message in order and returns one result per message
    ///
    /// A transport failing its ping is restarted first. The transport is stopped once the batch
    /// is done, whatever the results.
    pub fn run<'a, I>(&self, messages: I) -> Vec<Result<T::Ok, T::Error>>
    where
        I: IntoIterator<Item = &'a Message>,
    {
        if !self.transport.ping() {
            #[cfg(feature = "tracing")]
            tracing::debug!("transport did not answer ping, restarting it");

            self.transport.stop();
            self.transport.start();
        }

        let results = messages
            .into_iter()
            .map(|message| self.transport.send(message))
            .collect();

        self.transport.stop();
        results
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Gives the transport back
    pub fn into_transport(self) -> T {
        self.transport
    }
}

#[cfg(test)]
mod test {
    use std::sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    };

    use pretty_assertions::assert_eq;

    use super::Mailer;
    use crate::{transport::event::EventListener, Message, Transport};

    /// Records lifecycle calls, answers pings with `alive`
    #[derive(Default)]
    struct Recording {
        alive: bool,
        started: AtomicBool,
        sent: AtomicUsize,
        calls: Mutex<Vec<&'static str>>,
    }

    impl Recording {
        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl Transport for Recording {
        type Ok = usize;
        type Error = ();

        fn is_started(&self) -> bool {
            self.started.load(Ordering::SeqCst)
        }

        fn start(&self) {
            self.record("start");
            self.started.store(true, Ordering::SeqCst);
        }

        fn stop(&self) {
            self.record("stop");
            self.started.store(false, Ordering::SeqCst);
        }

        fn ping(&self) -> bool {
            self.record("ping");
            self.alive
        }

        fn send(&self, message: &Message) -> Result<usize, ()> {
            self.record("send");
            self.sent.fetch_add(1, Ordering::SeqCst);
            if message.to().is_empty() {
                Err(())
            } else {
                Ok(message.recipient_count())
            }
        }

        fn register_plugin(&mut self, _plugin: Box<dyn EventListener>) {}
    }

    fn messages() -> [Message; 2] {
        [
            Message::builder().from("john@doe.com").to("jane@doe.com").body("one"),
            Message::builder().from("john@doe.com").body("two"),
        ]
    }

    #[test]
    fn alive_transport_is_not_restarted() {
        let mailer = Mailer::new(Recording {
            alive: true,
            ..Recording::default()
        });

        let results = mailer.run(&messages());

        assert_eq!(results, [Ok(1), Err(())]);
        assert_eq!(
            *mailer.transport().calls.lock().unwrap(),
            ["ping", "send", "send", "stop"]
        );
        assert!(!mailer.transport().is_started());
    }

    #[test]
    fn dead_transport_is_restarted() {
        let mailer = Mailer::new(Recording::default());

        mailer.run(&messages());

        let transport = mailer.into_transport();
        assert_eq!(transport.sent.load(Ordering::SeqCst), 2);
        assert_eq!(
            *transport.calls.lock().unwrap(),
            ["ping", "stop", "start", "send", "send", "stop"]
        );
    }
}
