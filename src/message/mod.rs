//! The generic, transport-agnostic message
//!
//! A [`Message`] is what callers hand to a [`Transport`](crate::Transport): a sender, three
//! recipient lists, a subject, a single body and any number of custom headers. Nothing is
//! validated while building it; addresses are checked when a transport translates the message
//! into its own request format.
//!
//! ```rust
//! use sendgrid_transport::message::{header::HeaderName, ContentType, Message};
//!
//! let message = Message::builder()
//!     .from("john@doe.com")
//!     .to_named("jane@doe.com", "Jane Doe")
//!     .bcc("will@smith.com")
//!     .bcc("bruceLee@kung.fu")
//!     .subject("The Message")
//!     .header(HeaderName::new_from_ascii_static("X-Campaign"), "spring")
//!     .body_with_type("<p>Something really important</p>", ContentType::TEXT_HTML);
//!
//! assert_eq!(message.recipient_count(), 3);
//! ```

mod content_type;
pub mod header;
mod recipients;

pub use self::{
    content_type::{ContentType, ContentTypeErr},
    recipients::{Iter, Recipients},
};

use self::header::{HeaderName, Headers};

/// Body of a message and its declared content type
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    content_type: ContentType,
    text: String,
}

impl Body {
    /// Creates a body with the given content type
    pub fn new<T: Into<String>>(text: T, content_type: ContentType) -> Self {
        Body {
            content_type,
            text: text.into(),
        }
    }

    /// Creates a `text/plain` body
    pub fn plain<T: Into<String>>(text: T) -> Self {
        Body::new(text, ContentType::TEXT_PLAIN)
    }

    /// Type of the body
    pub fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    /// Text of the body
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A builder for messages
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    from: Recipients,
    to: Recipients,
    cc: Recipients,
    bcc: Recipients,
    subject: String,
    headers: Headers,
}

impl MessageBuilder {
    /// Creates a new default message builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `From` address
    ///
    /// Several can be added, but a message can only be translated for a provider with exactly
    /// one sender.
    pub fn from<E: Into<String>>(mut self, email: E) -> Self {
        self.from.insert(email, None);
        self
    }

    /// Adds a `From` address with a display name
    pub fn from_named<E: Into<String>, N: Into<String>>(mut self, email: E, name: N) -> Self {
        self.from.insert(email, Some(name.into()));
        self
    }

    /// Adds a `To` recipient
    pub fn to<E: Into<String>>(mut self, email: E) -> Self {
        self.to.insert(email, None);
        self
    }

    /// Adds a `To` recipient with a display name
    pub fn to_named<E: Into<String>, N: Into<String>>(mut self, email: E, name: N) -> Self {
        self.to.insert(email, Some(name.into()));
        self
    }

    /// Adds a `Cc` recipient
    pub fn cc<E: Into<String>>(mut self, email: E) -> Self {
        self.cc.insert(email, None);
        self
    }

    /// Adds a `Cc` recipient with a display name
    pub fn cc_named<E: Into<String>, N: Into<String>>(mut self, email: E, name: N) -> Self {
        self.cc.insert(email, Some(name.into()));
        self
    }

    /// Adds a `Bcc` recipient
    pub fn bcc<E: Into<String>>(mut self, email: E) -> Self {
        self.bcc.insert(email, None);
        self
    }

    /// Adds a `Bcc` recipient with a display name
    pub fn bcc_named<E: Into<String>, N: Into<String>>(mut self, email: E, name: N) -> Self {
        self.bcc.insert(email, Some(name.into()));
        self
    }

    /// Set the `Subject`
    pub fn subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.subject = subject.into();
        self
    }

    /// Appends a custom header. Repeated names are kept.
    pub fn header<V: Into<String>>(mut self, name: HeaderName, value: V) -> Self {
        self.headers.insert_raw(name, value.into());
        self
    }

    /// Builds the message with a `text/plain` body
    pub fn body<T: Into<String>>(self, text: T) -> Message {
        self.build(Body::plain(text))
    }

    /// Builds the message with a body of the given content type
    pub fn body_with_type<T: Into<String>>(self, text: T, content_type: ContentType) -> Message {
        self.build(Body::new(text, content_type))
    }

    fn build(self, body: Body) -> Message {
        Message {
            from: self.from,
            to: self.to,
            cc: self.cc,
            bcc: self.bcc,
            subject: self.subject,
            body,
            headers: self.headers,
        }
    }
}

/// Email message which can be handed to a transport
#[derive(Debug, Clone)]
pub struct Message {
    from: Recipients,
    to: Recipients,
    cc: Recipients,
    bcc: Recipients,
    subject: String,
    body: Body,
    headers: Headers,
}

impl Message {
    /// Create a new message builder without headers
    pub fn builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    /// `From` addresses
    pub fn from(&self) -> &Recipients {
        &self.from
    }

    /// `To` recipients
    pub fn to(&self) -> &Recipients {
        &self.to
    }

    /// `Cc` recipients
    pub fn cc(&self) -> &Recipients {
        &self.cc
    }

    /// `Bcc` recipients
    pub fn bcc(&self) -> &Recipients {
        &self.bcc
    }

    /// Subject, empty if none was set
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Body of the message
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Custom headers, in insertion order
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// |To| + |Cc| + |Bcc|. An address present in several lists is counted once per list.
    pub fn recipient_count(&self) -> usize {
        self.to.len() + self.cc.len() + self.bcc.len()
    }

    /// Union of `To`, `Cc` and `Bcc`
    pub fn all_recipients(&self) -> Recipients {
        let mut all = self.to.clone();
        all.merge(&self.cc);
        all.merge(&self.bcc);
        all
    }
}
