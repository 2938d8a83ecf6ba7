//! Turns a generic [`Message`] into a SendGrid [`Mail`]

use super::mail::{Content, EmailAddress, Mail};
use crate::{message::Recipients, Error, Message};

/// Field-by-field translation of a [`Message`] into a [`Mail`] request.
///
/// The translation is pure: the message is only read, and a fresh request is built on each
/// call. Everything ends up in a single personalization.
///
/// ```
/// use sendgrid_transport::{sendgrid::MessageTranslator, Message};
///
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let message = Message::builder()
///     .from("john@doe.com")
///     .to("jane@doe.com")
///     .subject("The Message")
///     .body("Something really important");
///
/// let mail = MessageTranslator::new().translate(&message)?;
/// assert_eq!(mail.subject(), "The Message");
/// assert_eq!(mail.contents()[0].content_type(), "text/plain");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct MessageTranslator;

impl MessageTranslator {
    /// Creates a translator
    pub fn new() -> Self {
        MessageTranslator
    }

    /// Builds the request.
    ///
    /// # Errors
    ///
    /// * [`Error::MissingFrom`] or [`Error::TooManyFrom`] unless the message has exactly one
    ///   `From` address
    /// * [`Error::InvalidAddress`] if any address of the message is malformed
    pub fn translate(&self, message: &Message) -> Result<Mail, Error> {
        let mut mail = Mail::new(sender(message.from())?, message.subject());

        let body = message.body();
        mail.add_content(Content::new(body.content_type(), body.text()));

        mail.add_tos(addresses(message.to())?);
        mail.add_ccs(addresses(message.cc())?);
        mail.add_bccs(addresses(message.bcc())?);

        for (name, value) in message.headers().iter() {
            mail.add_header(name.to_string(), value);
        }

        Ok(mail)
    }
}

impl TryFrom<&Message> for Mail {
    type Error = Error;

    fn try_from(message: &Message) -> Result<Self, Self::Error> {
        MessageTranslator.translate(message)
    }
}

fn sender(from: &Recipients) -> Result<EmailAddress, Error> {
    let mut from = from.iter();
    match (from.next(), from.next()) {
        (Some((email, name)), None) => EmailAddress::new(email, name),
        (Some(_), Some(_)) => Err(Error::TooManyFrom),
        (None, _) => Err(Error::MissingFrom),
    }
}

fn addresses(recipients: &Recipients) -> Result<Vec<EmailAddress>, Error> {
    recipients
        .iter()
        .map(|(email, name)| EmailAddress::new(email, name))
        .collect()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::MessageTranslator;
    use crate::{
        address::AddressError,
        message::{header::HeaderName, ContentType},
        sendgrid::Mail,
        Error, Message,
    };

    fn emails(list: Option<&[super::EmailAddress]>) -> Vec<String> {
        list.unwrap_or_default()
            .iter()
            .map(|a| a.email().to_string())
            .collect()
    }

    #[test]
    fn translate_message() {
        let message = Message::builder()
            .subject("The Message")
            .from("john@doe.com")
            .to("jane@doe.com")
            .bcc("will@smith.com")
            .bcc("bruceLee@kung.fu")
            .body("Something really important");

        let mail = MessageTranslator::new().translate(&message).unwrap();

        assert_eq!(mail.subject(), "The Message");
        assert_eq!(mail.from().email().to_string(), "john@doe.com");
        assert_eq!(mail.contents().len(), 1);
        assert_eq!(mail.contents()[0].content_type(), "text/plain");
        assert_eq!(mail.contents()[0].value(), "Something really important");

        let personalization = &mail.personalizations()[0];
        assert_eq!(emails(personalization.to()), ["jane@doe.com"]);
        assert_eq!(
            emails(personalization.bcc()),
            ["will@smith.com", "bruceLee@kung.fu"]
        );
        assert_eq!(personalization.cc(), None);
    }

    #[test]
    fn wire_format() {
        let message = Message::builder()
            .from_named("john@doe.com", "John")
            .to_named("jane@doe.com", "Jane")
            .cc("will@smith.com")
            .subject("The Message")
            .header(HeaderName::new_from_ascii_static("X-Campaign"), "spring")
            .body_with_type("<b>hi</b>", ContentType::TEXT_HTML);

        let mail = Mail::try_from(&message).unwrap();

        assert_eq!(
            serde_json::to_value(&mail).unwrap(),
            json!({
                "personalizations": [{
                    "to": [{ "email": "jane@doe.com", "name": "Jane" }],
                    "cc": [{ "email": "will@smith.com" }],
                    "headers": { "X-Campaign": "spring" }
                }],
                "from": { "email": "john@doe.com", "name": "John" },
                "subject": "The Message",
                "content": [{ "type": "text/html", "value": "<b>hi</b>" }]
            })
        );
    }

    #[test]
    fn list_sizes_follow_input() {
        let message = Message::builder()
            .from("john@doe.com")
            .cc("a@example.com")
            .cc("b@example.com")
            .cc("c@example.com")
            .body("");

        let mail = MessageTranslator::new().translate(&message).unwrap();
        let personalization = &mail.personalizations()[0];

        assert_eq!(personalization.cc().map(<[_]>::len), Some(3));
        assert_eq!(personalization.to(), None);
        assert_eq!(personalization.bcc(), None);
    }

    #[test]
    fn no_recipients_no_personalization() {
        let message = Message::builder().from("john@doe.com").body("note to self");

        let mail = MessageTranslator::new().translate(&message).unwrap();
        assert!(mail.personalizations().is_empty());
    }

    #[test]
    fn headers_are_copied_verbatim() {
        let message = Message::builder()
            .from("john@doe.com")
            .to("jane@doe.com")
            .header(HeaderName::new_from_ascii_static("X-Tag"), "b")
            .header(HeaderName::new_from_ascii_static("X-Priority"), "1")
            .header(HeaderName::new_from_ascii_static("X-Tag"), "a")
            .body("");

        let mail = MessageTranslator::new().translate(&message).unwrap();
        let headers: Vec<_> = mail.personalizations()[0].headers().collect();

        assert_eq!(headers, [("X-Tag", "b"), ("X-Priority", "1"), ("X-Tag", "a")]);
    }

    #[test]
    fn exactly_one_sender() {
        let none = Message::builder().to("jane@doe.com").body("");
        assert_eq!(
            MessageTranslator::new().translate(&none),
            Err(Error::MissingFrom)
        );

        let two = Message::builder()
            .from("john@doe.com")
            .from("jane@doe.com")
            .to("will@smith.com")
            .body("");
        assert_eq!(
            MessageTranslator::new().translate(&two),
            Err(Error::TooManyFrom)
        );
    }

    #[test]
    fn malformed_recipient() {
        let message = Message::builder()
            .from("john@doe.com")
            .to("jane@doe.com")
            .bcc("not-an-address")
            .body("");

        assert_eq!(
            MessageTranslator::new().translate(&message),
            Err(Error::InvalidAddress {
                address: "not-an-address".into(),
                source: AddressError::MissingParts,
            })
        );
    }
}
