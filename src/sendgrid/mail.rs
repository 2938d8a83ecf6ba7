//! Body of a SendGrid v3 `mail/send` request
//!
//! ```json
//! {
//!   "personalizations": [{
//!     "to": [{ "email": "jane@doe.com" }],
//!     "bcc": [{ "email": "will@smith.com" }, { "email": "bruceLee@kung.fu" }],
//!     "headers": { "X-Campaign": "spring" }
//!   }],
//!   "from": { "email": "john@doe.com", "name": "John" },
//!   "subject": "The Message",
//!   "content": [{ "type": "text/plain", "value": "Something really important" }]
//! }
//! ```
//!
//! Lists that would be empty are left out of the JSON entirely.

use serde::{ser::Serializer, Serialize};

use crate::{message::ContentType, Address, Error};

/// An address with an optional display name, as accepted by SendGrid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailAddress {
    email: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl EmailAddress {
    /// Validates `email` and prepares `name` for the API.
    ///
    /// Blank names are dropped. Names containing `,` or `;` are sent as a quoted string, as
    /// SendGrid would otherwise split them.
    pub fn new(email: &str, name: Option<&str>) -> Result<Self, Error> {
        let email = email.parse::<Address>().map_err(|source| Error::InvalidAddress {
            address: email.to_owned(),
            source,
        })?;

        Ok(EmailAddress {
            email,
            name: name.and_then(prepare_name),
        })
    }

    /// The validated address
    pub fn email(&self) -> &Address {
        &self.email
    }

    /// Display name, quoted if it contains `,` or `;`
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

fn prepare_name(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    if !name.contains(|c: char| c == ',' || c == ';') {
        return Some(name.to_owned());
    }

    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('"');
    for c in name.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    Some(quoted)
}

/// One content block of the request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    #[serde(rename = "type")]
    content_type: String,
    value: String,
}

impl Content {
    /// Creates a content block of the given type
    pub fn new<V: Into<String>>(content_type: &ContentType, value: V) -> Self {
        Content {
            content_type: content_type.to_string(),
            value: value.into(),
        }
    }

    /// MIME type of the block
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Text of the block
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Recipients and headers that apply to one copy of the mail
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Personalization {
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<Vec<EmailAddress>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cc: Option<Vec<EmailAddress>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bcc: Option<Vec<EmailAddress>>,
    #[serde(skip_serializing_if = "CustomHeaders::is_empty")]
    headers: CustomHeaders,
}

impl Personalization {
    /// `None` when no `To` recipient was ever added
    pub fn to(&self) -> Option<&[EmailAddress]> {
        self.to.as_deref()
    }

    /// `None` when no `Cc` recipient was ever added
    pub fn cc(&self) -> Option<&[EmailAddress]> {
        self.cc.as_deref()
    }

    /// `None` when no `Bcc` recipient was ever added
    pub fn bcc(&self) -> Option<&[EmailAddress]> {
        self.bcc.as_deref()
    }

    /// Custom headers, duplicates included, in insertion order
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Serialized as a JSON object. A repeated name is written as a repeated key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CustomHeaders(Vec<(String, String)>);

impl CustomHeaders {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CustomHeaders {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(name, value)| (name, value)))
    }
}

/// A complete `mail/send` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mail {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    personalizations: Vec<Personalization>,
    from: EmailAddress,
    subject: String,
    content: Vec<Content>,
}

impl Mail {
    /// Creates a request without recipients nor content
    pub fn new<S: Into<String>>(from: EmailAddress, subject: S) -> Self {
        Mail {
            personalizations: Vec::new(),
            from,
            subject: subject.into(),
            content: Vec::new(),
        }
    }

    /// Appends a content block
    pub fn add_content(&mut self, content: Content) {
        self.content.push(content);
    }

    /// Adds `To` recipients to the first personalization. Does nothing for an empty list.
    pub fn add_tos(&mut self, tos: Vec<EmailAddress>) {
        if !tos.is_empty() {
            extend(&mut self.personalization_mut().to, tos);
        }
    }

    /// Adds `Cc` recipients to the first personalization. Does nothing for an empty list.
    pub fn add_ccs(&mut self, ccs: Vec<EmailAddress>) {
        if !ccs.is_empty() {
            extend(&mut self.personalization_mut().cc, ccs);
        }
    }

    /// Adds `Bcc` recipients to the first personalization. Does nothing for an empty list.
    pub fn add_bccs(&mut self, bccs: Vec<EmailAddress>) {
        if !bccs.is_empty() {
            extend(&mut self.personalization_mut().bcc, bccs);
        }
    }

    /// Adds a custom header to the first personalization
    pub fn add_header<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.personalization_mut()
            .headers
            .0
            .push((name.into(), value.into()));
    }

    /// Sender of the mail
    pub fn from(&self) -> &EmailAddress {
        &self.from
    }

    /// Subject of the mail
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Content blocks, in insertion order
    pub fn contents(&self) -> &[Content] {
        &self.content
    }

    /// Personalizations, at most one when built by the translator
    pub fn personalizations(&self) -> &[Personalization] {
        &self.personalizations
    }

    fn personalization_mut(&mut self) -> &mut Personalization {
        if self.personalizations.is_empty() {
            self.personalizations.push(Personalization::default());
        }
        &mut self.personalizations[0]
    }
}

fn extend(list: &mut Option<Vec<EmailAddress>>, addresses: Vec<EmailAddress>) {
    list.get_or_insert_with(Vec::new).extend(addresses);
}
