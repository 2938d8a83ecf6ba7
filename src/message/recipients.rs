use std::iter::FusedIterator;

use indexmap::{map, IndexMap};

/// An ordered mapping from email address to an optional display name.
///
/// This is how the generic [`Message`](super::Message) keeps its `From`, `To`, `Cc` and `Bcc`
/// fields. Iteration follows insertion order. Inserting an address that is already present
/// replaces its name but keeps its original position, so a `Recipients` never holds the same
/// address twice.
///
/// Addresses are not validated here, see [`Address`](crate::Address).
///
/// ```
/// use sendgrid_transport::message::Recipients;
///
/// let mut bcc = Recipients::new()
///     .with("will@smith.com", None)
///     .with("bruceLee@kung.fu", Some("Bruce".into()));
/// bcc.insert("will@smith.com", Some("Will".into()));
///
/// let names: Vec<_> = bcc.iter().map(|(_email, name)| name).collect();
/// assert_eq!(names, [Some("Will"), Some("Bruce")]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipients(IndexMap<String, Option<String>>);

impl Recipients {
    /// Creates an empty set of recipients
    pub fn new() -> Self {
        Recipients(IndexMap::new())
    }

    /// Adds a recipient, in a builder style pattern.
    pub fn with<E: Into<String>>(mut self, email: E, name: Option<String>) -> Self {
        self.insert(email, name);
        self
    }

    /// Adds a recipient. Returns the name previously stored for this address, if it was
    /// already present.
    pub fn insert<E: Into<String>>(
        &mut self,
        email: E,
        name: Option<String>,
    ) -> Option<Option<String>> {
        self.0.insert(email.into(), name)
    }

    /// Number of distinct addresses
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when there is no recipient
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the address is present
    pub fn contains(&self, email: &str) -> bool {
        self.0.contains_key(email)
    }

    /// Display name associated to an address
    pub fn name(&self, email: &str) -> Option<&str> {
        self.0.get(email).and_then(|name| name.as_deref())
    }

    /// Iterates over `(email, name)` pairs in insertion order
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.0.iter())
    }

    /// Adds every recipient of `other` not already present, and overrides the names of those
    /// that are.
    pub fn merge(&mut self, other: &Recipients) {
        for (email, name) in other.iter() {
            self.insert(email, name.map(str::to_owned));
        }
    }
}

impl<E, N> FromIterator<(E, Option<N>)> for Recipients
where
    E: Into<String>,
    N: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (E, Option<N>)>>(iter: T) -> Self {
        let mut recipients = Recipients::new();
        recipients.extend(iter);
        recipients
    }
}

impl<E, N> Extend<(E, Option<N>)> for Recipients
where
    E: Into<String>,
    N: Into<String>,
{
    fn extend<T: IntoIterator<Item = (E, Option<N>)>>(&mut self, iter: T) {
        for (email, name) in iter {
            self.insert(email, name.map(Into::into));
        }
    }
}

impl<'a> IntoIterator for &'a Recipients {
    type Item = (&'a str, Option<&'a str>);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the `(email, name)` pairs of [`Recipients`]
#[derive(Debug, Clone)]
pub struct Iter<'a>(map::Iter<'a, String, Option<String>>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, Option<&'a str>);

    fn next(&mut self) -> Option<Self::Item> {
        self.0
            .next()
            .map(|(email, name)| (email.as_str(), name.as_deref()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
