//! Custom headers of a message

use std::{
    borrow::Cow,
    error::Error as StdError,
    fmt::{self, Display},
    ops::Deref,
};

/// Ordered collection of raw headers.
///
/// Unlike a MIME header map, the same name may appear several times, and every value is kept
/// in the order it was inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    headers: Vec<(HeaderName, String)>,
}

impl Headers {
    /// Creates an empty collection
    #[inline]
    pub const fn new() -> Self {
        Self {
            headers: Vec::new(),
        }
    }

    /// Appends a header, even if one with the same name is already present
    pub fn insert_raw(&mut self, name: HeaderName, value: String) {
        self.headers.push((name, value));
    }

    /// Iterates over `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &str)> {
        self.headers
            .iter()
            .map(|(name, value)| (name, value.as_str()))
    }

    /// Number of headers, duplicates included
    #[inline]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Returns `true` when there is no header
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

/// Name of a header: non-empty printable ASCII, without whitespace or `:`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeaderName(Cow<'static, str>);

impl HeaderName {
    /// Checks and wraps a runtime header name
    pub fn new_from_ascii(ascii: String) -> Result<Self, InvalidHeaderName> {
        if ascii.is_empty()
            || ascii.len() > 76
            || !ascii.bytes().all(|b| b.is_ascii_graphic() && b != b':')
        {
            return Err(InvalidHeaderName(ascii));
        }
        Ok(Self(Cow::Owned(ascii)))
    }

    /// Wraps a header name known at compile time.
    ///
    /// # Panics
    ///
    /// Panics, at compile time in const contexts, if the name is empty, longer than 76 bytes,
    /// or contains a non-ASCII byte, a space or a colon.
    pub const fn new_from_ascii_static(ascii: &'static str) -> Self {
        let bytes = ascii.as_bytes();
        if bytes.is_empty() || bytes.len() > 76 {
            panic!("header name must be between 1 and 76 bytes");
        }
        let mut i = 0;
        while i < bytes.len() {
            if !bytes[i].is_ascii_graphic() || bytes[i] == b':' {
                panic!("header name must be printable ascii without ':'");
            }
            i += 1;
        }

        Self(Cow::Borrowed(ascii))
    }
}

impl Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

impl Deref for HeaderName {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for HeaderName {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for HeaderName {
    fn eq(&self, other: &&str) -> bool {
        let s: &str = self.as_ref();
        s == *other
    }
}

impl PartialEq<HeaderName> for &str {
    fn eq(&self, other: &HeaderName) -> bool {
        let s: &str = other.as_ref();
        *self == s
    }
}

/// A header name rejected by [`HeaderName::new_from_ascii`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidHeaderName(String);

impl Display for InvalidHeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid header name {:?}", self.0)
    }
}

impl StdError for InvalidHeaderName {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{HeaderName, Headers};

    #[test]
    fn valid_headername() {
        assert_eq!(
            HeaderName::new_from_ascii(String::from("X-Campaign")).unwrap(),
            "X-Campaign"
        );
        assert_eq!(HeaderName::new_from_ascii_static("X-Duck"), "X-Duck");
    }

    #[test]
    fn invalid_headername() {
        assert!(HeaderName::new_from_ascii(String::from("From:")).is_err());
        assert!(HeaderName::new_from_ascii(String::from("Date ")).is_err());
        assert!(HeaderName::new_from_ascii(String::from("✉️")).is_err());
        assert!(HeaderName::new_from_ascii(String::new()).is_err());
    }

    #[should_panic]
    #[test]
    fn invalid_headername_static() {
        HeaderName::new_from_ascii_static("X Duck");
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        let mut headers = Headers::new();
        assert!(headers.is_empty());
        headers.insert_raw(HeaderName::new_from_ascii_static("X-Tag"), "one".into());
        headers.insert_raw(HeaderName::new_from_ascii_static("X-Other"), "x".into());
        headers.insert_raw(HeaderName::new_from_ascii_static("x-tag"), "two".into());

        assert_eq!(headers.len(), 3);
        let pairs: Vec<_> = headers
            .iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        assert_eq!(
            pairs,
            [
                ("X-Tag".to_owned(), "one"),
                ("X-Other".to_owned(), "x"),
                ("x-tag".to_owned(), "two"),
            ]
        );
    }
}
