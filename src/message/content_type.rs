use std::{
    error::Error as StdError,
    fmt::{self, Display},
    str::FromStr,
};

use mime::Mime;

/// Declared content type of a message body
#[derive(Debug, Clone, PartialEq)]
pub struct ContentType(Mime);

impl ContentType {
    /// A `ContentType` of type `text/plain`
    pub const TEXT_PLAIN: ContentType = Self::from_mime(mime::TEXT_PLAIN);

    /// A `ContentType` of type `text/html`
    pub const TEXT_HTML: ContentType = Self::from_mime(mime::TEXT_HTML);

    /// Parse `s` into `ContentType`
    pub fn parse(s: &str) -> Result<ContentType, ContentTypeErr> {
        Ok(Self::from_mime(s.parse().map_err(ContentTypeErr)?))
    }

    pub(crate) const fn from_mime(mime: Mime) -> Self {
        Self(mime)
    }

    /// The type and subtype, without parameters (`text/plain`)
    pub fn essence(&self) -> &str {
        self.0.essence_str()
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for ContentType {
    type Err = ContentTypeErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Mime> for ContentType {
    fn from(mime: Mime) -> Self {
        Self::from_mime(mime)
    }
}

/// An error occurred while trying to [`ContentType::parse`].
#[derive(Debug)]
pub struct ContentTypeErr(mime::FromStrError);

impl StdError for ContentTypeErr {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.0)
    }
}

impl Display for ContentTypeErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::ContentType;

    #[test]
    fn constants() {
        assert_eq!(ContentType::TEXT_PLAIN.to_string(), "text/plain");
        assert_eq!(ContentType::TEXT_HTML.to_string(), "text/html");
    }

    #[test]
    fn parse_keeps_parameters() {
        let ct = ContentType::parse("text/plain; charset=utf-8").unwrap();
        assert_eq!(ct.to_string(), "text/plain; charset=utf-8");
        assert_eq!(ct.essence(), "text/plain");
    }

    #[test]
    fn parse_error() {
        assert!("not a mime".parse::<ContentType>().is_err());
    }
}
