//! Representation of an email address

use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
    net::IpAddr,
    str::FromStr,
};

use email_address::EmailAddress;
use idna::domain_to_ascii;

/// A validated email address (_user@domain.tld_).
///
/// The generic [`Message`](crate::Message) stores recipients as plain strings. They only become
/// `Address`es when the message is translated into a provider request, which is where malformed
/// input gets rejected.
///
/// # Examples
///
/// ```
/// use sendgrid_transport::Address;
///
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let address = "jane@doe.com".parse::<Address>()?;
/// assert_eq!(address.user(), "jane");
/// assert_eq!(address.domain(), "doe.com");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct Address {
    /// Complete address
    serialized: String,
    /// Index into `serialized` of the '@'
    at_start: usize,
}

impl Address {
    /// Creates a new email address from a user and domain.
    ///
    /// ```
    /// use sendgrid_transport::Address;
    ///
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// let address = Address::new("will", "smith.com")?;
    /// assert_eq!(address.as_ref(), "will@smith.com");
    /// # Ok(())
    /// # }
    /// ```
    pub fn new<U: AsRef<str>, D: AsRef<str>>(user: U, domain: D) -> Result<Self, AddressError> {
        (user, domain).try_into()
    }

    /// Gets the user portion of the `Address`.
    pub fn user(&self) -> &str {
        &self.serialized[..self.at_start]
    }

    /// Gets the domain portion of the `Address`.
    pub fn domain(&self) -> &str {
        &self.serialized[self.at_start + 1..]
    }

    pub(super) fn check_user(user: &str) -> Result<(), AddressError> {
        if EmailAddress::is_valid_local_part(user) {
            Ok(())
        } else {
            Err(AddressError::InvalidUser)
        }
    }

    pub(super) fn check_domain(domain: &str) -> Result<(), AddressError> {
        Address::check_domain_ascii(domain).or_else(|_| {
            domain_to_ascii(domain)
                .map_err(|_| AddressError::InvalidDomain)
                .and_then(|domain| Address::check_domain_ascii(&domain))
        })
    }

    fn check_domain_ascii(domain: &str) -> Result<(), AddressError> {
        if EmailAddress::is_valid_domain(domain) {
            return Ok(());
        }

        // address literal, `[127.0.0.1]` or `[::1]`
        let ip = domain
            .strip_prefix('[')
            .and_then(|ip| ip.strip_suffix(']'))
            .unwrap_or(domain);

        if ip.parse::<IpAddr>().is_ok() {
            return Ok(());
        }

        Err(AddressError::InvalidDomain)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.serialized)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(val: &str) -> Result<Self, AddressError> {
        let at_start = check_address(val)?;
        Ok(Address {
            serialized: val.into(),
            at_start,
        })
    }
}

impl<U, D> TryFrom<(U, D)> for Address
where
    U: AsRef<str>,
    D: AsRef<str>,
{
    type Error = AddressError;

    fn try_from((user, domain): (U, D)) -> Result<Self, Self::Error> {
        let user = user.as_ref();
        Address::check_user(user)?;

        let domain = domain.as_ref();
        Address::check_domain(domain)?;

        Ok(Address {
            serialized: format!("{user}@{domain}"),
            at_start: user.len(),
        })
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(serialized: String) -> Result<Self, AddressError> {
        let at_start = check_address(&serialized)?;
        Ok(Address {
            serialized,
            at_start,
        })
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.serialized
    }
}

fn check_address(val: &str) -> Result<usize, AddressError> {
    if val.trim().is_empty() {
        return Err(AddressError::MissingParts);
    }
    if val.trim().len() != val.len() {
        return Err(AddressError::InvalidInput);
    }

    let mut parts = val.rsplitn(2, '@');
    let domain = parts.next().ok_or(AddressError::MissingParts)?;
    let user = parts.next().ok_or(AddressError::MissingParts)?;

    Address::check_user(user)?;
    Address::check_domain(domain)?;
    Ok(user.len())
}

/// Errors in email address parsing
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum AddressError {
    /// Missing domain or user
    MissingParts,
    /// Invalid email user
    InvalidUser,
    /// Invalid email domain
    InvalidDomain,
    /// Leading or trailing whitespace, or otherwise unusable input
    InvalidInput,
}

impl Error for AddressError {}

impl Display for AddressError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AddressError::MissingParts => f.write_str("Missing domain or user"),
            AddressError::InvalidUser => f.write_str("Invalid email user"),
            AddressError::InvalidDomain => f.write_str("Invalid email domain"),
            AddressError::InvalidInput => f.write_str("Invalid input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_new_agree() {
        let parsed = Address::from_str("jane@doe.com").unwrap();
        let built = Address::new("jane", "doe.com").unwrap();
        assert_eq!(parsed, built);
        assert_eq!(parsed.user(), "jane");
        assert_eq!(parsed.domain(), "doe.com");
    }

    #[test]
    fn mixed_case_local_part() {
        let addr = Address::from_str("bruceLee@kung.fu").unwrap();
        assert_eq!(addr.user(), "bruceLee");
        assert_eq!(addr.domain(), "kung.fu");
    }

    #[test]
    fn ip_literal_domains() {
        let v4 = Address::from_str("root@[127.0.0.1]").unwrap();
        assert_eq!(v4.domain(), "[127.0.0.1]");

        let v6 = Address::new("root", "[2606:4700:4700::1111]").unwrap();
        assert_eq!(v6.as_ref(), "root@[2606:4700:4700::1111]");
    }

    #[test]
    fn internationalized_domain() {
        let addr = Address::from_str("info@bücher.de").unwrap();
        assert_eq!(addr.domain(), "bücher.de");
    }

    #[test]
    fn empty_and_blank_are_missing_parts() {
        assert_eq!(Address::from_str(""), Err(AddressError::MissingParts));
        assert_eq!(Address::from_str("   "), Err(AddressError::MissingParts));
    }

    #[test]
    fn surrounding_whitespace_is_rejected() {
        assert_eq!(
            Address::from_str(" jane@doe.com"),
            Err(AddressError::InvalidInput)
        );
    }

    #[test]
    fn missing_at() {
        assert_eq!(
            Address::from_str("jane.doe.com"),
            Err(AddressError::MissingParts)
        );
    }

    #[test]
    fn bad_user_and_domain() {
        assert_eq!(Address::from_str("@doe.com"), Err(AddressError::InvalidUser));
        assert_eq!(Address::from_str("jane@"), Err(AddressError::InvalidDomain));
        assert_eq!(
            Address::from_str("jane@not a domain"),
            Err(AddressError::InvalidDomain)
        );
    }

    #[test]
    fn try_from_string_keeps_allocation_contents() {
        let addr = Address::try_from(String::from("will@smith.com")).unwrap();
        assert_eq!(addr.to_string(), "will@smith.com");
    }
}
