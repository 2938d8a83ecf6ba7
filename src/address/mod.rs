//! Email addresses

mod serde;
mod types;

pub use self::types::{Address, AddressError};
