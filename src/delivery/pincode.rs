//! Destination pincode newtype.

use std::fmt;

use crate::delivery::types::DeliveryError;

/// Number of digits in an Indian postal code.
pub const PINCODE_LEN: usize = 6;

/// A postal code known to be exactly six ASCII decimal digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pincode(String);

impl Pincode {
    /// Validate a raw pincode. Surrounding whitespace is not tolerated.
    pub fn parse(raw: &str) -> Result<Self, DeliveryError> {
        if raw.len() == PINCODE_LEN && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(DeliveryError::InvalidInput(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
