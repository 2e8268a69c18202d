//! Ordered, validated list of address fragments.

use crate::error::AddressError;

/// Separator the directions API and map links use between waypoints; never allowed inside an address.
pub const RESERVED_SEPARATOR: char = '|';

/// Ordered, non-empty list of trimmed address fragments. Order is the route visiting order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressList {
    addresses: Vec<String>,
}

impl AddressList {
    /// Builds a list from already split fragments. Each fragment is trimmed; empty ones are dropped.
    ///
    /// Fails with [`AddressError::EmptyInput`] when nothing remains and with
    /// [`AddressError::ReservedSeparator`] when a fragment contains `|`.
    pub fn new<I, S>(items: I) -> Result<Self, AddressError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut addresses = Vec::new();
        for item in items {
            let trimmed = item.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.contains(RESERVED_SEPARATOR) {
                return Err(AddressError::ReservedSeparator(trimmed.to_string()));
            }
            addresses.push(trimmed.to_string());
        }
        if addresses.is_empty() {
            return Err(AddressError::EmptyInput);
        }
        Ok(Self { addresses })
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Always false for a constructed list; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.addresses.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.addresses
    }

    pub fn into_vec(self) -> Vec<String> {
        self.addresses
    }
}

impl<'a> IntoIterator for &'a AddressList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.addresses.iter()
    }
}
