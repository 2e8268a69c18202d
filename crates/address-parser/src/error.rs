//! Address parsing errors.

use thiserror::Error;

/// Errors produced while turning message text into an [`crate::AddressList`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The message held no usable address fragment.
    #[error("No address found in message")]
    EmptyInput,

    /// A fragment contains the waypoint separator used by the directions API and map links.
    #[error("Address contains reserved separator '|': {0}")]
    ReservedSeparator(String),

    #[error("Invalid city hints: {0}")]
    InvalidHints(String),
}
