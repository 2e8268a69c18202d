//! # Address parser
//!
//! Turns one free-text chat message into an ordered [`AddressList`]: the intermediate stops of a
//! route, in visiting order.
//!
//! ```rust
//! use address_parser::parse_addresses;
//!
//! let list = parse_addresses("Хрещатик 1, Вокзальна 2\nСадова 3").unwrap();
//! assert_eq!(list.len(), 3);
//! ```

mod address_list;
mod config;
mod error;
mod parser;

pub use address_list::{AddressList, RESERVED_SEPARATOR};
pub use config::ParserConfig;
pub use error::AddressError;
pub use parser::{parse_addresses, AddressParser};
