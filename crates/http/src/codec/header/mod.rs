//! Encoding of the header-like sections of a response
//!
//! - [`StatusLineEncoder`]: writes the status line
//! - [`HeaderEncoder`]: writes header or trailer lines and the blank line ending
//!   the section
//!
//! Parsing of header lines lives with the collection itself, see
//! [`Headers::parse`](crate::protocol::Headers::parse).

mod header_encoder;

pub use header_encoder::{HeaderEncoder, StatusLineEncoder};
