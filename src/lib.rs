#![no_std]
#[cfg(feature = "std")]
extern crate std;

pub mod arinc;
pub mod crc;
pub mod frame;
pub mod link;
pub mod message;
pub mod monitor;
pub mod ring;

pub use arinc::{ArincWord, Sdi};
pub use link::{construct_outbound, process_inbound};
pub use message::{Message, MessageConfig};
pub use ring::RingBuffer;

use thiserror::Error;

/// error regarding eclipse RS422 framing
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// a candidate frame failed its checksum; one byte was discarded so the
    /// search resumes at the next position
    #[error("frame checksum mismatch")]
    CrcMismatch,
    /// a precondition was violated at entry, nothing was changed
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
