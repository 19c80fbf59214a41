/*!
    ARINC 429 word utilities

    validated frame payloads carry 32 bit ARINC words serialized least
    significant byte first. this module provides the bit layout of a word,
    the odd-parity stamping done before transmission, and the payload to
    word extraction done after reception.
*/

use bilge::prelude::*;

use crate::{Error, frame::MAX_WORDS};


/// bit 31, the odd-parity bit of an ARINC word
pub const PARITY_BIT: u32 = 0x8000_0000;

/**
    standard ARINC 429 word layout

    only the sdi field is interpreted by this crate (it selects the
    left/right address pair when building a frame); the rest is passed
    through to the downstream bus stack untouched.
*/
#[bitsize(32)]
#[derive(Copy, Clone, FromBits, DebugBits, PartialEq)]
pub struct ArincWord {
    pub label: u8,
    pub sdi: Sdi,
    pub data: u19,
    pub ssm: u2,
    pub parity: bool,
}

/// source/destination identifier, selecting the redundant bus side
#[bitsize(2)]
#[derive(Copy, Clone, FromBits, PartialEq, Debug)]
pub enum Sdi {
    /// all-call, no specific side
    All = 0,
    Left = 1,
    Reserved = 2,
    Right = 3,
}

/**
    stamp the odd-parity bit on each word in place

    bit 31 must be clear on input; a set bit is a precondition violation on
    the caller's side and is not silently masked.
*/
pub fn stamp_odd_parity(words: &mut [u32]) {
    for word in words.iter_mut() {
        debug_assert_eq!(*word & PARITY_BIT, 0, "parity bit must be clear on input");
        if (*word & !PARITY_BIT).count_ones() % 2 == 0 {
            *word |= PARITY_BIT;
        }
    }
}

/**
    rebuild 32 bit words from a received data region and hand each to `sink`

    bytes group by four in ascending significance
    (`b0 | b1<<8 | b2<<16 | b3<<24`), matching the serialization order used
    on transmit. trailing bytes short of a full word are ignored.
*/
pub fn words_from_payload(payload: &[u8], mut sink: impl FnMut(u32)) -> Result<(), Error> {
    if payload.len() / 4 > MAX_WORDS {
        return Err(Error::InvalidArgument("payload holds more words than a frame can carry"));
    }
    for group in payload.chunks_exact(4) {
        sink(u32::from_le_bytes(group.try_into().unwrap()));
    }
    Ok(())
}
