/*!
    wire layout of an Eclipse RS422 frame

    a frame is `preamble, destination, source, length, command, data, crc`.
    the length field counts the command byte plus the data region, so a
    complete frame occupies `length + FRAME_OVERHEAD` bytes on the wire.
*/

use packbytes::{FromBytes, ToBytes};


/// sentinel byte marking the start of every frame
pub const PREAMBLE: u8 = 0xEA;

/// bytes from the preamble up to and including the command
pub const HEADER_LEN: usize = 5;
/// offset of the data region from the frame start
pub const DATA_START: usize = 5;
/// trailing checksum, big-endian
pub const CRC_LEN: usize = 2;
/// framing bytes not counted by the length field: preamble, addresses, length byte, crc
pub const FRAME_OVERHEAD: usize = 6;
/// below this many buffered bytes no frame can even hold a header and checksum
pub const MIN_FRAME_LEN: usize = 6;

/// largest value of the length field among Eclipse messages (ADC computed data)
pub const MAX_LENGTH: usize = 0x51;
/// largest data region: the length field minus the command byte
pub const MAX_PAYLOAD: usize = MAX_LENGTH - 1;
/// largest complete frame, sizing the transmit staging buffer
pub const MAX_FRAME: usize = MAX_LENGTH + FRAME_OVERHEAD;
/// most ARINC words one frame can carry
pub const MAX_WORDS: usize = MAX_PAYLOAD / 4;


/// fixed five byte header opening every frame, fields in wire order
#[derive(Copy, Clone, FromBytes, ToBytes, Debug, Default, PartialEq)]
pub struct FrameHeader {
    pub preamble: u8,
    pub destination: u8,
    pub source: u8,
    /// command + data byte count, checksum and framing excluded
    pub length: u8,
    pub command: u8,
}
