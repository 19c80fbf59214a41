/*!
    frame scanning, validation and construction, this is the tricky part of the code

    the receive path resynchronizes on a raw byte stream with no delimiters:
    scan for a preamble, match the header against the catalog, checksum the
    candidate (in two chained runs when it spans the ring's wrap boundary),
    and on any failure discard just enough bytes that the next call resumes
    one position later. nothing here blocks: "not enough data yet" is an
    ordinary result and the caller's main loop simply re-invokes.
*/

use log::{debug, trace};
use packbytes::{FromBytes, ToBytes};

use crate::{
    Error,
    arinc::{Sdi, stamp_odd_parity},
    crc::{CRC_SEED, crc16},
    frame::*,
    message::Message,
    ring::RingBuffer,
    };


/**
    scan the receive buffer for one validated message

    returns `Ok(Some(index))` of the matched catalog entry after consuming
    its frame and storing its data region, `Ok(None)` when nothing matched
    or a candidate is still incomplete (retry once more bytes arrived), and
    [Error::CrcMismatch] for a corrupt candidate, of which exactly one byte
    is discarded so a coincidental preamble inside data cannot stall the
    stream.

    garbage before the first viable preamble is consumed on every call,
    whatever the outcome. catalog order is a priority order: the first entry
    matching the header wins.
*/
pub fn process_inbound<const N: usize>(
    rx: &mut RingBuffer<N>,
    messages: &mut [Message<'_>],
) -> Result<Option<usize>, Error> {
    let incoming = rx.used_bytes();
    let mut found = None;
    // where the scan stopped: a viable preamble, or everything scanned
    let mut stop = incoming;

    for offset in 0 .. incoming {
        if rx.peek(offset) != PREAMBLE
            {continue}
        if incoming - offset < MIN_FRAME_LEN {
            // preamble located but the frame cannot be complete yet
            stop = offset;
            break;
        }
        let header = peek_header(rx, offset);
        if let Some(index) = messages.iter().position(|msg| msg.config().matches(&header)) {
            found = Some(index);
            stop = offset;
            break;
        }
    }

    // drop noise ahead of the candidate so it is never rescanned
    if stop > 0 {
        trace!("discarding {} bytes ahead of frame candidate", stop);
        rx.advance_tail(stop);
    }

    let Some(index) = found else {
        return Ok(None);
    };
    let config = messages[index].config();
    let total = config.frame_len();
    if rx.used_bytes() < total {
        // wait for the rest of the frame, the candidate stays at the tail
        return Ok(None);
    }

    // checksum the whole frame, chaining across the wrap boundary if needed
    let (first, second) = rx.runs(total);
    let mut crc = crc16(first, CRC_SEED);
    if !second.is_empty() {
        crc = crc16(second, crc);
    }
    if crc != 0 {
        // resume the search one byte later, the preamble may have been
        // coincidental data rather than a real frame start
        rx.advance_tail(1);
        debug!("checksum mismatch on candidate for message {}", index);
        return Err(Error::CrcMismatch);
    }

    // valid frame: consume header, data region and checksum
    rx.advance_tail(DATA_START);
    let data_len = usize::from(config.length) - 1;
    let message = &mut messages[index];
    let mut captured = false;
    if let Some(store) = message.payload_store() {
        if store.resize_default(data_len).is_ok() {
            rx.flush_out(store);
            captured = true;
        }
    }
    if !captured {
        // no store configured: drop the data region so the stream stays in sync
        rx.advance_tail(data_len);
    }
    message.mark_received();
    rx.advance_tail(CRC_LEN);
    debug!("validated message {} ({} data bytes)", index, data_len);
    Ok(Some(index))
}

fn peek_header<const N: usize>(rx: &RingBuffer<N>, offset: usize) -> FrameHeader {
    let mut raw = [0u8; HEADER_LEN];
    for (index, byte) in raw.iter_mut().enumerate() {
        *byte = rx.peek(offset + index);
    }
    FrameHeader::from_be_bytes(raw)
}


/**
    build one outbound frame and flush it into the transmit buffer

    `words` are odd-parity stamped **in place** (bit 31 must be clear on
    input) then serialized least significant byte first into the data
    region. `sdi` selects the left or right address pair of the message's
    config; an all-call or reserved sdi falls back to the left pair, a
    behaviour inherited from the Eclipse units this bus talks to.

    `frame_len` is the exact on-wire size of the message
    ([MessageConfig::frame_len](crate::message::MessageConfig::frame_len))
    and bounds the flush. precondition violations leave the transmit buffer
    untouched.
*/
pub fn construct_outbound<const N: usize>(
    message: &Message<'_>,
    tx: &mut RingBuffer<N>,
    words: &mut [u32],
    sdi: Sdi,
    frame_len: usize,
) -> Result<(), Error> {
    if frame_len > MAX_FRAME || frame_len > N {
        return Err(Error::InvalidArgument("frame exceeds the transmit buffer"));
    }
    if words.len() > MAX_WORDS {
        return Err(Error::InvalidArgument("too many arinc words for one frame"));
    }

    stamp_odd_parity(words);

    let config = message.config();
    let (destination, source) = config.addresses(sdi);
    let header = FrameHeader {
        preamble: PREAMBLE,
        destination,
        source,
        length: config.length,
        command: config.command,
    };

    let mut staging = [0u8; MAX_FRAME];
    staging[.. HEADER_LEN].copy_from_slice(&header.to_be_bytes());
    let mut cursor = DATA_START;
    for &word in words.iter() {
        staging[cursor .. cursor + 4].copy_from_slice(&word.to_le_bytes());
        cursor += 4;
    }

    let crc = crc16(&staging[.. cursor], CRC_SEED);
    staging[cursor .. cursor + CRC_LEN].copy_from_slice(&crc.to_be_bytes());

    let flushed = tx.flush_in(&staging[.. frame_len]);
    trace!("flushed {}/{} bytes of outbound frame", flushed, frame_len);
    Ok(())
}
