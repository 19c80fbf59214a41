/*!
    message catalog and per-message runtime state

    the catalog ([MessageConfig]) is supplied once at initialization and
    never changes; everything mutable at run time (payload store, timeout
    counters, bus-failure flag) lives in [Message].
*/

use heapless::Vec;

use crate::{
    arinc::Sdi,
    frame::{FrameHeader, MAX_LENGTH, MAX_PAYLOAD, PREAMBLE},
    };


/// device codes of Eclipse's RS422 systems
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(u8)]
pub enum Device {
    LeftAhrs = 0x81,
    RightAhrs = 0x82,
    LeftAdc = 0x85,
    RightAdc = 0x86,
    LeftPfd = 0x51,
    RightPfd = 0x52,
}
impl From<Device> for u8 {
    fn from(device: Device) -> u8 {device as u8}
}

/// command codes of Eclipse's RS422 specification
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(u8)]
pub enum Command {
    GroundMaintenance = 0x02,
    AdcComputedData = 0x30,
    AdcStatus = 0x31,
    AhrsCurrentData = 0x32,
    SoftwareVersion = 0xF8,
    HardwareSerialNumber = 0xFA,
}
impl From<Command> for u8 {
    fn from(command: Command) -> u8 {command as u8}
}


/**
    immutable description of one recognized message

    source and destination each come in a left and a right variant because
    the same logical message can originate from either side of the
    dual-redundant bus. a received frame matches when its addresses match
    either variant.
*/
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MessageConfig {
    pub command: u8,
    pub left_source: u8,
    pub right_source: u8,
    pub left_destination: u8,
    pub right_destination: u8,
    /// byte count of the command + data region, framing and crc excluded
    pub length: u8,
}

impl MessageConfig {
    pub const fn new(
        command: u8,
        left_source: u8,
        right_source: u8,
        left_destination: u8,
        right_destination: u8,
        length: u8,
    ) -> Self {
        assert!(length >= 1 && length as usize <= MAX_LENGTH, "length field out of range");
        Self {command, left_source, right_source, left_destination, right_destination, length}
    }

    /// whether a received header carries this message
    pub fn matches(&self, header: &FrameHeader) -> bool {
        header.preamble == PREAMBLE
        && header.command == self.command
        && header.length == self.length
        && (header.destination == self.left_destination || header.destination == self.right_destination)
        && (header.source == self.left_source || header.source == self.right_source)
    }

    /// (destination, source) pair for the given bus side
    pub fn addresses(&self, sdi: Sdi) -> (u8, u8) {
        match sdi {
            Sdi::Right => (self.right_destination, self.right_source),
            Sdi::Left => (self.left_destination, self.left_source),
            // an absent or reserved sdi falls back to the left pair
            _ => (self.left_destination, self.left_source),
        }
    }

    /// complete on-wire size of this message
    pub fn frame_len(&self) -> usize {
        usize::from(self.length) + crate::frame::FRAME_OVERHEAD
    }
}


/**
    runtime state of one monitored message

    `bus_failed` starts true: at startup no message has been seen yet, and
    the flag is only cleared once the monitor observes traffic.
*/
pub struct Message<'c> {
    config: &'c MessageConfig,
    /// filled by the validator on every successful match; None for messages
    /// whose payload the caller never reads (e.g. a bare version reply)
    payload: Option<Vec<u8, MAX_PAYLOAD>>,
    /// ticks since the last validated frame of this message
    elapsed_ticks: u32,
    /// silence threshold in ticks
    max_ticks: u32,
    bus_failed: bool,
}

impl<'c> Message<'c> {
    /// message whose payload is captured on reception
    pub fn new(config: &'c MessageConfig, max_ticks: u32) -> Self {
        Self {
            config,
            payload: Some(Vec::new()),
            elapsed_ticks: 0,
            max_ticks,
            bus_failed: true,
        }
    }

    /// message validated and counted but whose data region is discarded
    pub fn without_payload(config: &'c MessageConfig, max_ticks: u32) -> Self {
        Self {
            payload: None,
            .. Self::new(config, max_ticks)
        }
    }

    pub fn config(&self) -> &MessageConfig {self.config}

    /// data region of the last validated frame, None when not captured
    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    pub fn bus_failed(&self) -> bool {self.bus_failed}

    pub(crate) fn payload_store(&mut self) -> Option<&mut Vec<u8, MAX_PAYLOAD>> {
        self.payload.as_mut()
    }

    /// reset the silence counter, called on every successful validation
    pub(crate) fn mark_received(&mut self) {
        self.elapsed_ticks = 0;
    }

    pub(crate) fn tick(&mut self) {
        self.elapsed_ticks = self.elapsed_ticks.saturating_add(1);
    }

    pub(crate) fn is_silent(&self) -> bool {
        self.elapsed_ticks >= self.max_ticks
    }

    pub(crate) fn set_bus_failed(&mut self, failed: bool) {
        self.bus_failed = failed;
    }
}
