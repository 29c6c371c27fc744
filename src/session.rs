//! Session header: the fixed 30-byte outer envelope of every exchange.
//!
//! Wire layout, little-endian: `magic:u32  s_version:u16  a_version:u16
//! fn_id:[16]  length:u16  flags:u16  crc:u16`. `length` counts the
//! container (frame header + STLV body) that follows.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::OfdError;

/// Serialized header size.
pub const SIZE: usize = 30;

/// Protocol signature `2A 08 41 0A`, read as a little-endian u32.
pub const MAGIC: u32 = 0x0A41_082A;

/// Session protocol version.
pub const S_VERSION: u16 = 0xA281;

/// Application protocol versions accepted on decode.
pub const A_VERSIONS: [u16; 2] = [0x0100, 0x0200];

/// Application protocol version stamped on every outgoing header,
/// regardless of what the inbound carried.
pub const A_VERSION_CANONICAL: u16 = 0x0100;

/// The 30-byte session header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHeader {
    /// Application protocol version as observed on the wire. Retained for
    /// observation only; `pack` always writes the canonical 0x0100.
    pub pva: u16,
    /// Fiscal drive identifier, raw wire bytes.
    pub fn_id: [u8; 16],
    /// Byte count of the container that follows this header.
    pub length: u16,
    pub flags: u16,
    pub crc: u16,
}

impl SessionHeader {
    pub fn new(fn_id: [u8; 16], length: u16, flags: u16) -> Self {
        SessionHeader { pva: A_VERSION_CANONICAL, fn_id, length, flags, crc: 0 }
    }

    /// Parse a 30-byte header, verifying magic and both protocol versions.
    pub fn unpack_from(data: &[u8]) -> Result<Self, OfdError> {
        if data.len() != SIZE {
            return Err(OfdError::WrongSize { expected: SIZE, actual: data.len() });
        }

        let magic = LittleEndian::read_u32(&data[0..4]);
        if magic != MAGIC {
            return Err(OfdError::BadMagic);
        }
        let s_version = LittleEndian::read_u16(&data[4..6]);
        if s_version != S_VERSION {
            return Err(OfdError::BadSessionVersion(s_version));
        }
        let pva = LittleEndian::read_u16(&data[6..8]);
        if !A_VERSIONS.contains(&pva) {
            return Err(OfdError::BadAppVersion(pva));
        }

        let mut fn_id = [0u8; 16];
        fn_id.copy_from_slice(&data[8..24]);

        Ok(SessionHeader {
            pva,
            fn_id,
            length: LittleEndian::read_u16(&data[24..26]),
            flags: LittleEndian::read_u16(&data[26..28]),
            crc: LittleEndian::read_u16(&data[28..30]),
        })
    }

    /// Serialize to the 30-byte wire form. `a_version` is re-stamped to
    /// the canonical 0x0100, matching operator behavior.
    pub fn pack(&self) -> [u8; SIZE] {
        let mut buf = [0u8; SIZE];
        LittleEndian::write_u32(&mut buf[0..4], MAGIC);
        LittleEndian::write_u16(&mut buf[4..6], S_VERSION);
        LittleEndian::write_u16(&mut buf[6..8], A_VERSION_CANONICAL);
        buf[8..24].copy_from_slice(&self.fn_id);
        LittleEndian::write_u16(&mut buf[24..26], self.length);
        LittleEndian::write_u16(&mut buf[26..28], self.flags);
        LittleEndian::write_u16(&mut buf[28..30], self.crc);
        buf
    }
}
