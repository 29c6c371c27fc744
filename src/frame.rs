//! Container (frame) header: the fixed 32-byte envelope around one fiscal
//! document body, carrying the container length and CRC.
//!
//! Wire layout, little-endian where multi-byte:
//! `length:u16  crc:u16  msgtype:u8  doctype:u8  version:u8  extra1:[2]
//!  devnum:[8]  docnum:[3]  extra2:[12]`

use byteorder::{ByteOrder, LittleEndian};
use crc::{Crc, CRC_16_IBM_3740};

use crate::error::OfdError;

/// Serialized header size.
pub const SIZE: usize = 32;

/// Constant message type. Real-world traffic occasionally deviates here,
/// hence the permissive decode option.
pub const MSGTYPE: u8 = 0xA5;

/// Container format version.
pub const VERSION: u8 = 1;

/// CRC-CCITT-FALSE: poly 0x1021, init 0xFFFF, no reflect, xorout 0x0000.
const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// Whether decode insists on `msgtype == 0xA5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgTypeCheck {
    /// Reject any other message type.
    Strict,
    /// Accept observed-in-the-wild deviations.
    Permissive,
}

/// The 32-byte container header.
///
/// Value type: produced by decode, mutated only between construction and
/// [`FrameHeader::recalculate_crc`] on the encode path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    /// Container length: this header plus the STLV body.
    pub length: u16,
    /// CRC-CCITT-FALSE over the header (sans this field) and the body.
    pub crc: u16,
    pub msgtype: u8,
    pub doctype: u8,
    pub version: u8,
    pub extra1: [u8; 2],
    /// Fiscal drive number, raw wire bytes.
    pub devnum: [u8; 8],
    /// Document number, 3 big-endian wire bytes; see
    /// [`FrameHeader::document_number`].
    pub docnum: [u8; 3],
    pub extra2: [u8; 12],
}

impl FrameHeader {
    /// Header for an outgoing container with the constant msgtype/version.
    pub fn new(
        length: u16,
        doctype: u8,
        devnum: [u8; 8],
        docnum: [u8; 3],
        extra1: [u8; 2],
        extra2: [u8; 12],
    ) -> Self {
        FrameHeader {
            length,
            crc: 0,
            msgtype: MSGTYPE,
            doctype,
            version: VERSION,
            extra1,
            devnum,
            docnum,
            extra2,
        }
    }

    /// Parse a 32-byte header.
    pub fn unpack_from(data: &[u8], check: MsgTypeCheck) -> Result<Self, OfdError> {
        if data.len() != SIZE {
            return Err(OfdError::WrongSize { expected: SIZE, actual: data.len() });
        }
        let length = LittleEndian::read_u16(&data[0..2]);
        let crc = LittleEndian::read_u16(&data[2..4]);
        let header = Self::unpack_tail(&data[4..], length, crc)?;
        if check == MsgTypeCheck::Strict && header.msgtype != MSGTYPE {
            return Err(OfdError::BadMessageType(header.msgtype));
        }
        Ok(header)
    }

    /// Parse the 28-byte tail from `msgtype` onward, with `length` and
    /// `crc` supplied externally (some transports deliver them separately).
    pub fn unpack_tail(data: &[u8], length: u16, crc: u16) -> Result<Self, OfdError> {
        if data.len() != SIZE - 4 {
            return Err(OfdError::WrongSize { expected: SIZE - 4, actual: data.len() });
        }
        let version = data[2];
        if version != VERSION {
            return Err(OfdError::BadFrameVersion(version));
        }

        let mut extra1 = [0u8; 2];
        let mut devnum = [0u8; 8];
        let mut docnum = [0u8; 3];
        let mut extra2 = [0u8; 12];
        extra1.copy_from_slice(&data[3..5]);
        devnum.copy_from_slice(&data[5..13]);
        docnum.copy_from_slice(&data[13..16]);
        extra2.copy_from_slice(&data[16..28]);

        Ok(FrameHeader {
            length,
            crc,
            msgtype: data[0],
            doctype: data[1],
            version,
            extra1,
            devnum,
            docnum,
            extra2,
        })
    }

    /// Serialize to the 32-byte wire form.
    pub fn pack(&self) -> [u8; SIZE] {
        let mut buf = [0u8; SIZE];
        LittleEndian::write_u16(&mut buf[0..2], self.length);
        LittleEndian::write_u16(&mut buf[2..4], self.crc);
        buf[4] = self.msgtype;
        buf[5] = self.doctype;
        buf[6] = self.version;
        buf[7..9].copy_from_slice(&self.extra1);
        buf[9..17].copy_from_slice(&self.devnum);
        buf[17..20].copy_from_slice(&self.docnum);
        buf[20..32].copy_from_slice(&self.extra2);
        buf
    }

    /// Recompute the checksum over `length ∥ header[4..] ∥ body` and store
    /// it in place. The `crc` field itself is skipped.
    pub fn recalculate_crc(&mut self, body: &[u8]) {
        self.crc = self.compute_crc(body);
    }

    /// Opt-in integrity check. The decode path deliberately does not verify
    /// the CRC (integrity is assumed to be checked at the cryptographic
    /// layer upstream); callers wanting end-to-end checking use this.
    pub fn verify_crc(&self, body: &[u8]) -> Result<(), OfdError> {
        let computed = self.compute_crc(body);
        if computed != self.crc {
            return Err(OfdError::invalid(format!(
                "container CRC mismatch: header carries {}, computed {computed}",
                self.crc
            )));
        }
        Ok(())
    }

    fn compute_crc(&self, body: &[u8]) -> u16 {
        let bytes = self.pack();
        let mut digest = CRC16.digest();
        digest.update(&bytes[0..2]);
        digest.update(&bytes[4..SIZE]);
        digest.update(body);
        digest.finalize()
    }

    /// `docnum` surfaced as an unsigned 24-bit big-endian integer.
    pub fn document_number(&self) -> u32 {
        u32::from_be_bytes([0, self.docnum[0], self.docnum[1], self.docnum[2]])
    }

    /// Store a document number into the 3 big-endian `docnum` bytes.
    /// Values above 2^24 - 1 do not fit.
    pub fn set_document_number(&mut self, number: u32) -> Result<(), OfdError> {
        if number > 0x00FF_FFFF {
            return Err(OfdError::overflow("docnum", 3));
        }
        let be = number.to_be_bytes();
        self.docnum.copy_from_slice(&be[1..4]);
        Ok(())
    }
}
