//! Codec for the FNS fiscal-data-operator (OFD) wire protocol.
//!
//! Cash registers ship fiscal documents to an operator as a 30-byte session
//! header, a 32-byte container (frame) header with a CRC-CCITT-FALSE
//! checksum, and an STLV-encoded document body; the operator answers with
//! an `operatorAck` container built the same way. This crate is the
//! bidirectional translation between those byte streams and JSON document
//! trees, driven by a static catalog of tagged fields.
//!
//! The codec is purely functional: encode and decode take inputs and yield
//! outputs with no hidden state, and the tag registry is built once and
//! only ever read afterwards, so any number of connections may decode
//! concurrently. Malformed input fails with a typed [`OfdError`]; nothing
//! is recovered internally.
//!
//! CRCs are written on encode but deliberately NOT verified on decode —
//! integrity of inbound traffic is checked by the cryptographic layer
//! upstream. [`FrameHeader::verify_crc`] is the opt-in check.

pub mod ack;
pub mod document;
pub mod error;
pub mod frame;
pub mod registry;
pub mod scalar;
pub mod schema;
pub mod session;
pub mod stlv;
mod tags;

use serde_json::Value;

pub use ack::build_ack;
pub use document::{decode_container, encode_tree};
pub use error::OfdError;
pub use frame::{FrameHeader, MsgTypeCheck};
pub use registry::{registry, Cardinality, Kind, Registry, TagEntry};
pub use schema::{SchemaValidator, UnknownVersion};
pub use session::SessionHeader;

/// Decode one complete inbound message: session header, container header,
/// and document body, in that order.
///
/// `data` must hold the session header plus the `session.length` container
/// bytes it announces. `fiscal_sign` is the document fiscal sign supplied
/// out-of-band; it only participates in the `rawData` envelope field.
pub fn unpack_message(
    data: &[u8],
    fiscal_sign: &[u8],
    check: MsgTypeCheck,
) -> Result<(Value, SessionHeader, FrameHeader), OfdError> {
    if data.len() < session::SIZE {
        return Err(OfdError::WrongSize { expected: session::SIZE, actual: data.len() });
    }
    let header = SessionHeader::unpack_from(&data[..session::SIZE])?;

    let expected = session::SIZE + header.length as usize;
    if data.len() < expected || (header.length as usize) < frame::SIZE {
        return Err(OfdError::WrongSize { expected, actual: data.len() });
    }
    let container = &data[session::SIZE..expected];

    let frame = FrameHeader::unpack_from(&container[..frame::SIZE], check)?;
    let document = decode_container(&container[frame::SIZE..], fiscal_sign)?;
    Ok((document, header, frame))
}
