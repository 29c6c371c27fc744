//! Operator acknowledgment: the `operatorAck` reply an OFD sends back for
//! every accepted fiscal document.
//!
//! The builder is pure — the caller supplies the reply timestamp — so the
//! full byte stream is reproducible in tests.

use serde_json::{json, Value};

use crate::error::OfdError;
use crate::frame::{self, FrameHeader};
use crate::session::SessionHeader;
use crate::stlv;

/// Session flags stamped on acknowledgment envelopes.
const ACK_SESSION_FLAGS: u16 = 0b0000_0000_0001_0100;

/// `extra2` filler: "0" right-justified in 12 spaces.
const ACK_EXTRA2: [u8; 12] = *b"           0";

/// Build the complete acknowledgment byte stream (session header, frame
/// header, STLV body) for an incoming document.
///
/// `doc_body` is the decoded body of the incoming document (the object
/// under its kind key); `fiscalDriveNumber` and `fiscalDocumentNumber` are
/// echoed from it. `date_time` is the reply timestamp in Unix seconds.
/// The fiscal sign tags are absent: they are added by the cryptographic
/// machine in production deployments.
pub fn build_ack(
    doc_body: &Value,
    session: &SessionHeader,
    frame: &FrameHeader,
    ofd_inn: &str,
    date_time: u32,
) -> Result<Vec<u8>, OfdError> {
    let drive_number = doc_body
        .get("fiscalDriveNumber")
        .and_then(Value::as_str)
        .ok_or_else(|| OfdError::invalid("document carries no fiscalDriveNumber"))?;
    let document_number = doc_body
        .get("fiscalDocumentNumber")
        .and_then(Value::as_u64)
        .ok_or_else(|| OfdError::invalid("document carries no fiscalDocumentNumber"))?;

    let message = json!({
        "operatorAck": {
            "ofdInn": ofd_inn,
            "fiscalDriveNumber": drive_number,
            "fiscalDocumentNumber": document_number,
            "dateTime": date_time,
            "messageToFn": { "ofdResponseCode": 0 }
        }
    });
    let body = match message.as_object() {
        Some(map) => stlv::encode(map, None)?,
        None => unreachable!("json! object literal"),
    };

    let container_len = frame::SIZE + body.len();
    let length = u16::try_from(container_len)
        .map_err(|_| OfdError::overflow("operatorAck", u16::MAX as u32))?;

    let mut out_frame = FrameHeader::new(
        length,
        7,
        frame.devnum,
        [0u8; 3],
        frame.extra1,
        ACK_EXTRA2,
    );
    out_frame.set_document_number(u32::try_from(document_number).map_err(|_| {
        OfdError::invalid("fiscalDocumentNumber does not fit the container header")
    })?)?;
    out_frame.recalculate_crc(&body);

    let out_session = SessionHeader {
        pva: session.pva,
        fn_id: session.fn_id,
        length,
        flags: ACK_SESSION_FLAGS,
        crc: 0,
    };

    let mut out = Vec::with_capacity(crate::session::SIZE + container_len);
    out.extend_from_slice(&out_session.pack());
    out.extend_from_slice(&out_frame.pack());
    out.extend_from_slice(&body);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document;
    use crate::frame::MsgTypeCheck;
    use crate::session;

    fn incoming() -> (Value, SessionHeader, FrameHeader) {
        let doc_body = json!({
            "fiscalDriveNumber": "9999078900003355",
            "fiscalDocumentNumber": 77,
        });
        let session = SessionHeader::new(*b"9999078900003355", 305, 0b10100);
        let frame = FrameHeader::new(
            305,
            3,
            [0x99, 0x99, 0x07, 0x89, 0x00, 0x00, 0x33, 0x55],
            [0, 0, 77],
            [0x10, 0x09],
            [0u8; 12],
        );
        (doc_body, session, frame)
    }

    #[test]
    fn ack_round_trips_through_the_codec() {
        let (doc_body, in_session, in_frame) = incoming();
        let raw = build_ack(&doc_body, &in_session, &in_frame, "7704358518", 1_436_418_698).unwrap();

        let out_session = SessionHeader::unpack_from(&raw[..session::SIZE]).unwrap();
        assert_eq!(out_session.fn_id, in_session.fn_id);
        assert_eq!(out_session.flags, 0b10100);
        assert_eq!(out_session.length as usize, raw.len() - session::SIZE);

        let container = &raw[session::SIZE..];
        let out_frame =
            FrameHeader::unpack_from(&container[..frame::SIZE], MsgTypeCheck::Strict).unwrap();
        assert_eq!(out_frame.doctype, 7);
        assert_eq!(out_frame.devnum, in_frame.devnum);
        assert_eq!(out_frame.extra1, in_frame.extra1);
        assert_eq!(out_frame.extra2, ACK_EXTRA2);
        assert_eq!(out_frame.document_number(), 77);
        assert_eq!(out_frame.length as usize, container.len());

        let body = &container[frame::SIZE..];
        out_frame.verify_crc(body).expect("freshly computed CRC verifies");

        let doc = document::decode_container(body, b"").unwrap();
        let ack = &doc["document"]["operatorAck"];
        assert_eq!(ack["ofdInn"], "7704358518  ");
        assert_eq!(ack["fiscalDriveNumber"], "9999078900003355");
        assert_eq!(ack["fiscalDocumentNumber"], 77);
        assert_eq!(ack["dateTime"], 1_436_418_698u64);
        assert_eq!(ack["messageToFn"]["ofdResponseCode"], 0);
        assert_eq!(ack["code"], 7);
    }

    #[test]
    fn missing_echo_fields_are_rejected() {
        let (_, in_session, in_frame) = incoming();
        let empty = json!({});
        let err = build_ack(&empty, &in_session, &in_frame, "7704358518", 0).unwrap_err();
        assert!(matches!(err, OfdError::InvalidDocument(_)));
    }
}
