//! STLV body codec: the recursive `⟨tag:u16 LE⟩⟨length:u16 LE⟩⟨value⟩`
//! walk between wire bytes and a JSON object tree.
//!
//! Decode needs no context: tags are explicit on the wire and carry their
//! own catalog entry. Encode is the direction with ambiguity — aliased
//! names are resolved against the tag of the enclosing container, which is
//! threaded through the recursion as `parent`.

use byteorder::{ByteOrder, LittleEndian};
use serde_json::{Map, Value};

use crate::error::OfdError;
use crate::registry::{registry, Kind, TagEntry};
use crate::scalar;

/// Decode a TLV sequence into a JSON object.
///
/// Tags with array cardinality are collected into a list under their name,
/// preserving wire order. Anything else is set directly; for well-formed
/// documents a repeated non-array tag does not occur, and the last value
/// wins if it does.
pub fn decode_body(data: &[u8]) -> Result<Map<String, Value>, OfdError> {
    let mut out = Map::new();
    let mut rest = data;

    while !rest.is_empty() {
        if rest.len() < 4 {
            return Err(OfdError::invalid("truncated tag-length prefix"));
        }
        let tag = LittleEndian::read_u16(&rest[0..2]);
        let length = LittleEndian::read_u16(&rest[2..4]) as usize;
        if rest.len() - 4 < length {
            return Err(OfdError::invalid(format!(
                "value of tag {tag} overruns the buffer"
            )));
        }
        let bytes = &rest[4..4 + length];
        rest = &rest[4 + length..];

        let entry = registry().entry(tag).ok_or(OfdError::UnknownTag(tag))?;
        if length as u32 > entry.maxlen {
            return Err(OfdError::overflow(entry.key(), entry.maxlen));
        }

        let value = match entry.kind {
            Kind::Stlv => Value::Object(decode_body(bytes)?),
            _ => scalar::decode_value(entry, bytes)?,
        };

        let key = entry.key().into_owned();
        if entry.cardinality.is_array() {
            match out.entry(key).or_insert_with(|| Value::Array(Vec::new())) {
                Value::Array(list) => list.push(value),
                other => *other = Value::Array(vec![value]),
            }
        } else {
            out.insert(key, value);
        }
    }

    Ok(out)
}

/// Encode a JSON object into a TLV sequence.
///
/// Entries are emitted in insertion order. An array value emits one triple
/// per element under the same tag; there is no enclosing list container on
/// the wire.
pub fn encode(tree: &Map<String, Value>, parent: Option<u16>) -> Result<Vec<u8>, OfdError> {
    let mut out = Vec::new();
    for (key, value) in tree {
        let entry = registry().resolve(key, parent)?;
        match value {
            Value::Array(elements) => {
                for element in elements {
                    emit(&mut out, entry, element)?;
                }
            }
            other => emit(&mut out, entry, other)?,
        }
    }
    Ok(out)
}

fn emit(out: &mut Vec<u8>, entry: &'static TagEntry, value: &Value) -> Result<(), OfdError> {
    let body = match (entry.kind, value) {
        (Kind::Stlv, Value::Object(tree)) => encode(tree, Some(entry.tag))?,
        (Kind::Stlv, _) => {
            return Err(OfdError::invalid(format!(
                "expected a nested object for `{}`",
                entry.key()
            )));
        }
        (_, value) => scalar::encode_value(entry, value)?,
    };

    if body.len() as u32 > entry.maxlen || body.len() > usize::from(u16::MAX) {
        return Err(OfdError::overflow(entry.key(), entry.maxlen));
    }

    let mut prefix = [0u8; 4];
    LittleEndian::write_u16(&mut prefix[0..2], entry.tag);
    LittleEndian::write_u16(&mut prefix[2..4], body.len() as u16);
    out.extend_from_slice(&prefix);
    out.extend_from_slice(&body);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pack_byte_by_description() {
        let doc = json!({ "код ответа ОФД": 42 });
        let packed = encode(doc.as_object().unwrap(), None).unwrap();
        assert_eq!(packed, b"\xfe\x03\x01\x00\x2a");
    }

    #[test]
    fn pack_nested_array() {
        let doc = json!({
            "параметр настройки": [
                { "значение типа целое": 42 }
            ]
        });
        let packed = encode(doc.as_object().unwrap(), None).unwrap();

        let mut expected = Vec::new();
        let inner = b"\xf7\x03\x04\x00\x2a\x00\x00\x00"; // 1015, len 4, u32 42
        expected.extend_from_slice(b"\x17\x04"); // 1047
        expected.extend_from_slice(&(inner.len() as u16).to_le_bytes());
        expected.extend_from_slice(inner);
        assert_eq!(packed, expected);
    }

    #[test]
    fn pack_nested_object() {
        let doc = json!({
            "подтверждение оператора": {
                "сообщение оператора для ФН": {
                    "параметр настройки": [
                        { "значение типа целое": 42 }
                    ]
                }
            }
        });
        let packed = encode(doc.as_object().unwrap(), None).unwrap();

        let wr0 = {
            let mut v: Vec<u8> = vec![0xf7, 0x03, 0x04, 0x00];
            v.extend_from_slice(&42u32.to_le_bytes());
            v
        };
        let mut wr1: Vec<u8> = vec![0x17, 0x04];
        wr1.extend_from_slice(&(wr0.len() as u16).to_le_bytes());
        wr1.extend_from_slice(&wr0);
        let mut wr2: Vec<u8> = vec![0x2c, 0x04];
        wr2.extend_from_slice(&(wr1.len() as u16).to_le_bytes());
        wr2.extend_from_slice(&wr1);
        let mut wr3: Vec<u8> = vec![0x07, 0x00];
        wr3.extend_from_slice(&(wr2.len() as u16).to_le_bytes());
        wr3.extend_from_slice(&wr2);
        assert_eq!(packed, wr3);
    }

    #[test]
    fn placeholder_names_round_trip() {
        let doc = json!({
            "operatorAck": {
                "messageToFn": {
                    "<unknown-1047>": [ { "<unknown-1015>": 42 } ]
                }
            }
        });
        let packed = encode(doc.as_object().unwrap(), None).unwrap();
        let decoded = decode_body(&packed).unwrap();
        let ack = &decoded["operatorAck"]["messageToFn"]["<unknown-1047>"][0];
        assert_eq!(ack["<unknown-1015>"], 42);
    }

    #[test]
    fn taxation_type_encodes_by_parent_context() {
        let receipt_like = json!({ "taxationType": 1 });
        let packed = encode(receipt_like.as_object().unwrap(), Some(3)).unwrap();
        assert_eq!(&packed[0..2], &1055u16.to_le_bytes());

        let report_like = json!({ "taxationType": 1 });
        let packed = encode(report_like.as_object().unwrap(), Some(1)).unwrap();
        assert_eq!(&packed[0..2], &1062u16.to_le_bytes());
    }

    #[test]
    fn repeated_array_tags_collect_into_a_list() {
        let doc = json!({
            "параметр настройки": [
                { "значение типа целое": 1 },
                { "значение типа целое": 2 }
            ]
        });
        let packed = encode(doc.as_object().unwrap(), None).unwrap();
        let decoded = decode_body(&packed).unwrap();
        let list = decoded["<unknown-1047>"].as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["<unknown-1015>"], 1);
        assert_eq!(list[1]["<unknown-1015>"], 2);
    }

    #[test]
    fn unknown_tag_is_reported_with_its_number() {
        // tag 999, length 0
        let err = decode_body(b"\xe7\x03\x00\x00").unwrap_err();
        assert_eq!(err, OfdError::UnknownTag(999));
    }

    #[test]
    fn inner_length_overrunning_the_buffer_is_rejected() {
        // tag 1040 claims 4 bytes, only 2 present
        let err = decode_body(b"\x10\x04\x04\x00\x01\x00").unwrap_err();
        assert!(matches!(err, OfdError::InvalidDocument(_)));
    }

    #[test]
    fn truncated_prefix_is_rejected() {
        let err = decode_body(b"\x10\x04\x04").unwrap_err();
        assert!(matches!(err, OfdError::InvalidDocument(_)));
    }

    #[test]
    fn value_longer_than_declared_maxlen_is_rejected() {
        // tag 1077 (fiscalSign, maxlen 6) claiming 7 bytes
        let mut data: Vec<u8> = vec![0x35, 0x04, 0x07, 0x00];
        data.extend_from_slice(&[0u8; 7]);
        let err = decode_body(&data).unwrap_err();
        assert!(matches!(err, OfdError::Overflow { .. }));
    }
}
