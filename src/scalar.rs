//! Scalar codecs for the seven primitive field kinds.
//!
//! Every codec is driven by the catalog entry of the tag being coded: the
//! entry supplies the kind, the declared maximum length, and the field name
//! used in diagnostics. Values travel as `serde_json::Value` leaves:
//! integers and decimals as numbers, CP866 text as strings, opaque bytes as
//! lowercase hex strings.

use byteorder::{ByteOrder, LittleEndian};
use encoding_rs::IBM866;
use serde_json::{Number, Value};

use crate::error::OfdError;
use crate::registry::{Kind, TagEntry};

/// Decode a scalar wire value according to its catalog entry.
pub fn decode_value(entry: &TagEntry, data: &[u8]) -> Result<Value, OfdError> {
    match entry.kind {
        Kind::Byte => decode_byte(entry, data),
        Kind::U32 | Kind::UnixTime => decode_u32(entry, data),
        Kind::Vln => decode_vln(entry, data),
        Kind::Fvln => decode_fvln(entry, data),
        Kind::String => decode_string(entry, data),
        Kind::Bytes => decode_bytes(entry, data),
        Kind::Stlv => Err(OfdError::invalid(format!(
            "tag {} is a nested container, not a scalar",
            entry.tag
        ))),
    }
}

/// Encode a JSON leaf into the wire form of its catalog entry.
pub fn encode_value(entry: &TagEntry, value: &Value) -> Result<Vec<u8>, OfdError> {
    match entry.kind {
        Kind::Byte => encode_byte(entry, value),
        Kind::U32 | Kind::UnixTime => encode_u32(entry, value),
        Kind::Vln => encode_vln(entry, value),
        Kind::Fvln => encode_fvln(entry, value),
        Kind::String => encode_string(entry, value),
        Kind::Bytes => encode_bytes(entry, value),
        Kind::Stlv => Err(OfdError::invalid(format!(
            "tag {} is a nested container, not a scalar",
            entry.tag
        ))),
    }
}

// ---------------------------------------------------------------------------
// Byte
// ---------------------------------------------------------------------------

fn decode_byte(_entry: &TagEntry, data: &[u8]) -> Result<Value, OfdError> {
    if data.len() != 1 {
        return Err(OfdError::WrongSize { expected: 1, actual: data.len() });
    }
    Ok(Value::from(u64::from(data[0])))
}

fn encode_byte(entry: &TagEntry, value: &Value) -> Result<Vec<u8>, OfdError> {
    let n = expect_unsigned(entry, value)?;
    if n > u64::from(u8::MAX) {
        return Err(OfdError::overflow(entry.key(), 1));
    }
    Ok(vec![n as u8])
}

// ---------------------------------------------------------------------------
// U32 / UnixTime (identical wire format)
// ---------------------------------------------------------------------------

fn decode_u32(_entry: &TagEntry, data: &[u8]) -> Result<Value, OfdError> {
    if data.len() != 4 {
        return Err(OfdError::WrongSize { expected: 4, actual: data.len() });
    }
    Ok(Value::from(u64::from(LittleEndian::read_u32(data))))
}

fn encode_u32(entry: &TagEntry, value: &Value) -> Result<Vec<u8>, OfdError> {
    let n = expect_unsigned(entry, value)?;
    if n > u64::from(u32::MAX) {
        return Err(OfdError::overflow(entry.key(), 4));
    }
    let mut buf = [0u8; 4];
    LittleEndian::write_u32(&mut buf, n as u32);
    Ok(buf.to_vec())
}

// ---------------------------------------------------------------------------
// VLN
// ---------------------------------------------------------------------------

fn decode_vln(entry: &TagEntry, data: &[u8]) -> Result<Value, OfdError> {
    if data.len() as u32 > entry.maxlen || data.len() > 8 {
        return Err(OfdError::overflow(entry.key(), entry.maxlen));
    }
    let mut buf = [0u8; 8];
    buf[..data.len()].copy_from_slice(data);
    Ok(Value::from(LittleEndian::read_u64(&buf)))
}

fn encode_vln(entry: &TagEntry, value: &Value) -> Result<Vec<u8>, OfdError> {
    let n = expect_unsigned(entry, value)?;
    let mut buf = [0u8; 8];
    LittleEndian::write_u64(&mut buf, n);
    truncate_to_maxlen(&buf, entry)
}

// ---------------------------------------------------------------------------
// FVLN
// ---------------------------------------------------------------------------

fn decode_fvln(entry: &TagEntry, data: &[u8]) -> Result<Value, OfdError> {
    if data.len() as u32 > entry.maxlen || data.len() > 9 {
        return Err(OfdError::overflow(entry.key(), entry.maxlen));
    }
    let mut buf = [0u8; 9];
    buf[..data.len()].copy_from_slice(data);

    let pos = buf[0] as i8;
    if pos < 0 {
        return Err(OfdError::invalid(format!(
            "`{}` carries a negative decimal position",
            entry.key()
        )));
    }
    let mantissa = LittleEndian::read_u64(&buf[1..9]);

    if pos == 0 {
        return Ok(Value::from(mantissa));
    }
    let quantized = mantissa as f64 / 10f64.powi(i32::from(pos));
    Number::from_f64(quantized)
        .map(Value::Number)
        .ok_or_else(|| OfdError::invalid(format!("`{}` is not a finite decimal", entry.key())))
}

fn encode_fvln(entry: &TagEntry, value: &Value) -> Result<Vec<u8>, OfdError> {
    let number = value
        .as_number()
        .ok_or_else(|| OfdError::invalid(format!("expected a number for `{}`", entry.key())))?;
    let text = number.to_string();
    if text.starts_with('-') {
        return Err(OfdError::invalid(format!("`{}` must be non-negative", entry.key())));
    }
    if text.contains(['e', 'E']) {
        return Err(OfdError::invalid(format!(
            "`{}` is not representable as a plain decimal",
            entry.key()
        )));
    }

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text.as_str(), ""),
    };
    let pos = frac_part.len();
    if pos > i8::MAX as usize {
        return Err(OfdError::overflow(entry.key(), entry.maxlen));
    }

    let mut digits = String::with_capacity(int_part.len() + pos);
    digits.push_str(int_part);
    digits.push_str(frac_part);
    let digits = digits.trim_start_matches('0');
    let mantissa: u64 = if digits.is_empty() {
        0
    } else {
        digits
            .parse()
            .map_err(|_| OfdError::overflow(entry.key(), entry.maxlen))?
    };

    let mut buf = [0u8; 9];
    buf[0] = pos as u8;
    LittleEndian::write_u64(&mut buf[1..9], mantissa);
    truncate_to_maxlen(&buf, entry)
}

// ---------------------------------------------------------------------------
// String (CP866)
// ---------------------------------------------------------------------------

fn decode_string(entry: &TagEntry, data: &[u8]) -> Result<Value, OfdError> {
    if data.len() as u32 > entry.maxlen {
        return Err(OfdError::overflow(entry.key(), entry.maxlen));
    }
    if data.is_empty() {
        return Ok(Value::String(String::new()));
    }
    // no BOM handling: CP866 maps all 256 byte values and must stay
    // byte-exact under decode-then-encode
    let (text, _) = IBM866.decode_without_bom_handling(data);
    Ok(Value::String(text.into_owned()))
}

fn encode_string(entry: &TagEntry, value: &Value) -> Result<Vec<u8>, OfdError> {
    let text = value
        .as_str()
        .ok_or_else(|| OfdError::invalid(format!("expected a string for `{}`", entry.key())))?;
    let (bytes, _, had_errors) = IBM866.encode(text);
    if had_errors {
        return Err(OfdError::invalid(format!(
            "`{}` is not representable in CP866",
            entry.key()
        )));
    }
    if bytes.len() as u32 > entry.maxlen {
        return Err(OfdError::overflow(entry.key(), entry.maxlen));
    }
    Ok(bytes.into_owned())
}

// ---------------------------------------------------------------------------
// ByteArray
// ---------------------------------------------------------------------------

fn decode_bytes(entry: &TagEntry, data: &[u8]) -> Result<Value, OfdError> {
    if data.len() as u32 > entry.maxlen {
        return Err(OfdError::overflow(entry.key(), entry.maxlen));
    }
    Ok(Value::String(hex::encode(data)))
}

fn encode_bytes(entry: &TagEntry, value: &Value) -> Result<Vec<u8>, OfdError> {
    let text = value
        .as_str()
        .ok_or_else(|| OfdError::invalid(format!("expected a hex string for `{}`", entry.key())))?;
    let bytes = hex::decode(text)
        .map_err(|_| OfdError::invalid(format!("`{}` is not valid hex", entry.key())))?;
    if bytes.len() as u32 > entry.maxlen {
        return Err(OfdError::overflow(entry.key(), entry.maxlen));
    }
    Ok(bytes)
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn expect_unsigned(entry: &TagEntry, value: &Value) -> Result<u64, OfdError> {
    value
        .as_u64()
        .ok_or_else(|| OfdError::invalid(format!("expected an unsigned integer for `{}`", entry.key())))
}

/// Drop trailing bytes past `maxlen` from a fixed-width little-endian
/// encoding. Truncation is legal only when the dropped tail is all zero,
/// otherwise the value genuinely does not fit.
fn truncate_to_maxlen(buf: &[u8], entry: &TagEntry) -> Result<Vec<u8>, OfdError> {
    let keep = buf.len().min(entry.maxlen as usize);
    if buf[keep..].iter().any(|&b| b != 0) {
        return Err(OfdError::overflow(entry.key(), entry.maxlen));
    }
    Ok(buf[..keep].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Kind;

    fn entry(kind: Kind, maxlen: u32) -> TagEntry {
        TagEntry::new(0, kind, Some("field"), "тестовое поле", maxlen)
    }

    #[test]
    fn byte_round_trip() {
        let e = entry(Kind::Byte, 1);
        assert_eq!(decode_value(&e, b"\x03").unwrap(), 3);
        assert_eq!(encode_value(&e, &Value::from(3)).unwrap(), b"\x03");
    }

    #[test]
    fn byte_rejects_out_of_range_and_wrong_size() {
        let e = entry(Kind::Byte, 1);
        assert!(matches!(encode_value(&e, &Value::from(256)), Err(OfdError::Overflow { .. })));
        assert!(matches!(
            decode_value(&e, b"\x03\x04"),
            Err(OfdError::WrongSize { expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn u32_unpack() {
        let e = entry(Kind::U32, 4);
        assert_eq!(decode_value(&e, b"\x01\x00\x00\x00").unwrap(), 1);
    }

    #[test]
    fn unix_time_unpack() {
        let e = entry(Kind::UnixTime, 4);
        assert_eq!(decode_value(&e, b"\x8a\x02\x9e\x55").unwrap(), 1_436_418_698u64);
    }

    #[test]
    fn vln_unpack_short_buffer() {
        let e = entry(Kind::Vln, 3);
        assert_eq!(decode_value(&e, b"\xe9\x2d\x06").unwrap(), 404_969u64);
    }

    #[test]
    fn vln_pack_when_max_length_less_than_8_bytes() {
        let e = entry(Kind::Vln, 6);
        let packed = encode_value(&e, &Value::from(87_892_227_523_633u64)).unwrap();
        assert_eq!(packed, b"\x31\x04\x00\x01\xf0\x4f");
        assert_eq!(decode_value(&e, &packed).unwrap(), 87_892_227_523_633u64);
    }

    #[test]
    fn vln_pack_overflows_when_number_greater_than_max() {
        let e = entry(Kind::Vln, 6);
        let err = encode_value(&e, &Value::from(87_892_227_523_633_222u64)).unwrap_err();
        assert!(matches!(err, OfdError::Overflow { .. }));
    }

    #[test]
    fn vln_unpack_rejects_oversized_input() {
        let e = entry(Kind::Vln, 3);
        assert!(matches!(
            decode_value(&e, b"\x01\x02\x03\x04"),
            Err(OfdError::Overflow { .. })
        ));
    }

    #[test]
    fn fvln_unpack() {
        let e = entry(Kind::Fvln, 5);
        let value = decode_value(&e, b"\x02\x15\xcd\x5b\x07").unwrap();
        assert_eq!(value, 1_234_567.89);
    }

    #[test]
    fn fvln_pack_two_decimal_places() {
        let e = entry(Kind::Fvln, 5);
        let packed = encode_value(&e, &Value::from(1_234_567.89)).unwrap();
        assert_eq!(packed, b"\x02\x15\xcd\x5b\x07");
        assert_eq!(decode_value(&e, &packed).unwrap(), 1_234_567.89);
    }

    #[test]
    fn fvln_pack_keeps_interior_zeros() {
        let e = entry(Kind::Fvln, 8);
        let packed = encode_value(&e, &Value::from(1453.67)).unwrap();
        assert_eq!(packed, b"\x02\xd7\x37\x02\x00\x00\x00\x00");
        assert_eq!(decode_value(&e, &packed).unwrap(), 1453.67);
    }

    #[test]
    fn fvln_pack_bigger_number_overflows() {
        let e = entry(Kind::Fvln, 5);
        let err = encode_value(&e, &Value::from(1_234_567_123.893)).unwrap_err();
        assert!(matches!(err, OfdError::Overflow { .. }));
    }

    #[test]
    fn fvln_pack_integer_has_zero_position() {
        let e = entry(Kind::Fvln, 8);
        let packed = encode_value(&e, &Value::from(42u64)).unwrap();
        assert_eq!(packed[0], 0);
        assert_eq!(decode_value(&e, &packed).unwrap(), 42u64);
    }

    #[test]
    fn string_unpack_cp866() {
        let e = entry(Kind::String, 4);
        assert_eq!(decode_value(&e, b"\x92\xa5\xe1\xe2").unwrap(), "Тест");
    }

    #[test]
    fn string_pack_cp866() {
        let e = entry(Kind::String, 4);
        assert_eq!(
            encode_value(&e, &Value::String("Тест".into())).unwrap(),
            b"\x92\xa5\xe1\xe2"
        );
    }

    #[test]
    fn string_empty_input_decodes_to_empty() {
        let e = entry(Kind::String, 4);
        assert_eq!(decode_value(&e, b"").unwrap(), "");
    }

    #[test]
    fn string_rejects_unrepresentable_and_oversized() {
        let e = entry(Kind::String, 4);
        assert!(encode_value(&e, &Value::String("日本語".into())).is_err());
        assert!(matches!(
            encode_value(&e, &Value::String("too long".into())),
            Err(OfdError::Overflow { .. })
        ));
    }

    #[test]
    fn bytes_round_trip_as_hex() {
        let e = entry(Kind::Bytes, 6);
        let decoded = decode_value(&e, b"\x21\x04\x1c\x6b\x81\xa4").unwrap();
        assert_eq!(decoded, "21041c6b81a4");
        assert_eq!(encode_value(&e, &decoded).unwrap(), b"\x21\x04\x1c\x6b\x81\xa4");
    }
}
