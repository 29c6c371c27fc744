//! Document facade: container bytes ⇄ normalized document tree.
//!
//! Decode peels the top-level document triple, decodes its STLV body, and
//! applies the stable field normalizations downstream consumers rely on.
//! Encode is the thin wrapper over [`crate::stlv::encode`] used for whole
//! documents (named `pack_json` in earlier tooling).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use byteorder::{ByteOrder, LittleEndian};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::OfdError;
use crate::registry::{registry, Kind};
use crate::stlv;

/// Document kinds whose code field is spelled `<kind>Code` instead of
/// `code`.
const PAYMENT_DOCUMENTS: [&str; 4] = ["receipt", "receiptCorrection", "bso", "bsoCorrection"];

/// Decode a container body into `{"document": {<kind>: {…}}}`.
///
/// `body` is the frame payload: one `⟨tag⟩⟨length⟩⟨value⟩` triple for the
/// document itself, possibly followed by trailing bytes that are outside
/// the declared container length (observed on real traffic; they are
/// ignored). `fiscal_sign` is appended to the container bytes inside the
/// base64 `rawData` field; the codec treats it as opaque.
pub fn decode_container(body: &[u8], fiscal_sign: &[u8]) -> Result<Value, OfdError> {
    if body.len() < 4 {
        return Err(OfdError::invalid("container too short for a tag-length prefix"));
    }
    let tag = LittleEndian::read_u16(&body[0..2]);
    let length = LittleEndian::read_u16(&body[2..4]) as usize;
    if body.len() - 4 < length {
        return Err(OfdError::invalid(format!(
            "container of tag {tag} overruns the buffer"
        )));
    }

    let entry = registry().entry(tag).ok_or(OfdError::UnknownTag(tag))?;
    if entry.kind != Kind::Stlv || tag >= 1000 {
        return Err(OfdError::invalid(format!("tag {tag} is not a document kind")));
    }
    if length as u32 > entry.maxlen {
        return Err(OfdError::overflow(entry.key(), entry.maxlen));
    }

    let container = &body[..4 + length];
    let mut tree = stlv::decode_body(&container[4..])?;
    normalize(&mut tree);

    let kind = entry.key().into_owned();
    debug!(kind = %kind, tag, "decoded document container");

    let code_key = if PAYMENT_DOCUMENTS.contains(&kind.as_str()) {
        format!("{kind}Code")
    } else {
        "code".to_string()
    };
    tree.insert(code_key, Value::from(tag));

    let mut raw = Vec::with_capacity(container.len() + fiscal_sign.len());
    raw.extend_from_slice(container);
    raw.extend_from_slice(fiscal_sign);
    tree.insert("rawData".to_string(), Value::String(BASE64.encode(raw)));

    let mut inner = Map::new();
    inner.insert(kind, Value::Object(tree));
    let mut outer = Map::new();
    outer.insert("document".to_string(), Value::Object(inner));
    Ok(Value::Object(outer))
}

/// Encode a document tree (or any field mapping) into TLV bytes, starting
/// with no parent context.
pub fn encode_tree(tree: &Value) -> Result<Vec<u8>, OfdError> {
    let map = tree
        .as_object()
        .ok_or_else(|| OfdError::invalid("document must be a JSON object"))?;
    stlv::encode(map, None)
}

/// Post-decode canonicalizations applied to the top level of the document
/// body.
fn normalize(tree: &mut Map<String, Value>) {
    if let Some(Value::String(reg_id)) = tree.get_mut("kktRegId") {
        *reg_id = format!("{:<20}", reg_id.trim_start());
    }
    for field in ["userInn", "ofdInn", "operatorInn"] {
        if let Some(Value::String(inn)) = tree.get_mut(field) {
            *inn = normalize_inn(inn);
        }
    }
}

/// INNs are stripped of whitespace, have the `00` prefix dropped from
/// 12-digit person codes, and are right-padded to 12 characters.
fn normalize_inn(raw: &str) -> String {
    let mut inn = raw.trim().to_string();
    if inn.len() > 10 && inn.starts_with("00") {
        inn.drain(..2);
    }
    format!("{inn:<12}")
}
