//! JSON-schema validation boundary.
//!
//! Decoded documents are checked against per-protocol-version Draft-04
//! schemas laid out as `<root>/<version>/document.schema.json` (versions
//! are strings like `"1.0"`, `"1.05"`, `"1.1"`). Schemas are loaded and
//! compiled once at construction; validation itself is read-only and safe
//! to share across workers.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use jsonschema::{Draft, Validator};
use serde_json::Value;
use tracing::debug;

use crate::error::OfdError;

/// What to do when asked to validate against a version without a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownVersion {
    /// Treat the missing schema as a validation failure.
    Reject,
    /// Accept the document unchecked.
    Skip,
}

/// Compiled per-version document schemas.
pub struct SchemaValidator {
    schemas: HashMap<String, Validator>,
    unknown: UnknownVersion,
}

impl SchemaValidator {
    /// Scan `root` for `<version>/document.schema.json` files and compile
    /// each as Draft-04.
    pub fn from_root(root: impl AsRef<Path>, unknown: UnknownVersion) -> Result<Self, OfdError> {
        let root = root.as_ref();
        let mut schemas = HashMap::new();

        let entries = fs::read_dir(root).map_err(|err| {
            OfdError::SchemaValidation(format!("cannot read schema root {}: {err}", root.display()))
        })?;
        for entry in entries {
            let entry = entry.map_err(|err| {
                OfdError::SchemaValidation(format!("cannot read schema root: {err}"))
            })?;
            let path = entry.path().join("document.schema.json");
            if !path.is_file() {
                continue;
            }
            let version = entry.file_name().to_string_lossy().into_owned();

            let text = fs::read_to_string(&path).map_err(|err| {
                OfdError::SchemaValidation(format!("cannot read {}: {err}", path.display()))
            })?;
            let schema: Value = serde_json::from_str(&text).map_err(|err| {
                OfdError::SchemaValidation(format!("{} is not valid JSON: {err}", path.display()))
            })?;
            let compiled = jsonschema::options()
                .with_draft(Draft::Draft4)
                .build(&schema)
                .map_err(|err| {
                    OfdError::SchemaValidation(format!(
                        "{} does not compile: {err}",
                        path.display()
                    ))
                })?;

            debug!(version = %version, "compiled document schema");
            schemas.insert(version, compiled);
        }

        Ok(SchemaValidator { schemas, unknown })
    }

    /// Versions a schema was found for.
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Validate a decoded document against the schema for `version`.
    pub fn validate(&self, document: &Value, version: &str) -> Result<(), OfdError> {
        match self.schemas.get(version) {
            Some(schema) => schema
                .validate(document)
                .map_err(|err| OfdError::SchemaValidation(err.to_string())),
            None => match self.unknown {
                UnknownVersion::Skip => Ok(()),
                UnknownVersion::Reject => Err(OfdError::SchemaValidation(format!(
                    "no schema for protocol version {version}"
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn schema_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        let version_dir = dir.path().join("1.0");
        fs::create_dir(&version_dir).expect("version dir");
        let schema = json!({
            "$schema": "http://json-schema.org/draft-04/schema#",
            "type": "object",
            "required": ["document"],
            "properties": {
                "document": {
                    "type": "object",
                    "properties": {
                        "openShift": {
                            "type": "object",
                            "required": ["shiftNumber"]
                        }
                    }
                }
            }
        });
        fs::write(
            version_dir.join("document.schema.json"),
            serde_json::to_vec_pretty(&schema).expect("serialize schema"),
        )
        .expect("write schema");
        dir
    }

    #[test]
    fn valid_document_passes() {
        let root = schema_root();
        let validator = SchemaValidator::from_root(root.path(), UnknownVersion::Reject).unwrap();
        let doc = json!({ "document": { "openShift": { "shiftNumber": 1 } } });
        validator.validate(&doc, "1.0").unwrap();
    }

    #[test]
    fn missing_required_field_fails() {
        let root = schema_root();
        let validator = SchemaValidator::from_root(root.path(), UnknownVersion::Reject).unwrap();
        let doc = json!({ "document": { "openShift": {} } });
        let err = validator.validate(&doc, "1.0").unwrap_err();
        assert!(matches!(err, OfdError::SchemaValidation(_)));
    }

    #[test]
    fn unknown_version_honors_configuration() {
        let root = schema_root();
        let doc = json!({ "document": {} });

        let rejecting = SchemaValidator::from_root(root.path(), UnknownVersion::Reject).unwrap();
        assert!(rejecting.validate(&doc, "9.9").is_err());

        let skipping = SchemaValidator::from_root(root.path(), UnknownVersion::Skip).unwrap();
        skipping.validate(&doc, "9.9").unwrap();
    }

    #[test]
    fn versions_are_discovered_from_the_root_layout() {
        let root = schema_root();
        let validator = SchemaValidator::from_root(root.path(), UnknownVersion::Skip).unwrap();
        let versions: Vec<&str> = validator.versions().collect();
        assert_eq!(versions, ["1.0"]);
    }
}
