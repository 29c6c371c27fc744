use thiserror::Error;

/// Everything the codec can reject. Errors always propagate to the caller;
/// no variant is recovered from internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OfdError {
    /// The session envelope did not start with the protocol signature.
    #[error("invalid protocol signature")]
    BadMagic,

    /// Session protocol version other than 0xA281.
    #[error("invalid session protocol version {0:#06x}")]
    BadSessionVersion(u16),

    /// Application protocol version other than 0x0100 / 0x0200.
    #[error("invalid application protocol version {0:#06x}")]
    BadAppVersion(u16),

    /// Container message type other than 0xA5 (strict decode only).
    #[error("invalid container message type {0:#04x}")]
    BadMessageType(u8),

    /// Container format version other than 1.
    #[error("invalid container format version {0}")]
    BadFrameVersion(u8),

    /// A fixed-size header or scalar received a buffer of the wrong length.
    #[error("wrong buffer size: expected {expected} bytes, got {actual}")]
    WrongSize { expected: usize, actual: usize },

    /// A value does not fit the length declared for its tag.
    #[error("value of `{field}` does not fit into {maxlen} bytes")]
    Overflow { field: String, maxlen: u32 },

    /// Tag number missing from the registry; carries the tag for diagnostics.
    #[error("unknown tag {0}")]
    UnknownTag(u16),

    /// An encode-side name resolves to several tags and the parent context
    /// does not single one out.
    #[error("name `{0}` is ambiguous in this context")]
    AmbiguousName(String),

    /// Structural failure outside the variants above.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// The document failed JSON-schema validation.
    #[error("schema validation failed: {0}")]
    SchemaValidation(String),
}

impl OfdError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        OfdError::InvalidDocument(message.into())
    }

    pub(crate) fn overflow(field: impl Into<String>, maxlen: u32) -> Self {
        OfdError::Overflow { field: field.into(), maxlen }
    }
}
