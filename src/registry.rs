//! Tag registry: the static catalog indexed three ways (by tag, by name,
//! by description) plus parent-context name resolution for encode.
//!
//! The registry is built once behind a `LazyLock` and borrowed immutably
//! everywhere else; concurrent readers need no synchronization.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::OfdError;
use crate::tags::CATALOG;

/// Wire encoding of a tag's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Unsigned 8-bit integer, exactly one byte.
    Byte,
    /// Unsigned 32-bit integer, little-endian, exactly four bytes.
    U32,
    /// Variable-length unsigned integer, little-endian.
    Vln,
    /// Fixed-point decimal: signed position byte + VLN mantissa.
    Fvln,
    /// CP866-encoded text.
    String,
    /// Opaque bytes.
    Bytes,
    /// Unix epoch seconds, same wire format as `U32`.
    UnixTime,
    /// Nested tag-length-value sequence.
    Stlv,
}

/// How many times a tag may occur under one parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly one occurrence.
    One,
    /// Zero or more; decoded into a JSON array.
    ZeroOrMore,
    /// One or more; decoded into a JSON array.
    OneOrMore,
    /// The format does not pin this down.
    Unspecified,
}

impl Cardinality {
    /// Array-valued tags are collected into a list on decode and emitted
    /// one triple per element on encode.
    pub fn is_array(self) -> bool {
        matches!(self, Cardinality::ZeroOrMore | Cardinality::OneOrMore)
    }
}

/// One catalog row. `name` is the JSON key (absent for tags the format
/// only describes in Russian); `description` is unique across the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagEntry {
    pub tag: u16,
    pub kind: Kind,
    pub name: Option<&'static str>,
    pub description: &'static str,
    pub maxlen: u32,
    pub cardinality: Cardinality,
    /// Tags this entry may appear under. Empty means "context-free".
    pub parents: &'static [u16],
}

impl TagEntry {
    pub(crate) const fn new(
        tag: u16,
        kind: Kind,
        name: Option<&'static str>,
        description: &'static str,
        maxlen: u32,
    ) -> Self {
        TagEntry { tag, kind, name, description, maxlen, cardinality: Cardinality::Unspecified, parents: &[] }
    }

    pub(crate) const fn one(mut self) -> Self {
        self.cardinality = Cardinality::One;
        self
    }

    pub(crate) const fn many(mut self) -> Self {
        self.cardinality = Cardinality::ZeroOrMore;
        self
    }

    pub(crate) const fn at_least_one(mut self) -> Self {
        self.cardinality = Cardinality::OneOrMore;
        self
    }

    pub(crate) const fn under(mut self, parents: &'static [u16]) -> Self {
        self.parents = parents;
        self
    }

    /// JSON key this tag decodes to: the English name, or the
    /// `<unknown-NNNN>` placeholder for nameless catalog rows.
    pub fn key(&self) -> Cow<'static, str> {
        match self.name {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(format!("<unknown-{}>", self.tag)),
        }
    }
}

/// The built registry. Construct via [`registry`].
pub struct Registry {
    by_tag: HashMap<u16, &'static TagEntry>,
    by_name: HashMap<&'static str, Vec<&'static TagEntry>>,
    by_description: HashMap<&'static str, &'static TagEntry>,
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| Registry::build(CATALOG));

/// The process-wide registry over the static catalog.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

impl Registry {
    fn build(catalog: &'static [TagEntry]) -> Self {
        let mut by_tag = HashMap::with_capacity(catalog.len());
        let mut by_name: HashMap<&str, Vec<&TagEntry>> = HashMap::new();
        let mut by_description = HashMap::with_capacity(catalog.len());

        for entry in catalog {
            let prior = by_tag.insert(entry.tag, entry);
            assert!(prior.is_none(), "duplicate tag {} in catalog", entry.tag);

            if let Some(name) = entry.name {
                by_name.entry(name).or_default().push(entry);
            }

            let prior = by_description.insert(entry.description, entry);
            assert!(prior.is_none(), "duplicate description {:?} in catalog", entry.description);
        }

        for entry in catalog {
            for parent in entry.parents {
                assert!(by_tag.contains_key(parent), "tag {} names unknown parent {}", entry.tag, parent);
            }
        }

        Registry { by_tag, by_name, by_description }
    }

    /// Look up a tag number.
    pub fn entry(&self, tag: u16) -> Option<&'static TagEntry> {
        self.by_tag.get(&tag).copied()
    }

    /// Look up a unique description.
    pub fn by_description(&self, description: &str) -> Option<&'static TagEntry> {
        self.by_description.get(description).copied()
    }

    /// All entries sharing a name (aliased names return several).
    pub fn by_name(&self, name: &str) -> &[&'static TagEntry] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolve an encode-side key to a single catalog entry.
    ///
    /// Keys are tried as a `<unknown-NNNN>` placeholder, then as a name,
    /// then as a description. Aliased names are disambiguated by the
    /// current parent tag: prefer the candidate whose `parents` set
    /// contains `parent`; at the root, fall back to the context-free
    /// candidate iff there is exactly one.
    pub fn resolve(&self, key: &str, parent: Option<u16>) -> Result<&'static TagEntry, OfdError> {
        if let Some(tag) = placeholder_tag(key) {
            return self.entry(tag).ok_or(OfdError::UnknownTag(tag));
        }

        let candidates = match self.by_name.get(key) {
            Some(list) => list.as_slice(),
            None => {
                return self
                    .by_description(key)
                    .ok_or_else(|| OfdError::invalid(format!("unknown field name `{key}`")));
            }
        };

        if let [single] = candidates {
            return Ok(*single);
        }

        let hits = match parent {
            Some(parent) => {
                let mut it = candidates.iter().copied().filter(|e| e.parents.contains(&parent));
                (it.next(), it.next())
            }
            None => {
                let mut it = candidates.iter().copied().filter(|e| e.parents.is_empty());
                (it.next(), it.next())
            }
        };

        match hits {
            (Some(entry), None) => Ok(entry),
            _ => Err(OfdError::AmbiguousName(key.to_string())),
        }
    }
}

fn placeholder_tag(key: &str) -> Option<u16> {
    key.strip_prefix("<unknown-")?.strip_suffix('>')?.parse().ok()
}
