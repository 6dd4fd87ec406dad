//! Dynamic JSON object mapping.
//!
//! Parses JSON objects into a map-backed value offering both keyed lookup
//! and named-field lookup. Field names derive from keys by a deterministic
//! mangling rule: non-identifier characters become `_`, and keys that are
//! reserved words or start with a digit gain an `m` prefix, so `"class"` is
//! reachable as `mclass` and `"from-cookie"` as `from_cookie`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved words that cannot serve as field names directly.
const RESERVED: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
];

fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name)
}

fn starts_with_digit(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Encodes a JSON key into a field name.
///
/// `class` becomes `mclass`, `0file` becomes `m0file`, `from-cookie`
/// becomes `from_cookie`; already-safe keys pass through unchanged.
pub fn field_name(key: &str) -> String {
    let cleaned: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if is_reserved(&cleaned) || starts_with_digit(&cleaned) {
        format!("m{cleaned}")
    } else {
        cleaned
    }
}

/// Decodes a field name back into the key it stands for.
///
/// A leading `m` is stripped only when the remainder is reserved or starts
/// with a digit; otherwise `_` maps back to `-`. Inverse of [`field_name`]
/// for keys whose only non-identifier character is `-`.
pub fn field_key(name: &str) -> String {
    if let Some(rest) = name.strip_prefix('m') {
        if is_reserved(rest) || starts_with_digit(rest) {
            return rest.to_string();
        }
    }
    name.replace('_', "-")
}

/// A JSON object with insertion-ordered keys and field-style access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DynObject {
    fields: Map<String, Value>,
}

impl DynObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object; `None` when the text is not valid JSON or not
    /// an object.
    pub fn parse(text: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(fields)) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Keyed lookup, exact key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Named-field lookup: the name itself, then the decode rules (strip a
    /// mangling `m` prefix, or map `_` back to `-`).
    pub fn field(&self, name: &str) -> Option<&Value> {
        if let Some(value) = self.fields.get(name) {
            return Some(value);
        }
        if let Some(rest) = name.strip_prefix('m') {
            if is_reserved(rest) || starts_with_digit(rest) {
                return self.fields.get(rest);
            }
        }
        if name.contains('_') {
            return self.fields.get(&name.replace('_', "-"));
        }
        None
    }

    /// Inserts or replaces a key.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

impl fmt::Display for DynObject {
    /// Compact JSON with keys in insertion order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.fields) {
            Ok(text) => f.write_str(&text),
            Err(_) => Err(fmt::Error),
        }
    }
}
