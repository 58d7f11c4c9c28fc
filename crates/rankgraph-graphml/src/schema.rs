//! GraphML vocabulary shared between the reader and the writer: the `attr.type` strings, the
//! reserved key id for edge weight, and the minimal XML escaping the hand-rolled writer needs.

use crate::writer::KeyType;

/// Reserved key id for the synthetic edge-weight attribute every edge carries, separate from
/// the `k0`, `k1`, ... ids assigned to user attributes so a user attribute literally named
/// "weight" never collides with it.
pub const WEIGHT_KEY: &str = "d_weight";

pub fn attr_type_name(ty: KeyType) -> &'static str {
    match ty {
        KeyType::Int => "long",
        KeyType::Float => "double",
        KeyType::Str => "string",
    }
}

pub fn attr_type_from_name(name: &str) -> KeyType {
    match name {
        "int" | "integer" | "long" => KeyType::Int,
        "float" | "double" => KeyType::Float,
        _ => KeyType::Str,
    }
}

/// Escapes text appearing inside an attribute value (quotes included, since the writer always
/// uses double-quoted attributes).
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escapes text appearing inside an element body (quotes need no escaping there).
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
