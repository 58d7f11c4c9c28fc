//! Tagged attribute values, matching GraphML's `attr.type` vocabulary (`int` / `float` /
//! anything else, conventionally `string`). Attribute storage lives entirely in the facade
//! (`graph::Graph`) — the adjacency store and the PageRank kernel never read it.

use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl AttrValue {
    /// Coerces to `f64` the way `add_edge`/`update_edge` coerce a non-float `weight` attribute
    /// into the adjacency store's cached edge weight. Returns `None` for `Str`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Int(v) => Some(*v as f64),
            AttrValue::Float(v) => Some(*v),
            AttrValue::Str(_) => None,
        }
    }
}

pub type AttrMap = FxHashMap<String, AttrValue>;
