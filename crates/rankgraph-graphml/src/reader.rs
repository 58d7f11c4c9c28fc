//! Parses GraphML into a [`Graph`] by walking the DOM with `roxmltree`: find `<key>` definitions
//! first, then read `<node>`/`<edge>` elements and their `<data>` children against that table.

use rankgraph_core::{AttrMap, AttrValue, Graph};
use rustc_hash::FxHashMap;
use std::io::Read as _;

use crate::error::{GraphMlError, Result};
use crate::schema::{attr_type_from_name, WEIGHT_KEY};
use crate::writer::KeyType;

struct KeyDef {
    attr_name: String,
    ty: KeyType,
}

/// Parses plain (uncompressed) GraphML text into a fresh [`Graph`].
pub fn from_str(xml: &str) -> Result<Graph> {
    let doc = roxmltree::Document::parse(xml)?;
    let root = doc
        .descendants()
        .find(|n| n.has_tag_name("graph"))
        .ok_or_else(|| GraphMlError::MalformedGraphML {
            reason: "missing <graph> element".into(),
        })?;

    let mut keys: FxHashMap<String, KeyDef> = FxHashMap::default();
    for key_el in doc.descendants().filter(|n| n.has_tag_name("key")) {
        let id = key_el
            .attribute("id")
            .ok_or_else(|| GraphMlError::MalformedGraphML {
                reason: "<key> missing id".into(),
            })?;
        let attr_name = key_el
            .attribute("attr.name")
            .unwrap_or(id)
            .to_string();
        let ty = attr_type_from_name(key_el.attribute("attr.type").unwrap_or("string"));
        keys.insert(id.to_string(), KeyDef { attr_name, ty });
    }

    let mut graph = Graph::new();

    for node_el in root.children().filter(|n| n.has_tag_name("node")) {
        let id = node_el
            .attribute("id")
            .ok_or_else(|| GraphMlError::MalformedGraphML {
                reason: "<node> missing id".into(),
            })?;
        let attrs = read_data(node_el, &keys);
        graph.add_node_with_attrs(id, attrs)?;
    }

    for edge_el in root.children().filter(|n| n.has_tag_name("edge")) {
        let src = edge_el
            .attribute("source")
            .ok_or_else(|| GraphMlError::MalformedGraphML {
                reason: "<edge> missing source".into(),
            })?;
        let dst = edge_el
            .attribute("target")
            .ok_or_else(|| GraphMlError::MalformedGraphML {
                reason: "<edge> missing target".into(),
            })?;

        let mut weight = 0.0;
        let mut attrs = AttrMap::default();
        for data_el in edge_el.children().filter(|n| n.has_tag_name("data")) {
            let Some(key_id) = data_el.attribute("key") else {
                continue;
            };
            let text = data_el.text().unwrap_or_default();
            if key_id == WEIGHT_KEY {
                weight = text.trim().parse::<f64>().map_err(|_| {
                    GraphMlError::MalformedGraphML {
                        reason: format!("edge {src}->{dst} has non-numeric weight"),
                    }
                })?;
                continue;
            }
            let Some(def) = keys.get(key_id) else {
                continue;
            };
            attrs.insert(def.attr_name.clone(), parse_value(text, def.ty));
        }

        graph.add_edge_with_attrs(src, dst, weight, attrs)?;
    }

    Ok(graph)
}

/// Decompresses `.graphmlz` bytes and parses the result.
pub fn from_gzip_bytes(bytes: &[u8]) -> Result<Graph> {
    let mut decoder = flate2::read::GzDecoder::new(bytes);
    let mut xml = String::new();
    decoder.read_to_string(&mut xml)?;
    from_str(&xml)
}

fn read_data(node_el: roxmltree::Node<'_, '_>, keys: &FxHashMap<String, KeyDef>) -> AttrMap {
    let mut attrs = AttrMap::default();
    for data_el in node_el.children().filter(|n| n.has_tag_name("data")) {
        let Some(key_id) = data_el.attribute("key") else {
            continue;
        };
        let Some(def) = keys.get(key_id) else {
            continue;
        };
        let text = data_el.text().unwrap_or_default();
        attrs.insert(def.attr_name.clone(), parse_value(text, def.ty));
    }
    attrs
}

fn parse_value(text: &str, ty: KeyType) -> AttrValue {
    match ty {
        KeyType::Int => text
            .trim()
            .parse::<i64>()
            .map(AttrValue::Int)
            .unwrap_or_else(|_| AttrValue::Str(text.to_string())),
        KeyType::Float => text
            .trim()
            .parse::<f64>()
            .map(AttrValue::Float)
            .unwrap_or_else(|_| AttrValue::Str(text.to_string())),
        KeyType::Str => AttrValue::Str(text.to_string()),
    }
}
