//! Serializes a [`Graph`] to GraphML. Built by hand with `std::fmt::Write` rather than through
//! a DOM builder, since the output shape (keys, then nodes, then edges) is fixed and small.

use rankgraph_core::{AttrValue, Graph};
use std::fmt::Write as _;
use std::io::Write as _;

use crate::error::Result;
use crate::schema::{attr_type_name, escape_attr, escape_text, WEIGHT_KEY};

/// Writes `graph` as plain GraphML (no compression) into a `String`.
pub fn to_string(graph: &Graph) -> Result<String> {
    let mut out = String::new();
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#).unwrap();
    writeln!(
        out,
        r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">"#
    )
    .unwrap();

    let node_keys = collect_keys(graph, Scope::Node);
    let edge_keys = collect_keys(graph, Scope::Edge);

    for (key_id, name, ty) in &node_keys {
        writeln!(
            out,
            r#"  <key id="{key_id}" for="node" attr.name="{}" attr.type="{}"/>"#,
            escape_attr(name),
            attr_type_name(*ty)
        )
        .unwrap();
    }
    writeln!(
        out,
        r#"  <key id="{WEIGHT_KEY}" for="edge" attr.name="weight" attr.type="double"/>"#
    )
    .unwrap();
    for (key_id, name, ty) in &edge_keys {
        writeln!(
            out,
            r#"  <key id="{key_id}" for="edge" attr.name="{}" attr.type="{}"/>"#,
            escape_attr(name),
            attr_type_name(*ty)
        )
        .unwrap();
    }

    writeln!(out, r#"  <graph id="G" edgedefault="directed">"#).unwrap();

    for name in graph.node_names() {
        writeln!(out, r#"    <node id="{}">"#, escape_attr(name)).unwrap();
        if let Ok(attrs) = graph.node_attrs(name) {
            for (key_id, attr_name, _) in &node_keys {
                if let Some(value) = attrs.get(attr_name) {
                    write_data(&mut out, key_id, value);
                }
            }
        }
        writeln!(out, "    </node>").unwrap();
    }

    for src in graph.node_names() {
        for dst in graph.out_neighbors(src).unwrap_or_default() {
            writeln!(
                out,
                r#"    <edge source="{}" target="{}">"#,
                escape_attr(src),
                escape_attr(dst)
            )
            .unwrap();
            let weight = graph.edge_weight(src, dst).unwrap_or(0.0);
            writeln!(
                out,
                r#"      <data key="{WEIGHT_KEY}">{weight}</data>"#
            )
            .unwrap();
            if let Ok(attrs) = graph.edge_attrs(src, dst) {
                for (key_id, attr_name, _) in &edge_keys {
                    if let Some(value) = attrs.get(attr_name) {
                        write_data(&mut out, key_id, value);
                    }
                }
            }
            writeln!(out, "    </edge>").unwrap();
        }
    }

    writeln!(out, "  </graph>").unwrap();
    writeln!(out, "</graphml>").unwrap();
    Ok(out)
}

/// Writes `graph` as gzip-compressed GraphML (`.graphmlz` convention).
pub fn to_gzip_bytes(graph: &Graph) -> Result<Vec<u8>> {
    let xml = to_string(graph)?;
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(xml.as_bytes())?;
    Ok(encoder.finish()?)
}

fn write_data(out: &mut String, key_id: &str, value: &AttrValue) {
    let rendered = match value {
        AttrValue::Int(v) => v.to_string(),
        AttrValue::Float(v) => v.to_string(),
        AttrValue::Str(v) => escape_text(v),
    };
    writeln!(out, r#"      <data key="{key_id}">{rendered}</data>"#).unwrap();
}

enum Scope {
    Node,
    Edge,
}

#[derive(Clone, Copy, PartialEq)]
pub(crate) enum KeyType {
    Int,
    Float,
    Str,
}

fn attr_kind(value: &AttrValue) -> KeyType {
    match value {
        AttrValue::Int(_) => KeyType::Int,
        AttrValue::Float(_) => KeyType::Float,
        AttrValue::Str(_) => KeyType::Str,
    }
}

/// Assigns a stable `k0`, `k1`, ... id to every distinct attribute name seen across all nodes
/// (or all edges), in first-seen order. The attribute's type is taken from its first
/// occurrence; mixed types for the same name across different nodes are not checked.
fn collect_keys(graph: &Graph, scope: Scope) -> Vec<(String, String, KeyType)> {
    let mut seen = Vec::new();
    let mut push_attrs = |attrs: &rankgraph_core::AttrMap| {
        for (name, value) in attrs {
            if !seen.iter().any(|(n, _): &(String, KeyType)| n == name) {
                seen.push((name.clone(), attr_kind(value)));
            }
        }
    };

    match scope {
        Scope::Node => {
            for name in graph.node_names() {
                if let Ok(attrs) = graph.node_attrs(name) {
                    push_attrs(attrs);
                }
            }
        }
        Scope::Edge => {
            for src in graph.node_names() {
                for dst in graph.out_neighbors(src).unwrap_or_default() {
                    if let Ok(attrs) = graph.edge_attrs(src, dst) {
                        push_attrs(attrs);
                    }
                }
            }
        }
    }

    seen.into_iter()
        .enumerate()
        .map(|(i, (name, ty))| (format!("k{i}"), name, ty))
        .collect()
}
