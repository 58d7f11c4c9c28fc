//! GraphML read/write support for `rankgraph_core::Graph`, as a collaborator crate that only
//! ever calls the core's public API — it has no access to the adjacency store's internals.
//!
//! Plain `.graphml` is read and written as UTF-8 text; `.graphmlz` (gzip-compressed GraphML) is
//! supported through [`reader::from_gzip_bytes`] and [`writer::to_gzip_bytes`].

pub mod error;
pub mod reader;
pub mod schema;
pub mod writer;

pub use error::{GraphMlError, Result};

use rankgraph_core::Graph;
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Reads a graph from `path`, choosing plain or gzip decoding by file extension
/// (`.graphmlz` is gzip, anything else is treated as plain XML). The extension is
/// cross-checked against the gzip magic bytes at the start of the file; a mismatch is a user
/// error (`UnsupportedFormat`), not silently reinterpreted.
pub fn read_path(path: &Path) -> Result<Graph> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GraphMlError::FileNotFound(path.to_path_buf())
        } else {
            GraphMlError::Io(e)
        }
    })?;

    let wants_gzip = path.extension().is_some_and(|ext| ext == "graphmlz");
    let looks_gzip = bytes.len() >= 2 && bytes[..2] == GZIP_MAGIC;
    if wants_gzip != looks_gzip {
        return Err(GraphMlError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    if wants_gzip {
        reader::from_gzip_bytes(&bytes)
    } else {
        let text = String::from_utf8(bytes).map_err(|e| GraphMlError::MalformedGraphML {
            reason: format!("file is not valid UTF-8: {e}"),
        })?;
        reader::from_str(&text)
    }
}

/// Writes `graph` to `path`, choosing plain or gzip encoding by file extension.
pub fn write_path(graph: &Graph, path: &Path) -> Result<()> {
    if path.extension().is_some_and(|ext| ext == "graphmlz") {
        let bytes = writer::to_gzip_bytes(graph)?;
        std::fs::write(path, bytes)?;
    } else {
        let text = writer::to_string(graph)?;
        std::fs::write(path, text)?;
    }
    Ok(())
}
