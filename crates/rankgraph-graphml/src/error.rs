use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GraphMlError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported format: {path} (extension does not match file contents)")]
    UnsupportedFormat { path: PathBuf },

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("malformed GraphML: {reason}")]
    MalformedGraphML { reason: String },

    #[error(transparent)]
    Core(#[from] rankgraph_core::CoreError),
}

pub type Result<T> = std::result::Result<T, GraphMlError>;
