use roadgraph::GraphError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("malformed OSM XML at byte {position}: {source}")]
    Parse {
        position: usize,
        source: quick_xml::Error,
    },

    // Well-formed XML which is not a usable OSM document
    #[error("malformed OSM XML at byte {position}: {message}")]
    Malformed { position: usize, message: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}
