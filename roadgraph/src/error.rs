use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
  /// An accepted edge points at a node that was not retained. Means a bug in the builder, not bad input.
  #[error("edge endpoint `{node_id}` has no dense id")]
  InternalConsistency { node_id: String },

  #[error("{0} retained nodes do not fit into 32-bit node ids")]
  TooManyNodes(usize),

  #[error("invalid weight override `{0}`, expected <road class>=<positive integer>")]
  InvalidWeight(String),

  #[error("invalid coordinate scale {0}, expected a positive finite number")]
  InvalidScale(f64),

  #[error("failed to write graph to {}: {source}", .path.display())]
  Write { path: PathBuf, source: io::Error },
}
