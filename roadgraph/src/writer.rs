//! Text layout read by the solvers:
//!
//! ```text
//! <node_count>
//! <x> <y>          one line per node, in dense id order
//! <n0> <n1> <w>    one line per edge, in discovery order
//! ```
//!
//! Every floating point value is written with three decimals.

use crate::error::GraphError;
use crate::reindex::DenseGraph;
use crate::road_class::WeightTable;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub fn write_graph<W: Write>(graph: &DenseGraph, mut out: W) -> io::Result<()> {
  writeln!(out, "{}", graph.number_of_nodes())?;
  for coord in &graph.coords {
    writeln!(out, "{:.3} {:.3}", coord.x, coord.y)?;
  }
  for edge in &graph.edges {
    writeln!(out, "{} {} {:.3}", edge.n0, edge.n1, edge.weight)?;
  }
  out.flush()
}

pub fn save_graph(graph: &DenseGraph, path: &Path) -> Result<(), GraphError> {
  let write_error = |source| GraphError::Write {
    path: path.to_path_buf(),
    source,
  };
  let file = File::create(path).map_err(write_error)?;
  write_graph(graph, BufWriter::new(file)).map_err(write_error)
}

/// `dir/map.osm` becomes `dir/map_1-2-3-4-5-5-5.txt` for the default weight table.
pub fn output_path(input: &Path, weights: &WeightTable) -> PathBuf {
  let stem = input.with_extension("");
  let mut name = stem.into_os_string();
  name.push(format!("_{}.txt", weights.scheme()));
  PathBuf::from(name)
}
