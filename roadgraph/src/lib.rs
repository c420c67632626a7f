//! Weighted road graphs for external pathfinding solvers.
//!
//! Nodes are registered with their geographic position, roads are added as sequences of node
//! references, and the result is renumbered densely and written in a plain text format.

pub mod builder;
pub mod error;
pub mod registry;
pub mod reindex;
pub mod road_class;
pub mod writer;

#[cfg(test)]
mod test_utils;

pub use builder::{BuildStats, BuilderOptions, Edge, RoadGraphBuilder, WayIssue};
pub use error::GraphError;
pub use registry::{Coord, GeoNode, NodeRegistry, DEFAULT_SCALE};
pub use reindex::{reindex, DenseEdge, DenseGraph};
pub use road_class::{RoadClass, WeightTable};
pub use writer::{output_path, save_graph, write_graph};
