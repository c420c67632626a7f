use crate::builder::Edge;
use crate::error::GraphError;
use crate::registry::{Coord, NodeRegistry, Slot};
use std::convert::TryFrom;

/// Dense node id, the rank of a retained node in registration order.
pub type Idx = u32;

#[derive(Clone, Debug, PartialEq)]
pub struct DenseEdge {
  pub n0: Idx,
  pub n1: Idx,
  pub weight: f64,
}

/// Graph in its output form: only retained nodes, with ids in `[0, number_of_nodes)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DenseGraph {
  pub coords: Vec<Coord>,
  pub edges: Vec<DenseEdge>,
}

impl DenseGraph {
  pub fn number_of_nodes(&self) -> usize {
    self.coords.len()
  }

  pub fn number_of_edges(&self) -> usize {
    self.edges.len()
  }
}

/// Keeps the nodes marked as used and renumbers them densely, preserving registration order.
/// Edges keep their discovery order.
pub fn reindex(registry: &NodeRegistry, edges: &[Edge]) -> Result<DenseGraph, GraphError> {
  let mut dense_ids: Vec<Option<Idx>> = Vec::with_capacity(registry.len());
  let mut coords = Vec::new();

  for node in registry.iter() {
    if node.used {
      dense_ids.push(Some(dense_index(coords.len())?));
      coords.push(node.coord);
    } else {
      dense_ids.push(None);
    }
  }

  let dense_id = |slot: Slot| {
    dense_ids
      .get(slot)
      .copied()
      .flatten()
      .ok_or_else(|| GraphError::InternalConsistency {
        node_id: registry
          .get(slot)
          .map(|node| node.original_id.clone())
          .unwrap_or_else(|| format!("<slot {}>", slot)),
      })
  };

  let edges = edges
    .iter()
    .map(|edge| {
      Ok(DenseEdge {
        n0: dense_id(edge.n0)?,
        n1: dense_id(edge.n1)?,
        weight: edge.weight,
      })
    })
    .collect::<Result<Vec<_>, GraphError>>()?;

  Ok(DenseGraph { coords, edges })
}

fn dense_index(rank: usize) -> Result<Idx, GraphError> {
  Idx::try_from(rank).map_err(|_| GraphError::TooManyNodes(rank))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::road_class::RoadClass;
  use crate::test_utils::*;
  use std::collections::HashSet;

  #[test]
  fn test_unused_nodes_are_dropped() {
    let mut builder = grid_builder(1.0);
    builder.add_way("w", RoadClass::Primary, &["8", "5", "2"]);

    let graph = reindex(builder.registry(), builder.edges()).unwrap();

    // Registration order, not way order: "2" is registered before "5" and "8"
    assert_eq!(
      graph.coords,
      vec![Coord { x: 2.0, y: 0.0 }, Coord { x: 2.0, y: 1.0 }, Coord { x: 2.0, y: 2.0 }]
    );
    let pairs: Vec<(Idx, Idx)> = graph.edges.iter().map(|e| (e.n0, e.n1)).collect();
    assert_eq!(pairs, vec![(2, 1), (1, 0)]);
  }

  #[test]
  fn test_dense_ids_are_contiguous() {
    let mut builder = grid_builder(1.0);
    builder.add_way("a", RoadClass::Residential, &["0", "4", "8"]);
    builder.add_way("b", RoadClass::Residential, &["6", "4", "2"]);
    builder.add_way("c", RoadClass::Residential, &["7"]);

    let graph = reindex(builder.registry(), builder.edges()).unwrap();
    assert_eq!(graph.number_of_nodes(), 5);
    assert_eq!(graph.number_of_edges(), 4);

    let touched: HashSet<Idx> = graph.edges.iter().flat_map(|e| vec![e.n0, e.n1]).collect();
    let expected: HashSet<Idx> = (0..graph.number_of_nodes() as Idx).collect();
    assert_eq!(touched, expected);
  }

  #[test]
  fn test_empty_graph() {
    let builder = grid_builder(1.0);
    let graph = reindex(builder.registry(), builder.edges()).unwrap();
    assert_eq!(graph, DenseGraph::default());
  }

  #[test]
  fn test_edge_to_unused_node_is_an_error() {
    let builder = grid_builder(1.0);
    let bogus = vec![Edge {
      n0: 0,
      n1: 3,
      weight: 1.0,
    }];

    match reindex(builder.registry(), &bogus) {
      Err(GraphError::InternalConsistency { node_id }) => assert_eq!(node_id, "0"),
      _ => panic!("expected a consistency error"),
    }
  }

  #[test]
  fn test_edge_outside_registry_is_an_error() {
    let mut builder = grid_builder(1.0);
    builder.add_way("w", RoadClass::Primary, &["0", "1"]);
    let bogus = vec![Edge {
      n0: 0,
      n1: 42,
      weight: 1.0,
    }];

    match reindex(builder.registry(), &bogus) {
      Err(GraphError::InternalConsistency { node_id }) => assert_eq!(node_id, "<slot 42>"),
      _ => panic!("expected a consistency error"),
    }
  }

  #[test]
  fn test_dense_index_limit() {
    assert_eq!(dense_index(0).unwrap(), 0);
    assert_eq!(dense_index(Idx::MAX as usize).unwrap(), Idx::MAX);
    #[cfg(target_pointer_width = "64")]
    assert!(matches!(
      dense_index(Idx::MAX as usize + 1),
      Err(GraphError::TooManyNodes(_))
    ));
  }
}
