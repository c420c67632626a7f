use crate::error::GraphError;
use crate::registry::{Coord, NodeRegistry, Slot, DEFAULT_SCALE};
use crate::reindex::{reindex, DenseGraph};
use crate::road_class::{RoadClass, WeightTable};
use geo::algorithm::euclidean_distance::EuclideanDistance;
use geo::Point;
use log::{debug, error, warn};
use std::fmt;

/// Edge between two registered nodes, oriented as the nodes appear in the way.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
  pub n0: Slot,
  pub n1: Slot,
  pub weight: f64,
}

/// A problem found in a single way. None of them stop the conversion.
#[derive(Clone, Debug, PartialEq)]
pub enum WayIssue {
  /// The way has fewer than two node references; it is skipped.
  DegenerateWay { way_id: String, refs: usize },
  /// The way references an undeclared node; only the affected pair is skipped.
  DanglingReference { way_id: String, node_id: String },
}

impl fmt::Display for WayIssue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      WayIssue::DegenerateWay { way_id, refs } => {
        write!(f, "way {} has {} node reference(s), skipping", way_id, refs)
      }
      WayIssue::DanglingReference { way_id, node_id } => {
        write!(f, "way {} references unknown node {}", way_id, node_id)
      }
    }
  }
}

/// Counters collected while the graph is built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildStats {
  // Node declarations, duplicates included
  pub nodes_seen: usize,
  // Distinct node ids in the registry
  pub unique_nodes: usize,
  pub ways_seen: usize,
  pub roads_accepted: usize,
  pub degenerate_ways: usize,
  pub dangling_refs: usize,
  pub self_loops: usize,
}

pub struct BuilderOptions {
  pub weights: WeightTable,
  pub scale: f64,
  pub drop_self_loops: bool,
}

impl Default for BuilderOptions {
  fn default() -> Self {
    BuilderOptions {
      weights: WeightTable::default(),
      scale: DEFAULT_SCALE,
      drop_self_loops: false,
    }
  }
}

impl BuilderOptions {
  pub fn validate(&self) -> Result<(), GraphError> {
    if !self.scale.is_finite() || self.scale <= 0.0 {
      return Err(GraphError::InvalidScale(self.scale));
    }
    Ok(())
  }
}

/// Accumulates nodes and road edges of a single conversion run.
///
/// Nodes must be added before the ways referencing them, which is the order of OSM extracts.
pub struct RoadGraphBuilder {
  registry: NodeRegistry,
  edges: Vec<Edge>,
  weights: WeightTable,
  drop_self_loops: bool,
  stats: BuildStats,
}

impl Default for RoadGraphBuilder {
  fn default() -> Self {
    RoadGraphBuilder::new(BuilderOptions::default())
  }
}

impl RoadGraphBuilder {
  pub fn new(options: BuilderOptions) -> Self {
    RoadGraphBuilder {
      registry: NodeRegistry::new(options.scale),
      edges: Vec::new(),
      weights: options.weights,
      drop_self_loops: options.drop_self_loops,
      stats: BuildStats::default(),
    }
  }

  pub fn add_node(&mut self, id: &str, lon: f64, lat: f64) {
    self.stats.nodes_seen += 1;
    if self.registry.register(id, lon, lat) {
      self.stats.unique_nodes += 1;
    } else {
      debug!("node {} declared twice, keeping the first declaration", id);
    }
  }

  /// Counts a way that was not recognized as a road.
  pub fn skip_way(&mut self) {
    self.stats.ways_seen += 1;
  }

  /// Turns every consecutive pair of `refs` into an edge weighted by the class multiplier.
  ///
  /// Returns the issues found in the way; they are logged and counted already.
  pub fn add_way<S: AsRef<str>>(&mut self, way_id: &str, class: RoadClass, refs: &[S]) -> Vec<WayIssue> {
    self.stats.ways_seen += 1;
    self.stats.roads_accepted += 1;

    let mut issues = Vec::new();
    if refs.len() < 2 {
      let issue = WayIssue::DegenerateWay {
        way_id: way_id.to_string(),
        refs: refs.len(),
      };
      warn!("{}", issue);
      self.stats.degenerate_ways += 1;
      issues.push(issue);
      return issues;
    }

    let multiplier = f64::from(self.weights.multiplier(class));
    let mut added = 0;
    for pair in refs.windows(2) {
      let (from, to) = (pair[0].as_ref(), pair[1].as_ref());
      let (n0, n1) = match (self.resolve(way_id, from, &mut issues), self.resolve(way_id, to, &mut issues)) {
        (Some(n0), Some(n1)) => (n0, n1),
        _ => continue,
      };

      if n0 == n1 {
        self.stats.self_loops += 1;
        if self.drop_self_loops {
          debug!("way {} repeats node {}, dropping self loop", way_id, from);
          continue;
        }
      }

      let weight = distance(&self.registry.node(n0).coord, &self.registry.node(n1).coord) * multiplier;
      self.edges.push(Edge { n0, n1, weight });
      self.registry.mark_used(n0);
      self.registry.mark_used(n1);
      added += 1;
    }
    debug!("way {} ({}) added {} edge(s)", way_id, class, added);
    issues
  }

  fn resolve(&mut self, way_id: &str, node_id: &str, issues: &mut Vec<WayIssue>) -> Option<Slot> {
    let slot = self.registry.slot(node_id);
    if slot.is_none() {
      let issue = WayIssue::DanglingReference {
        way_id: way_id.to_string(),
        node_id: node_id.to_string(),
      };
      error!("{}", issue);
      self.stats.dangling_refs += 1;
      issues.push(issue);
    }
    slot
  }

  pub fn registry(&self) -> &NodeRegistry {
    &self.registry
  }

  pub fn edges(&self) -> &[Edge] {
    &self.edges
  }

  pub fn stats(&self) -> &BuildStats {
    &self.stats
  }

  /// Drops unused nodes and renumbers the rest, see [`reindex`].
  pub fn finish(self) -> Result<(DenseGraph, BuildStats), GraphError> {
    let graph = reindex(&self.registry, &self.edges)?;
    Ok((graph, self.stats))
  }
}

/// Euclidean distance between scaled coordinates.
pub fn distance(from: &Coord, to: &Coord) -> f64 {
  Point::from(*from).euclidean_distance(&Point::from(*to))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::*;

  #[test]
  fn test_residential_pair() {
    let mut builder = RoadGraphBuilder::default();
    builder.add_node("A", 0.0, 0.0);
    builder.add_node("B", 0.001, 0.0);

    let issues = builder.add_way("w1", RoadClass::Residential, &["A", "B"]);
    assert!(issues.is_empty());

    let edges = builder.edges();
    assert_eq!(edges.len(), 1);
    assert_eq!((edges[0].n0, edges[0].n1), (0, 1));
    assert!((edges[0].weight - 5.0).abs() < 1e-9);
  }

  #[test]
  fn test_way_with_k_refs_gives_k_minus_one_edges() {
    let mut builder = grid_builder(1.0);
    builder.add_way("w", RoadClass::Motorway, &["0", "1", "2", "5", "8"]);

    assert_eq!(builder.edges().len(), 4);
    // Orientation follows the order of refs in the way
    let pairs: Vec<(Slot, Slot)> = builder.edges().iter().map(|e| (e.n0, e.n1)).collect();
    assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 5), (5, 8)]);
    for edge in builder.edges() {
      assert!((edge.weight - 1.0).abs() < 1e-9);
    }
  }

  #[test]
  fn test_weight_uses_class_multiplier() {
    let mut builder = grid_builder(1.0);
    builder.add_way("diagonal", RoadClass::Secondary, &["0", "4"]);

    let expected = 2f64.sqrt() * 4.0;
    assert!((builder.edges()[0].weight - expected).abs() < 1e-9);
  }

  #[test]
  fn test_degenerate_way() {
    let mut builder = grid_builder(1.0);
    let issues = builder.add_way("lonely", RoadClass::Primary, &["3"]);
    let empty: [&str; 0] = [];
    builder.add_way("empty", RoadClass::Primary, &empty);

    assert_eq!(
      issues,
      vec![WayIssue::DegenerateWay {
        way_id: "lonely".to_string(),
        refs: 1
      }]
    );
    assert!(builder.edges().is_empty());
    assert_eq!(builder.registry().used_count(), 0);
    assert_eq!(builder.stats().degenerate_ways, 2);
  }

  #[test]
  fn test_dangling_reference_skips_only_the_pair() {
    let mut builder = grid_builder(1.0);
    let issues = builder.add_way("w", RoadClass::Trunk, &["0", "1", "missing", "2", "5"]);

    // (1, missing) and (missing, 2) are dropped, (0, 1) and (2, 5) survive
    let pairs: Vec<(Slot, Slot)> = builder.edges().iter().map(|e| (e.n0, e.n1)).collect();
    assert_eq!(pairs, vec![(0, 1), (2, 5)]);
    assert_eq!(issues.len(), 2);
    assert_eq!(builder.stats().dangling_refs, 2);
  }

  #[test]
  fn test_self_loops() {
    let mut builder = grid_builder(1.0);
    builder.add_way("loop", RoadClass::Tertiary, &["4", "4", "5"]);
    assert_eq!(builder.edges().len(), 2);
    assert_eq!(builder.edges()[0].weight, 0.0);
    assert_eq!(builder.stats().self_loops, 1);

    let mut builder = RoadGraphBuilder::new(BuilderOptions {
      drop_self_loops: true,
      ..BuilderOptions::default()
    });
    builder.add_node("a", 0.0, 0.0);
    builder.add_node("b", 0.0, 0.001);
    builder.add_way("loop", RoadClass::Tertiary, &["a", "a", "b"]);
    assert_eq!(builder.edges().len(), 1);
    assert_eq!(builder.stats().self_loops, 1);
  }

  #[test]
  fn test_validate_options() {
    assert!(BuilderOptions::default().validate().is_ok());
    for &scale in &[0.0, -1.0, f64::NAN, f64::INFINITY] {
      let options = BuilderOptions {
        scale,
        ..BuilderOptions::default()
      };
      assert!(options.validate().is_err());
    }
  }

  #[test]
  fn test_stats() {
    let mut builder = grid_builder(1.0);
    builder.add_node("0", 5.0, 5.0);
    builder.skip_way();
    builder.add_way("w", RoadClass::Residential, &["0", "1"]);

    let stats = builder.stats();
    assert_eq!(stats.nodes_seen, 10);
    assert_eq!(stats.unique_nodes, 9);
    assert_eq!(stats.ways_seen, 2);
    assert_eq!(stats.roads_accepted, 1);
    assert_eq!(builder.registry().len(), 9);
    assert_eq!(builder.registry().used_count(), 2);
  }
}
