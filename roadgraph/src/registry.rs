use geo::Coordinate;
use std::collections::HashMap;

/// Planar coordinate: longitude and latitude multiplied by the registry scale.
pub type Coord = Coordinate<f64>;

/// Scale used by the original solvers' graphs: one unit is a thousandth of a degree.
pub const DEFAULT_SCALE: f64 = 1000.0;

/// Position of a node in the registry. Stable for the lifetime of the registry.
pub type Slot = usize;

/// A declared OpenStreetMap node.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoNode {
  pub original_id: String,
  pub coord: Coord,
  // Set once the node becomes an endpoint of an accepted edge
  pub used: bool,
}

/// All declared nodes, in the order they were first registered.
pub struct NodeRegistry {
  nodes: Vec<GeoNode>,
  slots: HashMap<String, Slot>,
  scale: f64,
}

impl Default for NodeRegistry {
  fn default() -> Self {
    NodeRegistry::new(DEFAULT_SCALE)
  }
}

impl NodeRegistry {
  pub fn new(scale: f64) -> Self {
    NodeRegistry {
      nodes: Vec::new(),
      slots: HashMap::new(),
      scale,
    }
  }

  /// Registers a node unless `id` is already known. The first declaration wins.
  ///
  /// Returns `true` if the node was inserted.
  pub fn register(&mut self, id: &str, lon: f64, lat: f64) -> bool {
    if self.slots.contains_key(id) {
      return false;
    }
    let slot = self.nodes.len();
    self.nodes.push(GeoNode {
      original_id: id.to_string(),
      coord: Coord {
        x: lon * self.scale,
        y: lat * self.scale,
      },
      used: false,
    });
    self.slots.insert(id.to_string(), slot);
    true
  }

  pub fn lookup(&self, id: &str) -> Option<&GeoNode> {
    self.slot(id).map(|slot| &self.nodes[slot])
  }

  pub fn slot(&self, id: &str) -> Option<Slot> {
    self.slots.get(id).copied()
  }

  pub fn node(&self, slot: Slot) -> &GeoNode {
    &self.nodes[slot]
  }

  pub fn get(&self, slot: Slot) -> Option<&GeoNode> {
    self.nodes.get(slot)
  }

  pub fn mark_used(&mut self, slot: Slot) {
    self.nodes[slot].used = true;
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub fn used_count(&self) -> usize {
    self.nodes.iter().filter(|n| n.used).count()
  }

  /// Nodes in registration order.
  pub fn iter(&self) -> std::slice::Iter<'_, GeoNode> {
    self.nodes.iter()
  }
}
