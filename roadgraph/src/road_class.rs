//! Road classes accepted into the graph and the weight multiplier of each class.

use crate::error::GraphError;
use std::fmt;
use std::str::FromStr;

/// Value of the `highway` tag of an accepted road.
///
/// The set is closed: ways tagged with anything else never make it into the graph.
/// Variants are declared in table order, from the highest to the lowest priority road.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoadClass {
  Motorway,
  Trunk,
  Primary,
  Secondary,
  Tertiary,
  Unclassified,
  Residential,
}

impl RoadClass {
  pub const ALL: [RoadClass; 7] = [
    RoadClass::Motorway,
    RoadClass::Trunk,
    RoadClass::Primary,
    RoadClass::Secondary,
    RoadClass::Tertiary,
    RoadClass::Unclassified,
    RoadClass::Residential,
  ];

  /// Maps a `highway` tag value to a road class. Link roads (`motorway_link`, ...) are not accepted.
  pub fn from_highway(value: &str) -> Option<RoadClass> {
    match value {
      "motorway" => Some(RoadClass::Motorway),
      "trunk" => Some(RoadClass::Trunk),
      "primary" => Some(RoadClass::Primary),
      "secondary" => Some(RoadClass::Secondary),
      "tertiary" => Some(RoadClass::Tertiary),
      "unclassified" => Some(RoadClass::Unclassified),
      "residential" => Some(RoadClass::Residential),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      RoadClass::Motorway => "motorway",
      RoadClass::Trunk => "trunk",
      RoadClass::Primary => "primary",
      RoadClass::Secondary => "secondary",
      RoadClass::Tertiary => "tertiary",
      RoadClass::Unclassified => "unclassified",
      RoadClass::Residential => "residential",
    }
  }

  fn index(self) -> usize {
    self as usize
  }
}

impl fmt::Display for RoadClass {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Multiplier applied to the euclidean length of an edge, per road class. Lower is better.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightTable {
  multipliers: [u32; 7],
}

impl Default for WeightTable {
  fn default() -> Self {
    WeightTable {
      multipliers: [1, 2, 3, 4, 5, 5, 5],
    }
  }
}

impl WeightTable {
  pub fn multiplier(&self, class: RoadClass) -> u32 {
    self.multipliers[class.index()]
  }

  pub fn set_multiplier(&mut self, class: RoadClass, multiplier: u32) -> Result<(), GraphError> {
    if multiplier == 0 {
      return Err(GraphError::InvalidWeight(format!("{}={}", class, multiplier)));
    }
    self.multipliers[class.index()] = multiplier;
    Ok(())
  }

  /// Applies an override written as `<road class>=<multiplier>`, e.g. `residential=3`.
  pub fn apply_override(&mut self, spec: &str) -> Result<(), GraphError> {
    let invalid = || GraphError::InvalidWeight(spec.to_string());

    let mut parts = spec.splitn(2, '=');
    let class = parts
      .next()
      .and_then(|name| RoadClass::from_highway(name.trim()))
      .ok_or_else(invalid)?;
    let multiplier = parts
      .next()
      .and_then(|value| u32::from_str(value.trim()).ok())
      .ok_or_else(invalid)?;

    self.set_multiplier(class, multiplier).map_err(|_| invalid())
  }

  /// Multipliers in table order joined with `-`, e.g. `1-2-3-4-5-5-5`.
  /// It is embedded into the output file name to tell graphs built with different schemes apart.
  pub fn scheme(&self) -> String {
    self
      .multipliers
      .iter()
      .map(|m| m.to_string())
      .collect::<Vec<_>>()
      .join("-")
  }
}
