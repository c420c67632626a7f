use crate::builder::{BuilderOptions, RoadGraphBuilder};

/// Builder with nine nodes "0".."8" laid out as a 3x3 grid with `step` between neighbours:
///
/// ```text
/// 6 7 8
/// 3 4 5
/// 0 1 2
/// ```
///
/// The coordinate scale is 1 so distances are in the same units as `step`.
pub fn grid_builder(step: f64) -> RoadGraphBuilder {
  let mut builder = RoadGraphBuilder::new(BuilderOptions {
    scale: 1.0,
    ..BuilderOptions::default()
  });
  for i in 0..9 {
    let (col, row) = (i % 3, i / 3);
    builder.add_node(&i.to_string(), col as f64 * step, row as f64 * step);
  }
  builder
}

/// Splits the text written by `write_graph` into node and edge lines.
pub fn parse_output(text: &str) -> (usize, Vec<(f64, f64)>, Vec<(usize, usize, f64)>) {
  let mut lines = text.lines();
  let count: usize = lines.next().unwrap().parse().unwrap();

  let nodes = lines
    .by_ref()
    .take(count)
    .map(|line| {
      let mut it = line.split(' ').map(|v| v.parse::<f64>().unwrap());
      (it.next().unwrap(), it.next().unwrap())
    })
    .collect();

  let edges = lines
    .map(|line| {
      let parts: Vec<&str> = line.split(' ').collect();
      assert_eq!(parts.len(), 3, "unexpected edge line `{}`", line);
      (parts[0].parse().unwrap(), parts[1].parse().unwrap(), parts[2].parse().unwrap())
    })
    .collect();

  (count, nodes, edges)
}
