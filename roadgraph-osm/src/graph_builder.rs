use crate::error::ConvertError;
use crate::osm::{road_class, OsmElement, OsmXmlReader};
use log::info;
use roadgraph::{
  output_path, save_graph, BuildStats, BuilderOptions, DenseGraph, RoadGraphBuilder, WeightTable, DEFAULT_SCALE,
};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub struct ConvertOptions {
  pub weights: WeightTable,
  pub scale: f64,
  pub drop_self_loops: bool,
  // Written next to the input with the weight scheme in its name when not set
  pub output: Option<PathBuf>,
}

impl Default for ConvertOptions {
  fn default() -> Self {
    ConvertOptions {
      weights: WeightTable::default(),
      scale: DEFAULT_SCALE,
      drop_self_loops: false,
      output: None,
    }
  }
}

impl ConvertOptions {
  fn builder_options(&self) -> BuilderOptions {
    BuilderOptions {
      weights: self.weights.clone(),
      scale: self.scale,
      drop_self_loops: self.drop_self_loops,
    }
  }
}

/// Outcome of a successful conversion.
#[derive(Debug)]
pub struct ConversionReport {
  pub stats: BuildStats,
  pub retained_nodes: usize,
  pub edges_written: usize,
  pub output: PathBuf,
}

/// Feeds every element of the document into a fresh builder and renumbers the result.
pub fn build_graph<R: BufRead>(
  reader: OsmXmlReader<R>,
  options: BuilderOptions,
) -> Result<(DenseGraph, BuildStats), ConvertError> {
  options.validate()?;
  let mut builder = RoadGraphBuilder::new(options);

  {
    let t = Instant::now();
    for element in reader {
      match element? {
        OsmElement::Node(node) => builder.add_node(&node.id, node.lon, node.lat),
        OsmElement::Way(way) => match road_class(&way) {
          Some(class) => {
            builder.add_way(&way.id, class, &way.refs);
          }
          None => builder.skip_way(),
        },
      }
    }
    info!("Decoded xml {:.2}s", t.elapsed().as_secs_f32());
  }

  let t = Instant::now();
  let result = builder.finish()?;
  info!("Renumbered nodes {:.2}s", t.elapsed().as_secs_f32());
  Ok(result)
}

pub fn import_osm_xml(input: &Path, options: BuilderOptions) -> Result<(DenseGraph, BuildStats), ConvertError> {
  build_graph(OsmXmlReader::from_path(input)?, options)
}

/// Converts the OSM XML file at `input` into a text graph and returns where it was written.
pub fn convert_osm_xml(input: &Path, options: &ConvertOptions) -> Result<ConversionReport, ConvertError> {
  let output = options
    .output
    .clone()
    .unwrap_or_else(|| output_path(input, &options.weights));

  let (graph, stats) = import_osm_xml(input, options.builder_options())?;
  info!(
    "total nodes in xml {}, created graph with {} nodes and {} edges, writing to {}",
    stats.unique_nodes,
    graph.number_of_nodes(),
    graph.number_of_edges(),
    output.display()
  );

  let t = Instant::now();
  save_graph(&graph, &output)?;
  info!("Wrote graph {:.2}s", t.elapsed().as_secs_f32());

  Ok(ConversionReport {
    stats,
    retained_nodes: graph.number_of_nodes(),
    edges_written: graph.number_of_edges(),
    output,
  })
}
