mod error;
mod graph_builder;
pub mod osm;

pub use error::ConvertError;
pub use graph_builder::*;
