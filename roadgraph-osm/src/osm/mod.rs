pub mod categorize;
pub mod models;
pub mod reader;

pub use categorize::*;
pub use models::*;
pub use reader::*;
