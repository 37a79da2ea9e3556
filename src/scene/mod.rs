mod graph;
mod shape;
mod svg_path;
mod types;

pub use graph::*;
pub use shape::*;
pub use svg_path::{parse_svg_path, path_bounds, PathCommand};
pub use types::*;
