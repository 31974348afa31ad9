pub mod descriptor;
pub mod file_parser;
pub mod loader;
pub mod obj;
pub mod parametric;
pub mod primitives;
pub mod svg;
pub mod text;

pub use descriptor::ShapeDescriptor;
pub use file_parser::{load_file, parse_file, parse_file_typed, FileType};
pub use loader::{build_now, spawn_build};
pub use obj::parse_obj;
pub use svg::parse_svg;
pub use text::{parse_text, TextConfig};
