pub mod extract;
pub mod model;

pub use extract::{extract_first_json_object, find_first_json_object};
pub use model::*;
