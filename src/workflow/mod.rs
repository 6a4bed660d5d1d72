pub mod definition;
pub mod patch;

pub use definition::*;
pub use patch::{InjectedNodes, patch, patch_with_names};
