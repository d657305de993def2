pub mod size;
pub mod volume;

pub use volume::*;
