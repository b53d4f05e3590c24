mod detail_level;
mod layer;
mod main;

pub use detail_level::*;
pub use layer::*;
pub use main::*;
