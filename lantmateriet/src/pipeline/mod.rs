//! Extraction of a layered source into dissolved per-category files.

mod extract;
mod job;
mod naming;
mod plan;
mod runner;
mod source;
mod sweden;

pub use extract::*;
pub use job::*;
pub use naming::*;
pub use plan::*;
pub use runner::*;
pub use source::*;
pub use sweden::*;
