pub mod dissolve;
pub mod extract;
