pub mod active;

pub use active::ActiveSet;
