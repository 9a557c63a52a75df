pub mod core;
pub mod parser;
pub mod pins;
pub mod writer;
