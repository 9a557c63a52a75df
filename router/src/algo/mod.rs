pub mod closest;
pub mod mst;
pub mod path;
pub mod steiner;
