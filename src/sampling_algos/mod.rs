pub mod rrt;

pub use rrt::{Map, Rrt, RrtConfig};
