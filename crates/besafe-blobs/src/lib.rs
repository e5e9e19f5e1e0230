pub mod generator;
pub mod store;
