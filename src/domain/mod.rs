#[cfg(test)]
pub(crate) mod fixtures;
pub mod interface;
pub mod model;
pub mod service;
