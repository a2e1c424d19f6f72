mod tsv;

pub use tsv::*;
