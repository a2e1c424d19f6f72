pub mod envelope;
mod tokenizer;
mod tweet_service;

pub use envelope::{classify, classify_bytes, FeedMessage};
pub use tokenizer::*;
pub use tweet_service::*;
