//! Tweet records that move losslessly between the streaming API's JSON, a
//! TSV row, and a key/value dict.

#[macro_use]
mod wrapper;
pub use wrapper::*;

pub mod domain;
pub mod infra;
pub mod initializer;
pub mod repository;

pub use domain::model::{FieldAlias, GeomSource, Point, Tweet, TweetDict, TweetID};
pub use domain::service::{classify, FeedMessage};
