mod feed_error;
pub mod geo;
mod identity;
mod notice;
pub mod text;
pub mod timestamp;
pub mod tokens;
mod tweet;

pub use feed_error::*;
pub use geo::{GeoError, GeomSource, Point, Srid, WGS84_SRID};
pub use identity::*;
pub use notice::*;
pub use text::{normalize, normalize_bytes};
pub use tokens::{FieldAlias, TokenFieldError};
pub use tweet::*;
