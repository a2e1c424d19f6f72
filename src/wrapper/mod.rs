pub mod error;
#[macro_use]
pub mod macros;
