pub mod config;
pub mod error;
pub mod ops;
pub mod prelude;
