// Lets `#[derive(VectorType)]` expand to `::planar::...` paths inside this crate too.
extern crate self as planar;

pub mod core;
pub mod util;
