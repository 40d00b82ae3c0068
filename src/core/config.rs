pub const DEFAULT_ABS_TOL: f64 = 1e-9;
pub const DEFAULT_REL_TOL: f64 = 1e-9;
/// Relative tolerance when checking that a reflection normal has unit length.
pub const NORMAL_REL_TOL: f64 = 1e-9;
