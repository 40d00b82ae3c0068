#[allow(unused_imports)]
pub use itertools::Itertools;
#[allow(unused_imports)]
pub use num_traits;

#[allow(unused_imports)]
pub use anyhow::{anyhow, bail, Context};
#[allow(unused_imports)]
pub use tracing::{debug, error, info, warn};

#[allow(unused_imports)]
pub use crate::{
    core::{
        config::*,
        error::{Axis, Result, VectorError},
        ops::{MoreSpecific, OpResult, Operand, Product},
    },
    util::{
        assert::*,
        coerce::{Arguments, Scalar, VectorLike},
        linalg,
        linalg::{Tolerance, Vector2, VectorType},
    },
};
#[allow(unused_imports)]
pub use planar_derive::VectorType;
