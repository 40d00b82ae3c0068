#[allow(unused_imports)]
use crate::core::prelude::*;

pub fn assert_ord<T: PartialOrd>(_: &T) {}
pub fn assert_partial_eq<T: PartialEq<U>, U>(_: &T, _: &U) {}
pub fn assert_type<T>(_: &T) {}

#[allow(unused_macros)]
#[macro_export]
macro_rules! current_location {
    () => {
        format!("{}:{}", file!(), line!())
    };
}
#[allow(unused_imports)]
pub use current_location;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check {
    ($cond:expr) => {{
        let cond = $cond;
        $crate::util::assert::assert_type::<bool>(&cond);
        if !cond {
            panic!(
                "check failed: {}: {}",
                $crate::util::assert::current_location!(),
                stringify!($cond),
            );
        }
    }};
    ($cond:expr, $msg:expr) => {{
        let cond = $cond;
        $crate::util::assert::assert_type::<bool>(&cond);
        if !cond {
            panic!(
                "check failed: {}: {}: {}",
                $crate::util::assert::current_location!(),
                stringify!($cond),
                $msg,
            );
        }
    }};
}
#[allow(unused_imports)]
pub use check;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check_false {
    ($cond:expr) => {{
        let cond = $cond;
        $crate::util::assert::assert_type::<bool>(&cond);
        if cond {
            panic!(
                "check failed: {}: !{}",
                $crate::util::assert::current_location!(),
                stringify!($cond),
            );
        }
    }};
}
#[allow(unused_imports)]
pub use check_false;

#[doc(hidden)]
#[macro_export]
macro_rules! check_cmp {
    ($lhs:expr, $op:tt, $rhs:expr) => {{
        match (&$lhs, &$rhs) {
            (lhs, rhs) => {
                $crate::util::assert::assert_ord(lhs);
                if !(*lhs $op *rhs) {
                    panic!(
                        "check failed: {}: {} {} {}: {:?} vs. {:?}",
                        $crate::util::assert::current_location!(),
                        stringify!($lhs),
                        stringify!($op),
                        stringify!($rhs),
                        lhs,
                        rhs
                    );
                }
            }
        }
    }};
}

#[allow(unused_macros)]
#[macro_export]
macro_rules! check_lt {
    ($lhs:expr, $rhs:expr) => {
        $crate::check_cmp!($lhs, <, $rhs)
    };
}
#[allow(unused_imports)]
pub use check_lt;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check_gt {
    ($lhs:expr, $rhs:expr) => {
        $crate::check_cmp!($lhs, >, $rhs)
    };
}
#[allow(unused_imports)]
pub use check_gt;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check_le {
    ($lhs:expr, $rhs:expr) => {
        $crate::check_cmp!($lhs, <=, $rhs)
    };
}
#[allow(unused_imports)]
pub use check_le;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check_ge {
    ($lhs:expr, $rhs:expr) => {
        $crate::check_cmp!($lhs, >=, $rhs)
    };
}
#[allow(unused_imports)]
pub use check_ge;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check_eq {
    ($lhs:expr, $rhs:expr) => {{
        match (&$lhs, &$rhs) {
            (lhs, rhs) => {
                $crate::util::assert::assert_partial_eq(lhs, rhs);
                if !(*lhs == *rhs) {
                    panic!(
                        "check failed: {}: {} == {}: {:?} vs. {:?}",
                        $crate::util::assert::current_location!(),
                        stringify!($lhs),
                        stringify!($rhs),
                        lhs,
                        rhs
                    );
                }
            }
        }
    }};
}
#[allow(unused_imports)]
pub use check_eq;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check_ne {
    ($lhs:expr, $rhs:expr) => {{
        match (&$lhs, &$rhs) {
            (lhs, rhs) => {
                $crate::util::assert::assert_partial_eq(lhs, rhs);
                if !(*lhs != *rhs) {
                    panic!(
                        "check failed: {}: {} != {}: {:?} vs. {:?}",
                        $crate::util::assert::current_location!(),
                        stringify!($lhs),
                        stringify!($rhs),
                        lhs,
                        rhs
                    );
                }
            }
        }
    }};
}
#[allow(unused_imports)]
pub use check_ne;

/// Checks two vectors are close under the default [`Tolerance`](crate::util::linalg::Tolerance).
#[allow(unused_macros)]
#[macro_export]
macro_rules! check_almost_eq {
    ($lhs:expr, $rhs:expr) => {{
        match ($lhs, $rhs) {
            (lhs, rhs) => {
                if !$crate::util::linalg::VectorType::is_close(&lhs, rhs) {
                    panic!(
                        "check failed: {}: {} ~= {}: {:?} vs. {:?}",
                        $crate::util::assert::current_location!(),
                        stringify!($lhs),
                        stringify!($rhs),
                        lhs,
                        rhs
                    );
                }
            }
        }
    }};
}
#[allow(unused_imports)]
pub use check_almost_eq;
