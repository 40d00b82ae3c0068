use std::collections::BTreeMap;

use crate::core::prelude::*;

/// Outcome of a binary operation whose right-hand side arrived in dynamic form.
///
/// [`OpResult::Unsupported`] is a soft failure: the operand could not be coerced, and the caller
/// is free to try the reflected operation (see [`OpResult::or_else`]) before giving up. Hard
/// failures are reported through [`Result`] instead.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OpResult<T> {
    Value(T),
    Unsupported,
}

impl<T> OpResult<T> {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, OpResult::Unsupported)
    }

    pub fn ok(self) -> Option<T> {
        match self {
            OpResult::Value(value) => Some(value),
            OpResult::Unsupported => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OpResult<U> {
        match self {
            OpResult::Value(value) => OpResult::Value(f(value)),
            OpResult::Unsupported => OpResult::Unsupported,
        }
    }

    /// Falls back to `reflected` if this operation was unsupported.
    ///
    /// # Examples
    ///
    /// ```
    /// use planar::core::prelude::*;
    /// let v = Vector2::new(1.0, 2.0);
    /// let sum = v
    ///     .try_add(VectorLike::Other("a string".to_string()))
    ///     .or_else(|| v.try_add((3.0, 4.0)));
    /// assert_eq!(sum, OpResult::Value(Vector2::new(4.0, 6.0)));
    /// ```
    pub fn or_else(self, reflected: impl FnOnce() -> OpResult<T>) -> OpResult<T> {
        match self {
            OpResult::Value(value) => OpResult::Value(value),
            OpResult::Unsupported => reflected(),
        }
    }

    /// Gives up on the operation, turning a soft failure into [`VectorError::Unsupported`].
    pub fn into_result(self, op: &'static str) -> Result<T> {
        match self {
            OpResult::Value(value) => Ok(value),
            OpResult::Unsupported => Err(VectorError::Unsupported(op)),
        }
    }
}

/// Right-hand side of a dynamic multiplication.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Number(f64),
    Vector(VectorLike),
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Number(value)
    }
}
impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Number(f64::from(value))
    }
}
impl From<VectorLike> for Operand {
    fn from(value: VectorLike) -> Self {
        Operand::Vector(value)
    }
}
impl<T: VectorType> From<T> for Operand {
    fn from(value: T) -> Self {
        Operand::Vector(VectorLike::from(value))
    }
}

/// What multiplying a vector produced: a scaled vector for a number, a dot product otherwise.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Product<T> {
    Scaled(T),
    Dot(f64),
}

/// Picks the type that materializes the result of combining `Self` with `Rhs`.
///
/// Derived vector types resolve to themselves against [`Vector2`] and against their ancestors, in
/// either operand order. Unrelated types are related explicitly with
/// [`vector_specificity!`](crate::vector_specificity).
///
/// Operands that are not vector types (pairs, sequences, mappings, JSON) carry no type of their
/// own, so the vector operand wins.
pub trait MoreSpecific<Rhs> {
    type Output: VectorType;
}

impl MoreSpecific<Vector2> for Vector2 {
    type Output = Vector2;
}
impl<T: VectorType, A, B> MoreSpecific<(A, B)> for T {
    type Output = T;
}
impl<T: VectorType, S, const N: usize> MoreSpecific<[S; N]> for T {
    type Output = T;
}
impl<T: VectorType, S> MoreSpecific<Vec<S>> for T {
    type Output = T;
}
impl<T: VectorType, K, S> MoreSpecific<BTreeMap<K, S>> for T {
    type Output = T;
}
impl<T: VectorType> MoreSpecific<VectorLike> for T {
    type Output = T;
}
impl<T: VectorType> MoreSpecific<serde_json::Value> for T {
    type Output = T;
}
impl<T: VectorType> MoreSpecific<&serde_json::Value> for T {
    type Output = T;
}

#[doc(hidden)]
pub fn add_as<L, R>(lhs: L, rhs: R) -> <L as MoreSpecific<R>>::Output
where
    L: MoreSpecific<R> + Into<Vector2>,
    R: Into<Vector2>,
{
    let (lhs, rhs): (Vector2, Vector2) = (lhs.into(), rhs.into());
    <L::Output as VectorType>::from_coords(lhs.x() + rhs.x(), lhs.y() + rhs.y())
}

#[doc(hidden)]
pub fn sub_as<L, R>(lhs: L, rhs: R) -> <L as MoreSpecific<R>>::Output
where
    L: MoreSpecific<R> + Into<Vector2>,
    R: Into<Vector2>,
{
    let (lhs, rhs): (Vector2, Vector2) = (lhs.into(), rhs.into());
    <L::Output as VectorType>::from_coords(lhs.x() - rhs.x(), lhs.y() - rhs.y())
}

#[doc(hidden)]
pub fn dot(lhs: impl Into<Vector2>, rhs: impl Into<Vector2>) -> f64 {
    let (lhs, rhs): (Vector2, Vector2) = (lhs.into(), rhs.into());
    lhs.x() * rhs.x() + lhs.y() * rhs.y()
}

#[doc(hidden)]
pub fn coords_eq(lhs: impl Into<Vector2>, rhs: impl Into<Vector2>) -> bool {
    let (lhs, rhs): (Vector2, Vector2) = (lhs.into(), rhs.into());
    lhs.x() == rhs.x() && lhs.y() == rhs.y()
}

/// Implements `+`, `-`, `*` (dot product) and `==` between two vector-shaped types.
#[doc(hidden)]
#[macro_export]
macro_rules! impl_binary_vector_ops {
    ($lhs:ty, $rhs:ty) => {
        impl ::std::ops::Add<$rhs> for $lhs {
            type Output = <$lhs as $crate::core::ops::MoreSpecific<$rhs>>::Output;

            fn add(self, rhs: $rhs) -> Self::Output {
                $crate::core::ops::add_as(self, rhs)
            }
        }
        impl ::std::ops::Sub<$rhs> for $lhs {
            type Output = <$lhs as $crate::core::ops::MoreSpecific<$rhs>>::Output;

            fn sub(self, rhs: $rhs) -> Self::Output {
                $crate::core::ops::sub_as(self, rhs)
            }
        }
        impl ::std::ops::Mul<$rhs> for $lhs {
            type Output = f64;

            fn mul(self, rhs: $rhs) -> Self::Output {
                $crate::core::ops::dot(self, rhs)
            }
        }
        impl ::std::cmp::PartialEq<$rhs> for $lhs {
            fn eq(&self, other: &$rhs) -> bool {
                $crate::core::ops::coords_eq(*self, *other)
            }
        }
    };
}

/// Implements negation, scaling and division by a scalar for a vector type.
#[doc(hidden)]
#[macro_export]
macro_rules! impl_scalar_vector_ops {
    ($ty:ty) => {
        impl ::std::ops::Mul<f64> for $ty {
            type Output = $ty;

            fn mul(self, rhs: f64) -> Self::Output {
                $crate::util::linalg::VectorType::scale_by(&self, rhs)
            }
        }
        impl ::std::ops::Mul<$ty> for f64 {
            type Output = $ty;

            fn mul(self, rhs: $ty) -> Self::Output {
                $crate::util::linalg::VectorType::scale_by(&rhs, self)
            }
        }
        impl ::std::ops::Div<f64> for $ty {
            type Output = $ty;

            fn div(self, rhs: f64) -> Self::Output {
                let (x, y) = (
                    $crate::util::linalg::VectorType::x(&self),
                    $crate::util::linalg::VectorType::y(&self),
                );
                <$ty as $crate::util::linalg::VectorType>::from_coords(x / rhs, y / rhs)
            }
        }
        impl ::std::ops::Neg for $ty {
            type Output = $ty;

            fn neg(self) -> Self::Output {
                $crate::util::linalg::VectorType::scale_by(&self, -1.0)
            }
        }
        impl ::std::iter::IntoIterator for $ty {
            type Item = f64;
            type IntoIter = ::std::array::IntoIter<f64, 2>;

            fn into_iter(self) -> Self::IntoIter {
                $crate::util::linalg::VectorType::iter(&self)
            }
        }
        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                $crate::util::linalg::fmt_vector(self, f)
            }
        }
    };
}

/// Relates two derived vector types that do not share a lineage.
///
/// `vector_specificity!(A > B)` declares `A` more specific than `B`; results of combining them are
/// materialized as `A` in either order. `A` must have a strictly longer specialization chain.
///
/// `vector_specificity!(A = B)` is for types with chains of equal length; the right operand wins,
/// so `a + b` is a `B` and `b + a` is an `A`.
///
/// Both forms check the chain lengths at compile time.
#[macro_export]
macro_rules! vector_specificity {
    ($winner:ty > $loser:ty) => {
        const _: () = assert!(
            <$winner as $crate::util::linalg::VectorType>::DEPTH
                > <$loser as $crate::util::linalg::VectorType>::DEPTH,
            "vector_specificity!: the winning type needs a longer specialization chain",
        );
        impl $crate::core::ops::MoreSpecific<$loser> for $winner {
            type Output = $winner;
        }
        impl $crate::core::ops::MoreSpecific<$winner> for $loser {
            type Output = $winner;
        }
        $crate::impl_binary_vector_ops!($winner, $loser);
        $crate::impl_binary_vector_ops!($loser, $winner);
    };
    ($left:ty = $right:ty) => {
        const _: () = assert!(
            <$left as $crate::util::linalg::VectorType>::DEPTH
                == <$right as $crate::util::linalg::VectorType>::DEPTH,
            "vector_specificity!: specialization chains differ in length, use `>`",
        );
        impl $crate::core::ops::MoreSpecific<$right> for $left {
            type Output = $right;
        }
        impl $crate::core::ops::MoreSpecific<$left> for $right {
            type Output = $left;
        }
        $crate::impl_binary_vector_ops!($left, $right);
        $crate::impl_binary_vector_ops!($right, $left);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, VectorType)]
    struct Position(Vector2);

    #[derive(Copy, Clone, Debug, VectorType)]
    struct Velocity(Position);

    #[derive(Copy, Clone, Debug, VectorType)]
    #[vector(ancestors(Position))]
    struct Impulse(Velocity);

    #[derive(Copy, Clone, Debug, VectorType)]
    struct Colour(Vector2);

    #[derive(Copy, Clone, Debug, VectorType)]
    struct Offset(Vector2);

    vector_specificity!(Velocity > Colour);
    vector_specificity!(Offset = Colour);

    fn assert_output<T>(_: &T) {}

    #[test]
    fn specialization_depth() {
        check_eq!(Vector2::DEPTH, 0);
        check_eq!(Position::DEPTH, 1);
        check_eq!(Velocity::DEPTH, 2);
        check_eq!(Impulse::DEPTH, 3);
        check_eq!(Colour::DEPTH, 1);
    }

    #[test]
    fn same_type_resolves_to_itself() {
        let p = Position::from_coords(1.0, 2.0) + Position::from_coords(3.0, 4.0);
        assert_output::<Position>(&p);
        check_eq!(p, Position::from_coords(4.0, 6.0));
    }

    #[test]
    fn derived_wins_over_base_in_either_order() {
        let a = Position::from_coords(1.0, 2.0) + Vector2::new(1.0, 1.0);
        assert_output::<Position>(&a);
        let b = Vector2::new(1.0, 1.0) - Position::from_coords(1.0, 2.0);
        assert_output::<Position>(&b);
        check_eq!(b, Position::from_coords(0.0, -1.0));
    }

    #[test]
    fn descendant_wins_over_ancestor() {
        let a = Velocity::from_coords(1.0, 0.0) + Position::from_coords(0.0, 1.0);
        assert_output::<Velocity>(&a);
        let b = Position::from_coords(0.0, 1.0) + Velocity::from_coords(1.0, 0.0);
        assert_output::<Velocity>(&b);
        check_eq!(a, b);

        let c = Position::from_coords(1.0, 1.0) - Impulse::from_coords(1.0, 1.0);
        assert_output::<Impulse>(&c);
        let d = Impulse::from_coords(1.0, 1.0) + Velocity::from_coords(1.0, 1.0);
        assert_output::<Impulse>(&d);
        let e = Vector2::new(1.0, 1.0) + Impulse::from_coords(1.0, 1.0);
        assert_output::<Impulse>(&e);
    }

    #[test]
    fn unrelated_types_follow_declared_specificity() {
        let a = Colour::from_coords(1.0, 0.0) + Velocity::from_coords(0.0, 1.0);
        assert_output::<Velocity>(&a);
        let b = Velocity::from_coords(0.0, 1.0) - Colour::from_coords(1.0, 0.0);
        assert_output::<Velocity>(&b);
        check_eq!(b, Velocity::from_coords(-1.0, 1.0));

        // Equal chains: the right operand wins.
        let c = Offset::from_coords(1.0, 1.0) + Colour::from_coords(1.0, 1.0);
        assert_output::<Colour>(&c);
        check_eq!(c, Colour::from_coords(2.0, 2.0));
        let d = Colour::from_coords(1.0, 1.0) - Offset::from_coords(1.0, 1.0);
        assert_output::<Offset>(&d);
        check_eq!(d, Offset::from_coords(0.0, 0.0));
        let e = Offset::from_coords(1.0, 1.0).try_add(Colour::from_coords(1.0, 1.0));
        assert_output::<OpResult<Colour>>(&e);
    }

    #[test]
    fn pairs_resolve_to_the_vector_operand() {
        let a = Velocity::from_coords(1.0, 0.0) + (0.0, 1.0);
        assert_output::<Velocity>(&a);
        check_eq!(a, Velocity::from_coords(1.0, 1.0));
        let b = Velocity::from_coords(1.0, 0.0) - [1.0, 1.0];
        assert_output::<Velocity>(&b);
        check_eq!(b, Velocity::from_coords(0.0, -1.0));
    }

    #[test]
    fn derived_types_keep_their_type_through_operations() {
        let v = Velocity::from_coords(3.0, 4.0);
        assert_output::<Velocity>(&v.rotate(90.0));
        assert_output::<Velocity>(&v.normalize());
        assert_output::<Velocity>(&-v);
        assert_output::<Velocity>(&(v * 2.0));
        assert_output::<Velocity>(&(2.0 * v));
        assert_output::<Velocity>(&(v / 2.0));
        check_eq!(v * Position::from_coords(1.0, 0.0), 3.0);
        check_eq!(Vector2::new(0.0, 1.0) * v, 4.0);
        check_eq!(v.length(), 5.0);
        check_eq!(v.to_string(), "Velocity(3.0, 4.0)");
        check_eq!(v[0], 3.0);
        check_eq!(v["y"], 4.0);
        check_eq!(v.into_iter().collect_vec(), vec![3.0, 4.0]);
    }

    #[test]
    fn derived_conversions() {
        let v = Velocity::convert((1.0, 2.0)).unwrap();
        check_eq!(v, Velocity::from_coords(1.0, 2.0));
        let p = Position::convert(v).unwrap();
        check_eq!(p, v);
        let base: Vector2 = v.into();
        check_eq!(base, Vector2::new(1.0, 2.0));
        check_eq!(Velocity::from(base), v);
        check_eq!(v, (1.0, 2.0));
        check_eq!(v, [1.0, 2.0]);
    }

    #[test]
    fn dynamic_operations_keep_the_more_specific_type() {
        let a = Position::from_coords(1.0, 0.0).try_add(Velocity::from_coords(0.0, 1.0));
        assert_output::<OpResult<Velocity>>(&a);
        check_eq!(a, OpResult::Value(Velocity::from_coords(1.0, 1.0)));

        let b = Vector2::new(1.0, 0.0).try_add(Position::from_coords(0.0, 1.0));
        assert_output::<OpResult<Position>>(&b);
        check_eq!(b, OpResult::Value(Position::from_coords(1.0, 1.0)));

        let c = Impulse::from_coords(1.0, 1.0).try_sub(Position::from_coords(1.0, 0.0));
        assert_output::<OpResult<Impulse>>(&c);
        check_eq!(c, OpResult::Value(Impulse::from_coords(0.0, 1.0)));
        let d = Colour::from_coords(1.0, 1.0).try_sub(Velocity::from_coords(1.0, 1.0));
        assert_output::<OpResult<Velocity>>(&d);

        // Operands without a vector type of their own keep the receiver's type.
        let e = Velocity::from_coords(1.0, 0.0)
            .try_add(BTreeMap::from([("x", 1.0), ("y", 1.0)]));
        assert_output::<OpResult<Velocity>>(&e);
        check_eq!(e, OpResult::Value(Velocity::from_coords(2.0, 1.0)));
        let f = Velocity::from_coords(1.0, 0.0).try_sub(serde_json::json!([1, 1]));
        assert_output::<OpResult<Velocity>>(&f);
        check_eq!(f, OpResult::Value(Velocity::from_coords(0.0, -1.0)));
        check!(Velocity::from_coords(1.0, 0.0).try_add(vec![1.0]).is_unsupported());
    }

    #[test]
    fn op_result_fallback() {
        let unsupported: OpResult<f64> = OpResult::Unsupported;
        check!(unsupported.is_unsupported());
        check_eq!(unsupported.or_else(|| OpResult::Value(1.0)), OpResult::Value(1.0));
        check_eq!(OpResult::Value(2.0).or_else(|| OpResult::Value(1.0)), OpResult::Value(2.0));
        check_eq!(OpResult::Value(2.0).map(|v| v * 2.0).ok(), Some(4.0));
        check_eq!(
            unsupported.into_result("mul"),
            Err(VectorError::Unsupported("mul"))
        );
    }

    #[test]
    fn operand_conversions() {
        check_eq!(Operand::from(2), Operand::Number(2.0));
        check_eq!(
            Operand::from(Vector2::new(1.0, 2.0)),
            Operand::Vector(VectorLike::Vector(Vector2::new(1.0, 2.0)))
        );
        check_eq!(
            Operand::from(Velocity::from_coords(1.0, 2.0)),
            Operand::Vector(VectorLike::Vector(Vector2::new(1.0, 2.0)))
        );
        check_eq!(
            Velocity::from_coords(1.0, 2.0).try_mul(Position::from_coords(3.0, 1.0)),
            OpResult::Value(Product::Dot(5.0))
        );
    }
}
