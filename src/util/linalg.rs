use crate::{
    core::{ops, prelude::*},
    util::coerce,
};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::{
    array,
    collections::BTreeMap,
    fmt,
    fmt::Formatter,
    ops::Index,
};

/// Returns `(cos, sin)` of an angle in degrees.
///
/// The smaller-magnitude component is recomputed from the larger one, so that
/// `cos * cos + sin * sin == 1.0` and a rotation does not drift the length of the vector it is
/// applied to.
pub(crate) fn trig(degrees: f64) -> (f64, f64) {
    let (mut sin, mut cos) = degrees.to_radians().sin_cos();
    if cos.abs() > sin.abs() {
        sin = (1.0 - cos * cos).sqrt().copysign(sin);
    } else {
        cos = (1.0 - sin * sin).sqrt().copysign(cos);
    }
    (cos, sin)
}

fn scalar_is_close(a: f64, b: f64, rel_tol: f64) -> bool {
    a == b || (a - b).abs() <= rel_tol * a.abs().max(b.abs())
}

/// Formats a vector as `Name(x, y)`, using the shortest representation of each coordinate that
/// round-trips.
pub fn fmt_vector<T: VectorType>(v: &T, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}({:?}, {:?})", T::NAME, v.x(), v.y())
}

/// Tolerances for [`VectorType::is_close_with`].
///
/// Two vectors are close when the length of their difference is within `abs_tol`, or within
/// `rel_tol` times the longest of the two vectors and every vector in `rel_to`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tolerance {
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub rel_to: Vec<Vector2>,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            abs_tol: DEFAULT_ABS_TOL,
            rel_tol: DEFAULT_REL_TOL,
            rel_to: Vec::new(),
        }
    }
}

impl Tolerance {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn abs(mut self, abs_tol: f64) -> Self {
        self.abs_tol = abs_tol;
        self
    }
    #[must_use]
    pub fn rel(mut self, rel_tol: f64) -> Self {
        self.rel_tol = rel_tol;
        self
    }
    #[must_use]
    pub fn relative_to(mut self, v: impl Into<Vector2>) -> Self {
        self.rel_to.push(v.into());
        self
    }
    /// Like [`Tolerance::relative_to`], for a reference vector in any vector-like form.
    pub fn try_relative_to(self, v: impl Into<VectorLike>) -> Result<Self> {
        Ok(self.relative_to(Vector2::convert(v)?))
    }
}

/// A 2D vector of `f64` coordinates.
///
/// The y-axis points up: [`Vector2::up`] is `(0, 1)` and positive angles rotate counterclockwise.
#[derive(Default, Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vector2 {
    x: f64,
    y: f64,
}

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn x(&self) -> f64 {
        self.x
    }
    pub const fn y(&self) -> f64 {
        self.y
    }

    pub const fn right() -> Self {
        Self::new(1.0, 0.0)
    }
    pub const fn up() -> Self {
        Self::new(0.0, 1.0)
    }
    pub const fn left() -> Self {
        Self::new(-1.0, 0.0)
    }
    pub const fn down() -> Self {
        Self::new(0.0, -1.0)
    }
    pub const fn one() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl VectorType for Vector2 {
    const NAME: &'static str = "Vector2";
    const DEPTH: usize = 0;

    fn from_coords(x: f64, y: f64) -> Self {
        Self::new(x, y)
    }

    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
}

impl Zero for Vector2 {
    fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

crate::impl_binary_vector_ops!(Vector2, Vector2);
crate::impl_binary_vector_ops!(Vector2, (f64, f64));
crate::impl_binary_vector_ops!(Vector2, [f64; 2]);
crate::impl_scalar_vector_ops!(Vector2);

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}
impl From<(i32, i32)> for Vector2 {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(f64::from(x), f64::from(y))
    }
}
impl From<[f64; 2]> for Vector2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}
impl From<[i32; 2]> for Vector2 {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(f64::from(x), f64::from(y))
    }
}
impl From<Vector2> for (f64, f64) {
    fn from(v: Vector2) -> Self {
        (v.x, v.y)
    }
}
impl From<Vector2> for [f64; 2] {
    fn from(v: Vector2) -> Self {
        [v.x, v.y]
    }
}

impl TryFrom<VectorLike> for Vector2 {
    type Error = VectorError;

    fn try_from(value: VectorLike) -> Result<Self> {
        coerce::convert(value)
    }
}

impl Index<usize> for Vector2 {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("index out of range for Vector2: {index}"),
        }
    }
}
impl Index<&str> for Vector2 {
    type Output = f64;

    fn index(&self, name: &str) -> &Self::Output {
        match name {
            "x" => &self.x,
            "y" => &self.y,
            _ => panic!("no component named {name:?}"),
        }
    }
}

fn scaled_unchecked<T: VectorType>(v: &T, length: f64) -> T {
    let current = v.length();
    if current == 0.0 {
        debug!(
            "scaling {:?} to length {} divides by zero; the result is NaN",
            v.base(),
            length
        );
    }
    T::from_coords(length * v.x() / current, length * v.y() / current)
}

fn coerce_soft(other: impl Into<VectorLike>) -> OpResult<Vector2> {
    match coerce::convert::<Vector2>(other.into()) {
        Ok(v) => OpResult::Value(v),
        Err(_) => OpResult::Unsupported,
    }
}

/// Common behaviour of [`Vector2`] and every vector type derived from it.
///
/// Implementors supply coordinates and a constructor; everything else is provided. Derive it on
/// a single-field tuple struct wrapping `Vector2` or another derived type:
///
/// ```
/// use planar::core::prelude::*;
///
/// #[derive(Copy, Clone, Debug, VectorType)]
/// struct Position(Vector2);
///
/// let p = Position::from_coords(3.0, 4.0);
/// let moved = p + Vector2::new(1.0, 0.0);
/// assert_eq!(moved.to_string(), "Position(4.0, 4.0)");
/// assert_eq!(p.rotate(90.0).to_string(), "Position(-4.0, 3.0)");
/// ```
///
/// Operations that produce a vector produce `Self`. Binary operations between two vector types
/// produce the more specific of the two (see [`MoreSpecific`]).
pub trait VectorType: Copy + fmt::Debug + Into<Vector2> {
    /// Name of the type, used in the textual representation.
    const NAME: &'static str;
    /// Length of the specialization chain from [`Vector2`], which has depth 0.
    const DEPTH: usize;

    fn from_coords(x: f64, y: f64) -> Self;
    fn x(&self) -> f64;
    fn y(&self) -> f64;

    /// Coerces anything vector-like into `Self`.
    ///
    /// Vectors of any type keep their coordinates; sequences need exactly two numeric elements
    /// and mappings exactly the keys `x` and `y`.
    ///
    /// # Examples
    ///
    /// ```
    /// use planar::core::prelude::*;
    /// use std::collections::BTreeMap;
    ///
    /// let v = Vector2::convert(BTreeMap::from([("x", 1.0), ("y", 2.0)])).unwrap();
    /// assert_eq!(v, Vector2::new(1.0, 2.0));
    /// assert!(Vector2::convert(vec![1.0]).is_err());
    /// ```
    fn convert(value: impl Into<VectorLike>) -> Result<Self> {
        coerce::convert(value.into())
    }

    /// Builds `Self` from loosely-typed constructor arguments, see [`Arguments`].
    fn from_arguments(args: &Arguments) -> Result<Self> {
        coerce::construct(args)
    }

    fn base(&self) -> Vector2 {
        (*self).into()
    }

    /// Returns a copy with the x-coordinate replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use planar::core::prelude::*;
    /// let v = Vector2::new(3.0, 4.0);
    /// assert_eq!(v.with_x(0.0), Vector2::new(0.0, 4.0));
    /// assert_eq!(v, Vector2::new(3.0, 4.0));
    /// ```
    #[must_use]
    fn with_x(&self, x: f64) -> Self {
        Self::from_coords(x, self.y())
    }
    /// Returns a copy with the y-coordinate replaced.
    #[must_use]
    fn with_y(&self, y: f64) -> Self {
        Self::from_coords(self.x(), y)
    }

    /// The mapping form `{x, y}`.
    fn as_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([("x", self.x()), ("y", self.y())])
    }

    fn iter(&self) -> array::IntoIter<f64, 2> {
        [self.x(), self.y()].into_iter()
    }

    /// Number of components, always 2.
    #[allow(clippy::len_without_is_empty)]
    fn len(&self) -> usize {
        2
    }

    /// Component by position: 0 is x, 1 is y.
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] for any other index. `v[i]` panics instead.
    fn get(&self, index: usize) -> Result<f64> {
        match index {
            0 => Ok(self.x()),
            1 => Ok(self.y()),
            _ => Err(VectorError::IndexOutOfRange(index)),
        }
    }
    /// Component by name, `"x"` or `"y"`.
    ///
    /// # Errors
    ///
    /// [`VectorError::KeyNotFound`] for any other name. `v["z"]` panics instead.
    fn get_named(&self, name: &str) -> Result<f64> {
        match name {
            "x" => Ok(self.x()),
            "y" => Ok(self.y()),
            _ => Err(VectorError::KeyNotFound(name.to_string())),
        }
    }

    /// Euclidean length, computed with `hypot` so that large and tiny coordinates neither
    /// overflow nor underflow.
    ///
    /// # Examples
    ///
    /// ```
    /// use planar::core::prelude::*;
    /// assert_eq!(Vector2::new(3.0, 4.0).length(), 5.0);
    /// assert!(Vector2::new(3e200, 4e200).length().is_finite());
    /// ```
    fn length(&self) -> f64 {
        self.x().hypot(self.y())
    }

    /// Dot product. Same as the `*` operator between two vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// use planar::core::prelude::*;
    /// let v = Vector2::new(1.0, 2.0);
    /// assert_eq!(v.dot((3.0, -1.0)), 1.0);
    /// assert_eq!(v.dot(Vector2::up()), 2.0);
    /// ```
    fn dot(&self, other: impl Into<Vector2>) -> f64 {
        ops::dot(self.base(), other)
    }

    /// Dot product with a dynamic operand. Unlike the other `try_` operations, failing to
    /// coerce the operand is a hard error.
    fn try_dot(&self, other: impl Into<VectorLike>) -> Result<f64> {
        let other = Vector2::convert(other)?;
        Ok(self.dot(other))
    }

    /// Multiplies both coordinates by `factor`. Same as `v * factor`.
    #[must_use]
    fn scale_by(&self, factor: f64) -> Self {
        Self::from_coords(self.x() * factor, self.y() * factor)
    }

    /// Adds anything vector-like.
    ///
    /// The result has the more specific of the two operand types (see [`MoreSpecific`]); for
    /// sequences, mappings and JSON it is `Self`. An operand that cannot be coerced gives
    /// [`OpResult::Unsupported`] rather than an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use planar::core::prelude::*;
    /// let v = Vector2::new(1.0, 2.0);
    /// assert_eq!(v.try_add([1.0, 1.0]), OpResult::Value(Vector2::new(2.0, 3.0)));
    /// assert!(v.try_add(vec![1.0, 2.0, 3.0]).is_unsupported());
    /// ```
    fn try_add<R>(&self, other: R) -> OpResult<<Self as MoreSpecific<R>>::Output>
    where
        Self: MoreSpecific<R>,
        R: Into<VectorLike>,
    {
        coerce_soft(other).map(|o| {
            <<Self as MoreSpecific<R>>::Output as VectorType>::from_coords(
                self.x() + o.x(),
                self.y() + o.y(),
            )
        })
    }
    /// Subtracts anything vector-like. See [`VectorType::try_add`].
    fn try_sub<R>(&self, other: R) -> OpResult<<Self as MoreSpecific<R>>::Output>
    where
        Self: MoreSpecific<R>,
        R: Into<VectorLike>,
    {
        coerce_soft(other).map(|o| {
            <<Self as MoreSpecific<R>>::Output as VectorType>::from_coords(
                self.x() - o.x(),
                self.y() - o.y(),
            )
        })
    }

    /// Multiplies by a number (scaling) or by anything vector-like (dot product).
    fn try_mul(&self, rhs: impl Into<Operand>) -> OpResult<Product<Self>> {
        match rhs.into() {
            Operand::Number(factor) => OpResult::Value(Product::Scaled(self.scale_by(factor))),
            Operand::Vector(other) => match self.try_dot(other) {
                Ok(dot) => OpResult::Value(Product::Dot(dot)),
                Err(_) => OpResult::Unsupported,
            },
        }
    }

    /// Exact coordinate equality against anything vector-like.
    fn try_eq(&self, other: impl Into<VectorLike>) -> OpResult<bool> {
        coerce_soft(other).map(|o| ops::coords_eq(self.base(), o))
    }

    /// Signed angle in degrees from `self` to `other`, in (-180, 180]. Positive is
    /// counterclockwise.
    ///
    /// Involving the zero vector yields an unspecified finite angle.
    ///
    /// # Examples
    ///
    /// ```
    /// use planar::core::prelude::*;
    /// assert_eq!(Vector2::right().angle(Vector2::up()), 90.0);
    /// assert_eq!(Vector2::up().angle(Vector2::right()), -90.0);
    /// assert_eq!(Vector2::right().angle(Vector2::left()), 180.0);
    /// ```
    fn angle(&self, other: impl Into<Vector2>) -> f64 {
        let other = other.into();
        let rv =
            (other.x().atan2(-other.y()) - self.x().atan2(-self.y())).to_degrees();
        if rv <= -180.0 {
            rv + 360.0
        } else if rv > 180.0 {
            rv - 360.0
        } else {
            rv
        }
    }
    /// [`VectorType::angle`] to anything vector-like.
    fn try_angle(&self, other: impl Into<VectorLike>) -> Result<f64> {
        Ok(self.angle(Vector2::convert(other)?))
    }

    /// Rotates counterclockwise by `degrees`.
    ///
    /// The cosine and sine are stabilized so that their squares sum to exactly 1, which keeps
    /// the length from drifting over many chained rotations.
    ///
    /// # Examples
    ///
    /// ```
    /// use planar::core::prelude::*;
    /// assert_eq!(Vector2::one().rotate(90.0), Vector2::new(-1.0, 1.0));
    /// assert!(Vector2::right().rotate(30.0).rotate(60.0).is_close(Vector2::up()));
    /// ```
    #[must_use]
    fn rotate(&self, degrees: f64) -> Self {
        let (cos, sin) = trig(degrees);
        let (x, y) = (self.x(), self.y());
        Self::from_coords(x * cos - y * sin, x * sin + y * cos)
    }

    /// Scales to unit length. The zero vector normalizes to NaN coordinates.
    #[must_use]
    fn normalize(&self) -> Self {
        scaled_unchecked(self, 1.0)
    }

    /// Scales to the given length, keeping the direction.
    ///
    /// Scaling to 0 always yields the zero vector, even from the zero vector. Scaling the zero
    /// vector to a positive length yields NaN coordinates.
    ///
    /// # Errors
    ///
    /// [`VectorError::InvalidArgument`] if `length` is negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use planar::core::prelude::*;
    /// let v = Vector2::new(3.0, 4.0);
    /// assert_eq!(v.scale_to(10.0), Ok(Vector2::new(6.0, 8.0)));
    /// assert!(v.scale_to(-1.0).is_err());
    /// ```
    fn scale_to(&self, length: f64) -> Result<Self> {
        if length < 0.0 {
            return Err(VectorError::InvalidArgument(format!(
                "cannot scale to negative length {length}"
            )));
        }
        if length == 0.0 {
            return Ok(Self::from_coords(0.0, 0.0));
        }
        Ok(scaled_unchecked(self, length))
    }

    /// Alias of [`VectorType::scale_to`].
    fn scale(&self, length: f64) -> Result<Self> {
        self.scale_to(length)
    }

    /// Shortens the vector to `max_length` if it is longer, otherwise returns it unchanged.
    ///
    /// A shortened vector may come out a few ulps longer than `max_length`.
    fn truncate(&self, max_length: f64) -> Result<Self> {
        if self.length() <= max_length {
            Ok(*self)
        } else {
            self.scale_to(max_length)
        }
    }

    /// Reflects across the line through the origin perpendicular to `normal`.
    ///
    /// # Parameters
    ///
    /// * `normal` - The normal of the mirror line. Must already have unit length, within a
    ///   relative tolerance of [`NORMAL_REL_TOL`].
    ///
    /// # Examples
    ///
    /// ```
    /// use planar::core::prelude::*;
    /// let v = Vector2::new(5.0, 3.0);
    /// assert_eq!(v.reflect(Vector2::up()), Ok(Vector2::new(5.0, -3.0)));
    /// assert!(v.reflect((0.0, 2.0)).is_err());
    /// ```
    fn reflect(&self, normal: impl Into<Vector2>) -> Result<Self> {
        let normal = normal.into();
        if !scalar_is_close(normal.length(), 1.0, NORMAL_REL_TOL) {
            return Err(VectorError::InvalidArgument(format!(
                "reflection requires a normalized vector, got {normal} of length {}",
                normal.length()
            )));
        }
        let d = 2.0 * self.dot(normal);
        Ok(Self::from_coords(
            self.x() - d * normal.x(),
            self.y() - d * normal.y(),
        ))
    }
    /// [`VectorType::reflect`] across a normal given in any vector-like form.
    fn try_reflect(&self, normal: impl Into<VectorLike>) -> Result<Self> {
        self.reflect(Vector2::convert(normal)?)
    }

    /// Approximate equality using the default [`Tolerance`].
    fn is_close(&self, other: impl Into<Vector2>) -> bool {
        self.is_close_with(other, &Tolerance::default())
            .unwrap_or(false)
    }

    /// Approximate equality: the length of the difference is within `tolerance.abs_tol`, or
    /// within `tolerance.rel_tol` times the longest of `self`, `other` and `tolerance.rel_to`.
    ///
    /// # Errors
    ///
    /// [`VectorError::InvalidArgument`] if either tolerance is negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use planar::core::prelude::*;
    /// let v = Vector2::new(1.0, 0.0);
    /// assert_eq!(v.is_close_with((1.05, 0.0), &Tolerance::new().abs(0.1)), Ok(true));
    /// assert!(v.is_close_with(v, &Tolerance::new().rel(-1.0)).is_err());
    /// ```
    fn is_close_with(&self, other: impl Into<Vector2>, tolerance: &Tolerance) -> Result<bool> {
        if tolerance.abs_tol < 0.0 || tolerance.rel_tol < 0.0 {
            return Err(VectorError::InvalidArgument(format!(
                "tolerances must be non-negative, got abs_tol={} rel_tol={}",
                tolerance.abs_tol, tolerance.rel_tol
            )));
        }
        let (this, other) = (self.base(), other.into());
        let rel_length = tolerance
            .rel_to
            .iter()
            .map(Vector2::length)
            .fold(this.length().max(other.length()), f64::max);
        let diff = (this - other).length();
        Ok(diff <= tolerance.rel_tol * rel_length || diff <= tolerance.abs_tol)
    }
    /// [`VectorType::is_close_with`] against anything vector-like.
    fn try_is_close(&self, other: impl Into<VectorLike>, tolerance: &Tolerance) -> Result<bool> {
        self.is_close_with(Vector2::convert(other)?, tolerance)
    }
}
