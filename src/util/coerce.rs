use crate::core::prelude::*;
use std::collections::BTreeMap;

/// A coordinate value as it arrives from dynamic data (JSON, scripting, config).
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Float(f64),
    Int(i64),
    Text(String),
    /// Something that is not a number at all; holds the name of its type.
    Other(&'static str),
}

impl Scalar {
    /// Interprets the value as a float, parsing text the way float literals are parsed.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Scalar::Float(value) => Some(*value),
            #[allow(clippy::cast_precision_loss)]
            Scalar::Int(value) => Some(*value as f64),
            Scalar::Text(text) => text.trim().parse().ok(),
            Scalar::Other(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Float(_) => "float",
            Scalar::Int(_) => "int",
            Scalar::Text(_) => "str",
            Scalar::Other(name) => *name,
        }
    }

    fn to_coord(&self, axis: Axis) -> Result<f64> {
        self.to_f64().ok_or_else(|| VectorError::NotNumeric {
            axis,
            type_name: self.type_name().to_string(),
        })
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}
impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Float(f64::from(value))
    }
}
impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}
impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}
impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Int(i64::from(value))
    }
}
impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}
impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}
impl From<&serde_json::Value> for Scalar {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Scalar::Int(i),
                None => n.as_f64().map_or(Scalar::Other("number"), Scalar::Float),
            },
            serde_json::Value::String(s) => Scalar::Text(s.clone()),
            serde_json::Value::Null => Scalar::Other("null"),
            serde_json::Value::Bool(_) => Scalar::Other("bool"),
            serde_json::Value::Array(_) => Scalar::Other("array"),
            serde_json::Value::Object(_) => Scalar::Other("object"),
        }
    }
}

/// Anything that may be coerced into a vector.
///
/// This is the single dynamic parameter type accepted wherever a vector may arrive in loosely
/// typed form. [`VectorType::convert`] resolves it.
///
/// # Examples
///
/// ```
/// use planar::core::prelude::*;
/// use std::collections::BTreeMap;
///
/// let from_pair = Vector2::convert((3, 4)).unwrap();
/// let from_map = Vector2::convert(BTreeMap::from([("x", 3.0), ("y", 4.0)])).unwrap();
/// assert_eq!(from_pair, from_map);
/// assert!(Vector2::convert(vec![1.0, 2.0, 3.0]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum VectorLike {
    Vector(Vector2),
    Sequence(Vec<Scalar>),
    Mapping(BTreeMap<String, Scalar>),
    /// A value of some other shape; holds a description used in error messages.
    Other(String),
}

impl<T: VectorType> From<T> for VectorLike {
    fn from(value: T) -> Self {
        VectorLike::Vector(value.into())
    }
}
impl<A: Into<Scalar>, B: Into<Scalar>> From<(A, B)> for VectorLike {
    fn from((x, y): (A, B)) -> Self {
        VectorLike::Sequence(vec![x.into(), y.into()])
    }
}
impl<S: Into<Scalar>, const N: usize> From<[S; N]> for VectorLike {
    fn from(value: [S; N]) -> Self {
        VectorLike::Sequence(value.into_iter().map(Into::into).collect())
    }
}
impl<S: Into<Scalar>> From<Vec<S>> for VectorLike {
    fn from(value: Vec<S>) -> Self {
        VectorLike::Sequence(value.into_iter().map(Into::into).collect())
    }
}
impl<K: Into<String>, S: Into<Scalar>> From<BTreeMap<K, S>> for VectorLike {
    fn from(value: BTreeMap<K, S>) -> Self {
        VectorLike::Mapping(value.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
impl From<&serde_json::Value> for VectorLike {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Array(items) => {
                VectorLike::Sequence(items.iter().map(Scalar::from).collect())
            }
            serde_json::Value::Object(map) => VectorLike::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), Scalar::from(v)))
                    .collect(),
            ),
            other => VectorLike::Other(other.to_string()),
        }
    }
}
impl From<serde_json::Value> for VectorLike {
    fn from(value: serde_json::Value) -> Self {
        VectorLike::from(&value)
    }
}

impl VectorLike {
    fn describe(&self) -> String {
        match self {
            VectorLike::Vector(v) => v.to_string(),
            VectorLike::Sequence(items) => format!("sequence of length {}", items.len()),
            VectorLike::Mapping(map) => format!("mapping with keys [{}]", map.keys().join(", ")),
            VectorLike::Other(description) => description.clone(),
        }
    }
}

/// Coerces `value` into `T`.
///
/// Vectors of any type keep their coordinates bit for bit. Sequences must have exactly two
/// numeric elements, mappings exactly the keys `x` and `y`.
pub fn convert<T: VectorType>(value: VectorLike) -> Result<T> {
    match value {
        VectorLike::Vector(v) => Ok(T::from_coords(v.x(), v.y())),
        VectorLike::Sequence(ref items) if items.len() == 2 => {
            from_scalars(&items[0], &items[1])
        }
        VectorLike::Mapping(ref map) if map.len() == 2 => match (map.get("x"), map.get("y")) {
            (Some(x), Some(y)) => from_scalars(x, y),
            _ => Err(VectorError::NotVectorLike(value.describe())),
        },
        _ => Err(VectorError::NotVectorLike(value.describe())),
    }
}

fn from_scalars<T: VectorType>(x: &Scalar, y: &Scalar) -> Result<T> {
    Ok(T::from_coords(x.to_coord(Axis::X)?, y.to_coord(Axis::Y)?))
}

/// A single positional constructor argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Argument {
    Scalar(Scalar),
    Vector(VectorLike),
}

/// A constructor call assembled at runtime, e.g. from a scripting layer.
///
/// Accepted shapes: two positional scalars, one positional vector-like, or the named scalars `x`
/// and `y`. See [`VectorType::from_arguments`].
///
/// # Examples
///
/// ```
/// use planar::core::prelude::*;
/// let v = Vector2::from_arguments(&Arguments::new().named("y", 4).named("x", 3)).unwrap();
/// assert_eq!(v, Vector2::new(3.0, 4.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    positional: Vec<Argument>,
    named: Vec<(String, Scalar)>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn scalar(mut self, value: impl Into<Scalar>) -> Self {
        self.positional.push(Argument::Scalar(value.into()));
        self
    }

    #[must_use]
    pub fn vector(mut self, value: impl Into<VectorLike>) -> Self {
        self.positional.push(Argument::Vector(value.into()));
        self
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.named.push((name.into(), value.into()));
        self
    }

    fn arg_count(&self) -> usize {
        self.positional.len() + self.named.len()
    }
}

/// Builds a vector from a runtime argument list, enforcing arity and naming rules.
pub fn construct<T: VectorType>(args: &Arguments) -> Result<T> {
    if !args.positional.is_empty() && !args.named.is_empty() {
        return Err(VectorError::InvalidArguments(
            "got a mix of positional and named arguments".to_string(),
        ));
    }
    if !args.named.is_empty() {
        let names = args.named.iter().map(|(name, _)| name.as_str()).collect_vec();
        let lookup = |key: &str| args.named.iter().find(|(name, _)| name == key);
        return match (lookup("x"), lookup("y")) {
            (Some((_, x)), Some((_, y))) if names.len() == 2 => from_scalars(x, y),
            _ => Err(VectorError::InvalidArguments(format!(
                "expected named arguments x and y, got: {}",
                names.iter().join(", ")
            ))),
        };
    }
    match args.positional.as_slice() {
        [Argument::Vector(value)] => convert(value.clone()),
        [Argument::Scalar(value)] => Err(VectorError::NotVectorLike(format!(
            "{} value",
            value.type_name()
        ))),
        [x, y] => Ok(T::from_coords(
            positional_coord(x, Axis::X)?,
            positional_coord(y, Axis::Y)?,
        )),
        _ => Err(VectorError::InvalidArguments(format!(
            "expected 1 vector-like or 2 float-like arguments, got {}",
            args.arg_count()
        ))),
    }
}

fn positional_coord(arg: &Argument, axis: Axis) -> Result<f64> {
    match arg {
        Argument::Scalar(value) => value.to_coord(axis),
        Argument::Vector(value) => Err(VectorError::NotNumeric {
            axis,
            type_name: match value {
                VectorLike::Vector(_) => "vector",
                VectorLike::Sequence(_) => "sequence",
                VectorLike::Mapping(_) => "mapping",
                VectorLike::Other(_) => "object",
            }
            .to_string(),
        }),
    }
}
