//! Values that can be attached to a log record.

use super::Data;
use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Opt-in capability for custom types that want their own console rendering.
///
/// The returned text may contain inline markup (`<bold>`, `<cyan>`, ...).
pub trait RichText: Send + Sync {
    /// Shown in the console's type column.
    fn type_name(&self) -> String;

    /// Renders the value.
    ///
    /// # Errors
    /// Any failure; the formatter degrades to `<TypeName>` instead of
    /// aborting the log call.
    fn rich_text(&self) -> Result<String, fmt::Error>;
}

/// A splat value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    List(Vec<Self>),
    Map(Data),
    Rich(Arc<dyn RichText>),
}

impl Value {
    /// Wraps a custom renderable.
    pub fn rich(value: impl RichText + 'static) -> Self {
        Self::Rich(Arc::new(value))
    }

    /// Stores the `Display` output as a string value.
    pub fn display(value: &impl fmt::Display) -> Self {
        Self::Str(value.to_string())
    }

    /// Stores the `Debug` output as a string value.
    pub fn debug(value: &impl fmt::Debug) -> Self {
        Self::Str(format!("{value:?}"))
    }

    /// Custom renderables that fail to render become `<TypeName>`.
    #[must_use]
    pub fn rich_or_fallback(rich: &dyn RichText) -> String {
        rich.rich_text()
            .unwrap_or_else(|_| format!("<{}>", rich.type_name()))
    }

    /// Human text: strings bare, everything else in repr form.
    ///
    /// Used for message interpolation and the console value column.
    #[must_use]
    pub fn to_plain(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Rich(r) => crate::fmt::strip_tags(&Self::rich_or_fallback(r.as_ref())),
            other => other.to_repr(),
        }
    }

    /// Repr form: strings quoted, containers bracketed.
    #[must_use]
    pub fn to_repr(&self) -> String {
        let mut out = String::new();
        self.write_repr(&mut out);
        out
    }

    fn write_repr(&self, out: &mut String) {
        match self {
            Self::None => out.push_str("None"),
            Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::Int(i) => out.push_str(&i.to_string()),
            Self::UInt(u) => out.push_str(&u.to_string()),
            Self::Float(f) => out.push_str(&format_float(*f)),
            Self::Str(s) => out.push_str(&format!("{s:?}")),
            Self::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_repr(out);
                }
                out.push(']');
            }
            Self::Map(map) => {
                out.push('{');
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&format!("{key:?}: "));
                    item.write_repr(out);
                }
                out.push('}');
            }
            Self::Rich(r) => out.push_str(&crate::fmt::strip_tags(&Self::rich_or_fallback(
                r.as_ref(),
            ))),
        }
    }
}

/// Floats always show a fractional part so they read differently from ints.
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rich(r) => write!(f, "Rich({})", r.type_name()),
            other => f.write_str(&other.to_repr()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Rich(a), Self::Rich(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::None => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::UInt(u) => serializer.serialize_u64(*u),
            // JSON has no NaN/inf; serde_json writes them as null.
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Str(s) => serializer.serialize_str(s),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(map) => map.serialize(serializer),
            Self::Rich(r) => serializer.serialize_str(&crate::fmt::strip_tags(
                &Self::rich_or_fallback(r.as_ref()),
            )),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::None,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_u64().map(Self::UInt))
                .unwrap_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN))),
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Map(map.into_iter().collect()),
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident => $as:ty: $($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::$variant(<$as>::from(v))
            }
        })*
    };
}

impl_from_int!(Int => i64: i8, i16, i32, i64);
impl_from_int!(UInt => u64: u8, u16, u32, u64);

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        u64::try_from(v).map_or_else(|_| Self::Str(v.to_string()), Self::UInt)
    }
}

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        i64::try_from(v).map_or_else(|_| Self::Str(v.to_string()), Self::Int)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::Str(v.clone())
    }
}

impl From<&std::path::Path> for Value {
    fn from(v: &std::path::Path) -> Self {
        Self::Str(v.display().to_string())
    }
}

impl From<std::path::PathBuf> for Value {
    fn from(v: std::path::PathBuf) -> Self {
        Self::Str(v.display().to_string())
    }
}

impl From<Data> for Value {
    fn from(v: Data) -> Self {
        Self::Map(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::None, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self> + Clone> From<&[T]> for Value {
    fn from(v: &[T]) -> Self {
        Self::List(v.iter().cloned().map(Into::into).collect())
    }
}
