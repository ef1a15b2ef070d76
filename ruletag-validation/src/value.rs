// Borrowed views of field values

use crate::Record;
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// A typed, borrowed view of one field's current value.
///
/// `Absent` is the only way to express "not supplied"; a zero, an empty
/// string or `false` are all present values.
#[derive(Clone)]
pub enum Value<'a> {
    Absent,
    Str(&'a str),
    Int(i128),
    Float(f64),
    Bool(bool),
    List(Vec<Value<'a>>),
    Record(&'a dyn Record),
    /// A present value no predicate can inspect (e.g. a JSON object).
    Opaque(&'static str),
}

impl<'a> Value<'a> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Name of the value's type, used in type mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Str(_) => "a string",
            Value::Int(_) => "an integer",
            Value::Float(_) => "a float",
            Value::Bool(_) => "a bool",
            Value::List(_) => "an array",
            Value::Record(_) => "a record",
            Value::Opaque(name) => name,
        }
    }

    /// Render the value for error reports. Lists and records are not rendered.
    pub fn display(&self) -> Option<String> {
        match self {
            Value::Str(s) => Some((*s).to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => f.write_str("Absent"),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Record(_) => f.write_str("Record(..)"),
            Value::Opaque(name) => f.debug_tuple("Opaque").field(name).finish(),
        }
    }
}

/// Types that can hand the engine a [`Value`] view of themselves.
pub trait FieldValue {
    fn field_value(&self) -> Value<'_>;
}

impl FieldValue for str {
    fn field_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl FieldValue for String {
    fn field_value(&self) -> Value<'_> {
        Value::Str(self.as_str())
    }
}

impl FieldValue for Cow<'_, str> {
    fn field_value(&self) -> Value<'_> {
        Value::Str(self.as_ref())
    }
}

macro_rules! impl_int_value {
    ($($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                fn field_value(&self) -> Value<'_> {
                    Value::Int(i128::from(*self))
                }
            }
        )*
    };
}

impl_int_value!(i8, i16, i32, i64, u8, u16, u32, u64);

impl FieldValue for isize {
    fn field_value(&self) -> Value<'_> {
        Value::Int(*self as i128)
    }
}

impl FieldValue for usize {
    fn field_value(&self) -> Value<'_> {
        Value::Int(*self as i128)
    }
}

impl FieldValue for f32 {
    fn field_value(&self) -> Value<'_> {
        Value::Float(f64::from(*self))
    }
}

impl FieldValue for f64 {
    fn field_value(&self) -> Value<'_> {
        Value::Float(*self)
    }
}

impl FieldValue for bool {
    fn field_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl FieldValue for char {
    fn field_value(&self) -> Value<'_> {
        // A char cannot be borrowed as a str, so it is only checked for presence.
        Value::Opaque("a char")
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn field_value(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.field_value(),
            None => Value::Absent,
        }
    }
}

impl<T: FieldValue> FieldValue for [T] {
    fn field_value(&self) -> Value<'_> {
        Value::List(self.iter().map(FieldValue::field_value).collect())
    }
}

impl<T: FieldValue, const N: usize> FieldValue for [T; N] {
    fn field_value(&self) -> Value<'_> {
        self.as_slice().field_value()
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn field_value(&self) -> Value<'_> {
        self.as_slice().field_value()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn field_value(&self) -> Value<'_> {
        (**self).field_value()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for Box<T> {
    fn field_value(&self) -> Value<'_> {
        (**self).field_value()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for Rc<T> {
    fn field_value(&self) -> Value<'_> {
        (**self).field_value()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for Arc<T> {
    fn field_value(&self) -> Value<'_> {
        (**self).field_value()
    }
}

impl FieldValue for serde_json::Value {
    fn field_value(&self) -> Value<'_> {
        match self {
            serde_json::Value::Null => Value::Absent,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::String(s) => Value::Str(s.as_str()),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Int(i128::from(u))
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::Array(items) => {
                Value::List(items.iter().map(FieldValue::field_value).collect())
            }
            serde_json::Value::Object(_) => Value::Opaque("an object"),
        }
    }
}
