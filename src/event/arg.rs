//! Call-site arguments of a log entry point.

use std::error::Error;
use std::fmt::Debug;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::context::data::to_field_value;
use crate::context::Context;
use crate::stack::Traced;

/// One heterogeneous argument, classified at the call site.
///
/// Most values convert with `Arg::from`; errors use [`Arg::error`] or one of
/// the `From` impls for boxed and traced errors.
#[derive(Debug, Clone)]
pub enum Arg {
    /// A message part.
    Text(String),
    /// An error to attach to the event.
    Error(Arc<dyn Error + Send + Sync>),
    /// A context whose carrier fields are merged into the event.
    Context(Context),
    /// `true` forces stack capture.
    Flag(bool),
    /// Anything else, attached as the generic `any` field.
    Value(Value),
}

impl Arg {
    pub fn error<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Arg::Error(Arc::new(err))
    }

    /// An error already shared elsewhere, e.g. one kept in a retry loop.
    pub fn shared_error(err: Arc<dyn Error + Send + Sync>) -> Self {
        Arg::Error(err)
    }

    /// A generic value; unencodable values fall back to their `Debug` form.
    pub fn value<T>(value: &T) -> Self
    where
        T: Serialize + Debug + ?Sized,
    {
        Arg::Value(to_field_value(value))
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Text(s)
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Arg::Text(s.clone())
    }
}

impl From<Context> for Arg {
    fn from(ctx: Context) -> Self {
        Arg::Context(ctx)
    }
}

impl From<&Context> for Arg {
    fn from(ctx: &Context) -> Self {
        Arg::Context(ctx.clone())
    }
}

impl From<bool> for Arg {
    fn from(flag: bool) -> Self {
        Arg::Flag(flag)
    }
}

impl From<&bool> for Arg {
    fn from(flag: &bool) -> Self {
        Arg::Flag(*flag)
    }
}

/// A missing flag reads as `false`.
impl From<Option<&bool>> for Arg {
    fn from(flag: Option<&bool>) -> Self {
        Arg::Flag(flag.copied().unwrap_or(false))
    }
}

impl From<Traced> for Arg {
    fn from(err: Traced) -> Self {
        Arg::error(err)
    }
}

impl From<std::io::Error> for Arg {
    fn from(err: std::io::Error) -> Self {
        Arg::error(err)
    }
}

impl From<Box<dyn Error + Send + Sync>> for Arg {
    fn from(err: Box<dyn Error + Send + Sync>) -> Self {
        Arg::shared_error(Arc::from(err))
    }
}

impl From<Arc<dyn Error + Send + Sync>> for Arg {
    fn from(err: Arc<dyn Error + Send + Sync>) -> Self {
        Arg::shared_error(err)
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

macro_rules! value_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Arg::Value(Value::from(value))
                }
            }
        )*
    };
}

value_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Build a `Vec<Arg>` from heterogeneous values.
///
/// ```
/// use ctxlog::{args, Arg};
///
/// let args = args!["Hello", "world", true, 42];
/// assert!(matches!(args[2], Arg::Flag(true)));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}
