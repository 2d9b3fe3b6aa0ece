//! Errors carrying a captured call stack.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::stack::frame::StackFrame;

/// The capability of exposing a captured call stack, innermost frame first.
pub trait HasStackTrace {
    fn stack_trace(&self) -> &[StackFrame];
}

/// An error annotated with the call stack at the point it was wrapped.
///
/// Display and `source` are transparent: the wrapper reads exactly like the
/// error it carries.
#[derive(Clone)]
pub struct Traced {
    inner: Arc<dyn Error + Send + Sync>,
    frames: Vec<StackFrame>,
}

impl Traced {
    /// Wrap `err`, capturing the current call stack.
    pub fn capture<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::capture_shared(Arc::new(err))
    }

    /// Wrap an already shared error, capturing the current call stack.
    pub fn capture_shared(err: Arc<dyn Error + Send + Sync>) -> Self {
        Self {
            inner: err,
            frames: capture_frames(),
        }
    }

    /// A new error with the given message and the current call stack.
    pub fn msg(message: impl Into<String>) -> Self {
        let err: Box<dyn Error + Send + Sync> = message.into().into();
        Self::capture_shared(Arc::from(err))
    }

    /// Wrap `err` with an explicit frame list.
    pub fn from_frames<E>(err: E, frames: Vec<StackFrame>) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(err),
            frames,
        }
    }

    /// The wrapped error.
    pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.inner
    }
}

impl HasStackTrace for Traced {
    fn stack_trace(&self) -> &[StackFrame] {
        &self.frames
    }
}

impl fmt::Display for Traced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for Traced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traced")
            .field("inner", &self.inner)
            .field("frames", &self.frames.len())
            .finish()
    }
}

impl Error for Traced {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

/// Recognizes one stack-carrying error type.
pub type TraceCarrier = for<'a> fn(&'a (dyn Error + 'static)) -> Option<&'a dyn HasStackTrace>;

/// A [`TraceCarrier`] for the error type `T`.
pub fn downcast_carrier<'a, T>(err: &'a (dyn Error + 'static)) -> Option<&'a dyn HasStackTrace>
where
    T: Error + HasStackTrace + 'static,
{
    err.downcast_ref::<T>().map(|traced| traced as &dyn HasStackTrace)
}

/// The first error in the chain of `err` exposing a stack trace.
///
/// Walks one level at a time through [`Error::source`]; `None` when the chain
/// ends without one. Only [`Traced`] is recognized; see
/// [`find_stack_trace_with`] for other carriers.
pub fn find_stack_trace<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a dyn HasStackTrace> {
    find_stack_trace_with(err, &[])
}

/// Like [`find_stack_trace`], also recognizing the error types of `carriers`.
pub fn find_stack_trace_with<'a>(
    err: &'a (dyn Error + 'static),
    carriers: &[TraceCarrier],
) -> Option<&'a dyn HasStackTrace> {
    let mut current = Some(err);
    while let Some(err) = current {
        let found = downcast_carrier::<Traced>(err)
            .or_else(|| carriers.iter().find_map(|carrier| carrier(err)));
        if found.is_some() {
            return found;
        }
        current = err.source();
    }
    None
}

/// Capture the current call stack, innermost frame first.
fn capture_frames() -> Vec<StackFrame> {
    let backtrace = backtrace::Backtrace::new();
    backtrace
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .map(|symbol| {
            let name = symbol.name().map(|n| format!("{n:#}")).unwrap_or_default();
            let file = symbol
                .filename()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            StackFrame::from_symbol(&name, file, symbol.lineno().unwrap_or(0))
        })
        .collect()
}
