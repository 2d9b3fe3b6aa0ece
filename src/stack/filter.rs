//! Strip logging and HTTP-stack noise from captured traces.

use std::error::Error;
use std::fmt;

use crate::stack::frame::StackFrame;
use crate::stack::trace::{downcast_carrier, find_stack_trace_with, HasStackTrace, TraceCarrier};

/// Crates whose frames are the logging machinery itself.
pub const DEFAULT_SELF_CRATES: &[&str] = &["ctxlog", "backtrace"];

/// Path markers of the HTTP stack and web framework.
pub const DEFAULT_DENYLIST: &[&str] = &["/hyper-", "/axum-", "/tower-"];

/// Decides which frames of a trace reach the log record.
#[derive(Clone)]
pub struct FrameFilter {
    self_crates: Vec<String>,
    denylist: Vec<String>,
    carriers: Vec<TraceCarrier>,
}

impl Default for FrameFilter {
    fn default() -> Self {
        Self {
            self_crates: DEFAULT_SELF_CRATES.iter().map(|s| s.to_string()).collect(),
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
            carriers: Vec::new(),
        }
    }
}

impl FrameFilter {
    /// A filter that keeps every frame except the dropped last one.
    pub fn empty() -> Self {
        Self {
            self_crates: Vec::new(),
            denylist: Vec::new(),
            carriers: Vec::new(),
        }
    }

    /// Also treat frames of `name` as self frames.
    pub fn with_self_crate(mut self, name: impl Into<String>) -> Self {
        self.self_crates.push(name.into());
        self
    }

    /// Also skip frames whose file path contains `marker`.
    pub fn with_denied_path(mut self, marker: impl Into<String>) -> Self {
        self.denylist.push(marker.into());
        self
    }

    /// Also recognize `T` as an error carrying a stack trace.
    ///
    /// [`Traced`](crate::stack::Traced) is always recognized.
    pub fn with_stack_carrier<T>(mut self) -> Self
    where
        T: Error + HasStackTrace + 'static,
    {
        self.carriers.push(downcast_carrier::<T>);
        self
    }

    /// The first stack-carrying error in the chain of `err`.
    pub fn find_stack_trace<'a>(
        &self,
        err: &'a (dyn Error + 'static),
    ) -> Option<&'a dyn HasStackTrace> {
        find_stack_trace_with(err, &self.carriers)
    }

    pub fn is_self_frame(&self, frame: &StackFrame) -> bool {
        let name = frame.crate_name();
        self.self_crates.iter().any(|c| c == name)
    }

    pub fn is_denied(&self, frame: &StackFrame) -> bool {
        self.denylist.iter().any(|marker| frame.file.contains(marker.as_str()))
    }

    /// Render the caller-facing part of a trace.
    ///
    /// The last frame is the runtime entry point and is always dropped.
    pub fn filter_frames(&self, frames: &[StackFrame]) -> Vec<String> {
        let frames = match frames.split_last() {
            Some((_, rest)) => rest,
            None => frames,
        };

        frames
            .iter()
            .filter(|frame| !self.is_self_frame(frame))
            .filter(|frame| !self.is_denied(frame))
            .map(StackFrame::render)
            .collect()
    }
}

impl fmt::Debug for FrameFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameFilter")
            .field("self_crates", &self.self_crates)
            .field("denylist", &self.denylist)
            .field("carriers", &self.carriers.len())
            .finish()
    }
}

/// The filtered trace of the first stack-carrying error in the chain of `err`.
pub fn filter_stack(err: &(dyn Error + 'static), filter: &FrameFilter) -> Option<Vec<String>> {
    let traced = filter.find_stack_trace(err)?;
    Some(filter.filter_frames(traced.stack_trace()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::trace::Traced;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("request failed")]
    struct RequestFailed {
        #[source]
        source: Traced,
    }

    #[derive(Debug, Error)]
    #[error("no rows")]
    struct NoRows;

    fn synthetic_frames() -> Vec<StackFrame> {
        vec![
            StackFrame::new("/srv/app/src/orders/repo.rs", 31, "(Repo).find", "app::orders"),
            StackFrame::new("/srv/ctxlog/src/event/builder.rs", 88, "build_event", "ctxlog::event::builder"),
            StackFrame::new(
                "/root/.cargo/registry/src/index.crates.io-6f17d22bba15001f/axum-0.8.1/src/routing/route.rs",
                140,
                "(Route).call",
                "axum::routing::route",
            ),
            StackFrame::new("/srv/app/src/handlers.rs", 12, "get_order.closure", "app::handlers"),
            StackFrame::new("/rustc/library/std/src/rt.rs", 195, "lang_start", "std::rt"),
        ]
    }

    #[test]
    fn test_filter_chain() {
        let frames = synthetic_frames();
        let err = RequestFailed {
            source: Traced::from_frames(NoRows, frames.clone()),
        };

        let out = filter_stack(&err, &FrameFilter::default()).unwrap();

        // dropped last, one self frame, one denylisted frame
        assert_eq!(out.len(), frames.len() - 1 - 1 - 1);
        assert_eq!(
            out,
            vec![
                "orders.find:/srv/app/src/orders/repo.rs:31".to_string(),
                "src.get_order.closure:/srv/app/src/handlers.rs:12".to_string(),
            ]
        );
    }

    #[derive(Debug, Error)]
    #[error("query timed out")]
    struct QueryTimeout {
        frames: Vec<StackFrame>,
    }

    impl HasStackTrace for QueryTimeout {
        fn stack_trace(&self) -> &[StackFrame] {
            &self.frames
        }
    }

    #[test]
    fn test_registered_carrier() {
        let err = QueryTimeout {
            frames: synthetic_frames(),
        };
        assert!(filter_stack(&err, &FrameFilter::default()).is_none());

        let filter = FrameFilter::default().with_stack_carrier::<QueryTimeout>();
        let out = filter_stack(&err, &filter).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out[0].starts_with("orders.find:"));
    }

    #[test]
    fn test_absent_trace() {
        assert!(filter_stack(&NoRows, &FrameFilter::default()).is_none());
    }

    #[test]
    fn test_empty_trace() {
        let err = Traced::from_frames(NoRows, Vec::new());
        assert_eq!(filter_stack(&err, &FrameFilter::default()), Some(Vec::new()));
    }

    #[test]
    fn test_empty_filter_only_drops_last() {
        let frames = synthetic_frames();
        let out = FrameFilter::empty().filter_frames(&frames);
        assert_eq!(out.len(), frames.len() - 1);
    }

    #[test]
    fn test_custom_rules() {
        let filter = FrameFilter::empty()
            .with_self_crate("app")
            .with_denied_path("/rustc/");
        let out = filter.filter_frames(&synthetic_frames());
        assert_eq!(out.len(), 2);
        assert!(out[0].starts_with("event.build_event:"));
        assert!(out[1].starts_with("routing.call:"));
    }

    #[test]
    fn test_captured_trace_skips_self_frames() {
        let err = Traced::msg("captured");
        let out = filter_stack(&err, &FrameFilter::default()).unwrap();
        assert!(out.iter().all(|line| !line.contains("capture_frames")));
    }
}
