//! Stack frames and the name derivations used to render them.

/// One entry of a captured call stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Source file path.
    pub file: String,
    /// Source line, 0 when unknown.
    pub line: u32,
    /// Raw function name, receiver-qualified as `(Type).method` for methods.
    pub function: String,
    /// Module path of the function, e.g. `ctxlog::logger`.
    pub module: String,
}

impl StackFrame {
    pub fn new(
        file: impl Into<String>,
        line: u32,
        function: impl Into<String>,
        module: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            function: function.into(),
            module: module.into(),
        }
    }

    /// Build a frame from a demangled Rust symbol.
    ///
    /// `app::orders::Service::create::{{closure}}` (or `{closure#0}`) becomes
    /// the function `(Service).create.closure` in module `app::orders`.
    pub fn from_symbol(symbol: &str, file: impl Into<String>, line: u32) -> Self {
        let (module, function) = split_symbol(symbol);
        Self {
            file: file.into(),
            line,
            function,
            module,
        }
    }

    /// The crate a frame's function belongs to.
    pub fn crate_name(&self) -> &str {
        self.module.split("::").next().unwrap_or_default()
    }

    /// Render as `<package>.<function>:<file>:<line>`.
    pub fn render(&self) -> String {
        format!(
            "{}.{}:{}:{}",
            pkgname(&self.file),
            funcname(&self.function),
            self.file,
            self.line
        )
    }
}

/// Strip the receiver qualifier from a function name.
///
/// ```
/// use ctxlog::stack::funcname;
///
/// assert_eq!(funcname("Log"), "Log");
/// assert_eq!(funcname("(*service).Add.1"), "Add.1");
/// ```
pub fn funcname(name: &str) -> &str {
    match name.rsplit_once(").") {
        Some((_, function)) => function,
        None => name,
    }
}

/// Derive the package name from a source file path.
///
/// ```
/// use ctxlog::stack::pkgname;
///
/// assert_eq!(pkgname("pkg/test/log"), "log");
/// assert_eq!(pkgname("/go/pkg/mod/github.com/labstack/echo/v4@v4.12.0/echo.go"), "echo");
/// ```
pub fn pkgname(path: &str) -> &str {
    let chunks: Vec<&str> = path.split('/').collect();
    if chunks.len() == 1 {
        return match path.rsplit_once('.') {
            Some((stem, _)) => stem,
            None => path,
        };
    }

    // A path ending in a directory names the package itself
    let last = chunks[chunks.len() - 1];
    if !last.is_empty() && !last.contains('.') {
        return last;
    }

    chunks[..chunks.len() - 1]
        .iter()
        .rev()
        // skip empty segments and version markers, e.g. v4@v4.12.0, axum-0.8.1
        .find(|chunk| !chunk.is_empty() && !chunk.contains('.'))
        .copied()
        .unwrap_or("main")
}

/// Split a demangled symbol into its module path and raw function name.
fn split_symbol(symbol: &str) -> (String, String) {
    let mut segments = split_path(symbol);

    if segments.last().is_some_and(|s| is_hash(s)) {
        segments.pop();
    }

    // Trailing closures and turbofish arguments, e.g. `run::<T>::{closure#0}`
    let mut closures = 0;
    while let Some(last) = segments.last() {
        if is_closure(last) {
            closures += 1;
        } else if !(last.starts_with('<') && segments.len() > 1) {
            break;
        }
        segments.pop();
    }

    let Some(function) = segments.pop() else {
        return (String::new(), symbol.to_string());
    };
    let function = strip_shim(strip_generics(function));

    let trait_impl = segments.len() == 1 && segments[0].starts_with('<');
    let (module, receiver) = if trait_impl {
        // <crate::module::Type as Trait>::method
        let inner = segments[0].trim_start_matches('<').trim_end_matches('>');
        let self_type = inner.split(" as ").next().unwrap_or(inner);
        let mut type_path: Vec<&str> = split_path(self_type)
            .into_iter()
            .map(strip_generics)
            .collect();
        let receiver = type_path.pop().map(str::to_string);
        (type_path.join("::"), receiver)
    } else {
        let mut path: Vec<&str> = segments.into_iter().map(strip_generics).collect();
        let receiver = match path.last() {
            Some(last) if last.starts_with(|c: char| c.is_ascii_uppercase()) => {
                path.pop().map(str::to_string)
            }
            _ => None,
        };
        (path.join("::"), receiver)
    };

    let mut raw = match receiver {
        Some(receiver) => format!("({receiver}).{function}"),
        None => function.to_string(),
    };
    for _ in 0..closures {
        raw.push_str(".closure");
    }

    (module, raw)
}

/// Split on `::` outside of angle brackets.
fn split_path(symbol: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let bytes = symbol.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&symbol[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&symbol[start..]);
    segments.retain(|s| !s.is_empty());
    segments
}

fn strip_generics(segment: &str) -> &str {
    match segment.find('<') {
        Some(0) | None => segment,
        Some(idx) => &segment[..idx],
    }
}

/// `{{closure}}` in the legacy mangling, `{closure#0}` in v0.
fn is_closure(segment: &str) -> bool {
    segment.starts_with("{{closure") || segment.starts_with("{closure")
}

/// Drop a `{{vtable.shim}}` style suffix.
fn strip_shim(function: &str) -> &str {
    match function.find('{') {
        Some(0) | None => function,
        Some(idx) => &function[..idx],
    }
}

fn is_hash(segment: &str) -> bool {
    segment.len() == 17
        && segment.starts_with('h')
        && segment[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_func_name() {
        let testcases = [
            ("Log", "Log"),
            ("Debug", "Debug"),
            ("(*service).Add", "Add"),
            ("(*service).Add.1", "Add.1"),
            ("(*service).Process", "Process"),
            ("(*service).Process.2", "Process.2"),
            ("", ""),
        ];

        for (input, output) in testcases {
            assert_eq!(funcname(input), output, "funcname({input:?})");
        }
    }

    #[test]
    fn test_package_name() {
        let testcases = [
            ("/go/pkg/mod/github.com/labstack/echo/v4@v4.12.0/echo.go", "echo"),
            (
                "/go/pkg/mod/github.com/labstack/echo/v4@v4.12.0/middleware/recover.go",
                "middleware",
            ),
            ("/go/1.23.0/libexec/src/testing/testing.go", "testing"),
            ("/go/testing.go", "go"),
            ("/testing.go", "main"),
            ("testing.go", "testing"),
            ("test.go", "test"),
            ("pkg/test/log", "log"),
            ("", ""),
            (
                "/home/u/.cargo/registry/src/index.crates.io-6f17d22bba15001f/axum-0.8.1/src/routing/route.rs",
                "routing",
            ),
            ("src/logger/mod.rs", "logger"),
        ];

        for (input, output) in testcases {
            assert_eq!(pkgname(input), output, "pkgname({input:?})");
        }
    }

    #[test]
    fn test_symbol_free_function() {
        let frame = StackFrame::from_symbol("app::orders::create", "src/orders.rs", 10);
        assert_eq!(frame.module, "app::orders");
        assert_eq!(frame.function, "create");
        assert_eq!(frame.crate_name(), "app");
    }

    #[test]
    fn test_symbol_method_and_closure() {
        let frame = StackFrame::from_symbol(
            "app::orders::Service::create::{{closure}}::h0123456789abcdef",
            "src/orders.rs",
            12,
        );
        assert_eq!(frame.module, "app::orders");
        assert_eq!(frame.function, "(Service).create.closure");
        assert_eq!(funcname(&frame.function), "create.closure");
    }

    #[test]
    fn test_symbol_numbered_closure() {
        let frame = StackFrame::from_symbol("app::orders::Service::create::{closure#0}", "", 0);
        assert_eq!(frame.module, "app::orders");
        assert_eq!(frame.function, "(Service).create.closure");

        let frame = StackFrame::from_symbol("app::handlers::get_order::{closure#0}::{closure#1}", "", 0);
        assert_eq!(frame.module, "app::handlers");
        assert_eq!(frame.function, "get_order.closure.closure");
    }

    #[test]
    fn test_symbol_turbofish() {
        let frame = StackFrame::from_symbol("std::panicking::catch_unwind::do_call::<F, R>", "", 0);
        assert_eq!(frame.module, "std::panicking::catch_unwind");
        assert_eq!(frame.function, "do_call");

        let frame = StackFrame::from_symbol(
            "std::panicking::catch_unwind::do_call::<core::result::Result<(), alloc::string::String>, core::panic::unwind_safe::AssertUnwindSafe<F>>",
            "",
            0,
        );
        assert_eq!(frame.function, "do_call");

        let frame = StackFrame::from_symbol(
            "tokio::runtime::task::core::Core<T, S>::poll::<F>::{closure#0}",
            "",
            0,
        );
        assert_eq!(frame.module, "tokio::runtime::task::core");
        assert_eq!(frame.function, "(Core).poll.closure");
    }

    #[test]
    fn test_symbol_trait_impl_with_turbofish() {
        let frame = StackFrame::from_symbol(
            "<app::orders::Service as app::Handler>::handle::<u64>",
            "",
            0,
        );
        assert_eq!(frame.module, "app::orders");
        assert_eq!(frame.function, "(Service).handle");
    }

    #[test]
    fn test_symbol_vtable_shim() {
        let frame = StackFrame::from_symbol(
            "core::ops::function::FnOnce::call_once{{vtable.shim}}",
            "",
            0,
        );
        assert_eq!(frame.function, "(FnOnce).call_once");
    }

    #[test]
    fn test_symbol_trait_impl() {
        let frame = StackFrame::from_symbol(
            "<alloc::boxed::Box<F,A> as core::ops::function::FnOnce<Args>>::call_once",
            "",
            0,
        );
        assert_eq!(frame.module, "alloc::boxed");
        assert_eq!(frame.function, "(Box).call_once");
    }

    #[test]
    fn test_render() {
        let frame = StackFrame::new("src/orders/service.rs", 42, "(Service).create", "app::orders");
        assert_eq!(frame.render(), "orders.create:src/orders/service.rs:42");
    }
}
