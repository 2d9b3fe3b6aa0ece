//! Classify call-site arguments and apply them to an event.

use std::panic::Location;

use crate::context::data::value_string;
use crate::context::detach;
use crate::event::arg::Arg;
use crate::event::record::Event;

/// Apply `args` to `event` in call order.
///
/// Text parts are joined with a single space into the message; errors are
/// attached (forcing a stack when stack mode is on); contexts contribute
/// their carrier fields; `true` flags force a stack; anything else lands in
/// the generic `any` field.
///
/// # Example
///
/// ```
/// use ctxlog::{args, build_event, Logger, LogConfig, MemorySink};
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = Logger::with_sink(&LogConfig::default(), sink.clone()).unwrap();
/// build_event(logger.info(args![]), args!["Hello", "world"]).send();
/// assert_eq!(sink.records()[0].message.as_deref(), Some("Hello world"));
/// ```
pub fn build_event<I>(event: Event, args: I) -> Event
where
    I: IntoIterator<Item = Arg>,
{
    if !event.enabled() {
        return event;
    }

    let mut event = event;
    let mut msgs: Vec<String> = Vec::new();

    for arg in args {
        event = match arg {
            Arg::Text(text) => {
                msgs.push(text);
                event
            }
            Arg::Error(err) => {
                let event = if event.stack_on_error() {
                    event.stack()
                } else {
                    event
                };
                event.error(err)
            }
            Arg::Context(ctx) => match detach(&ctx) {
                Some(data) if !data.is_empty() => event.fields(&data),
                _ => event,
            },
            Arg::Flag(true) => event.stack(),
            Arg::Flag(false) => event,
            Arg::Value(value) => event.value(value),
        };
    }

    if !msgs.is_empty() {
        event = event.message(msgs.join(" "));
    }

    event
}

/// Apply `args` to `event`, render `format` with the remaining arguments and
/// send.
///
/// Contexts are consumed as fields and never printed; errors are attached
/// and printed; everything else is printed as-is. The record reports the
/// caller of this function as its call site.
#[track_caller]
pub fn build_formatted_event<I>(event: Event, format: &str, args: I)
where
    I: IntoIterator<Item = Arg>,
{
    let caller = Location::caller();
    let mut event = event;
    let mut values: Vec<String> = Vec::new();

    for arg in args {
        match arg {
            Arg::Text(text) => values.push(text),
            Arg::Error(err) => {
                values.push(err.to_string());
                event = event.error(err);
            }
            Arg::Context(ctx) => {
                if let Some(data) = detach(&ctx) {
                    event = event.fields(&data);
                }
            }
            Arg::Flag(flag) => values.push(flag.to_string()),
            Arg::Value(value) => values.push(value_string(&value)),
        }
    }

    event.caller(caller).msg(render_format(format, &values));
}

/// Substitute `{}` placeholders in order.
///
/// `{{` and `}}` escape braces. Placeholders without an argument stay as
/// written; surplus arguments are appended, space separated.
pub fn render_format(format: &str, values: &[String]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut values = values.iter();
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('{', Some('{')) => {
                chars.next();
                out.push('{');
            }
            ('}', Some('}')) => {
                chars.next();
                out.push('}');
            }
            ('{', Some('}')) => {
                chars.next();
                match values.next() {
                    Some(value) => out.push_str(value),
                    None => out.push_str("{}"),
                }
            }
            _ => out.push(c),
        }
    }

    for value in values {
        out.push(' ');
        out.push_str(value);
    }

    out
}
