//! Attach, extend and detach the carrier on a propagation context.

use std::fmt::Debug;

use serde::Serialize;

use crate::context::data::{to_field_value, value_string, ContextData};
use crate::context::propagation::Context;

/// The reserved context key holding the carrier.
pub const CONTEXT_KEY: &str = "logger";

/// The authenticated account.
pub const ACCOUNT_KEY: &str = "account";

/// The request id.
pub const REQUEST_KEY: &str = "id";

/// The user id.
pub const USER_KEY: &str = "uid";

/// The user device id.
pub const DEVICE_KEY: &str = "did";

/// The active client channel id.
pub const CLIENT_KEY: &str = "cid";

/// The request user agent.
pub const USER_AGENT_KEY: &str = "agent";

/// Anything that can report the request id of an inbound request.
///
/// Returns an empty string when no id is available.
pub trait RequestIdSource {
    fn request_id(&self) -> String;
}

impl RequestIdSource for str {
    fn request_id(&self) -> String {
        self.to_string()
    }
}

impl RequestIdSource for String {
    fn request_id(&self) -> String {
        self.clone()
    }
}

/// Derive a context holding a fresh carrier seeded with the request id.
///
/// ```
/// use ctxlog::context::{attach, request_id, Context};
///
/// let ctx = attach(&Context::background(), "req-1");
/// assert_eq!(request_id(&ctx), "req-1");
/// ```
pub fn attach<S>(parent: &Context, source: &S) -> Context
where
    S: RequestIdSource + ?Sized,
{
    let mut data = ContextData::new();

    let id = source.request_id();
    if !id.is_empty() {
        data.insert(REQUEST_KEY, id);
    }

    parent.with_value(CONTEXT_KEY, data)
}

/// Derive a context whose carrier additionally holds `key=value`.
///
/// The parent's carrier is copied, never mutated.
pub fn with_value<V>(ctx: &Context, key: impl Into<String>, value: V) -> Context
where
    V: Serialize + Debug,
{
    let mut data = detach(ctx).unwrap_or_default();
    data.insert(key, to_field_value(&value));
    ctx.with_value(CONTEXT_KEY, data)
}

/// The carrier attached to `ctx`, if any.
pub fn detach(ctx: &Context) -> Option<ContextData> {
    ctx.value::<ContextData>(CONTEXT_KEY).cloned()
}

/// The request id attached to `ctx`, or an empty string.
pub fn request_id(ctx: &Context) -> String {
    ctx.value::<ContextData>(CONTEXT_KEY)
        .and_then(|data| data.get(REQUEST_KEY))
        .map(value_string)
        .unwrap_or_default()
}
