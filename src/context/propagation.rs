//! Immutable, hierarchical propagation context.
//!
//! # Design Decisions
//! - Every derivation allocates one node pointing at its parent
//! - Lookups walk child → parent, nearest key wins
//! - Nodes are shared via Arc, so cloning a context is cheap and `Send + Sync`

use std::any::Any;
use std::fmt;
use std::sync::Arc;

struct Node {
    parent: Option<Arc<Node>>,
    key: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

/// A request-scoped, key-addressed value carrier.
///
/// A derived context sees every value of its ancestors; ancestors never see
/// values added by their descendants.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// The empty root context.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a child context carrying `value` under `key`.
    pub fn with_value<T>(&self, key: &'static str, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            head: Some(Arc::new(Node {
                parent: self.head.clone(),
                key,
                value: Arc::new(value),
            })),
        }
    }

    /// Look up the nearest value stored under `key`.
    ///
    /// Returns `None` when the key is missing or the nearest value is not a `T`.
    pub fn value<T>(&self, key: &str) -> Option<&T>
    where
        T: Any + Send + Sync,
    {
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            if current.key == key {
                return current.value.downcast_ref::<T>();
            }
            node = current.parent.as_deref();
        }
        None
    }

    fn keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            keys.push(current.key);
            node = current.parent.as_deref();
        }
        keys
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").field("keys", &self.keys()).finish()
    }
}
