//! The host environment's export registry.
//!
//! The embedding exposes capabilities to the sandboxed runtime as named
//! slots. A slot can hold a handler (a unary procedure taking a path in
//! the host's string representation) or a plain value. Handler lookup is
//! duck-typed: a slot that is missing or holds a non-callable export is
//! treated as empty.
//!
//! The registry is built once by the embedding, before the sandbox
//! performs any filesystem mutation, and handed to the sandbox side as an
//! explicit dependency.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// Slot name for the handler invoked when a file or directory is modified.
pub const ON_FILE_CHANGE: &str = "onFileChange";

/// Slot name for the handler invoked when a file or directory is deleted.
pub const ON_FILE_DELETE: &str = "onFileDelete";

/// A host-supplied unary procedure taking a path in the host's native
/// string representation.
pub type HostHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// A value installed in a host export slot.
#[derive(Clone)]
pub enum HostExport {
    /// A callable handler.
    Handler(HostHandler),
    /// A non-callable text export.
    Text(String),
    /// A non-callable numeric export.
    Number(f64),
}

impl fmt::Debug for HostExport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(_) => f.write_str("Handler(..)"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Number(number) => f.debug_tuple("Number").field(number).finish(),
        }
    }
}

/// Registry of named capabilities the host exposes to the sandbox.
///
/// Safe to share across threads; lookups clone the handler out of the
/// slot, so no lock is held while a handler runs.
#[derive(Debug, Default)]
pub struct HostExports {
    slots: RwLock<HashMap<String, HostExport>>,
}

impl HostExports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs an export, replacing whatever the slot held before.
    pub fn set(&self, name: &str, export: HostExport) {
        self.slots.write().insert(name.to_owned(), export);
    }

    /// Installs a closure as a handler.
    pub fn set_handler<F>(&self, name: &str, handler: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.set(name, HostExport::Handler(Arc::new(handler)));
    }

    /// Clears a slot. Returns whether it held anything.
    pub fn remove(&self, name: &str) -> bool {
        self.slots.write().remove(name).is_some()
    }

    /// Whether the slot holds any export, callable or not.
    pub fn contains(&self, name: &str) -> bool {
        self.slots.read().contains_key(name)
    }

    /// Duck-typed handler lookup: `Some` only if the slot holds a
    /// callable.
    pub fn handler(&self, name: &str) -> Option<HostHandler> {
        match self.slots.read().get(name) {
            Some(HostExport::Handler(handler)) => Some(Arc::clone(handler)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_lookup_finds_installed_closures() {
        let exports = HostExports::new();
        exports.set_handler("onFileChange", |_| {});

        assert!(exports.contains("onFileChange"));
        assert!(exports.handler("onFileChange").is_some());
    }

    #[test]
    fn handler_lookup_treats_non_callable_exports_as_empty() {
        let exports = HostExports::new();
        exports.set("onFileChange", HostExport::Text("not callable".into()));
        exports.set("version", HostExport::Number(5.0));

        assert!(exports.contains("onFileChange"));
        assert!(exports.handler("onFileChange").is_none());
        assert!(exports.handler("version").is_none());
        assert!(exports.handler("missing").is_none());
    }

    #[test]
    fn set_replaces_and_remove_clears() {
        let exports = HostExports::new();
        exports.set_handler("onFileDelete", |_| {});
        exports.set("onFileDelete", HostExport::Number(0.0));
        assert!(exports.handler("onFileDelete").is_none());

        assert!(exports.remove("onFileDelete"));
        assert!(!exports.remove("onFileDelete"));
        assert!(!exports.contains("onFileDelete"));
    }
}
