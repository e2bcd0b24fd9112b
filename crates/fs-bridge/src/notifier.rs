//! Sandbox-side announcement of filesystem mutations.
//!
//! One notification is one synchronous handler call across the host
//! boundary. The path is transcoded to the host's string representation
//! and copied; nothing is retained after the call returns. Absence of a
//! handler is normal and silently ignored.

use std::path::Path;
use std::sync::Arc;

use crate::host::{HostExports, ON_FILE_CHANGE, ON_FILE_DELETE};

/// Announces filesystem mutations to the host environment.
///
/// Stateless apart from a shared reference to the host's export registry.
/// Calls never fail, never block and never spawn work; a panic inside a
/// host handler propagates to the caller untouched.
#[derive(Clone)]
pub struct FsNotifier {
    exports: Arc<HostExports>,
}

impl FsNotifier {
    pub fn new(exports: Arc<HostExports>) -> Self {
        Self { exports }
    }

    /// Announces that the file or directory at `path` was created or
    /// modified.
    pub fn notify_modified<P: AsRef<Path>>(&self, path: P) {
        self.dispatch(ON_FILE_CHANGE, path.as_ref());
    }

    /// Announces that the file or directory at `path` was deleted.
    ///
    /// Covers both files and directories; the host recurses on its own
    /// mirror for directories.
    pub fn notify_deleted<P: AsRef<Path>>(&self, path: P) {
        self.dispatch(ON_FILE_DELETE, path.as_ref());
    }

    fn dispatch(&self, slot: &str, path: &Path) {
        let Some(handler) = self.exports.handler(slot) else {
            log::trace!(
                "no host handler in {slot}, dropping notification for {}",
                path.display()
            );
            return;
        };
        // Paths that are not valid text in the host encoding are
        // transcoded lossily.
        let path = path.to_string_lossy();
        handler(&path);
    }
}
