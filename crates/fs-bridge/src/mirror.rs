//! Host-side helper that turns change notifications into mirror work.
//!
//! The host installs the two well-known handlers, normalizes each
//! incoming path, filters modifications against the directory trees it
//! actually mirrors, and queues persist/delete actions for its storage
//! layer to drain.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{BridgeError, Result};
use crate::host::{HostExports, ON_FILE_CHANGE, ON_FILE_DELETE};

/// Resolves `..` and `.` segments of `path` textually, without consulting
/// the filesystem.
///
/// The sandbox reports paths like `/engine/bin/../worlds/a/map.dat`; the
/// mirror keys on the resolved form. A leading `/` is preserved and `..`
/// at the root is dropped.
pub fn normalize_path(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// One unit of pending mirror work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Copy the file or directory at this path into the mirror.
    Persist(String),
    /// Remove this path, and for directories everything under it, from
    /// the mirror.
    Delete(String),
}

/// FIFO of mirror work, filled by the handlers and drained by the host's
/// persistence layer.
#[derive(Debug, Default)]
pub struct MirrorQueue {
    actions: Mutex<Vec<SyncAction>>,
}

impl MirrorQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, action: SyncAction) {
        self.actions.lock().push(action);
    }

    /// Takes every pending action, oldest first.
    pub fn drain(&self) -> Vec<SyncAction> {
        std::mem::take(&mut *self.actions.lock())
    }

    pub fn len(&self) -> usize {
        self.actions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.lock().is_empty()
    }
}

/// The set of directory trees the host mirrors.
///
/// The sandbox also writes caches and other scratch data that is not
/// worth persisting; anything outside the scope is ignored.
#[derive(Debug, Clone)]
pub struct SyncScope {
    roots: Vec<String>,
}

impl SyncScope {
    /// Builds a scope from absolute root paths. Roots are normalized;
    /// relative roots are rejected.
    pub fn new<I, S>(roots: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut normalized = Vec::new();
        for root in roots {
            let root = root.into();
            if !root.starts_with('/') {
                return Err(BridgeError::RelativeScopeRoot(root));
            }
            normalized.push(normalize_path(&root));
        }
        Ok(Self { roots: normalized })
    }

    /// Whether `path` (already normalized) lies inside a mirrored tree.
    ///
    /// Matches on segment boundaries: `/worlds-old/a` is not inside
    /// `/worlds`.
    pub fn contains(&self, path: &str) -> bool {
        self.roots.iter().any(|root| {
            if root == "/" {
                return path.starts_with('/');
            }
            path == root
                || (path.starts_with(root.as_str())
                    && path.as_bytes().get(root.len()) == Some(&b'/'))
        })
    }
}

/// Installs the two well-known handlers so that sandbox notifications
/// feed `queue`.
///
/// Modifications are scope-filtered. Deletions are forwarded unfiltered:
/// deleting a path the mirror never stored is a no-op there, and a
/// deletion must not be lost just because the path has since left scope.
pub fn register_mirror(exports: &HostExports, scope: SyncScope, queue: Arc<MirrorQueue>) {
    let persist_queue = Arc::clone(&queue);
    exports.set_handler(ON_FILE_CHANGE, move |path| {
        let path = normalize_path(path);
        if !scope.contains(&path) {
            log::trace!("change outside mirror scope, ignoring: {path}");
            return;
        }
        persist_queue.push(SyncAction::Persist(path));
    });

    exports.set_handler(ON_FILE_DELETE, move |path| {
        queue.push(SyncAction::Delete(normalize_path(path)));
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{normalize_path, register_mirror, MirrorQueue, SyncAction, SyncScope};
    use crate::error::BridgeError;
    use crate::host::HostExports;
    use crate::notifier::FsNotifier;

    #[test]
    fn normalize_resolves_dot_dot_and_dot_segments() {
        assert_eq!(
            normalize_path("/engine/bin/../worlds/a/./map.dat"),
            "/engine/worlds/a/map.dat"
        );
        assert_eq!(normalize_path("/a//b/"), "/a/b");
        assert_eq!(normalize_path("/../a"), "/a");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("a/../b"), "b");
    }

    #[test]
    fn scope_matches_on_segment_boundaries() {
        let scope = SyncScope::new(["/worlds", "/mods/"]).expect("scope");

        assert!(scope.contains("/worlds"));
        assert!(scope.contains("/worlds/a/map.dat"));
        assert!(scope.contains("/mods/tools/init.lua"));
        assert!(!scope.contains("/worlds-old/a"));
        assert!(!scope.contains("/cache/tmp"));
    }

    #[test]
    fn scope_rejects_relative_roots() {
        let error = SyncScope::new(["worlds"]).expect_err("relative root");
        match error {
            BridgeError::RelativeScopeRoot(root) => assert_eq!(root, "worlds"),
            other => panic!("expected relative root error, got: {other:?}"),
        }
    }

    #[test]
    fn root_scope_covers_every_absolute_path() {
        let scope = SyncScope::new(["/"]).expect("scope");
        assert!(scope.contains("/anything/at/all"));
    }

    #[test]
    fn registered_handlers_queue_persists_and_deletes_in_order() {
        let exports = Arc::new(HostExports::new());
        let queue = Arc::new(MirrorQueue::new());
        let scope = SyncScope::new(["/worlds"]).expect("scope");
        register_mirror(&exports, scope, Arc::clone(&queue));

        let notifier = FsNotifier::new(exports);
        notifier.notify_modified("/engine/bin/../worlds/a/map.dat");
        notifier.notify_modified("/cache/scratch.bin");
        notifier.notify_deleted("/cache/scratch.bin");
        notifier.notify_deleted("/worlds/a");

        assert_eq!(
            queue.drain(),
            [
                SyncAction::Persist("/worlds/a/map.dat".into()),
                SyncAction::Delete("/cache/scratch.bin".into()),
                SyncAction::Delete("/worlds/a".into()),
            ]
        );
        assert!(queue.is_empty());
    }
}
