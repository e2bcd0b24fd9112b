//! Boundary layer between a sandboxed runtime's native filesystem and a
//! host environment that mirrors part of it.
//!
//! The sandbox side announces mutations through [`FsNotifier`], which
//! invokes optional handlers the host installed in a [`HostExports`]
//! registry. The host side can use [`mirror`] to turn those announcements
//! into a queue of persist/delete actions for its own storage layer.
//!
//! Notifications are synchronous, infallible and fire-and-forget: a
//! missing handler is normal, not an error.

pub mod error;
pub mod host;
pub mod mirror;
pub mod notifier;
pub mod synced;

pub use error::{BridgeError, Result};
pub use host::{HostExport, HostExports, HostHandler, ON_FILE_CHANGE, ON_FILE_DELETE};
pub use mirror::{normalize_path, register_mirror, MirrorQueue, SyncAction, SyncScope};
pub use notifier::FsNotifier;
pub use synced::SyncedFs;
