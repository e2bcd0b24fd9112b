//! Filesystem mutations that announce themselves.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::notifier::FsNotifier;

/// Facade over the native filesystem that reports every successful
/// mutation through an [`FsNotifier`].
///
/// The notifier is an explicit dependency: the embedding wires one up
/// against its export registry and hands it to whatever component writes
/// to disk. A failed operation reports nothing.
pub struct SyncedFs {
    notifier: FsNotifier,
}

impl SyncedFs {
    pub fn new(notifier: FsNotifier) -> Self {
        Self { notifier }
    }

    /// The notifier mutations are announced through.
    pub fn notifier(&self) -> &FsNotifier {
        &self.notifier
    }

    /// Writes `contents` to `path`, creating or truncating the file.
    pub fn write<P: AsRef<Path>, C: AsRef<[u8]>>(&self, path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, contents.as_ref())?;
        log::debug!("wrote {}", path.display());
        self.notifier.notify_modified(path);
        Ok(())
    }

    /// Creates `path` and any missing parent directories.
    pub fn create_dir_all<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::create_dir_all(path)?;
        self.notifier.notify_modified(path);
        Ok(())
    }

    /// Removes a single file.
    pub fn remove_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::remove_file(path)?;
        self.notifier.notify_deleted(path);
        Ok(())
    }

    /// Removes a directory and everything under it.
    ///
    /// One deletion is announced, for the root of the removed tree; the
    /// host recurses on its own mirror.
    pub fn remove_dir_all<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::remove_dir_all(path)?;
        self.notifier.notify_deleted(path);
        Ok(())
    }

    /// Renames `from` to `to`, announced as a deletion of the old path
    /// followed by a modification of the new one.
    pub fn rename<P: AsRef<Path>, Q: AsRef<Path>>(&self, from: P, to: Q) -> Result<()> {
        let (from, to) = (from.as_ref(), to.as_ref());
        fs::rename(from, to)?;
        self.notifier.notify_deleted(from);
        self.notifier.notify_modified(to);
        Ok(())
    }
}
