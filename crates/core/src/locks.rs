//! Per-path advisory locks.
//!
//! Folder creation, folder replacement and file copies check the filesystem and then act on
//! it. [`PathLocks`] serialises those sequences for callers that share one service: a path is
//! held by at most one guard at a time, and other callers for the same path block until the
//! guard drops. Different paths never contend.
//!
//! Only paths currently held are stored, so the table never grows beyond the number of
//! in-flight operations. Reads do not take locks.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Condvar, Mutex, PoisonError};

#[derive(Debug, Default)]
pub struct PathLocks {
    held: Mutex<HashSet<PathBuf>>,
    released: Condvar,
}

/// Holds a path until dropped.
#[derive(Debug)]
pub struct PathLockGuard<'a> {
    locks: &'a PathLocks,
    path: PathBuf,
}

impl PathLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until `path` is free, then holds it.
    pub fn lock(&self, path: &Path) -> PathLockGuard<'_> {
        // The set stays consistent even if a holder panicked, so poisoning is ignored.
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        while held.contains(path) {
            held = self
                .released
                .wait(held)
                .unwrap_or_else(PoisonError::into_inner);
        }
        held.insert(path.to_path_buf());

        PathLockGuard {
            locks: self,
            path: path.to_path_buf(),
        }
    }

    /// Number of paths currently held.
    pub fn held_count(&self) -> usize {
        self.held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl PathLockGuard<'_> {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PathLockGuard<'_> {
    fn drop(&mut self) {
        let mut held = self
            .locks
            .held
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        held.remove(&self.path);
        drop(held);
        self.locks.released.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_lock_releases_on_drop() {
        let locks = PathLocks::new();
        let path = Path::new("/data/CPA - Cancer Program A");

        {
            let guard = locks.lock(path);
            assert_eq!(guard.path(), path);
            assert_eq!(locks.held_count(), 1);
        }

        assert_eq!(locks.held_count(), 0);
        let _again = locks.lock(path);
        assert_eq!(locks.held_count(), 1);
    }

    #[test]
    fn test_distinct_paths_do_not_contend() {
        let locks = PathLocks::new();
        let _a = locks.lock(Path::new("/data/a"));
        let _b = locks.lock(Path::new("/data/b"));
        assert_eq!(locks.held_count(), 2);
    }

    #[test]
    fn test_same_path_is_mutually_exclusive() {
        let locks = Arc::new(PathLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = Arc::clone(&locks);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                thread::spawn(move || {
                    let _guard = locks.lock(Path::new("/data/shared"));
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    max_inside.fetch_max(now, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(5));
                    inside.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
        assert_eq!(locks.held_count(), 0);
    }
}
