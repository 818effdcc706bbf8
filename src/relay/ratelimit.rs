//! Per-address submission counter backed by one JSON file per caller.
//!
//! Each file holds an array of unix-second timestamps. A check takes an
//! exclusive advisory lock, drops entries older than the window, rejects
//! when the surviving count has reached the limit, and otherwise appends
//! the current time and rewrites. Files are small, never deleted, and a
//! corrupt or empty file reads as an empty history.
//!
//! Store trouble (unwritable directory, lock failure) fails open with a
//! warning: losing the counter must not take the contact form down.

use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use fs2::FileExt;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// Outcome of a rate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after_secs: i64 },
}

#[derive(Debug, Clone)]
pub struct RateStore {
    dir: PathBuf,
    limit: u32,
    window_secs: i64,
}

impl RateStore {
    pub fn new(dir: impl Into<PathBuf>, limit: u32, window_secs: i64) -> Self {
        Self {
            dir: dir.into(),
            limit,
            window_secs,
        }
    }

    /// Check and record one submission for `addr` at the current time.
    pub fn check(&self, addr: &str) -> RateDecision {
        self.check_at(addr, Utc::now().timestamp())
    }

    /// Clock-injected variant of [`RateStore::check`].
    pub fn check_at(&self, addr: &str, now: i64) -> RateDecision {
        match self.try_check(addr, now) {
            Ok(decision) => decision,
            Err(err) => {
                warn!(addr, error = %err, "rate store unavailable, allowing request");
                RateDecision::Allowed {
                    remaining: self.limit,
                }
            }
        }
    }

    fn try_check(&self, addr: &str, now: i64) -> anyhow::Result<RateDecision> {
        fs::create_dir_all(&self.dir)?;
        let path = self.entry_path(addr);

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&path)?;
        // Released when `file` closes at the end of this scope.
        file.lock_exclusive()?;

        let mut raw = String::new();
        file.read_to_string(&mut raw)?;
        let mut stamps: Vec<i64> = serde_json::from_str(&raw).unwrap_or_default();
        stamps.retain(|ts| *ts > now - self.window_secs);

        if stamps.len() >= self.limit as usize {
            let oldest = stamps.iter().copied().min().unwrap_or(now);
            let retry_after_secs = (oldest + self.window_secs - now).max(1);
            debug!(addr, count = stamps.len(), retry_after_secs, "rate limited");
            return Ok(RateDecision::Limited { retry_after_secs });
        }

        stamps.push(now);
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(serde_json::to_string(&stamps)?.as_bytes())?;

        Ok(RateDecision::Allowed {
            remaining: self.limit - stamps.len() as u32,
        })
    }

    /// Counter file for an address: a hash, so the directory never holds
    /// raw caller addresses.
    fn entry_path(&self, addr: &str) -> PathBuf {
        let digest = Sha256::digest(addr.as_bytes());
        self.dir.join(format!("{}.json", hex::encode(digest)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const T0: i64 = 1_700_000_000;

    fn store(dir: &Path) -> RateStore {
        RateStore::new(dir, 5, 3600)
    }

    #[test]
    fn five_allowed_then_sixth_limited() {
        let dir = tempdir().unwrap();
        let store = store(dir.path());

        for expected_remaining in (0..5).rev() {
            match store.check_at("203.0.113.9", T0) {
                RateDecision::Allowed { remaining } => {
                    assert_eq!(remaining, expected_remaining)
                }
                other => panic!("expected allowed, got {other:?}"),
            }
        }

        assert_eq!(
            store.check_at("203.0.113.9", T0),
            RateDecision::Limited {
                retry_after_secs: 3600
            }
        );
    }

    #[test]
    fn old_entries_fall_out_of_the_window() {
        let dir = tempdir().unwrap();
        let store = store(dir.path());

        for _ in 0..5 {
            store.check_at("203.0.113.9", T0);
        }
        assert!(matches!(
            store.check_at("203.0.113.9", T0 + 3599),
            RateDecision::Limited { .. }
        ));
        // One second after the first stamp leaves the window.
        assert!(matches!(
            store.check_at("203.0.113.9", T0 + 3601),
            RateDecision::Allowed { .. }
        ));
    }

    #[test]
    fn retry_after_counts_down() {
        let dir = tempdir().unwrap();
        let store = store(dir.path());

        for _ in 0..5 {
            store.check_at("203.0.113.9", T0);
        }
        assert_eq!(
            store.check_at("203.0.113.9", T0 + 1000),
            RateDecision::Limited {
                retry_after_secs: 2600
            }
        );
    }

    #[test]
    fn addresses_are_independent() {
        let dir = tempdir().unwrap();
        let store = store(dir.path());

        for _ in 0..5 {
            store.check_at("203.0.113.9", T0);
        }
        assert!(matches!(
            store.check_at("203.0.113.9", T0),
            RateDecision::Limited { .. }
        ));
        assert!(matches!(
            store.check_at("198.51.100.4", T0),
            RateDecision::Allowed { remaining: 4 }
        ));
    }

    #[test]
    fn corrupt_counter_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = store(dir.path());

        store.check_at("203.0.113.9", T0);
        let path = fs::read_dir(dir.path())
            .unwrap()
            .next()
            .unwrap()
            .unwrap()
            .path();
        fs::write(&path, "definitely not json").unwrap();

        assert_eq!(
            store.check_at("203.0.113.9", T0),
            RateDecision::Allowed { remaining: 4 }
        );
    }

    #[test]
    fn store_failure_fails_open() {
        // Using a file as the store directory makes create_dir_all fail.
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();

        let store = store(&blocker);
        assert_eq!(
            store.check_at("203.0.113.9", T0),
            RateDecision::Allowed { remaining: 5 }
        );
    }

    #[test]
    fn counter_files_use_hashed_names() {
        let dir = tempdir().unwrap();
        let store = store(dir.path());
        store.check_at("203.0.113.9", T0);

        let name = fs::read_dir(dir.path())
            .unwrap()
            .next()
            .unwrap()
            .unwrap()
            .file_name()
            .into_string()
            .unwrap();
        assert!(!name.contains("203.0.113.9"));
        assert!(name.ends_with(".json"));
        assert_eq!(name.len(), 64 + ".json".len());
    }
}