//! Offline single-device clock. This is the localStorage-style fallback
//! path: a private entry log plus at most one active shift, persisted as a
//! JSON file. It never talks to the ledger and is never reconciled with it.

use crate::domain::shift::local_date;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackEntry {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
    pub duration_minutes: i64,
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveShift {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    pub note: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredLog {
    entries: Vec<FallbackEntry>,
    active: Option<ActiveShift>,
}

/// File-backed shift tracker for the offline/demo mode.
#[derive(Debug)]
pub struct FallbackClock {
    path: PathBuf,
    log: StoredLog,
}

impl FallbackClock {
    /// Loads the log from `path`. A missing or unreadable file starts an
    /// empty log rather than failing; this mirrors how the browser client
    /// treats corrupt localStorage.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let log = fs::read(&path).ok().and_then(|bytes| serde_json::from_slice(&bytes).ok()).unwrap_or_default();
        Self { path, log }
    }

    /// Starts a shift. No-op (returns `None`) when one is already active.
    pub fn clock_in(&mut self, note: &str) -> io::Result<Option<&ActiveShift>> {
        self.clock_in_at(note, OffsetDateTime::now_utc())
    }

    pub fn clock_in_at(&mut self, note: &str, start: OffsetDateTime) -> io::Result<Option<&ActiveShift>> {
        if self.log.active.is_some() {
            return Ok(None);
        }
        self.log.active = Some(ActiveShift { id: Uuid::new_v4(), start, note: note.trim().to_string() });
        self.save()?;
        Ok(self.log.active.as_ref())
    }

    /// Ends the active shift and prepends it to the history. No-op when
    /// nothing is active.
    pub fn clock_out(&mut self) -> io::Result<Option<FallbackEntry>> {
        self.clock_out_at(OffsetDateTime::now_utc())
    }

    pub fn clock_out_at(&mut self, end: OffsetDateTime) -> io::Result<Option<FallbackEntry>> {
        let Some(active) = self.log.active.take() else {
            return Ok(None);
        };
        let entry = FallbackEntry {
            id: active.id,
            start: active.start,
            end,
            duration_minutes: rounded_minutes(active.start, end),
            note: active.note,
        };
        self.log.entries.insert(0, entry.clone());
        self.save()?;
        Ok(Some(entry))
    }

    /// Clears history and the active shift. Callers ask the user first;
    /// confirmation is a UI concern, not a storage one.
    pub fn reset(&mut self) -> io::Result<()> {
        self.log = StoredLog::default();
        self.save()
    }

    #[must_use]
    pub const fn active(&self) -> Option<&ActiveShift> {
        self.log.active.as_ref()
    }

    #[must_use]
    pub fn entries(&self) -> &[FallbackEntry] {
        &self.log.entries
    }

    /// Newest-first slice of at most `n` entries.
    #[must_use]
    pub fn recent(&self, n: usize) -> &[FallbackEntry] {
        &self.log.entries[..n.min(self.log.entries.len())]
    }

    /// Minutes worked across entries that ended on the current local day.
    #[must_use]
    pub fn total_today_minutes(&self) -> i64 {
        let today = local_date(OffsetDateTime::now_utc());
        self.log.entries.iter().filter(|e| local_date(e.end) == today).map(|e| e.duration_minutes).sum()
    }

    fn save(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(&self.log).map_err(io::Error::other)?;
        fs::write(&self.path, json)
    }
}

/// The client-side duration policy: nearest whole minute, never below one.
/// Unlike the ledger's ceil, the original browser client rounds; the two
/// stores are independent and deliberately keep their own policies.
fn rounded_minutes(start: OffsetDateTime, end: OffsetDateTime) -> i64 {
    let ms = (end - start).whole_milliseconds();
    if ms <= 0 {
        return 1;
    }
    let minutes = (ms + 30_000) / 60_000;
    i64::try_from(minutes.max(1)).unwrap_or(i64::MAX)
}
