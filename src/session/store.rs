//! Play sessions and their high score tables
//!
//! All sessions are kept in one JSON document, rewritten on every change:
//!
//! ```json
//! { "session_1718000000000": { "id": "session_1718000000000",
//!     "startTime": "2024-06-10T06:13:20.000Z",
//!     "scores": [ { "score": 40, "level": 3, "date": "...", "timestamp": 1718000100000 } ] } }
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Local, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::blob::BlobStore;
use crate::config::{MAX_HIGH_SCORES, SESSIONS_KEY};
use crate::error::Result;

pub type SessionId = String;

/// One finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    pub level: u32,
    /// Local time, preformatted for display
    pub date: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl ScoreEntry {
    pub fn new(score: u32, level: u32, at: DateTime<Utc>) -> Self {
        Self {
            score,
            level,
            date: at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
            timestamp: at.timestamp_millis(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub start_time: DateTime<Utc>,
    /// Best first, at most `MAX_HIGH_SCORES`
    #[serde(default)]
    pub scores: Vec<ScoreEntry>,
}

impl Session {
    fn new(id: SessionId, start_time: DateTime<Utc>) -> Self {
        Self {
            id,
            start_time,
            scores: Vec::new(),
        }
    }

    /// Whole minutes since the session started
    pub fn duration_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.start_time).num_minutes().max(0)
    }

    fn record(&mut self, entry: ScoreEntry) {
        self.scores.push(entry);
        self.scores.sort_by(|a, b| b.score.cmp(&a.score));
        self.scores.truncate(MAX_HIGH_SCORES);
    }
}

/// Sessions keyed by id plus the id of the active one
pub struct SessionStore<B: BlobStore> {
    blob: B,
    sessions: BTreeMap<SessionId, Session>,
    current: SessionId,
}

impl<B: BlobStore> SessionStore<B> {
    /// Restore sessions from `blob`. A missing or unreadable document starts
    /// empty; an empty store gets a fresh session.
    pub fn load(blob: B) -> Self {
        let sessions = match blob.get(SESSIONS_KEY) {
            Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!("Discarding unreadable session document: {}", e);
                BTreeMap::new()
            }),
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                warn!("Could not read session document: {}", e);
                BTreeMap::new()
            }
        };

        let mut store = Self {
            blob,
            sessions,
            current: SessionId::new(),
        };

        // Ids embed their creation time, so the greatest is the newest
        match store.sessions.keys().next_back().cloned() {
            Some(latest) => {
                info!("Loaded {} sessions, resuming {}", store.sessions.len(), latest);
                store.current = latest;
            }
            None => {
                if let Err(e) = store.create_session() {
                    warn!("New session not persisted: {}", e);
                }
            }
        }
        store
    }

    /// Start a new empty session and make it current
    pub fn create_session(&mut self) -> Result<SessionId> {
        self.create_session_at(Utc::now())
    }

    pub fn create_session_at(&mut self, now: DateTime<Utc>) -> Result<SessionId> {
        let id = self.insert_session(now);
        info!("Created session {}", id);
        self.persist()?;
        Ok(id)
    }

    /// Record a finished game. An unknown `id` gets a new session instead.
    pub fn submit_score(&mut self, id: &str, score: u32, level: u32) -> Result<()> {
        self.submit_score_at(id, score, level, Utc::now())
    }

    pub fn submit_score_at(
        &mut self,
        id: &str,
        score: u32,
        level: u32,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let target = if self.sessions.contains_key(id) {
            id.to_string()
        } else {
            debug!("Session {:?} missing, creating one for the score", id);
            self.insert_session(now)
        };

        if let Some(session) = self.sessions.get_mut(&target) {
            session.record(ScoreEntry::new(score, level, now));
            debug!("Recorded score {} (level {}) in {}", score, level, target);
        }
        self.persist()
    }

    /// Make `id` the current session. Nothing is written.
    pub fn switch_to(&mut self, id: &str) {
        if self.current != id {
            info!("Switched to session {}", id);
            self.current = id.to_string();
        }
    }

    pub fn current_id(&self) -> &str {
        &self.current
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.sessions.get(&self.current)
    }

    pub fn session(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    /// Sessions in selector order, most recently started first
    pub fn sessions_newest_first(&self) -> Vec<&Session> {
        let mut list: Vec<&Session> = self.sessions.values().collect();
        list.sort_by(|a, b| b.start_time.cmp(&a.start_time).then_with(|| b.id.cmp(&a.id)));
        list
    }

    /// Session after the current one in selector order, wrapping around
    pub fn next_session_id(&self) -> Option<SessionId> {
        let list = self.sessions_newest_first();
        let next = match list.iter().position(|s| s.id == self.current) {
            Some(index) => list.get((index + 1) % list.len()),
            None => list.first(),
        };
        next.map(|s| s.id.clone())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn blob(&self) -> &B {
        &self.blob
    }

    fn insert_session(&mut self, now: DateTime<Utc>) -> SessionId {
        let start_time = now.trunc_subsecs(3);
        let mut millis = start_time.timestamp_millis();
        let mut id = session_id(millis);
        while self.sessions.contains_key(&id) {
            millis += 1;
            id = session_id(millis);
        }
        self.sessions
            .insert(id.clone(), Session::new(id.clone(), start_time));
        self.current = id.clone();
        id
    }

    fn persist(&mut self) -> Result<()> {
        let document = serde_json::to_string(&self.sessions)?;
        self.blob.set(SESSIONS_KEY, &document)
    }
}

fn session_id(millis: i64) -> SessionId {
    format!("session_{millis}")
}
