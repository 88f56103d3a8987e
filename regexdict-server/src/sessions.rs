// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Builder session registry
//!
//! Every client gets its own `BuilderSession` and expansion coordinator.
//! Sessions nobody touches for `idle_ttl` are evicted; eviction cancels any
//! expansion the session still has in flight.

use moka::notification::RemovalCause;
use moka::sync::Cache;
use parking_lot::Mutex;
use regexdict_core::BuilderSession;
use regexdict_expand::ExpansionCoordinator;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session limit of {0} reached")]
    LimitReached(usize),
}

/// One client's builder state
#[derive(Debug, Default)]
pub struct SessionHandle {
    pub builder: Mutex<BuilderSession>,
    pub expansion: ExpansionCoordinator,
}

pub struct SessionRegistry {
    /// Session id -> handle, expired after `idle_ttl` without access
    sessions: Cache<Uuid, Arc<SessionHandle>>,
    /// Serializes the capacity check with the insert
    create_lock: Mutex<()>,
    max_sessions: usize,
}

impl SessionRegistry {
    pub fn new(max_sessions: usize, idle_ttl: Duration) -> Self {
        let sessions = Cache::builder()
            .time_to_idle(idle_ttl)
            .eviction_listener(
                |id: Arc<Uuid>, handle: Arc<SessionHandle>, cause: RemovalCause| {
                    if cause == RemovalCause::Replaced {
                        return;
                    }
                    if let Some(request_id) = handle.expansion.cancel_outstanding() {
                        tracing::debug!(
                            session_id = %id,
                            request_id,
                            "Cancelled expansion of evicted session"
                        );
                    }
                    tracing::info!(session_id = %id, ?cause, "Session evicted");
                },
            )
            .build();

        Self {
            sessions,
            create_lock: Mutex::new(()),
            max_sessions,
        }
    }

    pub fn create(&self) -> Result<Uuid, SessionError> {
        let _guard = self.create_lock.lock();

        if self.len() >= self.max_sessions {
            tracing::warn!(max = self.max_sessions, "Session limit reached");
            return Err(SessionError::LimitReached(self.max_sessions));
        }

        let id = Uuid::new_v4();
        self.sessions.insert(id, Arc::new(SessionHandle::default()));
        tracing::info!(session_id = %id, "Session created");
        Ok(id)
    }

    /// Look up a session. Each lookup resets its idle timer.
    pub fn get(&self, id: &Uuid) -> Option<Arc<SessionHandle>> {
        self.sessions.get(id)
    }

    /// Remove a session, cancelling any expansion it still has in flight.
    pub fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.remove(id).is_some();
        // Flush so the eviction listener runs before we return
        self.sessions.run_pending_tasks();
        removed
    }

    /// Number of live sessions. Applies pending evictions first.
    pub fn len(&self) -> usize {
        self.sessions.run_pending_tasks();
        self.sessions.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }
}
