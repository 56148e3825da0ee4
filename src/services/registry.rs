//! Per-session dashboards sharing one record store client.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::repository::LeadStore;
use crate::services::dashboard::Dashboard;
use crate::services::{ServiceError, ServiceResult};

/// Sessions kept before the least recently used one is dropped.
pub const DEFAULT_MAX_SESSIONS: usize = 1000;
/// Idle time after which a session's dashboard is dropped.
pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(30 * 60);

pub type SharedDashboard = Arc<Mutex<Dashboard>>;

struct SessionEntry {
    dashboard: SharedDashboard,
    last_seen: Instant,
}

/// Maps browser sessions to their dashboard controller.
///
/// The map is bounded: idle sessions expire and, once `max_sessions` is
/// reached, a new session evicts the least recently used one. A browser
/// whose dashboard was dropped gets a fresh one that reloads on next use.
pub struct DashboardRegistry {
    store: Arc<dyn LeadStore>,
    per_page: usize,
    max_sessions: usize,
    idle_timeout: Duration,
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
}

impl DashboardRegistry {
    pub fn new(store: Arc<dyn LeadStore>, per_page: usize) -> Self {
        Self {
            store,
            per_page,
            max_sessions: DEFAULT_MAX_SESSIONS,
            idle_timeout: DEFAULT_SESSION_IDLE,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_limits(mut self, max_sessions: usize, idle_timeout: Duration) -> Self {
        self.max_sessions = max_sessions.max(1);
        self.idle_timeout = idle_timeout;
        self
    }

    /// Returns the dashboard of `session`, creating an unloaded one on first use.
    pub fn get_or_create(&self, session: Uuid) -> ServiceResult<SharedDashboard> {
        self.get_or_create_at(session, Instant::now())
    }

    fn get_or_create_at(&self, session: Uuid, now: Instant) -> ServiceResult<SharedDashboard> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|err| ServiceError::Internal(err.to_string()))?;

        let before = sessions.len();
        sessions.retain(|_, entry| now.saturating_duration_since(entry.last_seen) < self.idle_timeout);
        if sessions.len() < before {
            log::debug!("Expired {} idle dashboards", before - sessions.len());
        }

        if let Some(entry) = sessions.get_mut(&session) {
            entry.last_seen = now;
            return Ok(Arc::clone(&entry.dashboard));
        }

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    log::debug!("Evicting dashboard for session {id}");
                    sessions.remove(&id);
                }
                None => break,
            }
        }

        log::debug!("Creating dashboard for session {session}");
        let dashboard = Arc::new(Mutex::new(Dashboard::new(
            Arc::clone(&self.store),
            self.per_page,
        )));
        sessions.insert(
            session,
            SessionEntry {
                dashboard: Arc::clone(&dashboard),
                last_seen: now,
            },
        );
        Ok(dashboard)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
