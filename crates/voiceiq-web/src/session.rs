//! Session store for authenticated users
//!
//! The browser only ever holds an opaque session cookie; the backend bearer
//! token stays on this side, keyed by the cookie value. The cookie survives
//! page reloads, logout removes the entry, and entries past their TTL are
//! treated as absent.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use http::{HeaderMap, header};
use uuid::Uuid;
use voiceiq_core::User;

/// One authenticated session
#[derive(Debug, Clone)]
pub struct Session {
    /// Bearer token issued by the backend
    pub token: String,

    /// The logged-in user
    pub user: User,

    /// When the session was created
    pub created_at: DateTime<Utc>,
}

/// In-memory store of active sessions
#[derive(Debug)]
pub struct SessionStore {
    entries: DashMap<Uuid, Session>,
    ttl: chrono::Duration,
}

impl SessionStore {
    /// Create an empty store with the given session time-to-live
    #[must_use]
    pub fn new(ttl: chrono::Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Create a session for a freshly authenticated user
    ///
    /// Returns the identifier that becomes the cookie value.
    pub fn insert(&self, user: User, token: String) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.insert(
            id,
            Session {
                token,
                user,
                created_at: Utc::now(),
            },
        );
        id
    }

    /// Look up a session, dropping it when past its TTL
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<Session> {
        let session = self.entries.get(&id).map(|entry| entry.value().clone())?;

        if Utc::now() - session.created_at > self.ttl {
            self.entries.remove(&id);
            return None;
        }

        Some(session)
    }

    /// Remove a session (logout)
    pub fn remove(&self, id: Uuid) -> Option<Session> {
        self.entries.remove(&id).map(|(_, session)| session)
    }

    /// Number of live entries, expired ones included until touched
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the `Set-Cookie` value establishing a session
#[must_use]
pub fn session_cookie(name: &str, id: Uuid, ttl_seconds: u64) -> String {
    format!("{name}={id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}")
}

/// Build the `Set-Cookie` value clearing the session cookie
#[must_use]
pub fn clear_session_cookie(name: &str) -> String {
    format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Extract the session identifier from a request's `Cookie` header
#[must_use]
pub fn session_id_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<Uuid> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == cookie_name {
            Uuid::parse_str(value.trim()).ok()
        } else {
            None
        }
    })
}
