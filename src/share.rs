use crate::error::InertiaError;
use crate::utils::inertia_err_msg;
use actix_web::{HttpMessage, HttpRequest};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Session key under which shared props are kept.
pub const SHARE_SESSION_KEY: &str = "share";

/// A key/value view over the session a request belongs to.
///
/// Inertia does not manage sessions by itself. Implement this trait on top of
/// your framework's session manager (or use [`MemorySessionStore`]) and hand it
/// over with [`InertiaConfigBuilder::set_session_store`].
///
/// [`InertiaConfigBuilder::set_session_store`]: crate::InertiaConfigBuilder::set_session_store
pub trait SessionStore<THttpReq>: Send + Sync {
    fn get(&self, req: &THttpReq, key: &str) -> Result<Option<Value>, InertiaError>;

    fn set(&self, req: &THttpReq, key: &str, value: Value) -> Result<(), InertiaError>;
}

impl<THttpReq, S> SessionStore<THttpReq> for Arc<S>
where
    S: SessionStore<THttpReq> + ?Sized,
{
    fn get(&self, req: &THttpReq, key: &str) -> Result<Option<Value>, InertiaError> {
        self.as_ref().get(req, key)
    }

    fn set(&self, req: &THttpReq, key: &str, value: Value) -> Result<(), InertiaError> {
        self.as_ref().set(req, key, value)
    }
}

/// Reads the shared props map of the request's session.
pub(crate) fn load_shared<THttpReq, S>(
    store: &S,
    req: &THttpReq,
) -> Result<Map<String, Value>, InertiaError>
where
    S: SessionStore<THttpReq> + ?Sized,
{
    match store.get(req, SHARE_SESSION_KEY)? {
        None => Ok(Map::new()),
        Some(Value::Object(shared)) => Ok(shared),
        Some(other) => {
            log::warn!(
                "{}",
                inertia_err_msg(format!(
                    "Session key '{}' should hold an object, found {}. Discarding it.",
                    SHARE_SESSION_KEY, other
                ))
            );
            Ok(Map::new())
        }
    }
}

/// Upserts `key` into the shared props map of the request's session.
pub(crate) fn share_value<THttpReq, S>(
    store: &S,
    req: &THttpReq,
    key: String,
    value: Value,
) -> Result<(), InertiaError>
where
    S: SessionStore<THttpReq> + ?Sized,
{
    let mut shared = load_shared(store, req)?;
    shared.insert(key, value);
    store.set(req, SHARE_SESSION_KEY, Value::Object(shared))
}

/// Session data for requests that carry no session cookie. It lives in the request
/// extensions and dies with the request.
#[derive(Default)]
struct RequestSession(Map<String, Value>);

/// A cookie-identified session held by [`MemorySessionStore`].
struct StoredSession {
    data: Map<String, Value>,
    expires_at: Instant,
}

impl StoredSession {
    fn new(ttl: Duration) -> Self {
        Self {
            data: Map::new(),
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }

    fn touch(&mut self, ttl: Duration) {
        self.expires_at = Instant::now() + ttl;
    }
}

/// An in-process [`SessionStore`], keyed by the value of a session cookie.
///
/// Requests without the cookie still get a session, scoped to the request itself.
///
/// Sessions expire `ttl` after their last write. Once more than `capacity` sessions
/// are held, writing a session first drops the expired ones and then, if needed,
/// the one closest to expiring, so the store never holds more than `capacity`
/// sessions. Call [`MemorySessionStore::cleanup`] to drop expired sessions eagerly.
pub struct MemorySessionStore {
    cookie_name: String,
    ttl: Duration,
    capacity: usize,
    sessions: RwLock<HashMap<String, StoredSession>>,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new("sessionid", Self::DEFAULT_TTL)
    }
}

impl MemorySessionStore {
    /// Two weeks.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 14);
    pub const DEFAULT_CAPACITY: usize = 10_000;

    pub fn new(cookie_name: impl Into<String>, ttl: Duration) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            ttl,
            capacity: Self::DEFAULT_CAPACITY,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Sets how many sessions may be held before writes start evicting.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    fn session_id(&self, req: &HttpRequest) -> Option<String> {
        req.cookie(&self.cookie_name)
            .map(|cookie| cookie.value().to_string())
    }

    /// Drops every expired session.
    pub fn cleanup(&self) {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        sessions.retain(|_, session| session.is_valid());
    }

    /// Number of cookie-identified sessions currently held, expired ones included
    /// until they are evicted.
    pub fn len(&self) -> usize {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn evict(&self, sessions: &mut HashMap<String, StoredSession>) {
        if sessions.len() <= self.capacity {
            return;
        }

        sessions.retain(|_, session| session.is_valid());

        while sessions.len() > self.capacity {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, session)| session.expires_at)
                .map(|(id, _)| id.clone());

            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                }
                None => break,
            }
        }

        log::debug!(
            "{}",
            inertia_err_msg(format!(
                "Session store went over {} sessions; evicted down to {}.",
                self.capacity,
                sessions.len()
            ))
        );
    }
}

impl SessionStore<HttpRequest> for MemorySessionStore {
    fn get(&self, req: &HttpRequest, key: &str) -> Result<Option<Value>, InertiaError> {
        match self.session_id(req) {
            Some(id) => {
                let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
                Ok(sessions
                    .get(&id)
                    .filter(|session| session.is_valid())
                    .and_then(|session| session.data.get(key))
                    .cloned())
            }
            None => Ok(req
                .extensions()
                .get::<RequestSession>()
                .and_then(|session| session.0.get(key))
                .cloned()),
        }
    }

    fn set(&self, req: &HttpRequest, key: &str, value: Value) -> Result<(), InertiaError> {
        match self.session_id(req) {
            Some(id) => {
                let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());

                let session = sessions
                    .entry(id)
                    .or_insert_with(|| StoredSession::new(self.ttl));
                if !session.is_valid() {
                    session.data.clear();
                }
                session.touch(self.ttl);
                session.data.insert(key.to_string(), value);

                self.evict(&mut sessions);
            }
            None => {
                let mut extensions = req.extensions_mut();
                if let Some(session) = extensions.get_mut::<RequestSession>() {
                    session.0.insert(key.to_string(), value);
                } else {
                    let mut session = RequestSession::default();
                    session.0.insert(key.to_string(), value);
                    extensions.insert(session);
                }
            }
        }

        Ok(())
    }
}
