use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use rand::distr::{Alphanumeric, SampleString};

const TOKEN_LEN: usize = 64;

/// The authenticated identity a session token resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Identity {
    pub(crate) user_id: i64,
    pub(crate) username: String,
}

#[derive(Debug)]
struct SessionRecord {
    identity: Identity,
    expires_at: Instant,
}

/// In-memory session store. Tokens are the sole bearer credential, so they
/// come from a CSPRNG. Sessions expire on an idle timeout that slides on
/// each successful lookup; nothing survives a restart.
pub(crate) struct SessionManager {
    ttl: Duration,
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl SessionManager {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn start(&self, user_id: i64, username: &str) -> String {
        let token = Alphanumeric.sample_string(&mut rand::rng(), TOKEN_LEN);
        let record = SessionRecord {
            identity: Identity {
                user_id,
                username: username.to_string(),
            },
            expires_at: Instant::now() + self.ttl,
        };
        self.sessions
            .write()
            .expect("session map lock poisoned")
            .insert(token.clone(), record);
        token
    }

    pub(crate) fn lookup(&self, token: &str) -> Option<Identity> {
        let mut sessions = self.sessions.write().expect("session map lock poisoned");
        let now = Instant::now();
        match sessions.get_mut(token) {
            Some(record) if record.expires_at > now => {
                record.expires_at = now + self.ttl;
                Some(record.identity.clone())
            }
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Idempotent: ending an unknown or already-ended session is not an error.
    pub(crate) fn end(&self, token: &str) {
        self.sessions
            .write()
            .expect("session map lock poisoned")
            .remove(token);
    }
}
