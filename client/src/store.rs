use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::session::Session;
use crate::storage::{SessionStorage, StorageError};

pub const SESSION_KEY: &str = "user-session";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistAction {
    Write,
    Remove,
}

/// What `replace` did to persisted storage. The in-memory value is already
/// updated whatever the outcome.
#[derive(Debug)]
#[must_use]
pub struct PersistReport {
    pub action: PersistAction,
    pub outcome: Result<(), StorageError>,
}

impl PersistReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Single source of truth for the current session, shared by every screen.
pub struct SessionStore {
    tx: watch::Sender<Session>,
    storage: Arc<dyn SessionStorage>,
    key: String,
}

impl SessionStore {
    pub fn open(storage: Arc<dyn SessionStorage>) -> Self {
        Self::open_with_key(storage, SESSION_KEY)
    }

    pub fn open_with_key(storage: Arc<dyn SessionStorage>, key: &str) -> Self {
        let initial = rehydrate(storage.as_ref(), key);
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx,
            storage,
            key: key.to_owned(),
        }
    }

    pub fn read(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Swaps the whole record; fields missing from `session` are gone
    /// afterwards. Persistence runs after the in-memory swap.
    pub fn replace(&self, session: Session) -> PersistReport {
        if !session.is_well_formed() {
            warn!(
                logged_in = session.logged_in,
                user_id = ?session.user_id,
                "Replacing session with a record that breaks the credential invariant"
            );
        }
        let logged_in = session.logged_in;
        let previous = self.tx.send_replace(session);
        if previous.logged_in != logged_in {
            info!(logged_in, "Session login state changed");
        }

        let report = if logged_in {
            PersistReport {
                action: PersistAction::Write,
                outcome: self.write_through(),
            }
        } else {
            PersistReport {
                action: PersistAction::Remove,
                outcome: self.storage.remove(&self.key),
            }
        };
        match &report.outcome {
            Ok(()) => debug!(action = ?report.action, key = %self.key, "Session persisted"),
            Err(error) => warn!(
                action = ?report.action,
                key = %self.key,
                error = %error,
                "Fail to persist session, in-memory value kept"
            ),
        }
        report
    }

    pub fn logout(&self) -> PersistReport {
        self.replace(Session::logged_out())
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    fn write_through(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&*self.tx.borrow())?;
        self.storage.save(&self.key, &json)
    }
}

fn rehydrate(storage: &dyn SessionStorage, key: &str) -> Session {
    let raw = match storage.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No persisted session");
            return Session::logged_out();
        }
        Err(error) => {
            warn!(key, error = %error, "Fail to read persisted session, starting logged out");
            return Session::logged_out();
        }
    };

    match serde_json::from_str::<Session>(&raw) {
        Ok(session) if session.is_well_formed() => {
            info!(
                logged_in = session.logged_in,
                user_id = ?session.user_id,
                "Session restored"
            );
            session
        }
        Ok(_) => {
            warn!(key, "Persisted session breaks the credential invariant, discarding");
            discard(storage, key);
            Session::logged_out()
        }
        Err(error) => {
            warn!(key, error = %error, "Persisted session is malformed, discarding");
            discard(storage, key);
            Session::logged_out()
        }
    }
}

fn discard(storage: &dyn SessionStorage, key: &str) {
    if let Err(error) = storage.remove(key) {
        warn!(key, error = %error, "Fail to remove discarded session record");
    }
}
