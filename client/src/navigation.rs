use strum_macros::AsRefStr;
use tracing::debug;

use crate::session::Session;

/// Named screens with their parameter bundles.
#[derive(Debug, Clone, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Route {
    Login,
    Register,
    Events,
    CreateEvent,
    ViewEvent { id: i64 },
    EditEvent { id: i64, event_type_id: Option<i64> },
    Profile,
}

impl Route {
    pub fn initial(session: &Session) -> Self {
        if session.logged_in {
            Route::Events
        } else {
            Route::Login
        }
    }

    pub fn name(&self) -> &str {
        self.as_ref()
    }

    pub fn requires_session(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }
}

/// Screen history. The session store never navigates; screens call this after
/// they mutate the store.
#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<Route>,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        Self {
            history: vec![initial],
        }
    }

    pub fn current(&self) -> &Route {
        // history is never empty
        &self.history[self.history.len() - 1]
    }

    pub fn push(&mut self, route: Route) -> &Route {
        debug!(route = route.name(), "Navigate");
        self.history.push(route);
        self.current()
    }

    /// Drops the whole history, used on login, logout and account deletion.
    pub fn reset(&mut self, route: Route) -> &Route {
        debug!(route = route.name(), "Navigate, history cleared");
        self.history.clear();
        self.history.push(route);
        self.current()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    /// Falls back to the event list when there is nothing to go back to.
    pub fn back(&mut self) -> &Route {
        if self.can_go_back() {
            self.history.pop();
        } else {
            self.history[0] = Route::Events;
        }
        self.current()
    }
}
