// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side routes and the authentication guard.

use crate::http::UnauthorizedHandler;
use crate::session::SessionContext;
use std::sync::{Arc, PoisonError, RwLock};

/// Redirect chains longer than this indicate a guard bug.
const MAX_REDIRECTS: usize = 4;

/// Navigable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Participants,
    Messages,
    Fitbit,
    Login,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::Participants,
        Route::Messages,
        Route::Fitbit,
        Route::Login,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Participants => "/participants",
            Route::Messages => "/messages",
            Route::Fitbit => "/fitbit",
            Route::Login => "/login",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Participants => "participants",
            Route::Messages => "messages",
            Route::Fitbit => "fitbit",
            Route::Login => "login",
        }
    }

    pub fn requires_auth(self) -> bool {
        !matches!(self, Route::Login)
    }

    /// Resolve a path. Query strings, fragments and trailing slashes are ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        Route::ALL.into_iter().find(|r| r.path() == normalized)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Guard decision for one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Proceed(Route),
    Redirect(Route),
}

/// The authentication guard.
pub fn guard(target: Route, logged_in: bool) -> Navigation {
    if target.requires_auth() && !logged_in {
        Navigation::Redirect(Route::Login)
    } else if target == Route::Login && logged_in {
        Navigation::Redirect(Route::Home)
    } else {
        Navigation::Proceed(target)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("No route matches {0:?}")]
    NotFound(String),
}

/// Navigation state: the current route and everything visited so far.
#[derive(Debug)]
pub struct Router {
    session: Arc<SessionContext>,
    current: RwLock<Option<Route>>,
    history: RwLock<Vec<Route>>,
}

impl Router {
    pub fn new(session: Arc<SessionContext>) -> Self {
        Self {
            session,
            current: RwLock::new(None),
            history: RwLock::new(Vec::new()),
        }
    }

    /// Navigate to a path, returning the route actually landed on.
    pub fn push(&self, path: &str) -> Result<Route, RouteError> {
        let target = Route::from_path(path).ok_or_else(|| RouteError::NotFound(path.to_string()))?;
        Ok(self.navigate(target))
    }

    /// Navigate to a route through the guard, following redirects.
    pub fn navigate(&self, target: Route) -> Route {
        let mut target = target;
        for _ in 0..MAX_REDIRECTS {
            match guard(target, self.session.is_logged_in()) {
                Navigation::Proceed(route) => {
                    self.land(route);
                    return route;
                }
                Navigation::Redirect(next) => {
                    tracing::debug!(from = %target, to = %next, "Navigation redirected");
                    target = next;
                }
            }
        }

        // Unreachable with the current guard; land on the last target rather
        // than loop.
        tracing::warn!(route = %target, "Redirect limit reached");
        self.land(target);
        target
    }

    pub fn current(&self) -> Option<Route> {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn history(&self) -> Vec<Route> {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn land(&self, route: Route) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(route);
        self.history
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}

impl UnauthorizedHandler for Router {
    fn on_unauthorized(&self) {
        self.navigate(Route::Login);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryTokenStorage;

    #[test]
    fn test_guard_table() {
        for route in Route::ALL {
            let anonymous = guard(route, false);
            let signed_in = guard(route, true);

            if route == Route::Login {
                assert_eq!(anonymous, Navigation::Proceed(Route::Login));
                assert_eq!(signed_in, Navigation::Redirect(Route::Home));
            } else {
                assert_eq!(anonymous, Navigation::Redirect(Route::Login));
                assert_eq!(signed_in, Navigation::Proceed(route));
            }
        }
    }

    #[test]
    fn test_from_path_normalizes() {
        assert_eq!(Route::from_path("/"), Some(Route::Home));
        assert_eq!(Route::from_path(""), Some(Route::Home));
        assert_eq!(
            Route::from_path("/participants/"),
            Some(Route::Participants)
        );
        assert_eq!(Route::from_path("/messages?page=2"), Some(Route::Messages));
        assert_eq!(Route::from_path("/settings"), None);
    }

    #[test]
    fn test_router_redirects_anonymous_to_login() {
        let session = Arc::new(SessionContext::restore(MemoryTokenStorage::new()).unwrap());
        let router = Router::new(session);

        assert_eq!(router.push("/fitbit").unwrap(), Route::Login);
        assert_eq!(router.current(), Some(Route::Login));
    }

    #[test]
    fn test_router_redirects_signed_in_away_from_login() {
        let session =
            Arc::new(SessionContext::restore(MemoryTokenStorage::with_token("t")).unwrap());
        let router = Router::new(session);

        assert_eq!(router.push("/login").unwrap(), Route::Home);
        assert_eq!(router.push("/messages").unwrap(), Route::Messages);
        assert_eq!(router.history(), vec![Route::Home, Route::Messages]);
    }

    #[test]
    fn test_unknown_path_rejected() {
        let session = Arc::new(SessionContext::restore(MemoryTokenStorage::new()).unwrap());
        let router = Router::new(session);

        assert!(matches!(
            router.push("/nowhere"),
            Err(RouteError::NotFound(_))
        ));
        assert_eq!(router.current(), None);
    }

    #[test]
    fn test_unauthorized_handler_lands_on_login() {
        let session =
            Arc::new(SessionContext::restore(MemoryTokenStorage::with_token("t")).unwrap());
        let router = Router::new(session.clone());
        router.push("/participants").unwrap();

        session.clear();
        router.on_unauthorized();

        assert_eq!(router.current(), Some(Route::Login));
    }
}
