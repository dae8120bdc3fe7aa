//! Effect store with middleware
//!
//! The store owns [`DashboardState`] and runs every action through the
//! reducer, calling middleware hooks around it.

use crate::action::Action;
use crate::effect::DispatchResult;
use crate::reducer::reducer;
use crate::state::DashboardState;

/// Intercepts actions before and after the reducer.
pub trait Middleware {
    fn before(&mut self, action: &Action);
    fn after(&mut self, action: &Action, result: &DispatchResult);
}

/// Logs each action with `tracing`.
#[derive(Debug, Clone, Default)]
pub struct TracingMiddleware {
    /// Also log before dispatch
    pub verbose: bool,
}

impl TracingMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

impl Middleware for TracingMiddleware {
    fn before(&mut self, action: &Action) {
        if self.verbose {
            tracing::trace!(action = %action.name(), "dispatching");
        }
    }

    fn after(&mut self, action: &Action, result: &DispatchResult) {
        tracing::debug!(
            action = %action.summary(),
            category = action.category().unwrap_or("global"),
            state_changed = result.changed,
            effects = result.effects.len(),
            "action processed"
        );
    }
}

pub struct Store<M: Middleware = TracingMiddleware> {
    state: DashboardState,
    middleware: M,
}

impl Store<TracingMiddleware> {
    pub fn new(state: DashboardState) -> Self {
        Self::with_middleware(state, TracingMiddleware::new())
    }
}

impl<M: Middleware> Store<M> {
    pub fn with_middleware(state: DashboardState, middleware: M) -> Self {
        Self { state, middleware }
    }

    #[inline]
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Use sparingly; prefer dispatching actions.
    #[inline]
    pub fn state_mut(&mut self) -> &mut DashboardState {
        &mut self.state
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        self.middleware.before(&action);
        let result = reducer(&mut self.state, action.clone());
        self.middleware.after(&action, &result);
        result
    }
}
