//! Event/action/render loop
//!
//! Terminal events become actions through the UI's `map_event`; actions go
//! through the store; effects go to [`Services`], whose tasks send result
//! actions back through the same queue.

use std::io;

use geodash_core::{Geolocator, Transport};
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::action::Action;
use crate::event::{process_raw_event, spawn_event_poller, EventKind, PollerConfig, RawEvent};
use crate::services::Services;
use crate::state::DashboardState;
use crate::store::{Middleware, Store, TracingMiddleware};
use crate::tasks::TaskManager;

/// Actions produced by one event, plus whether to redraw regardless.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventOutcome {
    pub actions: Vec<Action>,
    pub needs_render: bool,
}

impl EventOutcome {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn action(action: Action) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    pub fn from_actions(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            needs_render: false,
        }
    }

    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl From<Action> for EventOutcome {
    fn from(action: Action) -> Self {
        Self::action(action)
    }
}

impl From<Vec<Action>> for EventOutcome {
    fn from(actions: Vec<Action>) -> Self {
        Self::from_actions(actions)
    }
}

impl From<Option<Action>> for EventOutcome {
    fn from(action: Option<Action>) -> Self {
        action.map_or_else(Self::ignored, Self::action)
    }
}

pub struct Runtime<T, G, M: Middleware = TracingMiddleware> {
    store: Store<M>,
    services: Services<T, G>,
    tasks: TaskManager,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    poller_config: PollerConfig,
    should_render: bool,
}

impl<T: Transport, G: Geolocator> Runtime<T, G, TracingMiddleware> {
    pub fn new(state: DashboardState, services: Services<T, G>) -> Self {
        Self::from_store(Store::new(state), services)
    }
}

impl<T: Transport, G: Geolocator, M: Middleware> Runtime<T, G, M> {
    pub fn from_store(store: Store<M>, services: Services<T, G>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store,
            services,
            tasks: TaskManager::new(action_tx.clone()),
            action_tx,
            action_rx,
            poller_config: PollerConfig::default(),
            should_render: true,
        }
    }

    pub fn with_event_poller(mut self, config: PollerConfig) -> Self {
        self.poller_config = config;
        self
    }

    /// Queue an action for the loop.
    pub fn enqueue(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    pub fn action_tx(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    pub fn state(&self) -> &DashboardState {
        self.store.state()
    }

    pub fn tasks(&self) -> &TaskManager {
        &self.tasks
    }

    /// Reduce one action and start its effects. Returns `false` on quit.
    pub fn dispatch(&mut self, action: Action) -> bool {
        if action == Action::Quit {
            return false;
        }
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.services.handle_effect(effect, &mut self.tasks);
        }
        self.should_render |= result.changed;
        true
    }

    /// Wait for the next queued action (user input or task result).
    pub async fn next_action(&mut self) -> Option<Action> {
        self.action_rx.recv().await
    }

    /// Run until a quit action or both channels close.
    pub async fn run<B, FRender, FEvent, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &DashboardState),
        FEvent: FnMut(&EventKind, &DashboardState) -> R,
        R: Into<EventOutcome>,
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _poller = spawn_event_poller(event_tx, self.poller_config, cancel_token.clone());

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| render(frame, frame.area(), state))?;
                self.should_render = false;
            }

            tokio::select! {
                Some(raw) = event_rx.recv() => {
                    let event = process_raw_event(raw);
                    let outcome: EventOutcome = map_event(&event, self.store.state()).into();
                    self.should_render |= outcome.needs_render;
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if !self.dispatch(action) {
                        break;
                    }
                }

                else => break,
            }
        }

        cancel_token.cancel();
        self.tasks.cancel_all();
        Ok(())
    }
}
