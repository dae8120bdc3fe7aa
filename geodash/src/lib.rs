//! Terminal dashboard: venue map, local weather and news
//!
//! The app follows a unidirectional flow:
//!
//! 1. Terminal events go to components, which answer with [`Action`]s
//! 2. The [`Store`] runs the [`reducer`], which updates [`DashboardState`]
//!    and may emit [`Effect`]s
//! 3. [`Services`] turn effects into keyed tasks on the [`TaskManager`]
//! 4. Task results come back as `*Did*` actions and go through step 2
//!
//! [`Action`]: action::Action
//! [`Store`]: store::Store
//! [`reducer`]: reducer::reducer
//! [`DashboardState`]: state::DashboardState
//! [`Effect`]: effect::Effect
//! [`Services`]: services::Services
//! [`TaskManager`]: tasks::TaskManager

pub mod action;
pub mod components;
pub mod effect;
pub mod event;
pub mod reducer;
pub mod runtime;
pub mod services;
pub mod state;
pub mod store;
pub mod tasks;
pub mod testing;
pub mod ui;

pub use action::Action;
pub use effect::{DispatchResult, Effect};
pub use runtime::{EventOutcome, Runtime};
pub use services::Services;
pub use state::DashboardState;
pub use store::{Store, TracingMiddleware};
