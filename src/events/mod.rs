//! Event bus: typed game events and synchronous subscriber dispatch.

pub mod bus;
pub mod event;

pub use bus::{EventBus, EventSubscriber, SubscriberId};
pub use event::{EventKind, GameEvent};
