//! The subscriber registry for event dispatch.
//!
//! The bus owns the subscriber list only; the dispatch loop itself lives on
//! [`Game`](crate::game::Game), because subscribers receive `&mut Game` and
//! the queue/history travel with the game.
//!
//! ## Re-entrancy
//!
//! While a dispatch step runs, the subscriber list is detached from the bus
//! so that subscribers calling back into the engine cannot recurse into
//! dispatch. Subscriptions made during dispatch land in the (empty) bus and
//! are appended when the list is reattached; unsubscriptions of a detached
//! subscriber are recorded and applied at reattach.

use crate::core::error::EngineError;
use crate::events::event::GameEvent;
use crate::game::Game;

/// Handle for removing a subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl SubscriberId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A reaction to game events.
///
/// The external effect resolver implements this. Handlers may call back into
/// any public `Game` operation; events emitted by those calls are queued and
/// dispatched after the current event finishes, in emission order.
pub trait EventSubscriber {
    fn on_event(&mut self, game: &mut Game, event: &GameEvent) -> Result<(), EngineError>;
}

struct Entry {
    id: SubscriberId,
    subscriber: Box<dyn EventSubscriber>,
}

/// Insertion-ordered subscriber list.
#[derive(Default)]
pub struct EventBus {
    entries: Vec<Entry>,
    removed: Vec<SubscriberId>,
    next_id: u64,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscriber. Subscribers are notified in subscription order.
    pub fn subscribe(&mut self, subscriber: Box<dyn EventSubscriber>) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, subscriber });
        id
    }

    /// Remove a subscriber. Returns `false` if the ID is not currently
    /// attached; during dispatch the removal is deferred to reattach, and
    /// this also returns `false`.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() < before {
            true
        } else {
            self.removed.push(id);
            false
        }
    }

    /// Number of attached subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the bus empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn detach(&mut self) -> Vec<(SubscriberId, Box<dyn EventSubscriber>)> {
        std::mem::take(&mut self.entries)
            .into_iter()
            .map(|entry| (entry.id, entry.subscriber))
            .collect()
    }

    pub(crate) fn reattach(&mut self, detached: Vec<(SubscriberId, Box<dyn EventSubscriber>)>) {
        let added = std::mem::take(&mut self.entries);
        self.entries = detached
            .into_iter()
            .map(|(id, subscriber)| Entry { id, subscriber })
            .collect();
        self.entries.extend(added);

        if !self.removed.is_empty() {
            let removed = std::mem::take(&mut self.removed);
            self.entries.retain(|entry| !removed.contains(&entry.id));
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.entries.len())
            .finish()
    }
}
