//! Instance-scoped notification channel
//!
//! Key principles:
//! - Fixed, enumerated event set ([`PlayerEvent`]), no string lookups
//! - Registration system (only notify interested handlers)
//! - Owned by one player; there is no process-wide registry
//!
//! The payload type `P` is usually the owner of the bus itself. Because a
//! handler receives `&mut P`, the owner detaches the listener list for the
//! duration of a broadcast (see [`EventBus::detach`] / [`EventBus::reattach`])
//! and [`EventBus::emit`] is available when the bus lives outside the payload.

use std::collections::{HashMap, HashSet};

/// Events broadcast by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerEvent {
    /// Rendering context bootstrapped, subsystem creation not yet dispatched
    Init,
}

/// Handle returned by [`EventBus::on`], used to unregister a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Boxed event handler receiving the payload mutably
pub type Handler<P> = Box<dyn FnMut(&mut P)>;

/// A registered handler
pub struct Listener<P> {
    id: ListenerId,
    handler: Handler<P>,
}

impl<P> Listener<P> {
    /// Invoke the handler
    pub fn call(&mut self, payload: &mut P) {
        (self.handler)(payload);
    }
}

/// Publish/subscribe registry
pub struct EventBus<P> {
    handlers: HashMap<PlayerEvent, Vec<Listener<P>>>,
    in_flight: HashSet<ListenerId>,
    removed_while_detached: HashSet<ListenerId>,
    next_id: u64,
}

impl<P> EventBus<P> {
    /// Create a new empty bus
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            in_flight: HashSet::new(),
            removed_while_detached: HashSet::new(),
            next_id: 0,
        }
    }

    /// Register a handler for a specific event
    pub fn on(&mut self, event: PlayerEvent, handler: impl FnMut(&mut P) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(event)
            .or_default()
            .push(Listener { id, handler: Box::new(handler) });
        id
    }

    /// Unregister a handler; returns whether it was registered
    pub fn off(&mut self, id: ListenerId) -> bool {
        for listeners in self.handlers.values_mut() {
            if let Some(index) = listeners.iter().position(|l| l.id == id) {
                listeners.remove(index);
                return true;
            }
        }
        // The listener may be detached for an in-flight broadcast.
        if self.in_flight.remove(&id) {
            self.removed_while_detached.insert(id);
            return true;
        }
        false
    }

    /// Number of handlers currently registered for `event`
    pub fn listener_count(&self, event: PlayerEvent) -> usize {
        self.handlers.get(&event).map_or(0, Vec::len)
    }

    /// Take the listeners of `event` out of the bus for a broadcast
    pub fn detach(&mut self, event: PlayerEvent) -> Vec<Listener<P>> {
        let listeners = self.handlers.remove(&event).unwrap_or_default();
        self.in_flight.extend(listeners.iter().map(|l| l.id));
        listeners
    }

    /// Put detached listeners back ahead of any registered during the broadcast
    pub fn reattach(&mut self, event: PlayerEvent, mut listeners: Vec<Listener<P>>) {
        for listener in &listeners {
            self.in_flight.remove(&listener.id);
        }
        listeners.retain(|l| !self.removed_while_detached.remove(&l.id));
        if let Some(added) = self.handlers.remove(&event) {
            listeners.extend(added);
        }
        if !listeners.is_empty() {
            self.handlers.insert(event, listeners);
        }
    }

    /// Broadcast `event` to every handler, in registration order
    pub fn emit(&mut self, event: PlayerEvent, payload: &mut P) {
        let mut listeners = self.detach(event);
        for listener in &mut listeners {
            listener.call(payload);
        }
        self.reattach(event, listeners);
    }

    /// Remove every handler, including any detached for an in-flight broadcast
    pub fn clear(&mut self) {
        self.handlers.clear();
        let in_flight: Vec<ListenerId> = self.in_flight.drain().collect();
        self.removed_while_detached.extend(in_flight);
    }
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_every_handler_in_order() {
        let mut bus: EventBus<Vec<u32>> = EventBus::new();
        bus.on(PlayerEvent::Init, |log| log.push(1));
        bus.on(PlayerEvent::Init, |log| log.push(2));

        let mut log = Vec::new();
        bus.emit(PlayerEvent::Init, &mut log);
        assert_eq!(log, vec![1, 2]);
        assert_eq!(bus.listener_count(PlayerEvent::Init), 2);
    }

    #[test]
    fn test_off_unregisters() {
        let mut bus: EventBus<u32> = EventBus::new();
        let id = bus.on(PlayerEvent::Init, |n| *n += 1);
        assert!(bus.off(id));
        assert!(!bus.off(id));
        assert!(!bus.off(ListenerId(99)));

        let mut n = 0;
        bus.emit(PlayerEvent::Init, &mut n);
        assert_eq!(n, 0);
        assert_eq!(bus.listener_count(PlayerEvent::Init), 0);
    }

    #[test]
    fn test_detached_listener_removed_during_broadcast_stays_removed() {
        let mut bus: EventBus<u32> = EventBus::new();
        let id = bus.on(PlayerEvent::Init, |n| *n += 1);

        let listeners = bus.detach(PlayerEvent::Init);
        assert!(bus.off(id));
        bus.reattach(PlayerEvent::Init, listeners);

        assert_eq!(bus.listener_count(PlayerEvent::Init), 0);
    }

    #[test]
    fn test_clear_during_broadcast_drops_detached_listeners() {
        let mut bus: EventBus<u32> = EventBus::new();
        bus.on(PlayerEvent::Init, |n| *n += 1);
        bus.on(PlayerEvent::Init, |n| *n += 2);

        let listeners = bus.detach(PlayerEvent::Init);
        bus.clear();
        bus.reattach(PlayerEvent::Init, listeners);

        assert_eq!(bus.listener_count(PlayerEvent::Init), 0);
        let mut n = 0;
        bus.emit(PlayerEvent::Init, &mut n);
        assert_eq!(n, 0);
    }

    #[test]
    fn test_listener_added_during_broadcast_is_kept() {
        let mut bus: EventBus<u32> = EventBus::new();
        bus.on(PlayerEvent::Init, |n| *n += 1);

        let mut listeners = bus.detach(PlayerEvent::Init);
        bus.on(PlayerEvent::Init, |n| *n += 10);
        let mut n = 0;
        for listener in &mut listeners {
            listener.call(&mut n);
        }
        bus.reattach(PlayerEvent::Init, listeners);

        assert_eq!(n, 1);
        assert_eq!(bus.listener_count(PlayerEvent::Init), 2);
        bus.emit(PlayerEvent::Init, &mut n);
        assert_eq!(n, 12);
    }
}
