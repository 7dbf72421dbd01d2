use wordpair_types::{EventKind, GameEvent};

/// Event handler trait for observers that want every game event
pub trait GameEventHandler: Send {
    fn handle_event(&mut self, event: &GameEvent);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&GameEvent) + Send>;

struct Subscriber {
    id: SubscriptionId,
    kind: Option<EventKind>, // None receives every event
    handler: Handler,
}

/// Synchronous publish/subscribe bus.
///
/// Delivery is immediate and in subscription order. A panicking handler is
/// not caught.
pub struct GameEventBus {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Subscribe to one kind of event.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        self.register(Some(kind), Box::new(handler))
    }

    /// Subscribe to every event.
    pub fn subscribe_all<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        self.register(None, Box::new(handler))
    }

    pub fn add_handler(&mut self, mut handler: Box<dyn GameEventHandler>) -> SubscriptionId {
        self.register(None, Box::new(move |event| handler.handle_event(event)))
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() < before
    }

    pub fn publish(&mut self, event: GameEvent) {
        let kind = event.kind();
        for subscriber in &mut self.subscribers {
            if subscriber.kind.is_none_or(|k| k == kind) {
                (subscriber.handler)(&event);
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn register(&mut self, kind: Option<EventKind>, handler: Handler) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.push(Subscriber { id, kind, handler });
        id
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct TestHandler {
        events: Arc<Mutex<Vec<GameEvent>>>,
    }

    impl GameEventHandler for TestHandler {
        fn handle_event(&mut self, event: &GameEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn test_event_bus() {
        let mut bus = GameEventBus::new();
        let events = Arc::new(Mutex::new(Vec::new()));

        bus.add_handler(Box::new(TestHandler {
            events: events.clone(),
        }));
        bus.publish(GameEvent::NextTeam { team_index: 1 });
        bus.publish(GameEvent::GameReset);

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], GameEvent::NextTeam { team_index: 1 });
    }

    #[test]
    fn test_subscribe_filters_by_kind() {
        let mut bus = GameEventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        bus.subscribe(EventKind::GameReset, move |event| {
            sink.lock().unwrap().push(event.kind());
        });

        bus.publish(GameEvent::NextTeam { team_index: 0 });
        bus.publish(GameEvent::GameReset);

        assert_eq!(*seen.lock().unwrap(), vec![EventKind::GameReset]);
    }

    #[test]
    fn test_delivery_in_subscription_order() {
        let mut bus = GameEventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let order = order.clone();
            bus.subscribe(EventKind::GameReset, move |_| order.lock().unwrap().push(label));
        }

        bus.publish(GameEvent::GameReset);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = GameEventBus::new();
        let count = Arc::new(Mutex::new(0));

        let counter = count.clone();
        let id = bus.subscribe_all(move |_| *counter.lock().unwrap() += 1);
        bus.publish(GameEvent::GameReset);

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(GameEvent::GameReset);

        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
