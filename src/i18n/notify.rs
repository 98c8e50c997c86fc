//! Language change notifications.
//!
//! Listeners run synchronously, in subscription order, on the thread that
//! changed the language. Emission walks a snapshot of the registry, so a
//! listener may subscribe or unsubscribe (itself or others) without affecting
//! the notification in progress.

use crate::i18n::Language;
use std::sync::{Arc, Mutex, Weak};

type Listener = Arc<dyn Fn(Language) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Ordered registry of language-change listeners.
#[derive(Clone, Default)]
pub struct NotificationBus {
    registry: Arc<Mutex<Registry>>,
}

/// Handle returned by [`NotificationBus::subscribe`].
///
/// Dropping the handle does *not* unsubscribe; call [`Subscription::unsubscribe`].
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(Language) + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(listener);
        let mut registry = self.registry.lock().unwrap();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, listener));

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Notify every listener registered right now.
    pub fn emit(&self, language: Language) {
        let snapshot: Vec<Listener> = self
            .registry
            .lock()
            .unwrap()
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(language);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.lock().unwrap().listeners.len()
    }
}

impl Subscription {
    /// Remove this listener. Has no effect if the bus is gone.
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .lock()
                .unwrap()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> Listener) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_for_factory = Arc::clone(&log);
        let factory = move |name: &str| -> Listener {
            let log = Arc::clone(&log_for_factory);
            let name = name.to_string();
            Arc::new(move |language: Language| {
                log.lock().unwrap().push(format!("{}:{}", name, language));
            })
        };
        (log, factory)
    }

    #[test]
    fn test_emit_reaches_listener() {
        let bus = NotificationBus::new();
        let (log, listener) = recorder();
        let a = listener("a");
        let _sub = bus.subscribe(move |l| a(l));

        bus.emit(Language::FRENCH);

        assert_eq!(*log.lock().unwrap(), vec!["a:fr"]);
    }

    #[test]
    fn test_emit_in_subscription_order() {
        let bus = NotificationBus::new();
        let (log, listener) = recorder();
        for name in ["first", "second", "third"] {
            let f = listener(name);
            let _ = bus.subscribe(move |l| f(l));
        }

        bus.emit(Language::ENGLISH);

        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:en", "second:en", "third:en"]
        );
    }

    #[test]
    fn test_unsubscribed_listener_not_called() {
        let bus = NotificationBus::new();
        let (log, listener) = recorder();
        let a = listener("a");
        let b = listener("b");
        let sub_a = bus.subscribe(move |l| a(l));
        let _sub_b = bus.subscribe(move |l| b(l));

        sub_a.unsubscribe();
        bus.emit(Language::FRENCH);

        assert_eq!(*log.lock().unwrap(), vec!["b:fr"]);
        assert_eq!(bus.listener_count(), 1);
    }

    #[test]
    fn test_late_subscriber_misses_earlier_emit() {
        let bus = NotificationBus::new();
        bus.emit(Language::FRENCH);

        let (log, listener) = recorder();
        let a = listener("a");
        let _sub = bus.subscribe(move |l| a(l));

        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unsubscribe_during_emit() {
        let bus = NotificationBus::new();
        let (log, listener) = recorder();

        // The first listener removes the second while the emit is running.
        let pending: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let pending_in_listener = Arc::clone(&pending);
        let a = listener("a");
        let _sub_a = bus.subscribe(move |l| {
            a(l);
            if let Some(sub) = pending_in_listener.lock().unwrap().take() {
                sub.unsubscribe();
            }
        });
        let b = listener("b");
        *pending.lock().unwrap() = Some(bus.subscribe(move |l| b(l)));

        bus.emit(Language::FRENCH);
        // Snapshot semantics: b still hears the emit that was in progress
        assert_eq!(*log.lock().unwrap(), vec!["a:fr", "b:fr"]);

        bus.emit(Language::ENGLISH);
        assert_eq!(*log.lock().unwrap(), vec!["a:fr", "b:fr", "a:en"]);
    }

    #[test]
    fn test_subscribe_during_emit_waits_for_next() {
        let bus = NotificationBus::new();
        let (log, listener) = recorder();
        let inner_bus = bus.clone();
        let late = Arc::new(Mutex::new(Some(listener("late"))));
        let a = listener("a");

        let _sub = bus.subscribe(move |l| {
            a(l);
            if let Some(f) = late.lock().unwrap().take() {
                let _ = inner_bus.subscribe(move |l| f(l));
            }
        });

        bus.emit(Language::FRENCH);
        assert_eq!(*log.lock().unwrap(), vec!["a:fr"]);

        bus.emit(Language::ENGLISH);
        assert_eq!(*log.lock().unwrap(), vec!["a:fr", "a:en", "late:en"]);
    }

    #[test]
    fn test_unsubscribe_after_bus_dropped() {
        let bus = NotificationBus::new();
        let sub = bus.subscribe(|_| {});
        drop(bus);
        sub.unsubscribe();
    }
}
