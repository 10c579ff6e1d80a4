use crate::domain_model::AccessToken;
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

type Observer = Arc<dyn Fn(Option<&AccessToken>) + Send + Sync>;

#[derive(Default)]
struct ObserverRegistry {
    next_id: u64,
    observers: Vec<(u64, Observer)>,
}

/// In-memory access token plus the observers interested in it.
#[derive(Default)]
pub struct CredentialStore {
    token: RwLock<Option<AccessToken>>,
    registry: Arc<Mutex<ObserverRegistry>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<AccessToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_present(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn set(&self, token: AccessToken) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        tracing::debug!("access token updated");
        self.notify(Some(&token));
    }

    pub fn clear(&self) {
        let previous = self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            tracing::debug!("access token cleared");
        }
        self.notify(None);
    }

    /// Registers an observer for every `set` and `clear`. The observer stays
    /// registered for as long as the returned handle lives.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(Option<&AccessToken>) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.observers.push((id, Arc::new(observer)));
        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .observers
            .len()
    }

    fn notify(&self, token: Option<&AccessToken>) {
        // Observers run outside the lock so they may subscribe or unsubscribe.
        let observers: Vec<Observer> = self
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .observers
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        for observer in observers {
            observer(token);
        }
    }
}

pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<ObserverRegistry>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}

    /// Keeps the observer registered for the lifetime of the store.
    pub fn detach(self) {
        std::mem::forget(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .observers
                .retain(|(id, _)| *id != self.id);
        }
    }
}
